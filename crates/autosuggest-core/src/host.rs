//! Host environment the popup lives in
//!
//! The host owns everything outside the popup: the search input's geometry,
//! the document the popup is mounted into, and the viewport-resize signal.
//! [`MemoryHost`] is a headless implementation used by the CLI and tests.

use crate::surface::{Element, Rect};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Callback fired on every viewport resize
pub type ResizeListener = Rc<dyn Fn()>;

/// Environment collaborator consumed by the popup
///
/// All methods take `&self`; implementations use interior mutability and
/// live on a single thread.
pub trait Host {
    /// Current bounding box of the search input
    fn input_rect(&self) -> Rect;

    /// Attach the popup surface to the document
    fn mount(&self, surface: &Element);

    /// Detach the popup surface from the document
    fn unmount(&self, surface: &Element);

    /// Register a resize listener; it stays registered while the returned
    /// subscription is active
    fn on_resize(&self, listener: ResizeListener) -> Subscription;
}

/// Scoped registration handle
///
/// Releasing runs the release action exactly once, whether triggered by
/// [`Subscription::unsubscribe`] or by drop.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release
    pub fn inert() -> Self {
        Self { release: None }
    }

    pub fn unsubscribe(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[derive(Default)]
struct MemoryHostInner {
    input_rect: Cell<Rect>,
    body: RefCell<Vec<Element>>,
    listeners: RefCell<BTreeMap<u64, ResizeListener>>,
    next_listener: Cell<u64>,
    mount_calls: Cell<usize>,
}

/// In-memory host with a settable input rectangle and a body element list
///
/// Clones share state, so a test can keep one handle and give another to the
/// popup.
#[derive(Clone, Default)]
pub struct MemoryHost {
    inner: Rc<MemoryHostInner>,
}

impl MemoryHost {
    pub fn new(input_rect: Rect) -> Self {
        let host = Self::default();
        host.inner.input_rect.set(input_rect);
        host
    }

    /// Move or resize the input, then notify resize listeners
    pub fn resize(&self, input_rect: Rect) {
        self.inner.input_rect.set(input_rect);
        let listeners: Vec<ResizeListener> =
            self.inner.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener();
        }
    }

    /// Surfaces currently attached to the body
    pub fn body(&self) -> Vec<Element> {
        self.inner.body.borrow().clone()
    }

    pub fn is_mounted(&self, surface: &Element) -> bool {
        self.inner.body.borrow().iter().any(|el| el.ptr_eq(surface))
    }

    pub fn mount_calls(&self) -> usize {
        self.inner.mount_calls.get()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl Host for MemoryHost {
    fn input_rect(&self) -> Rect {
        self.inner.input_rect.get()
    }

    fn mount(&self, surface: &Element) {
        self.inner.mount_calls.set(self.inner.mount_calls.get() + 1);
        let mut body = self.inner.body.borrow_mut();
        if !body.iter().any(|el| el.ptr_eq(surface)) {
            body.push(surface.clone());
        }
    }

    fn unmount(&self, surface: &Element) {
        self.inner
            .body
            .borrow_mut()
            .retain(|el| !el.ptr_eq(surface));
    }

    fn on_resize(&self, listener: ResizeListener) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner.listeners.borrow_mut().insert(id, listener);

        let inner = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.listeners.borrow_mut().remove(&id);
            }
        })
    }
}
