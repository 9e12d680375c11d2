//! Single-flight search controller
//!
//! The controller owns the [`SearchState`] and allows at most one search in
//! flight. Every input event first fires the pending request's cancel handle,
//! then (if the policy wants a search) issues a new request raced against a
//! fresh [`CancelSignal`](crate::cancel::CancelSignal). The race is biased
//! towards the signal, so a request that was superseded before it is next
//! polled never writes its result, even if the backend already finished.
//!
//! ```text
//! input ──▶ cancel pending ──▶ store query ──▶ policy? ──no──▶ run
//!                                                │
//!                                               yes
//!                                                ▼
//!                            select! { cancel ──▶ Superseded
//!                                      search ──▶ store results ──▶ run }
//! ```
//!
//! Everything runs on one thread. The only suspension point is the race;
//! state is never borrowed across it, so several `on_input` futures can be
//! alive at once (e.g. spawned on a `LocalSet`) and still observe strictly
//! sequential state transitions.

use crate::backend::SearchBackend;
use crate::block::BlockHooks;
use crate::cancel::{self, CancelHandle, CancelReason, RequestId};
use crate::error::{Result, SuggestError};
use crate::host::Host;
use crate::popup::{Anchor, PopupController};
use crate::state::{ResultSet, SearchState};
use crate::surface::Element;
use autosuggest_config::{Category, PopupConfig};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, info, trace};

/// Caller-supplied predicate deciding whether to search and whether to show
/// the popup
///
/// Without a policy every input triggers a search and the popup is hidden
/// exactly when the query is empty.
///
/// Called while the controller holds its state borrowed: read what you need
/// from the `SearchState` argument and never call back into the controller.
pub trait VisibilityPolicy {
    fn should_handle(&self, state: &SearchState) -> bool;
}

impl<F> VisibilityPolicy for F
where
    F: Fn(&SearchState) -> bool,
{
    fn should_handle(&self, state: &SearchState) -> bool {
        self(state)
    }
}

/// What an input event ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The popup is visible and was rendered with the current results
    Shown,
    /// The popup was hidden
    Hidden,
    /// This event's search was canceled before it could apply
    Superseded(CancelReason),
    /// The controller had been torn down
    Disposed,
}

struct Inner {
    state: SearchState,
    popup: PopupController,
    policy: Option<Box<dyn VisibilityPolicy>>,
    next_request: RequestId,
    disposed: bool,
}

impl Inner {
    fn needs_search(&self) -> bool {
        self.policy
            .as_ref()
            .map_or(true, |policy| policy.should_handle(&self.state))
    }

    fn should_display(&self) -> bool {
        match &self.policy {
            Some(policy) => policy.should_handle(&self.state),
            None => !self.state.query.is_empty(),
        }
    }

    /// Recompute visibility, then render if visible
    fn run(&mut self) -> InputOutcome {
        let visible = self.should_display();
        self.popup.set_visible(visible);
        if !visible {
            trace!(query = %self.state.query, "popup hidden");
            return InputOutcome::Hidden;
        }

        self.popup.render(&self.state.result_set, &self.state);
        trace!(
            query = %self.state.query,
            items = self.state.result_set.total_items(),
            "popup rendered"
        );
        InputOutcome::Shown
    }

    fn clear_pending(&mut self, id: RequestId) {
        if self.state.pending.as_ref().map(CancelHandle::id) == Some(id) {
            self.state.pending = None;
        }
    }
}

/// Builder for [`SearchController`]
pub struct SearchControllerBuilder {
    config: PopupConfig,
    hooks: HashMap<Category, BlockHooks>,
    policy: Option<Box<dyn VisibilityPolicy>>,
    initial_query: String,
}

impl SearchControllerBuilder {
    /// Hooks for one category's block
    #[must_use]
    pub fn hooks(mut self, category: Category, hooks: BlockHooks) -> Self {
        self.hooks.insert(category, hooks);
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: impl VisibilityPolicy + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Text already in the input when the controller attaches
    #[must_use]
    pub fn initial_query(mut self, query: impl Into<String>) -> Self {
        self.initial_query = query.into();
        self
    }

    pub fn build(self, host: Rc<dyn Host>, backend: Rc<dyn SearchBackend>) -> SearchController {
        let popup = PopupController::new(host, &self.config, &self.hooks);
        SearchController {
            inner: Rc::new(RefCell::new(Inner {
                state: SearchState::new(self.initial_query),
                popup,
                policy: self.policy,
                next_request: 0,
                disposed: false,
            })),
            backend,
        }
    }
}

/// Owns the search state and drives the popup
///
/// Cheap to clone; clones share state. Hooks run synchronously while the
/// controller is rendering and must not call back into it.
#[derive(Clone)]
pub struct SearchController {
    inner: Rc<RefCell<Inner>>,
    backend: Rc<dyn SearchBackend>,
}

impl SearchController {
    pub fn builder(config: PopupConfig) -> SearchControllerBuilder {
        SearchControllerBuilder {
            config,
            hooks: HashMap::new(),
            policy: None,
            initial_query: String::new(),
        }
    }

    pub fn new(
        host: Rc<dyn Host>,
        backend: Rc<dyn SearchBackend>,
        config: PopupConfig,
    ) -> Self {
        Self::builder(config).build(host, backend)
    }

    /// Handle an input-change event carrying the new query text
    ///
    /// Returns [`InputOutcome::Superseded`] when a newer event or teardown
    /// canceled this event's search; that path never touches state. A
    /// backend failure is returned as [`SuggestError::SearchRejected`] and
    /// leaves the previous results in place.
    pub async fn on_input(&self, text: impl Into<String>) -> Result<InputOutcome> {
        let query = text.into();

        let (id, signal) = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                trace!(%query, "input after teardown ignored");
                return Ok(InputOutcome::Disposed);
            }

            if let Some(mut previous) = inner.state.pending.take() {
                previous.cancel(CancelReason::Superseded);
                debug!(request = previous.id(), "canceled superseded search");
            }

            inner.state.query.clone_from(&query);

            if !inner.needs_search() {
                trace!(%query, "policy skipped search");
                return Ok(inner.run());
            }

            inner.next_request += 1;
            let id = inner.next_request;
            let (handle, signal) = cancel::pair(id);
            inner.state.pending = Some(handle);
            (id, signal)
        };

        debug!(request = id, %query, "issuing search");
        let result = tokio::select! {
            biased;
            reason = signal => {
                trace!(request = id, %reason, "stale search dropped");
                return Ok(InputOutcome::Superseded(reason));
            }
            result = self.backend.search(&query) => result,
        };

        let mut inner = self.inner.borrow_mut();
        if inner.disposed {
            return Ok(InputOutcome::Disposed);
        }
        inner.clear_pending(id);

        match result {
            Ok(result_set) => {
                debug!(request = id, items = result_set.total_items(), "search settled");
                inner.state.result_set = result_set;
                Ok(inner.run())
            }
            Err(source) => {
                debug!(request = id, error = %source, "search rejected");
                Err(SuggestError::SearchRejected { query, source })
            }
        }
    }

    /// Re-run visibility and rendering against the current state
    pub fn refresh(&self) -> InputOutcome {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed {
            return InputOutcome::Disposed;
        }
        inner.run()
    }

    /// Cancel any pending search and release listeners
    ///
    /// Idempotent. The popup surface stays mounted; see [`Self::unmount`].
    pub fn teardown(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        if let Some(mut pending) = inner.state.pending.take() {
            pending.cancel(CancelReason::Teardown);
            debug!(request = pending.id(), "canceled search on teardown");
        }
        inner.popup.teardown();
        info!("search controller torn down");
    }

    /// Detach the popup surface from the document
    pub fn unmount(&self) {
        self.inner.borrow_mut().popup.unmount();
    }

    pub fn reposition(&self) -> Anchor {
        self.inner.borrow().popup.reposition()
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.inner.borrow().popup.anchor()
    }

    pub fn query(&self) -> String {
        self.inner.borrow().state.query.clone()
    }

    pub fn result_set(&self) -> ResultSet {
        self.inner.borrow().state.result_set.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.inner.borrow().state.is_pending()
    }

    pub fn is_visible(&self) -> bool {
        self.inner.borrow().popup.is_visible()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }

    /// Root element of the popup
    pub fn surface(&self) -> Element {
        self.inner.borrow().popup.surface().clone()
    }
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SearchController")
            .field("state", &inner.state)
            .field("popup", &inner.popup)
            .field("disposed", &inner.disposed)
            .finish()
    }
}
