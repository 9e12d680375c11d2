//! DOM-like element surface
//!
//! [`Element`] is a shared handle to a node in a mutable tree, the same
//! shape a browser DOM exposes: classes, inline style, attributes, text and
//! ordered children with a back-link to the parent. Cloning the handle never
//! copies the node. Rendering builds fresh subtrees and swaps them into the
//! popup with [`Element::replace_child`], so a host that holds the popup root
//! observes every change without re-mounting.

use autosuggest_config::StyleMap;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Default)]
struct ElementData {
    tag: String,
    classes: Vec<String>,
    style: StyleMap,
    attrs: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<Element>,
    parent: Weak<RefCell<ElementData>>,
}

/// Shared handle to a surface node
#[derive(Clone)]
pub struct Element(Rc<RefCell<ElementData>>);

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(ElementData {
            tag: tag.into(),
            ..Default::default()
        })))
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    /// Add a class unless already present
    pub fn add_class(&self, class: impl Into<String>) {
        let class = class.into();
        let mut data = self.0.borrow_mut();
        if !data.classes.contains(&class) {
            data.classes.push(class);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    pub fn set_style(&self, property: impl Into<String>, value: impl Into<String>) {
        self.0
            .borrow_mut()
            .style
            .insert(property.into(), value.into());
    }

    /// Merge declarations into the inline style, later values winning
    pub fn apply_styles(&self, styles: &StyleMap) {
        let mut data = self.0.borrow_mut();
        for (property, value) in styles {
            data.style.insert(property.clone(), value.clone());
        }
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().style.get(property).cloned()
    }

    pub fn set_attr(&self, name: impl Into<String>, value: impl Into<String>) {
        self.0.borrow_mut().attrs.insert(name.into(), value.into());
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.0.borrow().attrs.get(name).cloned()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.0.borrow_mut().text = Some(text.into());
    }

    pub fn clear_text(&self) {
        self.0.borrow_mut().text = None;
    }

    /// Own text of this node, excluding descendants
    pub fn text(&self) -> Option<String> {
        self.0.borrow().text.clone()
    }

    /// Append a child, detaching it from its previous parent first
    pub fn append(&self, child: Element) {
        if self.ptr_eq(&child) {
            return;
        }
        child.remove();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child);
    }

    /// Swap `old` for `new` at the same position
    ///
    /// Returns `false` and leaves the tree untouched when `old` is not a
    /// child of this element.
    pub fn replace_child(&self, new: Element, old: &Element) -> bool {
        let Some(index) = self.position_of(old) else {
            return false;
        };
        if new.ptr_eq(old) {
            return true;
        }
        new.remove();
        // `new` may have been an earlier sibling
        let index = self.position_of(old).unwrap_or(index);
        old.0.borrow_mut().parent = Weak::new();
        new.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children[index] = new;
        true
    }

    /// Detach from the parent, if any
    pub fn remove(&self) {
        let Some(parent) = self.parent() else {
            return;
        };
        parent
            .0
            .borrow_mut()
            .children
            .retain(|child| !child.ptr_eq(self));
        self.0.borrow_mut().parent = Weak::new();
    }

    pub fn parent(&self) -> Option<Element> {
        self.0.borrow().parent.upgrade().map(Element)
    }

    pub fn children(&self) -> Vec<Element> {
        self.0.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    pub fn child(&self, index: usize) -> Option<Element> {
        self.0.borrow().children.get(index).cloned()
    }

    /// Whether both handles point at the same node
    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Concatenated text of this node and all descendants, depth first
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        let data = self.0.borrow();
        if let Some(text) = &data.text {
            out.push_str(text);
        }
        for child in &data.children {
            child.collect_text(out);
        }
    }

    fn position_of(&self, child: &Element) -> Option<usize> {
        self.0
            .borrow()
            .children
            .iter()
            .position(|c| c.ptr_eq(child))
    }

    /// Serialise the subtree as indented HTML-like markup
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out, 0);
        out
    }

    fn write_markup(&self, out: &mut String, depth: usize) {
        let data = self.0.borrow();
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&data.tag);
        if !data.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape(&data.classes.join(" "))));
        }
        if !data.style.is_empty() {
            let style = data
                .style
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join("; ");
            out.push_str(&format!(" style=\"{}\"", escape(&style)));
        }
        for (name, value) in &data.attrs {
            out.push_str(&format!(" {name}=\"{}\"", escape(value)));
        }
        out.push('>');

        if data.children.is_empty() {
            if let Some(text) = &data.text {
                out.push_str(&escape(text));
            }
        } else {
            out.push('\n');
            if let Some(text) = &data.text {
                out.push_str(&"  ".repeat(depth + 1));
                out.push_str(&escape(text));
                out.push('\n');
            }
            for child in &data.children {
                child.write_markup(out, depth + 1);
            }
            out.push_str(&indent);
        }
        out.push_str(&format!("</{}>\n", data.tag));
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("Element")
            .field("tag", &data.tag)
            .field("classes", &data.classes)
            .field("text", &data.text)
            .field("children", &data.children.len())
            .finish()
    }
}

/// Screen-space bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}
