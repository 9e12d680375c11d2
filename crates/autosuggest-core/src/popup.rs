//! Floating popup surface anchored under the search input

use crate::block::BlockHooks;
use crate::host::{Host, Subscription};
use crate::registry::BlockRegistry;
use crate::state::{ResultSet, SearchState};
use crate::surface::{Element, Rect};
use autosuggest_config::{Category, PopupConfig};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Screen position of the popup, derived from the input's bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub top: f64,
    pub right: f64,
}

impl Anchor {
    pub fn from_input(rect: Rect) -> Self {
        Self {
            top: rect.bottom(),
            right: rect.x,
        }
    }

    fn apply(&self, surface: &Element) {
        surface.set_style("position", "fixed");
        surface.set_style("top", format!("{}px", self.top));
        surface.set_style("right", format!("{}px", self.right));
    }
}

fn reposition_surface(host: &dyn Host, surface: &Element) -> Anchor {
    let anchor = Anchor::from_input(host.input_rect());
    anchor.apply(surface);
    trace!(top = anchor.top, right = anchor.right, "repositioned popup");
    anchor
}

/// Owns the popup surface, its visibility and its anchoring
///
/// The surface holds one container per enabled block, in configured order.
/// Rendering swaps each container in place; hiding only changes `display`,
/// so rendered content survives a hide/show cycle.
pub struct PopupController {
    host: Rc<dyn Host>,
    surface: Element,
    registry: BlockRegistry,
    resize: Subscription,
    mounted: bool,
    visible: bool,
}

impl PopupController {
    pub fn new(
        host: Rc<dyn Host>,
        config: &PopupConfig,
        hooks: &HashMap<Category, BlockHooks>,
    ) -> Self {
        let surface = Element::new("div");
        reposition_surface(host.as_ref(), &surface);
        surface.add_class("suggestion-popup");
        if let Some(class) = &config.popup_class_name {
            surface.add_class(class);
        }
        surface.apply_styles(&config.popup_style);

        let registry = BlockRegistry::new(config, hooks);
        for element in registry.elements() {
            surface.append(element);
        }

        let weak_host: Weak<dyn Host> = Rc::downgrade(&host);
        let listener_surface = surface.clone();
        let resize = host.on_resize(Rc::new(move || {
            if let Some(host) = weak_host.upgrade() {
                reposition_surface(host.as_ref(), &listener_surface);
            }
        }));

        debug!(blocks = ?registry.categories(), "popup initialised");

        Self {
            host,
            surface,
            registry,
            resize,
            mounted: false,
            visible: true,
        }
    }

    /// Recompute the anchor from the input's current bounding box
    pub fn reposition(&self) -> Anchor {
        reposition_surface(self.host.as_ref(), &self.surface)
    }

    /// Show or hide without discarding rendered content
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.surface
            .set_style("display", if visible { "inherit" } else { "none" });
    }

    /// Render all blocks and mount the surface on first use
    pub fn render(&mut self, result_set: &ResultSet, state: &SearchState) {
        self.registry.render(result_set, state);
        if !self.mounted {
            self.host.mount(&self.surface);
            self.mounted = true;
            debug!("popup mounted");
        }
    }

    /// Release the resize listener; the surface stays mounted
    pub fn teardown(&mut self) {
        if self.resize.is_active() {
            self.resize.unsubscribe();
            debug!("popup resize listener released");
        }
    }

    /// Detach the surface from the document; safe to call repeatedly
    pub fn unmount(&mut self) {
        if self.mounted {
            self.host.unmount(&self.surface);
            self.mounted = false;
        }
    }

    pub fn surface(&self) -> &Element {
        &self.surface
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Anchor currently applied to the surface
    pub fn anchor(&self) -> Option<Anchor> {
        let parse = |property: &str| {
            self.surface
                .style(property)
                .and_then(|v| v.trim_end_matches("px").parse::<f64>().ok())
        };
        Some(Anchor {
            top: parse("top")?,
            right: parse("right")?,
        })
    }
}

impl std::fmt::Debug for PopupController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopupController")
            .field("surface", &self.surface)
            .field("registry", &self.registry)
            .field("resize", &self.resize)
            .field("mounted", &self.mounted)
            .field("visible", &self.visible)
            .field("host", &"<dyn Host>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::state::RawItem;
    use serde_json::json;

    fn popup_with(config: &PopupConfig) -> (MemoryHost, PopupController) {
        let host = MemoryHost::new(Rect::new(120.0, 8.0, 300.0, 32.0));
        let popup = PopupController::new(Rc::new(host.clone()), config, &HashMap::new());
        (host, popup)
    }

    fn suggestions(terms: &[&str]) -> ResultSet {
        ResultSet::new().with(
            Category::Suggestion,
            terms
                .iter()
                .map(|t| RawItem::new(json!({"url": format!("/s/{t}"), "term": t}))),
        )
    }

    #[test]
    fn construction_anchors_and_decorates_surface() {
        let mut config = PopupConfig::default();
        config.popup_class_name = Some("dark".into());
        let (_host, popup) = popup_with(&config);

        let surface = popup.surface();
        assert_eq!(surface.classes(), vec!["suggestion-popup", "dark"]);
        assert_eq!(surface.style("position").as_deref(), Some("fixed"));
        assert_eq!(popup.anchor(), Some(Anchor { top: 40.0, right: 120.0 }));
        assert_eq!(surface.child_count(), 3);
        assert!(!popup.is_mounted());
    }

    #[test]
    fn popup_style_overrides_anchor_style() {
        let mut config = PopupConfig::default();
        config
            .popup_style
            .insert("position".into(), "absolute".into());
        let (_host, popup) = popup_with(&config);
        assert_eq!(popup.surface().style("position").as_deref(), Some("absolute"));
    }

    #[test]
    fn resize_moves_anchor_without_rerendering() {
        let (host, mut popup) = popup_with(&PopupConfig::with_blocks([Category::Suggestion]));
        popup.render(&suggestions(&["boots"]), &SearchState::default());
        let rendered = popup.surface().child(0).unwrap();

        host.resize(Rect::new(16.0, 100.0, 300.0, 40.0));

        assert_eq!(popup.anchor(), Some(Anchor { top: 140.0, right: 16.0 }));
        assert!(popup.surface().child(0).unwrap().ptr_eq(&rendered));
    }

    #[test]
    fn render_mounts_once_and_replaces_blocks() {
        let (host, mut popup) = popup_with(&PopupConfig::with_blocks([Category::Suggestion]));

        popup.render(&suggestions(&["a"]), &SearchState::default());
        popup.render(&suggestions(&["a", "b"]), &SearchState::default());

        assert_eq!(host.mount_calls(), 1);
        assert!(host.is_mounted(popup.surface()));
        assert_eq!(popup.surface().child_count(), 1);
        assert_eq!(popup.surface().child(0).unwrap().child_count(), 3);
    }

    #[test]
    fn hiding_keeps_rendered_content() {
        let (_host, mut popup) = popup_with(&PopupConfig::with_blocks([Category::Suggestion]));
        popup.render(&suggestions(&["boots"]), &SearchState::default());

        popup.set_visible(false);
        assert_eq!(popup.surface().style("display").as_deref(), Some("none"));
        assert!(popup.surface().text_content().contains("boots"));

        popup.set_visible(true);
        assert_eq!(popup.surface().style("display").as_deref(), Some("inherit"));
    }

    #[test]
    fn teardown_releases_listener_and_keeps_surface() {
        let (host, mut popup) = popup_with(&PopupConfig::default());
        popup.render(&ResultSet::new(), &SearchState::default());
        assert_eq!(host.listener_count(), 1);

        popup.teardown();
        popup.teardown();
        assert_eq!(host.listener_count(), 0);
        assert!(host.is_mounted(popup.surface()));

        let before = popup.anchor();
        host.resize(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(popup.anchor(), before);
    }

    #[test]
    fn unmount_is_idempotent() {
        let (host, mut popup) = popup_with(&PopupConfig::default());
        popup.render(&ResultSet::new(), &SearchState::default());

        popup.unmount();
        popup.unmount();
        assert!(!popup.is_mounted());
        assert!(host.body().is_empty());
    }
}
