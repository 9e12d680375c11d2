//! Category blocks
//!
//! A block renders one category of results: a container, a title derived
//! from the category name, then one item per result in input order. The
//! categories differ only in how a single item is drawn, so each category
//! maps to an [`ItemRenderer`] in [`renderer_for`]; every renderer starts
//! from [`base_item`] for the shared decoration.

use crate::state::{RawItem, SearchState};
use crate::surface::Element;
use autosuggest_config::{BlockConfig, Category};
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// Called once per item after it is built: `(node, item, index)`
pub type ChildHook = Rc<dyn Fn(&Element, &RawItem, usize)>;

/// Called once after the container is assembled: `(container, items)`
pub type ContainerHook = Rc<dyn Fn(&Element, &[RawItem])>;

/// Draws one item of a category
pub type ItemRenderer = fn(&BlockConfig, &RawItem, usize, &SearchState) -> Element;

/// External customisation points for a block
#[derive(Clone, Default)]
pub struct BlockHooks {
    pub after_render_child: Option<ChildHook>,
    pub after_render_container: Option<ContainerHook>,
}

impl BlockHooks {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn after_render_child(
        mut self,
        hook: impl Fn(&Element, &RawItem, usize) + 'static,
    ) -> Self {
        self.after_render_child = Some(Rc::new(hook));
        self
    }

    #[must_use]
    pub fn after_render_container(mut self, hook: impl Fn(&Element, &[RawItem]) + 'static) -> Self {
        self.after_render_container = Some(Rc::new(hook));
        self
    }
}

impl fmt::Debug for BlockHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockHooks")
            .field("after_render_child", &self.after_render_child.is_some())
            .field("after_render_container", &self.after_render_container.is_some())
            .finish()
    }
}

/// Renderer for a category
pub fn renderer_for(category: Category) -> ItemRenderer {
    match category {
        Category::Suggestion => render_suggestion_item,
        Category::Collection => render_collection_item,
        Category::Product => render_product_item,
    }
}

/// Generic labelled item carrying the decoration shared by every category
pub fn base_item(options: &BlockConfig, item: &RawItem) -> Element {
    let el = Element::new(&options.child_elm_type);
    el.set_text(item.display());
    el.add_class("block-item");
    if let Some(class) = &options.child_class_name {
        el.add_class(class);
    }
    el.apply_styles(&options.child_style);
    el
}

fn link_item(options: &BlockConfig, item: &RawItem) -> Element {
    let el = base_item(options, item);
    el.set_attr("href", item.field("url"));
    el.set_attr("target", "_blank");
    el
}

fn render_suggestion_item(
    options: &BlockConfig,
    item: &RawItem,
    _index: usize,
    _state: &SearchState,
) -> Element {
    let el = link_item(options, item);
    el.add_class("suggestion-block-item");
    el.set_text(item.field("term"));
    el
}

fn render_collection_item(
    options: &BlockConfig,
    item: &RawItem,
    _index: usize,
    _state: &SearchState,
) -> Element {
    let el = link_item(options, item);
    el.set_text(item.field("title"));
    el
}

fn render_product_item(
    options: &BlockConfig,
    item: &RawItem,
    _index: usize,
    _state: &SearchState,
) -> Element {
    let el = link_item(options, item);
    el.clear_text();

    let layout = Element::new("div");
    layout.add_class("product-block-item");

    let image = Element::new("img");
    image.add_class("product-block-item");
    image.add_class("image");
    image.set_attr("src", item.field("image"));
    layout.append(image);

    let details = Element::new("div");
    for (class, text) in [
        ("title", item.field("title")),
        ("brand", item.field("brand")),
        ("price", format!("{}$", item.field("price"))),
    ] {
        let line = Element::new("p");
        line.add_class("product-block-item");
        line.add_class(class);
        line.set_text(text);
        details.append(line);
    }
    layout.append(details);

    el.append(layout);
    el
}

/// One rendered category section of the popup
pub struct Block {
    category: Category,
    options: BlockConfig,
    hooks: BlockHooks,
    render_item: ItemRenderer,
    el: Element,
}

impl Block {
    pub fn new(category: Category, options: BlockConfig, hooks: BlockHooks) -> Self {
        let el = Element::new(&options.container_elm_type);
        Self {
            category,
            render_item: renderer_for(category),
            options,
            hooks,
            el,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn options(&self) -> &BlockConfig {
        &self.options
    }

    /// The container currently representing this block
    pub fn element(&self) -> &Element {
        &self.el
    }

    fn render_title(&self) -> Element {
        let title = Element::new("p");
        title.add_class("block-title");
        title.set_text(self.category.title());
        title
    }

    /// Build a fresh container for `items` without touching the mounted one
    pub fn render_container(&self, items: &[RawItem], state: &SearchState) -> Element {
        let container = Element::new(&self.options.container_elm_type);
        container.add_class("block-container");
        if let Some(class) = &self.options.container_class_name {
            container.add_class(class);
        }
        container.apply_styles(&self.options.container_style);

        container.append(self.render_title());

        for (index, item) in items.iter().enumerate() {
            let child = (self.render_item)(&self.options, item, index, state);
            if let Some(hook) = &self.hooks.after_render_child {
                hook(&child, item, index);
            }
            container.append(child);
        }

        container
    }

    /// Render `items` and swap the result in for the previous container
    ///
    /// The new container takes the old one's position under its parent.
    pub fn render(&mut self, items: &[RawItem], state: &SearchState) -> Element {
        let container = self.render_container(items, state);
        if let Some(hook) = &self.hooks.after_render_container {
            hook(&container, items);
        }

        if let Some(parent) = self.el.parent() {
            parent.replace_child(container.clone(), &self.el);
        }
        trace!(category = %self.category, items = items.len(), "rendered block");

        self.el = container.clone();
        container
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("category", &self.category)
            .field("options", &self.options)
            .field("hooks", &self.hooks)
            .finish()
    }
}
