#![allow(dead_code)]

use autosuggest_core::{
    BlockHooks, Category, MemoryHost, PopupConfig, RawItem, Rect, ResultSet, SearchController,
    SearchControllerBuilder, SearchFn,
};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub const LATENCY: Duration = Duration::from_millis(50);

/// Controller wired to an in-memory host and a backend that echoes the query
/// back as a single suggestion, by default after [`LATENCY`]
pub struct Harness {
    pub host: MemoryHost,
    pub controller: SearchController,
    /// Searches whose latency elapsed without being dropped
    pub completed: Rc<RefCell<Vec<String>>>,
    /// Term of the first suggestion at each container render
    pub rendered: Rc<RefCell<Vec<String>>>,
    pub issued: Rc<Cell<usize>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(|builder| builder)
    }

    pub fn with(
        customise: impl FnOnce(SearchControllerBuilder) -> SearchControllerBuilder,
    ) -> Self {
        Self::build(|_| LATENCY, customise)
    }

    /// Backend latency chosen per query, so older searches can settle after
    /// younger ones
    pub fn with_latency(latency: impl Fn(&str) -> Duration + 'static) -> Self {
        Self::build(latency, |builder| builder)
    }

    fn build(
        latency: impl Fn(&str) -> Duration + 'static,
        customise: impl FnOnce(SearchControllerBuilder) -> SearchControllerBuilder,
    ) -> Self {
        let host = MemoryHost::new(Rect::new(120.0, 8.0, 300.0, 32.0));
        let completed = Rc::new(RefCell::new(Vec::new()));
        let rendered = Rc::new(RefCell::new(Vec::new()));
        let issued = Rc::new(Cell::new(0));

        let backend = {
            let completed = completed.clone();
            let issued = issued.clone();
            SearchFn::new(move |query: String| {
                let completed = completed.clone();
                let delay = latency(&query);
                issued.set(issued.get() + 1);
                async move {
                    tokio::time::sleep(delay).await;
                    if query == "boom" {
                        anyhow::bail!("backend unavailable");
                    }
                    completed.borrow_mut().push(query.clone());
                    Ok(suggestions(&query))
                }
            })
        };

        let hooks = {
            let rendered = rendered.clone();
            BlockHooks::new().after_render_container(move |_, items: &[RawItem]| {
                let term = items.first().map(|item| item.field("term")).unwrap_or_default();
                rendered.borrow_mut().push(term);
            })
        };

        let builder = SearchController::builder(PopupConfig::with_blocks([Category::Suggestion]))
            .hooks(Category::Suggestion, hooks);
        let controller = customise(builder).build(Rc::new(host.clone()), Rc::new(backend));

        Self {
            host,
            controller,
            completed,
            rendered,
            issued,
        }
    }

    pub fn completed(&self) -> Vec<String> {
        self.completed.borrow().clone()
    }

    pub fn rendered(&self) -> Vec<String> {
        self.rendered.borrow().clone()
    }
}

pub fn suggestions(term: &str) -> ResultSet {
    ResultSet::new().with(
        Category::Suggestion,
        [RawItem::new(json!({"url": format!("/s/{term}"), "term": term}))],
    )
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}
