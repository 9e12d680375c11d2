//! # Autosuggest Core
//!
//! Search-suggestion popup driven by a single-flight search controller.
//!
//! The [`SearchController`] reacts to input-change events. Each event cancels
//! whatever search is still in flight, issues a new one through a
//! [`SearchBackend`], and renders the settled [`ResultSet`] into a floating
//! popup made of one [`Block`] per enabled [`Category`]. A result that
//! arrives after its request was superseded is discarded and never rendered.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use autosuggest_core::{
//!     Category, MemoryHost, PopupConfig, Rect, ResultSet, SearchController, SearchFn,
//! };
//!
//! # async fn demo() -> autosuggest_core::Result<()> {
//! let host = MemoryHost::new(Rect::new(0.0, 0.0, 320.0, 32.0));
//! let backend = SearchFn::new(|_query: String| async move {
//!     Ok::<_, anyhow::Error>(ResultSet::new())
//! });
//! let controller = SearchController::new(
//!     Rc::new(host),
//!     Rc::new(backend),
//!     PopupConfig::with_blocks([Category::Suggestion]),
//! );
//!
//! controller.on_input("shoes").await?;
//! println!("{}", controller.surface().to_markup());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`controller`]: single-flight input handling
//! - [`cancel`]: one-shot cancel handle/signal pairs
//! - [`popup`]: the floating surface and its anchoring
//! - [`registry`] and [`block`]: per-category rendering
//! - [`host`]: the document/window collaborator
//! - [`surface`]: DOM-like element tree

#![warn(clippy::all)]

pub mod backend;
pub mod block;
pub mod cancel;
pub mod controller;
pub mod error;
pub mod host;
pub mod popup;
pub mod registry;
pub mod state;
pub mod surface;

pub use backend::{SearchBackend, SearchFn};
pub use block::{
    base_item, renderer_for, Block, BlockHooks, ChildHook, ContainerHook, ItemRenderer,
};
pub use cancel::{CancelHandle, CancelReason, CancelSignal, RequestId};
pub use controller::{InputOutcome, SearchController, SearchControllerBuilder, VisibilityPolicy};
pub use error::{Result, SuggestError};
pub use host::{Host, MemoryHost, ResizeListener, Subscription};
pub use popup::{Anchor, PopupController};
pub use registry::BlockRegistry;
pub use state::{RawItem, ResultSet, SearchState};
pub use surface::{Element, Rect};

pub use autosuggest_config::{BlockConfig, Category, PopupConfig, StyleMap};
