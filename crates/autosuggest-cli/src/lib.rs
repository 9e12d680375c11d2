//! Headless driver for the suggestion popup
//!
//! Wires the otherwise-external input and resize events: keystrokes are
//! replayed against a [`SearchController`](autosuggest_core::SearchController)
//! backed by a static catalog with simulated latency.

pub mod catalog;
pub mod cli;
pub mod replay;

pub use catalog::CatalogBackend;
pub use replay::{replay, Keystroke, Replay};
