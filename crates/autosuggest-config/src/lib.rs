//! # Autosuggest Configuration Library
//!
//! Construction-time configuration for the suggestion popup: which result
//! categories are rendered, in what order, and how each block's container and
//! items are decorated.
//!
//! ## Features
//!
//! - TOML and JSON support, format picked from the file extension
//! - Every field defaulted, so partial files load
//! - No dependency on the rendering core
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use autosuggest_config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::load_from_file("autosuggest.toml").await?;
//!     for category in config.popup.enabled_blocks() {
//!         println!("{category}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod category;
mod loader;
mod popup;

pub use category::*;
pub use loader::*;
pub use popup::*;
