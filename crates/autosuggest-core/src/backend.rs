//! Search backend abstraction
//!
//! The backend is opaque to the controller: it receives the query text and
//! eventually yields a result set or an error. Nothing here interrupts a
//! running search; a superseded search's future is simply dropped.

use crate::state::ResultSet;
use async_trait::async_trait;
use std::future::Future;

/// Asynchronous search function
///
/// Futures are `?Send`: the controller and its backend run on one thread.
#[async_trait(?Send)]
pub trait SearchBackend {
    async fn search(&self, query: &str) -> anyhow::Result<ResultSet>;
}

/// Adapts a closure returning a future into a [`SearchBackend`]
///
/// ```rust,ignore
/// let backend = SearchFn::new(|query: String| async move {
///     client.suggest(&query).await
/// });
/// ```
pub struct SearchFn<F>(F);

impl<F> SearchFn<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait(?Send)]
impl<F, Fut> SearchBackend for SearchFn<F>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = anyhow::Result<ResultSet>> + 'static,
{
    async fn search(&self, query: &str) -> anyhow::Result<ResultSet> {
        (self.0)(query.to_string()).await
    }
}
