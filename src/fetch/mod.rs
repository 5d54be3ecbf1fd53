//! Fetch Module
//!
//! The single-argument function being memoized, and its adapters.

mod http;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::FetchError;

pub use http::HttpFetcher;

/// Type-erased fetcher used by the HTTP service.
pub type SharedFetcher = Arc<dyn Fetcher<Error = FetchError>>;

// == Fetcher Trait ==
/// A function from a key to serialized text.
#[async_trait]
pub trait Fetcher: Send + Sync {
    type Error: Send + 'static;

    async fn fetch(&self, key: &str) -> Result<String, Self::Error>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    type Error = T::Error;

    async fn fetch(&self, key: &str) -> Result<String, Self::Error> {
        (**self).fetch(key).await
    }
}

// == Closure Adapter ==
/// Fetcher backed by an async closure. Built with [`fetcher_fn`].
#[derive(Clone)]
pub struct FnFetcher<F> {
    f: F,
}

/// Adapts `Fn(String) -> impl Future<Output = Result<String, E>>` into a `Fetcher`.
pub fn fetcher_fn<F, Fut, E>(f: F) -> FnFetcher<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, E>> + Send + 'static,
    E: Send + 'static,
{
    FnFetcher { f }
}

#[async_trait]
impl<F, Fut, E> Fetcher for FnFetcher<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, E>> + Send + 'static,
    E: Send + 'static,
{
    type Error = E;

    async fn fetch(&self, key: &str) -> Result<String, E> {
        (self.f)(key.to_string()).await
    }
}
