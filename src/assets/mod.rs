//! Remote display assets
//!
//! Fetch-once, reuse-forever store for remotely sourced artwork, plus the
//! worker-thread fetch pipeline that keeps the network off the event loop.

pub mod cache;
pub mod fetch;

pub use cache::{AssetCache, AssetState};
pub use fetch::{AssetFetchError, AssetFetcher, HttpFetcher};
