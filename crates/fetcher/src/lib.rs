//! # AI Oversight Fetcher
//!
//! Retrieves static JSON documents, one request per document, all in flight
//! at once.
//!
//! ## Components
//!
//! - `ResourceFetcher` - Transport abstraction
//! - `fetch_all` - Concurrent batch retrieval keyed by resource id
//! - `HttpFetcher` / `StaticDirFetcher` / `MemoryFetcher` - Transports

mod batch;
mod http;
mod memory;
mod static_dir;

pub use batch::{fetch_all, ResourceBag, ResourceFetcher, ResourceRequest};
pub use http::HttpFetcher;
pub use memory::MemoryFetcher;
pub use static_dir::StaticDirFetcher;
