//! In-memory document storage backend for estate-cms.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend`
//! trait. It is what the process falls back to when no MongoDB connection string
//! is configured, and what the test-suite runs against.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using an async-aware RwLock
//! - **Insertion order** - Unsorted listings come back in creation order
//! - **Full query support** - Filtering, multi-key sorting, offset and limit
//!
//! # Quick Start
//!
//! ```ignore
//! use estate_cms::{prelude::*, memory::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = DocumentStore::new(InMemoryStore::builder().build().await?);
//!     let banners = store.repository::<HomeBanner>();
//!
//!     let id = banners.create(banner).await?;
//!     assert!(banners.get_by_id(&id.to_string()).await?.is_some());
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as estate_cms_memory;

pub mod evaluator;
pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
