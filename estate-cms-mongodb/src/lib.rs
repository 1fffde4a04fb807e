//! MongoDB backend implementation for estate-cms.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait,
//! the production store of the CMS. Filters, sorting and windowing are translated
//! to native MongoDB queries and executed server-side.
//!
//! To use this backend, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! estate-cms = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Connection
//!
//! The backend holds one driver [`Client`](mongodb::Client), which is itself a
//! connection pool. Build it once per process and share it through the
//! `DocumentStore`.
//!
//! # Example
//!
//! ```ignore
//! use estate_cms::{backend::StoreBackendBuilder, mongodb::MongoDbStore, store::DocumentStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = MongoDbStore::builder("mongodb://localhost:27017", "kmk_homes")
//!         .build()
//!         .await?;
//!     let store = DocumentStore::new(backend);
//!     // ...
//!     store.shutdown().await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as estate_cms_mongodb;

pub mod query;
pub mod store;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
