//! Document repository of the KMK Homes content-management backend.
//!
//! This crate is the entry point: it re-exports the generic repository from
//! `estate-cms-core`, the storage backends, and adds the CMS record types, their
//! listing queries and the process configuration.
//!
//! # Features
//!
//! - **Typed records** - One struct per collection, bound with `#[derive(Document)]`
//! - **One repository for every collection** - Create, read, list, update, delete, count
//! - **Multiple backends** - MongoDB in production, in-memory for development and tests
//! - **Opaque identifiers** - Malformed ids are treated as "not found", never as errors
//!
//! # Quick Start
//!
//! ```ignore
//! use estate_cms::{prelude::*, memory::InMemoryStore, models::HomeBanner};
//!
//! #[tokio::main]
//! async fn main() -> RepositoryResult<()> {
//!     let store = DocumentStore::new(InMemoryStore::new());
//!     let banners = store.repository::<HomeBanner>();
//!
//!     let id = banners
//!         .create(HomeBanner {
//!             title: "Luxury Villas in Kompally".to_string(),
//!             subtitle: None,
//!             image_url: "https://cdn.example.com/hero.jpg".to_string(),
//!             cta_text: None,
//!             cta_link: None,
//!             active: true,
//!             display_order: 1,
//!         })
//!         .await?;
//!
//!     banners
//!         .update_by_id(&id.to_string(), Patch::new().set("title", "Changed"))
//!         .await?;
//!
//!     let listed = banners.get_all(listing::home_banners()).await?;
//!     println!("{}", listed[0].to_json()?);
//!
//!     store.shutdown().await
//! }
//! ```
//!
//! # Runtime backend selection
//!
//! [`config::StoreConfig::connect`] picks the backend from `MONGO_URL` and returns
//! a [`DynDocumentStore`](store::DynDocumentStore), so the rest of the process is
//! written once against `Box<dyn StoreBackend>`.
//!
//! # Backends
//!
//! - [`memory`] - In-memory storage for development and testing
//! - [`mongodb`] - Persistent MongoDB backend (requires `mongodb` feature, on by default)

#[allow(unused_extern_crates)]
extern crate self as estate_cms;

pub mod census;
pub mod config;
pub mod listing;
pub mod logging;
pub mod models;
pub mod prelude;

pub use estate_cms_core::{backend, clock, document, error, id, page, query, repository, store};
pub use estate_cms_macros::Document;

// Re-export BSON types for convenience
pub use bson;

/// In-memory storage backend implementations.
pub mod memory {
    pub use estate_cms_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use estate_cms_mongodb::{MongoDbStore, MongoDbStoreBuilder};
}
