//! Generic document repository for the estate CMS content collections.
//!
//! Every content type of the site (properties, banners, testimonials, blogs, plots,
//! ...) is stored the same way: one collection per type, schema-less documents, and
//! the same seven CRUD operations. This crate provides that one implementation:
//!
//! - **Identifiers** ([`id`]) - Opaque, validated document identifiers
//! - **Document traits** ([`document`]) - Record trait, stored envelope, partial updates
//! - **Query and filtering API** ([`query`]) - Filters, multi-key sorting, offset/limit
//! - **Store backend abstraction** ([`backend`]) - The seam to a concrete store
//! - **Repository** ([`repository`]) - The CRUD façade bound to one collection
//! - **Document store** ([`store`]) - The lifecycle-scoped handle owning the backend
//! - **Pagination** ([`page`]) - Page windows over listings
//! - **Clock** ([`clock`]) - Timestamp source for `created_at` / `updated_at`
//! - **Error handling** ([`error`]) - Error and result types
//!
//! # Example
//!
//! ```ignore
//! use estate_cms_core::{document::Document, store::DocumentStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Testimonial {
//!     pub name: String,
//!     pub testimonial: String,
//! }
//!
//! impl Document for Testimonial {
//!     fn collection_name() -> &'static str {
//!         "testimonials"
//!     }
//! }
//!
//! let store = DocumentStore::new(backend);
//! let id = store.repository::<Testimonial>().create(testimonial).await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as estate_cms_core;

pub mod backend;
pub mod clock;
pub mod document;
pub mod error;
pub mod id;
pub mod page;
pub mod query;
pub mod repository;
pub mod store;
