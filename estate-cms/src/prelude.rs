//! Convenient re-exports of commonly used types from estate-cms.
//!
//! ```ignore
//! use estate_cms::prelude::*;
//! ```

pub use estate_cms_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::{Document, Patch, Stored},
    error::{RepositoryError, RepositoryResult},
    id::DocumentId,
    page::{Page, PaginationParams},
    query::{Expr, FieldOp, Filter, Query, QueryBuilder, Sort, SortDirection},
    repository::Repository,
    store::{DocumentStore, DynDocumentStore},
};

pub use crate::listing;
pub use estate_cms_macros::Document;
