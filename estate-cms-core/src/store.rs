//! The process-wide document store handle.
//!
//! A [`DocumentStore`] owns the one backend (connection pool) the process uses,
//! together with the clock that stamps documents. It is built once at start-up,
//! passed explicitly to whatever needs repositories, and released with
//! [`DocumentStore::shutdown`].
//!
//! # Example
//!
//! ```ignore
//! use estate_cms_core::store::DocumentStore;
//!
//! let store = DocumentStore::new(backend);
//! let properties = store.repository::<Property>();
//! // ...
//! store.shutdown().await?;
//! ```

use std::sync::Arc;

use crate::{
    backend::StoreBackend,
    clock::{Clock, SystemClock},
    document::Document,
    error::RepositoryResult,
    repository::Repository,
};

/// A document store bound to a specific backend implementation.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
#[derive(Debug)]
pub struct DocumentStore<B: StoreBackend> {
    backend: B,
    clock: Arc<dyn Clock>,
}

/// A document store whose backend is chosen at runtime.
pub type DynDocumentStore = DocumentStore<Box<dyn StoreBackend>>;

impl<B: StoreBackend> DocumentStore<B> {
    /// Creates a new document store with the given backend and the system clock.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            clock: Arc::new(SystemClock::new()),
        }
    }

    /// Replaces the clock used to stamp `created_at` / `updated_at`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Gets the repository for record type `D`, bound to `D::collection_name()`.
    pub fn repository<D: Document>(&self) -> Repository<'_, B, D> {
        self.repository_named(D::collection_name())
    }

    /// Gets a repository for record type `D` bound to an explicit collection name.
    pub fn repository_named<D: Document>(&self, name: &str) -> Repository<'_, B, D> {
        Repository::new(name.to_string(), &self.backend, self.clock.as_ref())
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Boxes the backend so stores over different backends share one type.
    pub fn into_dyn(self) -> DynDocumentStore
    where
        B: 'static,
    {
        DocumentStore {
            backend: Box::new(self.backend),
            clock: self.clock,
        }
    }

    /// Shuts down the store and releases backend resources.
    ///
    /// Consumes the store, so no repository can outlive it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to shut down cleanly.
    pub async fn shutdown(self) -> RepositoryResult<()> {
        self.backend.shutdown().await
    }
}
