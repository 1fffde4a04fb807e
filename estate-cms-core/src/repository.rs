//! The generic document repository.
//!
//! A [`Repository`] is the CRUD façade over one collection. It is parameterized
//! over the record type (which fixes the collection name and the field schema) and
//! borrows the process-wide backend from the [`DocumentStore`](crate::store::DocumentStore)
//! that handed it out, so creating one is free.
//!
//! Identifier-based operations take the textual identifier exactly as it arrives
//! from a URL. A malformed identifier is an ordinary input: it behaves like an
//! identifier that matches nothing.
//!
//! # Example
//!
//! ```ignore
//! let banners = store.repository::<HomeBanner>();
//!
//! let id = banners.create(banner).await?;
//! banners.update_by_id(&id.to_string(), Patch::new().set("title", "Changed")).await?;
//!
//! let listing = banners
//!     .get_all(
//!         Query::builder()
//!             .filter(Filter::eq("active", true))
//!             .sort("display_order", SortDirection::Asc)
//!             .build(),
//!     )
//!     .await?;
//! ```

use bson::{Bson, Document as BsonDocument};
use std::{fmt, marker::PhantomData};
use tracing::{debug, instrument, trace};

use crate::{
    backend::StoreBackend,
    clock::Clock,
    document::{
        CREATED_AT_FIELD, Document, NATIVE_ID_FIELD, Patch, Stored, UPDATED_AT_FIELD,
        record_fields,
    },
    error::RepositoryResult,
    id::DocumentId,
    page::{Page, PaginationParams},
    query::{Expr, Query, Sort},
};

/// CRUD operations over the collection holding records of type `D`.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the borrowed store
/// * `B` - The storage backend type
/// * `D` - The record type
pub struct Repository<'a, B: StoreBackend, D: Document> {
    name: String,
    backend: &'a B,
    clock: &'a dyn Clock,
    _marker: PhantomData<D>,
}

impl<'a, B: StoreBackend, D: Document> Repository<'a, B, D> {
    pub(crate) fn new(name: String, backend: &'a B, clock: &'a dyn Clock) -> Self {
        Self { name, backend, clock, _marker: PhantomData }
    }

    /// Returns the name of the collection this repository is bound to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts `record` as a new document and returns its identifier.
    ///
    /// `created_at` and `updated_at` are both set to the same instant. Inserting
    /// identical content twice yields two documents with distinct identifiers.
    ///
    /// # Errors
    ///
    /// Fails if the store is unavailable or `record` does not serialize to a map.
    #[instrument(level = "debug", skip_all, fields(collection = %self.name))]
    pub async fn create(&self, record: D) -> RepositoryResult<DocumentId> {
        let id = DocumentId::new();
        let now = Bson::DateTime(self.clock.now());
        let document = BsonDocument::from_iter(
            [(NATIVE_ID_FIELD.to_string(), Bson::from(id))]
                .into_iter()
                .chain(record_fields(&record)?)
                .chain([
                    (CREATED_AT_FIELD.to_string(), now.clone()),
                    (UPDATED_AT_FIELD.to_string(), now),
                ]),
        );

        self.backend
            .insert_document(&self.name, document)
            .await?;

        debug!(%id, "document created");
        Ok(id)
    }

    /// Looks a document up by its textual identifier.
    ///
    /// Returns `None` both when `id` is malformed and when no document has it.
    #[instrument(level = "debug", skip(self), fields(collection = %self.name))]
    pub async fn get_by_id(&self, id: &str) -> RepositoryResult<Option<Stored<D>>> {
        let Some(id) = self.parse_id(id) else {
            return Ok(None);
        };

        self.backend
            .find_document(&self.name, id)
            .await?
            .map(Stored::from_raw)
            .transpose()
    }

    /// Returns every document matching `query`, fully materialized.
    ///
    /// See [`Query`] for filter, sort and offset/limit semantics.
    #[instrument(level = "debug", skip_all, fields(collection = %self.name))]
    pub async fn get_all(&self, query: Query) -> RepositoryResult<Vec<Stored<D>>> {
        let documents = self
            .backend
            .find_documents(&self.name, &query)
            .await?;

        trace!(count = documents.len(), "documents fetched");
        documents
            .into_iter()
            .map(Stored::from_raw)
            .collect()
    }

    /// Merges `patch` into the document identified by `id` and stamps `updated_at`.
    ///
    /// Returns `true` if the document exists, including when the patch leaves
    /// every field value as it was. Returns `false` for a malformed or unknown
    /// identifier; never creates a document.
    #[instrument(level = "debug", skip(self, patch), fields(collection = %self.name))]
    pub async fn update_by_id(&self, id: &str, patch: Patch) -> RepositoryResult<bool> {
        let Some(id) = self.parse_id(id) else {
            return Ok(false);
        };

        let outcome = self
            .backend
            .update_document(&self.name, id, patch.into_changes(self.clock.now()))
            .await?;

        debug!(%id, matched = outcome.matched, modified = outcome.modified, "update applied");
        Ok(outcome.matched)
    }

    /// Removes the document identified by `id`.
    ///
    /// Returns `true` iff a document existed and was removed.
    #[instrument(level = "debug", skip(self), fields(collection = %self.name))]
    pub async fn delete_by_id(&self, id: &str) -> RepositoryResult<bool> {
        let Some(id) = self.parse_id(id) else {
            return Ok(false);
        };

        let deleted = self
            .backend
            .delete_document(&self.name, id)
            .await?;

        debug!(%id, deleted, "delete applied");
        Ok(deleted)
    }

    /// Counts the documents matching `filter` (all of them if `None`).
    #[instrument(level = "debug", skip_all, fields(collection = %self.name))]
    pub async fn count_documents(&self, filter: Option<Expr>) -> RepositoryResult<u64> {
        self.backend
            .count_documents(&self.name, filter.as_ref())
            .await
    }

    /// Returns one document matching `filter`, with no guarantee which one if
    /// several match.
    #[instrument(level = "debug", skip_all, fields(collection = %self.name))]
    pub async fn get_one(&self, filter: Option<Expr>) -> RepositoryResult<Option<Stored<D>>> {
        self.backend
            .find_first(&self.name, filter.as_ref())
            .await?
            .map(Stored::from_raw)
            .transpose()
    }

    /// Returns one page of the documents matching `filter`, in `sort` order.
    ///
    /// Costs one count and one windowed query; the two are not a snapshot, so a
    /// concurrent insert may shift the window.
    #[instrument(level = "debug", skip_all, fields(collection = %self.name, page = params.page()))]
    pub async fn page(
        &self,
        filter: Option<Expr>,
        sort: Vec<Sort>,
        params: &PaginationParams,
    ) -> RepositoryResult<Page<Stored<D>>> {
        let count = self.count_documents(filter.clone()).await?;
        let items = self
            .get_all(Query {
                filter,
                sort,
                offset: Some(params.offset()),
                limit: Some(params.limit()),
            })
            .await?;

        Ok(Page::from_window(items, count, params))
    }

    fn parse_id(&self, id: &str) -> Option<DocumentId> {
        match DocumentId::parse(id) {
            Ok(id) => Some(id),
            Err(err) => {
                debug!(%err, "treating malformed id as absent");
                None
            }
        }
    }
}

impl<B: StoreBackend, D: Document> Clone for Repository<'_, B, D> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            backend: self.backend,
            clock: self.clock,
            _marker: PhantomData,
        }
    }
}

impl<B: StoreBackend, D: Document> fmt::Debug for Repository<'_, B, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("name", &self.name)
            .field("backend", &self.backend)
            .finish()
    }
}
