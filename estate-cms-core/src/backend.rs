//! Storage backend abstraction for the repository layer.
//!
//! The [`StoreBackend`] trait is the seam between the collection-agnostic
//! [`Repository`](crate::repository::Repository) and a concrete store. Every method is
//! a single round-trip on a single collection; backends never retry, and any failure
//! to reach the store is reported as
//! [`RepositoryError::Unavailable`](crate::error::RepositoryError::Unavailable).
//!
//! Documents cross this boundary as raw BSON maps. Stored documents keep their
//! identifier as a native ObjectId under `_id`; the repository does the
//! normalization to and from typed records.
//!
//! # Traits
//!
//! - [`StoreBackend`]: the core trait for storage backends
//! - [`StoreBackendBuilder`]: factory trait for creating backend instances

use async_trait::async_trait;
use bson::Document as BsonDocument;
use std::{fmt::Debug, sync::Arc};

use crate::{
    error::RepositoryResult,
    id::DocumentId,
    query::{Expr, Query},
};

/// Result of a single-document update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// A document with the requested identifier existed.
    pub matched: bool,
    /// At least one field value actually changed.
    pub modified: bool,
}

/// Abstract interface for document storage backends.
///
/// Implementations must be safe to share across tasks: one backend (one
/// connection pool) serves every repository in the process. No method may hold
/// state across calls beyond what the store itself persists.
///
/// # Atomicity
///
/// Each method touches at most one document (or reads a consistent snapshot for
/// queries and counts) and must be atomic for that document. Nothing spans
/// documents.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts a new document. `document` already carries its `_id` and timestamps.
    ///
    /// Collections are created on first insert.
    async fn insert_document(
        &self,
        collection: &str,
        document: BsonDocument,
    ) -> RepositoryResult<()>;

    /// Fetches the document with the given identifier, if any.
    async fn find_document(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> RepositoryResult<Option<BsonDocument>>;

    /// Returns every document matching the query, sorted and windowed.
    ///
    /// A query without sort keys returns documents in the store's native order.
    async fn find_documents(
        &self,
        collection: &str,
        query: &Query,
    ) -> RepositoryResult<Vec<BsonDocument>>;

    /// Returns an arbitrary document matching `filter` (any document if `None`).
    async fn find_first(
        &self,
        collection: &str,
        filter: Option<&Expr>,
    ) -> RepositoryResult<Option<BsonDocument>>;

    /// Merges `changes` into the document with the given identifier.
    ///
    /// Fields absent from `changes` are left as they are. Never inserts.
    async fn update_document(
        &self,
        collection: &str,
        id: DocumentId,
        changes: BsonDocument,
    ) -> RepositoryResult<UpdateOutcome>;

    /// Removes the document with the given identifier, returning whether it existed.
    async fn delete_document(&self, collection: &str, id: DocumentId) -> RepositoryResult<bool>;

    /// Counts the documents matching `filter` (all documents if `None`).
    async fn count_documents(
        &self,
        collection: &str,
        filter: Option<&Expr>,
    ) -> RepositoryResult<u64>;

    /// Releases connections and other resources.
    ///
    /// The default implementation is a no-op.
    async fn shutdown(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

#[async_trait]
impl<B> StoreBackend for Box<B>
where
    B: StoreBackend + ?Sized,
{
    async fn insert_document(
        &self,
        collection: &str,
        document: BsonDocument,
    ) -> RepositoryResult<()> {
        (**self)
            .insert_document(collection, document)
            .await
    }

    async fn find_document(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> RepositoryResult<Option<BsonDocument>> {
        (**self).find_document(collection, id).await
    }

    async fn find_documents(
        &self,
        collection: &str,
        query: &Query,
    ) -> RepositoryResult<Vec<BsonDocument>> {
        (**self).find_documents(collection, query).await
    }

    async fn find_first(
        &self,
        collection: &str,
        filter: Option<&Expr>,
    ) -> RepositoryResult<Option<BsonDocument>> {
        (**self).find_first(collection, filter).await
    }

    async fn update_document(
        &self,
        collection: &str,
        id: DocumentId,
        changes: BsonDocument,
    ) -> RepositoryResult<UpdateOutcome> {
        (**self)
            .update_document(collection, id, changes)
            .await
    }

    async fn delete_document(&self, collection: &str, id: DocumentId) -> RepositoryResult<bool> {
        (**self).delete_document(collection, id).await
    }

    async fn count_documents(
        &self,
        collection: &str,
        filter: Option<&Expr>,
    ) -> RepositoryResult<u64> {
        (**self).count_documents(collection, filter).await
    }

    async fn shutdown(&self) -> RepositoryResult<()> {
        (**self).shutdown().await
    }
}

#[async_trait]
impl<B> StoreBackend for Arc<B>
where
    B: StoreBackend + ?Sized,
{
    async fn insert_document(
        &self,
        collection: &str,
        document: BsonDocument,
    ) -> RepositoryResult<()> {
        (**self)
            .insert_document(collection, document)
            .await
    }

    async fn find_document(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> RepositoryResult<Option<BsonDocument>> {
        (**self).find_document(collection, id).await
    }

    async fn find_documents(
        &self,
        collection: &str,
        query: &Query,
    ) -> RepositoryResult<Vec<BsonDocument>> {
        (**self).find_documents(collection, query).await
    }

    async fn find_first(
        &self,
        collection: &str,
        filter: Option<&Expr>,
    ) -> RepositoryResult<Option<BsonDocument>> {
        (**self).find_first(collection, filter).await
    }

    async fn update_document(
        &self,
        collection: &str,
        id: DocumentId,
        changes: BsonDocument,
    ) -> RepositoryResult<UpdateOutcome> {
        (**self)
            .update_document(collection, id, changes)
            .await
    }

    async fn delete_document(&self, collection: &str, id: DocumentId) -> RepositoryResult<bool> {
        (**self).delete_document(collection, id).await
    }

    async fn count_documents(
        &self,
        collection: &str,
        filter: Option<&Expr>,
    ) -> RepositoryResult<u64> {
        (**self).count_documents(collection, filter).await
    }

    async fn shutdown(&self) -> RepositoryResult<()> {
        (**self).shutdown().await
    }
}

/// Factory for backends that need asynchronous setup (e.g. connecting a client).
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> RepositoryResult<Self::Backend>;
}
