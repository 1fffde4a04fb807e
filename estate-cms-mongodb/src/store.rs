//! MongoDB storage implementation.

use async_trait::async_trait;
use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{Client, Collection as MongoCollection, error::Error as MongoError, options::ClientOptions};
use tracing::{debug, info, warn};

use estate_cms_core::{
    backend::{StoreBackend, StoreBackendBuilder, UpdateOutcome},
    document::NATIVE_ID_FIELD,
    error::{RepositoryError, RepositoryResult},
    id::DocumentId,
    query::{Expr, Query},
};

use crate::query::MongoQueryTranslator;

/// Application name reported to the server in the connection handshake.
const APP_NAME: &str = "estate-cms";

/// MongoDB-backed document store.
///
/// Wraps one driver [`Client`] (a connection pool) and the name of the database
/// holding the collections. Every method is a single driver call; failures are
/// reported as [`RepositoryError::Unavailable`] and never retried here.
#[derive(Debug, Clone)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: impl Into<String>) -> Self {
        Self { client, database: database.into() }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    /// Name of the database this store reads and writes.
    pub fn database(&self) -> &str {
        &self.database
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }
}

fn unavailable(err: MongoError) -> RepositoryError {
    warn!(error = %err, "mongodb operation failed");
    RepositoryError::Unavailable(err.to_string())
}

fn by_id(id: DocumentId) -> Document {
    doc! { NATIVE_ID_FIELD: id.to_native() }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn insert_document(&self, collection: &str, document: Document) -> RepositoryResult<()> {
        self.get_collection(collection)
            .insert_one(document)
            .await
            .map_err(unavailable)?;

        Ok(())
    }

    async fn find_document(&self, collection: &str, id: DocumentId) -> RepositoryResult<Option<Document>> {
        self.get_collection(collection)
            .find_one(by_id(id))
            .await
            .map_err(unavailable)
    }

    async fn find_documents(&self, collection: &str, query: &Query) -> RepositoryResult<Vec<Document>> {
        let collection = self.get_collection(collection);
        let mut find = collection.find(MongoQueryTranslator::filter(query.filter.as_ref())?);

        if !query.sort.is_empty() {
            find = find.sort(MongoQueryTranslator::sort(&query.sort));
        }
        if let Some(skip) = query.offset {
            find = find.skip(skip as u64);
        }
        // Zero means no limit, as the driver reads it
        if let Some(limit) = query.limit.filter(|&limit| limit > 0) {
            find = find.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        find.await
            .map_err(unavailable)?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(unavailable)
    }

    async fn find_first(&self, collection: &str, filter: Option<&Expr>) -> RepositoryResult<Option<Document>> {
        self.get_collection(collection)
            .find_one(MongoQueryTranslator::filter(filter)?)
            .await
            .map_err(unavailable)
    }

    async fn update_document(
        &self,
        collection: &str,
        id: DocumentId,
        changes: Document,
    ) -> RepositoryResult<UpdateOutcome> {
        let result = self
            .get_collection(collection)
            .update_one(by_id(id), doc! { "$set": changes })
            .await
            .map_err(unavailable)?;

        Ok(UpdateOutcome {
            matched: result.matched_count > 0,
            modified: result.modified_count > 0,
        })
    }

    async fn delete_document(&self, collection: &str, id: DocumentId) -> RepositoryResult<bool> {
        let result = self
            .get_collection(collection)
            .delete_one(by_id(id))
            .await
            .map_err(unavailable)?;

        Ok(result.deleted_count > 0)
    }

    async fn count_documents(&self, collection: &str, filter: Option<&Expr>) -> RepositoryResult<u64> {
        self.get_collection(collection)
            .count_documents(MongoQueryTranslator::filter(filter)?)
            .await
            .map_err(unavailable)
    }

    async fn shutdown(&self) -> RepositoryResult<()> {
        debug!(database = %self.database, "shutting down mongodb client");
        self.client.clone().shutdown().await;

        Ok(())
    }
}

/// Builder for [`MongoDbStore`], parsing the connection string and creating the client.
///
/// Connecting is lazy: the driver opens connections on first use, so `build`
/// only fails for a malformed connection string or unusable options.
pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> RepositoryResult<Self::Backend> {
        let mut options = ClientOptions::parse(&self.dsn)
            .await
            .map_err(|e| RepositoryError::Initialization(e.to_string()))?;
        options.app_name = Some(APP_NAME.to_string());

        let client = Client::with_options(options)
            .map_err(|e| RepositoryError::Initialization(e.to_string()))?;

        info!(database = %self.database, "mongodb client created");
        Ok(MongoDbStore::new(client, self.database))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_cms_core::query::{Filter, SortDirection};

    // Nothing listens on port 1, so every operation fails server selection quickly.
    const UNREACHABLE: &str = "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200";

    async fn unreachable_store() -> MongoDbStore {
        MongoDbStore::builder(UNREACHABLE, "kmk_homes").build().await.unwrap()
    }

    #[tokio::test]
    async fn malformed_connection_string_fails_initialization() {
        let result = MongoDbStore::builder("not-a-connection-string", "kmk_homes")
            .build()
            .await;

        assert!(matches!(result, Err(RepositoryError::Initialization(_))));
    }

    #[tokio::test]
    async fn builder_connects_lazily() {
        let store = unreachable_store().await;

        assert_eq!(store.database(), "kmk_homes");
    }

    #[tokio::test]
    async fn sorted_window_query_reports_unreachable_server() {
        let store = unreachable_store().await;
        let query = Query::builder()
            .filter(Filter::eq("active", true))
            .sort("display_order", SortDirection::Asc)
            .offset(2)
            .limit(5)
            .build();

        let result = store.find_documents("home_banners", &query).await;

        assert!(matches!(result, Err(RepositoryError::Unavailable(_))));
    }

    #[tokio::test]
    async fn zero_limit_still_queries_the_server() {
        let store = unreachable_store().await;
        let query = Query::builder().limit(0).build();

        let result = store.find_documents("home_banners", &query).await;

        assert!(matches!(result, Err(RepositoryError::Unavailable(_))));
    }
}
