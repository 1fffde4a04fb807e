//! In-memory storage implementation for document stores.
//!
//! Documents are kept as BSON maps per collection, in insertion order, behind an
//! async-safe read-write lock.

use async_trait::async_trait;
use bson::{Bson, Document as BsonDocument, oid::ObjectId};
use mea::rwlock::RwLock;
use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};
use tracing::trace;

use estate_cms_core::{
    backend::{StoreBackend, StoreBackendBuilder, UpdateOutcome},
    document::NATIVE_ID_FIELD,
    error::{RepositoryError, RepositoryResult},
    id::DocumentId,
    query::{Expr, Query},
};

use crate::evaluator::{DocumentEvaluator, compare_documents};

/// One collection: documents keyed by insertion sequence, plus an id index.
#[derive(Debug, Default)]
struct Collection {
    next_seq: u64,
    documents: BTreeMap<u64, BsonDocument>,
    index: HashMap<ObjectId, u64>,
}

impl Collection {
    fn get(&self, id: &ObjectId) -> Option<&BsonDocument> {
        self.index
            .get(id)
            .and_then(|seq| self.documents.get(seq))
    }

    fn get_mut(&mut self, id: &ObjectId) -> Option<&mut BsonDocument> {
        self.index
            .get(id)
            .and_then(|seq| self.documents.get_mut(seq))
    }

    fn matching<'a>(&'a self, filter: Option<&'a Expr>) -> impl Iterator<Item = &'a BsonDocument> {
        self.documents
            .values()
            .filter(move |document| DocumentEvaluator::matches(document, filter))
    }
}

type StoreMap = HashMap<String, Collection>;

/// Thread-safe in-memory document storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, so clones
/// share the same data. Queries scan the whole collection; there are no indexes
/// besides the one on `_id`.
///
/// # Example
///
/// ```ignore
/// use estate_cms_memory::InMemoryStore;
/// use estate_cms_core::store::DocumentStore;
///
/// let store = DocumentStore::new(InMemoryStore::new());
/// let count = store.repository::<Plot>().count_documents(None).await?;
/// assert_eq!(count, 0);
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection_name -> documents
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder
    }
}

fn native_id(document: &BsonDocument) -> RepositoryResult<ObjectId> {
    match document.get(NATIVE_ID_FIELD) {
        Some(Bson::ObjectId(id)) => Ok(*id),
        Some(other) => Err(RepositoryError::InvalidDocument(format!(
            "expected an ObjectId under `{NATIVE_ID_FIELD}`, found {other}"
        ))),
        None => Err(RepositoryError::InvalidDocument(format!(
            "document has no `{NATIVE_ID_FIELD}`"
        ))),
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn insert_document(&self, collection: &str, document: BsonDocument) -> RepositoryResult<()> {
        let id = native_id(&document)?;
        let mut store = self.store.write().await;
        let collection_map = store
            .entry(collection.to_string())
            .or_default();

        if collection_map.index.contains_key(&id) {
            return Err(RepositoryError::InvalidDocument(format!(
                "duplicate {NATIVE_ID_FIELD} {id} in collection {collection}"
            )));
        }

        let seq = collection_map.next_seq;
        collection_map.next_seq += 1;
        collection_map.index.insert(id, seq);
        collection_map.documents.insert(seq, document);

        trace!(collection, %id, "document inserted");
        Ok(())
    }

    async fn find_document(&self, collection: &str, id: DocumentId) -> RepositoryResult<Option<BsonDocument>> {
        let store = self.store.read().await;

        Ok(store
            .get(collection)
            .and_then(|col| col.get(&id.to_native()))
            .cloned())
    }

    async fn find_documents(&self, collection: &str, query: &Query) -> RepositoryResult<Vec<BsonDocument>> {
        let store = self.store.read().await;
        let Some(collection_map) = store.get(collection) else {
            return Ok(vec![]);
        };

        let mut documents = collection_map
            .matching(query.filter.as_ref())
            .collect::<Vec<_>>();

        // Stable, so ties keep insertion order
        if !query.sort.is_empty() {
            documents.sort_by(|a, b| compare_documents(a, b, &query.sort));
        }

        Ok(documents
            .into_iter()
            .skip(query.offset.unwrap_or(0))
            .take(query.limit.filter(|&limit| limit > 0).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn find_first(&self, collection: &str, filter: Option<&Expr>) -> RepositoryResult<Option<BsonDocument>> {
        let store = self.store.read().await;

        Ok(store
            .get(collection)
            .and_then(|col| col.matching(filter).next())
            .cloned())
    }

    async fn update_document(
        &self,
        collection: &str,
        id: DocumentId,
        changes: BsonDocument,
    ) -> RepositoryResult<UpdateOutcome> {
        let mut store = self.store.write().await;
        let Some(document) = store
            .get_mut(collection)
            .and_then(|col| col.get_mut(&id.to_native()))
        else {
            return Ok(UpdateOutcome::default());
        };

        let mut modified = false;
        for (field, value) in changes {
            if document.get(&field) != Some(&value) {
                document.insert(field, value);
                modified = true;
            }
        }

        Ok(UpdateOutcome { matched: true, modified })
    }

    async fn delete_document(&self, collection: &str, id: DocumentId) -> RepositoryResult<bool> {
        let mut store = self.store.write().await;
        let Some(collection_map) = store.get_mut(collection) else {
            return Ok(false);
        };

        match collection_map.index.remove(&id.to_native()) {
            Some(seq) => Ok(collection_map.documents.remove(&seq).is_some()),
            None => Ok(false),
        }
    }

    async fn count_documents(&self, collection: &str, filter: Option<&Expr>) -> RepositoryResult<u64> {
        let store = self.store.read().await;

        Ok(store
            .get(collection)
            .map_or(0, |col| col.matching(filter).count() as u64))
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
///
/// # Example
///
/// ```ignore
/// use estate_cms_memory::InMemoryStore;
/// use estate_cms_core::backend::StoreBackendBuilder;
///
/// let store = InMemoryStore::builder().build().await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Always succeeds with a fresh, empty store.
    async fn build(self) -> RepositoryResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use estate_cms_core::query::{Filter, Sort};

    fn document(id: DocumentId, title: &str, order: i32) -> BsonDocument {
        doc! { "_id": id.to_native(), "title": title, "display_order": order, "active": true }
    }

    async fn seeded() -> (InMemoryStore, Vec<DocumentId>) {
        let store = InMemoryStore::new();
        let ids = vec![DocumentId::new(), DocumentId::new(), DocumentId::new()];

        for (id, (title, order)) in ids.iter().zip([("B", 2), ("A", 1), ("C", 3)]) {
            store
                .insert_document("home_banners", document(*id, title, order))
                .await
                .unwrap();
        }

        (store, ids)
    }

    fn titles(documents: &[BsonDocument]) -> Vec<&str> {
        documents
            .iter()
            .map(|document| document.get_str("title").unwrap())
            .collect()
    }

    #[tokio::test]
    async fn unsorted_listing_keeps_insertion_order() {
        let (store, _) = seeded().await;

        let documents = store
            .find_documents("home_banners", &Query::new())
            .await
            .unwrap();

        assert_eq!(titles(&documents), vec!["B", "A", "C"]);
    }

    #[tokio::test]
    async fn sorted_window_applies_offset_before_limit() {
        let (store, _) = seeded().await;
        let query = Query {
            sort: vec![Sort::asc("display_order")],
            offset: Some(1),
            limit: Some(1),
            ..Query::default()
        };

        let documents = store
            .find_documents("home_banners", &query)
            .await
            .unwrap();

        assert_eq!(titles(&documents), vec!["B"]);
    }

    #[tokio::test]
    async fn zero_limit_means_no_limit() {
        let (store, _) = seeded().await;
        let query = Query {
            sort: vec![Sort::asc("display_order")],
            offset: Some(1),
            limit: Some(0),
            ..Query::default()
        };

        let documents = store
            .find_documents("home_banners", &query)
            .await
            .unwrap();

        assert_eq!(titles(&documents), vec!["B", "C"]);
    }

    #[tokio::test]
    async fn unknown_collection_reads_as_empty() {
        let store = InMemoryStore::new();

        assert!(store.find_documents("plots", &Query::new()).await.unwrap().is_empty());
        assert_eq!(store.count_documents("plots", None).await.unwrap(), 0);
        assert!(store.find_first("plots", None).await.unwrap().is_none());
        assert!(!store.delete_document("plots", DocumentId::new()).await.unwrap());
    }

    #[tokio::test]
    async fn update_reports_matched_and_modified_separately() {
        let (store, ids) = seeded().await;

        let changed = store
            .update_document("home_banners", ids[0], doc! { "title": "Changed" })
            .await
            .unwrap();
        assert_eq!(changed, UpdateOutcome { matched: true, modified: true });

        let same = store
            .update_document("home_banners", ids[0], doc! { "title": "Changed" })
            .await
            .unwrap();
        assert_eq!(same, UpdateOutcome { matched: true, modified: false });

        let missing = store
            .update_document("home_banners", DocumentId::new(), doc! { "title": "X" })
            .await
            .unwrap();
        assert_eq!(missing, UpdateOutcome::default());

        let document = store
            .find_document("home_banners", ids[0])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(document.get_str("title").unwrap(), "Changed");
        assert_eq!(document.get_i32("display_order").unwrap(), 2);
    }

    #[tokio::test]
    async fn delete_removes_exactly_once() {
        let (store, ids) = seeded().await;

        assert!(store.delete_document("home_banners", ids[1]).await.unwrap());
        assert!(!store.delete_document("home_banners", ids[1]).await.unwrap());
        assert!(store.find_document("home_banners", ids[1]).await.unwrap().is_none());
        assert_eq!(store.count_documents("home_banners", None).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn count_and_find_first_honor_the_filter() {
        let (store, ids) = seeded().await;
        store
            .update_document("home_banners", ids[2], doc! { "active": false })
            .await
            .unwrap();

        let active = Filter::eq("active", true);
        assert_eq!(store.count_documents("home_banners", Some(&active)).await.unwrap(), 2);

        let inactive = store
            .find_first("home_banners", Some(&Filter::eq("active", false)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(inactive.get_str("title").unwrap(), "C");
    }

    #[tokio::test]
    async fn insert_rejects_documents_without_object_id() {
        let store = InMemoryStore::new();

        let result = store
            .insert_document("plots", doc! { "_id": "not-an-oid", "title": "X" })
            .await;

        assert!(matches!(result, Err(RepositoryError::InvalidDocument(_))));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryStore::builder().build().await.unwrap();
        let clone = store.clone();
        let id = DocumentId::new();

        clone
            .insert_document("plots", document(id, "Plot 7", 0))
            .await
            .unwrap();

        assert!(store.find_document("plots", id).await.unwrap().is_some());
    }
}
