//! Per-collection document counts, logged by the binary at start-up.

use tracing::info;

use estate_cms_core::{backend::StoreBackend, error::RepositoryResult, store::DocumentStore};

use crate::models::COLLECTIONS;

/// Counts the documents of every CMS collection, in [`COLLECTIONS`] order.
pub async fn collection_counts<B: StoreBackend>(
    store: &DocumentStore<B>,
) -> RepositoryResult<Vec<(&'static str, u64)>> {
    let mut counts = Vec::with_capacity(COLLECTIONS.len());

    for collection in COLLECTIONS {
        let count = store
            .backend()
            .count_documents(collection, None)
            .await?;

        info!(collection, count, "collection ready");
        counts.push((collection, count));
    }

    Ok(counts)
}
