use serde::{Deserialize, Serialize};

use estate_cms::{document::Document, memory::InMemoryStore, store::DocumentStore};

#[derive(Debug, Clone, Serialize, Deserialize, estate_cms::Document)]
#[document(collection = "brochures")]
struct Brochure {
    title: String,
    pdf_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, estate_cms::Document)]
#[document(collection = "floor_plans", crate = "estate_cms_core")]
struct FloorPlan {
    villa_type: String,
}

#[test]
fn derive_through_facade_names_the_collection() {
    assert_eq!(Brochure::collection_name(), "brochures");
    assert_eq!(FloorPlan::collection_name(), "floor_plans");
}

#[tokio::test]
async fn derived_record_is_stored_in_its_collection() {
    let store = DocumentStore::new(InMemoryStore::new());
    let brochures = store.repository::<Brochure>();

    brochures
        .create(Brochure {
            title: "Phase II".to_string(),
            pdf_url: "https://cdn.example.com/phase-2.pdf".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(brochures.count_documents(None).await.unwrap(), 1);
    assert_eq!(store.repository::<FloorPlan>().count_documents(None).await.unwrap(), 0);
}
