//! Record traits, stored-document envelopes and partial updates.
//!
//! A record type (a `Property`, a `Testimonial`, ...) carries only its own fields.
//! The repository adds the three fields every stored document has: the identifier,
//! `created_at` and `updated_at`. [`Stored`] is a record together with those fields,
//! and [`Patch`] is a partial set of field assignments for an update.

use bson::{Bson, DateTime, Document as BsonDocument, deserialize_from_document, serialize_to_document};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    error::{RepositoryError, RepositoryResult},
    id::DocumentId,
};

/// Key the store uses for the native identifier.
pub const NATIVE_ID_FIELD: &str = "_id";
/// Key the identifier is exposed under once normalized to a string.
pub const ID_FIELD: &str = "id";
/// Creation timestamp, written once.
pub const CREATED_AT_FIELD: &str = "created_at";
/// Last-modification timestamp, rewritten by every update.
pub const UPDATED_AT_FIELD: &str = "updated_at";

const RESERVED_FIELDS: [&str; 4] = [NATIVE_ID_FIELD, ID_FIELD, CREATED_AT_FIELD, UPDATED_AT_FIELD];

/// Core trait that every record type stored through a repository must implement.
///
/// Usually derived:
///
/// ```ignore
/// use estate_cms::prelude::*;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize, Document)]
/// #[document(collection = "home_banners")]
/// pub struct HomeBanner {
///     pub title: String,
///     pub image_url: String,
///     #[serde(default)]
///     pub display_order: i32,
/// }
/// ```
pub trait Document: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// Returns the name of the collection records of this type live in.
    fn collection_name() -> &'static str;
}

/// A record as it exists in the store: the record's own fields plus the
/// identifier and the two timestamps.
///
/// Serializes flat, with `id` as a hex string and the timestamps as RFC 3339:
///
/// ```json
/// { "id": "65a1...", "created_at": "2024-01-12T09:30:00.000Z", "updated_at": ..., "title": "A", ... }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stored<D> {
    /// Identifier assigned at creation.
    pub id: DocumentId,
    /// Creation instant.
    #[serde(serialize_with = "rfc3339")]
    pub created_at: DateTime,
    /// Instant of the last successful update, or of creation.
    #[serde(serialize_with = "rfc3339")]
    pub updated_at: DateTime,
    /// The record itself.
    #[serde(flatten)]
    pub data: D,
}

impl<D: Document> Stored<D> {
    /// Builds a stored record from a raw document as returned by a backend.
    ///
    /// The native `_id` is lifted into [`Stored::id`]; the timestamps are lifted
    /// out and whatever remains is deserialized into `D`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidDocument`] if the identifier or a timestamp is
    /// missing or has the wrong type, or a serialization error if the remaining fields
    /// do not fit `D`.
    pub fn from_raw(mut raw: BsonDocument) -> RepositoryResult<Self> {
        let id = match raw.remove(NATIVE_ID_FIELD) {
            Some(Bson::ObjectId(oid)) => DocumentId::from(oid),
            Some(Bson::String(s)) => DocumentId::parse(&s)
                .map_err(|e| RepositoryError::InvalidDocument(e.to_string()))?,
            other => {
                return Err(RepositoryError::InvalidDocument(format!(
                    "expected an object id under {NATIVE_ID_FIELD}, found {other:?}"
                )));
            }
        };
        let created_at = take_timestamp(&mut raw, CREATED_AT_FIELD)?;
        let updated_at = take_timestamp(&mut raw, UPDATED_AT_FIELD)?;
        raw.remove(ID_FIELD);

        Ok(Self {
            id,
            created_at,
            updated_at,
            data: deserialize_from_document(raw)?,
        })
    }

    /// Converts this stored record to a JSON value, `id` included.
    pub fn to_json(&self) -> RepositoryResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

fn rfc3339<S: Serializer>(instant: &DateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&instant.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn take_timestamp(raw: &mut BsonDocument, field: &str) -> RepositoryResult<DateTime> {
    match raw.remove(field) {
        Some(Bson::DateTime(dt)) => Ok(dt),
        other => Err(RepositoryError::InvalidDocument(format!(
            "expected a timestamp under {field}, found {other:?}"
        ))),
    }
}

/// Serializes a record into the field map that will be stored, without any of the
/// fields the repository owns.
pub(crate) fn record_fields<D: Document>(record: &D) -> RepositoryResult<BsonDocument> {
    let mut fields = serialize_to_document(record)?;
    for reserved in RESERVED_FIELDS {
        fields.remove(reserved);
    }

    Ok(fields)
}

/// A partial update: field assignments merged into an existing document.
///
/// Fields not named by the patch are left untouched. The identifier and
/// `created_at` can never be assigned; `updated_at` is always stamped by the
/// repository, so assigning it here has no effect.
///
/// # Example
///
/// ```ignore
/// use estate_cms_core::document::Patch;
///
/// let patch = Patch::new()
///     .set("title", "Changed")
///     .set("display_order", 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    fields: BsonDocument,
}

impl Patch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `value` to `field`. Reserved fields are ignored.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        let field = field.into();
        if !RESERVED_FIELDS.contains(&field.as_str()) {
            self.fields.insert(field, value.into());
        }
        self
    }

    /// Builds a patch from any value that serializes to a map.
    ///
    /// `null` fields are dropped, so an update struct made of `Option`s only
    /// assigns the fields it actually carries.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if `value` does not serialize to a map.
    pub fn from_serializable<T: Serialize>(value: &T) -> RepositoryResult<Self> {
        Ok(serialize_to_document(value)?
            .into_iter()
            .filter(|(_, v)| !matches!(v, Bson::Null))
            .fold(Self::new(), |patch, (k, v)| patch.set(k, v)))
    }

    /// Returns `true` if the patch assigns no field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names assigned by this patch.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Consumes the patch, returning the `$set` document stamped with `updated_at`.
    pub(crate) fn into_changes(mut self, updated_at: DateTime) -> BsonDocument {
        self.fields.insert(UPDATED_AT_FIELD, Bson::DateTime(updated_at));
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Banner {
        title: String,
        #[serde(default)]
        display_order: i32,
        subtitle: Option<String>,
    }

    impl Document for Banner {
        fn collection_name() -> &'static str {
            "home_banners"
        }
    }

    #[test]
    fn patch_never_assigns_reserved_fields() {
        let patch = Patch::new()
            .set("_id", "x")
            .set("id", "x")
            .set("created_at", DateTime::now())
            .set("updated_at", DateTime::now())
            .set("title", "Changed");

        assert_eq!(patch.fields().collect::<Vec<_>>(), vec!["title"]);
    }

    #[test]
    fn patch_from_serializable_drops_nulls() {
        #[derive(Serialize)]
        struct BannerUpdate {
            title: Option<String>,
            subtitle: Option<String>,
            display_order: Option<i32>,
        }

        let patch = Patch::from_serializable(&BannerUpdate {
            title: Some("New".into()),
            subtitle: None,
            display_order: Some(2),
        })
        .unwrap();

        let mut fields = patch.fields().collect::<Vec<_>>();
        fields.sort();
        assert_eq!(fields, vec!["display_order", "title"]);
    }

    #[test]
    fn changes_always_carry_updated_at() {
        let now = DateTime::from_millis(1_700_000_000_000);
        let changes = Patch::new().into_changes(now);

        assert_eq!(changes, doc! { "updated_at": now });
    }

    #[test]
    fn record_fields_strip_reserved_keys() {
        let fields = record_fields(&Banner {
            title: "A".into(),
            display_order: 2,
            subtitle: None,
        })
        .unwrap();

        assert_eq!(fields.get_str("title").unwrap(), "A");
        assert!(!fields.contains_key("_id"));
        assert!(!fields.contains_key("created_at"));
    }

    #[test]
    fn stored_lifts_id_and_timestamps() {
        let id = DocumentId::new();
        let now = DateTime::from_millis(1_700_000_000_000);
        let raw = doc! {
            "_id": id.to_native(),
            "title": "A",
            "display_order": 2,
            "created_at": now,
            "updated_at": now,
        };

        let stored = Stored::<Banner>::from_raw(raw).unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.created_at, now);
        assert_eq!(stored.data.title, "A");
        assert_eq!(stored.data.subtitle, None);

        let json = stored.to_json().unwrap();
        assert_eq!(json["id"], serde_json::json!(id.to_string()));
        assert_eq!(json["title"], serde_json::json!("A"));
        assert_eq!(json["created_at"], serde_json::json!("2023-11-14T22:13:20.000Z"));
        assert_eq!(json["updated_at"], serde_json::json!("2023-11-14T22:13:20.000Z"));
    }

    #[test]
    fn stored_without_native_id_is_invalid() {
        let now = DateTime::now();
        let raw = doc! { "title": "A", "created_at": now, "updated_at": now };

        assert!(matches!(
            Stored::<Banner>::from_raw(raw),
            Err(RepositoryError::InvalidDocument(_))
        ));
    }
}
