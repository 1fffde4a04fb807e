//! Opaque document identifiers.
//!
//! A [`DocumentId`] wraps the store-native ObjectId: twelve bytes, written as a
//! 24-character hexadecimal token in URLs and JSON. Parsing is the only place a
//! string is checked for well-formedness; everything past it works with the typed value.

use bson::{Bson, oid::ObjectId};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Number of characters in the textual form of an identifier.
pub const DOCUMENT_ID_LEN: usize = 24;

/// A string that is not a well-formed document identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed document id: {0:?}")]
pub struct InvalidDocumentId(pub String);

/// Store-assigned identifier of a single document within its collection.
///
/// Serializes as its lowercase hex string so documents handed to callers carry a
/// plain string `id`.
///
/// # Example
///
/// ```ignore
/// use estate_cms_core::id::DocumentId;
///
/// let id = DocumentId::new();
/// let parsed = DocumentId::parse(&id.to_string()).unwrap();
/// assert_eq!(id, parsed);
/// assert!(!DocumentId::is_valid("not-an-id"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(ObjectId);

impl DocumentId {
    /// Generates a fresh identifier.
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Parses the textual form of an identifier.
    ///
    /// Exactly 24 hex digits are accepted, in either case.
    pub fn parse(s: &str) -> Result<Self, InvalidDocumentId> {
        if s.len() != DOCUMENT_ID_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidDocumentId(s.to_string()));
        }

        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidDocumentId(s.to_string()))
    }

    /// Returns `true` if `s` parses into an identifier.
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    /// Returns the store-native identifier.
    pub fn to_native(&self) -> ObjectId {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ObjectId> for DocumentId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl From<DocumentId> for ObjectId {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl From<DocumentId> for Bson {
    fn from(id: DocumentId) -> Self {
        Bson::ObjectId(id.0)
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DocumentId::parse(&raw).map_err(D::Error::custom)
    }
}
