//! Error types and result types for repository operations.
//!
//! Not-found is never an error in this crate: lookups by a malformed or unknown
//! identifier come back as `None`/`false`. What remains here are the failures a
//! caller cannot act on other than by reporting them, chiefly an unreachable store.
//! Use [`RepositoryResult<T>`] as the return type for fallible operations.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when talking to a document store.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The underlying store could not be reached or rejected the round-trip.
    ///
    /// Callers should surface this as a service-unavailable condition.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    /// Serialization/deserialization error when converting between a record and its stored form.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A record did not serialize to a field map, or a stored document has an unusable shape.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// Error during backend construction or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
}

/// A specialized `Result` type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<BsonError> for RepositoryError {
    fn from(err: BsonError) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for RepositoryError {
    fn from(err: SerdeJsonError) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}
