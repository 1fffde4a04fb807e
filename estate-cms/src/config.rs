//! Store configuration, read from the command line or the environment.
//!
//! A `.env` file in the working directory is loaded first (see [`StoreConfig::load`]),
//! so the variables below can live there during development:
//!
//! | variable    | flag          | default           |
//! |-------------|---------------|-------------------|
//! | `MONGO_URL` | `--mongo-url` | unset: in-memory  |
//! | `DB_NAME`   | `--db-name`   | `kmk_homes`       |
//! | `LOG_LEVEL` | `--log-level` | `info`            |

use clap::Parser;
use tracing::warn;

use estate_cms_core::{
    backend::StoreBackendBuilder,
    error::RepositoryResult,
    store::{DocumentStore, DynDocumentStore},
};
use estate_cms_memory::InMemoryStore;

pub const DEFAULT_DB_NAME: &str = "kmk_homes";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "estate-cms",
    version,
    about = "Document store of the KMK Homes content-management backend"
)]
pub struct StoreConfig {
    #[arg(
        long,
        env = "MONGO_URL",
        value_name = "URL",
        help = "MongoDB connection string; the in-memory store is used when absent"
    )]
    pub mongo_url: Option<String>,

    #[arg(
        long,
        env = "DB_NAME",
        default_value = DEFAULT_DB_NAME,
        value_name = "NAME",
        help = "Database holding the CMS collections"
    )]
    pub db_name: String,

    #[arg(
        long,
        env = "LOG_LEVEL",
        default_value = "info",
        value_name = "FILTER",
        help = "Log filter directive; RUST_LOG takes precedence"
    )]
    pub log_level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mongo_url: None,
            db_name: DEFAULT_DB_NAME.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl StoreConfig {
    /// Loads `.env` if present, then parses the process arguments and environment.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::parse()
    }

    /// Builds the document store this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Initialization`](estate_cms_core::error::RepositoryError::Initialization)
    /// if the connection string is malformed, or if one is given but the crate was
    /// built without the `mongodb` feature.
    pub async fn connect(&self) -> RepositoryResult<DynDocumentStore> {
        match self.mongo_url.as_deref() {
            #[cfg(feature = "mongodb")]
            Some(url) => {
                let backend = estate_cms_mongodb::MongoDbStore::builder(url, &self.db_name)
                    .build()
                    .await?;

                tracing::info!(database = %self.db_name, "using mongodb store");
                Ok(DocumentStore::new(backend).into_dyn())
            }
            #[cfg(not(feature = "mongodb"))]
            Some(_) => Err(estate_cms_core::error::RepositoryError::Initialization(
                "MONGO_URL is set but estate-cms was built without the `mongodb` feature".to_string(),
            )),
            None => {
                warn!("MONGO_URL not set, documents are kept in memory only");
                let backend = InMemoryStore::builder().build().await?;

                Ok(DocumentStore::new(backend).into_dyn())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = StoreConfig::try_parse_from([
            "estate-cms",
            "--db-name",
            "kmk_staging",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(config.db_name, "kmk_staging");
        assert_eq!(config.log_level, "debug");
    }

    #[tokio::test]
    async fn without_mongo_url_the_memory_store_is_used() {
        let config = StoreConfig::default();
        let store = config.connect().await.unwrap();

        assert!(format!("{:?}", store.backend()).contains("InMemoryStore"));
        store.shutdown().await.unwrap();
    }
}
