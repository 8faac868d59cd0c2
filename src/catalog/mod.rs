// Catalog domain: the canonical game record, the storage collaborator trait
// and the query/sanitization helpers built on top of it.

pub mod sanitize;
pub mod search;
pub mod store;

use crate::error::CatalogError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use search::GameQuery;

/// A persisted catalog row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: i64,
    pub publisher_id: Option<String>,
    pub name: Option<String>,
    pub platform: String,
    pub store_id: String,
    pub bundle_id: Option<String>,
    pub app_version: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values for a record to be created or updated. This is both the
/// normalizer's output and the POST/PUT body shape. Missing text fields stay
/// NULL in storage; `(store_id, platform)` always have concrete values since
/// they form the upsert dedup key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGame {
    pub publisher_id: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub store_id: String,
    pub bundle_id: Option<String>,
    pub app_version: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

/// Outcome of a find-or-create call.
#[derive(Debug, Clone)]
pub enum Upserted {
    Created(Game),
    Existing(Game),
}

impl Upserted {
    pub fn into_game(self) -> Game {
        match self {
            Upserted::Created(g) | Upserted::Existing(g) => g,
        }
    }
}

/// Storage collaborator for the catalog. Handlers and the population pipeline
/// only see this trait; the production implementation is
/// [`store::PgGameStore`].
#[async_trait]
pub trait GameStore: Send + Sync {
    /// All records matching `query`, in id order.
    async fn find_all(&self, query: &GameQuery) -> Result<Vec<Game>, CatalogError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Game>, CatalogError>;

    async fn create(&self, fields: &NewGame) -> Result<Game, CatalogError>;

    /// Update an existing record. Returns `None` when `id` matches nothing.
    async fn update(&self, id: i64, fields: &NewGame) -> Result<Option<Game>, CatalogError>;

    /// Delete a record. Returns `false` when `id` matches nothing.
    async fn delete(&self, id: i64) -> Result<bool, CatalogError>;

    /// Create the record unless one already exists for its
    /// `(store_id, platform)` key; existing records are never modified.
    async fn find_or_create(&self, fields: &NewGame) -> Result<Upserted, CatalogError>;
}
