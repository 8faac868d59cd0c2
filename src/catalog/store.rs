// PostgreSQL implementation of the GameStore collaborator.

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use tracing::debug;

use crate::error::CatalogError;
use crate::util::db::Db;

use super::search::GameQuery;
use super::{Game, GameStore, NewGame, Upserted};

const GAME_COLUMNS: &str =
    "id, publisher_id, name, platform, store_id, bundle_id, app_version, is_published, \
     created_at, updated_at";

pub struct PgGameStore {
    db: Db,
}

impl PgGameStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    async fn select_by_key(
        &self,
        store_id: &str,
        platform: &str,
    ) -> Result<Option<Game>, CatalogError> {
        let game = sqlx::query_as::<_, Game>(&format!(
            "SELECT {GAME_COLUMNS} FROM games WHERE store_id = $1 AND platform = $2 LIMIT 1"
        ))
        .bind(store_id)
        .bind(platform)
        .fetch_optional(&self.db.pool)
        .await?;
        Ok(game)
    }
}

#[async_trait]
impl GameStore for PgGameStore {
    async fn find_all(&self, query: &GameQuery) -> Result<Vec<Game>, CatalogError> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {GAME_COLUMNS} FROM games"));

        let mut prefix = " WHERE ";
        if let Some(name) = &query.name_contains {
            // Wildcards in `name` are already escaped; backslash is the
            // default LIKE escape character in Postgres.
            qb.push(prefix).push("name LIKE ");
            qb.push_bind(format!("%{name}%"));
            prefix = " AND ";
        }
        if let Some(platform) = &query.platform {
            qb.push(prefix).push("platform = ");
            qb.push_bind(platform.clone());
        }
        qb.push(" ORDER BY id");

        let games = qb
            .build_query_as::<Game>()
            .persistent(false)
            .fetch_all(&self.db.pool)
            .await?;
        Ok(games)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Game>, CatalogError> {
        let game = sqlx::query_as::<_, Game>(&format!(
            "SELECT {GAME_COLUMNS} FROM games WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db.pool)
        .await?;
        Ok(game)
    }

    async fn create(&self, fields: &NewGame) -> Result<Game, CatalogError> {
        let game = sqlx::query_as::<_, Game>(&format!(
            "INSERT INTO games \
                 (publisher_id, name, platform, store_id, bundle_id, app_version, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {GAME_COLUMNS}"
        ))
        .bind(&fields.publisher_id)
        .bind(&fields.name)
        .bind(&fields.platform)
        .bind(&fields.store_id)
        .bind(&fields.bundle_id)
        .bind(&fields.app_version)
        .bind(fields.is_published)
        .fetch_one(&self.db.pool)
        .await?;
        Ok(game)
    }

    async fn update(&self, id: i64, fields: &NewGame) -> Result<Option<Game>, CatalogError> {
        let game = sqlx::query_as::<_, Game>(&format!(
            "UPDATE games SET \
                 publisher_id = $1, name = $2, platform = $3, store_id = $4, \
                 bundle_id = $5, app_version = $6, is_published = $7, updated_at = now() \
             WHERE id = $8 \
             RETURNING {GAME_COLUMNS}"
        ))
        .bind(&fields.publisher_id)
        .bind(&fields.name)
        .bind(&fields.platform)
        .bind(&fields.store_id)
        .bind(&fields.bundle_id)
        .bind(&fields.app_version)
        .bind(fields.is_published)
        .bind(id)
        .fetch_optional(&self.db.pool)
        .await?;
        Ok(game)
    }

    async fn delete(&self, id: i64) -> Result<bool, CatalogError> {
        let done = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(&self.db.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }

    async fn find_or_create(&self, fields: &NewGame) -> Result<Upserted, CatalogError> {
        // 1) Fast path: the key already exists.
        if let Some(existing) = self.select_by_key(&fields.store_id, &fields.platform).await? {
            return Ok(Upserted::Existing(existing));
        }

        // 2) Insert; ON CONFLICT DO NOTHING absorbs a concurrent insert of the
        // same key instead of crashing the batch.
        let inserted = sqlx::query_as::<_, Game>(&format!(
            "INSERT INTO games \
                 (publisher_id, name, platform, store_id, bundle_id, app_version, is_published) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (store_id, platform) DO NOTHING \
             RETURNING {GAME_COLUMNS}"
        ))
        .bind(&fields.publisher_id)
        .bind(&fields.name)
        .bind(&fields.platform)
        .bind(&fields.store_id)
        .bind(&fields.bundle_id)
        .bind(&fields.app_version)
        .bind(fields.is_published)
        .persistent(false)
        .fetch_optional(&self.db.pool)
        .await?;

        if let Some(game) = inserted {
            return Ok(Upserted::Created(game));
        }

        // 3) Lost the race: a concurrent call created the row between the
        // select and the insert.
        debug!(
            store_id = %fields.store_id,
            platform = %fields.platform,
            "find_or_create lost insert race; re-reading winner"
        );
        match self.select_by_key(&fields.store_id, &fields.platform).await? {
            Some(existing) => Ok(Upserted::Existing(existing)),
            None => Err(CatalogError::Storage(sqlx::Error::RowNotFound)),
        }
    }
}
