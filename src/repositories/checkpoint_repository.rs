use async_trait::async_trait;
use sqlx::PgPool;

use super::CatalogStore;
use crate::models::Checkpoint;
use crate::utils::errors::AppResult;

const CHECKPOINT_COLUMNS: &str =
    "id, route_id, name, sequence_index, latitude, longitude, radius_m";

pub struct CheckpointRepository {
    pool: PgPool,
}

impl CheckpointRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Checkpoint>> {
        let checkpoint = sqlx::query_as::<_, Checkpoint>(&format!(
            "SELECT {} FROM checkpoints WHERE id = $1",
            CHECKPOINT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(checkpoint)
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Checkpoint>> {
        let checkpoint = sqlx::query_as::<_, Checkpoint>(&format!(
            "SELECT {} FROM checkpoints WHERE name = $1 ORDER BY id ASC LIMIT 1",
            CHECKPOINT_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(checkpoint)
    }
}

#[async_trait]
impl CatalogStore for CheckpointRepository {
    async fn resolve_checkpoint(&self, identifier: &str) -> AppResult<Option<Checkpoint>> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Ok(None);
        }

        if let Ok(id) = identifier.parse::<i64>() {
            if let Some(checkpoint) = self.find_by_id(id).await? {
                return Ok(Some(checkpoint));
            }
        }

        self.find_by_name(identifier).await
    }

    async fn ordered_checkpoints(&self, route_id: i64) -> AppResult<Vec<Checkpoint>> {
        let checkpoints = sqlx::query_as::<_, Checkpoint>(&format!(
            "SELECT {} FROM checkpoints WHERE route_id = $1 ORDER BY sequence_index ASC, id ASC",
            CHECKPOINT_COLUMNS
        ))
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(checkpoints)
    }

    async fn checkpoint_count(&self, route_id: i64) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM checkpoints WHERE route_id = $1")
            .bind(route_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}
