use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::MarkingStore;
use crate::models::{GeoPoint, Marking};
use crate::utils::errors::AppResult;

pub struct MarkingRepository {
    pool: PgPool,
}

impl MarkingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MarkingStore for MarkingRepository {
    async fn insert_marking(
        &self,
        round_id: i64,
        checkpoint_id: i64,
        fix: Option<GeoPoint>,
        marked_at: DateTime<Utc>,
    ) -> AppResult<Option<Marking>> {
        // La restricción única (round_id, checkpoint_id) decide los duplicados
        let marking = sqlx::query_as::<_, Marking>(
            r#"
            INSERT INTO markings (round_id, checkpoint_id, marked_at, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (round_id, checkpoint_id) DO NOTHING
            RETURNING id, round_id, checkpoint_id, marked_at, latitude, longitude
            "#
        )
        .bind(round_id)
        .bind(checkpoint_id)
        .bind(marked_at)
        .bind(fix.map(|f| f.latitude))
        .bind(fix.map(|f| f.longitude))
        .fetch_optional(&self.pool)
        .await?;

        Ok(marking)
    }

    async fn find_marking(&self, round_id: i64, checkpoint_id: i64) -> AppResult<Option<Marking>> {
        let marking = sqlx::query_as::<_, Marking>(
            r#"
            SELECT id, round_id, checkpoint_id, marked_at, latitude, longitude
            FROM markings
            WHERE round_id = $1 AND checkpoint_id = $2
            "#
        )
        .bind(round_id)
        .bind(checkpoint_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(marking)
    }

    async fn count_distinct_marked_checkpoints(&self, round_id: i64) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(DISTINCT checkpoint_id) FROM markings WHERE round_id = $1"
        )
        .bind(round_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    async fn list_markings(&self, round_id: i64) -> AppResult<Vec<Marking>> {
        let markings = sqlx::query_as::<_, Marking>(
            r#"
            SELECT id, round_id, checkpoint_id, marked_at, latitude, longitude
            FROM markings
            WHERE round_id = $1
            ORDER BY marked_at ASC, id ASC
            "#
        )
        .bind(round_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(markings)
    }
}
