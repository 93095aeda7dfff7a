use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use super::RoundStore;
use crate::models::{Round, RoundStatus};
use crate::utils::errors::{internal_error, AppResult};

// Fila tal como está en la tabla rounds; el estado se guarda como texto
#[derive(Debug, sqlx::FromRow)]
struct RoundRow {
    id: i64,
    guard_id: i64,
    route_id: i64,
    scheduled_date: NaiveDate,
    start_time: NaiveTime,
    end_time: Option<NaiveTime>,
    status: String,
}

impl TryFrom<RoundRow> for Round {
    type Error = crate::models::round::UnknownRoundStatus;

    fn try_from(row: RoundRow) -> Result<Self, Self::Error> {
        Ok(Round {
            id: row.id,
            guard_id: row.guard_id,
            route_id: row.route_id,
            scheduled_date: row.scheduled_date,
            start_time: row.start_time,
            end_time: row.end_time,
            status: row.status.parse()?,
        })
    }
}

pub struct RoundRepository {
    pool: PgPool,
}

impl RoundRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoundStore for RoundRepository {
    async fn find_round(&self, round_id: i64) -> AppResult<Option<Round>> {
        let row = sqlx::query_as::<_, RoundRow>(
            r#"
            SELECT id, guard_id, route_id, scheduled_date, start_time, end_time, status
            FROM rounds
            WHERE id = $1
            "#
        )
        .bind(round_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Round::try_from)
            .transpose()
            .map_err(|e| internal_error(&e.to_string()))
    }

    async fn set_round_status(&self, round_id: i64, status: RoundStatus) -> AppResult<()> {
        // COMPLETADA es terminal también a nivel de SQL
        sqlx::query("UPDATE rounds SET status = $2 WHERE id = $1 AND status <> 'COMPLETADA'")
            .bind(round_id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
