//! Repositorios
//!
//! Contratos de acceso a datos que consume el validador de marcajes y sus
//! implementaciones: PostgreSQL (sqlx) y memoria.

pub mod checkpoint_repository;
pub mod marking_repository;
pub mod memory;
pub mod round_repository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{Checkpoint, GeoPoint, Marking, Round, RoundStatus};
use crate::utils::errors::AppResult;

pub use checkpoint_repository::CheckpointRepository;
pub use marking_repository::MarkingRepository;
pub use memory::InMemoryStore;
pub use round_repository::RoundRepository;

/// Catálogo de rutas y puntos de control (solo lectura)
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Busca por id y, si no hay coincidencia, por nombre visible
    async fn resolve_checkpoint(&self, identifier: &str) -> AppResult<Option<Checkpoint>>;

    /// Puntos de la ruta en orden de recorrido
    async fn ordered_checkpoints(&self, route_id: i64) -> AppResult<Vec<Checkpoint>>;

    async fn checkpoint_count(&self, route_id: i64) -> AppResult<i64> {
        Ok(self.ordered_checkpoints(route_id).await?.len() as i64)
    }
}

/// Marcajes: append-only, único por (ronda, punto)
#[async_trait]
pub trait MarkingStore: Send + Sync {
    /// Devuelve `None` si ya existía un marcaje para (ronda, punto)
    async fn insert_marking(
        &self,
        round_id: i64,
        checkpoint_id: i64,
        fix: Option<GeoPoint>,
        marked_at: DateTime<Utc>,
    ) -> AppResult<Option<Marking>>;

    async fn find_marking(&self, round_id: i64, checkpoint_id: i64) -> AppResult<Option<Marking>>;

    async fn count_distinct_marked_checkpoints(&self, round_id: i64) -> AppResult<i64>;

    async fn list_markings(&self, round_id: i64) -> AppResult<Vec<Marking>>;
}

/// Rondas: lectura y escritura del estado
#[async_trait]
pub trait RoundStore: Send + Sync {
    async fn find_round(&self, round_id: i64) -> AppResult<Option<Round>>;

    async fn set_round_status(&self, round_id: i64, status: RoundStatus) -> AppResult<()>;
}
