//! Validador de marcajes
//!
//! Aplica, en orden fijo, las verificaciones de un escaneo de punto de
//! control: resolución del punto, geocerca, pertenencia a la ruta, orden
//! secuencial y duplicado. Si todas pasan, agrega el marcaje y recalcula el
//! estado de la ronda.
//!
//! Un rechazo es un resultado esperado, no un error: se devuelve como
//! `MarkingOutcome::Rejected` y no escribe nada. Solo las fallas de
//! almacenamiento se propagan como `AppError`.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::catalog;
use super::geofence::check_geofence;
use super::round_locks::RoundLocks;
use crate::models::{Checkpoint, GeoPoint, Marking, Round, RoundProgress, RoundStatus};
use crate::repositories::{CatalogStore, MarkingStore, RoundStore};
use crate::utils::errors::AppResult;

/// Motivos de rechazo de un marcaje
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarkingRejection {
    #[error("Punto de control no encontrado")]
    CheckpointNotFound,

    #[error("Este punto requiere ubicación GPS. Activa la ubicación e intenta de nuevo")]
    MissingLocation,

    #[error("Estás fuera del rango del punto: a ~{distance} m, más allá del máximo de {radius:.0} m")]
    OutOfRange { distance: i64, radius: f64 },

    #[error("Ronda no encontrada")]
    RoundNotFound,

    #[error("El punto no pertenece a la ruta de esta ronda")]
    CheckpointNotInRoute,

    #[error("Debes marcar primero el punto '{expected}'")]
    OutOfOrder { expected: String },

    #[error("Este punto ya fue marcado en esta ronda")]
    AlreadyMarked,
}

impl MarkingRejection {
    pub fn code(&self) -> &'static str {
        match self {
            MarkingRejection::CheckpointNotFound => "CHECKPOINT_NOT_FOUND",
            MarkingRejection::MissingLocation => "MISSING_LOCATION",
            MarkingRejection::OutOfRange { .. } => "OUT_OF_RANGE",
            MarkingRejection::RoundNotFound => "ROUND_NOT_FOUND",
            MarkingRejection::CheckpointNotInRoute => "CHECKPOINT_NOT_IN_ROUTE",
            MarkingRejection::OutOfOrder { .. } => "OUT_OF_ORDER",
            MarkingRejection::AlreadyMarked => "ALREADY_MARKED",
        }
    }

    /// Rechazos por recurso inexistente (el resto son errores del guardia)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MarkingRejection::CheckpointNotFound | MarkingRejection::RoundNotFound
        )
    }
}

/// Marcaje aceptado y avance resultante de la ronda
#[derive(Debug, Clone, Serialize)]
pub struct AcceptedMarking {
    pub marking: Marking,
    pub checkpoint: Checkpoint,
    pub progress: RoundProgress,
    pub status: RoundStatus,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub enum MarkingOutcome {
    Accepted(AcceptedMarking),
    Rejected(MarkingRejection),
}

impl MarkingOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MarkingOutcome::Accepted(_))
    }
}

// Resultado de las verificaciones de solo lectura
struct ValidatedScan {
    checkpoint: Checkpoint,
    round: Round,
    total: i64,
}

pub struct MarkingValidator {
    catalog: Arc<dyn CatalogStore>,
    markings: Arc<dyn MarkingStore>,
    rounds: Arc<dyn RoundStore>,
    locks: RoundLocks,
}

impl MarkingValidator {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        markings: Arc<dyn MarkingStore>,
        rounds: Arc<dyn RoundStore>,
    ) -> Self {
        Self {
            catalog,
            markings,
            rounds,
            locks: RoundLocks::new(),
        }
    }

    /// Procesa el escaneo de un punto dentro de una ronda
    pub async fn submit_marking(
        &self,
        round_id: i64,
        checkpoint_identifier: &str,
        fix: Option<GeoPoint>,
    ) -> AppResult<MarkingOutcome> {
        let _turn = self.locks.acquire(round_id).await;
        debug!("🔒 Turno adquirido para ronda {}", round_id);

        let scan = match self.validate(round_id, checkpoint_identifier, fix).await? {
            Ok(scan) => scan,
            Err(rejection) => {
                info!(
                    "🚫 Marcaje rechazado: ronda={} punto='{}' motivo={}",
                    round_id,
                    checkpoint_identifier,
                    rejection.code()
                );
                return Ok(MarkingOutcome::Rejected(rejection));
            }
        };

        let Some(marking) = self
            .markings
            .insert_marking(round_id, scan.checkpoint.id, fix, Utc::now())
            .await?
        else {
            // Otra instancia insertó el mismo (ronda, punto)
            warn!(
                "⚠️ Conflicto de unicidad al marcar: ronda={} punto={}",
                round_id, scan.checkpoint.id
            );
            return Ok(MarkingOutcome::Rejected(MarkingRejection::AlreadyMarked));
        };

        let current = self.markings.count_distinct_marked_checkpoints(round_id).await?;
        let progress = RoundProgress::new(current, scan.total);
        let status = scan.round.status.after_marking(progress);
        if status != scan.round.status {
            self.rounds.set_round_status(round_id, status).await?;
            info!(
                "🔄 Ronda {}: {} → {}",
                round_id, scan.round.status, status
            );
        }

        let completed = status == RoundStatus::Completed;
        info!(
            "✅ Marcaje {} aceptado: ronda={} punto='{}' avance={}/{}",
            marking.id, round_id, scan.checkpoint.name, progress.current, progress.total
        );
        if completed {
            info!("🏁 Ronda {} completada", round_id);
        }

        Ok(MarkingOutcome::Accepted(AcceptedMarking {
            marking,
            checkpoint: scan.checkpoint,
            progress,
            status,
            completed,
        }))
    }

    async fn validate(
        &self,
        round_id: i64,
        checkpoint_identifier: &str,
        fix: Option<GeoPoint>,
    ) -> AppResult<Result<ValidatedScan, MarkingRejection>> {
        // 1. Resolver punto
        let Some(checkpoint) = self.catalog.resolve_checkpoint(checkpoint_identifier).await? else {
            return Ok(Err(MarkingRejection::CheckpointNotFound));
        };

        // 2. Geocerca
        if let Err(rejection) = check_geofence(&checkpoint, fix) {
            return Ok(Err(rejection));
        }

        // 3. Pertenencia a la ruta de la ronda
        let Some(round) = self.rounds.find_round(round_id).await? else {
            return Ok(Err(MarkingRejection::RoundNotFound));
        };
        if checkpoint.route_id != round.route_id {
            return Ok(Err(MarkingRejection::CheckpointNotInRoute));
        }

        // 4. Orden secuencial
        let ordered = self.catalog.ordered_checkpoints(round.route_id).await?;
        if !ordered.iter().any(|c| c.id == checkpoint.id) {
            return Ok(Err(MarkingRejection::CheckpointNotInRoute));
        }
        if let Some(previous) = catalog::predecessor(&ordered, checkpoint.id) {
            if self.markings.find_marking(round_id, previous.id).await?.is_none() {
                return Ok(Err(MarkingRejection::OutOfOrder {
                    expected: previous.name.clone(),
                }));
            }
        }

        // 5. Duplicado
        if self.markings.find_marking(round_id, checkpoint.id).await?.is_some() {
            return Ok(Err(MarkingRejection::AlreadyMarked));
        }

        Ok(Ok(ValidatedScan {
            checkpoint,
            round,
            total: ordered.len() as i64,
        }))
    }
}
