use serde::Serialize;

use crate::models::{Checkpoint, Marking, RoundProgress, RoundStatus};
use crate::services::RoundSummary;

// Response de GET /rondas/:id/progreso
#[derive(Debug, Serialize)]
pub struct RoundProgressResponse {
    pub id_ronda: i64,
    pub id_ruta: i64,
    pub status: RoundStatus,
    pub progress: RoundProgress,
    pub completed: bool,
    pub markings: Vec<MarkingItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_checkpoint: Option<CheckpointResponse>,
}

#[derive(Debug, Serialize)]
pub struct MarkingItem {
    pub id_marcaje: i64,
    pub id_punto: i64,
    pub marked_at: String,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CheckpointResponse {
    pub id: i64,
    pub id_ruta: i64,
    pub nombre: String,
    pub orden: i32,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radio_m: Option<f64>,
}

impl From<Marking> for MarkingItem {
    fn from(marking: Marking) -> Self {
        Self {
            id_marcaje: marking.id,
            id_punto: marking.checkpoint_id,
            marked_at: marking.marked_at.to_rfc3339(),
            latitud: marking.latitude,
            longitud: marking.longitude,
        }
    }
}

impl From<Checkpoint> for CheckpointResponse {
    fn from(checkpoint: Checkpoint) -> Self {
        // El radio solo aplica si el punto tiene posición configurada
        let radio_m = checkpoint
            .expected_position()
            .map(|_| checkpoint.acceptance_radius_m());
        Self {
            id: checkpoint.id,
            id_ruta: checkpoint.route_id,
            nombre: checkpoint.name,
            orden: checkpoint.sequence_index,
            latitud: checkpoint.latitude,
            longitud: checkpoint.longitude,
            radio_m,
        }
    }
}

impl From<RoundSummary> for RoundProgressResponse {
    fn from(summary: RoundSummary) -> Self {
        Self {
            id_ronda: summary.round.id,
            id_ruta: summary.round.route_id,
            completed: summary.round.status == RoundStatus::Completed,
            status: summary.round.status,
            progress: summary.progress,
            markings: summary.markings.into_iter().map(MarkingItem::from).collect(),
            next_checkpoint: summary.next_checkpoint.map(CheckpointResponse::from),
        }
    }
}
