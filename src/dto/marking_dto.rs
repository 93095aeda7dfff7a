use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::{GeoPoint, RoundProgress, RoundStatus};
use crate::services::{AcceptedMarking, MarkingRejection};
use crate::utils::errors::ErrorResponse;
use crate::utils::validation::{validate_coordinates, validate_not_empty};

/// Identificador escaneado: el QR puede traer el id numérico o el nombre
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum CheckpointRef {
    Id(i64),
    Code(String),
}

impl fmt::Display for CheckpointRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckpointRef::Id(id) => write!(f, "{}", id),
            CheckpointRef::Code(code) => f.write_str(code),
        }
    }
}

// Request de POST /marcajes
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_fix_pair"))]
pub struct CreateMarkingRequest {
    pub id_ronda: i64,

    #[validate(custom = "validate_checkpoint_ref")]
    pub id_punto: CheckpointRef,

    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
}

impl CreateMarkingRequest {
    /// Posición GPS enviada, si vino completa
    pub fn fix(&self) -> Option<GeoPoint> {
        match (self.latitud, self.longitud) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        }
    }
}

fn validate_checkpoint_ref(value: &CheckpointRef) -> Result<(), ValidationError> {
    match value {
        CheckpointRef::Id(_) => Ok(()),
        CheckpointRef::Code(code) => validate_not_empty(code),
    }
}

fn validate_fix_pair(request: &CreateMarkingRequest) -> Result<(), ValidationError> {
    match (request.latitud, request.longitud) {
        (Some(lat), Some(lng)) => validate_coordinates(lat, lng),
        (None, None) => Ok(()),
        _ => Err(ValidationError::new("incomplete_location")),
    }
}

// Response de marcaje aceptado
#[derive(Debug, Serialize)]
pub struct MarkingResponse {
    pub success: bool,
    pub id_marcaje: i64,
    #[serde(rename = "roundCompleted")]
    pub round_completed: bool,
    pub progress: RoundProgress,
    pub status: RoundStatus,
    pub punto: String,
}

impl From<AcceptedMarking> for MarkingResponse {
    fn from(accepted: AcceptedMarking) -> Self {
        Self {
            success: true,
            id_marcaje: accepted.marking.id,
            round_completed: accepted.completed,
            progress: accepted.progress,
            status: accepted.status,
            punto: accepted.checkpoint.name,
        }
    }
}

impl IntoResponse for MarkingRejection {
    fn into_response(self) -> Response {
        let status = if self.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::BAD_REQUEST
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
            details: serde_json::to_value(&self).ok(),
        };

        (status, Json(body)).into_response()
    }
}
