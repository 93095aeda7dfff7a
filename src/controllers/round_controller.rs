use std::sync::Arc;

use crate::dto::round_dto::{CheckpointResponse, RoundProgressResponse};
use crate::services::RoundService;
use crate::utils::errors::{not_found_error, AppError};

pub struct RoundController {
    service: Arc<RoundService>,
}

impl RoundController {
    pub fn new(service: Arc<RoundService>) -> Self {
        Self { service }
    }

    pub async fn progress(&self, round_id: i64) -> Result<RoundProgressResponse, AppError> {
        let summary = self
            .service
            .summary(round_id)
            .await?
            .ok_or_else(|| not_found_error("Ronda", &round_id.to_string()))?;

        Ok(RoundProgressResponse::from(summary))
    }

    pub async fn route_checkpoints(&self, route_id: i64) -> Result<Vec<CheckpointResponse>, AppError> {
        let checkpoints = self.service.route_checkpoints(route_id).await?;
        if checkpoints.is_empty() {
            return Err(not_found_error("Ruta", &route_id.to_string()));
        }

        Ok(checkpoints.into_iter().map(CheckpointResponse::from).collect())
    }
}
