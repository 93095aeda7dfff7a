use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::controllers::round_controller::RoundController;
use crate::dto::round_dto::{CheckpointResponse, RoundProgressResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_round_router() -> Router<AppState> {
    Router::new()
        .route("/rondas/:id/progreso", get(get_round_progress))
        .route("/rutas/:id/puntos", get(get_route_checkpoints))
}

async fn get_round_progress(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RoundProgressResponse>, AppError> {
    let controller = RoundController::new(state.rounds.clone());
    let response = controller.progress(id).await?;
    Ok(Json(response))
}

async fn get_route_checkpoints(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<CheckpointResponse>>, AppError> {
    let controller = RoundController::new(state.rounds.clone());
    let response = controller.route_checkpoints(id).await?;
    Ok(Json(response))
}
