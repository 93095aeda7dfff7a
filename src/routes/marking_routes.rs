use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use crate::controllers::marking_controller::MarkingController;
use crate::dto::marking_dto::CreateMarkingRequest;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_marking_router() -> Router<AppState> {
    Router::new().route("/marcajes", post(create_marking))
}

async fn create_marking(
    State(state): State<AppState>,
    payload: Result<Json<CreateMarkingRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    // Cuerpo ilegible o con tipos incorrectos: 400 con el formato de error de la API
    let Json(request) = payload.map_err(|rejection| bad_request_error(&rejection.body_text()))?;
    let controller = MarkingController::new(state.validator.clone());
    let response = match controller.create(request).await? {
        Ok(accepted) => Json(accepted).into_response(),
        Err(rejection) => rejection.into_response(),
    };
    Ok(response)
}
