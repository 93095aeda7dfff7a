use std::sync::Arc;

use validator::Validate;

use crate::dto::marking_dto::{CreateMarkingRequest, MarkingResponse};
use crate::services::{MarkingOutcome, MarkingRejection, MarkingValidator};
use crate::utils::errors::AppError;

pub struct MarkingController {
    validator: Arc<MarkingValidator>,
}

impl MarkingController {
    pub fn new(validator: Arc<MarkingValidator>) -> Self {
        Self { validator }
    }

    /// Registrar un marcaje. El resultado interno distingue aceptación de
    /// rechazo; el error externo es de infraestructura.
    pub async fn create(
        &self,
        request: CreateMarkingRequest,
    ) -> Result<Result<MarkingResponse, MarkingRejection>, AppError> {
        request.validate()?;

        let identifier = request.id_punto.to_string();
        let outcome = self
            .validator
            .submit_marking(request.id_ronda, &identifier, request.fix())
            .await?;

        Ok(match outcome {
            MarkingOutcome::Accepted(accepted) => Ok(MarkingResponse::from(accepted)),
            MarkingOutcome::Rejected(rejection) => Err(rejection),
        })
    }
}
