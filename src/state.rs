//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::EnvironmentConfig;
use crate::repositories::{
    CatalogStore, CheckpointRepository, MarkingRepository, MarkingStore, RoundRepository,
    RoundStore,
};
use crate::services::{MarkingValidator, RoundService};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub validator: Arc<MarkingValidator>,
    pub rounds: Arc<RoundService>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        catalog: Arc<dyn CatalogStore>,
        markings: Arc<dyn MarkingStore>,
        rounds: Arc<dyn RoundStore>,
    ) -> Self {
        Self {
            config,
            validator: Arc::new(MarkingValidator::new(
                catalog.clone(),
                markings.clone(),
                rounds.clone(),
            )),
            rounds: Arc::new(RoundService::new(catalog, markings, rounds)),
        }
    }

    /// Estado respaldado por los repositorios de PostgreSQL
    pub fn postgres(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self::new(
            config,
            Arc::new(CheckpointRepository::new(pool.clone())),
            Arc::new(MarkingRepository::new(pool.clone())),
            Arc::new(RoundRepository::new(pool)),
        )
    }

    /// Estado respaldado por un único almacén que implementa los tres contratos
    pub fn from_store<S>(store: Arc<S>, config: EnvironmentConfig) -> Self
    where
        S: CatalogStore + MarkingStore + RoundStore + 'static,
    {
        Self::new(config, store.clone(), store.clone(), store)
    }
}
