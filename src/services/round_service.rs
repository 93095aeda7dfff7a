//! Consultas de avance de rondas
//! 
//! Vista de solo lectura de una ronda: estado, avance, marcajes y próximo
//! punto a marcar.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::models::{Checkpoint, Marking, Round, RoundProgress};
use crate::repositories::{CatalogStore, MarkingStore, RoundStore};
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, Serialize)]
pub struct RoundSummary {
    pub round: Round,
    pub progress: RoundProgress,
    pub markings: Vec<Marking>,
    pub next_checkpoint: Option<Checkpoint>,
}

pub struct RoundService {
    catalog: Arc<dyn CatalogStore>,
    markings: Arc<dyn MarkingStore>,
    rounds: Arc<dyn RoundStore>,
}

impl RoundService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        markings: Arc<dyn MarkingStore>,
        rounds: Arc<dyn RoundStore>,
    ) -> Self {
        Self { catalog, markings, rounds }
    }

    pub async fn summary(&self, round_id: i64) -> AppResult<Option<RoundSummary>> {
        let Some(round) = self.rounds.find_round(round_id).await? else {
            return Ok(None);
        };

        let total = self.catalog.checkpoint_count(round.route_id).await?;
        let current = self.markings.count_distinct_marked_checkpoints(round_id).await?;
        let markings = self.markings.list_markings(round_id).await?;

        let marked: HashSet<i64> = markings.iter().map(|m| m.checkpoint_id).collect();
        let next_checkpoint = self
            .catalog
            .ordered_checkpoints(round.route_id)
            .await?
            .into_iter()
            .find(|c| !marked.contains(&c.id));

        Ok(Some(RoundSummary {
            round,
            progress: RoundProgress::new(current, total),
            markings,
            next_checkpoint,
        }))
    }

    pub async fn route_checkpoints(&self, route_id: i64) -> AppResult<Vec<Checkpoint>> {
        self.catalog.ordered_checkpoints(route_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoundStatus;
    use crate::repositories::InMemoryStore;
    use crate::services::MarkingValidator;
    use chrono::{NaiveDate, NaiveTime};

    fn checkpoint(id: i64, name: &str, sequence_index: i32) -> Checkpoint {
        Checkpoint {
            id,
            route_id: 1,
            name: name.to_string(),
            sequence_index,
            latitude: None,
            longitude: None,
            radius_m: None,
        }
    }

    fn store() -> Arc<InMemoryStore> {
        Arc::new(InMemoryStore::new(
            vec![checkpoint(1, "A", 0), checkpoint(2, "B", 1)],
            vec![Round {
                id: 3,
                guard_id: 1,
                route_id: 1,
                scheduled_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
                start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                end_time: Some(NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
                status: RoundStatus::Pending,
            }],
        ))
    }

    #[tokio::test]
    async fn test_summary_tracks_next_checkpoint() {
        let store = store();
        let service = RoundService::new(store.clone(), store.clone(), store.clone());
        let validator = MarkingValidator::new(store.clone(), store.clone(), store.clone());

        let before = service.summary(3).await.unwrap().unwrap();
        assert_eq!(before.progress, RoundProgress::new(0, 2));
        assert_eq!(before.next_checkpoint.map(|c| c.id), Some(1));

        validator.submit_marking(3, "A", None).await.unwrap();
        let after = service.summary(3).await.unwrap().unwrap();
        assert_eq!(after.progress, RoundProgress::new(1, 2));
        assert_eq!(after.round.status, RoundStatus::InProgress);
        assert_eq!(after.markings.len(), 1);
        assert_eq!(after.next_checkpoint.map(|c| c.id), Some(2));
    }

    #[tokio::test]
    async fn test_summary_of_unknown_round() {
        let store = store();
        let service = RoundService::new(store.clone(), store.clone(), store.clone());
        assert!(service.summary(99).await.unwrap().is_none());
    }
}
