//! Almacén en memoria
//!
//! Implementa los tres contratos de almacenamiento sobre estructuras en
//! memoria. Usado por los tests unitarios y de integración.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{CatalogStore, MarkingStore, RoundStore};
use crate::models::{Checkpoint, GeoPoint, Marking, Round, RoundStatus};
use crate::services::catalog;
use crate::utils::errors::AppResult;

pub struct InMemoryStore {
    checkpoints: Vec<Checkpoint>,
    rounds: RwLock<HashMap<i64, Round>>,
    markings: RwLock<Vec<Marking>>,
    next_marking_id: AtomicI64,
    status_writes: AtomicUsize,
}

impl InMemoryStore {
    pub fn new(checkpoints: Vec<Checkpoint>, rounds: Vec<Round>) -> Self {
        Self {
            checkpoints,
            rounds: RwLock::new(rounds.into_iter().map(|r| (r.id, r)).collect()),
            markings: RwLock::new(Vec::new()),
            next_marking_id: AtomicI64::new(1),
            status_writes: AtomicUsize::new(0),
        }
    }

    pub async fn round(&self, round_id: i64) -> Option<Round> {
        self.rounds.read().await.get(&round_id).cloned()
    }

    pub async fn marking_count(&self) -> usize {
        self.markings.read().await.len()
    }

    /// Número de escrituras de estado de ronda realizadas
    pub fn status_write_count(&self) -> usize {
        self.status_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn resolve_checkpoint(&self, identifier: &str) -> AppResult<Option<Checkpoint>> {
        Ok(catalog::resolve_checkpoint(&self.checkpoints, identifier).cloned())
    }

    async fn ordered_checkpoints(&self, route_id: i64) -> AppResult<Vec<Checkpoint>> {
        let route: Vec<Checkpoint> = self
            .checkpoints
            .iter()
            .filter(|c| c.route_id == route_id)
            .cloned()
            .collect();
        Ok(catalog::order_checkpoints(route))
    }
}

#[async_trait]
impl MarkingStore for InMemoryStore {
    async fn insert_marking(
        &self,
        round_id: i64,
        checkpoint_id: i64,
        fix: Option<GeoPoint>,
        marked_at: DateTime<Utc>,
    ) -> AppResult<Option<Marking>> {
        let mut markings = self.markings.write().await;
        if markings
            .iter()
            .any(|m| m.round_id == round_id && m.checkpoint_id == checkpoint_id)
        {
            return Ok(None);
        }

        let marking = Marking {
            id: self.next_marking_id.fetch_add(1, Ordering::SeqCst),
            round_id,
            checkpoint_id,
            marked_at,
            latitude: fix.map(|f| f.latitude),
            longitude: fix.map(|f| f.longitude),
        };
        markings.push(marking.clone());
        Ok(Some(marking))
    }

    async fn find_marking(&self, round_id: i64, checkpoint_id: i64) -> AppResult<Option<Marking>> {
        Ok(self
            .markings
            .read()
            .await
            .iter()
            .find(|m| m.round_id == round_id && m.checkpoint_id == checkpoint_id)
            .cloned())
    }

    async fn count_distinct_marked_checkpoints(&self, round_id: i64) -> AppResult<i64> {
        let markings = self.markings.read().await;
        let mut checkpoints: Vec<i64> = markings
            .iter()
            .filter(|m| m.round_id == round_id)
            .map(|m| m.checkpoint_id)
            .collect();
        checkpoints.sort_unstable();
        checkpoints.dedup();
        Ok(checkpoints.len() as i64)
    }

    async fn list_markings(&self, round_id: i64) -> AppResult<Vec<Marking>> {
        let mut markings: Vec<Marking> = self
            .markings
            .read()
            .await
            .iter()
            .filter(|m| m.round_id == round_id)
            .cloned()
            .collect();
        markings.sort_by_key(|m| (m.marked_at, m.id));
        Ok(markings)
    }
}

#[async_trait]
impl RoundStore for InMemoryStore {
    async fn find_round(&self, round_id: i64) -> AppResult<Option<Round>> {
        Ok(self.round(round_id).await)
    }

    async fn set_round_status(&self, round_id: i64, status: RoundStatus) -> AppResult<()> {
        let mut rounds = self.rounds.write().await;
        if let Some(round) = rounds.get_mut(&round_id) {
            round.status = status;
            self.status_writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
