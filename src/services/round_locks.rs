//! Serialización de marcajes por ronda
//! 
//! Un mutex por id de ronda. Los marcajes de rondas distintas avanzan en
//! paralelo; los de una misma ronda se procesan de a uno.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Default)]
pub struct RoundLocks {
    locks: Arc<Mutex<HashMap<i64, Arc<Mutex<()>>>>>,
}

impl RoundLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Espera el turno de la ronda; el turno se libera al soltar el guard
    pub async fn acquire(&self, round_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Solo el mapa referencia las entradas sin dueño ni espera
            locks.retain(|id, lock| *id == round_id || Arc::strong_count(lock) > 1);
            locks.entry(round_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Rondas con un lock registrado
    pub async fn tracked_rounds(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_round_is_serialized() {
        let locks = RoundLocks::new();
        let guard = locks.acquire(1).await;

        let contender = locks.clone();
        let waiting = tokio::spawn(async move {
            let _guard = contender.acquire(1).await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiting.is_finished());

        drop(guard);
        waiting.await.unwrap();
    }

    #[tokio::test]
    async fn test_different_rounds_do_not_block() {
        let locks = RoundLocks::new();
        let _first = locks.acquire(1).await;
        let second = tokio::time::timeout(Duration::from_millis(100), locks.acquire(2)).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_released_locks_are_pruned() {
        let locks = RoundLocks::new();
        drop(locks.acquire(1).await);
        drop(locks.acquire(2).await);
        let _held = locks.acquire(3).await;
        assert_eq!(locks.tracked_rounds().await, 1);
    }
}
