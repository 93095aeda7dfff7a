//! Modelo de Round
//!
//! Una ronda asigna un guardia a recorrer una ruta en una fecha y hora
//! programadas. El estado avanza PENDIENTE → EN_PROGRESO → COMPLETADA y
//! nunca retrocede.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Estado de la ronda - se guarda como texto en la columna rounds.status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundStatus {
    #[serde(rename = "PENDIENTE")]
    Pending,
    #[serde(rename = "EN_PROGRESO")]
    InProgress,
    #[serde(rename = "COMPLETADA")]
    Completed,
}

impl RoundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Pending => "PENDIENTE",
            RoundStatus::InProgress => "EN_PROGRESO",
            RoundStatus::Completed => "COMPLETADA",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundStatus::Completed)
    }

    /// Estado resultante después de un marcaje aceptado.
    ///
    /// Solo ensancha: COMPLETADA es absorbente y EN_PROGRESO nunca vuelve
    /// a PENDIENTE.
    pub fn after_marking(self, progress: RoundProgress) -> RoundStatus {
        if self.is_terminal() || progress.is_complete() {
            return RoundStatus::Completed;
        }
        match self {
            RoundStatus::Pending => RoundStatus::InProgress,
            other => other,
        }
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Estado de ronda desconocido: {0}")]
pub struct UnknownRoundStatus(pub String);

impl FromStr for RoundStatus {
    type Err = UnknownRoundStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "PENDIENTE" => Ok(RoundStatus::Pending),
            "EN_PROGRESO" => Ok(RoundStatus::InProgress),
            "COMPLETADA" => Ok(RoundStatus::Completed),
            other => Err(UnknownRoundStatus(other.to_string())),
        }
    }
}

/// Round principal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Round {
    pub id: i64,
    pub guard_id: i64,
    pub route_id: i64,
    pub scheduled_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub status: RoundStatus,
}

/// Avance de una ronda: puntos marcados sobre puntos de la ruta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundProgress {
    pub current: i64,
    pub total: i64,
}

impl RoundProgress {
    pub fn new(current: i64, total: i64) -> Self {
        Self { current, total }
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.total
    }
}
