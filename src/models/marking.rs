//! Modelo de Marking
//! 
//! Registro inmutable de un escaneo aceptado de un punto dentro de una ronda.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::GeoPoint;

/// Marking - mapea a la tabla markings (UNIQUE round_id, checkpoint_id)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Marking {
    pub id: i64,
    pub round_id: i64,
    pub checkpoint_id: i64,
    pub marked_at: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Marking {
    pub fn fix(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        }
    }
}
