//! Modelo de Checkpoint
//! 
//! Punto de control físico de una ruta, con posición GPS esperada opcional
//! y radio de aceptación.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Radio de aceptación por defecto cuando el punto tiene posición configurada
pub const DEFAULT_RADIUS_M: f64 = 30.0;

/// Coordenadas en grados decimales
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Checkpoint - mapea a la tabla checkpoints
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Checkpoint {
    pub id: i64,
    pub route_id: i64,
    pub name: String,
    /// Posición dentro de la ruta; empates se resuelven por id
    pub sequence_index: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_m: Option<f64>,
}

impl Checkpoint {
    /// Posición esperada, solo si latitud y longitud están configuradas
    pub fn expected_position(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        }
    }

    pub fn acceptance_radius_m(&self) -> f64 {
        self.radius_m.unwrap_or(DEFAULT_RADIUS_M)
    }

    /// Clave de orden dentro de la ruta
    pub fn order_key(&self) -> (i32, i64) {
        (self.sequence_index, self.id)
    }
}
