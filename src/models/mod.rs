//! Modelos del sistema
//! 
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL
//! de rutas, puntos de control, rondas y marcajes.

pub mod checkpoint;
pub mod marking;
pub mod round;

pub use checkpoint::{Checkpoint, GeoPoint, DEFAULT_RADIUS_M};
pub use marking::Marking;
pub use round::{Round, RoundProgress, RoundStatus};
