//! Geocerca de puntos de control
//! 
//! Distancia de círculo máximo (haversine) entre la posición enviada
//! por el dispositivo y la posición esperada del punto.

use crate::models::{Checkpoint, GeoPoint};
use super::marking_validator::MarkingRejection;

/// Radio medio de la Tierra en metros
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Distancia haversine en metros
pub fn haversine_distance_m(from: GeoPoint, to: GeoPoint) -> f64 {
    let dlat = (to.latitude - from.latitude).to_radians();
    let dlon = (to.longitude - from.longitude).to_radians();
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_M * c
}

/// Verifica la geocerca del punto.
///
/// Puntos sin posición esperada siempre pasan, con o sin GPS.
pub fn check_geofence(checkpoint: &Checkpoint, fix: Option<GeoPoint>) -> Result<(), MarkingRejection> {
    let Some(expected) = checkpoint.expected_position() else {
        return Ok(());
    };
    let Some(fix) = fix else {
        return Err(MarkingRejection::MissingLocation);
    };

    let distance = haversine_distance_m(fix, expected);
    let radius = checkpoint.acceptance_radius_m();
    if distance > radius {
        return Err(MarkingRejection::OutOfRange {
            distance: distance.round() as i64,
            radius,
        });
    }
    Ok(())
}
