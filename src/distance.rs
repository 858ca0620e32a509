//! Great-circle distance between airports

use crate::models::Coordinates;

/// Mean earth radius in kilometers used for all distance calculations
pub const EARTH_RADIUS_KM: f64 = 6372.8;

/// Haversine distance between two coordinates in kilometers.
///
/// Both latitudes are converted to radians before any trigonometric call,
/// including the cosine terms.
#[must_use]
pub fn distance_km(from: &Coordinates, to: &Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + (delta_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    // rounding can push `a` a hair above 1 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}
