use std::cmp::Ordering;

use crate::models::ProviderRecord;

/// Order two optional distances: nearest first, unknown after every known one
#[inline]
pub fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort providers by distance from the viewer, keeping roster order for ties
pub fn sort_by_distance(providers: &mut [ProviderRecord]) {
    // slice::sort_by is stable
    providers.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km));
}
