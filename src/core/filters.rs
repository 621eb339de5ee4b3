use crate::models::{FilterSpec, ProviderRecord};

/// Check if a provider belongs to the collection being browsed
#[inline]
pub fn matches_category(provider: &ProviderRecord, spec: &FilterSpec) -> bool {
    provider.category == spec.service_category
}

/// Check moderation status and the availability flag
#[inline]
pub fn matches_listing(provider: &ProviderRecord, spec: &FilterSpec) -> bool {
    if spec.active_only && !provider.is_active() {
        return false;
    }

    if spec.availability_only && !provider.available {
        return false;
    }

    true
}

/// Check the provider offers at least one of the requested services
///
/// An empty request lets everyone through.
#[inline]
pub fn matches_service_tags(provider: &ProviderRecord, spec: &FilterSpec) -> bool {
    spec.required_service_tags.is_empty() || provider.has_any_tag(&spec.required_service_tags)
}

/// Check the distance ceiling
///
/// Providers with no known distance are never excluded here.
#[inline]
pub fn within_distance(provider: &ProviderRecord, spec: &FilterSpec) -> bool {
    match provider.distance_km {
        Some(distance) => distance <= spec.max_distance_km,
        None => true,
    }
}

/// Check the rating floor
#[inline]
pub fn meets_min_rating(provider: &ProviderRecord, spec: &FilterSpec) -> bool {
    provider.rating >= spec.min_rating
}

/// All predicates of a spec, in pipeline order
#[inline]
pub fn matches_filter_spec(provider: &ProviderRecord, spec: &FilterSpec) -> bool {
    matches_category(provider, spec)
        && matches_listing(provider, spec)
        && matches_service_tags(provider, spec)
        && within_distance(provider, spec)
        && meets_min_rating(provider, spec)
}
