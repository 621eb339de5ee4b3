use serde::Serialize;

use crate::core::{distance::distance_to, filters::matches_filter_spec, ranking::sort_by_distance};
use crate::models::{Coordinate, FilterSpec, ProviderRecord, ServiceCategory};

/// Filter a roster for one viewer
///
/// # Pipeline Stages
/// 1. Attach distance from the viewer (cleared when there is no viewer)
/// 2. Category, listing, service tag, distance and rating predicates
/// 3. Distance sort, only when the viewer location is known
///
/// The input is never modified; the result is a fresh vector.
pub fn apply_filters(
    providers: &[ProviderRecord],
    spec: &FilterSpec,
    viewer: Option<Coordinate>,
) -> Vec<ProviderRecord> {
    let mut survivors: Vec<ProviderRecord> = providers
        .iter()
        .map(|provider| ProviderRecord {
            distance_km: distance_to(viewer, provider),
            ..provider.clone()
        })
        .filter(|provider| matches_filter_spec(provider, spec))
        .collect();

    if viewer.is_some() {
        sort_by_distance(&mut survivors);
    }

    survivors
}

/// "N of M online" counts for the browse header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityCounts {
    pub available: usize,
    pub total: usize,
}

/// Count active providers of a category, and how many of them are available
pub fn count_availability(providers: &[ProviderRecord], category: ServiceCategory) -> AvailabilityCounts {
    providers
        .iter()
        .filter(|p| p.category == category && p.is_active())
        .fold(AvailabilityCounts::default(), |mut counts, p| {
            counts.total += 1;
            if p.available {
                counts.available += 1;
            }
            counts
        })
}

/// Result of a discovery pass
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub providers: Vec<ProviderRecord>,
    pub total_candidates: usize,
    pub counts: AvailabilityCounts,
}

/// Discovery entry point for the presentation layer
///
/// Holds only the filter state a fresh browse screen starts from; every
/// search is an independent pure computation.
#[derive(Debug, Clone)]
pub struct GeoFilterEngine {
    default_spec: FilterSpec,
}

impl GeoFilterEngine {
    pub fn new(default_spec: FilterSpec) -> Self {
        Self { default_spec }
    }

    /// Filter spec a new browse session starts with
    pub fn default_spec(&self) -> FilterSpec {
        self.default_spec.clone()
    }

    /// Same as [`apply_filters`]
    pub fn apply(
        &self,
        providers: &[ProviderRecord],
        spec: &FilterSpec,
        viewer: Option<Coordinate>,
    ) -> Vec<ProviderRecord> {
        apply_filters(providers, spec, viewer)
    }

    /// Filter a roster and collect the header counts alongside
    pub fn search(
        &self,
        providers: &[ProviderRecord],
        spec: &FilterSpec,
        viewer: Option<Coordinate>,
    ) -> SearchResult {
        let filtered = apply_filters(providers, spec, viewer);
        let counts = count_availability(providers, spec.service_category);

        tracing::debug!(
            "Filtered {} {} providers down to {} (viewer located: {})",
            providers.len(),
            spec.service_category.as_str(),
            filtered.len(),
            viewer.is_some()
        );

        SearchResult {
            providers: filtered,
            total_candidates: providers.len(),
            counts,
        }
    }
}

impl Default for GeoFilterEngine {
    fn default() -> Self {
        Self::new(FilterSpec::default())
    }
}
