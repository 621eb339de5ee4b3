use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::domain::{Coordinate, ListingStatus, OpeningHours, ProviderRecord, ServiceCategory};

/// Row of the `therapists` table as returned by PostgREST
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TherapistRow {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub is_online: Option<bool>,
    #[serde(default)]
    pub status: Option<ListingStatus>,
    #[serde(default)]
    pub massage_types: Option<Vec<String>>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// Row of the `places` table as returned by PostgREST
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceRow {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub is_online: Option<bool>,
    #[serde(default)]
    pub status: Option<ListingStatus>,
    #[serde(default)]
    pub services: Option<Vec<String>>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub opening_hours: Option<Value>,
}

/// Both halves of the coordinate must be present to be usable
fn coordinate(lat: Option<f64>, lng: Option<f64>) -> Option<Coordinate> {
    match (lat, lng) {
        (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some(Coordinate::new(lat, lng)),
        _ => None,
    }
}

impl TherapistRow {
    pub fn into_record(self) -> ProviderRecord {
        ProviderRecord {
            coordinate: coordinate(self.lat, self.lng),
            id: self.id,
            category: ServiceCategory::Home,
            name: self.name.unwrap_or_default(),
            phone: self.phone,
            available: self.is_online.unwrap_or(false),
            status: self.status.unwrap_or_default(),
            service_tags: self.massage_types.unwrap_or_default().into_iter().collect(),
            rating: self.rating.unwrap_or(0.0),
            opening_hours: None,
            distance_km: None,
        }
    }
}

impl PlaceRow {
    pub fn into_record(self) -> ProviderRecord {
        let opening_hours = self.opening_hours.and_then(|raw| {
            serde_json::from_value::<OpeningHours>(raw)
                .map_err(|e| tracing::debug!("Ignoring malformed opening hours for place {}: {}", self.id, e))
                .ok()
        });

        ProviderRecord {
            coordinate: coordinate(self.lat, self.lng),
            id: self.id,
            category: ServiceCategory::Places,
            name: self.name.unwrap_or_default(),
            phone: self.phone,
            available: self.is_online.unwrap_or(false),
            status: self.status.unwrap_or_default(),
            service_tags: self.services.unwrap_or_default().into_iter().collect(),
            rating: self.rating.unwrap_or(0.0),
            opening_hours,
            distance_km: None,
        }
    }
}
