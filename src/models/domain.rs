use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A point on the globe in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Which provider collection a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    /// Therapists who travel to the customer
    Home,
    /// Fixed venues the customer travels to
    Places,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Home => "home",
            ServiceCategory::Places => "places",
        }
    }

    /// Table the category's listings live in
    pub fn table(&self) -> &'static str {
        match self {
            ServiceCategory::Home => "therapists",
            ServiceCategory::Places => "places",
        }
    }
}

/// Moderation state of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Pending,
    Active,
    Blocked,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Pending => "pending",
            ListingStatus::Active => "active",
            ListingStatus::Blocked => "blocked",
        }
    }
}

/// Opening and closing time for a single weekday, as "HH:MM" strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    #[serde(default)]
    pub open: Option<String>,
    #[serde(default)]
    pub close: Option<String>,
}

impl DayHours {
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: Some(open.to_string()),
            close: Some(close.to_string()),
        }
    }
}

/// Weekly opening schedule of a venue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub monday: Option<DayHours>,
    #[serde(default)]
    pub tuesday: Option<DayHours>,
    #[serde(default)]
    pub wednesday: Option<DayHours>,
    #[serde(default)]
    pub thursday: Option<DayHours>,
    #[serde(default)]
    pub friday: Option<DayHours>,
    #[serde(default)]
    pub saturday: Option<DayHours>,
    #[serde(default)]
    pub sunday: Option<DayHours>,
}

impl OpeningHours {
    /// Hours recorded for the given weekday, if any
    pub fn for_weekday(&self, day: chrono::Weekday) -> Option<&DayHours> {
        use chrono::Weekday;

        match day {
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
            Weekday::Sun => self.sunday.as_ref(),
        }
    }

    /// Set the hours for a weekday, returning the schedule for chaining
    pub fn with_day(mut self, day: chrono::Weekday, hours: DayHours) -> Self {
        use chrono::Weekday;

        let slot = match day {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        };
        *slot = Some(hours);
        self
    }
}

/// A therapist or venue, flattened to the attributes discovery works on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    pub id: String,
    pub category: ServiceCategory,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// "Online" for a therapist, "currently open" for a venue
    pub available: bool,
    #[serde(default)]
    pub status: ListingStatus,
    #[serde(default)]
    pub service_tags: BTreeSet<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    /// Kilometers from the viewer; only set by a distance pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl ProviderRecord {
    /// Minimal active record, mostly useful for building rosters by hand
    pub fn new(id: impl Into<String>, category: ServiceCategory) -> Self {
        Self {
            id: id.into(),
            category,
            name: String::new(),
            phone: None,
            available: false,
            status: ListingStatus::Active,
            service_tags: BTreeSet::new(),
            rating: 0.0,
            coordinate: None,
            opening_hours: None,
            distance_km: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ListingStatus::Active
    }

    pub fn has_any_tag(&self, tags: &BTreeSet<String>) -> bool {
        self.service_tags.intersection(tags).next().is_some()
    }
}

/// User-selected discovery filters, rebuilt on every interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub service_category: ServiceCategory,
    #[serde(default)]
    pub availability_only: bool,
    #[serde(default)]
    pub required_service_tags: BTreeSet<String>,
    pub max_distance_km: f64,
    #[serde(default)]
    pub min_rating: f64,
    /// Hide pending and blocked listings
    #[serde(default = "default_true")]
    pub active_only: bool,
}

fn default_true() -> bool { true }

/// Default search radius the browse screen starts with
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 50.0;

impl FilterSpec {
    /// A spec that lets every provider of the category through
    pub fn permissive(service_category: ServiceCategory) -> Self {
        Self {
            service_category,
            availability_only: false,
            required_service_tags: BTreeSet::new(),
            max_distance_km: f64::INFINITY,
            min_rating: 0.0,
            active_only: false,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_service_tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            service_category: ServiceCategory::Home,
            availability_only: false,
            required_service_tags: BTreeSet::new(),
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            min_rating: 0.0,
            active_only: true,
        }
    }
}

/// Kind of listing a review is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewTarget {
    Therapist,
    Place,
}

impl ReviewTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewTarget::Therapist => "therapist",
            ReviewTarget::Place => "place",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }
}

/// Customer review of a therapist or venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub target_id: String,
    pub target_type: ReviewTarget,
    pub customer_name: String,
    #[serde(default)]
    pub customer_whatsapp: String,
    pub rating: u8,
    pub comment: String,
    #[serde(default)]
    pub status: ReviewStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
