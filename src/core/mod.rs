// Core algorithm exports
pub mod contact;
pub mod distance;
pub mod engine;
pub mod filters;
pub mod hours;
pub mod ranking;
pub mod reviews;

pub use contact::{booking_message, whatsapp_url};
pub use distance::{distance_to, haversine_distance};
pub use engine::{apply_filters, count_availability, AvailabilityCounts, GeoFilterEngine, SearchResult};
pub use filters::matches_filter_spec;
pub use hours::{is_open_at, is_open_now, todays_hours_summary, HoursSummary};
pub use ranking::sort_by_distance;
pub use reviews::{approved_reviews, average_rating};
