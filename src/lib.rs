//! Massage Finder - provider discovery for a massage therapist and venue marketplace
//!
//! The core is a pure geo-filtering and ranking engine over in-memory rosters:
//! haversine distance, multi-predicate filtering, distance sort and
//! opening-hours evaluation. Around it sit a Supabase adapter that supplies
//! normalized rosters, a snapshot cache, and review and contact helpers.

pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use self::core::{apply_filters, haversine_distance, is_open_now, todays_hours_summary, GeoFilterEngine, HoursSummary};
pub use self::models::{Coordinate, FilterSpec, OpeningHours, ProviderRecord, ServiceCategory};
