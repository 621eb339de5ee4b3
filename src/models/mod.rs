// Model exports
pub mod domain;
pub mod requests;
pub mod rows;

pub use domain::{
    Coordinate, DayHours, FilterSpec, ListingStatus, OpeningHours, ProviderRecord, Review,
    ReviewStatus, ReviewTarget, ServiceCategory, DEFAULT_MAX_DISTANCE_KM,
};
pub use requests::{ReviewEdit, ReviewSubmission};
pub use rows::{PlaceRow, TherapistRow};
