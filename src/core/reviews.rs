use crate::models::{Review, ReviewStatus};

/// Approved reviews of one provider, in their original order
pub fn approved_reviews<'a>(reviews: &'a [Review], target_id: &str) -> Vec<&'a Review> {
    reviews
        .iter()
        .filter(|r| r.target_id == target_id && r.status == ReviewStatus::Approved)
        .collect()
}

/// Mean rating rounded to one decimal place, 0.0 when there are no reviews
pub fn average_rating(reviews: &[&Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }

    let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let mean = f64::from(total) / reviews.len() as f64;

    (mean * 10.0).round() / 10.0
}
