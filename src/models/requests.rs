use serde::{Deserialize, Serialize};
use validator::Validate;

use super::domain::ReviewStatus;

/// Review as typed in by a customer, before moderation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewSubmission {
    #[validate(length(min = 1, max = 100))]
    #[serde(alias = "customerName", rename = "customer_name")]
    pub customer_name: String,
    #[validate(length(min = 6, max = 20))]
    #[serde(alias = "customerWhatsApp", rename = "customer_whatsapp")]
    pub customer_whatsapp: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[validate(length(min = 1, max = 2000))]
    pub comment: String,
}

/// Moderator edit of an existing review; only the fields set are written
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReviewEdit {
    #[validate(length(min = 1, max = 2000))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[validate(range(min = 1, max = 5))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReviewStatus>,
}

impl ReviewEdit {
    pub fn is_empty(&self) -> bool {
        self.comment.is_none() && self.rating.is_none() && self.status.is_none()
    }
}
