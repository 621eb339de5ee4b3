use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use validator::Validate;

use crate::models::{
    ListingStatus, PlaceRow, ProviderRecord, Review, ReviewEdit, ReviewStatus, ReviewSubmission,
    ReviewTarget, ServiceCategory, TherapistRow,
};

/// Errors that can occur when talking to the Supabase REST API
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Update has no fields to write")]
    EmptyUpdate,
}

/// Supabase (PostgREST) client
///
/// Reads the therapist and place rosters, moderates listings, and reads and
/// writes reviews. Writes never touch a [`RosterCache`](crate::services::RosterCache);
/// invalidate the affected category after changing a listing.
/// Rows are normalized into [`ProviderRecord`]s before they leave this module.
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Result<Self, SupabaseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn check(response: Response) -> Result<Response, SupabaseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
        Err(SupabaseError::ApiError {
            status: status.as_u16(),
            body,
        })
    }

    /// GET a table and parse each row, skipping rows that do not parse
    async fn select_rows<T: DeserializeOwned>(&self, table: &str, filter: &str) -> Result<Vec<T>, SupabaseError> {
        let url = format!("{}?select=*{}", self.table_url(table), filter);

        tracing::debug!("Fetching rows from: {}", url);

        let response = self.authorized(self.client.get(&url)).send().await?;
        let json: Value = Self::check(response).await?.json().await?;

        let rows = json
            .as_array()
            .ok_or_else(|| SupabaseError::InvalidResponse(format!("Expected an array of {} rows", table)))?;

        let parsed: Vec<T> = rows
            .iter()
            .filter_map(|row| {
                serde_json::from_value(row.clone())
                    .map_err(|e| tracing::warn!("Skipping malformed {} row: {}", table, e))
                    .ok()
            })
            .collect();

        tracing::debug!("Fetched {} of {} {} rows", parsed.len(), rows.len(), table);

        Ok(parsed)
    }

    /// Fetch every therapist as a provider record
    pub async fn fetch_therapists(&self) -> Result<Vec<ProviderRecord>, SupabaseError> {
        let rows: Vec<TherapistRow> = self.select_rows("therapists", "").await?;
        Ok(rows.into_iter().map(TherapistRow::into_record).collect())
    }

    /// Fetch every venue as a provider record
    pub async fn fetch_places(&self) -> Result<Vec<ProviderRecord>, SupabaseError> {
        let rows: Vec<PlaceRow> = self.select_rows("places", "").await?;
        Ok(rows.into_iter().map(PlaceRow::into_record).collect())
    }

    /// Fetch the roster for one service category
    pub async fn fetch_roster(&self, category: ServiceCategory) -> Result<Vec<ProviderRecord>, SupabaseError> {
        match category {
            ServiceCategory::Home => self.fetch_therapists().await,
            ServiceCategory::Places => self.fetch_places().await,
        }
    }

    /// Fetch all reviews of a provider, newest first
    pub async fn fetch_reviews(&self, target_id: &str) -> Result<Vec<Review>, SupabaseError> {
        let filter = format!(
            "&target_id=eq.{}&order=created_at.desc",
            urlencoding::encode(target_id)
        );
        self.select_rows("reviews", &filter).await
    }

    /// Insert a customer review; it starts out pending moderation
    pub async fn submit_review(
        &self,
        target_id: &str,
        target_type: ReviewTarget,
        submission: &ReviewSubmission,
    ) -> Result<Review, SupabaseError> {
        submission.validate()?;

        let payload = json!({
            "target_id": target_id,
            "target_type": target_type.as_str(),
            "customer_name": submission.customer_name,
            "customer_whatsapp": submission.customer_whatsapp,
            "rating": submission.rating,
            "comment": submission.comment,
            "status": ReviewStatus::Pending.as_str(),
        });

        let response = self
            .authorized(self.client.post(self.table_url("reviews")))
            .header("Prefer", "return=representation")
            .json(&payload)
            .send()
            .await?;

        let mut inserted: Vec<Review> = Self::check(response).await?.json().await?;
        if inserted.is_empty() {
            return Err(SupabaseError::InvalidResponse("Insert returned no review".into()));
        }

        let review = inserted.swap_remove(0);
        tracing::info!("Review {} submitted for {} {}", review.id, target_type.as_str(), target_id);

        Ok(review)
    }

    fn by_id_url(&self, table: &str, id: &str) -> String {
        format!("{}?id=eq.{}", self.table_url(table), urlencoding::encode(id))
    }

    /// PATCH the row with the given id
    async fn patch_by_id(&self, table: &str, id: &str, changes: &Value) -> Result<(), SupabaseError> {
        let response = self
            .authorized(self.client.patch(self.by_id_url(table, id)))
            .json(changes)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Move a review through moderation
    pub async fn update_review_status(&self, review_id: &str, status: ReviewStatus) -> Result<(), SupabaseError> {
        self.patch_by_id("reviews", review_id, &json!({ "status": status.as_str() }))
            .await?;

        tracing::info!("Review {} marked {}", review_id, status.as_str());

        Ok(())
    }

    /// Edit a review's comment, rating or status
    pub async fn update_review(&self, review_id: &str, edit: &ReviewEdit) -> Result<(), SupabaseError> {
        edit.validate()?;
        if edit.is_empty() {
            return Err(SupabaseError::EmptyUpdate);
        }

        let changes = serde_json::to_value(edit)
            .map_err(|e| SupabaseError::InvalidResponse(e.to_string()))?;
        self.patch_by_id("reviews", review_id, &changes).await?;

        tracing::info!("Review {} edited", review_id);

        Ok(())
    }

    /// Remove a review for good
    pub async fn delete_review(&self, review_id: &str) -> Result<(), SupabaseError> {
        let response = self
            .authorized(self.client.delete(self.by_id_url("reviews", review_id)))
            .send()
            .await?;
        Self::check(response).await?;

        tracing::info!("Review {} deleted", review_id);

        Ok(())
    }

    /// Approve, suspend or block a listing
    pub async fn update_listing_status(
        &self,
        category: ServiceCategory,
        provider_id: &str,
        status: ListingStatus,
    ) -> Result<(), SupabaseError> {
        self.patch_by_id(category.table(), provider_id, &json!({ "status": status.as_str() }))
            .await?;

        tracing::info!("Listing {} in {} marked {}", provider_id, category.table(), status.as_str());

        Ok(())
    }

    /// Flip a provider's online / currently-open flag
    pub async fn set_available(
        &self,
        category: ServiceCategory,
        provider_id: &str,
        available: bool,
    ) -> Result<(), SupabaseError> {
        self.patch_by_id(category.table(), provider_id, &json!({ "is_online": available }))
            .await?;

        tracing::debug!("Listing {} in {} available={}", provider_id, category.table(), available);

        Ok(())
    }
}
