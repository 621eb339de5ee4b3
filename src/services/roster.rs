use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::models::{ListingStatus, ProviderRecord, ServiceCategory};
use crate::services::supabase::{SupabaseClient, SupabaseError};

/// Errors that can occur while loading a roster
#[derive(Debug, Error)]
pub enum RosterError {
    /// Shared by every caller that waited on the same failed fetch
    #[error("Upstream error: {0}")]
    Upstream(#[from] Arc<SupabaseError>),
}

impl From<SupabaseError> for RosterError {
    fn from(err: SupabaseError) -> Self {
        RosterError::Upstream(Arc::new(err))
    }
}

/// Roster snapshot cache
///
/// Keeps one immutable snapshot per service category for a fixed TTL, so
/// repeated filter passes over the same roster do not hit the database.
/// Listing writes made through the cache drop the affected snapshot.
pub struct RosterCache {
    source: Arc<SupabaseClient>,
    snapshots: moka::future::Cache<ServiceCategory, Arc<Vec<ProviderRecord>>>,
}

impl RosterCache {
    /// Create a new roster cache in front of the given client
    pub fn new(source: Arc<SupabaseClient>, ttl_secs: u64) -> Self {
        let snapshots = moka::future::CacheBuilder::new(2)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { source, snapshots }
    }

    /// Get the roster snapshot for a category, fetching it on a miss
    ///
    /// Concurrent misses for the same category wait on a single fetch.
    /// A failed fetch is not cached.
    pub async fn roster(&self, category: ServiceCategory) -> Result<Arc<Vec<ProviderRecord>>, RosterError> {
        let source = Arc::clone(&self.source);
        let snapshot = self
            .snapshots
            .try_get_with(category, async move {
                tracing::trace!("Roster cache miss: {}", category.as_str());
                let providers = source.fetch_roster(category).await?;
                tracing::debug!("Cached {} {} providers", providers.len(), category.as_str());
                Ok::<_, SupabaseError>(Arc::new(providers))
            })
            .await?;

        Ok(snapshot)
    }

    /// Drop the cached snapshot for a category, e.g. after a listing changed
    pub async fn invalidate(&self, category: ServiceCategory) {
        self.snapshots.invalidate(&category).await;
        tracing::debug!("Invalidated roster: {}", category.as_str());
    }

    /// Change a listing's moderation status and drop the stale snapshot
    pub async fn update_listing_status(
        &self,
        category: ServiceCategory,
        provider_id: &str,
        status: ListingStatus,
    ) -> Result<(), RosterError> {
        self.source.update_listing_status(category, provider_id, status).await?;
        self.invalidate(category).await;
        Ok(())
    }

    /// Change a listing's availability flag and drop the stale snapshot
    pub async fn set_available(
        &self,
        category: ServiceCategory,
        provider_id: &str,
        available: bool,
    ) -> Result<(), RosterError> {
        self.source.set_available(category, provider_id, available).await?;
        self.invalidate(category).await;
        Ok(())
    }

    /// Number of cached snapshots
    pub fn cached_rosters(&self) -> u64 {
        self.snapshots.entry_count()
    }
}
