use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::models::{Listing, Platform};

/// Common capability for all marketplace scrapers.
///
/// `search` is the aggregator-facing contract: it never fails. Fetch and
/// parse problems stay inside the adapter, logged and reported as an empty
/// listing set so one blocked marketplace cannot poison the batch.
#[async_trait]
pub trait MarketScraper: Send + Sync {
    /// Marketplace this adapter serves.
    fn platform(&self) -> Platform;

    /// Fallible inner search; adapters put their fetch/parse pipeline here.
    async fn try_search(&self, query: &str) -> Result<Vec<Listing>>;

    /// Infallible search used by the aggregator.
    async fn search(&self, query: &str) -> Vec<Listing> {
        match self.try_search(query).await {
            Ok(listings) => {
                info!(platform = %self.platform(), count = listings.len(), "search complete");
                listings
            }
            Err(error) => {
                warn!(platform = %self.platform(), %error, "search failed, returning no listings");
                Vec::new()
            }
        }
    }
}
