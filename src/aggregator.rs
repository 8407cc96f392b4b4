//! Query fan-out across every configured marketplace.

use anyhow::Result;
use futures::future::join_all;
use tracing::info;

use crate::config::Config;
use crate::models::{AggregatedResult, Platform};
use crate::scrapers::{HttpScraper, MarketScraper};

/// Dispatches one query to all configured scrapers concurrently and merges
/// their results into a per-platform map.
///
/// Scrapers run independently: a blocked or failing marketplace contributes
/// an empty entry and never affects the others. The result always carries
/// one key per configured scraper, in configuration order.
pub struct Aggregator {
    scrapers: Vec<Box<dyn MarketScraper>>,
}

impl Aggregator {
    /// One HTTP adapter per marketplace, in configuration order.
    pub fn new(config: &Config) -> Result<Self> {
        let mut scrapers: Vec<Box<dyn MarketScraper>> = Vec::new();
        for platform in Platform::ALL {
            scrapers.push(Box::new(HttpScraper::with_settings(
                platform,
                config.fetch_timeout,
                config.throttle(),
                config.max_listings,
            )?));
        }
        Ok(Self { scrapers })
    }

    /// Build from an explicit scraper set (alternate transports, tests).
    pub fn with_scrapers(scrapers: Vec<Box<dyn MarketScraper>>) -> Self {
        Self { scrapers }
    }

    pub async fn search(&self, query: &str) -> AggregatedResult {
        info!(%query, scrapers = self.scrapers.len(), "starting marketplace search");

        let searches = self.scrapers.iter().map(|scraper| scraper.search(query));
        let batches = join_all(searches).await;

        let mut results = AggregatedResult::new();
        for (scraper, listings) in self.scrapers.iter().zip(batches) {
            results.insert(scraper.platform(), listings);
        }

        let total: usize = results.values().map(Vec::len).sum();
        info!(%query, total, "marketplace search complete");
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Listing;
    use async_trait::async_trait;

    struct StubScraper {
        platform: Platform,
        outcome: Result<Vec<Listing>, String>,
    }

    impl StubScraper {
        fn with_listings(platform: Platform, count: usize) -> Box<Self> {
            let listings = (0..count)
                .map(|i| Listing {
                    title: format!("{platform} item {i}"),
                    price: format!("{}", 10 + i),
                    image_url: None,
                    listing_url: format!("{}/item/{i}", platform.base_url()),
                    condition: None,
                    seller: None,
                    platform,
                })
                .collect();
            Box::new(Self { platform, outcome: Ok(listings) })
        }

        fn blocked(platform: Platform) -> Box<Self> {
            Box::new(Self { platform, outcome: Err("403 Forbidden".to_string()) })
        }
    }

    #[async_trait]
    impl MarketScraper for StubScraper {
        fn platform(&self) -> Platform {
            self.platform
        }

        async fn try_search(&self, _query: &str) -> anyhow::Result<Vec<Listing>> {
            match &self.outcome {
                Ok(listings) => Ok(listings.clone()),
                Err(message) => anyhow::bail!("{message}"),
            }
        }
    }

    #[tokio::test]
    async fn failing_scraper_does_not_suppress_the_others() {
        let aggregator = Aggregator::with_scrapers(vec![
            StubScraper::with_listings(Platform::Mercari, 2),
            StubScraper::blocked(Platform::Poshmark),
            StubScraper::with_listings(Platform::Ebay, 3),
        ]);

        let results = aggregator.search("vintage denim").await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[&Platform::Mercari].len(), 2);
        assert_eq!(results[&Platform::Poshmark].len(), 0);
        assert_eq!(results[&Platform::Ebay].len(), 3);
    }

    #[tokio::test]
    async fn key_order_follows_configuration_order() {
        let aggregator = Aggregator::with_scrapers(vec![
            StubScraper::with_listings(Platform::Therealreal, 1),
            StubScraper::with_listings(Platform::Mercari, 1),
            StubScraper::with_listings(Platform::Poshmark, 1),
        ]);

        let results = aggregator.search("silk scarf").await;
        let keys: Vec<Platform> = results.keys().copied().collect();
        assert_eq!(keys, vec![Platform::Mercari, Platform::Poshmark, Platform::Therealreal]);
    }
}
