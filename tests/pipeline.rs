//! End-to-end aggregation and analytics over stubbed marketplace adapters.

use async_trait::async_trait;

use market_scout::analytics::analyze;
use market_scout::models::{Listing, Platform};
use market_scout::scrapers::MarketScraper;
use market_scout::Aggregator;

struct StubScraper {
    platform: Platform,
    listings: anyhow::Result<Vec<Listing>>,
}

fn listings_for(platform: Platform, prices: &[&str]) -> anyhow::Result<Vec<Listing>> {
    Ok(prices
        .iter()
        .enumerate()
        .map(|(i, price)| Listing {
            title: format!("{platform} fleece {i}"),
            price: price.to_string(),
            image_url: Some(format!("{}/img/{i}.jpg", platform.base_url())),
            listing_url: format!("{}/item/{i}", platform.base_url()),
            condition: Some("Good".to_string()),
            seller: None,
            platform,
        })
        .collect())
}

#[async_trait]
impl MarketScraper for StubScraper {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn try_search(&self, _query: &str) -> anyhow::Result<Vec<Listing>> {
        match &self.listings {
            Ok(listings) => Ok(listings.clone()),
            Err(_) => anyhow::bail!("request timed out"),
        }
    }
}

#[tokio::test]
async fn blocked_platform_stays_in_results_but_not_in_stats() {
    // Three platforms: 5 listings, blocked, 3 listings.
    let aggregator = Aggregator::with_scrapers(vec![
        Box::new(StubScraper {
            platform: Platform::Mercari,
            listings: listings_for(Platform::Mercari, &["25", "30", "28", "40", "22"]),
        }),
        Box::new(StubScraper {
            platform: Platform::Poshmark,
            listings: Err(anyhow::anyhow!("blocked")),
        }),
        Box::new(StubScraper {
            platform: Platform::Ebay,
            listings: listings_for(Platform::Ebay, &["35", "27", "31"]),
        }),
    ]);

    let results = aggregator.search("Nike Tech Fleece").await;

    // Every configured platform keeps its key, including the blocked one.
    assert_eq!(results.len(), 3);
    assert_eq!(results[&Platform::Mercari].len(), 5);
    assert_eq!(results[&Platform::Poshmark].len(), 0);
    assert_eq!(results[&Platform::Ebay].len(), 3);

    let snapshot = analyze(&results).expect("eight priced listings");
    assert_eq!(snapshot.summary.count, 8);

    // The blocked platform is excluded from per-platform stats.
    assert_eq!(snapshot.platform_stats.len(), 2);
    let platforms: Vec<Platform> = snapshot.platform_stats.iter().map(|s| s.platform).collect();
    assert_eq!(platforms, vec![Platform::Mercari, Platform::Ebay]);

    assert_eq!(snapshot.distribution.len(), 10);
}

#[tokio::test]
async fn listings_keep_scrape_order_within_a_platform() {
    let aggregator = Aggregator::with_scrapers(vec![Box::new(StubScraper {
        platform: Platform::Therealreal,
        listings: listings_for(Platform::Therealreal, &["90", "10", "55"]),
    })]);

    let results = aggregator.search("silk scarf").await;
    let prices: Vec<&str> = results[&Platform::Therealreal]
        .iter()
        .map(|l| l.price.as_str())
        .collect();
    assert_eq!(prices, vec!["90", "10", "55"]);
}

#[tokio::test]
async fn listing_wire_shape_is_stable() {
    let aggregator = Aggregator::with_scrapers(vec![Box::new(StubScraper {
        platform: Platform::Poshmark,
        listings: listings_for(Platform::Poshmark, &["45.50"]),
    })]);

    let results = aggregator.search("hoodie").await;
    let value = serde_json::to_value(&results).unwrap();
    let listing = &value["poshmark"][0];

    for key in ["title", "price", "imageUrl", "listingUrl", "condition", "seller", "platform"] {
        assert!(listing.get(key).is_some(), "missing wire field {key}");
    }
    assert_eq!(listing["price"], "45.50");
    assert_eq!(listing["platform"], "poshmark");
}
