use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use tracing::debug;

use crate::models::{Listing, Platform};
use crate::scrapers::extract;
use crate::scrapers::throttle::Throttle;
use crate::scrapers::traits::MarketScraper;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTP search adapter, one instance per marketplace.
///
/// The marketplace tag picks the search-URL template, selector set, and
/// placeholder cookie; the fetch/extract pipeline is shared.
pub struct HttpScraper {
    platform: Platform,
    client: Client,
    throttle: Throttle,
    max_listings: usize,
}

impl HttpScraper {
    pub fn new(platform: Platform) -> Result<Self> {
        Self::with_settings(platform, Duration::from_secs(10), Throttle::default_window(), 10)
    }

    pub fn with_settings(
        platform: Platform,
        timeout: Duration,
        throttle: Throttle,
        max_listings: usize,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(browser_headers())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { platform, client, throttle, max_listings })
    }
}

#[async_trait]
impl MarketScraper for HttpScraper {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn try_search(&self, query: &str) -> Result<Vec<Listing>> {
        self.throttle.wait().await;

        let url = self.platform.search_url(query);
        debug!(%url, "fetching search page");

        let mut request = self.client.get(&url);
        if let Some(cookie) = self.platform.session_cookie() {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to fetch {} search page", self.platform))?;

        if !response.status().is_success() {
            anyhow::bail!("{} returned status {}", self.platform, response.status());
        }

        let html = response
            .text()
            .await
            .context("Failed to read response body")?;
        debug!(bytes = html.len(), "downloaded search page");

        let mut listings = extract::extract_listings(&html, self.platform, self.max_listings);
        if self.platform == Platform::Ebay {
            listings.retain(|l| !is_placeholder_title(&l.title));
        }

        Ok(listings)
    }
}

/// eBay pads result pages with a "Shop on eBay" pseudo-card.
fn is_placeholder_title(title: &str) -> bool {
    title == "Shop on eBay"
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers
}
