use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions};
use reqwest::Url;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::models::Listing;
use crate::scrapers::extract;

/// Live-DOM extraction using headless Chrome.
///
/// Alternate transport for the same extractor contract as the HTTP path:
/// marketplaces that render their result grid client-side are loaded in a
/// real browser, then the rendered document feeds the selector-driven
/// extraction. Produces the same `Listing` shape.
pub struct BrowserExtractor {
    browser: Browser,
    max_listings: usize,
}

impl BrowserExtractor {
    pub fn new(max_listings: usize) -> Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;

        Ok(Self { browser, max_listings })
    }

    /// Load a marketplace search page and extract its rendered listings.
    ///
    /// The marketplace is resolved from the URL's hostname; an unconfigured
    /// host yields an empty vec.
    pub fn extract_from_url(&self, url: &str) -> Result<Vec<Listing>> {
        let parsed = Url::parse(url).context("Invalid page URL")?;
        let host = parsed
            .host_str()
            .context("Page URL has no hostname")?
            .to_string();

        debug!(%url, "opening search page");
        let tab = self.browser.new_tab()?;
        tab.navigate_to(url)?;
        tab.wait_until_navigated()?;

        // Client-rendered grids keep filling in after navigation settles.
        thread::sleep(Duration::from_secs(3));

        let html_result = tab.evaluate("document.documentElement.outerHTML", false)?;
        let html = match html_result.value {
            Some(value) => value.as_str().unwrap_or("").to_string(),
            None => {
                warn!("Could not get HTML from page");
                String::new()
            }
        };

        if html.is_empty() {
            warn!(%host, "rendered page is empty");
            return Ok(Vec::new());
        }

        let listings = extract::extract_for_host(&html, &host, self.max_listings);
        info!(%host, count = listings.len(), "extracted listings from rendered page");
        Ok(listings)
    }
}
