use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Marketplace a listing was scraped from.
///
/// Declaration order is the configuration order: the aggregator fans out in
/// this order and `AggregatedResult` keys iterate in it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mercari,
    Poshmark,
    Ebay,
    Therealreal,
}

impl Platform {
    /// Every configured marketplace, in configuration order.
    pub const ALL: [Platform; 4] = [
        Platform::Mercari,
        Platform::Poshmark,
        Platform::Ebay,
        Platform::Therealreal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Mercari => "mercari",
            Platform::Poshmark => "poshmark",
            Platform::Ebay => "ebay",
            Platform::Therealreal => "therealreal",
        }
    }

    /// Canonical hostname, without the `www.` prefix.
    pub fn host(&self) -> &'static str {
        match self {
            Platform::Mercari => "mercari.com",
            Platform::Poshmark => "poshmark.com",
            Platform::Ebay => "ebay.com",
            Platform::Therealreal => "therealreal.com",
        }
    }

    /// Origin used to resolve relative listing URLs.
    pub fn base_url(&self) -> &'static str {
        match self {
            Platform::Mercari => "https://www.mercari.com",
            Platform::Poshmark => "https://poshmark.com",
            Platform::Ebay => "https://www.ebay.com",
            Platform::Therealreal => "https://www.therealreal.com",
        }
    }

    /// Resolve a page hostname to its marketplace, tolerating a leading
    /// `www.`. Unknown hosts are unconfigured, not an error.
    pub fn from_host(host: &str) -> Option<Platform> {
        let host = host.to_ascii_lowercase();
        let host = host.strip_prefix("www.").unwrap_or(&host);
        Platform::ALL.into_iter().find(|p| p.host() == host)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized marketplace search result.
///
/// `price` holds the currency-stripped numeric string as scraped; it parses
/// with [`parse_price`] or the record would have been dropped at extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub title: String,
    pub price: String,
    pub image_url: Option<String>,
    /// Absolute detail-page URL, resolved against the marketplace origin.
    pub listing_url: String,
    pub condition: Option<String>,
    pub seller: Option<String>,
    pub platform: Platform,
}

/// Per-platform listing map produced by one aggregation pass.
///
/// One entry per configured marketplace, present (possibly empty) even when
/// the adapter failed. Key order follows configuration order; listings keep
/// scrape order.
pub type AggregatedResult = BTreeMap<Platform, Vec<Listing>>;

/// Strip every character outside `[0-9.]` from a free-text price.
pub fn strip_price(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Parse a free-text price by stripping every character outside `[0-9.]`.
///
/// `"$1,234.56"` → `1234.56`. Returns `None` when nothing parsable remains;
/// a multi-dot residue like `"1.234.56"` counts as unparsable.
pub fn parse_price(raw: &str) -> Option<f64> {
    let value: f64 = strip_price(raw).parse().ok()?;
    if value.is_nan() {
        return None;
    }
    Some(value)
}
