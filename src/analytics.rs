//! Price statistics over an aggregated listing set.
//!
//! [`analyze`] is a pure function of its input: no clock, no randomness,
//! identical input produces an identical snapshot. Zero parsable prices is
//! a normal no-data outcome (`None`), not an error.

use serde::Serialize;

use crate::models::{parse_price, AggregatedResult, Listing, Platform};

const HISTOGRAM_BUCKETS: usize = 10;
const OUTLIER_SIGMA: f64 = 2.0;
const DEAL_MEDIAN_FRACTION: f64 = 0.8;

/// Descriptive statistics over every parsable price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    /// Population standard deviation.
    pub standard_deviation: f64,
}

/// One of ten equal-width price buckets spanning `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBucket {
    /// Rounded integer bounds, e.g. `"$40-55"`.
    pub range: String,
    pub count: usize,
}

/// Per-marketplace price comparison. Platforms without a single parsable
/// price are omitted entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub platform: Platform,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// A listing paired with its parsed price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedListing {
    #[serde(flatten)]
    pub listing: Listing,
    pub numeric_price: f64,
}

/// Derived statistical summary, recomputed on every aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub summary: PriceSummary,
    pub distribution: Vec<HistogramBucket>,
    pub platform_stats: Vec<PlatformStats>,
    /// Listings more than 2σ from the mean, in scan order.
    pub outliers: Vec<PricedListing>,
    /// Listings priced below 80% of the median, ascending by price.
    pub potential_deals: Vec<PricedListing>,
}

/// Compute the analytics snapshot for one aggregation pass.
pub fn analyze(results: &AggregatedResult) -> Option<AnalyticsSnapshot> {
    // Scan order: platforms in configuration order, listings in scrape order.
    let priced: Vec<PricedListing> = results
        .values()
        .flatten()
        .filter_map(|listing| {
            parse_price(&listing.price).map(|numeric_price| PricedListing {
                listing: listing.clone(),
                numeric_price,
            })
        })
        .collect();

    if priced.is_empty() {
        return None;
    }

    let mut sorted: Vec<f64> = priced.iter().map(|p| p.numeric_price).collect();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };
    let min = sorted[0];
    let max = sorted[count - 1];
    let standard_deviation =
        (sorted.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / count as f64).sqrt();

    let outliers = priced
        .iter()
        .filter(|p| (p.numeric_price - mean).abs() > OUTLIER_SIGMA * standard_deviation)
        .cloned()
        .collect();

    let mut potential_deals: Vec<PricedListing> = priced
        .iter()
        .filter(|p| p.numeric_price < median * DEAL_MEDIAN_FRACTION)
        .cloned()
        .collect();
    potential_deals.sort_by(|a, b| a.numeric_price.total_cmp(&b.numeric_price));

    Some(AnalyticsSnapshot {
        summary: PriceSummary { mean, median, min, max, count, standard_deviation },
        distribution: histogram(&sorted, min, max),
        platform_stats: platform_stats(results),
        outliers,
        potential_deals,
    })
}

/// Ten equal-width buckets over `[min, max]`; a price lands in bucket `i`
/// when it falls in the half-open `[min + i·w, min + (i+1)·w)`.
fn histogram(prices: &[f64], min: f64, max: f64) -> Vec<HistogramBucket> {
    let width = (max - min) / HISTOGRAM_BUCKETS as f64;
    (0..HISTOGRAM_BUCKETS)
        .map(|i| {
            let lo = min + i as f64 * width;
            let hi = lo + width;
            HistogramBucket {
                range: format!("${lo:.0}-{hi:.0}"),
                count: prices.iter().filter(|p| **p >= lo && **p < hi).count(),
            }
        })
        .collect()
}

fn platform_stats(results: &AggregatedResult) -> Vec<PlatformStats> {
    results
        .iter()
        .filter_map(|(platform, listings)| {
            let prices: Vec<f64> = listings
                .iter()
                .filter_map(|l| parse_price(&l.price))
                .collect();
            if prices.is_empty() {
                return None;
            }
            Some(PlatformStats {
                platform: *platform,
                average: prices.iter().sum::<f64>() / prices.len() as f64,
                min: prices.iter().copied().fold(f64::INFINITY, f64::min),
                max: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                count: prices.len(),
            })
        })
        .collect()
}
