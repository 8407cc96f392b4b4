//! Suggested-price derivation over the aggregation/analytics evidence.

use serde::Serialize;

use crate::aggregator::Aggregator;
use crate::analytics::{analyze, AnalyticsSnapshot};
use crate::error::ScoutError;
use crate::models::AggregatedResult;

/// A single price suggestion with its confidence and supporting reasoning.
///
/// `suggested_price` is a positive amount whenever any priced evidence
/// exists; it is `None` only for the no-data outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub suggested_price: Option<f64>,
    /// In `[0, 1]`.
    pub confidence: f64,
    pub reasoning: String,
}

/// Full response of the analyze entry point.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub similar_items: AggregatedResult,
    pub metrics: Option<AnalyticsSnapshot>,
    pub recommendations: Recommendation,
}

/// Pluggable confidence/reasoning derivation over an analytics snapshot.
pub trait ScoringStrategy: Send + Sync {
    fn score(&self, metrics: Option<&AnalyticsSnapshot>) -> Recommendation;
}

/// Default scorer: anchor on the mean, then raise confidence for sample
/// size, price consistency, and clustering.
pub struct HeuristicScorer;

impl ScoringStrategy for HeuristicScorer {
    fn score(&self, metrics: Option<&AnalyticsSnapshot>) -> Recommendation {
        let Some(metrics) = metrics else {
            return Recommendation {
                suggested_price: None,
                confidence: 0.0,
                reasoning: "Insufficient data for price analysis".to_string(),
            };
        };

        let summary = &metrics.summary;
        let mut confidence: f64 = 0.5;
        let mut reasoning = vec![format!(
            "Based on {} comparable listings across {} marketplaces",
            summary.count,
            metrics.platform_stats.len()
        )];

        if summary.count >= 10 {
            confidence += 0.2;
            reasoning.push("Good sample size of similar items".to_string());
        }

        if summary.mean > 0.0 && summary.standard_deviation / summary.mean < 0.2 {
            confidence += 0.2;
            reasoning.push("Consistent pricing across listings".to_string());
        }

        // First bucket wins ties.
        let densest = metrics
            .distribution
            .iter()
            .reduce(|prev, curr| if curr.count > prev.count { curr } else { prev });
        if let Some(bucket) = densest {
            if bucket.count as f64 / summary.count as f64 > 0.4 {
                confidence += 0.1;
                reasoning.push(format!("Strong price clustering around {}", bucket.range));
            }
        }

        Recommendation {
            suggested_price: Some((summary.mean * 100.0).round() / 100.0),
            confidence: confidence.min(1.0),
            reasoning: reasoning.join(". "),
        }
    }
}

/// Price recommendation service over the aggregation pipeline.
pub struct Recommender {
    aggregator: Aggregator,
    scorer: Box<dyn ScoringStrategy>,
}

impl Recommender {
    pub fn new(aggregator: Aggregator) -> Self {
        Self::with_scorer(aggregator, Box::new(HeuristicScorer))
    }

    pub fn with_scorer(aggregator: Aggregator, scorer: Box<dyn ScoringStrategy>) -> Self {
        Self { aggregator, scorer }
    }

    /// Gather evidence for a query and/or image and derive a price point.
    ///
    /// At least one input is required. Image similarity search is an
    /// external collaborator: an image-only request is accepted but yields
    /// the no-data recommendation until a query accompanies it.
    pub async fn analyze(
        &self,
        query: Option<&str>,
        image: Option<&[u8]>,
    ) -> Result<AnalysisReport, ScoutError> {
        let query = query.filter(|q| !q.trim().is_empty());
        if query.is_none() && image.is_none() {
            return Err(ScoutError::InvalidRequest);
        }

        let similar_items = match query {
            Some(q) => self.aggregator.search(q).await,
            None => AggregatedResult::new(),
        };

        let metrics = analyze(&similar_items);
        let recommendations = self.scorer.score(metrics.as_ref());

        Ok(AnalysisReport { similar_items, metrics, recommendations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Listing, Platform};

    fn priced_results(prices: &[&str]) -> AggregatedResult {
        let mut results = AggregatedResult::new();
        results.insert(
            Platform::Ebay,
            prices
                .iter()
                .enumerate()
                .map(|(i, p)| Listing {
                    title: format!("comp {i}"),
                    price: p.to_string(),
                    image_url: None,
                    listing_url: format!("https://www.ebay.com/itm/{i}"),
                    condition: None,
                    seller: None,
                    platform: Platform::Ebay,
                })
                .collect(),
        );
        results
    }

    #[test]
    fn no_metrics_scores_zero_confidence() {
        let rec = HeuristicScorer.score(None);
        assert_eq!(rec.suggested_price, None);
        assert_eq!(rec.confidence, 0.0);
        assert!(!rec.reasoning.is_empty());
    }

    #[test]
    fn consistent_sample_raises_confidence() {
        // 12 tightly clustered prices: sample-size, consistency, and
        // clustering boosts all apply on top of the 0.5 base.
        let prices = ["50"; 6].iter().chain(["52", "51", "49", "50", "48", "53"].iter())
            .copied()
            .collect::<Vec<_>>();
        let metrics = analyze(&priced_results(&prices)).unwrap();
        let rec = HeuristicScorer.score(Some(&metrics));

        let suggested = rec.suggested_price.unwrap();
        assert!(suggested > 0.0);
        assert!((0.9..=1.0).contains(&rec.confidence));
        assert!(rec.reasoning.contains("Good sample size"));
        assert!(rec.reasoning.contains("Consistent pricing"));
    }

    #[test]
    fn sparse_scattered_sample_keeps_base_confidence() {
        let metrics = analyze(&priced_results(&["5", "80", "300"])).unwrap();
        let rec = HeuristicScorer.score(Some(&metrics));
        assert_eq!(rec.confidence, 0.5);
        assert!(rec.reasoning.contains("3 comparable listings"));
    }

    #[test]
    fn suggested_price_rounds_to_cents() {
        let metrics = analyze(&priced_results(&["10", "10", "11"])).unwrap();
        let rec = HeuristicScorer.score(Some(&metrics));
        assert_eq!(rec.suggested_price, Some(10.33));
    }

    #[tokio::test]
    async fn rejects_requests_with_no_inputs() {
        let recommender = Recommender::new(Aggregator::with_scrapers(Vec::new()));
        let error = recommender.analyze(None, None).await.unwrap_err();
        assert!(matches!(error, ScoutError::InvalidRequest));

        let error = recommender.analyze(Some("   "), None).await.unwrap_err();
        assert!(matches!(error, ScoutError::InvalidRequest));
    }

    #[tokio::test]
    async fn image_only_requests_are_accepted() {
        let recommender = Recommender::new(Aggregator::with_scrapers(Vec::new()));
        let image: &[u8] = &[0xFF, 0xD8];
        let report = recommender.analyze(None, Some(image)).await.unwrap();
        assert!(report.similar_items.is_empty());
        assert_eq!(report.recommendations.confidence, 0.0);
    }
}
