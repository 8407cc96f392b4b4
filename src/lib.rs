pub mod aggregator;
pub mod analytics;
pub mod config;
pub mod error;
pub mod models;
pub mod recommend;
pub mod scrapers;

pub use aggregator::Aggregator;
pub use analytics::{analyze, AnalyticsSnapshot};
pub use config::Config;
pub use error::ScoutError;
pub use models::{AggregatedResult, Listing, Platform};
pub use recommend::{Recommendation, Recommender};
