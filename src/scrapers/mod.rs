pub mod browser;
pub mod extract;
pub mod http;
pub mod selectors;
pub mod throttle;
pub mod traits;

pub use browser::BrowserExtractor;
pub use http::HttpScraper;
pub use throttle::Throttle;
pub use traits::MarketScraper;
