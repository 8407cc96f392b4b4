//! CSS selectors and request templates for each marketplace.
//!
//! Marketplace search pages are an unstable external format; every selector
//! string lives here so markup drift is absorbed by this file alone. Update
//! a platform's `SelectorSet` when its parsing starts coming back empty.

use crate::models::Platform;

/// Field selectors for one marketplace's search-result page.
#[derive(Debug, Clone, Copy)]
pub struct SelectorSet {
    /// Result-list container. Missing container means a blocked or
    /// restructured page and yields zero listings.
    pub container: &'static str,
    /// One listing card within the container.
    pub card: &'static str,
    pub title: &'static str,
    pub price: &'static str,
    pub image: &'static str,
    /// Anchor carrying the detail-page href.
    pub link: &'static str,
    pub condition: Option<&'static str>,
    pub seller: Option<&'static str>,
}

impl Platform {
    pub fn selectors(&self) -> &'static SelectorSet {
        match self {
            Platform::Mercari => &MERCARI,
            Platform::Poshmark => &POSHMARK,
            Platform::Ebay => &EBAY,
            Platform::Therealreal => &THEREALREAL,
        }
    }

    /// Search URL for a query, URL-encoded into the platform's template.
    pub fn search_url(&self, query: &str) -> String {
        let q = urlencoding::encode(query);
        match self {
            Platform::Mercari => {
                format!("https://www.mercari.com/search/?keyword={q}")
            }
            Platform::Poshmark => {
                format!("https://poshmark.com/search?q={q}&type=listings&src=dir")
            }
            // Sold/completed filters keep the results usable as price comps.
            Platform::Ebay => {
                format!("https://www.ebay.com/sch/i.html?_nkw={q}&LH_Sold=1&LH_Complete=1")
            }
            Platform::Therealreal => {
                format!("https://www.therealreal.com/search?q={q}")
            }
        }
    }

    /// Placeholder session cookie to appear more like a returning browser.
    pub fn session_cookie(&self) -> Option<&'static str> {
        match self {
            Platform::Mercari => Some("mercari_session=scout_session"),
            Platform::Poshmark => Some("_posh_id=scout_visitor"),
            Platform::Ebay => None,
            Platform::Therealreal => Some("visitor_id=scout_visitor"),
        }
    }
}

static MERCARI: SelectorSet = SelectorSet {
    container: "[data-testid=\"SearchResults\"]",
    card: "[data-testid=\"ItemContainer\"]",
    title: "[data-testid=\"ItemName\"]",
    price: "[data-testid=\"ItemPrice\"]",
    image: "img",
    link: "a",
    condition: Some("[data-testid=\"ItemCondition\"]"),
    seller: None,
};

static POSHMARK: SelectorSet = SelectorSet {
    container: ".tile-container",
    card: ".card",
    title: ".title",
    price: ".price",
    image: "img",
    link: "a",
    condition: Some(".condition"),
    seller: Some(".seller"),
};

static EBAY: SelectorSet = SelectorSet {
    container: ".srp-results",
    card: ".s-item__wrapper",
    title: ".s-item__title",
    price: ".s-item__price",
    image: ".s-item__image-img",
    link: ".s-item__link",
    condition: Some(".s-item__condition"),
    seller: Some(".s-item__seller-info"),
};

static THEREALREAL: SelectorSet = SelectorSet {
    container: ".product-grid",
    card: ".product-card",
    title: ".product-card__title",
    price: ".product-card__price",
    image: ".product-card__image img",
    link: "a",
    condition: None,
    seller: None,
};
