//! Selector-driven listing extraction.
//!
//! Shared by the HTTP fetch path and the live-DOM browser path: both hand a
//! rendered HTML document to [`extract_listings`] and get back normalized
//! [`Listing`] records. A card missing its title or a parsable price is
//! skipped; a malformed card never aborts the rest of the page.

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::models::{strip_price, Listing, Platform};
use crate::scrapers::selectors::SelectorSet;

/// Extract up to `max` listings from a marketplace search-result page.
///
/// The cap applies to cards visited, before field extraction. An absent
/// result container (blocked page, markup drift) yields an empty vec.
pub fn extract_listings(html: &str, platform: Platform, max: usize) -> Vec<Listing> {
    let document = Html::parse_document(html);
    let set = platform.selectors();

    let container_selector = Selector::parse(set.container).unwrap();
    let Some(container) = document.select(&container_selector).next() else {
        debug!(%platform, "result container not found");
        return Vec::new();
    };

    let card_selector = Selector::parse(set.card).unwrap();
    let origin = Url::parse(platform.base_url()).unwrap();

    let mut listings = Vec::new();
    for card in container.select(&card_selector).take(max) {
        if let Some(listing) = extract_card(&card, set, platform, &origin) {
            listings.push(listing);
        }
    }

    debug!(%platform, count = listings.len(), "extracted listings");
    listings
}

/// DOM-variant entry: resolve the marketplace from a page hostname
/// (tolerating `www.`) and extract with its selector set. An unconfigured
/// host yields an empty vec, not an error.
pub fn extract_for_host(html: &str, host: &str, max: usize) -> Vec<Listing> {
    match Platform::from_host(host) {
        Some(platform) => extract_listings(html, platform, max),
        None => {
            debug!(host, "unconfigured marketplace host");
            Vec::new()
        }
    }
}

fn extract_card(
    card: &ElementRef,
    set: &SelectorSet,
    platform: Platform,
    origin: &Url,
) -> Option<Listing> {
    let title = text_of(card, set.title)?;
    let price = strip_price(&text_of(card, set.price)?);
    // An unparsable price drops the card.
    price.parse::<f64>().ok()?;

    let href = attr_of(card, set.link, "href")?;
    let listing_url = origin.join(&href).ok()?.to_string();

    Some(Listing {
        title,
        price,
        image_url: attr_of(card, set.image, "src"),
        listing_url,
        condition: set.condition.and_then(|s| text_of(card, s)),
        seller: set.seller.and_then(|s| text_of(card, s)),
        platform,
    })
}

fn text_of(card: &ElementRef, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    let element = card.select(&selector).next()?;
    let text = element.text().collect::<String>().trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn attr_of(card: &ElementRef, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    card.select(&selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}
