//! Reviews-listing URL derivation and page addressing.

use crate::error::CounterError;
use anyhow::Result;
use url::Url;

/// Query parameter selecting which reviewers are listed.
const REVIEWER_TYPE: &str = "reviewerType";

/// Query parameter selecting the reviews page.
const PAGE_NUMBER: &str = "pageNumber";

/// Parses and validates a product page URL given on the command line.
pub fn parse_product_url(input: &str) -> Result<Url> {
    let input = input.trim();
    let url = Url::parse(input).map_err(|e| CounterError::InvalidUrl {
        url: input.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(CounterError::InvalidUrl {
            url: input.to_string(),
            reason: "expected an http(s) URL with a host".to_string(),
        }
        .into());
    }

    Ok(url)
}

/// Builds the reviews-listing URL from the product URL and the `href` of
/// its "see all reviews" link.
///
/// Scheme, host and port come from `product_url`; path, query and fragment
/// come from `href`. `reviewerType` is forced to `all_reviews`.
pub fn reviews_url(product_url: &Url, href: &str) -> Result<Url> {
    let link = product_url.join(href.trim()).map_err(|e| CounterError::InvalidUrl {
        url: href.to_string(),
        reason: e.to_string(),
    })?;

    let mut pairs: Vec<(String, String)> =
        link.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();

    match pairs.iter_mut().find(|(k, _)| k == REVIEWER_TYPE) {
        Some((_, value)) => *value = "all_reviews".to_string(),
        None => pairs.push((REVIEWER_TYPE.to_string(), "all_reviews".to_string())),
    }
    // Exactly one reviewerType.
    let mut seen = false;
    pairs.retain(|(k, _)| {
        if k != REVIEWER_TYPE {
            return true;
        }
        !std::mem::replace(&mut seen, true)
    });

    let mut url = product_url.clone();
    url.set_path(link.path());
    url.query_pairs_mut().clear().extend_pairs(pairs.iter());
    url.set_fragment(link.fragment());

    Ok(url)
}

/// Returns the URL of reviews page `page` (1-based).
pub fn page_url(reviews_url: &Url, page: u32) -> Url {
    let pairs: Vec<(String, String)> = reviews_url
        .query_pairs()
        .filter(|(k, _)| k != PAGE_NUMBER)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut url = reviews_url.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs.iter())
        .append_pair(PAGE_NUMBER, &page.to_string());
    url
}
