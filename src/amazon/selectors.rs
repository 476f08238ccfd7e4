//! CSS selectors for Amazon HTML parsing.
//!
//! This file contains all CSS selectors used for parsing product and review pages.
//! Update this file when Amazon changes their HTML structure.
//!
//! **Update process**: When parsing fails, capture HTML sample,
//! update selectors, and add test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for the product detail page.
pub mod product {
    use super::*;

    /// "See all reviews" link leading to the reviews listing.
    pub static SEE_ALL_REVIEWS: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "a#dp-summary-see-all-reviews, \
             a[data-hook='see-all-reviews-link-foot']",
        )
        .unwrap()
    });
}

/// Selectors for the paginated reviews listing.
pub mod reviews {
    use super::*;

    /// Review metadata line ("format strip") holding the purchased variant.
    pub static METADATA: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".a-size-mini.a-link-normal.a-color-secondary, \
             a[data-hook='format-strip']",
        )
        .unwrap()
    });

    /// Pagination list.
    pub static PAGINATION: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("ul.a-pagination").unwrap());

    /// Items of the pagination list (Previous, 1, 2, ..., N, Next).
    pub static PAGINATION_ITEM: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("li").unwrap());

    /// Enabled "Next page" link. Disabled on the last page (`li.a-disabled.a-last`).
    pub static NEXT_PAGE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("ul.a-pagination li.a-last a").unwrap());
}

/// Selectors for detecting error/captcha pages.
pub mod errors {
    use super::*;

    /// CAPTCHA form.
    pub static CAPTCHA: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "form[action*='validateCaptcha'], \
             img[src*='captcha']",
        )
        .unwrap()
    });

    /// Dog page (Amazon's error page). Matched by its links only: product
    /// images carry the product title as alt text, which may mention dogs.
    pub static DOG_PAGE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "a[href='/ref=cs_503_link'], \
             a[href='/ref=cs_503_logo'], \
             a[href='/dogsofamazon']",
        )
        .unwrap()
    });
}
