//! HTML parser for Amazon product pages and reviews pages.

use crate::amazon::models::ReviewPage;
use crate::amazon::selectors::{errors, product, reviews};
use crate::amazon::urls;
use crate::error::CounterError;
use anyhow::Result;
use scraper::{ElementRef, Html};
use tracing::{debug, trace};
use url::Url;

/// Parser for Amazon HTML pages, extracting one review attribute (e.g. `Color`).
pub struct Parser {
    attribute: String,
    label: String,
}

impl Parser {
    /// Creates a parser extracting `attribute`. A trailing colon is ignored,
    /// so `Color` and `Color:` are equivalent.
    pub fn new(attribute: &str) -> Self {
        let attribute = attribute.trim().trim_end_matches(':').trim_end().to_string();
        let label = format!("{}:", attribute);
        Self { attribute, label }
    }

    /// Returns the attribute name this parser extracts.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Finds the reviews-listing link on a product page and returns the
    /// reviews URL derived from it.
    pub fn parse_reviews_url(&self, html: &str, product_url: &Url) -> Result<Url> {
        let document = Html::parse_document(html);

        self.check_for_errors(&document)?;

        let href = document
            .select(&product::SEE_ALL_REVIEWS)
            .find_map(|e| e.value().attr("href"))
            .ok_or(CounterError::InvalidProductPage)?;

        debug!("Found reviews link: {}", href);
        urls::reviews_url(product_url, href)
    }

    /// Parses a reviews page: attribute values, last page number and next link.
    pub fn parse_reviews_page(&self, html: &str) -> Result<ReviewPage> {
        let document = Html::parse_document(html);

        self.check_for_errors(&document)?;

        let mut blocks = 0;
        let mut attributes = Vec::new();
        for element in document.select(&reviews::METADATA) {
            blocks += 1;
            match self.extract_attribute(element) {
                Some(value) => {
                    trace!("{} {}", self.label, value);
                    attributes.push(value);
                }
                None => trace!("Skipping metadata block without '{}'", self.label),
            }
        }
        debug!("{} of {} metadata blocks carry '{}'", attributes.len(), blocks, self.label);

        Ok(ReviewPage {
            attributes,
            last_page: self.parse_last_page(&document)?,
            has_next: document.select(&reviews::NEXT_PAGE).next().is_some(),
        })
    }

    /// Extracts the attribute value from a metadata block.
    ///
    /// Each text line is trimmed; the remainder after the label on a
    /// matching line is the value. The last matching line wins.
    fn extract_attribute(&self, element: ElementRef) -> Option<String> {
        element
            .text()
            .flat_map(str::lines)
            .map(str::trim)
            .filter_map(|line| line.strip_prefix(self.label.as_str()))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .last()
            .map(String::from)
    }

    /// Reads the last page number from the pagination list.
    ///
    /// The list reads `Previous, 1, 2, ..., N, Next`, so `N` is the
    /// second-to-last item. Falls back to the largest numeric item.
    fn parse_last_page(&self, document: &Html) -> Result<Option<u32>> {
        let Some(pagination) = document.select(&reviews::PAGINATION).next() else {
            return Ok(None);
        };

        let items: Vec<String> = pagination
            .select(&reviews::PAGINATION_ITEM)
            .map(|li| li.text().collect::<String>().trim().to_string())
            .collect();

        if items.len() >= 2 {
            if let Some(last) = Self::parse_page_number(&items[items.len() - 2]) {
                return Ok(Some(last));
            }
        }

        items
            .iter()
            .filter_map(|item| Self::parse_page_number(item))
            .max()
            .map(Some)
            .ok_or_else(|| CounterError::Pagination.into())
    }

    /// Parses a page number such as `12` or `1,024`.
    fn parse_page_number(text: &str) -> Option<u32> {
        let digits: String = text.chars().filter(|c| !matches!(c, ',' | '.' | ' ')).collect();
        digits.parse().ok().filter(|n| *n > 0)
    }

    /// Checks for CAPTCHA or error pages.
    fn check_for_errors(&self, document: &Html) -> Result<()> {
        if document.select(&errors::CAPTCHA).next().is_some() {
            return Err(CounterError::Blocked(
                "CAPTCHA detected. Amazon is blocking requests. \
                 Try using a proxy or waiting before retrying.",
            )
            .into());
        }

        if document.select(&errors::DOG_PAGE).next().is_some() {
            return Err(CounterError::Blocked(
                "Amazon error page detected (503). \
                 The service may be temporarily unavailable.",
            )
            .into());
        }

        Ok(())
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new("Color")
    }
}
