//! Color count command: walks a product's reviews and tallies the attribute.

use crate::amazon::{urls, AmazonClient, Parser, ReviewPage, ReviewSource};
use crate::config::{Config, Pagination};
use crate::format::Formatter;
use crate::tally::ColorTally;
use anyhow::{Context, Result};
use tracing::{debug, info};
use url::Url;

/// Counts reviews per attribute value for one product.
pub struct CountCommand {
    config: Config,
}

impl CountCommand {
    /// Creates a new count command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Counts the product's reviews and returns formatted output.
    pub async fn execute(&self, product_url: &str) -> Result<String> {
        let client =
            AmazonClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(&client, product_url).await
    }

    /// Counts and formats with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl ReviewSource,
        product_url: &str,
    ) -> Result<String> {
        let tally = self.count_with_client(client, product_url).await?;

        let parser = Parser::new(&self.config.attribute);
        let formatter = Formatter::new(self.config.format, parser.attribute());
        Ok(formatter.format_tally(&tally))
    }

    /// Runs the pipeline: product page, reviews URL, every reviews page.
    pub async fn count_with_client(
        &self,
        client: &impl ReviewSource,
        product_url: &str,
    ) -> Result<ColorTally> {
        let product_url = urls::parse_product_url(product_url)?;
        let parser = Parser::new(&self.config.attribute);

        info!("Fetching product page: {}", product_url);
        let html = client.fetch(&product_url).await?;
        let reviews_url = parser.parse_reviews_url(&html, &product_url)?;
        info!("Reviews listing: {}", reviews_url);

        let mut tally = ColorTally::new();

        let limit = self.config.page_limit.unwrap_or(u32::MAX);
        if limit == 0 {
            debug!("Page limit is 0, no reviews pages visited");
            return Ok(tally);
        }

        let first = self.fetch_page(client, &parser, &reviews_url, 1).await?;
        let last_page = first.last_page.unwrap_or(1);
        let mut has_next = first.has_next;
        tally.extend(first.attributes);

        match self.config.pagination {
            Pagination::LastPage => {
                let pages = last_page.min(limit);
                debug!("Last reviews page is {}, visiting {}", last_page, pages);

                for page in 2..=pages {
                    let review_page = self.fetch_page(client, &parser, &reviews_url, page).await?;
                    tally.extend(review_page.attributes);
                }
            }
            Pagination::NextLink => {
                let mut page = 1;
                while has_next && page < limit {
                    page += 1;
                    let review_page = self.fetch_page(client, &parser, &reviews_url, page).await?;
                    has_next = review_page.has_next;
                    tally.extend(review_page.attributes);
                }
                debug!("Stopped after page {}", page);
            }
        }

        info!(
            "Counted {} reviews across {} {} values",
            tally.total(),
            tally.len(),
            parser.attribute()
        );
        Ok(tally)
    }

    /// Fetches and parses one reviews page.
    async fn fetch_page(
        &self,
        client: &impl ReviewSource,
        parser: &Parser,
        reviews_url: &Url,
        page: u32,
    ) -> Result<ReviewPage> {
        if !self.config.quiet {
            eprintln!("Processing reviews page #{}", page);
        }

        let url = urls::page_url(reviews_url, page);
        let html = client.fetch(&url).await?;
        let review_page = parser
            .parse_reviews_page(&html)
            .with_context(|| format!("Failed to parse reviews page #{}", page))?;

        debug!("Page {}: {} reviews with '{}'", page, review_page.count(), parser.attribute());
        Ok(review_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CounterError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    const PRODUCT_URL: &str = "https://www.amazon.com/Some-Shirt/dp/B07XYZ1234";

    /// Mock client serving pages by `pageNumber`, recording every URL requested.
    struct MockReviewSource {
        product_html: String,
        pages: Vec<String>,
        requested: Mutex<Vec<String>>,
        fail_on_page: Option<u32>,
    }

    impl MockReviewSource {
        fn new(pages: Vec<String>) -> Self {
            Self {
                product_html: product_page("/product-reviews/B07XYZ1234?ie=UTF8"),
                pages,
                requested: Mutex::new(Vec::new()),
                fail_on_page: None,
            }
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReviewSource for MockReviewSource {
        async fn fetch(&self, url: &Url) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());

            let page = url
                .query_pairs()
                .find(|(k, _)| k == "pageNumber")
                .and_then(|(_, v)| v.parse::<u32>().ok());

            match page {
                None => Ok(self.product_html.clone()),
                Some(n) if Some(n) == self.fail_on_page => {
                    anyhow::bail!("Simulated network error")
                }
                Some(n) => Ok(self.pages.get(n as usize - 1).cloned().unwrap_or_default()),
            }
        }
    }

    fn product_page(href: &str) -> String {
        format!(r#"<html><body><a id="dp-summary-see-all-reviews" href="{}">See all</a></body></html>"#, href)
    }

    /// Builds a reviews page with the given colors and a pagination widget.
    fn reviews_page(colors: &[&str], page: u32, last: u32) -> String {
        let mut body = String::new();
        for color in colors {
            body.push_str(&format!(
                r#"<div data-hook="review"><a class="a-size-mini a-link-normal a-color-secondary">Size: M<i></i>Color: {}</a></div>"#,
                color
            ));
        }

        let next = if page < last {
            r#"<li class="a-last"><a href="?pageNumber=next">Next page</a></li>"#.to_string()
        } else {
            r#"<li class="a-disabled a-last">Next page</li>"#.to_string()
        };
        body.push_str(&format!(
            r#"<ul class="a-pagination"><li class="a-disabled">Previous page</li><li><a>1</a></li><li><a>{}</a></li>{}</ul>"#,
            last, next
        ));

        format!("<html><body>{}</body></html>", body)
    }

    fn make_test_config() -> Config {
        Config { quiet: true, ..Config::default() }
    }

    fn three_pages() -> Vec<String> {
        vec![
            reviews_page(&["Black", "Red", "Black"], 1, 3),
            reviews_page(&["Black", "Navy"], 2, 3),
            reviews_page(&["Red"], 3, 3),
        ]
    }

    #[tokio::test]
    async fn test_count_all_pages() {
        let client = MockReviewSource::new(three_pages());
        let cmd = CountCommand::new(make_test_config());

        let tally = cmd.count_with_client(&client, PRODUCT_URL).await.unwrap();
        assert_eq!(tally.get("Black"), 3);
        assert_eq!(tally.get("Red"), 2);
        assert_eq!(tally.get("Navy"), 1);
        assert_eq!(tally.total(), 6);

        // Product page once, then every reviews page once
        let requested = client.requested();
        assert_eq!(requested.len(), 4);
        assert_eq!(requested[0], PRODUCT_URL);
        assert_eq!(
            requested[1],
            "https://www.amazon.com/product-reviews/B07XYZ1234?ie=UTF8&reviewerType=all_reviews&pageNumber=1"
        );
        assert!(requested[3].ends_with("pageNumber=3"));
    }

    #[tokio::test]
    async fn test_page_limit_caps_last_page() {
        let client = MockReviewSource::new(three_pages());
        let config = Config { page_limit: Some(2), ..make_test_config() };
        let cmd = CountCommand::new(config);

        let tally = cmd.count_with_client(&client, PRODUCT_URL).await.unwrap();
        assert_eq!(tally.total(), 5);
        assert_eq!(client.requested().len(), 3);
    }

    #[tokio::test]
    async fn test_page_limit_zero_counts_nothing() {
        for pagination in [Pagination::LastPage, Pagination::NextLink] {
            let client = MockReviewSource::new(three_pages());
            let config = Config { page_limit: Some(0), pagination, ..make_test_config() };
            let cmd = CountCommand::new(config);

            let tally = cmd.count_with_client(&client, PRODUCT_URL).await.unwrap();
            assert!(tally.is_empty());
            // Only the product page is requested
            assert_eq!(client.requested(), vec![PRODUCT_URL.to_string()]);
        }
    }

    #[tokio::test]
    async fn test_page_limit_above_last_page() {
        let client = MockReviewSource::new(three_pages());
        let config = Config { page_limit: Some(50), ..make_test_config() };
        let cmd = CountCommand::new(config);

        let tally = cmd.count_with_client(&client, PRODUCT_URL).await.unwrap();
        assert_eq!(tally.total(), 6);
        assert_eq!(client.requested().len(), 4);
    }

    #[tokio::test]
    async fn test_single_page_without_pagination() {
        let page = r#"<html><body>
            <a class="a-size-mini a-link-normal a-color-secondary">Color: White</a>
        </body></html>"#;
        let client = MockReviewSource::new(vec![page.to_string()]);
        let cmd = CountCommand::new(make_test_config());

        let tally = cmd.count_with_client(&client, PRODUCT_URL).await.unwrap();
        assert_eq!(tally.get("White"), 1);
        assert_eq!(client.requested().len(), 2);
    }

    #[tokio::test]
    async fn test_next_link_pagination() {
        let client = MockReviewSource::new(three_pages());
        let config = Config { pagination: Pagination::NextLink, ..make_test_config() };
        let cmd = CountCommand::new(config);

        let tally = cmd.count_with_client(&client, PRODUCT_URL).await.unwrap();
        assert_eq!(tally.total(), 6);

        // Pages come from pageNumber, not from the link's "?pageNumber=next" href
        let requested = client.requested();
        assert_eq!(requested.len(), 4);
        assert!(requested[2].contains("pageNumber=2"));
        assert!(requested[3].contains("pageNumber=3"));
        assert!(requested.iter().all(|u| !u.contains("pageNumber=next")));
    }

    #[tokio::test]
    async fn test_next_link_respects_page_limit() {
        let client = MockReviewSource::new(three_pages());
        let config =
            Config { pagination: Pagination::NextLink, page_limit: Some(1), ..make_test_config() };
        let cmd = CountCommand::new(config);

        let tally = cmd.count_with_client(&client, PRODUCT_URL).await.unwrap();
        assert_eq!(tally.total(), 3);
        assert_eq!(client.requested().len(), 2);
    }

    #[tokio::test]
    async fn test_pages_without_metadata_leave_tally_unchanged() {
        let pages = vec![
            reviews_page(&["Black"], 1, 2),
            "<html><body><div data-hook='review'>Great shirt</div></body></html>".to_string(),
        ];
        let client = MockReviewSource::new(pages);
        let cmd = CountCommand::new(make_test_config());

        let tally = cmd.count_with_client(&client, PRODUCT_URL).await.unwrap();
        assert_eq!(tally.total(), 1);
        assert_eq!(tally.get("Black"), 1);
    }

    #[tokio::test]
    async fn test_custom_attribute() {
        let client = MockReviewSource::new(three_pages());
        let config = Config { attribute: "Size".to_string(), ..make_test_config() };
        let cmd = CountCommand::new(config);

        let tally = cmd.count_with_client(&client, PRODUCT_URL).await.unwrap();
        assert_eq!(tally.get("M"), 6);
        assert_eq!(tally.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_product_page() {
        let mut client = MockReviewSource::new(three_pages());
        client.product_html = "<html><body><h1>Dogs of Amazon</h1></body></html>".to_string();
        let cmd = CountCommand::new(make_test_config());

        let err = cmd.count_with_client(&client, PRODUCT_URL).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CounterError>(),
            Some(CounterError::InvalidProductPage)
        ));
        assert_eq!(client.requested().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_product_url() {
        let client = MockReviewSource::new(three_pages());
        let cmd = CountCommand::new(make_test_config());

        let err = cmd.count_with_client(&client, "B07XYZ1234").await.unwrap_err();
        assert!(err.to_string().contains("Invalid product URL"));
        assert!(client.requested().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_stops_run() {
        let mut client = MockReviewSource::new(three_pages());
        client.fail_on_page = Some(2);
        let cmd = CountCommand::new(make_test_config());

        let result = cmd.count_with_client(&client, PRODUCT_URL).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Simulated network error"));
        assert_eq!(client.requested().len(), 3);
    }

    #[tokio::test]
    async fn test_execute_with_client_table() {
        let client = MockReviewSource::new(three_pages());
        let cmd = CountCommand::new(make_test_config());

        let output = cmd.execute_with_client(&client, PRODUCT_URL).await.unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("Color"));
        assert!(lines[2].starts_with("Black"));
        assert!(lines[2].ends_with("50.00"));
        assert!(output.contains("Total: 6 reviews, 3 colors"));
    }

    #[tokio::test]
    async fn test_execute_with_client_json() {
        let client = MockReviewSource::new(three_pages());
        let config = Config { format: OutputFormat::Json, ..make_test_config() };
        let cmd = CountCommand::new(config);

        let output = cmd.execute_with_client(&client, PRODUCT_URL).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["total"], 6);
        assert_eq!(parsed["rows"][0]["color"], "Black");
    }
}
