//! Error kinds surfaced to the user.

use thiserror::Error;

/// Failures the counter reports with a dedicated message.
#[derive(Debug, Error)]
pub enum CounterError {
    #[error("Please provide the URL of the product as an argument.")]
    MissingUrl,

    #[error("Invalid product URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to connect to {url}")]
    Connection {
        url: String,
        #[source]
        source: wreq::Error,
    },

    #[error("Rate limited by Amazon while fetching {url}. Try again later or use a proxy.")]
    RateLimited { url: String },

    #[error("Request to {url} failed with status: {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid product page: no link to the reviews listing found")]
    InvalidProductPage,

    #[error("{0}")]
    Blocked(&'static str),

    #[error("Could not read the last page number from the reviews pagination (try --pagination next-link)")]
    Pagination,
}
