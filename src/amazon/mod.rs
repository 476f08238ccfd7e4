//! Amazon-specific modules for HTTP client, parsing, and URL handling.

pub mod client;
pub mod models;
pub mod parser;
pub mod regions;
pub mod selectors;
pub mod urls;

pub use client::{AmazonClient, ReviewSource};
pub use models::ReviewPage;
pub use parser::Parser;
pub use regions::Region;
