//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Review attribute to tally
    #[serde(default = "default_attribute")]
    pub attribute: String,

    /// Maximum number of review pages to visit
    #[serde(default)]
    pub page_limit: Option<u32>,

    /// How the set of review pages is discovered
    #[serde(default)]
    pub pagination: Pagination,

    /// Total request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Suppress per-page progress lines
    #[serde(default)]
    pub quiet: bool,
}

fn default_attribute() -> String {
    "Color".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy: None,
            attribute: default_attribute(),
            page_limit: None,
            pagination: Pagination::LastPage,
            timeout_secs: default_timeout_secs(),
            format: OutputFormat::Table,
            quiet: false,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot drive a run.
    pub fn validate(&self) -> Result<()> {
        if self.page_limit == Some(0) {
            anyhow::bail!("page_limit must be at least 1");
        }
        parse_attribute(&self.attribute).map_err(anyhow::Error::msg)?;
        Ok(())
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("amz-color-counter").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(proxy) = std::env::var("AMZ_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(attribute) = std::env::var("AMZ_ATTRIBUTE") {
            if let Ok(attribute) = parse_attribute(&attribute) {
                self.attribute = attribute;
            }
        }

        if let Ok(limit) = std::env::var("AMZ_PAGE_LIMIT") {
            if let Ok(l) = parse_page_limit(&limit) {
                self.page_limit = Some(l);
            }
        }

        self
    }
}

/// Parses an attribute name, rejecting values with no label left once
/// whitespace and a trailing colon are stripped (`""`, `"  "`, `":"`).
pub fn parse_attribute(s: &str) -> Result<String, String> {
    if s.trim().trim_end_matches(':').trim().is_empty() {
        return Err(format!("Attribute name cannot be blank: '{}'", s));
    }
    Ok(s.to_string())
}

/// Parses a page limit. Zero is rejected: page 1 is always needed.
pub fn parse_page_limit(s: &str) -> Result<u32, String> {
    match s.trim().parse::<u32>() {
        Ok(0) => Err("Page limit must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("Invalid page limit '{}': {}", s, e)),
    }
}

/// Strategy for walking the reviews pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pagination {
    /// Read the last page number from page 1, then visit every page up to it
    #[default]
    LastPage,
    /// Keep going while page n shows an enabled "next page" link. Only the
    /// link's presence is checked: page n+1 is requested by setting
    /// `pageNumber` on the reviews URL, the link's href is never followed.
    NextLink,
}

impl std::str::FromStr for Pagination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last-page" | "last" => Ok(Pagination::LastPage),
            "next-link" | "next" => Ok(Pagination::NextLink),
            _ => Err(format!("Unknown pagination: {}. Use: last-page, next-link", s)),
        }
    }
}

impl std::fmt::Display for Pagination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pagination::LastPage => write!(f, "last-page"),
            Pagination::NextLink => write!(f, "next-link"),
        }
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
