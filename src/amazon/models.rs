//! Data extracted from a single reviews page.

/// What one reviews page contributes to a run. The HTML itself is dropped
/// as soon as this is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewPage {
    /// Attribute values found in the page's review metadata, in document order
    pub attributes: Vec<String>,
    /// Last page number shown by the pagination widget, `None` if the page has no pagination
    pub last_page: Option<u32>,
    /// Whether an enabled "next page" link is present
    pub has_next: bool,
}

impl ReviewPage {
    /// Returns the number of reviews that carried the attribute.
    pub fn count(&self) -> usize {
        self.attributes.len()
    }

    /// Returns true if no review on the page carried the attribute.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
