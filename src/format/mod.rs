//! Output formatting for the color distribution (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::tally::{ColorTally, TallyRow};
use serde::Serialize;

/// Serializable view of a finished tally.
#[derive(Debug, Serialize)]
pub struct TallyReport<'a> {
    pub attribute: &'a str,
    pub total: u64,
    pub rows: Vec<TallyRow>,
}

/// Formats a tally for output.
pub struct Formatter {
    format: OutputFormat,
    attribute: String,
}

impl Formatter {
    /// Creates a new formatter. `attribute` heads the first column.
    pub fn new(format: OutputFormat, attribute: impl Into<String>) -> Self {
        Self { format, attribute: attribute.into() }
    }

    /// Formats the ranked distribution of `tally`.
    pub fn format_tally(&self, tally: &ColorTally) -> String {
        let rows = tally.ranked();
        let total = tally.total();

        if rows.is_empty() {
            return match self.format {
                OutputFormat::Json => self.json(&rows, total),
                OutputFormat::Csv => self.csv_header(),
                _ => format!("No reviews with a {} attribute found.", self.attribute),
            };
        }

        match self.format {
            OutputFormat::Json => self.json(&rows, total),
            OutputFormat::Table => self.table(&rows, total),
            OutputFormat::Markdown => self.markdown(&rows, total),
            OutputFormat::Csv => self.csv(&rows),
        }
    }

    // JSON formatting

    fn json(&self, rows: &[TallyRow], total: u64) -> String {
        let report = TallyReport { attribute: &self.attribute, total, rows: rows.to_vec() };
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    }

    // Table formatting

    fn table(&self, rows: &[TallyRow], total: u64) -> String {
        let color_width = rows
            .iter()
            .map(|r| r.color.chars().count())
            .chain(std::iter::once(self.attribute.chars().count()))
            .max()
            .unwrap_or(0);
        let count_width = total.to_string().len().max(5);
        let percent_width = 6;

        let mut lines = Vec::new();

        // Header
        lines.push(format!(
            "{:<color_width$}  {:>count_width$}  {:>percent_width$}",
            self.attribute, "Count", "%"
        ));
        lines.push(format!(
            "{:-<color_width$}  {:-<count_width$}  {:-<percent_width$}",
            "", "", ""
        ));

        // Rows
        for row in rows {
            lines.push(format!(
                "{:<color_width$}  {:>count_width$}  {:>percent_width$.2}",
                row.color, row.count, row.percent
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "Total: {} reviews, {} {}s",
            total,
            rows.len(),
            self.attribute.to_lowercase()
        ));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown(&self, rows: &[TallyRow], total: u64) -> String {
        let mut lines = Vec::new();

        lines.push(format!("| {} | Count | % |", self.attribute));
        lines.push("|------|------:|--:|".to_string());

        for row in rows {
            lines.push(format!(
                "| {} | {} | {:.2} |",
                row.color.replace('|', "\\|"),
                row.count,
                row.percent
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} reviews counted*", total));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        format!("{},count,percent", Self::csv_escape(&self.attribute.to_lowercase()))
    }

    fn csv(&self, rows: &[TallyRow]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for row in rows {
            lines.push(format!(
                "{},{},{:.2}",
                Self::csv_escape(&row.color),
                row.count,
                row.percent
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}
