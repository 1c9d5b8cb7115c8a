use serde::{Deserialize, Serialize};

/// One quote as it appears on the site. Column names follow the CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteRecord {
    #[serde(rename = "Quote")]
    pub quote: String,
    #[serde(rename = "Author")]
    pub author: String,
}

impl QuoteRecord {
    pub fn new(quote: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            quote: quote.into(),
            author: author.into(),
        }
    }
}

/// Ordered result of a single scrape: page-ascending, then on-page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteBatch {
    tag: String,
    records: Vec<QuoteRecord>,
}

impl QuoteBatch {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            records: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn records(&self) -> &[QuoteRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<QuoteRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn extend(&mut self, page: Vec<QuoteRecord>) {
        self.records.extend(page);
    }

    /// Download name for the CSV export, `quotes_{tag}.csv`.
    /// Characters that cannot sit safely inside a `Content-Disposition` value become `_`.
    pub fn export_file_name(&self) -> String {
        let tag: String = self
            .tag
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("quotes_{tag}.csv")
    }
}
