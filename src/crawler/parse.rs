use crate::types::QuoteRecord;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static QUOTE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".quote").expect("valid .quote selector"));
static TEXT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".text").expect("valid .text selector"));
static AUTHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".author").expect("valid .author selector"));

/// Extract every `.quote` entry on a page, in document order.
///
/// Text and author are taken from the first `.text` / `.author` descendant and trimmed.
/// A container missing either field is skipped, so a page whose markup changed shape
/// simply yields fewer (or zero) records.
pub fn parse_quotes(html: &str) -> Vec<QuoteRecord> {
    let document = Html::parse_document(html);
    document
        .select(&QUOTE_SELECTOR)
        .filter_map(|entry| {
            let quote = first_text(entry, &TEXT_SELECTOR)?;
            let author = first_text(entry, &AUTHOR_SELECTOR)?;
            Some(QuoteRecord::new(quote, author))
        })
        .collect()
}

fn first_text(entry: ElementRef<'_>, selector: &Selector) -> Option<String> {
    entry
        .select(selector)
        .next()
        .map(|node| node.text().collect::<String>().trim().to_string())
}
