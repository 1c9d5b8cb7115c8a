use crate::crawler::fetch::FetchError;
use crate::crawler::parse::parse_quotes;
use crate::types::QuoteBatch;
use tracing::{debug, info, warn};
use url::Url;

/// Why a crawl stopped. None of these are errors to the caller; they only
/// explain how complete the batch is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A page came back with no quote entries. Normal end of the listing
    /// (and indistinguishable from a tag that does not exist).
    Exhausted,
    /// Transport error, timeout or non-success status.
    FetchFailed,
    /// `max_pages` pages were consumed without reaching an empty one.
    PageLimit,
    /// The page URL could not be built from the base URL.
    InvalidUrl,
}

/// Build `{base}/tag/{tag}/page/{page}`. The tag is a single path segment and is
/// percent-encoded as one, so `/` or `?` inside a tag cannot escape it.
pub fn page_url(base: &Url, tag: &str, page: u32) -> Result<Url, url::ParseError> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .push("tag")
        .push(tag)
        .push("page")
        .push(&page.to_string());
    Ok(url)
}

/// Page counter and stop rules for one crawl.
///
/// Drivers alternate `next_url` and `accept` until `next_url` returns `None`,
/// so page n+1 is never requested before page n has been accepted.
#[derive(Debug)]
pub struct Pagination {
    base_url: Url,
    page: u32,
    max_pages: u32,
    batch: QuoteBatch,
    stopped: Option<StopReason>,
}

impl Pagination {
    pub fn new(base_url: Url, tag: impl Into<String>, max_pages: u32) -> Self {
        Self {
            base_url,
            page: 1,
            max_pages,
            batch: QuoteBatch::new(tag),
            stopped: None,
        }
    }

    /// URL of the next page to fetch, or `None` once the crawl has stopped.
    pub fn next_url(&mut self) -> Option<Url> {
        if self.stopped.is_some() {
            return None;
        }
        if self.page > self.max_pages {
            warn!(
                tag = %self.batch.tag(),
                max_pages = self.max_pages,
                "page limit reached; returning collected quotes"
            );
            self.stopped = Some(StopReason::PageLimit);
            return None;
        }
        match page_url(&self.base_url, self.batch.tag(), self.page) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(base_url = %self.base_url, error = %e, "cannot build page url");
                self.stopped = Some(StopReason::InvalidUrl);
                None
            }
        }
    }

    /// Feed the outcome of fetching the page last returned by `next_url`.
    pub fn accept(&mut self, fetched: Result<String, FetchError>) {
        if self.stopped.is_some() {
            return;
        }
        let body = match fetched {
            Ok(body) => body,
            Err(e) => {
                warn!(
                    tag = %self.batch.tag(),
                    page = self.page,
                    error = %e,
                    "page fetch failed; returning partial results"
                );
                self.stopped = Some(StopReason::FetchFailed);
                return;
            }
        };

        let records = parse_quotes(&body);
        if records.is_empty() {
            debug!(tag = %self.batch.tag(), page = self.page, "no quotes on page");
            self.stopped = Some(StopReason::Exhausted);
            return;
        }

        debug!(
            tag = %self.batch.tag(),
            page = self.page,
            count = records.len(),
            "page parsed"
        );
        self.batch.extend(records);
        self.page += 1;
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stopped
    }

    /// Number of pages that contributed quotes.
    pub fn pages_collected(&self) -> u32 {
        self.page - 1
    }

    pub fn finish(self) -> QuoteBatch {
        info!(
            tag = %self.batch.tag(),
            pages = self.pages_collected(),
            quotes = self.batch.len(),
            stop = ?self.stopped,
            "scrape finished"
        );
        self.batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuoteRecord;
    use reqwest::StatusCode;

    fn page(entries: &[(&str, &str)]) -> String {
        entries
            .iter()
            .map(|(q, a)| {
                format!(r#"<div class="quote"><span class="text">{q}</span><small class="author">{a}</small></div>"#)
            })
            .collect()
    }

    fn base() -> Url {
        Url::parse("https://quotes.toscrape.com").unwrap()
    }

    #[test]
    fn page_url_follows_site_layout() {
        let url = page_url(&base(), "love", 3).unwrap();
        assert_eq!(url.as_str(), "https://quotes.toscrape.com/tag/love/page/3");
    }

    #[test]
    fn page_url_keeps_base_path_prefix() {
        let base = Url::parse("http://127.0.0.1:8080/mirror/").unwrap();
        let url = page_url(&base, "life", 1).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/mirror/tag/life/page/1");
    }

    #[test]
    fn page_url_encodes_tag_as_one_segment() {
        let url = page_url(&base(), "a b/c?d", 1).unwrap();
        assert_eq!(
            url.as_str(),
            "https://quotes.toscrape.com/tag/a%20b%2Fc%3Fd/page/1"
        );
    }

    #[test]
    fn page_url_rejects_cannot_be_a_base() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(page_url(&base, "love", 1).is_err());
    }

    #[test]
    fn walks_pages_until_empty() {
        let mut p = Pagination::new(base(), "love", 10);

        let first = p.next_url().unwrap();
        assert!(first.as_str().ends_with("/page/1"));
        p.accept(Ok(page(&[("q1", "a1"), ("q2", "a2")])));

        let second = p.next_url().unwrap();
        assert!(second.as_str().ends_with("/page/2"));
        p.accept(Ok(page(&[("q3", "a3")])));

        assert!(p.next_url().unwrap().as_str().ends_with("/page/3"));
        p.accept(Ok("<html></html>".to_string()));

        assert_eq!(p.next_url(), None);
        assert_eq!(p.stop_reason(), Some(StopReason::Exhausted));
        assert_eq!(p.pages_collected(), 2);

        let batch = p.finish();
        assert_eq!(batch.tag(), "love");
        assert_eq!(
            batch.records(),
            &[
                QuoteRecord::new("q1", "a1"),
                QuoteRecord::new("q2", "a2"),
                QuoteRecord::new("q3", "a3"),
            ]
        );
    }

    #[test]
    fn fetch_failure_keeps_partial_results() {
        let mut p = Pagination::new(base(), "life", 10);
        p.next_url().unwrap();
        p.accept(Ok(page(&[("q1", "a1")])));
        p.next_url().unwrap();
        p.accept(Err(FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR)));

        assert_eq!(p.next_url(), None);
        assert_eq!(p.stop_reason(), Some(StopReason::FetchFailed));
        assert_eq!(p.finish().records(), &[QuoteRecord::new("q1", "a1")]);
    }

    #[test]
    fn empty_first_page_is_an_empty_batch() {
        let mut p = Pagination::new(base(), "no-such-tag", 10);
        p.next_url().unwrap();
        p.accept(Ok(String::new()));
        assert_eq!(p.next_url(), None);
        assert!(p.finish().is_empty());
    }

    #[test]
    fn page_limit_stops_the_walk() {
        let mut p = Pagination::new(base(), "endless", 2);
        for _ in 0..2 {
            p.next_url().unwrap();
            p.accept(Ok(page(&[("q", "a")])));
        }
        assert_eq!(p.next_url(), None);
        assert_eq!(p.stop_reason(), Some(StopReason::PageLimit));
        assert_eq!(p.finish().len(), 2);
    }

    #[test]
    fn accept_after_stop_is_ignored() {
        let mut p = Pagination::new(base(), "love", 10);
        p.next_url().unwrap();
        p.accept(Ok(String::new()));
        p.accept(Ok(page(&[("late", "arrival")])));
        assert!(p.finish().is_empty());
    }
}
