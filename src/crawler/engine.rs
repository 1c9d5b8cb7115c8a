use crate::config::Config;
use crate::crawler::fetch::{
    BlockingHttpFetcher, BlockingPageFetcher, FetchSettings, HttpFetcher, PageFetcher,
};
use crate::crawler::pagination::Pagination;
use crate::error::GateError;
use crate::types::QuoteBatch;
use url::Url;

/// Crawls one tag at a time with an awaited fetcher.
///
/// Pages are requested strictly in sequence: the next request is issued only
/// after the previous page has been parsed. Fetch and parse problems end the
/// crawl and whatever was collected is returned; `scrape` never fails.
#[derive(Clone)]
pub struct Scraper<F> {
    fetcher: F,
    base_url: Url,
    max_pages: u32,
}

impl<F: PageFetcher> Scraper<F> {
    pub fn new(fetcher: F, base_url: Url, max_pages: u32) -> Self {
        Self {
            fetcher,
            base_url,
            max_pages,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn scrape(&self, tag: &str) -> QuoteBatch {
        let mut pagination = Pagination::new(self.base_url.clone(), tag, self.max_pages);
        while let Some(url) = pagination.next_url() {
            let fetched = self.fetcher.fetch_page(url).await;
            pagination.accept(fetched);
        }
        pagination.finish()
    }
}

impl Scraper<HttpFetcher> {
    pub fn from_config(cfg: &Config) -> Result<Self, GateError> {
        let fetcher = HttpFetcher::from_settings(&FetchSettings::from_config(cfg))?;
        Ok(Self::new(fetcher, cfg.base_url.clone(), cfg.max_pages))
    }
}

/// Same crawl as [`Scraper`], driven on the calling thread with a blocking fetcher.
pub struct BlockingScraper<F> {
    fetcher: F,
    base_url: Url,
    max_pages: u32,
}

impl<F: BlockingPageFetcher> BlockingScraper<F> {
    pub fn new(fetcher: F, base_url: Url, max_pages: u32) -> Self {
        Self {
            fetcher,
            base_url,
            max_pages,
        }
    }

    pub fn scrape(&self, tag: &str) -> QuoteBatch {
        let mut pagination = Pagination::new(self.base_url.clone(), tag, self.max_pages);
        while let Some(url) = pagination.next_url() {
            let fetched = self.fetcher.fetch_page(url);
            pagination.accept(fetched);
        }
        pagination.finish()
    }
}

impl BlockingScraper<BlockingHttpFetcher> {
    pub fn from_config(cfg: &Config) -> Result<Self, GateError> {
        let fetcher = BlockingHttpFetcher::from_settings(&FetchSettings::from_config(cfg))?;
        Ok(Self::new(fetcher, cfg.base_url.clone(), cfg.max_pages))
    }
}
