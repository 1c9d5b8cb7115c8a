//! Tag crawler: walks `{base}/tag/{tag}/page/{n}` until the site runs out of quotes.
//!
//! Layout:
//! - `parse.rs`: the two fixed selectors and record extraction
//! - `pagination.rs`: page counter and stop rules, shared by both drivers
//! - `fetch.rs`: async and blocking page fetchers over reqwest
//! - `engine.rs`: `Scraper` (awaited) and `BlockingScraper` drivers

pub mod engine;
pub mod fetch;
pub mod pagination;
pub mod parse;

pub use engine::{BlockingScraper, Scraper};
pub use fetch::{
    BlockingHttpFetcher, BlockingPageFetcher, FetchError, FetchSettings, HttpFetcher, PageFetcher,
};
pub use pagination::{Pagination, StopReason, page_url};
pub use parse::parse_quotes;
