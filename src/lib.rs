pub mod config;
pub mod crawler;
pub mod db;
pub mod error;
pub mod export;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;
pub mod types;

pub use crawler::{BlockingScraper, Scraper};
pub use db::AccountCreation;
pub use error::GateError;
pub use service::AccountService;
pub use types::{QuoteBatch, QuoteRecord};
