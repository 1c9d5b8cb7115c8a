//! Plain data types shared by the crawler, the export path and the HTTP layer.

pub mod quote;

pub use quote::{QuoteBatch, QuoteRecord};
