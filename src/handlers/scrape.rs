use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::GateError;
use crate::export;
use crate::middleware::RequireSession;
use crate::router::GateState;
use crate::types::{QuoteBatch, QuoteRecord};

/// Number of quotes rendered inline; the export carries the full batch.
pub const PREVIEW_LEN: usize = 10;

pub const NO_QUOTES: &str = "No quotes found for the given tag.";

#[derive(Debug, Deserialize)]
pub struct ScrapeQuery {
    #[serde(default)]
    pub tag: String,
}

#[derive(Debug, Serialize)]
pub struct ScrapeView {
    pub tag: String,
    pub count: usize,
    pub message: String,
    pub preview: Vec<QuoteRecord>,
    pub quotes: Vec<QuoteRecord>,
}

impl From<QuoteBatch> for ScrapeView {
    fn from(batch: QuoteBatch) -> Self {
        let tag = batch.tag().to_string();
        let quotes = batch.into_records();
        Self {
            tag,
            count: quotes.len(),
            message: format!("Found {} quotes!", quotes.len()),
            preview: quotes.iter().take(PREVIEW_LEN).cloned().collect(),
            quotes,
        }
    }
}

async fn scrape_nonempty(state: &GateState, user: &str, tag: &str) -> Result<QuoteBatch, GateError> {
    info!(username = user, tag, "scrape requested");
    let batch = state.scraper.scrape(tag).await;
    if batch.is_empty() {
        return Err(GateError::NotFound(NO_QUOTES.to_string()));
    }
    Ok(batch)
}

/// GET /scrape?tag=... -> all quotes for the tag as JSON.
pub async fn scrape_handler(
    State(state): State<GateState>,
    RequireSession(user): RequireSession,
    Query(query): Query<ScrapeQuery>,
) -> Result<Json<ScrapeView>, GateError> {
    let batch = scrape_nonempty(&state, &user, &query.tag).await?;
    Ok(Json(batch.into()))
}

/// GET /scrape/export?tag=... -> the same batch as a CSV download.
pub async fn export_handler(
    State(state): State<GateState>,
    RequireSession(user): RequireSession,
    Query(query): Query<ScrapeQuery>,
) -> Result<Response, GateError> {
    let batch = scrape_nonempty(&state, &user, &query.tag).await?;
    let body = export::to_csv(batch.records())?;
    let disposition = format!("attachment; filename=\"{}\"", batch.export_file_name());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
