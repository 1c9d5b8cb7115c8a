use axum::{Json, extract::State};
use chrono::Local;
use serde::Serialize;

use crate::middleware::Session;
use crate::router::GateState;

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub title: &'static str,
    pub description: String,
    pub now: String,
    pub logged_in_as: Option<String>,
}

/// GET / -> static landing info plus the current server time.
pub async fn home_handler(State(state): State<GateState>, session: Session) -> Json<HomeView> {
    let now = Local::now().format("%A, %B %d, %Y %H:%M:%S").to_string();
    Json(HomeView {
        title: "Welcome to the Quotes Scraper App",
        description: format!(
            "Use this app to scrape quotes from {}.",
            state.scraper.base_url()
        ),
        now,
        logged_in_as: session.username().map(str::to_owned),
    })
}
