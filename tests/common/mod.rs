#![allow(dead_code)]

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use quotegate::crawler::FetchSettings;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use url::Url;

#[derive(Clone)]
pub enum MockPage {
    Quotes(Vec<(String, String)>),
    Status(StatusCode),
    Stall(Duration),
}

/// Local stand-in for the quotes site. Pages not configured render an empty listing,
/// the way the real site answers past the last page or for unknown tags.
#[derive(Clone, Default)]
pub struct QuoteSite {
    pages: HashMap<(String, u32), MockPage>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl QuoteSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quotes(mut self, tag: &str, page: u32, entries: &[(&str, &str)]) -> Self {
        let entries = entries
            .iter()
            .map(|(q, a)| (q.to_string(), a.to_string()))
            .collect();
        self.pages
            .insert((tag.to_string(), page), MockPage::Quotes(entries));
        self
    }

    /// `count` generated quotes on one page, numbered from `first`.
    pub fn numbered(self, tag: &str, page: u32, first: usize, count: usize) -> Self {
        let owned: Vec<(String, String)> = (first..first + count)
            .map(|i| (format!("quote {i}"), format!("author {i}")))
            .collect();
        let borrowed: Vec<(&str, &str)> = owned
            .iter()
            .map(|(q, a)| (q.as_str(), a.as_str()))
            .collect();
        self.quotes(tag, page, &borrowed)
    }

    pub fn status(mut self, tag: &str, page: u32, status: StatusCode) -> Self {
        self.pages
            .insert((tag.to_string(), page), MockPage::Status(status));
        self
    }

    pub fn stall(mut self, tag: &str, page: u32, delay: Duration) -> Self {
        self.pages
            .insert((tag.to_string(), page), MockPage::Stall(delay));
        self
    }

    /// Requests seen so far, as `"{tag}/{page}"` in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Bind on an ephemeral port and serve in the background. Returns the base URL.
    pub async fn serve(&self) -> Url {
        let app = Router::new()
            .route("/tag/{tag}/page/{page}", get(page_handler))
            .with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock site");
        let addr = listener.local_addr().expect("mock site addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock site crashed");
        });
        Url::parse(&format!("http://{addr}/")).expect("mock site url")
    }
}

async fn page_handler(
    State(site): State<QuoteSite>,
    Path((tag, page)): Path<(String, u32)>,
) -> Response {
    site.requests.lock().unwrap().push(format!("{tag}/{page}"));
    match site.pages.get(&(tag, page)).cloned() {
        Some(MockPage::Quotes(entries)) => Html(render(&entries)).into_response(),
        Some(MockPage::Status(status)) => status.into_response(),
        Some(MockPage::Stall(delay)) => {
            tokio::time::sleep(delay).await;
            Html(render(&[])).into_response()
        }
        None => Html(render(&[])).into_response(),
    }
}

fn render(entries: &[(String, String)]) -> String {
    let mut html = String::from(r#"<html><body><div class="container"><div class="col-md-8">"#);
    if entries.is_empty() {
        html.push_str("No quotes found!");
    }
    for (quote, author) in entries {
        html.push_str(&format!(
            r#"<div class="quote"><span class="text">{quote}</span><span>by <small class="author">{author}</small></span></div>"#
        ));
    }
    html.push_str("</div></div></body></html>");
    html
}

pub fn fetch_settings() -> FetchSettings {
    FetchSettings {
        user_agent: "quotegate-tests".to_string(),
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
        proxy: None,
    }
}

pub fn database_url(dir: &tempfile::TempDir) -> String {
    format!("sqlite:{}", dir.path().join("users.db").display())
}
