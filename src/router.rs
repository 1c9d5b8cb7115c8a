use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use tracing::warn;

use crate::config::Config;
use crate::crawler::{HttpFetcher, Scraper};
use crate::error::GateError;
use crate::handlers::{
    accounts::{login_handler, logout_handler, signup_handler},
    home::home_handler,
    scrape::{export_handler, scrape_handler},
};
use crate::service::AccountService;

/// Shared, immutable application state. Login state lives in each client's
/// session cookie, not here.
#[derive(Clone)]
pub struct GateState {
    pub scraper: Scraper<HttpFetcher>,
    pub accounts: AccountService,
    pub cookie_key: Key,
    pub secure_cookie: bool,
}

impl FromRef<GateState> for Key {
    fn from_ref(state: &GateState) -> Self {
        state.cookie_key.clone()
    }
}

impl GateState {
    pub fn new(
        scraper: Scraper<HttpFetcher>,
        accounts: AccountService,
        cookie_key: Key,
        secure_cookie: bool,
    ) -> Self {
        Self {
            scraper,
            accounts,
            cookie_key,
            secure_cookie,
        }
    }

    pub async fn from_config(cfg: &Config) -> Result<Self, GateError> {
        let scraper = Scraper::from_config(cfg)?;
        let accounts = AccountService::open(&cfg.database_url).await?;
        let cookie_key = cookie_key(cfg.cookie_secret.as_deref())?;
        Ok(Self::new(scraper, accounts, cookie_key, !cfg.insecure_cookie))
    }
}

/// Derive the session cookie key from configured secret material, or generate
/// a random one.
pub fn cookie_key(secret: Option<&str>) -> Result<Key, GateError> {
    match secret {
        Some(secret) => Key::try_from(secret.as_bytes()).map_err(|e| {
            GateError::Config(format!("cookie_secret must be at least 64 bytes: {e}"))
        }),
        None => {
            warn!("no cookie_secret configured; sessions will not survive a restart");
            Ok(Key::generate())
        }
    }
}

pub fn gate_router(state: GateState) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/signup", post(signup_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/scrape", get(scrape_handler))
        .route("/scrape/export", get(export_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_cookie_secret_is_rejected() {
        assert!(matches!(cookie_key(Some("short")), Err(GateError::Config(_))));
    }

    #[test]
    fn long_cookie_secret_is_accepted() {
        let secret = "k".repeat(64);
        assert!(cookie_key(Some(&secret)).is_ok());
        assert!(cookie_key(None).is_ok());
    }
}
