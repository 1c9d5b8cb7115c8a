use crate::config::Config;
use crate::error::GateError;
use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;
use thiserror::Error as ThisError;
use url::Url;

/// Why a page could not be fetched. The crawler only logs these and stops.
#[derive(Debug, ThisError)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(StatusCode),
}

/// Awaited page fetch. Returns the body of a 2xx response.
pub trait PageFetcher: Send + Sync {
    fn fetch_page(&self, url: Url) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Blocking page fetch. Same contract as [`PageFetcher`].
pub trait BlockingPageFetcher {
    fn fetch_page(&self, url: Url) -> Result<String, FetchError>;
}

/// HTTP client settings shared by both fetchers.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub proxy: Option<Url>,
}

impl FetchSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            connect_timeout: cfg.connect_timeout(),
            request_timeout: cfg.request_timeout(),
            proxy: cfg.proxy.clone(),
        }
    }
}

#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn from_settings(settings: &FetchSettings) -> Result<Self, GateError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout);
        if let Some(proxy_url) = settings.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }
        Ok(Self::new(builder.build()?))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: Url) -> Result<String, FetchError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(resp.text().await?)
    }
}

/// Blocking counterpart of [`HttpFetcher`].
///
/// `reqwest::blocking` owns an internal runtime, so this must be built and
/// dropped outside of any async context.
pub struct BlockingHttpFetcher {
    client: reqwest::blocking::Client,
}

impl BlockingHttpFetcher {
    pub fn new(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    pub fn from_settings(settings: &FetchSettings) -> Result<Self, GateError> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(settings.user_agent.clone())
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout);
        if let Some(proxy_url) = settings.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }
        Ok(Self::new(builder.build()?))
    }
}

impl BlockingPageFetcher for BlockingHttpFetcher {
    fn fetch_page(&self, url: Url) -> Result<String, FetchError> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(resp.text()?)
    }
}
