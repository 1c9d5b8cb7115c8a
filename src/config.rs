use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

/// Environment prefix for every setting, e.g. `QUOTEGATE_BASE_URL`.
pub const ENV_PREFIX: &str = "QUOTEGATE_";

pub const DEFAULT_BASE_URL: &str = "https://quotes.toscrape.com";

/// Runtime configuration, layered as: built-in defaults, then `QUOTEGATE_*` env vars.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the quotes site; pages live under `{base_url}/tag/{tag}/page/{n}`.
    pub base_url: Url,
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Upper bound on pages fetched for a single tag.
    pub max_pages: u32,
    pub user_agent: String,
    pub proxy: Option<Url>,
    /// Key material for the private session cookie (at least 64 bytes).
    /// A random key is generated at startup when unset, which logs everyone out on restart.
    pub cookie_secret: Option<String>,
    pub insecure_cookie: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            database_url: "sqlite://users.db".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 15,
            max_pages: 1000,
            user_agent: format!("quotegate/{}", env!("CARGO_PKG_VERSION")),
            proxy: None,
            cookie_secret: None,
            insecure_cookie: false,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::load().expect("FATAL: invalid QUOTEGATE_* configuration"));
