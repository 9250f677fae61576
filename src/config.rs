use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Resolver tuning, loaded once by the caller and passed in explicitly.
/// Connection credentials are deliberately not part of this struct; they
/// travel with each resolve call.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the remote backend; each action posts to
    /// `{backend_url}/{action}.php`.
    pub backend_url: Option<Url>,
    /// Slug used when the requested one is absent from the static dataset.
    pub home_slug: String,
    /// Template looked up when a page references one that does not exist.
    pub default_template: String,
    pub probe_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: None,
            home_slug: "home".to_string(),
            default_template: "default".to_string(),
            probe_timeout_secs: 10,
            fetch_timeout_secs: 15,
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Merge `PAGEFALL_`-prefixed environment variables over the defaults.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("PAGEFALL_"))
            .extract()
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
