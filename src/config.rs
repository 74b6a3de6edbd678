use std::env;
use std::str::FromStr;

use reqwest::Url;
use tracing::{info, warn};

use crate::error::{Error, Result};

const DEV_BASE_URL: &str = "http://localhost:5000";
const PROD_BASE_URL: &str = "https://skillonx-server.onrender.com";

/// Deployment environment the client talks to.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// The backend base URL for this environment.
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Development => DEV_BASE_URL,
            Environment::Production => PROD_BASE_URL,
        }
    }
}

/// Where the client sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub environment: Environment,
    pub base_url: String,
}

impl ClientConfig {
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            base_url: environment.base_url().to_string(),
        }
    }

    /// Point the client at a different host while keeping the environment tag.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Load from `SKILLONX_ENV` (`development` or `production`) and an
    /// optional `SKILLONX_BASE_URL` override.
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("SKILLONX_ENV").ok().as_deref(),
            env::var("SKILLONX_BASE_URL").ok().as_deref(),
        )
    }

    fn from_vars(environment: Option<&str>, base_url: Option<&str>) -> Self {
        let environment = match environment {
            Some(value) => Environment::from_str(value.trim()).unwrap_or_else(|_| {
                warn!(value, "unrecognized SKILLONX_ENV, using development");
                Environment::Development
            }),
            None => {
                info!("SKILLONX_ENV not set, using development");
                Environment::Development
            }
        };

        let config = Self::for_environment(environment);
        match base_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    }

    /// The URL of an endpoint below the base URL. Each segment is
    /// percent-encoded, so ids cannot change the route.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let invalid = |reason: String| Error::InvalidUrl {
            url: self.base_url.clone(),
            reason,
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("base URL cannot take a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}
