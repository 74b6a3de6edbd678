use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::api;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::model::*;

/// The main entry point for talking to the Skillonx backend.
///
/// `ApiClient` wraps a [`reqwest::Client`] with a cookie store and a
/// [`ClientConfig`] that decides which environment requests go to.
/// Cloning is cheap; clones share the connection pool and cookies.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> skillonx_client::Result<()> {
/// use skillonx_client::{rank_students, ApiClient};
///
/// let client = ApiClient::from_env()?;
/// let students = client.get_student_rankings("uni-id", "token").await?;
/// for entry in rank_students(&students) {
///     println!("{} {:.2}%", entry.name, entry.score);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a client for `config` with a fresh cookie-enabled HTTP client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| Error::Http {
                url: config.base_url.clone(),
                source: e,
            })?;
        Ok(Self::with_client(http, config))
    }

    /// Create a client configured from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Create a client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            http: client,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the raw student records of a university for ranking.
    #[instrument(skip(self, token))]
    pub async fn get_student_rankings(&self, university_id: &str, token: &str) -> Result<Vec<Student>> {
        api::rankings::get_student_rankings(&self.http, &self.config, university_id, token).await
    }

    /// Sign in. The login endpoint is chosen by `account_type`.
    #[instrument(skip(self, password, device_info))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        account_type: AccountType,
        device_info: &DeviceInfo,
    ) -> Result<LoginResponse> {
        let request = LoginRequest {
            email,
            password,
            user_type: account_type,
            device_info,
        };
        api::auth::login(&self.http, &self.config, &request).await
    }

    /// Create a workshop. On failure the server's raw response text becomes
    /// the error message.
    #[instrument(skip(self, workshop))]
    pub async fn add_workshop<T: Serialize + ?Sized>(&self, workshop: &T) -> Result<Value> {
        api::workshops::add_workshop(&self.http, &self.config, workshop).await
    }

    /// List the workshops offered by a university.
    #[instrument(skip(self, token))]
    pub async fn get_university_workshops(&self, university_id: &str, token: &str) -> Result<Value> {
        api::workshops::get_university_workshops(&self.http, &self.config, university_id, token)
            .await
    }
}
