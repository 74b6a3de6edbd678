use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::api::{self, ErrorBody};
use crate::config::ClientConfig;
use crate::error::{Error, Result};

const ADD_WORKSHOP_FALLBACK: &str = "Failed to add workshop";

#[instrument(skip(client, config, workshop))]
pub(crate) async fn add_workshop<T: Serialize + ?Sized>(
    client: &reqwest::Client,
    config: &ClientConfig,
    workshop: &T,
) -> Result<Value> {
    let url = config.endpoint(&["add", "workshops"])?;
    let request = client.post(url.clone()).json(workshop);
    let created = api::send_json(request, url.as_str(), ErrorBody::RawText)
        .await
        .map_err(|err| match err {
            Error::Api {
                url,
                status,
                message: None,
            } => Error::Api {
                url,
                status,
                message: Some(ADD_WORKSHOP_FALLBACK.to_string()),
            },
            other => other,
        })?;
    debug!("workshop added");
    Ok(created)
}

#[instrument(skip(client, config, token))]
pub(crate) async fn get_university_workshops(
    client: &reqwest::Client,
    config: &ClientConfig,
    university_id: &str,
    token: &str,
) -> Result<Value> {
    let url = config.endpoint(&["api", "universities", university_id, "workshops"])?;
    let request = client.get(url.clone()).bearer_auth(token);
    let workshops: Value = api::send_json(request, url.as_str(), ErrorBody::JsonMessage).await?;
    debug!(
        count = workshops.as_array().map_or(0, Vec::len),
        university_id, "fetched university workshops"
    );
    Ok(workshops)
}
