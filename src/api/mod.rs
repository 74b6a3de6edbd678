pub(crate) mod auth;
pub(crate) mod rankings;
pub(crate) mod workshops;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// How the body of a failed response is turned into a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorBody {
    /// The body is JSON carrying a `message` field.
    JsonMessage,
    /// The body text itself is the message.
    RawText,
}

#[derive(Deserialize)]
struct ErrorPayload {
    message: Option<String>,
}

/// Send a request and decode a successful JSON body into `T`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    url: &str,
    error_body: ErrorBody,
) -> Result<T> {
    let body = send(request, url, error_body).await?;
    serde_json::from_str(&body).map_err(|e| Error::Decode {
        url: url.to_owned(),
        source: e,
    })
}

/// Send a request and return the body of a successful response as text.
pub(crate) async fn send(request: RequestBuilder, url: &str, error_body: ErrorBody) -> Result<String> {
    debug!(url, "sending request");

    let response = request.send().await.map_err(|e| Error::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    let body = read_body(response, url).await?;
    if !status.is_success() {
        return Err(Error::Api {
            url: url.to_owned(),
            status,
            message: error_message(&body, error_body),
        });
    }

    Ok(body)
}

async fn read_body(response: Response, url: &str) -> Result<String> {
    response.text().await.map_err(|e| Error::ResponseBody {
        url: url.to_owned(),
        source: e,
    })
}

fn error_message(body: &str, error_body: ErrorBody) -> Option<String> {
    let message = match error_body {
        ErrorBody::JsonMessage => serde_json::from_str::<ErrorPayload>(body)
            .ok()
            .and_then(|payload| payload.message),
        ErrorBody::RawText => Some(body.trim().to_string()),
    };
    message.filter(|m| !m.is_empty())
}
