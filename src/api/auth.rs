use tracing::{debug, instrument};

use crate::api::{self, ErrorBody};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::model::{AccountType, LoginRequest, LoginResponse};

/// Login path segments for each account type.
pub(crate) fn login_segments(account_type: AccountType) -> [&'static str; 2] {
    match account_type {
        AccountType::Student => ["student", "login"],
        AccountType::University => ["university", "login"],
    }
}

#[instrument(skip(client, config, request), fields(user_type = %request.user_type))]
pub(crate) async fn login(
    client: &reqwest::Client,
    config: &ClientConfig,
    request: &LoginRequest<'_>,
) -> Result<LoginResponse> {
    let url = config.endpoint(&login_segments(request.user_type))?;
    let response: LoginResponse = api::send_json(
        client.post(url.clone()).json(request),
        url.as_str(),
        ErrorBody::JsonMessage,
    )
    .await?;
    debug!(is_new_device = response.is_new_device, "login accepted");
    Ok(response)
}
