//! Sign-in flow: send credentials, persist the session, decide where to go.

use tracing::{info, instrument, warn};

use crate::client::ApiClient;
use crate::model::{AccountType, DeviceInfo, UserDetails};
use crate::navigation::NavigationIntent;
use crate::session::{Session, SessionStore};

pub const SIGN_IN_FAILED_MESSAGE: &str = "Invalid email or password";

/// Credentials collected by the login form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub account_type: AccountType,
}

impl LoginForm {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            account_type,
        }
    }
}

/// A failed sign-in, reduced to the one message the form shows.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
}

impl AuthError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Sign in and store the resulting session.
///
/// Returns the dashboard to navigate to for the chosen account type.
#[instrument(skip(client, session, form, device_info), fields(user_type = %form.account_type))]
pub async fn sign_in<S: SessionStore>(
    client: &ApiClient,
    session: &mut Session<S>,
    form: &LoginForm,
    device_info: &DeviceInfo,
) -> Result<NavigationIntent, AuthError> {
    let response = client
        .login(&form.email, &form.password, form.account_type, device_info)
        .await
        .map_err(|err| {
            warn!(error = %err, "sign-in rejected");
            AuthError::new(err.user_message().unwrap_or(SIGN_IN_FAILED_MESSAGE))
        })?;

    if response.is_new_device {
        info!("new device sign-in, the account owner has been notified by email");
    }

    let details = UserDetails::from_login(response, form.account_type);
    session.login(details).map_err(|err| {
        warn!(error = %err, "could not persist session");
        AuthError::new(format!("Signed in, but the session could not be saved: {err}"))
    })?;

    Ok(NavigationIntent::Dashboard(form.account_type))
}
