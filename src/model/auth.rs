use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which kind of account is signing in.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AccountType {
    #[default]
    Student,
    University,
}

/// Client metadata attached to a login. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub user_agent: String,
    pub platform: String,
    pub language: String,
    pub screen_resolution: String,
    pub time_zone: String,
}

impl DeviceInfo {
    /// Describe the host this process runs on.
    pub fn detect() -> Self {
        let language = std::env::var("LANG")
            .ok()
            .and_then(|lang| lang.split('.').next().map(|l| l.replace('_', "-")))
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| "en-US".to_string());

        Self {
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            platform: format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
            language,
            screen_resolution: "unknown".to_string(),
            time_zone: std::env::var("TZ")
                .unwrap_or_else(|_| chrono::Local::now().format("UTC%:z").to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub user_type: AccountType,
    pub device_info: &'a DeviceInfo,
}

/// Successful login response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Map<String, Value>,
    #[serde(default)]
    pub is_new_device: bool,
}

const USER_TYPE_FIELD: &str = "userType";
const TOKEN_FIELD: &str = "token";
const AUTHENTICATED_FIELD: &str = "isAuthenticated";
const SESSION_FIELDS: [&str; 3] = [USER_TYPE_FIELD, TOKEN_FIELD, AUTHENTICATED_FIELD];

/// The persisted identity: the backend's user object plus session fields.
///
/// On the wire this is one flat object. The session fields overwrite keys
/// of the same name in `user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Map<String, Value>", try_from = "Map<String, Value>")]
pub struct UserDetails {
    pub user: Map<String, Value>,
    pub user_type: AccountType,
    pub token: String,
    pub is_authenticated: bool,
}

impl UserDetails {
    pub fn from_login(response: LoginResponse, user_type: AccountType) -> Self {
        let mut user = response.user;
        for field in SESSION_FIELDS {
            user.remove(field);
        }
        Self {
            user,
            user_type,
            token: response.token,
            is_authenticated: true,
        }
    }

    /// The backend id of the signed-in user (`_id`, falling back to `id`).
    pub fn id(&self) -> Option<String> {
        ["_id", "id"]
            .iter()
            .filter_map(|key| self.user.get(*key))
            .find_map(|value| match value {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}

impl From<UserDetails> for Map<String, Value> {
    fn from(details: UserDetails) -> Self {
        let mut object = details.user;
        object.insert(
            USER_TYPE_FIELD.to_string(),
            Value::String(details.user_type.to_string()),
        );
        object.insert(TOKEN_FIELD.to_string(), Value::String(details.token));
        object.insert(
            AUTHENTICATED_FIELD.to_string(),
            Value::Bool(details.is_authenticated),
        );
        object
    }
}

impl TryFrom<Map<String, Value>> for UserDetails {
    type Error = serde_json::Error;

    fn try_from(mut object: Map<String, Value>) -> Result<Self, Self::Error> {
        let user_type =
            serde_json::from_value(object.remove(USER_TYPE_FIELD).unwrap_or(Value::Null))?;
        let token = serde_json::from_value(object.remove(TOKEN_FIELD).unwrap_or(Value::Null))?;
        let is_authenticated = matches!(object.remove(AUTHENTICATED_FIELD), Some(Value::Bool(true)));
        Ok(Self {
            user: object,
            user_type,
            token,
            is_authenticated,
        })
    }
}
