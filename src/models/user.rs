use serde::{Deserialize, Serialize};

/// Timestamp format used inside `users.json`.
pub const USER_TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One entry of the JSON user store, keyed by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub password_hash: String,
    pub created_at: String,
    #[serde(default)]
    pub last_login: Option<String>,
    #[serde(default)]
    pub login_count: u64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deactivated_at: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Store value: early files kept the bare hash string per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredUser {
    Record(UserRecord),
    Legacy(String),
}

impl StoredUser {
    pub fn password_hash(&self) -> &str {
        match self {
            StoredUser::Record(r) => &r.password_hash,
            StoredUser::Legacy(h) => h,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            StoredUser::Record(r) => r.is_active,
            StoredUser::Legacy(_) => true,
        }
    }
}

/// Public view of a user: everything but the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub username: String,
    pub created_at: Option<String>,
    pub last_login: Option<String>,
    pub login_count: u64,
    pub is_active: bool,
    pub password_updated: Option<String>,
    pub deactivated_at: Option<String>,
}

impl UserInfo {
    pub fn from_stored(username: &str, stored: &StoredUser) -> Self {
        match stored {
            StoredUser::Record(r) => Self {
                username: username.to_string(),
                created_at: Some(r.created_at.clone()),
                last_login: r.last_login.clone(),
                login_count: r.login_count,
                is_active: r.is_active,
                password_updated: r.password_updated.clone(),
                deactivated_at: r.deactivated_at.clone(),
            },
            StoredUser::Legacy(_) => Self {
                username: username.to_string(),
                created_at: None,
                last_login: None,
                login_count: 0,
                is_active: true,
                password_updated: None,
                deactivated_at: None,
            },
        }
    }
}
