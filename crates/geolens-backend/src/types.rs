//! Wire types for the backend's auth and error responses.

use serde::Deserialize;
use uuid::Uuid;

/// The identity embedded in a token-grant response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// A live backend session returned by the password or refresh grant.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}

/// Error body shape used by the auth endpoints.
///
/// The service emits either `{"error": ..., "error_description": ...}` or
/// `{"msg": ...}` depending on the endpoint; the row API uses
/// `{"message": ...}`. All fields are optional so one type covers all
/// three, with a raw-text fallback handled by the caller.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// The most descriptive message the body carries, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.error_description
            .as_deref()
            .or(self.msg.as_deref())
            .or(self.message.as_deref())
            .or(self.error.as_deref())
    }
}
