use thiserror::Error;

/// Errors returned by the hosted-backend HTTP client.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status and an error body.
    #[error("backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors surfaced by the session state machine.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The identity service rejected the credentials.
    #[error("authentication failed: {0}")]
    InvalidCredentials(String),

    /// The credential was valid but no profile row exists for the user.
    /// Profile existence is mandatory, so this is a failed authentication.
    #[error("user profile not found; contact your administrator")]
    ProfileMissing,

    /// The operation requires an authenticated session.
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },
}
