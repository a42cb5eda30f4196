//! Auth endpoints of the hosted backend's identity service.

use reqwest::Method;

use crate::client::SupabaseClient;
use crate::error::BackendError;
use crate::types::AuthSession;

impl SupabaseClient {
    /// Exchanges email/password credentials for a session (password grant).
    ///
    /// # Errors
    ///
    /// - [`BackendError::Api`] if the credentials are rejected.
    /// - [`BackendError::Http`] on network failure.
    /// - [`BackendError::Deserialize`] if the session body is malformed.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        let url = self.auth_url("token", &[("grant_type", "password")]);
        let body = serde_json::json!({ "email": email, "password": password });
        let value = self
            .send_json(Method::POST, &url, self.anon_key(), &body)
            .await?;
        serde_json::from_value(value).map_err(|e| BackendError::Deserialize {
            context: format!("sign_in_with_password(email={email})"),
            source: e,
        })
    }

    /// Exchanges a refresh token for a fresh session (refresh grant).
    ///
    /// Used for boot-time session recovery and token refresh.
    ///
    /// # Errors
    ///
    /// Same surface as [`SupabaseClient::sign_in_with_password`].
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, BackendError> {
        let url = self.auth_url("token", &[("grant_type", "refresh_token")]);
        let body = serde_json::json!({ "refresh_token": refresh_token });
        let value = self
            .send_json(Method::POST, &url, self.anon_key(), &body)
            .await?;
        serde_json::from_value(value).map_err(|e| BackendError::Deserialize {
            context: "refresh_session".to_string(),
            source: e,
        })
    }

    /// Invalidates the session behind `access_token` on the backend.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Api`] if the backend rejects the request.
    /// - [`BackendError::Http`] on network failure.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let url = self.auth_url("logout", &[]);
        let body = serde_json::json!({});
        self.send_json(Method::POST, &url, access_token, &body)
            .await?;
        Ok(())
    }

    /// Sets a new password for the authenticated user.
    ///
    /// # Errors
    ///
    /// Same surface as [`SupabaseClient::sign_out`].
    pub async fn update_password(
        &self,
        access_token: &str,
        new_password: &str,
    ) -> Result<(), BackendError> {
        let url = self.auth_url("user", &[]);
        let body = serde_json::json!({ "password": new_password });
        self.send_json(Method::PUT, &url, access_token, &body)
            .await?;
        Ok(())
    }
}
