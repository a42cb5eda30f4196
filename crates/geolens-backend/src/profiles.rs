//! Point lookup against the `user_profiles` table.

use uuid::Uuid;

use geolens_core::UserProfile;

use crate::client::SupabaseClient;
use crate::error::BackendError;

const PROFILES_TABLE: &str = "user_profiles";

impl SupabaseClient {
    /// Fetches the profile row for a user id, or `None` when no row exists.
    ///
    /// The REST API answers point lookups with an array; at most one row is
    /// expected here since `user_id` is unique.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Api`] on a non-2xx response.
    /// - [`BackendError::Http`] on network failure.
    /// - [`BackendError::Deserialize`] if the row does not match the
    ///   expected shape.
    pub async fn fetch_profile(
        &self,
        token: &str,
        user_id: Uuid,
    ) -> Result<Option<UserProfile>, BackendError> {
        let filter = format!("eq.{user_id}");
        let url = self.rest_url(PROFILES_TABLE, &[("select", "*"), ("user_id", &filter)]);
        let body = self.get_json(&url, token).await?;
        let mut rows: Vec<UserProfile> =
            serde_json::from_value(body).map_err(|e| BackendError::Deserialize {
                context: format!("fetch_profile(user_id={user_id})"),
                source: e,
            })?;
        if rows.len() > 1 {
            tracing::warn!(%user_id, count = rows.len(), "multiple profile rows; using the first");
        }
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }
}
