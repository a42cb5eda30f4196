//! Core domain types and configuration for GeoLens.
//!
//! The two row types here mirror the hosted backend's tables exactly:
//! `chatgpt_scrapes` (immutable scrape records written by the upstream
//! pipeline) and `user_profiles` (one row per identity). Everything else in
//! the workspace is derived from these at read time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

mod app_config;
mod config;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

/// A row from the `chatgpt_scrapes` table.
///
/// Created by an external scraping pipeline; read-only to this system.
/// The array columns are nullable in the backend, so both deserialize to
/// empty vectors when absent or `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRecord {
    pub id: Uuid,
    pub customer: String,
    pub query: String,
    pub created_at: DateTime<Utc>,
    pub customer_mentioned: bool,
    pub customer_top_ranked: bool,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub cited_sources: Vec<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub candidates: Vec<String>,
}

/// `#[serde(default)]` alone only covers an absent field; the backend also
/// sends explicit `null` for empty array columns.
fn nullable_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A row from the `user_profiles` table, resolved at login.
///
/// `customer_name` is the default data scope for non-admin users; admins
/// may select any customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub customer_name: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
