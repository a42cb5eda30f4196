//! HTTP client for the hosted Supabase-style backend.
//!
//! Row reads go through the PostgREST surface (`/rest/v1/<table>` with
//! equality filters and ordering in the query string); auth calls go
//! through the GoTrue surface (`/auth/v1/...`, see [`crate::auth`]). Every
//! request carries the project anon key in `apikey` plus a bearer token —
//! the user's access token when a session exists, the anon key otherwise.

use std::collections::BTreeSet;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use geolens_core::ScrapeRecord;

use crate::error::BackendError;
use crate::types::ErrorBody;

const SCRAPES_TABLE: &str = "chatgpt_scrapes";

/// Client for the hosted backend's REST and auth APIs.
///
/// Construct with [`SupabaseClient::new`] for a real project or point
/// `base_url` at a mock server in tests.
pub struct SupabaseClient {
    http: Client,
    base_url: Url,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct CustomerRow {
    customer: String,
}

#[derive(Debug, Deserialize)]
struct QueryRow {
    query: String,
}

impl SupabaseClient {
    /// Creates a new client for the project at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`BackendError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn new(base_url: &str, anon_key: &str, timeout_secs: u64) -> Result<Self, BackendError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("geolens/0.1 (visibility-analytics)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends path segments instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| BackendError::Api {
            status: 0,
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            http,
            base_url,
            anon_key: anon_key.to_owned(),
        })
    }

    /// The project anon key, used as the bearer token for anonymous requests.
    #[must_use]
    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    /// Lists distinct customers across all scrape rows, sorted ascending.
    ///
    /// The backend has no distinct projection for this, so the column is
    /// fetched and deduplicated client-side.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Api`] on a non-2xx response.
    /// - [`BackendError::Http`] on network failure.
    /// - [`BackendError::Deserialize`] if the rows do not match the
    ///   expected shape.
    pub async fn list_customers(&self, token: &str) -> Result<Vec<String>, BackendError> {
        let url = self.rest_url(SCRAPES_TABLE, &[("select", "customer")]);
        let body = self.get_json(&url, token).await?;
        let rows: Vec<CustomerRow> =
            serde_json::from_value(body).map_err(|e| BackendError::Deserialize {
                context: "list_customers".to_string(),
                source: e,
            })?;
        let distinct: BTreeSet<String> = rows.into_iter().map(|r| r.customer).collect();
        Ok(distinct.into_iter().collect())
    }

    /// Lists distinct queries for one customer, sorted ascending.
    ///
    /// # Errors
    ///
    /// Same surface as [`SupabaseClient::list_customers`].
    pub async fn list_queries(
        &self,
        token: &str,
        customer: &str,
    ) -> Result<Vec<String>, BackendError> {
        let filter = format!("eq.{customer}");
        let url = self.rest_url(SCRAPES_TABLE, &[("select", "query"), ("customer", &filter)]);
        let body = self.get_json(&url, token).await?;
        let rows: Vec<QueryRow> =
            serde_json::from_value(body).map_err(|e| BackendError::Deserialize {
                context: format!("list_queries(customer={customer})"),
                source: e,
            })?;
        let distinct: BTreeSet<String> = rows.into_iter().map(|r| r.query).collect();
        Ok(distinct.into_iter().collect())
    }

    /// Fetches full scrape rows for one customer and query, newest first.
    ///
    /// # Errors
    ///
    /// Same surface as [`SupabaseClient::list_customers`].
    pub async fn fetch_records(
        &self,
        token: &str,
        customer: &str,
        query: &str,
    ) -> Result<Vec<ScrapeRecord>, BackendError> {
        let customer_filter = format!("eq.{customer}");
        let query_filter = format!("eq.{query}");
        let url = self.rest_url(
            SCRAPES_TABLE,
            &[
                ("select", "*"),
                ("customer", &customer_filter),
                ("query", &query_filter),
                ("order", "created_at.desc"),
            ],
        );
        let body = self.get_json(&url, token).await?;
        serde_json::from_value(body).map_err(|e| BackendError::Deserialize {
            context: format!("fetch_records(customer={customer}, query={query})"),
            source: e,
        })
    }

    /// Fetches full scrape rows for one customer across all queries, newest
    /// first. Used for global rankings and trends independent of the
    /// selected query.
    ///
    /// # Errors
    ///
    /// Same surface as [`SupabaseClient::list_customers`].
    pub async fn fetch_all_records(
        &self,
        token: &str,
        customer: &str,
    ) -> Result<Vec<ScrapeRecord>, BackendError> {
        let customer_filter = format!("eq.{customer}");
        let url = self.rest_url(
            SCRAPES_TABLE,
            &[
                ("select", "*"),
                ("customer", &customer_filter),
                ("order", "created_at.desc"),
            ],
        );
        let body = self.get_json(&url, token).await?;
        serde_json::from_value(body).map_err(|e| BackendError::Deserialize {
            context: format!("fetch_all_records(customer={customer})"),
            source: e,
        })
    }

    /// Builds a PostgREST URL with percent-encoded query parameters.
    pub(crate) fn rest_url(&self, table: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self
            .base_url
            .join(&format!("rest/v1/{table}"))
            .expect("base URL accepts a path segment");
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Builds an auth endpoint URL, e.g. `auth/v1/token`.
    pub(crate) fn auth_url(&self, path: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self
            .base_url
            .join(&format!("auth/v1/{path}"))
            .expect("base URL accepts a path segment");
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET with auth headers and parses a JSON body.
    pub(crate) async fn get_json(
        &self,
        url: &Url,
        token: &str,
    ) -> Result<serde_json::Value, BackendError> {
        let response = self
            .http
            .get(url.clone())
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;
        Self::json_or_api_error(url, response).await
    }

    /// Sends a JSON-bodied request with auth headers and parses a JSON body.
    pub(crate) async fn send_json(
        &self,
        method: reqwest::Method,
        url: &Url,
        token: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, BackendError> {
        let response = self
            .http
            .request(method, url.clone())
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        Self::json_or_api_error(url, response).await
    }

    /// Asserts a 2xx status and parses the body; non-2xx responses surface
    /// the backend's error message (with a raw-text fallback).
    async fn json_or_api_error(
        url: &Url,
        response: reqwest::Response,
    ) -> Result<serde_json::Value, BackendError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.message().map(ToOwned::to_owned))
                .unwrap_or_else(|| {
                    if text.is_empty() {
                        status
                            .canonical_reason()
                            .unwrap_or("unknown error")
                            .to_string()
                    } else {
                        text.clone()
                    }
                });
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if text.is_empty() {
            // Sign-out and similar endpoints answer 204 with no body.
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| BackendError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SupabaseClient {
        SupabaseClient::new(base_url, "test-anon-key", 30)
            .expect("client construction should not fail")
    }

    #[test]
    fn rest_url_builds_filters_and_order() {
        let client = test_client("https://project.supabase.co");
        let url = client.rest_url(
            "chatgpt_scrapes",
            &[
                ("select", "*"),
                ("customer", "eq.acme"),
                ("order", "created_at.desc"),
            ],
        );
        assert_eq!(
            url.as_str(),
            "https://project.supabase.co/rest/v1/chatgpt_scrapes?select=*&customer=eq.acme&order=created_at.desc"
        );
    }

    #[test]
    fn rest_url_tolerates_trailing_slash_in_base() {
        let client = test_client("https://project.supabase.co/");
        let url = client.rest_url("chatgpt_scrapes", &[("select", "customer")]);
        assert_eq!(
            url.as_str(),
            "https://project.supabase.co/rest/v1/chatgpt_scrapes?select=customer"
        );
    }

    #[test]
    fn rest_url_percent_encodes_filter_values() {
        let client = test_client("https://project.supabase.co");
        let url = client.rest_url("chatgpt_scrapes", &[("query", "eq.best thc drinks")]);
        assert!(
            url.as_str().contains("eq.best+thc+drinks")
                || url.as_str().contains("eq.best%20thc%20drinks"),
            "filter value should be encoded: {url}"
        );
    }

    #[test]
    fn auth_url_appends_grant_type() {
        let client = test_client("https://project.supabase.co");
        let url = client.auth_url("token", &[("grant_type", "password")]);
        assert_eq!(
            url.as_str(),
            "https://project.supabase.co/auth/v1/token?grant_type=password"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = SupabaseClient::new("not a url", "key", 30);
        assert!(matches!(result, Err(BackendError::Api { .. })));
    }
}
