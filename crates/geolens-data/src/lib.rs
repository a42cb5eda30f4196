//! Data-access layer: scoped read operations with per-operation state.
//!
//! Four independent read operations sit between the backend client and the
//! aggregation layer: distinct customers (admin only), distinct queries for
//! a customer, full records for a customer+query, and all records for a
//! customer. Each tracks its own loading/error state; a failed fetch keeps
//! the previous data and captures a message, a successful fetch replaces
//! the data wholesale and bumps a version counter that downstream memo
//! caches key on.

use std::sync::Arc;

use geolens_backend::{SessionContext, SupabaseClient};
use geolens_core::ScrapeRecord;

/// State of one independently loading read operation.
#[derive(Debug, Clone, Default)]
pub struct OpState<T> {
    pub data: T,
    pub loading: bool,
    /// Message from the most recent failure; cleared by the next success.
    pub error: Option<String>,
    /// Bumped on every successful (wholesale) replacement of `data`.
    pub version: u64,
}

impl<T> OpState<T> {
    fn begin(&mut self) {
        self.loading = true;
    }

    fn succeed(&mut self, data: T) {
        self.data = data;
        self.error = None;
        self.loading = false;
        self.version += 1;
    }

    /// Capture the failure message; prior data stays untouched.
    fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
    }
}

/// The data-access layer. One instance per app, scoped by the injected
/// session context.
pub struct DataStore {
    client: Arc<SupabaseClient>,
    session: Arc<SessionContext>,
    pub customers: OpState<Vec<String>>,
    pub queries: OpState<Vec<String>>,
    pub records: OpState<Vec<ScrapeRecord>>,
    pub all_records: OpState<Vec<ScrapeRecord>>,
}

impl DataStore {
    #[must_use]
    pub fn new(client: Arc<SupabaseClient>, session: Arc<SessionContext>) -> Self {
        Self {
            client,
            session,
            customers: OpState::default(),
            queries: OpState::default(),
            records: OpState::default(),
            all_records: OpState::default(),
        }
    }

    /// The bearer token for row queries: the session's access token, or the
    /// anon key while anonymous.
    async fn token(&self) -> String {
        match self.session.access_token().await {
            Some(token) => token,
            None => self.client.anon_key().to_string(),
        }
    }

    /// Loads the distinct customer list. Admin only: non-admin sessions
    /// fail locally without issuing a request.
    pub async fn load_customers(&mut self) {
        self.customers.begin();
        if !self.session.is_admin().await {
            self.customers
                .fail("administrator access required".to_string());
            return;
        }
        let token = self.token().await;
        match self.client.list_customers(&token).await {
            Ok(customers) => self.customers.succeed(customers),
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch customers");
                self.customers.fail(e.to_string());
            }
        }
    }

    /// Loads the distinct query list for a customer.
    pub async fn load_queries(&mut self, customer: &str) {
        self.queries.begin();
        let token = self.token().await;
        match self.client.list_queries(&token, customer).await {
            Ok(queries) => self.queries.succeed(queries),
            Err(e) => {
                tracing::warn!(customer, error = %e, "failed to fetch queries");
                self.queries.fail(e.to_string());
            }
        }
    }

    /// Loads full records for a customer+query scope.
    pub async fn load_records(&mut self, customer: &str, query: &str) {
        self.records.begin();
        let token = self.token().await;
        match self.client.fetch_records(&token, customer, query).await {
            Ok(records) => self.records.succeed(records),
            Err(e) => {
                tracing::warn!(customer, query, error = %e, "failed to fetch records");
                self.records.fail(e.to_string());
            }
        }
    }

    /// Loads all records for a customer, across queries. Feeds the global
    /// rankings and trends that ignore the selected query.
    pub async fn load_all_records(&mut self, customer: &str) {
        self.all_records.begin();
        let token = self.token().await;
        match self.client.fetch_all_records(&token, customer).await {
            Ok(records) => self.all_records.succeed(records),
            Err(e) => {
                tracing::warn!(customer, error = %e, "failed to fetch all records");
                self.all_records.fail(e.to_string());
            }
        }
    }
}
