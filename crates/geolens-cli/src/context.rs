//! App wiring: config → client → session → data store.

use std::sync::Arc;

use anyhow::{bail, Context};

use geolens_backend::{SessionContext, SupabaseClient};
use geolens_core::AppConfig;
use geolens_data::{DataStore, OpState};

use crate::view::AnalyticsView;
use crate::ScopeArgs;

pub struct AppContext {
    pub session: Arc<SessionContext>,
    pub store: DataStore,
    pub view: AnalyticsView,
    pub config: AppConfig,
}

impl AppContext {
    /// Builds the client, recovers or establishes a session, and wires the
    /// data store. Protected commands only run once this returns.
    pub async fn init(
        config: AppConfig,
        email: &str,
        password: &str,
    ) -> anyhow::Result<Self> {
        let client = Arc::new(SupabaseClient::new(
            &config.supabase_url,
            &config.supabase_anon_key,
            config.request_timeout_secs,
        )?);
        let session = Arc::new(SessionContext::new(Arc::clone(&client)));

        // Boot: try to recover a stored session first, fall back to a
        // fresh password login.
        session.recover(config.refresh_token.as_deref()).await;
        if session.is_authenticated().await {
            tracing::debug!("session recovered from stored refresh token");
        } else {
            session
                .login(email, password)
                .await
                .context("login failed")?;
        }

        let store = DataStore::new(client, Arc::clone(&session));
        Ok(Self {
            session,
            store,
            view: AnalyticsView::new(),
            config,
        })
    }

    /// Resolves the customer scope for this invocation.
    ///
    /// Admins may select any customer with `--customer`; everyone else is
    /// pinned to their profile's customer and may not override it.
    pub async fn resolve_customer(&self, scope: &ScopeArgs) -> anyhow::Result<String> {
        let profile_customer = self.session.customer_name().await;
        if self.session.is_admin().await {
            return match scope.customer.clone().or(profile_customer) {
                Some(customer) => Ok(customer),
                None => bail!("no customer selected; pass --customer"),
            };
        }
        match profile_customer {
            Some(customer) => {
                if let Some(requested) = &scope.customer {
                    if *requested != customer {
                        bail!("only administrators may select another customer");
                    }
                }
                Ok(customer)
            }
            None => bail!("profile has no customer scope; contact your administrator"),
        }
    }

    /// The query scope, required by per-query commands.
    pub fn require_query(scope: &ScopeArgs) -> anyhow::Result<String> {
        match &scope.query {
            Some(query) => Ok(query.clone()),
            None => bail!("no query selected; pass --query (see `geolens queries`)"),
        }
    }
}

/// Unwraps one operation's state: a captured fetch error becomes the
/// command's failure, otherwise the data is handed to the renderer.
pub fn op_data<T>(op: &OpState<T>) -> anyhow::Result<&T> {
    if let Some(message) = &op.error {
        bail!("fetch failed: {message}");
    }
    Ok(&op.data)
}
