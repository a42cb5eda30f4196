//! Session state machine over the identity service.
//!
//! Identity lives in an explicitly constructed [`SessionContext`] injected
//! into the data and presentation layers, never in process-wide state.
//! Lifecycle: construct, [`recover`] once at boot
//! (the context reports loading until that resolves), then [`login`] /
//! [`logout`] as the user drives it.
//!
//! [`recover`]: SessionContext::recover
//! [`login`]: SessionContext::login
//! [`logout`]: SessionContext::logout

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use geolens_core::UserProfile;

use crate::client::SupabaseClient;
use crate::error::{BackendError, SessionError};
use crate::types::AuthSession;

const MIN_PASSWORD_LEN: usize = 6;
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// A resolved identity: the backend session plus its mandatory profile.
#[derive(Debug, Clone)]
pub struct Identity {
    pub session: AuthSession,
    pub profile: UserProfile,
}

/// Where the session currently stands.
#[derive(Debug, Clone)]
pub enum SessionState {
    Anonymous,
    Authenticating,
    Authenticated(Identity),
}

/// Auth lifecycle notifications, mirroring the identity service's
/// signed-in / signed-out / refreshed callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// Explicit session context; owns identity state and the event channel.
pub struct SessionContext {
    client: Arc<SupabaseClient>,
    state: RwLock<SessionState>,
    /// True from construction until boot-time recovery resolves. Protected
    /// views must not render while this is set.
    loading: AtomicBool,
    events: broadcast::Sender<AuthEvent>,
}

impl SessionContext {
    #[must_use]
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            client,
            state: RwLock::new(SessionState::Anonymous),
            loading: AtomicBool::new(true),
            events,
        }
    }

    /// Subscribes to auth events. Dropping the receiver unsubscribes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    /// True until [`SessionContext::recover`] has resolved.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Attempts to recover an existing session from a stored refresh token.
    ///
    /// Recovery never fails the boot: an absent, expired, or otherwise
    /// unusable token (including a valid token whose user has no profile
    /// row) degrades to the anonymous state with a logged warning. Clears
    /// the loading flag either way.
    pub async fn recover(&self, refresh_token: Option<&str>) {
        if let Some(token) = refresh_token {
            match self.resume(token).await {
                Ok(()) => {
                    let _ = self.events.send(AuthEvent::SignedIn);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "session recovery failed; continuing anonymous");
                }
            }
        }
        self.loading.store(false, Ordering::Release);
    }

    async fn resume(&self, refresh_token: &str) -> Result<(), SessionError> {
        let session = self.client.refresh_session(refresh_token).await?;
        let profile = self
            .client
            .fetch_profile(&session.access_token, session.user.id)
            .await?
            .ok_or(SessionError::ProfileMissing)?;
        *self.state.write().await = SessionState::Authenticated(Identity { session, profile });
        Ok(())
    }

    /// Logs in with email/password credentials.
    ///
    /// Delegates to the password grant, then resolves the profile row for
    /// the user id. Profile existence is mandatory: a valid credential with
    /// no profile row signs the backend session out again and fails with
    /// [`SessionError::ProfileMissing`].
    ///
    /// # Errors
    ///
    /// - [`SessionError::InvalidCredentials`] when the grant is rejected.
    /// - [`SessionError::ProfileMissing`] when no profile row exists.
    /// - [`SessionError::Backend`] on transport or decode failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), SessionError> {
        *self.state.write().await = SessionState::Authenticating;

        let session = match self.client.sign_in_with_password(email, password).await {
            Ok(session) => session,
            Err(e) => {
                *self.state.write().await = SessionState::Anonymous;
                return Err(map_grant_error(e));
            }
        };

        let profile = match self
            .client
            .fetch_profile(&session.access_token, session.user.id)
            .await
        {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                // Do not keep a half-authenticated backend session around.
                if let Err(e) = self.client.sign_out(&session.access_token).await {
                    tracing::warn!(error = %e, "sign-out after missing profile failed");
                }
                *self.state.write().await = SessionState::Anonymous;
                return Err(SessionError::ProfileMissing);
            }
            Err(e) => {
                *self.state.write().await = SessionState::Anonymous;
                return Err(e.into());
            }
        };

        tracing::info!(user_id = %session.user.id, admin = profile.is_admin, "signed in");
        *self.state.write().await = SessionState::Authenticated(Identity { session, profile });
        let _ = self.events.send(AuthEvent::SignedIn);
        Ok(())
    }

    /// Logs out: invalidates the backend session and clears local identity.
    ///
    /// Backend sign-out failure is logged, not surfaced — local state is
    /// cleared regardless.
    pub async fn logout(&self) {
        let previous = {
            let mut state = self.state.write().await;
            std::mem::replace(&mut *state, SessionState::Anonymous)
        };
        if let SessionState::Authenticated(identity) = previous {
            if let Err(e) = self.client.sign_out(&identity.session.access_token).await {
                tracing::warn!(error = %e, "backend sign-out failed");
            }
            let _ = self.events.send(AuthEvent::SignedOut);
        }
    }

    /// Exchanges the current refresh token for a fresh session.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotAuthenticated`] without a session;
    /// [`SessionError::Backend`] if the refresh grant fails.
    pub async fn refresh(&self) -> Result<(), SessionError> {
        let refresh_token = {
            let state = self.state.read().await;
            match &*state {
                SessionState::Authenticated(identity) => {
                    identity.session.refresh_token.clone()
                }
                _ => return Err(SessionError::NotAuthenticated),
            }
        };

        let session = self.client.refresh_session(&refresh_token).await?;
        {
            let mut state = self.state.write().await;
            if let SessionState::Authenticated(identity) = &mut *state {
                identity.session = session;
            }
        }
        let _ = self.events.send(AuthEvent::TokenRefreshed);
        Ok(())
    }

    /// Updates the account password for the authenticated user.
    ///
    /// # Errors
    ///
    /// [`SessionError::WeakPassword`] below the minimum length;
    /// [`SessionError::NotAuthenticated`] without a session;
    /// [`SessionError::Backend`] if the backend rejects the update.
    pub async fn update_password(&self, new_password: &str) -> Result<(), SessionError> {
        if new_password.len() < MIN_PASSWORD_LEN {
            return Err(SessionError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }
        let token = self
            .access_token()
            .await
            .ok_or(SessionError::NotAuthenticated)?;
        self.client.update_password(&token, new_password).await?;
        Ok(())
    }

    #[must_use]
    pub async fn is_authenticated(&self) -> bool {
        matches!(&*self.state.read().await, SessionState::Authenticated(_))
    }

    /// Admin flag from the resolved profile; false while anonymous.
    #[must_use]
    pub async fn is_admin(&self) -> bool {
        match &*self.state.read().await {
            SessionState::Authenticated(identity) => identity.profile.is_admin,
            _ => false,
        }
    }

    /// The profile's default customer scope, if any.
    #[must_use]
    pub async fn customer_name(&self) -> Option<String> {
        match &*self.state.read().await {
            SessionState::Authenticated(identity) => identity.profile.customer_name.clone(),
            _ => None,
        }
    }

    /// The current access token; `None` while anonymous.
    #[must_use]
    pub async fn access_token(&self) -> Option<String> {
        match &*self.state.read().await {
            SessionState::Authenticated(identity) => {
                Some(identity.session.access_token.clone())
            }
            _ => None,
        }
    }

    /// A snapshot of the current state.
    #[must_use]
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }
}

/// Password-grant rejections arrive as 4xx API errors; map them onto the
/// user-facing credential error and leave everything else as a backend
/// failure.
fn map_grant_error(error: BackendError) -> SessionError {
    match error {
        BackendError::Api { status, message } if (400..500).contains(&status) => {
            SessionError::InvalidCredentials(message)
        }
        other => SessionError::Backend(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_rejection_maps_to_invalid_credentials() {
        let err = map_grant_error(BackendError::Api {
            status: 400,
            message: "Invalid login credentials".to_string(),
        });
        assert!(
            matches!(err, SessionError::InvalidCredentials(ref m) if m == "Invalid login credentials")
        );
    }

    #[test]
    fn server_failure_stays_backend_error() {
        let err = map_grant_error(BackendError::Api {
            status: 500,
            message: "internal".to_string(),
        });
        assert!(matches!(err, SessionError::Backend(_)));
    }
}
