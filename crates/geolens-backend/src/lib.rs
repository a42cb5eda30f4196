//! Hosted-backend access for GeoLens.
//!
//! Wraps the Supabase-style REST surface: PostgREST row queries over
//! `chatgpt_scrapes` and `user_profiles`, and GoTrue auth endpoints
//! (password grant, refresh, sign-out, password update). The session
//! state machine that the rest of the app consumes lives in [`session`].

pub mod client;
pub mod error;
pub mod session;
pub mod types;

mod auth;
mod profiles;

pub use client::SupabaseClient;
pub use error::{BackendError, SessionError};
pub use session::{AuthEvent, Identity, SessionContext, SessionState};
pub use types::{AuthSession, AuthUser};
