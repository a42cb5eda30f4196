//! Command handlers for the CLI.

pub(crate) mod competitors;
pub(crate) mod customers;
pub(crate) mod domains;
pub(crate) mod performance;
pub(crate) mod queries;
pub(crate) mod raw;
pub(crate) mod report;
pub(crate) mod score;
pub(crate) mod set_password;
pub(crate) mod sources;
pub(crate) mod trend;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
