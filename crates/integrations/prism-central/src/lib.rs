//! Prism Central DNS-01 solver for prismhook.
//!
//! Each challenge fires an `incoming_webhook_trigger` on a Prism Central
//! endpoint. The endpoint's playbook does the actual record work; this crate
//! only decodes the per-issuer config, builds the trigger payload, and POSTs
//! it with HTTP Basic authentication.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use prismhook_core::{ChallengeAction, ChallengeRequest};
//! use prismhook_prism_central::PrismCentralSolver;
//! use prismhook_solver::Solver;
//!
//! # async fn run() -> Result<(), prismhook_solver::SolverError> {
//! let solver = PrismCentralSolver::new();
//! let request = ChallengeRequest::new(
//!     ChallengeAction::Present,
//!     "abc123",
//!     "_acme-challenge.example.com.",
//!     "example.com.",
//! )
//! .with_config(serde_json::json!({
//!     "username": "admin",
//!     "password": "secret",
//!     "apiEndpoint": "https://pc.example.com:9440/api/nutanix/v3/action_rules/trigger",
//!     "webhookID": "90836c84-38ce-456e-b595-7bdab0bdffb3",
//! }));
//! solver.present(&request).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod solver;
pub mod types;

#[cfg(test)]
mod testing;

pub use config::ProviderConfig;
pub use dispatch::{TriggerDispatcher, basic_auth_header};
pub use error::PrismCentralError;
pub use solver::{DEFAULT_SOLVER_NAME, PrismCentralSolver};
pub use types::{TriggerInstance, TriggerPayload};
