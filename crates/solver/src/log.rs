use prismhook_core::ChallengeRequest;
use tracing::info;

use crate::error::SolverError;
use crate::solver::Solver;

/// A solver that logs the challenge and reports success without performing
/// any external I/O.
///
/// Useful for local development and for exercising the webhook host without
/// a reachable provider endpoint.
pub struct LogSolver {
    name: String,
}

impl LogSolver {
    /// Create a new `LogSolver` with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Solver for LogSolver {
    fn name(&self) -> &str {
        &self.name
    }

    async fn present(&self, request: &ChallengeRequest) -> Result<(), SolverError> {
        info!(
            solver = %self.name,
            uid = %request.uid,
            fqdn = %request.resolved_fqdn,
            zone = %request.resolved_zone,
            "log solver presented challenge"
        );
        Ok(())
    }

    async fn clean_up(&self, request: &ChallengeRequest) -> Result<(), SolverError> {
        info!(
            solver = %self.name,
            uid = %request.uid,
            fqdn = %request.resolved_fqdn,
            zone = %request.resolved_zone,
            "log solver cleaned up challenge"
        );
        Ok(())
    }
}
