use prismhook_core::{ChallengeAction, ChallengeRequest};
use prismhook_solver::{Solver, SolverError};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::config::ProviderConfig;
use crate::dispatch::TriggerDispatcher;
use crate::error::PrismCentralError;
use crate::types::{TriggerInstance, TriggerPayload};

/// Name this solver is registered under unless overridden.
pub const DEFAULT_SOLVER_NAME: &str = "prismcentral-solver";

/// DNS-01 solver that fires a Prism Central incoming-webhook trigger.
///
/// Stateless: the provider configuration is decoded from each request and
/// never cached, so concurrent calls for different issuers do not interact.
#[derive(Debug, Clone)]
pub struct PrismCentralSolver {
    solver_name: String,
    dispatcher: TriggerDispatcher,
}

impl Default for PrismCentralSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl PrismCentralSolver {
    /// Create a solver named [`DEFAULT_SOLVER_NAME`] with a default HTTP client.
    pub fn new() -> Self {
        Self {
            solver_name: DEFAULT_SOLVER_NAME.to_owned(),
            dispatcher: TriggerDispatcher::new(),
        }
    }

    /// Override the solver name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.solver_name = name.into();
        self
    }

    /// Use a custom HTTP client, e.g. one carrying a private CA bundle.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.dispatcher = TriggerDispatcher::with_client(client);
        self
    }

    /// Build the trigger payload for a request using the configured webhook ID.
    pub fn build_payload(config: &ProviderConfig, request: &ChallengeRequest) -> TriggerPayload {
        TriggerPayload::incoming_webhook(TriggerInstance::for_challenge(
            config.webhook_id.as_str(),
            request,
        ))
    }

    /// Decode, build, serialize, dispatch.
    async fn fire(&self, request: &ChallengeRequest) -> Result<(), PrismCentralError> {
        let config = ProviderConfig::decode(request.config.as_ref())?;
        debug!(config = ?config, "loaded solver configuration");

        let payload = Self::build_payload(&config, request);
        let body = serde_json::to_vec(&payload).map_err(PrismCentralError::RequestBuild)?;
        debug!(
            payload = %String::from_utf8_lossy(&body),
            "built trigger payload"
        );

        self.dispatcher
            .send(&config.api_endpoint, &config.username, &config.password, body)
            .await
    }

    async fn run(
        &self,
        request: &ChallengeRequest,
        action: ChallengeAction,
    ) -> Result<(), SolverError> {
        match self.fire(request).await {
            Ok(()) => {
                info!(%action, "trigger accepted");
                Ok(())
            }
            Err(e) => {
                warn!(%action, error = %e, "trigger failed");
                Err(e.into())
            }
        }
    }
}

impl Solver for PrismCentralSolver {
    fn name(&self) -> &str {
        &self.solver_name
    }

    #[instrument(
        skip(self, request),
        fields(solver = %self.solver_name, uid = %request.uid, fqdn = %request.resolved_fqdn)
    )]
    async fn present(&self, request: &ChallengeRequest) -> Result<(), SolverError> {
        self.run(request, ChallengeAction::Present).await
    }

    #[instrument(
        skip(self, request),
        fields(solver = %self.solver_name, uid = %request.uid, fqdn = %request.resolved_fqdn)
    )]
    async fn clean_up(&self, request: &ChallengeRequest) -> Result<(), SolverError> {
        self.run(request, ChallengeAction::CleanUp).await
    }
}
