use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use serde::Deserialize;
use tracing::{debug, info, warn};

use prismhook_core::{ChallengePayload, ChallengeResponse};

use super::AppState;
use super::discovery::ensure_group_version;
use crate::error::ServerError;

/// Path parameters of the cluster-scoped challenge route.
#[derive(Debug, Deserialize)]
pub struct SolverPath {
    pub group: String,
    pub version: String,
    pub solver: String,
}

/// Path parameters of the namespaced challenge route.
#[derive(Debug, Deserialize)]
pub struct NamespacedSolverPath {
    pub group: String,
    pub version: String,
    pub namespace: String,
    pub solver: String,
}

/// `POST /apis/{group}/{version}/{solver}` -- present or clean up a challenge.
///
/// Solver failures are reported in `response.status` with HTTP 200; only a
/// bad envelope or an unknown group/solver turns into an HTTP error.
pub async fn solve(
    State(state): State<AppState>,
    Path(path): Path<SolverPath>,
    body: Bytes,
) -> Result<Json<ChallengePayload>, ServerError> {
    handle(&state, &path.group, &path.version, &path.solver, &body).await
}

/// `POST /apis/{group}/{version}/namespaces/{namespace}/{solver}`.
pub async fn solve_namespaced(
    State(state): State<AppState>,
    Path(path): Path<NamespacedSolverPath>,
    body: Bytes,
) -> Result<Json<ChallengePayload>, ServerError> {
    debug!(namespace = %path.namespace, "namespaced challenge request");
    handle(&state, &path.group, &path.version, &path.solver, &body).await
}

async fn handle(
    state: &AppState,
    group: &str,
    version: &str,
    solver_name: &str,
    body: &[u8],
) -> Result<Json<ChallengePayload>, ServerError> {
    ensure_group_version(state, group, version)?;
    let solver = state
        .solvers
        .get(solver_name)
        .map_err(|e| ServerError::NotFound(e.to_string()))?;

    let payload: ChallengePayload = serde_json::from_slice(body)
        .map_err(|e| ServerError::BadRequest(format!("invalid ChallengePayload: {e}")))?;
    let request = payload
        .request
        .clone()
        .ok_or_else(|| ServerError::BadRequest("ChallengePayload has no request".into()))?;

    let response = match solver.solve(&request).await {
        Ok(()) => {
            info!(
                solver = %solver_name,
                uid = %request.uid,
                action = %request.action,
                fqdn = %request.resolved_fqdn,
                "challenge solved"
            );
            ChallengeResponse::success(&request.uid)
        }
        Err(e) => {
            warn!(
                solver = %solver_name,
                uid = %request.uid,
                action = %request.action,
                fqdn = %request.resolved_fqdn,
                error = %e,
                "challenge failed"
            );
            ChallengeResponse::failure(&request.uid, e.to_string())
        }
    };

    Ok(Json(payload.with_response(response)))
}
