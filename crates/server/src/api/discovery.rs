//! Kubernetes aggregated-API discovery documents.
//!
//! The API server queries these to learn which resources the webhook
//! serves before it proxies any `ChallengePayload` to us.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use prismhook_core::CHALLENGE_KIND;

use super::AppState;
use crate::config::API_VERSION;
use crate::error::ServerError;

/// One served version of a group.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupVersionForDiscovery {
    pub group_version: String,
    pub version: String,
}

/// `APIGroup` document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGroup {
    pub kind: &'static str,
    pub api_version: &'static str,
    pub name: String,
    pub versions: Vec<GroupVersionForDiscovery>,
    pub preferred_version: GroupVersionForDiscovery,
}

/// `APIGroupList` document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGroupList {
    pub kind: &'static str,
    pub api_version: &'static str,
    pub groups: Vec<ApiGroup>,
}

/// A resource entry in an `APIResourceList`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
    pub name: String,
    pub singular_name: String,
    pub namespaced: bool,
    pub kind: &'static str,
    pub verbs: Vec<&'static str>,
}

/// `APIResourceList` document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResourceList {
    pub kind: &'static str,
    pub api_version: &'static str,
    pub group_version: String,
    pub resources: Vec<ApiResource>,
}

fn group_document(state: &AppState) -> ApiGroup {
    let version = GroupVersionForDiscovery {
        group_version: state.webhook.group_version(),
        version: API_VERSION.to_owned(),
    };
    ApiGroup {
        kind: "APIGroup",
        api_version: "v1",
        name: state.webhook.group_name.clone(),
        versions: vec![version.clone()],
        preferred_version: version,
    }
}

fn ensure_group(state: &AppState, group: &str) -> Result<(), ServerError> {
    if group == state.webhook.group_name {
        Ok(())
    } else {
        Err(ServerError::NotFound(format!("API group {group:?}")))
    }
}

/// Ensure the path addresses the served group and version.
pub(crate) fn ensure_group_version(
    state: &AppState,
    group: &str,
    version: &str,
) -> Result<(), ServerError> {
    ensure_group(state, group)?;
    if version == API_VERSION {
        Ok(())
    } else {
        Err(ServerError::NotFound(format!("API version {group}/{version}")))
    }
}

/// `GET /apis` -- the single group this webhook serves.
#[allow(clippy::unused_async)]
pub async fn api_groups(State(state): State<AppState>) -> Json<ApiGroupList> {
    Json(ApiGroupList {
        kind: "APIGroupList",
        api_version: "v1",
        groups: vec![group_document(&state)],
    })
}

/// `GET /apis/{group}`.
#[allow(clippy::unused_async)]
pub async fn api_group(
    State(state): State<AppState>,
    Path(group): Path<String>,
) -> Result<Json<ApiGroup>, ServerError> {
    ensure_group(&state, &group)?;
    Ok(Json(group_document(&state)))
}

/// `GET /apis/{group}/{version}` -- one `ChallengePayload` resource per solver.
#[allow(clippy::unused_async)]
pub async fn api_resources(
    State(state): State<AppState>,
    Path((group, version)): Path<(String, String)>,
) -> Result<Json<ApiResourceList>, ServerError> {
    ensure_group_version(&state, &group, &version)?;

    let resources = state
        .solvers
        .names()
        .into_iter()
        .map(|name| ApiResource {
            name: name.to_owned(),
            singular_name: name.to_owned(),
            namespaced: false,
            kind: CHALLENGE_KIND,
            verbs: vec!["create"],
        })
        .collect();

    Ok(Json(ApiResourceList {
        kind: "APIResourceList",
        api_version: "v1",
        group_version: state.webhook.group_version(),
        resources,
    }))
}
