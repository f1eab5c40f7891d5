use serde::{Deserialize, Serialize};

use crate::challenge::{ChallengeRequest, ChallengeResponse};

/// API group and version of the challenge review resource.
pub const CHALLENGE_API_VERSION: &str = "acme.cert-manager.io/v1alpha1";

/// Kind of the challenge review resource.
pub const CHALLENGE_KIND: &str = "ChallengePayload";

/// Review-style envelope exchanged with the certificate controller.
///
/// The controller sends it with `request` set; the solver host returns the
/// same envelope with `response` filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengePayload {
    #[serde(rename = "apiVersion", default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<ChallengeRequest>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ChallengeResponse>,
}

impl ChallengePayload {
    /// Wrap a request for sending to a solver host.
    pub fn for_request(request: ChallengeRequest) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            request: Some(request),
            response: None,
        }
    }

    /// Attach the solver's answer, keeping the original request in place.
    #[must_use]
    pub fn with_response(mut self, response: ChallengeResponse) -> Self {
        self.response = Some(response);
        self
    }
}

fn default_api_version() -> String {
    CHALLENGE_API_VERSION.to_owned()
}

fn default_kind() -> String {
    CHALLENGE_KIND.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::ChallengeAction;

    #[test]
    fn envelope_defaults_type_meta() {
        let payload: ChallengePayload =
            serde_json::from_str(r#"{"request":{"uid":"u","action":"Present"}}"#).unwrap();
        assert_eq!(payload.api_version, CHALLENGE_API_VERSION);
        assert_eq!(payload.kind, CHALLENGE_KIND);
        assert_eq!(payload.request.unwrap().action, ChallengeAction::Present);
        assert!(payload.response.is_none());
    }

    #[test]
    fn response_envelope_serializes() {
        let request = ChallengeRequest::new(ChallengeAction::CleanUp, "k", "f", "z").with_uid("u-1");
        let payload =
            ChallengePayload::for_request(request).with_response(ChallengeResponse::success("u-1"));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["apiVersion"], "acme.cert-manager.io/v1alpha1");
        assert_eq!(json["kind"], "ChallengePayload");
        assert_eq!(json["request"]["action"], "CleanUp");
        assert_eq!(json["response"]["uid"], "u-1");
        assert_eq!(json["response"]["success"], true);
    }
}
