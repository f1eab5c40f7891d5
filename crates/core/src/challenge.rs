use serde::{Deserialize, Serialize};

/// The operation the controller is asking a solver to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeAction {
    /// Publish the challenge record.
    Present,
    /// Remove the challenge record.
    CleanUp,
}

impl ChallengeAction {
    /// Returns the wire name of the action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::CleanUp => "CleanUp",
        }
    }
}

impl std::fmt::Display for ChallengeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DNS-01 challenge handed to a solver by the certificate controller.
///
/// Field names follow the controller's JSON encoding exactly. Everything
/// except `action` is optional on the wire and defaults to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeRequest {
    /// Unique identifier of this request, echoed back in the response.
    #[serde(default)]
    pub uid: String,

    /// Whether to present or clean up the record.
    pub action: ChallengeAction,

    /// Challenge type, always `dns-01` for webhook solvers.
    #[serde(rename = "type", default)]
    pub challenge_type: String,

    /// The domain being validated (e.g. `example.com`).
    #[serde(rename = "dnsName", default)]
    pub dns_name: String,

    /// The TXT record value to publish.
    #[serde(default)]
    pub key: String,

    /// Namespace of the issuer or challenge resource.
    #[serde(rename = "resourceNamespace", default)]
    pub resource_namespace: String,

    /// Fully-qualified record name, e.g. `_acme-challenge.example.com.`.
    #[serde(rename = "resolvedFQDN", default)]
    pub resolved_fqdn: String,

    /// The zone the record lives in, e.g. `example.com.`.
    #[serde(rename = "resolvedZone", default)]
    pub resolved_zone: String,

    /// Whether ambient credentials may be used.
    #[serde(rename = "allowAmbientCredentials", default)]
    pub allow_ambient_credentials: bool,

    /// Opaque per-issuer solver configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl ChallengeRequest {
    /// Create a request with the fields a solver actually reads.
    pub fn new(
        action: ChallengeAction,
        key: impl Into<String>,
        resolved_fqdn: impl Into<String>,
        resolved_zone: impl Into<String>,
    ) -> Self {
        Self {
            uid: String::new(),
            action,
            challenge_type: "dns-01".to_owned(),
            dns_name: String::new(),
            key: key.into(),
            resource_namespace: String::new(),
            resolved_fqdn: resolved_fqdn.into(),
            resolved_zone: resolved_zone.into(),
            allow_ambient_credentials: false,
            config: None,
        }
    }

    /// Set the request UID.
    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }

    /// Attach a solver configuration blob.
    #[must_use]
    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }
}

/// Subset of a Kubernetes `Status` object describing a failed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeStatus {
    /// `Success` or `Failure`.
    pub status: String,

    /// Human-readable description of the outcome.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// Machine-readable reason, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Suggested HTTP status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl ChallengeStatus {
    /// Build a `Failure` status carrying the given message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: "Failure".to_owned(),
            message: message.into(),
            reason: None,
            code: None,
        }
    }
}

/// The solver's answer to a [`ChallengeRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResponse {
    /// UID of the request this answers.
    #[serde(default)]
    pub uid: String,

    /// Whether the solver completed the action.
    pub success: bool,

    /// Failure details when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ChallengeStatus>,
}

impl ChallengeResponse {
    /// A successful response for the given request UID.
    pub fn success(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            success: true,
            status: None,
        }
    }

    /// A failed response for the given request UID.
    pub fn failure(uid: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            success: false,
            status: Some(ChallengeStatus::failure(message)),
        }
    }
}
