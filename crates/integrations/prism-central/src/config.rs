use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PrismCentralError;

/// Per-issuer solver configuration, decoded from the challenge's opaque
/// `config` blob.
///
/// All fields are plain strings. Missing or `null` fields decode as empty
/// strings; no further validation happens here, so an empty endpoint only
/// fails once the request is sent.
///
/// ```yaml
/// webhook:
///   groupName: acme.example.com
///   solverName: prismcentral-solver
///   config:
///     username: admin
///     password: hunter2
///     apiEndpoint: https://pc.example.com:9440/api/nutanix/v3/action_rules/trigger
///     webhookID: 90836c84-38ce-456e-b595-7bdab0bdffb3
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Basic-auth user name.
    #[serde(deserialize_with = "null_as_empty")]
    pub username: String,

    /// Basic-auth password.
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,

    /// Full URL the trigger is POSTed to.
    #[serde(rename = "apiEndpoint", deserialize_with = "null_as_empty")]
    pub api_endpoint: String,

    /// Identifier of the incoming-webhook trigger on the remote side.
    #[serde(rename = "webhookID", deserialize_with = "null_as_empty")]
    pub webhook_id: String,
}

impl ProviderConfig {
    /// Decode the configuration carried on a challenge request.
    ///
    /// An absent blob (or JSON `null`) yields the zero-valued config. Anything
    /// that is not a JSON object, or an object with non-string fields, fails
    /// with [`PrismCentralError::ConfigDecode`].
    pub fn decode(raw: Option<&serde_json::Value>) -> Result<Self, PrismCentralError> {
        match raw {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(value) if !value.is_object() => Err(PrismCentralError::ConfigDecode(
                serde_json::Error::custom(format!("expected a JSON object, got {value}")),
            )),
            Some(value) => Self::deserialize(value).map_err(PrismCentralError::ConfigDecode),
        }
    }

    /// Decode the configuration from raw JSON bytes.
    pub fn from_slice(raw: &[u8]) -> Result<Self, PrismCentralError> {
        let value: serde_json::Value =
            serde_json::from_slice(raw).map_err(PrismCentralError::ConfigDecode)?;
        Self::decode(Some(&value))
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("api_endpoint", &self.api_endpoint)
            .field("webhook_id", &self.webhook_id)
            .finish()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
