use crate::error::ServerError;

/// Environment variable naming the API group the solvers are served under.
pub const GROUP_NAME_ENV: &str = "GROUP_NAME";

/// Version of the challenge API served under the group.
pub const API_VERSION: &str = "v1alpha1";

/// Process-wide webhook identity, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// API group, e.g. `acme.example.com`. Must match the issuer's
    /// `webhook.groupName`.
    pub group_name: String,
}

impl WebhookConfig {
    /// Validate and wrap a group name.
    pub fn new(group_name: impl Into<String>) -> Result<Self, ServerError> {
        let group_name = group_name.into().trim().to_owned();
        if group_name.is_empty() {
            return Err(ServerError::Config(format!(
                "{GROUP_NAME_ENV} must be specified"
            )));
        }
        Ok(Self { group_name })
    }

    /// Read the group name from the [`GROUP_NAME_ENV`] environment variable.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::new(std::env::var(GROUP_NAME_ENV).unwrap_or_default())
    }

    /// `<group>/<version>`.
    pub fn group_version(&self) -> String {
        format!("{}/{API_VERSION}", self.group_name)
    }
}
