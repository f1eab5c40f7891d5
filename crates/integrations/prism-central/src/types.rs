use prismhook_core::ChallengeRequest;
use serde::{Deserialize, Serialize};

/// Trigger type understood by the incoming-webhook endpoint.
pub const INCOMING_WEBHOOK_TRIGGER: &str = "incoming_webhook_trigger";

/// Operation tag sent in `string1`. The endpoint keys its playbook off this
/// value and only knows `Add`, so clean-up sends it too.
pub const OPERATION_ADD: &str = "Add";

/// One trigger invocation. The endpoint only accepts positional string slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerInstance {
    pub webhook_id: String,
    /// Operation tag.
    pub string1: String,
    /// Challenge key (TXT record value).
    pub string2: String,
    /// Resolved FQDN of the record.
    pub string3: String,
    /// Resolved zone.
    pub string4: String,
}

impl TriggerInstance {
    /// Build the instance for a challenge request.
    pub fn for_challenge(webhook_id: impl Into<String>, request: &ChallengeRequest) -> Self {
        Self {
            webhook_id: webhook_id.into(),
            string1: OPERATION_ADD.to_owned(),
            string2: request.key.clone(),
            string3: request.resolved_fqdn.clone(),
            string4: request.resolved_zone.clone(),
        }
    }
}

/// Request body POSTed to the trigger endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerPayload {
    pub trigger_type: String,
    pub trigger_instance_list: Vec<TriggerInstance>,
}

impl TriggerPayload {
    /// An `incoming_webhook_trigger` payload carrying a single instance.
    pub fn incoming_webhook(instance: TriggerInstance) -> Self {
        Self {
            trigger_type: INCOMING_WEBHOOK_TRIGGER.to_owned(),
            trigger_instance_list: vec![instance],
        }
    }
}
