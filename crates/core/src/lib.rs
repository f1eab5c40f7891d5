pub mod challenge;
pub mod payload;

pub use challenge::{ChallengeAction, ChallengeRequest, ChallengeResponse, ChallengeStatus};
pub use payload::{CHALLENGE_API_VERSION, CHALLENGE_KIND, ChallengePayload};
