use thiserror::Error;

/// Errors that can occur while solving a challenge.
///
/// Every variant carries a human-readable message including the underlying
/// cause, so the host can report it to the controller verbatim.
#[derive(Debug, Error)]
pub enum SolverError {
    /// No solver is registered under the requested name.
    #[error("solver not found: {0}")]
    NotFound(String),

    /// The per-issuer solver configuration could not be decoded.
    #[error("error decoding solver config: {0}")]
    ConfigDecode(String),

    /// The outbound request could not be built or serialized.
    #[error("error building request: {0}")]
    RequestBuild(String),

    /// A network or transport-level error occurred.
    #[error("error sending request: {0}")]
    Transport(String),

    /// The remote endpoint answered with a status other than 200.
    #[error("received non-OK response code: {0}")]
    UnexpectedStatus(u16),

    /// The solver was given invalid static configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}
