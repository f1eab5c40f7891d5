use prismhook_solver::SolverError;
use thiserror::Error;

/// Errors specific to the Prism Central solver.
///
/// These keep the typed cause and get converted into [`SolverError`] at the
/// solver trait boundary.
#[derive(Debug, Error)]
pub enum PrismCentralError {
    /// The per-issuer config blob is not valid solver configuration.
    #[error("error decoding solver config: {0}")]
    ConfigDecode(#[source] serde_json::Error),

    /// The trigger payload could not be serialized.
    #[error("error marshaling JSON: {0}")]
    RequestBuild(#[source] serde_json::Error),

    /// The request could not be built or delivered (bad URL, DNS failure,
    /// refused connection, TLS failure).
    #[error("error sending request: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with something other than HTTP 200.
    #[error("received non-OK response code: {status}")]
    UnexpectedStatus { status: u16 },
}

/// Render an error together with its `source()` chain.
///
/// `reqwest` keeps the useful part ("connection refused") several levels
/// down, which `Display` alone drops.
fn display_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

impl From<PrismCentralError> for SolverError {
    fn from(err: PrismCentralError) -> Self {
        match err {
            PrismCentralError::ConfigDecode(e) => SolverError::ConfigDecode(e.to_string()),
            PrismCentralError::RequestBuild(e) => SolverError::RequestBuild(e.to_string()),
            PrismCentralError::Transport(e) => SolverError::Transport(display_chain(&e)),
            PrismCentralError::UnexpectedStatus { status } => SolverError::UnexpectedStatus(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::de::Error as _;

    use super::*;

    #[test]
    fn unexpected_status_maps_through() {
        let err: SolverError = PrismCentralError::UnexpectedStatus { status: 503 }.into();
        assert!(matches!(err, SolverError::UnexpectedStatus(503)));
    }

    #[test]
    fn config_decode_maps_through() {
        let err: SolverError =
            PrismCentralError::ConfigDecode(serde_json::Error::custom("bad field")).into();
        assert!(matches!(err, SolverError::ConfigDecode(ref m) if m == "bad field"));
        assert_eq!(err.to_string(), "error decoding solver config: bad field");
    }

    #[test]
    fn request_build_maps_through() {
        let err: SolverError =
            PrismCentralError::RequestBuild(serde_json::Error::custom("nope")).into();
        assert!(matches!(err, SolverError::RequestBuild(_)));
    }

    #[test]
    fn error_display() {
        let err = PrismCentralError::UnexpectedStatus { status: 401 };
        assert_eq!(err.to_string(), "received non-OK response code: 401");
    }

    #[test]
    fn display_chain_appends_sources() {
        #[derive(Debug, Error)]
        #[error("outer")]
        struct Outer(#[source] Inner);

        #[derive(Debug, Error)]
        #[error("inner")]
        struct Inner;

        assert_eq!(display_chain(&Outer(Inner)), "outer: inner");
    }
}
