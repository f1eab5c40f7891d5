mod server;
mod tls;
mod webhook;

#[cfg(test)]
mod tests;

pub use server::*;
pub use tls::*;
pub use webhook::*;

use std::path::Path;

use serde::Deserialize;

use crate::error::ServerError;

/// Top-level configuration for the webhook host, loaded from a TOML file.
///
/// Every section is optional; a missing file yields the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PrismhookConfig {
    /// Listener configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Server-side TLS.
    #[serde(default)]
    pub tls: TlsConfig,
    /// Solver registration.
    #[serde(default)]
    pub solver: SolverSettings,
    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tls_cert_file: Option<String>,
    pub tls_private_key_file: Option<String>,
    pub dry_run: bool,
}

impl PrismhookConfig {
    /// Parse a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self, ServerError> {
        toml::from_str(contents).map_err(|e| ServerError::Config(format!("invalid config: {e}")))
    }

    /// Load configuration from `path`, or the defaults if the file does not
    /// exist. The flag reports whether a file was read.
    pub fn load(path: &Path) -> Result<(Self, bool), ServerError> {
        if !path.exists() {
            return Ok((Self::default(), false));
        }
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Ok((Self::from_toml(&contents)?, true))
    }

    /// Apply command-line overrides.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(cert) = overrides.tls_cert_file {
            self.tls.cert_path = Some(cert);
        }
        if let Some(key) = overrides.tls_private_key_file {
            self.tls.key_path = Some(key);
        }
        if overrides.dry_run {
            self.solver.dry_run = true;
        }
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
