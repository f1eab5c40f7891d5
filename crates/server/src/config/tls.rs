use std::sync::Arc;

use serde::Deserialize;

use crate::tls::{MinTlsVersion, TlsError, build_server_config};

/// Server-side TLS for the webhook listener.
///
/// TLS is enabled when both `cert_path` and `key_path` are set.
///
/// # Example
///
/// ```toml
/// [tls]
/// cert_path = "/tls/tls.crt"
/// key_path = "/tls/tls.key"
/// ```
#[derive(Debug, Deserialize)]
pub struct TlsConfig {
    /// Path to the server certificate PEM file.
    #[serde(default)]
    pub cert_path: Option<String>,

    /// Path to the server private key PEM file.
    #[serde(default)]
    pub key_path: Option<String>,

    /// Path to the CA certificate for client cert verification (enables inbound mTLS).
    #[serde(default)]
    pub client_ca_path: Option<String>,

    /// Minimum TLS version: `"1.2"` (default) or `"1.3"`.
    #[serde(default = "default_min_version")]
    pub min_version: String,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_path: None,
            key_path: None,
            client_ca_path: None,
            min_version: default_min_version(),
        }
    }
}

impl TlsConfig {
    /// Certificate and key paths, if both are configured.
    pub fn key_pair(&self) -> Option<(&str, &str)> {
        match (self.cert_path.as_deref(), self.key_path.as_deref()) {
            (Some(cert), Some(key)) => Some((cert, key)),
            _ => None,
        }
    }

    /// Build the rustls server config, or `None` when no key pair is set.
    pub fn server_config(&self) -> Result<Option<Arc<rustls::ServerConfig>>, TlsError> {
        let Some((cert_path, key_path)) = self.key_pair() else {
            return Ok(None);
        };
        let min_version = MinTlsVersion::parse(&self.min_version)?;
        build_server_config(
            cert_path,
            key_path,
            self.client_ca_path.as_deref(),
            min_version,
        )
        .map(Some)
    }
}

fn default_min_version() -> String {
    "1.2".to_owned()
}
