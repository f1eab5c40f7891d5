use serde::Deserialize;

/// HTTP(S) listener configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on. The API server aggregation layer expects 443.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Graceful shutdown timeout in seconds.
    ///
    /// Maximum time to wait for in-flight challenge requests to finish after
    /// SIGINT/SIGTERM before connections are dropped.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout_seconds: default_shutdown_timeout(),
        }
    }
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
    443
}

/// Which solvers this deployment registers.
#[derive(Debug, Deserialize)]
pub struct SolverSettings {
    /// Name the solver is referenced by on the issuer
    /// (`webhook.solverName`).
    #[serde(default = "default_solver_name")]
    pub name: String,
    /// Register a logging solver under `name` instead of the Prism Central
    /// one. No outbound requests are made.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            name: default_solver_name(),
            dry_run: false,
        }
    }
}

fn default_solver_name() -> String {
    prismhook_prism_central::DEFAULT_SOLVER_NAME.to_owned()
}

/// Log output configuration.
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit ANSI colour codes.
    #[serde(default)]
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            ansi: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}
