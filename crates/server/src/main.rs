use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use prismhook_prism_central::PrismCentralSolver;
use prismhook_server::api::AppState;
use prismhook_server::config::{Overrides, PrismhookConfig, WebhookConfig};
use prismhook_server::tls::serve_tls;
use prismhook_solver::{DynSolver, LogSolver, SolverRegistry};

/// DNS-01 webhook solver host for cert-manager.
#[derive(Parser, Debug)]
#[command(
    name = "prismhook-server",
    about = "Serves the Prism Central DNS-01 solver to cert-manager"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "prismhook.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long, alias = "secure-port")]
    port: Option<u16>,

    /// PEM certificate served to the API server.
    #[arg(long)]
    tls_cert_file: Option<String>,

    /// PEM private key for `--tls-cert-file`.
    #[arg(long)]
    tls_private_key_file: Option<String>,

    /// Log challenges instead of calling Prism Central.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Read once, before anything else: no point starting without a group.
    let webhook = WebhookConfig::from_env()?;

    let config_path = Path::new(&cli.config);
    let (mut config, loaded) = PrismhookConfig::load(config_path)?;
    config.apply(Overrides {
        host: cli.host,
        port: cli.port,
        tls_cert_file: cli.tls_cert_file,
        tls_private_key_file: cli.tls_private_key_file,
        dry_run: cli.dry_run,
    });

    prismhook_server::telemetry::init(&config.logging);

    if !loaded {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    // Both ring and aws-lc-rs end up in the tree; pin the process default.
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("a rustls crypto provider was already installed");
    }

    let solver: Arc<dyn DynSolver> = if config.solver.dry_run {
        warn!(solver = %config.solver.name, "dry run: challenges are only logged");
        Arc::new(LogSolver::new(config.solver.name.clone()))
    } else {
        Arc::new(PrismCentralSolver::new().with_name(config.solver.name.clone()))
    };

    let mut solvers = SolverRegistry::new();
    solvers.register(solver);
    for solver in solvers.iter() {
        solver.initialize().await?;
        info!(solver = %solver.name(), "solver registered");
    }

    let app = prismhook_server::api::router(AppState::new(webhook.clone(), solvers));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let drain_timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);

    if let Some(tls_config) = config.tls.server_config()? {
        info!(
            address = %addr,
            group = %webhook.group_name,
            "prismhook-server listening (https)"
        );
        serve_tls(listener, tls_config, app, shutdown_signal(), drain_timeout).await;
    } else {
        warn!("no TLS certificate configured, serving plain HTTP");
        info!(
            address = %addr,
            group = %webhook.group_name,
            "prismhook-server listening (http)"
        );
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let mut server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = stop_rx.await;
                })
                .await
        });

        tokio::select! {
            result = &mut server => result??,
            () = shutdown_signal() => {
                let _ = stop_tx.send(());
                match tokio::time::timeout(drain_timeout, &mut server).await {
                    Ok(result) => result??,
                    Err(_) => {
                        warn!(
                            timeout_secs = config.server.shutdown_timeout_seconds,
                            "shutdown timeout exceeded, dropping open connections"
                        );
                        server.abort();
                    }
                }
            }
        }
    }

    info!("prismhook-server shut down");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM, then return to trigger graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
