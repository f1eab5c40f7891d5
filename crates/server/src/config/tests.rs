use std::path::Path;

use super::*;
use crate::tls::MinTlsVersion;

#[test]
fn defaults_from_empty_document() {
    let config = PrismhookConfig::from_toml("").unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 443);
    assert_eq!(config.server.shutdown_timeout_seconds, 30);
    assert!(config.tls.key_pair().is_none());
    assert_eq!(config.tls.min_version, "1.2");
    assert_eq!(config.solver.name, "prismcentral-solver");
    assert!(!config.solver.dry_run);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.ansi);
}

#[test]
fn custom_config() {
    let toml = r#"
        [server]
        host = "127.0.0.1"
        port = 8443
        shutdown_timeout_seconds = 5

        [tls]
        cert_path = "/tls/tls.crt"
        key_path = "/tls/tls.key"
        min_version = "1.3"

        [solver]
        name = "pc-lab"
        dry_run = true

        [logging]
        level = "prismhook=debug"
    "#;

    let config = PrismhookConfig::from_toml(toml).unwrap();
    assert_eq!(config.bind_address(), "127.0.0.1:8443");
    assert_eq!(config.server.shutdown_timeout_seconds, 5);
    assert_eq!(config.tls.key_pair(), Some(("/tls/tls.crt", "/tls/tls.key")));
    assert_eq!(config.tls.min_version, "1.3");
    assert_eq!(config.solver.name, "pc-lab");
    assert!(config.solver.dry_run);
    assert_eq!(config.logging.level, "prismhook=debug");
}

#[test]
fn tls_needs_both_paths() {
    let config = PrismhookConfig::from_toml(
        r#"
        [tls]
        cert_path = "/tls/tls.crt"
    "#,
    )
    .unwrap();
    assert!(config.tls.key_pair().is_none());
}

#[test]
fn invalid_toml_is_config_error() {
    let err = PrismhookConfig::from_toml("[server]\nport = \"not-a-port\"").unwrap_err();
    assert!(matches!(err, ServerError::Config(_)));
}

#[test]
fn missing_file_uses_defaults() {
    let (config, loaded) =
        PrismhookConfig::load(Path::new("/nonexistent/prismhook-test.toml")).unwrap();
    assert!(!loaded);
    assert_eq!(config.server.port, 443);
}

#[test]
fn cli_tls_flags_without_config_file_keep_default_min_version() {
    let (mut config, loaded) =
        PrismhookConfig::load(Path::new("/nonexistent/prismhook-test.toml")).unwrap();
    assert!(!loaded);
    assert_eq!(config.tls.min_version, "1.2");

    config.apply(Overrides {
        tls_cert_file: Some("/tls/tls.crt".into()),
        tls_private_key_file: Some("/tls/tls.key".into()),
        ..Overrides::default()
    });

    assert_eq!(config.tls.key_pair(), Some(("/tls/tls.crt", "/tls/tls.key")));
    assert_eq!(
        MinTlsVersion::parse(&config.tls.min_version).unwrap(),
        MinTlsVersion::Tls12
    );
}

#[test]
fn tls_table_without_min_version_defaults() {
    let config = PrismhookConfig::from_toml(
        r#"
        [tls]
        cert_path = "/tls/tls.crt"
        key_path = "/tls/tls.key"
    "#,
    )
    .unwrap();
    assert_eq!(config.tls.min_version, "1.2");
    assert_eq!(TlsConfig::default().min_version, "1.2");
}

#[test]
fn overrides_win_over_file() {
    let mut config = PrismhookConfig::from_toml(
        r#"
        [server]
        host = "127.0.0.1"
        port = 8443
    "#,
    )
    .unwrap();

    config.apply(Overrides {
        host: None,
        port: Some(9443),
        tls_cert_file: Some("/cli/tls.crt".into()),
        tls_private_key_file: Some("/cli/tls.key".into()),
        dry_run: true,
    });

    assert_eq!(config.bind_address(), "127.0.0.1:9443");
    assert_eq!(config.tls.key_pair(), Some(("/cli/tls.crt", "/cli/tls.key")));
    assert!(config.solver.dry_run);
}

#[test]
fn group_name_required() {
    let err = WebhookConfig::new("").unwrap_err();
    assert_eq!(
        err.to_string(),
        "configuration error: GROUP_NAME must be specified"
    );
    assert!(WebhookConfig::new("   ").is_err());
}

#[test]
fn group_name_is_trimmed() {
    let webhook = WebhookConfig::new(" acme.example.com \n").unwrap();
    assert_eq!(webhook.group_name, "acme.example.com");
    assert_eq!(webhook.group_version(), "acme.example.com/v1alpha1");
}
