// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! credstream - vault credential resolution with secret-masked output.
//!
//! This is the CLI entry point. `check` tests connectivity, `resolve` prints
//! resolved values, and `run` wraps a child command with injected env vars
//! and masked output.

use clap::{Args, Parser, Subcommand};
use credstream_config::CredstreamConfig;
use credstream_core::{CredstreamError, FieldSelector};
use credstream_mask::MaskRegistry;
use credstream_vault::{CredentialHandle, VaultClient};
use secrecy::ExposeSecret;

mod check;
mod env_store;
mod resolve;
mod run;

use env_store::EnvBootstrapStore;

/// credstream - vault credential resolution with secret-masked output.
#[derive(Parser, Debug)]
#[command(name = "credstream", version, about, long_about = None)]
struct Cli {
    /// Path to a specific config file (bypasses the XDG hierarchy).
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Flags identifying one credential-resolution request.
#[derive(Args, Debug, Default)]
struct ResolveArgs {
    /// Id of the secret to resolve.
    #[arg(long)]
    secret_id: i64,

    /// Vault base URL (overrides config).
    #[arg(long)]
    vault_url: Option<String>,

    /// Bootstrap credential id (overrides config).
    #[arg(long)]
    credential_id: Option<String>,

    /// Label of the field holding the username (overrides config).
    #[arg(long)]
    username_field: Option<String>,

    /// Label of the field holding the password (overrides config).
    #[arg(long)]
    password_field: Option<String>,

    /// Opaque host-side scope passed to the bootstrap lookup.
    #[arg(long)]
    scope: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Test connectivity by resolving the credential once.
    Check(ResolveArgs),
    /// Resolve and print the username, or env exports with --export.
    Resolve {
        #[command(flatten)]
        args: ResolveArgs,
        /// Print {prefix}USERNAME= / {prefix}PASSWORD= lines.
        #[arg(long)]
        export: bool,
    },
    /// Run a command with resolved values injected and its output masked.
    Run {
        #[command(flatten)]
        args: ResolveArgs,
        /// The command and its arguments.
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },
}

/// One configured resolution request, ready to execute.
#[derive(Debug)]
struct Target {
    handle: CredentialHandle,
    store: EnvBootstrapStore,
    scope: Option<String>,
    env_prefix: String,
}

fn build_target(config: &CredstreamConfig, args: &ResolveArgs) -> Result<Target, CredstreamError> {
    let vault_url = args
        .vault_url
        .clone()
        .unwrap_or_else(|| config.vault.base_url.clone());
    let credential_id = args
        .credential_id
        .clone()
        .unwrap_or_else(|| config.vault.credential_id.clone());
    if credential_id.is_empty() {
        return Err(CredstreamError::Config(
            "no bootstrap credential id configured (set vault.credential_id or pass --credential-id)"
                .to_string(),
        ));
    }
    let username_label = args
        .username_field
        .as_deref()
        .unwrap_or(&config.selectors.username);
    let password_label = args
        .password_field
        .as_deref()
        .unwrap_or(&config.selectors.password);

    let client = VaultClient::from_config(&config.vault)?;
    Ok(Target {
        handle: CredentialHandle::new(
            client,
            vault_url,
            credential_id,
            args.secret_id,
            FieldSelector::from_label(username_label),
            FieldSelector::from_label(password_label),
        ),
        store: EnvBootstrapStore::new(config.vault.env_prefix.clone()),
        scope: args.scope.clone(),
        env_prefix: config.vault.env_prefix.clone(),
    })
}

async fn run_command(target: &Target, command: &[String]) -> i32 {
    let credential = match target
        .handle
        .resolve(&target.store, target.scope.as_deref())
        .await
    {
        Ok(credential) => credential,
        Err(e) => {
            eprintln!("{e}");
            return 1;
        }
    };

    // Everything the child prints is scrubbed of the values injected here.
    let registry = MaskRegistry::new();
    registry.register(&credential);
    let envs = vec![
        (
            format!("{}USERNAME", target.env_prefix),
            credential.username.clone(),
        ),
        (
            format!("{}PASSWORD", target.env_prefix),
            credential.password.expose_secret().to_owned(),
        ),
    ];

    match run::run_masked(command, envs, &registry) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("failed to run command: {e}");
            1
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = {
        let loaded = match &cli.config {
            Some(path) => credstream_config::load_and_validate_path(path),
            None => credstream_config::load_and_validate(),
        };
        match loaded {
            Ok(config) => config,
            Err(errors) => {
                credstream_config::render_errors(&errors);
                std::process::exit(1);
            }
        }
    };

    let code = match &cli.command {
        Commands::Check(args) => match build_target(&config, args) {
            Ok(target) => check::run(&target.handle, &target.store, target.scope.as_deref()).await,
            Err(e) => {
                eprintln!("{e}");
                1
            }
        },
        Commands::Resolve { args, export } => match build_target(&config, args) {
            Ok(target) => {
                resolve::run(
                    &target.handle,
                    &target.store,
                    target.scope.as_deref(),
                    &target.env_prefix,
                    *export,
                )
                .await
            }
            Err(e) => {
                eprintln!("{e}");
                1
            }
        },
        Commands::Run { args, command } => match build_target(&config, args) {
            Ok(target) => run_command(&target, command).await,
            Err(e) => {
                eprintln!("{e}");
                1
            }
        },
    };
    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn flag_overrides_beat_config() {
        let config = credstream_config::load_and_validate_str(
            "[vault]\nbase_url = \"https://from-config\"\ncredential_id = \"boot\"\n",
        )
        .unwrap();
        let args = ResolveArgs {
            secret_id: 42,
            credential_id: Some("other".into()),
            ..ResolveArgs::default()
        };
        // Building succeeds with the flag-supplied credential id.
        assert!(build_target(&config, &args).is_ok());
    }

    #[test]
    fn missing_credential_id_is_a_config_error() {
        let config = CredstreamConfig::default();
        let args = ResolveArgs {
            secret_id: 42,
            ..ResolveArgs::default()
        };
        let err = build_target(&config, &args).unwrap_err();
        assert!(matches!(err, CredstreamError::Config(_)));
    }

    /// The full pipeline: bootstrap lookup -> vault fetch -> extraction ->
    /// registry -> masked child output.
    #[tokio::test(flavor = "multi_thread")]
    #[serial]
    async fn resolve_then_run_masks_child_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok-123"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/secrets/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 42,
                "items": [
                    {"fieldName": "Username", "slug": "username", "itemValue": "svc1"},
                    {"fieldName": "Password", "slug": "password", "itemValue": "p@ss"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        unsafe { std::env::set_var("TSS_BOOT_USERNAME", "boot-user") };
        unsafe { std::env::set_var("TSS_BOOT_PASSWORD", "boot-pass") };

        let config = credstream_config::load_and_validate_str(&format!(
            "[vault]\nbase_url = \"{}\"\ncredential_id = \"boot\"\n",
            server.uri()
        ))
        .unwrap();
        let args = ResolveArgs {
            secret_id: 42,
            ..ResolveArgs::default()
        };
        let target = build_target(&config, &args).unwrap();

        let credential = target
            .handle
            .resolve(&target.store, None)
            .await
            .unwrap();

        unsafe { std::env::remove_var("TSS_BOOT_USERNAME") };
        unsafe { std::env::remove_var("TSS_BOOT_PASSWORD") };

        let registry = MaskRegistry::new();
        registry.register(&credential);
        let (code, out, _) = run::run_masked_with(
            &["sh".into(), "-c".into(), "echo got p@ss for svc1".into()],
            vec![],
            &registry,
            Vec::new(),
            Vec::new(),
        )
        .unwrap();

        assert_eq!(code, 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "got [REDACTED] for [REDACTED]\n"
        );
    }
}
