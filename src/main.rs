// ABOUTME: Entry point for the stratus CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use std::env;
use std::path::PathBuf;
use stratus::api::{ClientError, HttpClient};
use stratus::config::{self, Config};
use stratus::deploy::Orchestrator;
use stratus::diagnostics::Diagnostics;
use stratus::error::{Error, Result};
use stratus::health::HttpProber;
use stratus::inspect;
use stratus::monitor::Monitor;
use stratus::output::{ConsoleReporter, Output, OutputMode};
use stratus::reconcile;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    if let Err(e) = run(cli, mode).await {
        Output::new(mode).error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, mode: OutputMode) -> Result<()> {
    match cli.command {
        Commands::Init { service_id, force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, service_id.as_deref(), force)?;
            Output::new(mode).success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Deploy => {
            let config = load_config(cli.config.as_deref())?;
            deploy(config, mode).await
        }
        Commands::Rollback => {
            let config = load_config(cli.config.as_deref())?;
            rollback(config, mode).await
        }
        Commands::Sync { env_file } => {
            let config = load_config(cli.config.as_deref())?;
            sync(config, env_file, mode).await
        }
        Commands::Status => {
            let config = load_config(cli.config.as_deref())?;
            status(config, mode).await
        }
        Commands::Monitor => {
            let config = load_config(cli.config.as_deref())?;
            monitor(config, mode).await
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => {
            let cwd = env::current_dir()?;
            Config::discover(&cwd)
        }
    }
}

fn build_client(config: &Config) -> Result<HttpClient> {
    let token = config.api.token.resolve()?;
    let client = HttpClient::new(&config.api.base_url, token, config.api.timeout)?;
    Ok(client)
}

fn build_prober(config: &Config) -> Result<HttpProber> {
    HttpProber::new(config.health.timeout).map_err(|e| Error::Client(ClientError::from(e)))
}

/// Run a full deploy and report the outcome.
async fn deploy(config: Config, mode: OutputMode) -> Result<()> {
    let client = build_client(&config)?;
    let prober = build_prober(&config)?;

    let mut output = Output::new(mode);
    output.start_timer();
    output.progress(&format!("Deploying service {}", config.service_id));

    let orchestrator = Orchestrator::new(
        client,
        prober,
        config.service_id.clone(),
        config.service_url.clone(),
        config.deploy.clone(),
    );

    let reporter = ConsoleReporter::new(Output::new(mode));
    let mut diagnostics = Diagnostics::default();

    let live = orchestrator.deploy(&reporter, &mut diagnostics).await?;

    output.success(&format!("Deployed {} ({})", live.id, live.status));
    for warning in diagnostics.warnings() {
        output.warning(&warning.message);
    }
    Ok(())
}

/// Report the rollback target. This never mutates anything remotely; the
/// platform has no rollback endpoint, so acting on the target is up to the
/// operator.
async fn rollback(config: Config, mode: OutputMode) -> Result<()> {
    let client = build_client(&config)?;
    let prober = build_prober(&config)?;
    let output = Output::new(mode);

    let orchestrator = Orchestrator::new(
        client,
        prober,
        config.service_id.clone(),
        config.service_url.clone(),
        config.deploy.clone(),
    );

    match orchestrator.rollback_target().await.map_err(Error::from)? {
        Some(target) => {
            let commit = target
                .commit
                .as_ref()
                .and_then(|c| c.hash.as_deref())
                .unwrap_or("unknown commit");
            output.success(&format!(
                "Rollback target: {} (created {}, {commit})",
                target.id, target.created_at
            ));
        }
        None => {
            output.success("Rollback target unavailable: fewer than two live deploys in history");
        }
    }
    Ok(())
}

/// Sync the local env file to the control plane.
async fn sync(config: Config, env_file: Option<PathBuf>, mode: OutputMode) -> Result<()> {
    let client = build_client(&config)?;
    let output = Output::new(mode);

    let path = env_file
        .or_else(|| config.env_file.clone())
        .ok_or_else(|| {
            Error::InvalidConfig(
                "no env file specified; pass --env-file or set env_file in stratus.yml".to_string(),
            )
        })?;

    let local = config::parse_env_file(&path)?;
    output.progress(&format!(
        "Syncing {} variable(s) from {} to service {}",
        local.len(),
        path.display(),
        config.service_id
    ));

    match reconcile::sync(&client, &config.service_id, &local).await {
        Ok(report) => {
            output.success(&format!("Environment in sync {report}"));
            Ok(())
        }
        Err(reconcile::SyncError::Partial { report, failures }) => {
            for failure in &failures {
                output.warning(&format!("{}: {}", failure.key, failure.error));
            }
            output.progress(&format!("Partial progress before failure: {report}"));
            Err(Error::Sync(reconcile::SyncError::Partial {
                report,
                failures,
            }))
        }
        Err(e) => Err(Error::Sync(e)),
    }
}

/// Show a point-in-time snapshot of the service.
async fn status(config: Config, mode: OutputMode) -> Result<()> {
    let client = build_client(&config)?;
    let prober = build_prober(&config)?;
    let output = Output::new(mode);

    let snapshot = inspect::fetch_status(
        &client,
        &prober,
        &config.service_id,
        config.service_url.as_deref(),
    )
    .await?;

    if mode == OutputMode::Json {
        println!("{}", serde_json::to_string(&snapshot)?);
        return Ok(());
    }

    let service = &snapshot.service;
    output.progress(&format!("Service: {} ({})", service.name, service.id));
    output.progress(&format!("  Kind: {}", service.kind));
    output.progress(&format!("  State: {}", service.state));
    if let Some(url) = &service.url {
        output.progress(&format!("  URL: {url}"));
    }
    match &snapshot.latest_deploy {
        Some(deploy) => output.progress(&format!(
            "  Latest deploy: {} ({}, created {})",
            deploy.id, deploy.status, deploy.created_at
        )),
        None => output.progress("  Latest deploy: none"),
    }
    match &snapshot.health {
        Some(health) => output.progress(&format!("  Health: {health}")),
        None => output.progress("  Health: not probed (no public URL)"),
    }

    let summary = format!(
        "{} is {}",
        service.name,
        snapshot
            .health
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| service.state.to_string())
    );
    output.success(&summary);
    Ok(())
}

/// Watch service health until Ctrl-C.
async fn monitor(config: Config, mode: OutputMode) -> Result<()> {
    let client = build_client(&config)?;
    let prober = build_prober(&config)?;
    let output = Output::new(mode);

    let monitor = Monitor::new(
        client,
        prober,
        config.service_id.clone(),
        config.service_url.clone(),
        config.monitor.clone(),
    );

    output.progress(&format!(
        "Monitoring {} every {:?} (Ctrl-C to stop)",
        config.service_id, config.monitor.interval
    ));

    let reporter = ConsoleReporter::new(Output::new(mode));
    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    let checks = monitor.run(&reporter, shutdown).await;
    output.success(&format!("Monitoring stopped after {checks} check(s)"));
    Ok(())
}
