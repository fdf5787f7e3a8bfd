use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, trace};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

mod cli;

use brokerctl_remote as remote;
use brokerctl_util as util;

use crate::cli::Cli;
use crate::remote::{
    ConfigSubmitter, EnvironmentTable, PreparedSubmission, RemoteConfig, RequestConfig,
    SubmitError,
};
use crate::util::config::{self, ReadConfigError};
use crate::util::dirs;

fn initialize_tracing() {
    // Initialize tracing subscriber for human-readable logs
    tracing_subscriber::registry()
        .with(
            // Use some log defaults. These can be overriden using
            // RUST_LOG
            EnvFilter::try_from_default_env().unwrap_or(
                EnvFilter::default()
                    .add_directive("info".parse().unwrap())
                    .add_directive("hyper=error".parse().unwrap())
                    .add_directive("reqwest=warn".parse().unwrap()),
            ),
        )
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_span_events(FmtSpan::CLOSE)
                .event_format(fmt::format().compact().with_target(false).without_time()),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    initialize_tracing();

    let cli = cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(err) = err.downcast_ref::<SubmitError>() {
                eprintln!("{}: {err}", err.title());
            } else {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let environments = load_environments(cli.environments_file.as_deref(), &dirs::config_dir())
        .await
        .context("failed to load environment table")?;
    trace!(environments = ?environments, "using environments:");

    let submitter = ConfigSubmitter::new(RemoteConfig {
        environments,
        request: RequestConfig {
            timeout: cli.request_timeout,
        },
    });

    let dry_run = cli.dry_run;
    let request = cli.into_request();
    if dry_run {
        let prepared = submitter.prepare(request)?;
        print_dry_run(&mut io::stdout().lock(), &prepared)?;
        return Ok(());
    }

    submitter.submit(request).await?;
    println!("Custom message sent successfully.");

    Ok(())
}

/// Start from the built-in table and apply any entries from the given file,
/// or from `config_dir` when no file is given.
async fn load_environments(
    path: Option<&Path>,
    config_dir: &Path,
) -> Result<EnvironmentTable, ReadConfigError> {
    let mut environments = EnvironmentTable::default();

    let stored = if let Some(path) = path {
        Some(config::read_file::<EnvironmentTable, _>(path).await?)
    } else {
        config::get_in::<EnvironmentTable, _>(config_dir).await?
    };

    if let Some(stored) = stored {
        debug!("applying stored environments");
        environments.merge(stored);
    }

    Ok(environments)
}

fn print_dry_run(out: &mut impl Write, prepared: &PreparedSubmission) -> Result<()> {
    let message = prepared.message();
    writeln!(out, "Environment:      {}", prepared.environment())?;
    writeln!(out, "Token endpoint:   {}", prepared.token_endpoint())?;
    writeln!(out, "Message endpoint: {}", prepared.message_endpoint())?;
    writeln!(out, "Effective broker: {}", message.effective_broker())?;
    writeln!(
        out,
        "Reporting owner:  {}",
        message.owner_id().unwrap_or_default()
    )?;
    writeln!(out, "Update topic:     {}", message.update_topic())?;
    writeln!(out, "Status topic:     {}", message.status_topic())?;
    writeln!(out, "Data topic:       {}", message.data_topic())?;
    writeln!(out, "Payload:")?;
    writeln!(out, "{}", serde_json::to_string_pretty(&message.redacted())?)?;
    Ok(())
}
