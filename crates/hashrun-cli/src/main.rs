//! hashrun - supervised hashcat runs with ntfy notifications.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use hashrun_notify::{build_notifier, LogNotifier, Notifier};
use hashrun_stager::ArtifactStager;
use hashrun_supervisor::{AttackSupervisor, EXIT_CODE_UNKNOWN};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod error;

use cli::Cli;
use config::Config;
use error::{RunError, EXIT_MISSING_TARGET};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let config = Config::from_cli(cli);

    info!(
        notifications = if config.notify.disabled { "disabled" } else { "enabled" },
        work_dir = %config.stager.work_dir.display(),
        "Starting hashcat wrapper"
    );

    let (notifier, exit_code): (Arc<dyn Notifier>, i32) = match build_notifier(&config.notify) {
        Ok(notifier) => {
            let code = match run(&config, Arc::clone(&notifier)).await {
                Ok(code) => code,
                Err(e) => {
                    error!(error = %e, "Run aborted");
                    match e {
                        RunError::MissingTarget => EXIT_MISSING_TARGET,
                        _ => EXIT_CODE_UNKNOWN,
                    }
                }
            };
            (notifier, code)
        }
        Err(e) => {
            // Nothing runs without a working notifier; the outcome still goes to the log.
            error!(error = %e, "Cannot set up notifications");
            let fallback: Arc<dyn Notifier> = Arc::new(LogNotifier::new());
            (fallback, EXIT_CODE_UNKNOWN)
        }
    };

    notifier
        .notify(&format!(
            "Finished on host {} (exit code: {})",
            hostname(),
            exit_code
        ))
        .await;

    Ok(ExitCode::from(process_exit_code(exit_code)))
}

/// Stage inputs, then run hashcat under supervision.
///
/// Returns hashcat's exit code; `Err` only when nothing could be started.
async fn run(config: &Config, notifier: Arc<dyn Notifier>) -> Result<i32, RunError> {
    let target = config.target.as_ref().ok_or(RunError::MissingTarget)?;
    let stager = ArtifactStager::new(config.stager.clone())?;

    let targets = stager.stage(target).await?;
    info!(targets = ?targets, "Hash targets ready");

    let mut attack_params = config.attack_params.clone();
    if let Some(wordlist) = &config.wordlist {
        let wordlists: Vec<PathBuf> = stager.stage(wordlist).await?;
        info!(wordlists = ?wordlists, "Wordlists ready");
        attack_params.extend(wordlists.iter().map(|p| p.display().to_string()));
    }

    let supervisor = AttackSupervisor::new(config.supervisor.clone(), notifier);
    let outcome = supervisor.run(&targets, &attack_params).await?;

    info!(
        exit_code = outcome.exit_code,
        elapsed_secs = outcome.elapsed.as_secs(),
        snapshots = outcome.snapshots_seen,
        summaries = outcome.summaries_sent,
        results = outcome.results_delivered,
        "Run complete"
    );
    Ok(outcome.exit_code)
}

fn hostname() -> String {
    if let Ok(name) = std::env::var("HOSTNAME") {
        if !name.trim().is_empty() {
            return name.trim().to_string();
        }
    }
    match std::fs::read_to_string("/etc/hostname") {
        Ok(name) if !name.trim().is_empty() => name.trim().to_string(),
        Ok(_) => "unknown".to_string(),
        Err(e) => {
            warn!(error = %e, "Cannot determine hostname");
            "unknown".to_string()
        }
    }
}

/// Map a run exit code onto a process exit status: negative codes become 1,
/// larger ones are clamped to 255.
fn process_exit_code(code: i32) -> u8 {
    if code < 0 {
        1
    } else {
        u8::try_from(code).unwrap_or(u8::MAX)
    }
}
