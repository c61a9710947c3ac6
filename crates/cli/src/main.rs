use crate::{
    error::CliError,
    shutdown::{ExitCode, ShutdownCoordinator},
};
use engine_config::{
    env::EnvManager,
    report::summary::{RunStatus, RunSummary},
    settings::IngestSettings,
};
use engine_runtime::execution::executor;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod error;
mod shutdown;

const ENV_FILE: &str = ".env";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let shutdown = ShutdownCoordinator::new(CancellationToken::new());
    shutdown.register_handlers();

    let code = match run(&shutdown).await {
        Ok(summary) => exit_code(&summary),
        Err(CliError::ShutdownRequested) => ExitCode::ShutdownRequested,
        Err(e) => {
            error!(error = %e, "Ingestion aborted");
            ExitCode::GeneralError
        }
    };

    std::process::exit(code.as_i32());
}

async fn run(shutdown: &ShutdownCoordinator) -> Result<RunSummary, CliError> {
    let mut env = EnvManager::new();
    if env.load_if_present(ENV_FILE)? {
        info!(path = ENV_FILE, "Loaded environment file");
    }

    let settings = IngestSettings::from_env(&env)?;
    if shutdown.is_shutdown_requested() {
        return Err(CliError::ShutdownRequested);
    }

    let summary = executor::run(settings, shutdown.cancel_token()).await?;
    summary.log();
    Ok(summary)
}

fn exit_code(summary: &RunSummary) -> ExitCode {
    match summary.status {
        RunStatus::Succeeded => ExitCode::Success,
        RunStatus::CompletedWithFailures => ExitCode::GeneralError,
        RunStatus::Cancelled => ExitCode::ShutdownRequested,
    }
}
