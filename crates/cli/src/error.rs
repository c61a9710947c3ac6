use engine_config::settings::error::SettingsError;
use engine_runtime::error::IngestError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] SettingsError),

    #[error("Failed to run the ingestion: {0}")]
    Runner(#[from] IngestError),

    #[error("Shutdown requested")]
    ShutdownRequested,
}
