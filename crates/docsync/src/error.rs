//! CLI error types.

use docsync_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{failed} of {total} file(s) could not be synced")]
    SyncFailed { failed: usize, total: usize },
}
