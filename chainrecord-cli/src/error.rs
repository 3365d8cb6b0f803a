use std::io;

use chainrecord_lib::StoreError;
use thiserror::Error;

/// Failures of the command-line host itself, as opposed to ledger results.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] chainrecord_lib::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to bind to {addr}: {source}")]
    Bind { addr: String, source: io::Error },

    #[error("server error: {0}")]
    Server(#[source] io::Error),

    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

impl CliError {
    /// Stable failure kind, shared with the ledger taxonomy where it applies.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Ledger(e) => e.kind(),
            CliError::Store(_) => "StoreError",
            CliError::Bind { .. } | CliError::Server(_) => "ServerError",
            CliError::Render(_) => "RenderError",
        }
    }
}
