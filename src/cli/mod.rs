//! Line-oriented shell over [`crate::core::LedgerController`].
//!
//! The shell is a presentation adapter only: it parses arguments, forwards
//! commands to the controller and renders the recomputed views. Sessions are
//! kept in memory.

mod commands;
mod context;
pub mod output;
mod registry;
mod shell;

use std::io;

use crate::{core::services::ServiceError, errors::LedgerError};

pub use context::{CliMode, ShellContext};
pub use registry::{CommandEntry, CommandHandler, CommandRegistry};
pub use shell::{run_cli, run_lines};

/// Fatal shell errors that end the session.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Errors from a single command; reported and then the shell continues.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("exit requested")]
    ExitRequested,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Ledger(err) => CommandError::Ledger(err),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
        }
    }
}

pub type CommandResult = Result<(), CommandError>;
