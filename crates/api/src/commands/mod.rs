//! Commands module - CLI command implementations.

pub mod migrate;
pub mod serve;

use thiserror::Error;

use common::{AppError, ConfigError};

/// Failures that abort a command.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("{0:?}")]
    App(#[from] AppError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CommandResult = Result<(), CommandError>;
