//! Errors raised outside the parser, when talking to the filesystem, the
//! configuration files or the network.

use crate::grid::formats::FormatError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("invalid configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("server error: {0}")]
    Server(String),

    #[error(transparent)]
    Format(#[from] FormatError),
}

pub type Result<T> = std::result::Result<T, Error>;
