use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogrotateError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Parse error in {}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
