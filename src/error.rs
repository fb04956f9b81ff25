use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrossmanError {
    /// A resource file exists but could not be read (permissions, invalid UTF-8, ...).
    #[error("failed to read resource '{}': {source}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CrossmanError>;
