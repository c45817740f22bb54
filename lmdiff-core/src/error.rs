use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("git {command} failed: {stderr}")]
    ExternalTool { command: String, stderr: String },

    #[error("{path} does not exist at revision {reference}")]
    NotFoundAtRevision { reference: String, path: String },

    #[error("Cannot read {}: {source}", path.display())]
    PathUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn is_not_found_at_revision(&self) -> bool {
        matches!(self, Error::NotFoundAtRevision { .. })
    }
}
