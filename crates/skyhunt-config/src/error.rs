use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the user configuration directory")]
    ConfigDirNotFound,

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("SSH public key file not found: {0}")]
    SshKeyNotFound(PathBuf),

    #[error("SSH public key file is not configured")]
    SshKeyNotConfigured,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
