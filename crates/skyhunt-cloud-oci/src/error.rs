//! OCI provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OciError {
    #[error("oci CLI not found. Install it: https://docs.oracle.com/iaas/tools/oci-cli/latest/")]
    CliNotFound,

    #[error("oci authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("oci command failed: {0}")]
    CommandFailed(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cloud error: {0}")]
    CloudError(#[from] skyhunt_cloud::CloudError),
}

pub type Result<T> = std::result::Result<T, OciError>;
