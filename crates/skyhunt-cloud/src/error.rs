//! Cloud abstraction error types

use thiserror::Error;

/// Errors shared across providers and the hunt engine
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Zone discovery failed: {0}")]
    ZoneDiscoveryFailed(String),

    #[error("Instance lookup failed: {0}")]
    InstanceLookupFailed(String),

    #[error("No availability domains discovered for the region")]
    NoZonesDiscovered,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(
        "Instance {instance_id} was created but recording completion failed: {source}. \
         The instance EXISTS; re-running without clearing this up risks a duplicate."
    )]
    MarkerWriteFailed {
        instance_id: String,
        #[source]
        source: Box<CloudError>,
    },

    #[error("Marker store error: {0}")]
    MarkerStore(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
