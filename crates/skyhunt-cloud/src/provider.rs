//! Compute provider trait definition

use crate::candidate::{LaunchSpec, PlacementCandidate};
use crate::error::Result;
use crate::outcome::ApiFailure;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Compute provider abstraction
///
/// The engine consumes this trait only; the OCI implementation lives in
/// `skyhunt-cloud-oci`. Zone discovery order is significant: it is the
/// order candidates are attempted in, so implementations must return
/// zones as the provider lists them, without re-sorting.
#[async_trait]
pub trait ComputeProvider: Send + Sync {
    /// Provider name for logs (e.g. "oci")
    fn name(&self) -> &str;

    /// Check credentials are usable
    async fn check_auth(&self) -> Result<AuthStatus>;

    /// List availability domains for the configured region, in the
    /// provider's listing order
    async fn discover_zones(&self) -> Result<Vec<String>>;

    /// Look up a non-terminated instance by display name
    async fn find_existing_instance(&self, display_name: &str) -> Result<Option<InstanceInfo>>;

    /// Attempt one instance creation. Every failure mode, transport-level
    /// included, is normalized into an [`ApiFailure`] so the outcome
    /// classifier is total over whatever this call can return.
    async fn launch_instance(
        &self,
        spec: &LaunchSpec,
        candidate: &PlacementCandidate,
    ) -> std::result::Result<InstanceInfo, ApiFailure>;

    /// List images, optionally filtered by operating system
    async fn list_images(&self, operating_system: Option<&str>) -> Result<Vec<ImageInfo>>;

    /// List compute shapes available in the compartment
    async fn list_shapes(&self) -> Result<Vec<ShapeInfo>>;
}

/// Authentication status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub account_info: Option<String>,
    pub error: Option<String>,
}

impl AuthStatus {
    pub fn ok(account_info: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            account_info: Some(account_info.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            authenticated: false,
            account_info: None,
            error: Some(error.into()),
        }
    }
}

/// Minimal instance view the engine and CLI need
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceInfo {
    pub id: String,
    pub display_name: String,
    pub availability_domain: Option<String>,
    pub lifecycle_state: Option<String>,
}

impl InstanceInfo {
    /// Terminated or terminating instances do not count as existing
    pub fn is_active(&self) -> bool {
        !matches!(
            self.lifecycle_state.as_deref(),
            Some("TERMINATED") | Some("TERMINATING")
        )
    }
}

/// Image listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInfo {
    pub id: String,
    pub display_name: String,
    pub operating_system: Option<String>,
    pub operating_system_version: Option<String>,
}

/// Shape listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeInfo {
    pub shape: String,
    pub ocpus: Option<f64>,
    pub memory_gbs: Option<f64>,
}

impl ShapeInfo {
    /// Always Free eligible shapes (A1 flex and E2 micro)
    pub fn is_free_tier(&self) -> bool {
        self.shape.contains("A1") || self.shape.contains("E2.1.Micro")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminated_instance_is_not_active() {
        let mut info = InstanceInfo {
            id: "i".to_string(),
            display_name: "d".to_string(),
            availability_domain: None,
            lifecycle_state: Some("TERMINATED".to_string()),
        };
        assert!(!info.is_active());

        info.lifecycle_state = Some("TERMINATING".to_string());
        assert!(!info.is_active());

        info.lifecycle_state = Some("RUNNING".to_string());
        assert!(info.is_active());

        info.lifecycle_state = None;
        assert!(info.is_active());
    }

    #[test]
    fn test_free_tier_shapes() {
        let a1 = ShapeInfo {
            shape: "VM.Standard.A1.Flex".to_string(),
            ocpus: None,
            memory_gbs: None,
        };
        assert!(a1.is_free_tier());

        let micro = ShapeInfo {
            shape: "VM.Standard.E2.1.Micro".to_string(),
            ocpus: Some(1.0),
            memory_gbs: Some(1.0),
        };
        assert!(micro.is_free_tier());

        let paid = ShapeInfo {
            shape: "VM.Standard3.Flex".to_string(),
            ocpus: None,
            memory_gbs: None,
        };
        assert!(!paid.is_free_tier());
    }
}
