//! oci CLI wrapper
//!
//! Drives Oracle Cloud through the official `oci` CLI with JSON output,
//! the same way other providers are driven through their vendor CLIs.
//! Launch failures are parsed out of the CLI's ServiceError body into an
//! [`ApiFailure`] so the outcome classifier sees the real status/code.

use crate::error::{OciError, Result};
use serde::{Deserialize, Serialize};
use skyhunt_cloud::{ApiFailure, LaunchSpec, PlacementCandidate};
use std::process::Stdio;
use tokio::process::Command;

/// oci CLI wrapper scoped to one compartment
pub struct OciCli {
    compartment_id: String,
    profile: Option<String>,
    region: Option<String>,
}

impl OciCli {
    pub fn new(compartment_id: impl Into<String>) -> Self {
        Self {
            compartment_id: compartment_id.into(),
            profile: None,
            region: None,
        }
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    /// Check the oci CLI is installed and credentials work
    pub async fn check_auth(&self) -> Result<String> {
        let which = Command::new("which").arg("oci").output().await?;
        if !which.status.success() {
            return Err(OciError::CliNotFound);
        }

        // Cheapest authenticated call scoped to our compartment.
        let output = self
            .run_command(&[
                "iam",
                "availability-domain",
                "list",
                "--compartment-id",
                &self.compartment_id,
            ])
            .await
            .map_err(|e| OciError::AuthenticationFailed(e.to_string()))?;

        let listing: Listing<AdData> = serde_json::from_str(&output)?;
        Ok(format!(
            "compartment reachable, {} availability domain(s)",
            listing.data.len()
        ))
    }

    /// Run an oci command and return stdout
    async fn run_command(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("oci");
        cmd.args(args);
        cmd.arg("--output").arg("json");
        if let Some(profile) = &self.profile {
            cmd.arg("--profile").arg(profile);
        }
        if let Some(region) = &self.region {
            cmd.arg("--region").arg(region);
        }
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: oci {}", args.join(" "));

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OciError::CommandFailed(stderr.to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// List availability domains in the compartment's region, in the
    /// order the service returns them
    pub async fn list_availability_domains(&self) -> Result<Vec<String>> {
        let output = self
            .run_command(&[
                "iam",
                "availability-domain",
                "list",
                "--compartment-id",
                &self.compartment_id,
            ])
            .await?;

        let listing: Listing<AdData> = serde_json::from_str(&output)?;
        Ok(listing.data.into_iter().map(|ad| ad.name).collect())
    }

    /// List instances matching a display name
    pub async fn list_instances(&self, display_name: &str) -> Result<Vec<OciInstance>> {
        let output = self
            .run_command(&[
                "compute",
                "instance",
                "list",
                "--compartment-id",
                &self.compartment_id,
                "--display-name",
                display_name,
            ])
            .await?;

        if output.trim().is_empty() {
            return Ok(Vec::new());
        }

        let listing: Listing<OciInstance> = serde_json::from_str(&output)?;
        Ok(listing.data)
    }

    /// Launch one instance. Failures come back as a normalized
    /// [`ApiFailure`] rather than this crate's error type so the caller
    /// can feed them straight to the classifier.
    pub async fn launch_instance(
        &self,
        spec: &LaunchSpec,
        candidate: &PlacementCandidate,
    ) -> std::result::Result<OciInstance, ApiFailure> {
        let boot_volume = spec.boot_volume_gbs.to_string();
        let metadata = serde_json::json!({ "ssh_authorized_keys": spec.ssh_public_key }).to_string();
        let shape_config = serde_json::json!({
            "ocpus": spec.ocpus,
            "memoryInGBs": spec.memory_gbs,
        })
        .to_string();

        let mut args = vec![
            "compute",
            "instance",
            "launch",
            "--availability-domain",
            candidate.availability_domain.as_str(),
            "--compartment-id",
            self.compartment_id.as_str(),
            "--display-name",
            spec.display_name.as_str(),
            "--shape",
            spec.shape.as_str(),
            "--image-id",
            spec.image_id.as_str(),
            "--subnet-id",
            spec.subnet_id.as_str(),
            "--assign-public-ip",
            "true",
            "--boot-volume-size-in-gbs",
            boot_volume.as_str(),
            "--metadata",
            metadata.as_str(),
        ];

        if spec.is_flex_shape() {
            args.push("--shape-config");
            args.push(shape_config.as_str());
        }

        if let Some(fd) = &candidate.fault_domain {
            args.push("--fault-domain");
            args.push(fd.as_str());
        }

        match self.run_command(&args).await {
            Ok(output) => {
                let single: Single<OciInstance> = serde_json::from_str(&output)
                    .map_err(|e| ApiFailure::transport(format!("unparseable launch response: {e}")))?;
                Ok(single.data)
            }
            Err(OciError::CommandFailed(stderr)) => Err(parse_service_error(&stderr)),
            Err(e) => Err(ApiFailure::transport(e.to_string())),
        }
    }

    /// List available images, newest first
    pub async fn list_images(&self, operating_system: Option<&str>) -> Result<Vec<OciImage>> {
        let mut args = vec![
            "compute",
            "image",
            "list",
            "--compartment-id",
            self.compartment_id.as_str(),
            "--sort-by",
            "TIMECREATED",
            "--sort-order",
            "DESC",
            "--lifecycle-state",
            "AVAILABLE",
        ];

        if let Some(os) = operating_system {
            args.push("--operating-system");
            args.push(os);
        }

        let output = self.run_command(&args).await?;
        if output.trim().is_empty() {
            return Ok(Vec::new());
        }

        let listing: Listing<OciImage> = serde_json::from_str(&output)?;
        Ok(listing.data)
    }

    /// List compute shapes offered in the compartment
    pub async fn list_shapes(&self) -> Result<Vec<OciShape>> {
        let output = self
            .run_command(&[
                "compute",
                "shape",
                "list",
                "--compartment-id",
                &self.compartment_id,
            ])
            .await?;

        if output.trim().is_empty() {
            return Ok(Vec::new());
        }

        let listing: Listing<OciShape> = serde_json::from_str(&output)?;
        Ok(listing.data)
    }
}

/// Extract status/code/message from the CLI's ServiceError stderr.
///
/// The CLI prints a line like `ServiceError:` followed by a JSON body;
/// anything that doesn't contain a parseable body becomes a bare-message
/// failure with no status, which the classifier treats as transient.
pub fn parse_service_error(stderr: &str) -> ApiFailure {
    if let Some(start) = stderr.find('{') {
        // The JSON body runs to the matching close brace; the CLI prints
        // nothing after it, so taking to the last '}' is safe.
        if let Some(end) = stderr.rfind('}') {
            if let Ok(body) = serde_json::from_str::<ServiceErrorBody>(&stderr[start..=end]) {
                return ApiFailure {
                    status: body.status,
                    code: body.code,
                    message: body
                        .message
                        .unwrap_or_else(|| "service error with no message".to_string()),
                };
            }
        }
    }

    ApiFailure::transport(stderr.trim().to_string())
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    status: Option<u16>,
    code: Option<String>,
    message: Option<String>,
}

/// `{"data": [...]}` wrapper the CLI puts around list responses
#[derive(Debug, Deserialize)]
struct Listing<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

/// `{"data": {...}}` wrapper around single-object responses
#[derive(Debug, Deserialize)]
struct Single<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct AdData {
    name: String,
}

/// Instance as the CLI reports it (kebab-case keys)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OciInstance {
    pub id: String,

    #[serde(rename = "display-name")]
    pub display_name: String,

    #[serde(rename = "availability-domain")]
    pub availability_domain: Option<String>,

    #[serde(rename = "lifecycle-state")]
    pub lifecycle_state: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OciImage {
    pub id: String,

    #[serde(rename = "display-name")]
    pub display_name: String,

    #[serde(rename = "operating-system")]
    pub operating_system: Option<String>,

    #[serde(rename = "operating-system-version")]
    pub operating_system_version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OciShape {
    pub shape: String,

    pub ocpus: Option<f64>,

    #[serde(rename = "memory-in-gbs")]
    pub memory_gbs: Option<f64>,
}
