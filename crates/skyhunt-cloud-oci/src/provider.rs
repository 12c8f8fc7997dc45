//! OCI provider implementation

use crate::ocicli::{OciCli, OciImage, OciInstance, OciShape};
use async_trait::async_trait;
use skyhunt_cloud::{
    ApiFailure, AuthStatus, CloudError, ComputeProvider, ImageInfo, InstanceInfo, LaunchSpec,
    PlacementCandidate, ShapeInfo,
};

/// OCI compute provider backed by the `oci` CLI
pub struct OciProvider {
    cli: OciCli,
}

impl OciProvider {
    pub fn new(
        compartment_id: impl Into<String>,
        profile: Option<String>,
        region: Option<String>,
    ) -> Self {
        Self {
            cli: OciCli::new(compartment_id)
                .with_profile(profile)
                .with_region(region),
        }
    }
}

impl From<OciInstance> for InstanceInfo {
    fn from(i: OciInstance) -> Self {
        Self {
            id: i.id,
            display_name: i.display_name,
            availability_domain: i.availability_domain,
            lifecycle_state: i.lifecycle_state,
        }
    }
}

impl From<OciImage> for ImageInfo {
    fn from(i: OciImage) -> Self {
        Self {
            id: i.id,
            display_name: i.display_name,
            operating_system: i.operating_system,
            operating_system_version: i.operating_system_version,
        }
    }
}

impl From<OciShape> for ShapeInfo {
    fn from(s: OciShape) -> Self {
        Self {
            shape: s.shape,
            ocpus: s.ocpus,
            memory_gbs: s.memory_gbs,
        }
    }
}

#[async_trait]
impl ComputeProvider for OciProvider {
    fn name(&self) -> &str {
        "oci"
    }

    async fn check_auth(&self) -> skyhunt_cloud::Result<AuthStatus> {
        match self.cli.check_auth().await {
            Ok(info) => Ok(AuthStatus::ok(info)),
            Err(e) => Ok(AuthStatus::failed(e.to_string())),
        }
    }

    async fn discover_zones(&self) -> skyhunt_cloud::Result<Vec<String>> {
        self.cli
            .list_availability_domains()
            .await
            .map_err(|e| CloudError::ZoneDiscoveryFailed(e.to_string()))
    }

    async fn find_existing_instance(
        &self,
        display_name: &str,
    ) -> skyhunt_cloud::Result<Option<InstanceInfo>> {
        let instances = self
            .cli
            .list_instances(display_name)
            .await
            .map_err(|e| CloudError::InstanceLookupFailed(e.to_string()))?;

        Ok(instances
            .into_iter()
            .map(InstanceInfo::from)
            .find(InstanceInfo::is_active))
    }

    async fn launch_instance(
        &self,
        spec: &LaunchSpec,
        candidate: &PlacementCandidate,
    ) -> std::result::Result<InstanceInfo, ApiFailure> {
        self.cli
            .launch_instance(spec, candidate)
            .await
            .map(InstanceInfo::from)
    }

    async fn list_images(
        &self,
        operating_system: Option<&str>,
    ) -> skyhunt_cloud::Result<Vec<ImageInfo>> {
        let images = self
            .cli
            .list_images(operating_system)
            .await
            .map_err(|e| CloudError::Provider(e.to_string()))?;
        Ok(images.into_iter().map(ImageInfo::from).collect())
    }

    async fn list_shapes(&self) -> skyhunt_cloud::Result<Vec<ShapeInfo>> {
        let shapes = self
            .cli
            .list_shapes()
            .await
            .map_err(|e| CloudError::Provider(e.to_string()))?;
        Ok(shapes.into_iter().map(ShapeInfo::from).collect())
    }
}
