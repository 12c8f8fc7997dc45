//! Placement candidates and pass enumeration

use serde::{Deserialize, Serialize};

/// Static launch parameters that do not vary across candidates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchSpec {
    /// Compartment OCID the instance is created in
    pub compartment_id: String,

    /// Display name; also the completion-marker key
    pub display_name: String,

    /// Shape name (e.g. "VM.Standard.A1.Flex")
    pub shape: String,

    /// OCPU count for flex shapes
    pub ocpus: f64,

    /// Memory in GB for flex shapes
    pub memory_gbs: f64,

    /// Boot volume size in GB
    pub boot_volume_gbs: u32,

    /// Image OCID
    pub image_id: String,

    /// Subnet OCID
    pub subnet_id: String,

    /// SSH public key content (not a path)
    pub ssh_public_key: String,
}

impl LaunchSpec {
    /// Flex shapes take an explicit ocpus/memory shape config
    pub fn is_flex_shape(&self) -> bool {
        self.shape.contains("Flex")
    }
}

/// One placement to attempt: an availability domain, optionally pinned to
/// a fault domain. Fault domain is left unset by [`enumerate`] so the
/// allocator picks one; the field exists so a finer-grained enumerator can
/// pin placements without touching the engine or providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementCandidate {
    pub availability_domain: String,
    pub fault_domain: Option<String>,
}

impl PlacementCandidate {
    pub fn new(availability_domain: impl Into<String>) -> Self {
        Self {
            availability_domain: availability_domain.into(),
            fault_domain: None,
        }
    }
}

impl std::fmt::Display for PlacementCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.fault_domain {
            Some(fd) => write!(f, "{} / {}", self.availability_domain, fd),
            None => write!(f, "{}", self.availability_domain),
        }
    }
}

/// Engine inputs resolved at process start
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Try every discovered availability domain in order
    pub cycle_all: bool,

    /// Explicitly pinned availability domain (used when `cycle_all` is
    /// off; wins over discovery order)
    pub availability_domain: Option<String>,

    /// Run the pass even if the completion marker is present
    pub force: bool,

    /// Validate without calling the creation API or touching the marker
    pub dry_run: bool,
}

/// Produce the ordered candidate sequence for one pass.
///
/// `zones` is the availability-domain list in discovery order; that order
/// is preserved, never re-sorted. With `cycle_all` off the sequence has at
/// most one entry: the pinned zone if configured, else the first
/// discovered one. Zero discovered zones (and no pin) yields an empty
/// sequence, which the engine treats as a configuration failure.
pub fn enumerate(config: &RunConfig, zones: &[String]) -> Vec<PlacementCandidate> {
    if config.cycle_all {
        return zones.iter().map(PlacementCandidate::new).collect();
    }

    if let Some(ad) = &config.availability_domain {
        return vec![PlacementCandidate::new(ad)];
    }

    zones
        .first()
        .map(|ad| vec![PlacementCandidate::new(ad)])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cycle_all_preserves_discovery_order() {
        let config = RunConfig {
            cycle_all: true,
            ..Default::default()
        };
        let candidates = enumerate(&config, &zones(&["Z1", "Z2", "Z3"]));
        let ads: Vec<_> = candidates
            .iter()
            .map(|c| c.availability_domain.as_str())
            .collect();
        assert_eq!(ads, vec!["Z1", "Z2", "Z3"]);
        assert!(candidates.iter().all(|c| c.fault_domain.is_none()));
    }

    #[test]
    fn test_single_zone_uses_pinned_ad() {
        let config = RunConfig {
            cycle_all: false,
            availability_domain: Some("pinned:AD-2".to_string()),
            ..Default::default()
        };
        let candidates = enumerate(&config, &zones(&["AD-1", "AD-2", "AD-3"]));
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].availability_domain, "pinned:AD-2");
    }

    #[test]
    fn test_single_zone_falls_back_to_first_discovered() {
        let config = RunConfig::default();
        let candidates = enumerate(&config, &zones(&["AD-1", "AD-2"]));
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].availability_domain, "AD-1");
    }

    #[test]
    fn test_no_zones_yields_empty_sequence() {
        let config = RunConfig {
            cycle_all: true,
            ..Default::default()
        };
        assert!(enumerate(&config, &[]).is_empty());

        let config = RunConfig::default();
        assert!(enumerate(&config, &[]).is_empty());
    }

    #[test]
    fn test_candidate_display() {
        let mut c = PlacementCandidate::new("AD-1");
        assert_eq!(c.to_string(), "AD-1");
        c.fault_domain = Some("FAULT-DOMAIN-2".to_string());
        assert_eq!(c.to_string(), "AD-1 / FAULT-DOMAIN-2");
    }
}
