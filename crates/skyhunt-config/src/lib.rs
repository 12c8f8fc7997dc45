//! skyhunt configuration
//!
//! Settings are layered: `~/.config/skyhunt/skyhunt.toml` (global), then
//! `skyhunt.toml` in the working directory, then `SKYHUNT_*` environment
//! variables. Later layers win. The `oci` CLI's own credentials stay in
//! `~/.oci/config`; skyhunt only carries hunt parameters.

pub mod error;

pub use error::*;

use serde::Deserialize;
use std::path::PathBuf;

/// Hunt parameters resolved from config files and environment
#[derive(Debug, Clone, Deserialize)]
pub struct HuntSettings {
    /// Compartment OCID instances are created in
    #[serde(default)]
    pub compartment_id: String,

    /// Instance display name; also the completion-marker key
    #[serde(default = "default_display_name")]
    pub display_name: String,

    /// Shape to request
    #[serde(default = "default_shape")]
    pub shape: String,

    /// OCPUs for flex shapes
    #[serde(default = "default_ocpus")]
    pub ocpus: f64,

    /// Memory in GB for flex shapes
    #[serde(default = "default_memory_gbs")]
    pub memory_gbs: f64,

    /// Boot volume size in GB
    #[serde(default = "default_boot_volume_gbs")]
    pub boot_volume_gbs: u32,

    /// Image OCID
    #[serde(default)]
    pub image_id: String,

    /// Subnet OCID
    #[serde(default)]
    pub subnet_id: String,

    /// Path to the SSH public key injected into the instance
    #[serde(default)]
    pub ssh_public_key_file: Option<PathBuf>,

    /// Pinned availability domain (optional; discovery order otherwise)
    #[serde(default)]
    pub availability_domain: Option<String>,

    /// oci CLI profile name (optional)
    #[serde(default)]
    pub profile: Option<String>,

    /// Region override passed to the oci CLI (optional)
    #[serde(default)]
    pub region: Option<String>,
}

fn default_display_name() -> String {
    "my-free-instance".to_string()
}

fn default_shape() -> String {
    "VM.Standard.A1.Flex".to_string()
}

fn default_ocpus() -> f64 {
    4.0
}

fn default_memory_gbs() -> f64 {
    24.0
}

fn default_boot_volume_gbs() -> u32 {
    50
}

impl Default for HuntSettings {
    fn default() -> Self {
        Self {
            compartment_id: String::new(),
            display_name: default_display_name(),
            shape: default_shape(),
            ocpus: default_ocpus(),
            memory_gbs: default_memory_gbs(),
            boot_volume_gbs: default_boot_volume_gbs(),
            image_id: String::new(),
            subnet_id: String::new(),
            ssh_public_key_file: None,
            availability_domain: None,
            profile: None,
            region: None,
        }
    }
}

impl HuntSettings {
    /// Load settings from the standard layers
    pub fn load() -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(global) = global_config_path() {
            builder = builder.add_source(
                config::File::from(global).required(false),
            );
        }

        let settings = builder
            .add_source(config::File::with_name("skyhunt").required(false))
            .add_source(config::Environment::with_prefix("SKYHUNT").try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    /// Collect every configuration problem, not just the first
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for (label, value) in [
            ("compartment_id", &self.compartment_id),
            ("image_id", &self.image_id),
            ("subnet_id", &self.subnet_id),
        ] {
            if value.trim().is_empty() {
                problems.push(format!("{label} is not set"));
            }
        }

        if self.display_name.trim().is_empty() {
            problems.push("display_name is empty".to_string());
        }

        if self.ocpus <= 0.0 || self.memory_gbs <= 0.0 {
            problems.push("ocpus and memory_gbs must be positive".to_string());
        }

        match &self.ssh_public_key_file {
            None => problems.push("ssh_public_key_file is not set".to_string()),
            Some(path) => {
                if !resolve_path(path).exists() {
                    problems.push(format!(
                        "ssh_public_key_file does not exist: {}",
                        path.display()
                    ));
                }
            }
        }

        problems
    }

    /// Read the configured SSH public key, trimming trailing whitespace
    pub fn load_ssh_public_key(&self) -> Result<String> {
        let path = self
            .ssh_public_key_file
            .as_ref()
            .ok_or(ConfigError::SshKeyNotConfigured)?;

        let resolved = resolve_path(path);
        if !resolved.exists() {
            return Err(ConfigError::SshKeyNotFound(resolved));
        }

        Ok(std::fs::read_to_string(&resolved)?.trim().to_string())
    }
}

/// Expand a leading `~/` against the home directory
fn resolve_path(path: &std::path::Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    path.to_path_buf()
}

/// Global config file (`~/.config/skyhunt/skyhunt.toml`), if the config
/// directory can be resolved
fn global_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("skyhunt").join("skyhunt.toml"))
}

/// skyhunt's own config directory, created on demand
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("skyhunt");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let settings = HuntSettings::default();
        assert_eq!(settings.display_name, "my-free-instance");
        assert_eq!(settings.shape, "VM.Standard.A1.Flex");
        assert_eq!(settings.ocpus, 4.0);
        assert_eq!(settings.memory_gbs, 24.0);
        assert_eq!(settings.boot_volume_gbs, 50);
        assert!(settings.availability_domain.is_none());
    }

    #[test]
    fn test_validate_collects_all_problems() {
        let settings = HuntSettings::default();
        let problems = settings.validate();

        // compartment, image, subnet, ssh key all missing
        assert!(problems.iter().any(|p| p.contains("compartment_id")));
        assert!(problems.iter().any(|p| p.contains("image_id")));
        assert!(problems.iter().any(|p| p.contains("subnet_id")));
        assert!(problems.iter().any(|p| p.contains("ssh_public_key_file")));
        assert!(problems.len() >= 4);
    }

    #[test]
    fn test_validate_ok_with_complete_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let key_path = temp_dir.path().join("id_ed25519.pub");
        fs::write(&key_path, "ssh-ed25519 AAAA test@host\n").unwrap();

        let settings = HuntSettings {
            compartment_id: "ocid1.compartment.oc1..x".to_string(),
            image_id: "ocid1.image.oc1..x".to_string(),
            subnet_id: "ocid1.subnet.oc1..x".to_string(),
            ssh_public_key_file: Some(key_path),
            ..Default::default()
        };

        assert!(settings.validate().is_empty());
    }

    #[test]
    fn test_load_ssh_public_key_trims() {
        let temp_dir = tempfile::tempdir().unwrap();
        let key_path = temp_dir.path().join("key.pub");
        fs::write(&key_path, "ssh-ed25519 AAAA test@host\n\n").unwrap();

        let settings = HuntSettings {
            ssh_public_key_file: Some(key_path),
            ..Default::default()
        };

        let key = settings.load_ssh_public_key().unwrap();
        assert_eq!(key, "ssh-ed25519 AAAA test@host");
    }

    #[test]
    fn test_load_ssh_public_key_missing_file() {
        let settings = HuntSettings {
            ssh_public_key_file: Some(PathBuf::from("/nonexistent/key.pub")),
            ..Default::default()
        };

        let err = settings.load_ssh_public_key().unwrap_err();
        assert!(matches!(err, ConfigError::SshKeyNotFound(_)));
    }

    #[test]
    fn test_load_ssh_public_key_not_configured() {
        let settings = HuntSettings::default();
        let err = settings.load_ssh_public_key().unwrap_err();
        assert!(matches!(err, ConfigError::SshKeyNotConfigured));
    }

    #[test]
    fn test_env_overrides() {
        temp_env::with_vars(
            [
                ("SKYHUNT_COMPARTMENT_ID", Some("ocid1.compartment.oc1..env")),
                ("SKYHUNT_DISPLAY_NAME", Some("env-instance")),
                ("SKYHUNT_OCPUS", Some("2")),
            ],
            || {
                let settings = HuntSettings::load().unwrap();
                assert_eq!(settings.compartment_id, "ocid1.compartment.oc1..env");
                assert_eq!(settings.display_name, "env-instance");
                assert_eq!(settings.ocpus, 2.0);
                // Untouched fields keep their defaults
                assert_eq!(settings.shape, "VM.Standard.A1.Flex");
            },
        );
    }

    #[test]
    fn test_get_config_dir() {
        let result = get_config_dir();
        assert!(result.is_ok());
        assert!(result.unwrap().ends_with("skyhunt"));
    }
}
