//! OCI provider for skyhunt
//!
//! Implements [`skyhunt_cloud::ComputeProvider`] on top of the official
//! `oci` CLI. Requires the CLI to be installed and configured
//! (`~/.oci/config`); skyhunt never handles API keys itself.

pub mod error;
pub mod ocicli;
pub mod provider;

pub use error::{OciError, Result};
pub use ocicli::{OciCli, OciImage, OciInstance, OciShape, parse_service_error};
pub use provider::OciProvider;
