//! Skyhunt Cloud Core
//!
//! Provider abstraction and the attempt-cycling engine that hunts for
//! free-tier compute capacity: enumerate placement candidates
//! (availability domains), attempt creation one candidate at a time,
//! classify each failure, and persist completion so scheduled re-runs
//! become no-ops after the first success.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  skyhunt CLI                     │
//! │              (skyhunt hunt / status)             │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               skyhunt-cloud                      │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  HuntEngine                               │   │
//! │  │  candidates → attempt → classify → stop?  │   │
//! │  └────┬───────────────┬─────────────────────┘   │
//! │  ┌────▼─────────┐ ┌───▼──────────────┐          │
//! │  │ Classifier   │ │ CompletionMarker │          │
//! │  └──────────────┘ └──────────────────┘          │
//! └───────┬─────────────────────────────────────────┘
//!         │ trait ComputeProvider
//! ┌───────▼───────┐
//! │ skyhunt-cloud │
//! │     -oci      │
//! └───────────────┘
//! ```

pub mod candidate;
pub mod engine;
pub mod error;
pub mod marker;
pub mod outcome;
pub mod provider;

// Re-exports
pub use candidate::{LaunchSpec, PlacementCandidate, RunConfig, enumerate};
pub use engine::{HuntEngine, PassResult};
pub use error::{CloudError, Result};
pub use marker::{CompletionMarker, CompletionRecord, FileMarker, MemoryMarker};
pub use outcome::{ApiFailure, AttemptOutcome, classify};
pub use provider::{AuthStatus, ComputeProvider, ImageInfo, InstanceInfo, ShapeInfo};
