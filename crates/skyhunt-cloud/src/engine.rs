//! Attempt-cycling engine
//!
//! One `run` call is one pass: check prior completion, check for a live
//! instance, then walk the candidate sequence until success, a fatal
//! error, or exhaustion. The engine is stateless across invocations apart
//! from the completion marker; cross-pass retry belongs to whatever
//! scheduler re-invokes the process. There is no in-place retry or
//! backoff on a single candidate, and attempts are strictly sequential:
//! the allocator is a shared rate-limited resource, and stop-at-first-
//! success only works with one attempt in flight.

use crate::candidate::{LaunchSpec, PlacementCandidate, RunConfig, enumerate};
use crate::error::{CloudError, Result};
use crate::marker::{CompletionMarker, CompletionRecord};
use crate::outcome::{AttemptOutcome, classify};
use crate::provider::ComputeProvider;

/// Terminal state of one pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassResult {
    /// An instance exists and the marker records it. `already_existed`
    /// distinguishes "found prior completion" from "created this pass";
    /// both are success for exit-code purposes.
    Success {
        instance_id: String,
        already_existed: bool,
    },

    /// Dry-run pass: configuration and first candidate validated, no
    /// creation call made, marker untouched
    DryRunValidated,

    /// Every candidate failed with capacity or a transient fault. The
    /// expected steady state; the scheduler should keep re-invoking.
    CapacityExhausted {
        attempts: u32,
        capacity_errors: u32,
        transient_errors: u32,
    },

    /// A placement-independent error; the pass aborted without trying the
    /// remaining candidates. Needs an operator.
    FatalConfig { detail: String, attempts: u32 },
}

impl PassResult {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            PassResult::Success { .. } | PassResult::DryRunValidated
        )
    }
}

impl std::fmt::Display for PassResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PassResult::Success {
                instance_id,
                already_existed: true,
            } => write!(f, "already completed (instance {instance_id})"),
            PassResult::Success {
                instance_id,
                already_existed: false,
            } => write!(f, "instance created ({instance_id})"),
            PassResult::DryRunValidated => write!(f, "dry run validated"),
            PassResult::CapacityExhausted {
                attempts,
                capacity_errors,
                transient_errors,
            } => write!(
                f,
                "capacity exhausted after {attempts} attempts \
                 ({capacity_errors} capacity, {transient_errors} transient)"
            ),
            PassResult::FatalConfig { detail, attempts } => {
                write!(f, "fatal after {attempts} attempts: {detail}")
            }
        }
    }
}

/// The attempt-cycling engine
pub struct HuntEngine<'a> {
    provider: &'a dyn ComputeProvider,
    marker: &'a dyn CompletionMarker,
    spec: &'a LaunchSpec,
}

impl<'a> HuntEngine<'a> {
    pub fn new(
        provider: &'a dyn ComputeProvider,
        marker: &'a dyn CompletionMarker,
        spec: &'a LaunchSpec,
    ) -> Self {
        Self {
            provider,
            marker,
            spec,
        }
    }

    /// Run one pass to a terminal state.
    ///
    /// `Err` is reserved for conditions outside the outcome taxonomy:
    /// discovery/lookup plumbing failures and, critically, a marker write
    /// failure after a real instance was created.
    pub async fn run(&self, config: &RunConfig) -> Result<PassResult> {
        let key = &self.spec.display_name;

        // Prior completion: the idempotent fast path. Zero API calls.
        if !config.force
            && let Some(record) = self.marker.read(key).await?
        {
            tracing::info!(
                "Already completed: instance {} recorded at {}",
                record.instance_id,
                record.created_at
            );
            return Ok(PassResult::Success {
                instance_id: record.instance_id,
                already_existed: true,
            });
        }

        // Live instance without a local marker: the marker was lost or
        // written by another host. Re-record instead of creating a twin.
        if let Some(instance) = self.check_live_instance(key).await {
            if !config.dry_run {
                self.record_completion(&instance.id).await?;
            }
            tracing::info!(
                "Instance '{}' already exists ({}), no creation attempted",
                key,
                instance.id
            );
            return Ok(PassResult::Success {
                instance_id: instance.id,
                already_existed: true,
            });
        }

        let candidates = self.collect_candidates(config).await?;
        if candidates.is_empty() {
            let detail = "no availability domains discovered".to_string();
            tracing::error!("{detail}");
            return Ok(PassResult::FatalConfig { detail, attempts: 0 });
        }
        tracing::info!(
            "Pass starting: {} candidate placement(s) for '{}'",
            candidates.len(),
            key
        );

        if config.dry_run {
            return self.dry_run(&candidates[0]).map(|()| {
                tracing::info!("Dry run validated against {}", candidates[0]);
                PassResult::DryRunValidated
            });
        }

        self.cycle(&candidates).await
    }

    /// The cycling loop proper: one sequential attempt per candidate,
    /// stop at first success or first fatal outcome.
    async fn cycle(&self, candidates: &[PlacementCandidate]) -> Result<PassResult> {
        let mut attempts = 0u32;
        let mut capacity_errors = 0u32;
        let mut transient_errors = 0u32;

        for candidate in candidates {
            attempts += 1;
            tracing::info!("Attempt {}: launching in {}", attempts, candidate);

            let outcome = match self.provider.launch_instance(self.spec, candidate).await {
                Ok(instance) => AttemptOutcome::Success(instance.id),
                Err(failure) => classify(&failure),
            };
            tracing::info!("Attempt {}: {} -> {}", attempts, candidate, outcome);

            match outcome {
                AttemptOutcome::Success(instance_id) => {
                    self.record_completion(&instance_id).await?;
                    tracing::info!(
                        "Instance created: {} in {} ({} attempts, {} capacity errors)",
                        instance_id,
                        candidate,
                        attempts,
                        capacity_errors
                    );
                    return Ok(PassResult::Success {
                        instance_id,
                        already_existed: false,
                    });
                }
                AttemptOutcome::CapacityExhausted => {
                    capacity_errors += 1;
                    tracing::warn!("No capacity in {}", candidate);
                }
                AttemptOutcome::TransientFault(detail) => {
                    transient_errors += 1;
                    tracing::warn!("Transient fault in {}: {}", candidate, detail);
                }
                AttemptOutcome::FatalConfig(detail) => {
                    // Placement-independent: the remaining candidates
                    // would fail the same way.
                    tracing::error!("Fatal error, aborting pass: {}", detail);
                    return Ok(PassResult::FatalConfig { detail, attempts });
                }
            }
        }

        let result = PassResult::CapacityExhausted {
            attempts,
            capacity_errors,
            transient_errors,
        };
        tracing::warn!("{result}");
        Ok(result)
    }

    async fn check_live_instance(&self, display_name: &str) -> Option<crate::provider::InstanceInfo> {
        match self.provider.find_existing_instance(display_name).await {
            Ok(found) => found.filter(|i| i.is_active()),
            Err(e) => {
                // Lookup trouble must not block the hunt; worst case the
                // launch call fails and gets classified normally.
                tracing::warn!("Existing-instance check failed: {e}");
                None
            }
        }
    }

    async fn record_completion(&self, instance_id: &str) -> Result<()> {
        let record = CompletionRecord::new(instance_id);
        if let Err(e) = self.marker.record(&self.spec.display_name, &record).await {
            let err = CloudError::MarkerWriteFailed {
                instance_id: instance_id.to_string(),
                source: Box::new(e),
            };
            tracing::error!("{err}");
            return Err(err);
        }
        Ok(())
    }

    async fn collect_candidates(&self, config: &RunConfig) -> Result<Vec<PlacementCandidate>> {
        // With a pinned zone and cycling off there is nothing to
        // discover; skip the API call entirely.
        let zones = if !config.cycle_all && config.availability_domain.is_some() {
            Vec::new()
        } else {
            let zones = self
                .provider
                .discover_zones()
                .await
                .map_err(|e| CloudError::ZoneDiscoveryFailed(e.to_string()))?;
            tracing::info!(
                "Discovered {} availability domain(s): {}",
                zones.len(),
                zones.join(", ")
            );
            zones
        };

        Ok(enumerate(config, &zones))
    }

    fn dry_run(&self, candidate: &PlacementCandidate) -> Result<()> {
        if candidate.availability_domain.trim().is_empty() {
            return Err(CloudError::InvalidConfig(
                "candidate has an empty availability domain".to_string(),
            ));
        }

        let spec = self.spec;
        let required = [
            ("compartment OCID", &spec.compartment_id),
            ("display name", &spec.display_name),
            ("shape", &spec.shape),
            ("image OCID", &spec.image_id),
            ("subnet OCID", &spec.subnet_id),
            ("SSH public key", &spec.ssh_public_key),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(CloudError::InvalidConfig(format!("{label} is empty")));
            }
        }
        Ok(())
    }
}
