//! `skyhunt hunt` — run one pass of the attempt-cycling engine

use colored::Colorize;
use skyhunt_cloud::{
    CloudError, CompletionMarker, ComputeProvider, HuntEngine, LaunchSpec, PassResult, RunConfig,
};
use skyhunt_config::HuntSettings;

pub async fn handle(
    settings: &HuntSettings,
    provider: &dyn ComputeProvider,
    marker: &dyn CompletionMarker,
    no_cycle: bool,
    dry_run: bool,
    force: bool,
) -> anyhow::Result<i32> {
    let problems = settings.validate();
    if !problems.is_empty() {
        println!("{}", "Configuration problems:".red().bold());
        for problem in &problems {
            println!("  {} {}", "•".red(), problem);
        }
        println!();
        println!("Fix these, or run {} for details.", "skyhunt validate".cyan());
        return Ok(1);
    }

    let ssh_public_key = settings.load_ssh_public_key()?;
    let spec = LaunchSpec {
        compartment_id: settings.compartment_id.clone(),
        display_name: settings.display_name.clone(),
        shape: settings.shape.clone(),
        ocpus: settings.ocpus,
        memory_gbs: settings.memory_gbs,
        boot_volume_gbs: settings.boot_volume_gbs,
        image_id: settings.image_id.clone(),
        subnet_id: settings.subnet_id.clone(),
        ssh_public_key,
    };

    // A pinned availability domain implies single-zone mode, same as
    // --no-cycle.
    let config = RunConfig {
        cycle_all: !no_cycle && settings.availability_domain.is_none(),
        availability_domain: settings.availability_domain.clone(),
        force,
        dry_run,
    };

    if dry_run {
        println!("{}", "DRY RUN MODE - no instance will be created".yellow());
    }

    let engine = HuntEngine::new(provider, marker, &spec);
    match engine.run(&config).await {
        Ok(result) => {
            report(&result, settings);
            Ok(if result.is_success() { 0 } else { 1 })
        }
        Err(e @ CloudError::MarkerWriteFailed { .. }) => {
            // The instance exists but is unrecorded; the next scheduled
            // run would create a twin. Loud, and a failing exit code.
            eprintln!("{} {e}", "CRITICAL:".red().bold());
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}

fn report(result: &PassResult, settings: &HuntSettings) {
    println!();
    match result {
        PassResult::Success {
            instance_id,
            already_existed: true,
        } => {
            println!("{}", "✓ Instance already created!".green());
            println!("  Instance ID: {}", instance_id.yellow());
            println!();
            println!("To hunt another one, terminate it and run:");
            println!("  {}", "skyhunt reset".cyan());
        }
        PassResult::Success {
            instance_id,
            already_existed: false,
        } => {
            println!("{}", "✓ INSTANCE CREATED SUCCESSFULLY!".green().bold());
            println!();
            println!("  Instance ID: {}", instance_id.yellow());
            println!();
            println!("{}", "Next steps:".cyan());
            println!("  1. Wait for provisioning to finish (check the OCI console)");
            println!("  2. Grab the public IP from the console");
            println!("  3. SSH in with the key configured as ssh_public_key_file");
        }
        PassResult::DryRunValidated => {
            println!("{}", "✓ Dry run successful - configuration looks good!".green());
            println!("Remove --dry-run to actually create the instance.");
        }
        PassResult::CapacityExhausted {
            attempts,
            capacity_errors,
            transient_errors,
        } => {
            println!("{}", "All creation attempts failed.".yellow());
            println!("  Attempts:         {attempts}");
            println!("  Capacity errors:  {capacity_errors}");
            println!("  Transient faults: {transient_errors}");
            println!();
            println!("{}", "This is normal for Always Free capacity.".cyan());
            println!("Keep this command on a 5-15 minute schedule and it will");
            println!("land an instance when capacity frees up in {}.", settings.shape);
        }
        PassResult::FatalConfig { detail, attempts } => {
            println!("{}", "Stopped: non-capacity error.".red().bold());
            println!("  After {attempts} attempt(s): {detail}");
            println!();
            println!("Retrying will not help until the configuration is fixed.");
        }
    }
}
