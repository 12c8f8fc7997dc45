//! `skyhunt status` — read-only view of marker and live instance

use colored::Colorize;
use skyhunt_cloud::{CompletionMarker, ComputeProvider};
use skyhunt_config::HuntSettings;

pub async fn handle(
    settings: &HuntSettings,
    provider: &dyn ComputeProvider,
    marker: &dyn CompletionMarker,
) -> anyhow::Result<i32> {
    let key = &settings.display_name;
    println!("Display name: {}", key.cyan());
    println!();

    match marker.read(key).await? {
        Some(record) => {
            println!("{}", "Completion marker: present".green());
            println!("  Instance ID: {}", record.instance_id.yellow());
            println!("  Recorded at: {}", record.created_at);
        }
        None => println!("{}", "Completion marker: absent".yellow()),
    }

    println!();
    match provider.find_existing_instance(key).await {
        Ok(Some(instance)) => {
            println!("{}", "Live instance: found".green());
            println!("  Instance ID: {}", instance.id.yellow());
            if let Some(state) = &instance.lifecycle_state {
                println!("  State:       {state}");
            }
            if let Some(ad) = &instance.availability_domain {
                println!("  AD:          {ad}");
            }
        }
        Ok(None) => println!("{}", "Live instance: none".yellow()),
        Err(e) => println!("{} {e}", "Live instance lookup failed:".red()),
    }

    Ok(0)
}
