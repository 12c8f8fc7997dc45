//! `skyhunt ads` — list availability domains

use colored::Colorize;
use skyhunt_cloud::ComputeProvider;

pub async fn handle(provider: &dyn ComputeProvider) -> anyhow::Result<i32> {
    let zones = provider.discover_zones().await?;

    if zones.is_empty() {
        println!("{}", "No availability domains found.".yellow());
        return Ok(1);
    }

    println!("Found {} availability domain(s):", zones.len());
    println!();
    for (i, zone) in zones.iter().enumerate() {
        println!("{}. {}", i + 1, zone.green());
    }
    println!();
    println!(
        "Pin one with {} to skip cycling.",
        "availability_domain".cyan()
    );

    Ok(0)
}
