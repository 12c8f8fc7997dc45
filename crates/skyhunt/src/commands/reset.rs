//! `skyhunt reset` — operator command to clear the completion marker
//!
//! The engine never clears the marker itself; this exists for the
//! "terminated the instance, hunt again" workflow.

use colored::Colorize;
use skyhunt_cloud::CompletionMarker;
use skyhunt_config::HuntSettings;
use std::io::Write;

pub async fn handle(
    settings: &HuntSettings,
    marker: &dyn CompletionMarker,
    yes: bool,
) -> anyhow::Result<i32> {
    let key = &settings.display_name;

    if !marker.exists(key).await? {
        println!("No completion marker for '{}'; nothing to do.", key.cyan());
        return Ok(0);
    }

    if !yes {
        println!(
            "{}",
            "This clears the record of a created instance. The next hunt pass".yellow()
        );
        println!(
            "{}",
            "will create a NEW instance unless the old one still exists.".yellow()
        );
        print!("Clear the marker for '{key}'? [y/N] ");
        std::io::stdout().flush()?;

        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Aborted.");
            return Ok(1);
        }
    }

    marker.clear(key).await?;
    println!("{} Marker cleared for '{}'.", "✓".green(), key.cyan());
    Ok(0)
}
