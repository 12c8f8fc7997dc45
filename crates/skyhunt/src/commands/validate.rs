//! `skyhunt validate` — configuration check plus an auth probe

use colored::Colorize;
use skyhunt_cloud::ComputeProvider;
use skyhunt_config::HuntSettings;

pub async fn handle(
    settings: &HuntSettings,
    provider: &dyn ComputeProvider,
) -> anyhow::Result<i32> {
    println!("{}", "Validating configuration...".cyan());
    println!();

    let problems = settings.validate();
    if problems.is_empty() {
        println!("{}", "✓ Configuration looks good!".green());
        println!("  Display name: {}", settings.display_name);
        println!("  Shape:        {}", settings.shape);
        println!(
            "  Resources:    {} OCPUs, {} GB memory, {} GB boot volume",
            settings.ocpus, settings.memory_gbs, settings.boot_volume_gbs
        );
    } else {
        println!("{}", "✗ Configuration errors:".red().bold());
        for problem in &problems {
            println!("  {} {}", "•".red(), problem);
        }
        println!();
        println!("Fix the errors above before hunting.");
        return Ok(1);
    }

    println!();
    let status = provider.check_auth().await?;
    if status.authenticated {
        println!("{}", "✓ Authentication successful.".green());
        Ok(0)
    } else {
        println!(
            "{} {}",
            "✗ Authentication failed:".red(),
            status.error.unwrap_or_default()
        );
        Ok(1)
    }
}
