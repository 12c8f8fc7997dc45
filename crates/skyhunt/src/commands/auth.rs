//! `skyhunt auth` — check oci CLI authentication

use colored::Colorize;
use skyhunt_cloud::ComputeProvider;

pub async fn handle(provider: &dyn ComputeProvider) -> anyhow::Result<i32> {
    println!("Testing {} authentication...", provider.name());

    let status = provider.check_auth().await?;
    if status.authenticated {
        println!("{}", "✓ Authentication successful!".green());
        if let Some(info) = status.account_info {
            println!("  {info}");
        }
        Ok(0)
    } else {
        println!("{}", "✗ Authentication failed.".red());
        if let Some(error) = status.error {
            println!("  {error}");
        }
        println!();
        println!("Check the oci CLI setup: {}", "oci setup config".cyan());
        Ok(1)
    }
}
