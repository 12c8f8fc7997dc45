//! `skyhunt shapes` — list compute shapes

use colored::Colorize;
use skyhunt_cloud::ComputeProvider;

pub async fn handle(provider: &dyn ComputeProvider) -> anyhow::Result<i32> {
    let shapes = provider.list_shapes().await?;

    if shapes.is_empty() {
        println!("{}", "No shapes found.".yellow());
        return Ok(1);
    }

    println!("{}", "Always Free eligible shapes:".green());
    println!();
    for shape in shapes.iter().filter(|s| s.is_free_tier()) {
        println!("  {}", shape.shape.yellow());
        if let (Some(ocpus), Some(memory)) = (shape.ocpus, shape.memory_gbs) {
            println!("    OCPUs: {ocpus}, Memory: {memory} GB");
        }
    }
    println!();
    println!(
        "{}",
        "Note: VM.Standard.A1.Flex allows up to 4 OCPUs / 24 GB total for free;".cyan()
    );
    println!(
        "{}",
        "      VM.Standard.E2.1.Micro is 1 OCPU / 1 GB (2 instances free).".cyan()
    );

    Ok(0)
}
