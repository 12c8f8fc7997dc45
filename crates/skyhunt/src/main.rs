mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use skyhunt_cloud::FileMarker;
use skyhunt_cloud_oci::OciProvider;
use skyhunt_config::HuntSettings;

/// Pass failed (capacity exhausted or configuration error)
const EXIT_FAILURE: i32 = 1;
/// Interrupted mid-attempt; distinct so schedulers can tell it apart
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Parser)]
#[command(name = "skyhunt")]
#[command(version)]
#[command(about = "Hunt down an OCI Always Free instance, one scheduled pass at a time", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one hunt pass (the scheduler entry point; no-op after success)
    Hunt {
        /// Only try the configured availability domain instead of cycling
        /// through all of them
        #[arg(long)]
        no_cycle: bool,

        /// Validate configuration without creating anything
        #[arg(long)]
        dry_run: bool,

        /// Run the pass even if the completion marker is present
        #[arg(long)]
        force: bool,
    },
    /// Show completion marker and live instance state
    Status,
    /// Clear the completion marker (after terminating the instance)
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List availability domains in the region
    Ads,
    /// List available images
    Images {
        /// Filter to images compatible with a shape (e.g. VM.Standard.A1.Flex)
        #[arg(long)]
        shape: Option<String>,

        /// Filter by operating system (e.g. "Canonical Ubuntu")
        #[arg(long)]
        os: Option<String>,
    },
    /// List compute shapes, flagging Always Free eligible ones
    Shapes,
    /// Check oci CLI authentication
    Auth,
    /// Validate the configuration
    Validate,
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // A partially-sent launch request cannot be un-sent, so an interrupt
    // does not try to cancel gracefully; it just reports distinctly.
    let code = tokio::select! {
        result = dispatch(cli) => match result {
            Ok(code) => code,
            Err(e) => {
                eprintln!("{} {e:#}", "Error:".red().bold());
                EXIT_FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!();
            eprintln!("{}", "Interrupted.".yellow());
            EXIT_INTERRUPTED
        }
    };

    std::process::exit(code);
}

async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    // Version needs no configuration
    if matches!(cli.command, Commands::Version) {
        println!("skyhunt {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    let settings = HuntSettings::load()?;
    tracing::debug!(
        "Configuration loaded: display name '{}', shape {}",
        settings.display_name,
        settings.shape
    );
    let provider = OciProvider::new(
        settings.compartment_id.clone(),
        settings.profile.clone(),
        settings.region.clone(),
    );
    let marker = FileMarker::new(std::env::current_dir()?);

    match cli.command {
        Commands::Hunt {
            no_cycle,
            dry_run,
            force,
        } => commands::hunt::handle(&settings, &provider, &marker, no_cycle, dry_run, force).await,
        Commands::Status => commands::status::handle(&settings, &provider, &marker).await,
        Commands::Reset { yes } => commands::reset::handle(&settings, &marker, yes).await,
        Commands::Ads => commands::ads::handle(&provider).await,
        Commands::Images { shape, os } => {
            commands::images::handle(&settings, &provider, shape, os).await
        }
        Commands::Shapes => commands::shapes::handle(&provider).await,
        Commands::Auth => commands::auth::handle(&provider).await,
        Commands::Validate => commands::validate::handle(&settings, &provider).await,
        Commands::Version => unreachable!("Version is handled before config loading"),
    }
}
