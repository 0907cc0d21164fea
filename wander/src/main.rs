use anyhow::Result;
use clap::Parser;

use wander::cli::Cli;
use wander::settings::Settings;
use wander::{logging, App};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let (log_path, _guard) = logging::init_logging(cli.verbose)?;
    tracing::debug!(path = %log_path.display(), "Logging initialized");

    let settings = Settings::new()?;
    settings.validate().map_err(|e| {
        eprintln!("Configuration validation failed: {}", e);
        eprintln!("\nSet at least the service URLs in config.toml:");
        eprintln!("\n[api]\nbase_url = \"https://api.example.com\"");
        eprintln!("\n[auth]\nbase_url = \"https://api.example.com\"");
        anyhow::anyhow!(e)
    })?;

    let app = App::new(&settings)?;
    let output = app.run(cli.command).await?;
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
