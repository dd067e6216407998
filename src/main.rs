// src/main.rs

use ruwnch::cli::{self, USAGE};
use ruwnch::config::SettingsSource;
use ruwnch::errors::Result;
use ruwnch::fs::RealFileSystem;
use ruwnch::{config, logging, run};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("ruwnch error: {err}");
        if err.is_startup_error() {
            eprintln!("{USAGE}");
        }
        std::process::exit(1);
    }
}

async fn run_main() -> Result<()> {
    let args = cli::parse();
    let (settings, source) = config::load_or_init(&RealFileSystem, &args.config)?;
    logging::init_logging(args.log_level, settings.use_color())?;
    if source == SettingsSource::Generated {
        info!(path = ?args.config, "generated missing settings file with defaults");
    }
    run(args, settings).await
}
