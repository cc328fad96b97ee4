use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use gitmenu::app::App;
use gitmenu::cli::CliArgs;
use gitmenu::config::Config;
use gitmenu::error::AppError;
use gitmenu::git::SystemGit;
use gitmenu::menu::Prompter;

const CANCELLED: &str = "Operation cancelled by user.";

fn main() -> Result<()> {
    // Diagnostics go to stderr so they never interleave with the menus
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    ctrlc::set_handler(|| {
        println!("\n{}", CANCELLED);
        std::process::exit(0);
    })
    .context("Failed to install Ctrl-C handler")?;

    let config = Config::from_cli(CliArgs::parse());
    config.ensure_base_dir()?;
    info!(base_dir = %config.base_dir.display(), "starting gitmenu");

    let app = App::new(config, SystemGit::new());
    let mut prompter = Prompter::stdio();

    match app.run(&mut prompter) {
        Ok(()) => Ok(()),
        Err(AppError::Interrupted) => {
            println!("\n{}", CANCELLED);
            Ok(())
        }
        Err(err) => {
            error!("Application error: {}", err);
            Err(err).context("gitmenu stopped unexpectedly")
        }
    }
}
