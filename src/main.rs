//! Sessionizer - pick a project and jump into its tmux session
//!
//! Run with `sessionizer` or `sessionizer --help` for usage.

use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sessionizer::{
    config::Config,
    project::build_entries,
    scan::{collect_directories, home_dir},
    tmux::{finish, AttachStrategy, SessionLauncher, TmuxExecutor},
    tui::{Picker, Theme},
    APP_NAME, VERSION,
};

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version = VERSION)]
#[command(about = "Pick a project directory and attach to a tmux session rooted there")]
#[command(long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn setup_logging(config: &Config) -> Result<()> {
    let filter = if config.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Log to file so output doesn't interfere with the picker or tmux
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_file_path())?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(filter)
        .init();

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Install color-eyre error hooks
    color_eyre::install()?;

    let cli = Cli::parse();

    let mut config = Config::load()?;
    config.debug |= cli.debug;

    setup_logging(&config)?;
    info!("Starting Sessionizer v{}", VERSION);

    let home = home_dir()?;
    let listings = collect_directories(&home, &config.roots).await?;
    let entries = build_entries(&home, &listings);
    info!("Collected {} projects", entries.len());

    let theme = Theme::default();
    let selection = Picker::new(entries, theme, &config.title).run().await?;

    let launcher = SessionLauncher::new(TmuxExecutor::with_program(&config.tmux_program));
    let outcome = finish(selection.as_deref(), &launcher, AttachStrategy::detect()).await?;

    info!("Exiting with {:?}", outcome);
    Ok(ExitCode::from(outcome.exit_code()))
}
