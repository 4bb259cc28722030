//! roster CLI — menu-driven student record manager.

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

mod console;
mod menu;
mod session;

use console::Console;
use session::Session;

#[derive(Parser)]
#[command(name = "roster", version, about = "Menu-driven student record manager")]
struct Cli {
    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Student records file (default: students.json)
    #[arg(long)]
    student_file: Option<PathBuf>,

    /// Admin credential file (default: admin.json)
    #[arg(long)]
    admin_file: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("roster=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = roster_core::load_config_from(cli.config.as_deref())?;
    if let Some(path) = cli.student_file {
        config.student_file = path;
    }
    if let Some(path) = cli.admin_file {
        config.admin_file = path;
    }
    tracing::debug!(?config, "resolved store paths");

    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    Session::new(console, &config).run()
}
