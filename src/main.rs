use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vix::{app::App, logging};

/// Modal terminal editor built on the vix editing engine.
#[derive(Debug, Parser)]
#[command(name = "vix", version)]
struct Cli {
	/// File to load into the buffer at startup.
	file: Option<PathBuf>,
}

fn main() {
	if let Err(err) = run() {
		eprintln!("{:#}", err);
		std::process::exit(1);
	}
}

fn run() -> Result<()> {
	logging::init_logging().context("initialize logging failed")?;
	let cli = Cli::parse();
	let app = App::new(cli.file).context("initialize app failed")?;
	app.run().context("run app failed")
}
