//! `pagecraft` command line entry point.

use clap::Parser;
use pagecraft_app::{AppError, load_config, load_script, render_output, run};
use pagecraft_core::EditorConfig;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "pagecraft", about = "Replay a pointer gesture script against the canvas engine")]
struct Cli {
    /// Gesture script (JSON).
    #[arg(long, env = "PAGECRAFT_SCRIPT")]
    script: PathBuf,

    /// Engine config (JSON). Missing fields use defaults.
    #[arg(long, env = "PAGECRAFT_CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,
}

fn execute(cli: &Cli) -> Result<String, AppError> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EditorConfig::default(),
    };
    let script = load_script(&cli.script)?;
    let output = run(&script, config);
    render_output(&output, cli.pretty)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting pagecraft");

    let cli = Cli::parse();
    match execute(&cli) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
