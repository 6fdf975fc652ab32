use clap::Parser;
use env_refresh::host::{CollectedEnvironment, LocalHost};
use env_refresh::refresh::RefreshController;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
  name = "env-refresh",
  about = "Keep a terminal's environment in sync with your project's .env files",
  version,
  author
)]
struct Cli {
  /// Workspace root folders to scan for .env files, in precedence order
  #[arg(default_value = ".")]
  roots: Vec<PathBuf>,

  /// Print PowerShell assignments instead of POSIX export lines
  #[arg(long)]
  powershell: bool,

  /// Verbose output (-v for verbose, -vv for very verbose)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn setup_tracing(verbose: u8) {
  use tracing_subscriber::fmt;
  use tracing_subscriber::prelude::*;

  let log_level = match verbose {
    1 => "debug",
    2 => "trace",
    _ => "info",
  };

  tracing_subscriber::registry()
    .with(fmt::layer())
    .with(tracing_subscriber::EnvFilter::new(
      std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
    ))
    .init();
}

fn main() {
  let cli = Cli::parse();

  setup_tracing(cli.verbose);

  let host = LocalHost::new(cli.roots);
  let controller = RefreshController::new(host, CollectedEnvironment::new());

  for (key, value) in controller.sink().vars() {
    if cli.powershell {
      println!("$env:{key}=\"{value}\"");
    } else {
      println!("export {key}=\"{value}\"");
    }
  }
}
