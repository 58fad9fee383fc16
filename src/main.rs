use clap::Parser;
use downsize::config::ConfigStore;
use downsize::imaging::{RustBackend, ScalePolicy};
use downsize::output;
use downsize::process::{self, BatchSettings};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "downsize")]
#[command(about = "Resize images so their longer side fits a bound")]
#[command(long_about = "\
Resize images so their longer side fits a bound

Each input is written next to the original as NAME_WxH.EXT, or
NAME_WxH.N.EXT when that name is already taken. Existing files are never
overwritten.

Settings live in config.json beside the executable and are created with
defaults on the first run:

  {
    \"Format\": \"Jpeg\",          # or \"Png\"
    \"MaxResolution\": 1024,     # longer output side, in pixels
    \"Quality\": 80              # 0-100, JPEG only
  }

Edit the file between runs to change them.")]
#[command(version)]
struct Cli {
    /// Image files to convert
    paths: Vec<PathBuf>,

    /// Use this configuration file instead of config.json beside the executable
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Keep images that already fit the bound at their original size
    #[arg(long)]
    no_upscale: bool,

    /// Exit with status 1 if any file failed to convert
    #[arg(long)]
    strict: bool,

    /// Print debug diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.paths.is_empty() {
        return ExitCode::SUCCESS;
    }

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", output::format_fatal(&*e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let store = match &cli.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::beside_executable()?,
    };
    let config = store.load();

    let policy = if cli.no_upscale {
        ScalePolicy::ShrinkOnly
    } else {
        ScalePolicy::AlwaysFit
    };
    let settings = BatchSettings::from_config(&config, policy);
    debug!(?settings, inputs = cli.paths.len(), "starting batch");

    let backend = RustBackend::new();
    let report = process::process_batch(&backend, cli.paths.as_slice(), &settings, |event| {
        output::print_process_event(&event)
    })?;

    store.save(&config)?;

    if cli.strict && report.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    // Ignored if a global subscriber is already installed.
    tracing::subscriber::set_global_default(subscriber).ok();
}
