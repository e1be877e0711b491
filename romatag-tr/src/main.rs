//! romatag - CJK title romanizer
//!
//! Walks a music directory and rewrites CJK track titles to Hepburn
//! romaji, archiving the original title in a separate tag. `--restore`
//! puts the archived titles back.
//!
//! Exit codes: 0 on completion (skips included), 1 when a file cannot be
//! read or saved, 2 on invalid arguments or configuration.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use romatag_common::config::{load_settings, Settings};
use romatag_tr::scanner::FileScanner;
use romatag_tr::tag_store::LoftyProvider;
use romatag_tr::{
    FailurePolicy, Mode, Reporter, RewriteOptions, RunError, Runner, TitleRewriter,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for romatag
#[derive(Parser, Debug)]
#[command(name = "romatag")]
#[command(about = "Romanize CJK song titles in audio tags (and restore them)")]
#[command(version)]
struct Args {
    /// Perform dry run
    #[arg(short, long)]
    dry_run: bool,

    /// Append original title (in brackets)
    #[arg(short, long)]
    append_original: bool,

    /// Restore original title
    #[arg(short, long)]
    restore: bool,

    /// Keep going when a file cannot be read or saved
    #[arg(short, long)]
    keep_going: bool,

    /// Config file (TOML)
    #[arg(short, long, value_name = "FILE", env = "ROMATAG_CONFIG")]
    config: Option<PathBuf>,

    /// Tag key holding the archived original title
    #[arg(long, value_name = "KEY", env = "ROMATAG_ARCHIVE_KEY")]
    archive_key: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Music directory to process recursively
    directory: PathBuf,
}

type FilterHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() -> ExitCode {
    let args = Args::parse();
    let filter_handle = init_tracing(args.verbose);

    let settings = match resolve_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(2);
        }
    };
    apply_log_level(&filter_handle, &args, &settings);

    match run(&args, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(RunError::Tag { path, source }) => {
            tracing::error!(file = %path.display(), error = %source, "Aborting run");
            println!("{}", source);
            println!("--> Failed to handle file: '{}'", path.display());
            println!("File may be corrupt or empty. Please check.");
            ExitCode::from(1)
        }
        Err(e) => {
            tracing::error!(error = %e, "Aborting run");
            println!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Logs go to stderr; stdout carries the report
fn init_tracing(verbose: bool) -> FilterHandle {
    let default_directive = if verbose {
        "romatag=debug,romatag_tr=debug,romatag_common=debug"
    } else {
        "romatag=info,romatag_tr=info,romatag_common=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into());
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    handle
}

/// Config file level applies only when neither RUST_LOG nor --verbose is set
fn apply_log_level(handle: &FilterHandle, args: &Args, settings: &Settings) {
    if args.verbose || std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    let directive = format!(
        "romatag={0},romatag_tr={0},romatag_common={0}",
        settings.log_level
    );
    match EnvFilter::try_new(&directive) {
        Ok(filter) => {
            if let Err(e) = handle.reload(filter) {
                warn!("Failed to apply log level: {}", e);
            }
        }
        Err(e) => warn!("Invalid log level '{}': {}", settings.log_level, e),
    }
}

fn resolve_settings(args: &Args) -> Result<Settings> {
    let settings = load_settings(args.config.as_deref()).context("Failed to load configuration")?;
    match &args.archive_key {
        Some(key) => settings
            .with_archive_key(key)
            .context("Invalid --archive-key"),
        None => Ok(settings),
    }
}

fn run(args: &Args, settings: &Settings) -> Result<(), RunError> {
    let mode = if args.restore { Mode::Restore } else { Mode::Convert };
    let options = RewriteOptions {
        mode,
        dry_run: args.dry_run,
        append_original: args.append_original,
    };
    let policy = if args.keep_going {
        FailurePolicy::Continue
    } else {
        FailurePolicy::Abort
    };

    info!("romatag {}", env!("CARGO_PKG_VERSION"));
    if options.dry_run {
        info!("Dry run: no tags will be written");
    }

    let runner = Runner::new(
        FileScanner::new(&settings.extensions),
        LoftyProvider::new(settings.archive_key.clone()),
        TitleRewriter::new(options),
        policy,
    );

    let reporter = Reporter::new(
        io::stdout().lock(),
        mode,
        settings.old_title_width,
        settings.new_title_width,
    );

    runner.run(&args.directory, reporter)?;
    Ok(())
}
