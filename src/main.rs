use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{
    path::Path,
    process::exit,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};
use tracing::info;

mod clean;
mod create;
mod encode;
mod log;
mod select;
mod timestamp;
mod types;

use types::{consts::DEFAULT_LOG_FILTER, create_args::CreateArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Builds time-lapse videos from timestamped images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a video from images named YYYY-MM-DD_HH-MM-SS.mmm*.{png,jpg,jpeg}
    Create(CreateArgs),
    /// Delete every *.type.json file below the current directory
    RemoveTypeJson,
}

fn main() -> Result<()> {
    log::set(DEFAULT_LOG_FILTER);

    let cli = Cli::parse();
    let start_time = Instant::now();

    match cli.command {
        Commands::Create(args) => {
            let cancelled = Arc::new(AtomicBool::new(false));
            let flag = Arc::clone(&cancelled);
            ctrlc::set_handler(move || {
                if flag.swap(true, Ordering::SeqCst) {
                    exit(130);
                }
                eprintln!("\nInterrupted, stopping after the current frame (press again to quit)");
            })
            .with_context(|| "Failed to set Ctrl+C handler")?;

            println!("Starting time-lapse creation...");
            let mut writer = encode::FfmpegWriter::new(args.codec.clone(), cancelled);
            create::run_create(&args, &mut writer)?;
        }
        Commands::RemoveTypeJson => {
            let report = clean::remove_type_json_files(Path::new("./"));
            info!(
                "Removed {} file(s), {} failure(s)",
                report.removed.len(),
                report.failed.len()
            );
        }
    }

    let duration = start_time.elapsed();
    println!("\nCommand completed in: {duration:.2?}");
    Ok(())
}
