use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Input directory containing images
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output video filename (e.g., output.mp4)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Timezone for image timestamps (e.g., America/Chicago)
    #[arg(short, long)]
    pub timezone: String,

    /// Start timestamp in epoch seconds
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub start: f64,

    /// End timestamp in epoch seconds
    #[arg(short, long, default_value_t = f64::INFINITY, allow_negative_numbers = true)]
    pub end: f64,

    /// Duration per image in seconds
    #[arg(short, long, default_value_t = 5.0)]
    pub duration: f64,

    /// Frames per second for output video
    #[arg(short, long, default_value_t = 24)]
    pub fps: u32,

    /// FFmpeg encoder name (e.g. libx264); defaults to the container's video codec
    #[arg(short, long)]
    pub codec: Option<String>,
}
