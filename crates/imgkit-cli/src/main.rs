//! imgkit - bitmap transform CLI
//!
//! Thin front end over `imgkit-ops` with codec glue from `imgkit-io`.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "imgkit")]
#[command(author, version, about = "8-bit RGBA bitmap transforms")]
#[command(long_about = "
Tone, blend, convolution and resize operations on PNG, JPEG and BMP images.

Examples:
  imgkit info a.png b.jpg
  imgkit filter in.png -o out.png --kernel sharpen
  imgkit filter in.png -o edges.png --kernel edge-detection --edge clamp
  imgkit tone in.jpg -o out.jpg --brightness 1.2 --saturation 0.8
  imgkit blend a.png b.png -o out.png --op multiply
  imgkit tint in.png -o out.png --color 1,0.5,0.5,1 --op multiply
  imgkit resize in.png -o small.png -w 320 -H 200 --filter box
  imgkit blur in.png -o soft.png --radius 3
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Show format and dimensions without decoding
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convolve with a named kernel
    #[command(visible_alias = "f")]
    Filter(FilterArgs),

    /// Brightness, contrast and hue/saturation/luminance
    Tone(ToneArgs),

    /// Per-channel arithmetic between two images
    Blend(BlendArgs),

    /// Per-channel arithmetic against a constant color
    Tint(TintArgs),

    /// Resample to new dimensions
    #[command(visible_alias = "r")]
    Resize(ResizeArgs),

    /// Box blur on the worker pool
    Blur(BlurArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct FilterArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Kernel: identity, box-blur, gaussian1, gaussian2, sharpen, edge-detection
    #[arg(short, long)]
    kernel: String,

    /// Channel mode override: r, g, b, a, rgb, rgba, greyscale
    #[arg(short, long)]
    channel: Option<String>,

    /// Border sampling: flat, clamp
    #[arg(long, default_value = "flat")]
    edge: String,
}

#[derive(Args)]
struct ToneArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Brightness parameter (0..2, 1 = neutral)
    #[arg(long, default_value = "1.0")]
    brightness: f32,

    /// Contrast parameter (0..2, 1 = neutral)
    #[arg(long, default_value = "1.0")]
    contrast: f32,

    /// Hue rotation in degrees (0..360)
    #[arg(long, default_value = "0.0")]
    hue: f32,

    /// Saturation multiplier
    #[arg(long, default_value = "1.0")]
    saturation: f32,

    /// Luminance multiplier
    #[arg(long, default_value = "1.0")]
    luminance: f32,
}

#[derive(Args)]
struct BlendArgs {
    /// First image
    a: PathBuf,

    /// Second image (same dimensions)
    b: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Operation: add, multiply, divide
    #[arg(long, default_value = "add")]
    op: String,

    /// Fail instead of saturating on zero divisors
    #[arg(long)]
    strict: bool,
}

#[derive(Args)]
struct TintArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Color as R,G,B,A in 0..1
    #[arg(long)]
    color: String,

    /// Operation: add, multiply, divide
    #[arg(long, default_value = "multiply")]
    op: String,
}

#[derive(Args)]
struct ResizeArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Target width
    #[arg(short, long)]
    width: u32,

    /// Target height
    #[arg(short = 'H', long)]
    height: u32,

    /// Filter: nearest, bilinear, box
    #[arg(short, long, default_value = "bilinear")]
    filter: String,
}

#[derive(Args)]
struct BlurArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Blur radius in pixels
    #[arg(short, long, default_value = "1")]
    radius: u32,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Filter(args) => commands::filter::run(args, cli.verbose),
        Commands::Tone(args) => commands::tone::run(args, cli.verbose),
        Commands::Blend(args) => commands::blend::run(args, cli.verbose),
        Commands::Tint(args) => commands::tint::run(args, cli.verbose),
        Commands::Resize(args) => commands::resize::run(args, cli.verbose),
        Commands::Blur(args) => commands::blur::run(args, cli.verbose),
    }
}
