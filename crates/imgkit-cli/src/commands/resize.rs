//! Resize command.

use crate::ResizeArgs;
use anyhow::{bail, Context, Result};
use imgkit_core::ImageSize;
use imgkit_ops::resize::{resize_buffer, ResizeFilter};
use tracing::{info, trace};

pub fn run(args: ResizeArgs, verbose: bool) -> Result<()> {
    trace!(input = %args.input.display(), w = args.width, h = args.height, "resize::run");

    if args.width == 0 || args.height == 0 {
        bail!("Target size must be non-zero, got {}x{}", args.width, args.height);
    }
    let filter: ResizeFilter = args.filter.parse().context("Invalid resize filter")?;
    let image = super::load_image(&args.input)?;

    info!(%filter, from_w = image.width(), from_h = image.height(), to_w = args.width, to_h = args.height, "Resizing");
    if verbose {
        println!(
            "Resizing {}x{} -> {}x{} ({})",
            image.width(),
            image.height(),
            args.width,
            args.height,
            filter
        );
    }

    let output = resize_buffer(&image, ImageSize::new(args.width, args.height), filter)?;
    super::save_image(&args.output, &output)?;

    Ok(())
}
