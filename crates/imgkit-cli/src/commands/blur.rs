//! Blur command
//!
//! Runs the box blur through the async task API and waits on the result.

use crate::BlurArgs;
use anyhow::{Context, Result};
use imgkit_ops::task::blur_bitmap_async;
use std::sync::mpsc;
use tracing::{info, trace};

pub fn run(args: BlurArgs, verbose: bool) -> Result<()> {
    trace!(input = %args.input.display(), radius = args.radius, "blur::run");

    let image = super::load_image(&args.input)?;
    info!(radius = args.radius, w = image.width(), h = image.height(), "Applying blur");

    if verbose {
        println!("Applying box blur (radius={}) to {}", args.radius, args.input.display());
    }

    let (tx, rx) = mpsc::channel();
    let _task = blur_bitmap_async(image, args.radius, move |result| {
        let _ = tx.send(result);
    })?;
    let output = rx.recv().context("Blur worker exited without a result")??;

    super::save_image(&args.output, &output)?;

    if verbose {
        println!("Done.");
    }

    Ok(())
}
