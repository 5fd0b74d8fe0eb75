//! Tone adjustment command.

use crate::ToneArgs;
use anyhow::Result;
use imgkit_ops::ToneAdjustment;
use tracing::{debug, trace};

pub fn run(args: ToneArgs, verbose: bool) -> Result<()> {
    trace!(input = %args.input.display(), "tone::run");

    let adjust = ToneAdjustment {
        brightness: args.brightness,
        contrast: args.contrast,
        hue: args.hue,
        saturation: args.saturation,
        luminance: args.luminance,
    };
    debug!(?adjust, "tone");

    let image = super::load_image(&args.input)?;
    let output = if adjust.is_identity() {
        if verbose {
            println!("All parameters neutral, copying {}", args.input.display());
        }
        image
    } else {
        image.with_pixels(adjust.apply(image.pixels()))?
    };
    super::save_image(&args.output, &output)?;

    if verbose {
        println!("Done.");
    }

    Ok(())
}
