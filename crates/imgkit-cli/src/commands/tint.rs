//! Constant-color blend command.

use crate::TintArgs;
use anyhow::{Context, Result};
use imgkit_ops::blend::{self, BlendOp};
use tracing::trace;

pub fn run(args: TintArgs, verbose: bool) -> Result<()> {
    trace!(input = %args.input.display(), color = %args.color, op = %args.op, "tint::run");

    let op: BlendOp = args.op.parse().context("Invalid blend op")?;
    let color = super::parse_color(&args.color)?;
    let image = super::load_image(&args.input)?;

    if verbose {
        println!("{} {} {:?}", args.input.display(), op, color);
    }

    let output = image.with_pixels(blend::blend_color(image.pixels(), color, op))?;
    super::save_image(&args.output, &output)?;

    Ok(())
}
