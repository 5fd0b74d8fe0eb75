//! Two-image blend command.

use crate::BlendArgs;
use anyhow::{Context, Result};
use imgkit_ops::blend::{self, BlendOp};
use tracing::{info, trace};

pub fn run(args: BlendArgs, verbose: bool) -> Result<()> {
    trace!(a = %args.a.display(), b = %args.b.display(), op = %args.op, "blend::run");

    let op: BlendOp = args.op.parse().context("Invalid blend op")?;
    let a = super::load_image(&args.a)?;
    let b = super::load_image(&args.b)?;
    info!(%op, w = a.width(), h = a.height(), "Blending");
    if verbose {
        println!("{} {} {}", args.a.display(), op, args.b.display());
    }

    let output = match op {
        BlendOp::Divide if args.strict => blend::divide_buffers_checked(&a, &b)?,
        _ => blend::blend_buffers(&a, &b, op)?,
    };
    super::save_image(&args.output, &output)?;

    if verbose {
        println!("Done.");
    }

    Ok(())
}
