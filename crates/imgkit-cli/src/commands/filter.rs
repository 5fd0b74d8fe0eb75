//! Kernel convolution command.

use crate::FilterArgs;
use anyhow::{Context, Result};
use imgkit_core::ChannelMode;
use imgkit_ops::{get_bitmap_filter, BitmapFilterType, EdgeMode};
use tracing::{info, trace};

pub fn run(args: FilterArgs, verbose: bool) -> Result<()> {
    trace!(input = %args.input.display(), kernel = %args.kernel, "filter::run");

    let kind: BitmapFilterType = args.kernel.parse().context("Unknown kernel")?;
    let channel = args
        .channel
        .as_deref()
        .map(str::parse::<ChannelMode>)
        .transpose()
        .context("Invalid channel mode")?;
    let edge: EdgeMode = args.edge.parse().context("Invalid edge mode")?;

    let image = super::load_image(&args.input)?;
    let filter = get_bitmap_filter(kind, channel).with_edge_mode(edge);
    info!(%kind, channel = %filter.channel_mode, %edge, w = image.width(), h = image.height(), "Applying filter");

    if verbose {
        println!("Applying {} ({}, {} edges) to {}", kind, filter.channel_mode, edge, args.input.display());
    }

    let output = imgkit_ops::parallel::apply_filter_buffer(&image, &filter)?;
    super::save_image(&args.output, &output)?;

    if verbose {
        println!("Done.");
    }

    Ok(())
}
