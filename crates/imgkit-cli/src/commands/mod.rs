//! CLI command implementations

pub mod blend;
pub mod blur;
pub mod filter;
pub mod info;
pub mod resize;
pub mod tint;
pub mod tone;

use anyhow::{bail, Context, Result};
use imgkit_core::{LinearColor, PixelBuffer};
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    imgkit_io::load(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, buffer: &PixelBuffer) -> Result<()> {
    imgkit_io::save(path, buffer).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Parse `R,G,B` or `R,G,B,A` in 0..1; alpha defaults to 1.
pub fn parse_color(s: &str) -> Result<LinearColor> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().with_context(|| format!("Invalid color component: '{p}'")))
        .collect::<Result<Vec<_>>>()?;
    match parts.as_slice() {
        [r, g, b] => Ok(LinearColor::new(*r, *g, *b, 1.0)),
        [r, g, b, a] => Ok(LinearColor::new(*r, *g, *b, *a)),
        _ => bail!("Color must be R,G,B or R,G,B,A, got '{s}'"),
    }
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
