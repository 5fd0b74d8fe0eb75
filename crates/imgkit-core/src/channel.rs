//! Channel selection for filters.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Selects which channels a transform computes and how the rest are
/// synthesized.
///
/// See [`crate::color::isolate_channel`] for the exact projection table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelMode {
    /// Color channels, alpha forced opaque.
    #[default]
    Rgb,
    /// Color channels, alpha passed through.
    Rgba,
    /// Red only.
    R,
    /// Green only.
    G,
    /// Blue only.
    B,
    /// Alpha broadcast into the color channels.
    A,
    /// Luminance broadcast into the color channels.
    Greyscale,
}

impl ChannelMode {
    /// Every mode, in declaration order.
    pub const ALL: [ChannelMode; 7] = [
        ChannelMode::Rgb,
        ChannelMode::Rgba,
        ChannelMode::R,
        ChannelMode::G,
        ChannelMode::B,
        ChannelMode::A,
        ChannelMode::Greyscale,
    ];

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            ChannelMode::Rgb => "rgb",
            ChannelMode::Rgba => "rgba",
            ChannelMode::R => "r",
            ChannelMode::G => "g",
            ChannelMode::B => "b",
            ChannelMode::A => "a",
            ChannelMode::Greyscale => "greyscale",
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChannelMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" => Ok(ChannelMode::Rgb),
            "rgba" => Ok(ChannelMode::Rgba),
            "r" | "red" => Ok(ChannelMode::R),
            "g" | "green" => Ok(ChannelMode::G),
            "b" | "blue" => Ok(ChannelMode::B),
            "a" | "alpha" => Ok(ChannelMode::A),
            "greyscale" | "grayscale" | "grey" | "gray" => Ok(ChannelMode::Greyscale),
            other => Err(Error::other(format!("unknown channel mode '{other}'"))),
        }
    }
}
