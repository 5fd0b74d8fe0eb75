//! Convolution kernels and the named kernel catalog.
//!
//! A [`BitmapFilter`] is plain data: dimensions, row-major weights, a scale
//! factor, a per-cell bias, the [`ChannelMode`] the result is projected
//! onto, and the [`EdgeMode`] used to sample outside the image.
//!
//! # Catalog
//!
//! | Kind          | Size | Factor | Default mode |
//! |---------------|------|--------|--------------|
//! | Identity      | 3x3  | 1      | Rgba         |
//! | BoxBlur       | 3x3  | 1/9    | Rgba         |
//! | Gaussian1     | 3x3  | 1/16   | Rgba         |
//! | Gaussian2     | 5x5  | 1/256  | Rgba         |
//! | Sharpen       | 3x3  | 1      | Rgba         |
//! | EdgeDetection | 3x3  | 1      | Greyscale    |
//!
//! # Example
//!
//! ```rust
//! use imgkit_core::ChannelMode;
//! use imgkit_ops::kernels::{get_bitmap_filter, BitmapFilterType};
//!
//! let edges = get_bitmap_filter(BitmapFilterType::EdgeDetection, None);
//! assert_eq!(edges.channel_mode, ChannelMode::Greyscale);
//! assert_eq!(edges.weights.iter().sum::<f32>(), 0.0);
//!
//! let red_blur = get_bitmap_filter(BitmapFilterType::BoxBlur, Some(ChannelMode::R));
//! assert_eq!(red_blur.channel_mode, ChannelMode::R);
//! ```

use std::fmt;
use std::str::FromStr;

use imgkit_core::ChannelMode;

use crate::{OpsError, OpsResult};

/// Largest kernel width or height the convolution accepts.
pub const MAX_KERNEL_SIZE: u32 = 1025;

/// Largest radius accepted by [`BitmapFilter::box_blur`].
pub const MAX_BLUR_RADIUS: u32 = (MAX_KERNEL_SIZE - 1) / 2;

/// How kernel taps outside the image are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeMode {
    /// Clamp the flat index `sy * width + sx` into the buffer.
    ///
    /// Taps past the left or right border read from the neighbouring row.
    /// This matches the long-standing output of the engine.
    #[default]
    FlatIndex,
    /// Clamp `sx` and `sy` to the image rectangle independently.
    Clamp,
}

impl FromStr for EdgeMode {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" | "flat-index" | "flatindex" => Ok(EdgeMode::FlatIndex),
            "clamp" | "edge" => Ok(EdgeMode::Clamp),
            other => Err(OpsError::InvalidParameter(format!("unknown edge mode '{other}'"))),
        }
    }
}

impl fmt::Display for EdgeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EdgeMode::FlatIndex => "flat",
            EdgeMode::Clamp => "clamp",
        })
    }
}

/// Convolution kernel plus output policy.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapFilter {
    /// Kernel width in taps.
    pub width: u32,
    /// Kernel height in taps.
    pub height: u32,
    /// Row-major weights, nominally `width * height` long.
    pub weights: Vec<f32>,
    /// Multiplier applied to every weight.
    pub factor: f32,
    /// Added to each channel once per kernel tap.
    pub bias: f32,
    /// Projection of the accumulated color.
    pub channel_mode: ChannelMode,
    /// Sampling policy at the borders.
    pub edge_mode: EdgeMode,
}

impl Default for BitmapFilter {
    fn default() -> Self {
        Self::new(3, 3, vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0])
    }
}

impl BitmapFilter {
    /// Kernel with factor 1, bias 0, [`ChannelMode::Rgb`] and flat-index edges.
    pub fn new(width: u32, height: u32, weights: Vec<f32>) -> Self {
        Self {
            width,
            height,
            weights,
            factor: 1.0,
            bias: 0.0,
            channel_mode: ChannelMode::Rgb,
            edge_mode: EdgeMode::FlatIndex,
        }
    }

    /// Set the weight multiplier.
    pub fn with_factor(mut self, factor: f32) -> Self {
        self.factor = factor;
        self
    }

    /// Set the per-tap bias.
    pub fn with_bias(mut self, bias: f32) -> Self {
        self.bias = bias;
        self
    }

    /// Set the output channel projection.
    pub fn with_channel_mode(mut self, mode: ChannelMode) -> Self {
        self.channel_mode = mode;
        self
    }

    /// Set the border sampling policy.
    pub fn with_edge_mode(mut self, mode: EdgeMode) -> Self {
        self.edge_mode = mode;
        self
    }

    /// True when the weight count equals `width * height`.
    ///
    /// Malformed kernels are still accepted by the convolution, which clamps
    /// weight indices to the last valid entry.
    pub fn is_well_formed(&self) -> bool {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .is_some_and(|n| n == self.weights.len())
    }

    /// Reject footprints larger than [`MAX_KERNEL_SIZE`] on either axis.
    pub fn check_size(&self) -> OpsResult<()> {
        if self.width > MAX_KERNEL_SIZE || self.height > MAX_KERNEL_SIZE {
            return Err(OpsError::InvalidParameter(format!(
                "kernel {}x{} exceeds {MAX_KERNEL_SIZE}x{MAX_KERNEL_SIZE}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// `(2r+1)^2` averaging kernel that keeps alpha.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] when `radius` exceeds [`MAX_BLUR_RADIUS`].
    pub fn box_blur(radius: u32) -> OpsResult<Self> {
        if radius > MAX_BLUR_RADIUS {
            return Err(OpsError::InvalidParameter(format!(
                "blur radius {radius} exceeds {MAX_BLUR_RADIUS}"
            )));
        }
        let size = 2 * radius + 1;
        let count = size as usize * size as usize;
        Ok(Self::new(size, size, vec![1.0; count])
            .with_factor(1.0 / count as f32)
            .with_channel_mode(ChannelMode::Rgba))
    }

    /// Center tap offsets `(width / 2, height / 2)`.
    #[inline]
    pub fn radius(&self) -> (u32, u32) {
        (self.width / 2, self.height / 2)
    }
}

/// Named kernels in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitmapFilterType {
    /// Center tap only.
    Identity,
    /// 3x3 mean.
    BoxBlur,
    /// 3x3 binomial.
    Gaussian1,
    /// 5x5 binomial.
    Gaussian2,
    /// 3x3 cross sharpen.
    Sharpen,
    /// 3x3 Laplacian, greyscale output.
    EdgeDetection,
}

impl BitmapFilterType {
    /// Every catalog entry.
    pub const ALL: [BitmapFilterType; 6] = [
        BitmapFilterType::Identity,
        BitmapFilterType::BoxBlur,
        BitmapFilterType::Gaussian1,
        BitmapFilterType::Gaussian2,
        BitmapFilterType::Sharpen,
        BitmapFilterType::EdgeDetection,
    ];

    /// Kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            BitmapFilterType::Identity => "identity",
            BitmapFilterType::BoxBlur => "box-blur",
            BitmapFilterType::Gaussian1 => "gaussian1",
            BitmapFilterType::Gaussian2 => "gaussian2",
            BitmapFilterType::Sharpen => "sharpen",
            BitmapFilterType::EdgeDetection => "edge-detection",
        }
    }
}

impl fmt::Display for BitmapFilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BitmapFilterType {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "identity" | "none" => Ok(BitmapFilterType::Identity),
            "boxblur" | "box" | "blur" => Ok(BitmapFilterType::BoxBlur),
            "gaussian1" | "gaussian" | "gaussian3" => Ok(BitmapFilterType::Gaussian1),
            "gaussian2" | "gaussian5" => Ok(BitmapFilterType::Gaussian2),
            "sharpen" => Ok(BitmapFilterType::Sharpen),
            "edgedetection" | "edge" | "edges" => Ok(BitmapFilterType::EdgeDetection),
            _ => Err(OpsError::InvalidParameter(format!("unknown kernel '{s}'"))),
        }
    }
}

#[rustfmt::skip]
const GAUSSIAN_5X5: [f32; 25] = [
    1.0,  4.0,  6.0,  4.0, 1.0,
    4.0, 16.0, 24.0, 16.0, 4.0,
    6.0, 24.0, 36.0, 24.0, 6.0,
    4.0, 16.0, 24.0, 16.0, 4.0,
    1.0,  4.0,  6.0,  4.0, 1.0,
];

/// Build a catalog kernel, optionally overriding its channel mode.
pub fn get_bitmap_filter(kind: BitmapFilterType, channel_mode: Option<ChannelMode>) -> BitmapFilter {
    let (filter, default_mode) = match kind {
        BitmapFilterType::Identity => (BitmapFilter::default(), ChannelMode::Rgba),
        BitmapFilterType::BoxBlur => (
            BitmapFilter::new(3, 3, vec![1.0; 9]).with_factor(1.0 / 9.0),
            ChannelMode::Rgba,
        ),
        BitmapFilterType::Gaussian1 => (
            BitmapFilter::new(3, 3, vec![1.0, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0])
                .with_factor(1.0 / 16.0),
            ChannelMode::Rgba,
        ),
        BitmapFilterType::Gaussian2 => (
            BitmapFilter::new(5, 5, GAUSSIAN_5X5.to_vec()).with_factor(1.0 / 256.0),
            ChannelMode::Rgba,
        ),
        BitmapFilterType::Sharpen => (
            BitmapFilter::new(3, 3, vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0]),
            ChannelMode::Rgba,
        ),
        BitmapFilterType::EdgeDetection => (
            BitmapFilter::new(3, 3, vec![-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0]),
            ChannelMode::Greyscale,
        ),
    };
    filter.with_channel_mode(channel_mode.unwrap_or(default_mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_catalog_is_well_formed() {
        for kind in BitmapFilterType::ALL {
            let f = get_bitmap_filter(kind, None);
            assert!(f.is_well_formed(), "{kind}");
            assert_eq!(f.bias, 0.0);
            assert_eq!(f.edge_mode, EdgeMode::FlatIndex);
        }
    }

    #[test]
    fn test_catalog_default_modes() {
        for kind in BitmapFilterType::ALL {
            let expected = if kind == BitmapFilterType::EdgeDetection {
                ChannelMode::Greyscale
            } else {
                ChannelMode::Rgba
            };
            assert_eq!(get_bitmap_filter(kind, None).channel_mode, expected);
            assert_eq!(get_bitmap_filter(kind, Some(ChannelMode::B)).channel_mode, ChannelMode::B);
        }
    }

    #[test]
    fn test_blur_kernels_normalize() {
        for kind in [BitmapFilterType::BoxBlur, BitmapFilterType::Gaussian1, BitmapFilterType::Gaussian2] {
            let f = get_bitmap_filter(kind, None);
            let sum: f32 = f.weights.iter().map(|w| w * f.factor).sum();
            assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-5);
        }
        let sharpen = get_bitmap_filter(BitmapFilterType::Sharpen, None);
        assert_eq!(sharpen.weights.iter().sum::<f32>(), 1.0);
    }

    #[test]
    fn test_gaussian2_shape() {
        let f = get_bitmap_filter(BitmapFilterType::Gaussian2, None);
        assert_eq!((f.width, f.height), (5, 5));
        assert_eq!(f.radius(), (2, 2));
        assert_eq!(f.weights[12], 36.0);
    }

    #[test]
    fn test_box_blur_radius() {
        let f = BitmapFilter::box_blur(2).unwrap();
        assert_eq!((f.width, f.height), (5, 5));
        assert!(f.is_well_formed());
        assert_abs_diff_eq!(f.factor, 1.0 / 25.0);
        assert_eq!(BitmapFilter::box_blur(0).unwrap().weights, vec![1.0]);
    }

    #[test]
    fn test_box_blur_radius_limit() {
        let widest = BitmapFilter::box_blur(MAX_BLUR_RADIUS).unwrap();
        assert_eq!(widest.width, MAX_KERNEL_SIZE);
        assert!(widest.check_size().is_ok());

        for radius in [MAX_BLUR_RADIUS + 1, 100_000, u32::MAX] {
            let err = BitmapFilter::box_blur(radius).unwrap_err();
            assert!(matches!(err, OpsError::InvalidParameter(_)), "{radius}");
        }
    }

    #[test]
    fn test_check_size() {
        assert!(BitmapFilter::default().check_size().is_ok());
        let huge = BitmapFilter::new(u32::MAX, 3, vec![1.0]);
        assert!(matches!(huge.check_size(), Err(OpsError::InvalidParameter(_))));
        let tall = BitmapFilter::new(1, MAX_KERNEL_SIZE + 1, vec![1.0]);
        assert!(tall.check_size().is_err());
    }

    #[test]
    fn test_malformed_detection() {
        let f = BitmapFilter::new(3, 3, vec![1.0; 4]);
        assert!(!f.is_well_formed());
        assert!(!BitmapFilter::new(3, 3, Vec::new()).is_well_formed());
    }

    #[test]
    fn test_parse_names() {
        for kind in BitmapFilterType::ALL {
            assert_eq!(kind.name().parse::<BitmapFilterType>().unwrap(), kind);
        }
        assert_eq!("Edge_Detection".parse::<BitmapFilterType>().unwrap(), BitmapFilterType::EdgeDetection);
        assert!("emboss".parse::<BitmapFilterType>().is_err());
        assert_eq!("clamp".parse::<EdgeMode>().unwrap(), EdgeMode::Clamp);
        assert_eq!(EdgeMode::default().to_string().parse::<EdgeMode>().unwrap(), EdgeMode::FlatIndex);
    }
}
