//! View transform state, initialization, and bounds clamping.
//!
//! The source image is rendered at its natural size centered in the
//! viewport, then scaled by [`Transform::scale`] about its center and
//! shifted by the translation. Because the crop frame is centered in the
//! same viewport, the frame stays covered exactly when the scaled image
//! overhangs the frame on every side, which reduces to a scale floor and a
//! symmetric translation bound per axis.
//!
//! # Example
//!
//! ```
//! use zencrop::{CropConfig, CropFrame, Size, Transform, clamp_transform, init_transform};
//!
//! let config = CropConfig::default();
//! let image = Size::new(2000.0, 1000.0);
//! let frame = CropFrame::new(0.0, 0.0, 400.0, 225.0);
//!
//! let t = init_transform(image, frame, &config);
//! assert!((t.scale - 0.27).abs() < 1e-12);
//!
//! // Dragging far to the right stops where the image edge meets the frame.
//! let dragged = clamp_transform(Transform::new(1.5, 10_000.0, 0.0), image, frame, &config);
//! assert_eq!(dragged.translate_x, (2000.0 * 1.5 - 400.0) / 2.0);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{CropFrame, Size};

/// Scale and translation applied to the centered source image.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Natural size, centered.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub const fn new(scale: f64, translate_x: f64, translate_y: f64) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }

    /// Whether the image under this transform leaves no part of the frame
    /// exposed, allowing `tolerance` display units of float slack per edge.
    pub fn covers_frame(&self, image: Size, frame: CropFrame, tolerance: f64) -> bool {
        let scaled = image.scaled(self.scale);
        let slack_x = (scaled.width - frame.width) / 2.0;
        let slack_y = (scaled.height - frame.height) / 2.0;
        slack_x >= -tolerance
            && slack_y >= -tolerance
            && self.translate_x.abs() <= slack_x + tolerance
            && self.translate_y.abs() <= slack_y + tolerance
    }
}

/// Tunable zoom bounds and initial cover margin.
///
/// ```
/// use zencrop::CropConfig;
///
/// let config = CropConfig::default().max_scale(5.0).overscan(1.0);
/// assert_eq!(config.min_scale, 1.0);
/// assert_eq!(config.max_scale, 5.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CropConfig {
    /// Lower zoom bound.
    pub min_scale: f64,
    /// Upper zoom bound.
    pub max_scale: f64,
    /// Multiplier on the cover scale for the initial transform, leaving
    /// room to pan at the start of a session.
    pub overscan: f64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 3.0,
            overscan: 1.2,
        }
    }
}

impl CropConfig {
    /// Default configuration: zoom in `[1.0, 3.0]`, overscan 1.2.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_scale(mut self, min_scale: f64) -> Self {
        self.min_scale = min_scale;
        self
    }

    pub fn max_scale(mut self, max_scale: f64) -> Self {
        self.max_scale = max_scale;
        self
    }

    pub fn overscan(mut self, overscan: f64) -> Self {
        self.overscan = overscan;
        self
    }

    /// Effective `(lo, hi)` scale range for an image and frame.
    ///
    /// The floor never drops below the cover scale, so a small image is
    /// forced up until it covers the frame even when that exceeds
    /// `min_scale` or `max_scale`.
    pub fn scale_bounds(&self, image: Size, frame: CropFrame) -> (f64, f64) {
        let lo = self.min_scale.max(cover_scale(image, frame));
        let hi = self.max_scale.max(lo);
        (lo, hi)
    }
}

/// Smallest scale at which `image` covers `frame` on both axes.
pub fn cover_scale(image: Size, frame: CropFrame) -> f64 {
    let fill_x = frame.width / image.width;
    let fill_y = frame.height / image.height;
    fill_x.max(fill_y)
}

/// Initial transform for a freshly loaded image, using `config.overscan`.
///
/// The scale is the cover scale times the overscan factor, capped at
/// `max_scale`. Unlike [`clamp_transform`], the floor is the cover scale
/// itself rather than `min_scale`: a large photo starts zoomed out far
/// enough to show the whole frame's worth of context.
pub fn init_transform(image: Size, frame: CropFrame, config: &CropConfig) -> Transform {
    init_transform_with_overscan(image, frame, config, config.overscan)
}

/// [`init_transform`] with an explicit overscan factor.
pub fn init_transform_with_overscan(
    image: Size,
    frame: CropFrame,
    config: &CropConfig,
    overscan: f64,
) -> Transform {
    let cover = cover_scale(image, frame);
    let overscan = if overscan.is_finite() && overscan > 0.0 {
        overscan
    } else {
        1.0
    };
    let hi = config.max_scale.max(cover);
    Transform {
        scale: (cover * overscan).clamp(cover, hi),
        translate_x: 0.0,
        translate_y: 0.0,
    }
}

/// Nearest transform to `candidate` that keeps `frame` fully covered.
///
/// Scale is clamped first; the translation bound is then computed from
/// the clamped scale, so zooming out pulls the image back over the frame.
/// Non-finite components fall back to the scale floor and zero translation.
pub fn clamp_transform(
    candidate: Transform,
    image: Size,
    frame: CropFrame,
    config: &CropConfig,
) -> Transform {
    let (lo, hi) = config.scale_bounds(image, frame);
    let scale = if candidate.scale.is_finite() {
        candidate.scale.clamp(lo, hi)
    } else {
        lo
    };

    let max_tx = ((image.width * scale - frame.width) / 2.0).max(0.0);
    let max_ty = ((image.height * scale - frame.height) / 2.0).max(0.0);

    Transform {
        scale,
        translate_x: clamp_axis(candidate.translate_x, max_tx),
        translate_y: clamp_axis(candidate.translate_y, max_ty),
    }
}

fn clamp_axis(value: f64, bound: f64) -> f64 {
    if value.is_finite() {
        value.clamp(-bound, bound)
    } else {
        0.0
    }
}
