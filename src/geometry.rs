//! Geometry primitives shared by every stage of the crop engine.
//!
//! Viewport quantities (container, crop frame, translation) are in display
//! units; image quantities are in source pixels. Both are `f64` so gesture
//! updates accumulate without integer truncation. [`PixelRect`] is the
//! integer form handed to pixel-crop collaborators.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width × height magnitude, used for containers and images alike.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size. Not validated; see [`Size::is_valid`].
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Center point of a rectangle of this size anchored at the origin.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// This size multiplied by `scale` on both axes.
    pub fn scaled(&self, scale: f64) -> Self {
        Self::new(self.width * scale, self.height * scale)
    }
}

/// A position in viewport coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The fixed-aspect rectangle shown to the user as "what will be kept".
///
/// Lives in viewport coordinates, origin at the viewport's top-left.
/// Produced by [`fit_crop_frame`](crate::fit_crop_frame) and immutable
/// until the container is resized.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CropFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropFrame {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Frame dimensions without position.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Center of the frame in viewport coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// Axis-aligned rectangle in whole source pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clamp this rect to fit within `(0, 0, max_w, max_h)`.
    /// Width and height are clamped to at least 1.
    pub fn clamp_to(self, max_w: u32, max_h: u32) -> Self {
        let x = self.x.min(max_w.saturating_sub(1));
        let y = self.y.min(max_h.saturating_sub(1));
        let width = self.width.min(max_w.saturating_sub(x)).max(1);
        let height = self.height.min(max_h.saturating_sub(y)).max(1);
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether this rect covers the whole `source_w × source_h` image.
    pub fn is_full(&self, source_w: u32, source_h: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == source_w && self.height == source_h
    }
}

/// Crop engine error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CropError {
    /// Container width or height is zero, negative, or not finite.
    #[error("container dimensions must be finite and positive")]
    InvalidContainer,
    /// Aspect ratio is zero, negative, or not finite.
    #[error("aspect ratio must be finite and positive")]
    InvalidAspectRatio,
    /// Image metadata reported a zero, negative, or non-finite dimension.
    #[error("image dimensions must be finite and positive")]
    InvalidImageSize,
    /// Image dimensions were never resolved, so no region can be mapped.
    #[error("image metadata has not been resolved")]
    MissingImageMetadata,
}
