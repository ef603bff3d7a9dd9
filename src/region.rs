//! Mapping the committed view transform back to source-image pixels.

#[cfg(not(feature = "std"))]
use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{CropError, CropFrame, PixelRect, Point, Size};
use crate::transform::Transform;

/// Rectangle in source-image pixel coordinates selected for cropping.
///
/// Always lies within `(0, 0)–(image.width, image.height)` when produced
/// by [`map_to_source_region`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Round to whole pixels for a pixel-crop collaborator.
    ///
    /// Edges are rounded independently, so adjacent regions tile without
    /// gaps. The result is clamped inside the image and is at least 1×1.
    pub fn to_pixel_rect(&self, image: Size) -> PixelRect {
        let max_w = to_u32(image.width.round());
        let max_h = to_u32(image.height.round());
        let left = to_u32(self.x.round());
        let top = to_u32(self.y.round());
        let right = to_u32((self.x + self.width).round());
        let bottom = to_u32((self.y + self.height).round());
        PixelRect::new(
            left,
            top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        )
        .clamp_to(max_w, max_h)
    }

    /// The region as fractions of the image dimensions, each in `0.0..=1.0`.
    pub fn normalized(&self, image: Size) -> Self {
        Self {
            x: self.x / image.width,
            y: self.y / image.height,
            width: self.width / image.width,
            height: self.height / image.height,
        }
    }
}

fn to_u32(v: f64) -> u32 {
    // `as` saturates; NaN becomes 0.
    v as u32
}

/// Compute the source-pixel region visible inside `frame`.
///
/// The image is drawn centered on `viewport_center`, scaled by
/// `committed.scale` about its center, then translated. The frame's
/// offset from the image's on-screen top-left, divided by the scale, is
/// the region origin; the frame size divided by the scale is its extent.
/// A final clamp absorbs float drift so the result always lies inside the
/// image, each side at least one pixel (or the whole side, for images
/// smaller than a pixel).
///
/// `image` is `None` until the metadata resolver reports dimensions; in
/// that case no region is guessed and [`CropError::MissingImageMetadata`]
/// is returned.
///
/// ```
/// use zencrop::{CropFrame, Point, Size, Transform, map_to_source_region};
///
/// let image = Size::new(1000.0, 1000.0);
/// let frame = CropFrame::new(0.0, 400.0, 500.0, 200.0);
/// let center = Point::new(250.0, 500.0);
///
/// let region = map_to_source_region(Transform::IDENTITY, Some(image), frame, center).unwrap();
/// assert_eq!((region.x, region.y), (250.0, 400.0));
/// assert_eq!((region.width, region.height), (500.0, 200.0));
/// ```
pub fn map_to_source_region(
    committed: Transform,
    image: Option<Size>,
    frame: CropFrame,
    viewport_center: Point,
) -> Result<CropRegion, CropError> {
    let image = image.ok_or(CropError::MissingImageMetadata)?;
    if !image.is_valid() {
        return Err(CropError::InvalidImageSize);
    }
    let scale = committed.scale;
    debug_assert!(scale.is_finite() && scale > 0.0, "scale {scale}");

    let scaled = image.scaled(scale);
    let image_screen_x = viewport_center.x - scaled.width / 2.0 + committed.translate_x;
    let image_screen_y = viewport_center.y - scaled.height / 2.0 + committed.translate_y;

    let crop_x = (frame.x - image_screen_x) / scale;
    let crop_y = (frame.y - image_screen_y) / scale;
    let crop_w = frame.width / scale;
    let crop_h = frame.height / scale;

    // At least one pixel, never more than the image.
    let floor_w = crop_w.max(1.0).min(image.width);
    let floor_h = crop_h.max(1.0).min(image.height);
    let x = clamp_origin(crop_x, image.width - floor_w);
    let y = clamp_origin(crop_y, image.height - floor_h);
    let width = floor_w.min(image.width - x);
    let height = floor_h.min(image.height - y);

    Ok(CropRegion {
        x,
        y,
        width,
        height,
    })
}

/// `clamp(v, 0, hi)` that tolerates `hi < 0` (region wider than image).
fn clamp_origin(v: f64, hi: f64) -> f64 {
    v.min(hi).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: Size = Size::new(1000.0, 1000.0);

    #[test]
    fn missing_metadata() {
        let r = map_to_source_region(
            Transform::IDENTITY,
            None,
            CropFrame::new(0.0, 0.0, 10.0, 10.0),
            Point::new(5.0, 5.0),
        );
        assert_eq!(r, Err(CropError::MissingImageMetadata));
    }

    #[test]
    fn invalid_metadata() {
        let r = map_to_source_region(
            Transform::IDENTITY,
            Some(Size::new(0.0, 100.0)),
            CropFrame::new(0.0, 0.0, 10.0, 10.0),
            Point::new(5.0, 5.0),
        );
        assert_eq!(r, Err(CropError::InvalidImageSize));
    }

    #[test]
    fn translation_moves_region_opposite() {
        let frame = CropFrame::new(0.0, 400.0, 500.0, 200.0);
        let center = Point::new(250.0, 500.0);
        // Dragging the image right by 100 display units at 2× reveals
        // content 50 source pixels further left.
        let base = map_to_source_region(Transform::new(2.0, 0.0, 0.0), Some(IMAGE), frame, center)
            .unwrap();
        let moved =
            map_to_source_region(Transform::new(2.0, 100.0, 0.0), Some(IMAGE), frame, center)
                .unwrap();
        assert_eq!(base, CropRegion::new(375.0, 450.0, 250.0, 100.0));
        assert_eq!(moved.x, base.x - 50.0);
        assert_eq!(moved.y, base.y);
        assert_eq!(moved.width, base.width);
    }

    #[test]
    fn drift_is_clamped_into_image() {
        let frame = CropFrame::new(0.0, 0.0, 500.0, 500.0);
        let center = Point::new(250.0, 250.0);
        // Translation beyond the clamp bound (as if accumulated drift).
        let r = map_to_source_region(
            Transform::new(0.5, 0.001, -0.001),
            Some(IMAGE),
            frame,
            center,
        )
        .unwrap();
        assert!(r.x >= 0.0 && r.y >= 0.0);
        assert!(r.x + r.width <= IMAGE.width);
        assert!(r.y + r.height <= IMAGE.height);
    }

    #[test]
    fn region_wider_than_image_is_bounded() {
        let frame = CropFrame::new(0.0, 0.0, 500.0, 500.0);
        let r = map_to_source_region(
            Transform::new(0.25, 0.0, 0.0),
            Some(IMAGE),
            frame,
            Point::new(250.0, 250.0),
        )
        .unwrap();
        assert_eq!(r, CropRegion::new(0.0, 0.0, 1000.0, 1000.0));
    }

    #[test]
    fn minimum_one_pixel() {
        let frame = CropFrame::new(0.0, 0.0, 0.5, 0.5);
        let r = map_to_source_region(
            Transform::new(3.0, 0.0, 0.0),
            Some(IMAGE),
            frame,
            Point::new(0.25, 0.25),
        )
        .unwrap();
        assert_eq!((r.width, r.height), (1.0, 1.0));
    }

    #[test]
    fn one_pixel_floor_stays_inside_image() {
        let frame = CropFrame::new(0.0, 0.0, 0.5, 0.5);
        let center = Point::new(0.25, 0.25);
        // Dragged so far left that the frame sits past the right edge.
        let r = map_to_source_region(Transform::new(3.0, -1e6, -1e6), Some(IMAGE), frame, center)
            .unwrap();
        assert_eq!(r, CropRegion::new(999.0, 999.0, 1.0, 1.0));

        let tiny = Size::new(0.5, 0.5);
        let r = map_to_source_region(Transform::new(3.0, 0.0, 0.0), Some(tiny), frame, center)
            .unwrap();
        assert_eq!(r, CropRegion::new(0.0, 0.0, 0.5, 0.5));
    }

    #[test]
    fn confirm_is_bit_identical() {
        let frame = CropFrame::new(0.0, 123.4, 375.0, 210.9375);
        let center = Point::new(187.5, 400.0);
        let t = Transform::new(1.37, -41.3, 17.9);
        let a = map_to_source_region(t, Some(IMAGE), frame, center).unwrap();
        let b = map_to_source_region(t, Some(IMAGE), frame, center).unwrap();
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
        assert_eq!(a.width.to_bits(), b.width.to_bits());
        assert_eq!(a.height.to_bits(), b.height.to_bits());
    }

    #[test]
    fn pixel_rect_rounds_edges() {
        let r = CropRegion::new(83.333, 265.625, 833.333, 468.75);
        assert_eq!(r.to_pixel_rect(IMAGE), PixelRect::new(83, 266, 834, 468));
    }

    #[test]
    fn pixel_rect_stays_inside() {
        let r = CropRegion::new(999.7, -3.0, 5.0, 2000.0);
        let p = r.to_pixel_rect(IMAGE);
        assert_eq!(p, PixelRect::new(999, 0, 1, 1000));
    }

    #[test]
    fn normalized_fractions() {
        let r = CropRegion::new(250.0, 500.0, 500.0, 250.0).normalized(IMAGE);
        assert_eq!(r, CropRegion::new(0.25, 0.5, 0.5, 0.25));
    }
}
