//! Crop-frame fitting: the largest rectangle of a given aspect ratio that
//! fits inside the container ("contain" fit), centered.

use crate::geometry::{CropError, CropFrame, Size};

/// Compute the crop frame for a container and target aspect ratio.
///
/// Starts width-bound (`width = container.width`) and falls back to
/// height-bound when the derived height would overflow. Exactly one axis
/// touches the container edge-to-edge; the other is centered.
///
/// ```
/// use zencrop::{Size, fit_crop_frame};
///
/// let frame = fit_crop_frame(Size::new(375.0, 800.0), 16.0 / 9.0).unwrap();
/// assert_eq!(frame.width, 375.0);
/// assert_eq!(frame.x, 0.0);
/// assert!((frame.height - 210.9375).abs() < 1e-9);
/// ```
pub fn fit_crop_frame(container: Size, aspect_ratio: f64) -> Result<CropFrame, CropError> {
    if !container.is_valid() {
        return Err(CropError::InvalidContainer);
    }
    if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
        return Err(CropError::InvalidAspectRatio);
    }

    let mut width = container.width;
    let mut height = width / aspect_ratio;
    if height > container.height {
        height = container.height;
        width = height * aspect_ratio;
    }
    // Guard the non-binding axis against rounding past the edge.
    let width = width.min(container.width);
    let height = height.min(container.height);

    Ok(CropFrame {
        x: (container.width - width) / 2.0,
        y: (container.height - height) / 2.0,
        width,
        height,
    })
}
