//! EXIF orientation for photos whose stored pixels are not upright.
//!
//! Cameras commonly store sensor-order pixels and record the intended
//! display orientation in EXIF. The crop UI works in display space; a
//! decoder that crops before auto-orienting needs the region in stored
//! space. [`Orientation`] converts between the two.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{PixelRect, Size};

/// Image orientation as an element of the D4 dihedral group.
///
/// A clockwise rotation in 90° steps, optionally followed by a horizontal
/// flip. All 8 EXIF orientations map onto this.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Orientation {
    /// Quarter turns clockwise, 0-3.
    pub rotation: u8,
    /// Horizontal flip after rotation.
    pub flip: bool,
}

impl Orientation {
    /// EXIF 1.
    pub const IDENTITY: Self = Self::new(0, false);
    /// EXIF 2.
    pub const FLIP_H: Self = Self::new(0, true);
    /// EXIF 3.
    pub const ROTATE_180: Self = Self::new(2, false);
    /// EXIF 4.
    pub const FLIP_V: Self = Self::new(2, true);
    /// EXIF 5.
    pub const TRANSPOSE: Self = Self::new(1, true);
    /// EXIF 6, the usual portrait phone photo.
    pub const ROTATE_90: Self = Self::new(1, false);
    /// EXIF 7.
    pub const TRANSVERSE: Self = Self::new(3, true);
    /// EXIF 8.
    pub const ROTATE_270: Self = Self::new(3, false);

    const BY_EXIF: [Self; 8] = [
        Self::IDENTITY,
        Self::FLIP_H,
        Self::ROTATE_180,
        Self::FLIP_V,
        Self::TRANSPOSE,
        Self::ROTATE_90,
        Self::TRANSVERSE,
        Self::ROTATE_270,
    ];

    const fn new(rotation: u8, flip: bool) -> Self {
        Self { rotation, flip }
    }

    /// Orientation for an EXIF tag value (1-8). `None` for anything else.
    pub fn from_exif(value: u8) -> Option<Self> {
        Self::BY_EXIF.get(usize::from(value).checked_sub(1)?).copied()
    }

    pub fn is_identity(self) -> bool {
        self.rotation & 3 == 0 && !self.flip
    }

    /// Whether display width corresponds to stored height.
    pub fn swaps_axes(self) -> bool {
        self.rotation & 1 == 1
    }

    /// Size of the upright image given its stored dimensions.
    pub fn display_size(self, stored: Size) -> Size {
        if self.swaps_axes() {
            Size::new(stored.height, stored.width)
        } else {
            stored
        }
    }

    /// Map a rect in display (upright) coordinates to stored coordinates.
    ///
    /// `stored_w × stored_h` are the dimensions of the pixels as stored,
    /// before orientation. `rect` must lie within the display image.
    pub fn region_to_stored(self, rect: PixelRect, stored_w: u32, stored_h: u32) -> PixelRect {
        let PixelRect {
            x,
            y,
            width: w,
            height: h,
        } = rect;
        // Far edges, measured from the opposite side of the stored image.
        let from_right = |span: u32, pos: u32, len: u32| span.saturating_sub(pos + len);
        match (self.rotation & 3, self.flip) {
            (0, false) => rect,
            (0, true) => PixelRect::new(from_right(stored_w, x, w), y, w, h),
            (1, false) => PixelRect::new(y, from_right(stored_h, x, w), h, w),
            (1, true) => PixelRect::new(y, x, h, w),
            (2, false) => PixelRect::new(from_right(stored_w, x, w), from_right(stored_h, y, h), w, h),
            (2, true) => PixelRect::new(x, from_right(stored_h, y, h), w, h),
            (3, false) => PixelRect::new(from_right(stored_w, y, h), x, h, w),
            _ => PixelRect::new(from_right(stored_w, y, h), from_right(stored_h, x, w), h, w),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exif_lookup() {
        assert_eq!(Orientation::from_exif(1), Some(Orientation::IDENTITY));
        assert_eq!(Orientation::from_exif(6), Some(Orientation::ROTATE_90));
        assert_eq!(Orientation::from_exif(8), Some(Orientation::ROTATE_270));
        assert_eq!(Orientation::from_exif(0), None);
        assert_eq!(Orientation::from_exif(9), None);
        assert!(Orientation::from_exif(1).unwrap().is_identity());
        assert!(!Orientation::FLIP_H.is_identity());
    }

    #[test]
    fn display_size_swaps_for_quarter_turns() {
        let stored = Size::new(4032.0, 3024.0);
        assert_eq!(Orientation::ROTATE_90.display_size(stored), Size::new(3024.0, 4032.0));
        assert_eq!(Orientation::TRANSVERSE.display_size(stored), Size::new(3024.0, 4032.0));
        assert_eq!(Orientation::ROTATE_180.display_size(stored), stored);
        assert_eq!(Orientation::FLIP_H.display_size(stored), stored);
    }

    #[test]
    fn rotate_90_top_left_is_stored_bottom_left() {
        // Stored 4×3 landscape displayed as 3×4 portrait. The display's
        // top-left pixel came from the stored bottom-left corner.
        let r = Orientation::ROTATE_90.region_to_stored(PixelRect::new(0, 0, 1, 1), 4, 3);
        assert_eq!(r, PixelRect::new(0, 2, 1, 1));
    }

    #[test]
    fn full_display_maps_to_full_stored() {
        for v in 1..=8u8 {
            let o = Orientation::from_exif(v).unwrap();
            let d = o.display_size(Size::new(40.0, 30.0));
            let full = PixelRect::new(0, 0, d.width as u32, d.height as u32);
            assert!(
                o.region_to_stored(full, 40, 30).is_full(40, 30),
                "EXIF {v}"
            );
        }
    }

    #[test]
    fn brute_force_pixels_are_a_bijection() {
        let (sw, sh) = (4u32, 3u32);
        for v in 1..=8u8 {
            let o = Orientation::from_exif(v).unwrap();
            let d = o.display_size(Size::new(sw as f64, sh as f64));
            let mut seen = [[false; 4]; 3];
            for dy in 0..d.height as u32 {
                for dx in 0..d.width as u32 {
                    let r = o.region_to_stored(PixelRect::new(dx, dy, 1, 1), sw, sh);
                    assert_eq!((r.width, r.height), (1, 1), "EXIF {v}");
                    assert!(r.x < sw && r.y < sh, "EXIF {v}: {r:?}");
                    let cell = &mut seen[r.y as usize][r.x as usize];
                    assert!(!*cell, "EXIF {v}: ({dx},{dy}) collides at {r:?}");
                    *cell = true;
                }
            }
        }
    }

    #[test]
    fn multi_pixel_rect_is_bounding_box_of_pixels() {
        let (sw, sh) = (7u32, 5u32);
        let rect = PixelRect::new(1, 2, 3, 2);
        for v in 1..=8u8 {
            let o = Orientation::from_exif(v).unwrap();
            let whole = o.region_to_stored(rect, sw, sh);
            let (mut x0, mut y0, mut x1, mut y1) = (u32::MAX, u32::MAX, 0, 0);
            for dy in rect.y..rect.y + rect.height {
                for dx in rect.x..rect.x + rect.width {
                    let p = o.region_to_stored(PixelRect::new(dx, dy, 1, 1), sw, sh);
                    x0 = x0.min(p.x);
                    y0 = y0.min(p.y);
                    x1 = x1.max(p.x + 1);
                    y1 = y1.max(p.y + 1);
                }
            }
            assert_eq!(whole, PixelRect::new(x0, y0, x1 - x0, y1 - y0), "EXIF {v}");
        }
    }
}
