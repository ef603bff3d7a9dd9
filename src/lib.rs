//! Interactive crop transform engine: crop-frame fitting, pan/pinch
//! clamping, and mapping the visible frame back to source-image pixels.
//!
//! Pure geometry: no pixel operations, no I/O, `no_std` compatible.
//!
//! # Modules
//!
//! - [`fit`] — Largest fixed-aspect crop frame inside a container
//! - [`transform`] — View transform, initial cover transform, bounds clamping
//! - [`gesture`] — Pan/pinch event coordination with commit and cancel
//! - [`region`] — Committed transform to source-pixel crop region
//! - [`session`] — One crop screen from mount to confirmation
//! - [`orientation`] — EXIF orientation, display-to-stored region mapping
//! - `svg` — SVG rendering of a session (feature `svg`)
//!
//! # Example
//!
//! ```
//! use zencrop::{CropConfig, Size, fit_crop_frame, init_transform, map_to_source_region};
//!
//! let container = Size::new(900.0, 1600.0);
//! let image = Size::new(1000.0, 1000.0);
//! let config = CropConfig::default();
//!
//! let frame = fit_crop_frame(container, 16.0 / 9.0).unwrap();
//! let transform = init_transform(image, frame, &config);
//! let region = map_to_source_region(transform, Some(image), frame, container.center()).unwrap();
//!
//! // Untouched, the region is centered on the image.
//! assert!((region.x + region.width / 2.0 - 500.0).abs() < 1e-9);
//! assert!((region.y + region.height / 2.0 - 500.0).abs() < 1e-9);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod fit;
pub mod geometry;
pub mod gesture;
pub mod orientation;
pub mod region;
pub mod session;
#[cfg(feature = "svg")]
pub mod svg;
pub mod transform;

pub use fit::fit_crop_frame;
pub use geometry::{CropError, CropFrame, PixelRect, Point, Size};
pub use gesture::{GestureCoordinator, GestureEvent, GestureKind, GestureOutcome, GesturePhase};
pub use orientation::Orientation;
pub use region::{CropRegion, map_to_source_region};
pub use session::{CropSession, ImageMetadata};
pub use transform::{
    CropConfig, Transform, clamp_transform, cover_scale, init_transform,
    init_transform_with_overscan,
};
