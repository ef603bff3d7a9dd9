//! One crop screen from mount to confirmation.
//!
//! [`CropSession`] ties the stages together: it fits the crop frame to the
//! container, waits for the image metadata resolver, forwards gesture
//! events to a [`GestureCoordinator`], and maps the committed transform to
//! a source region on confirm.
//!
//! # Example
//!
//! ```
//! use zencrop::{CropConfig, CropSession, GestureEvent, GestureKind, Size};
//!
//! let mut session = CropSession::new(Size::new(900.0, 1600.0), 16.0 / 9.0, CropConfig::default())?;
//! assert!(!session.can_confirm());
//!
//! // Metadata arrives asynchronously from the caller's image loader.
//! session.set_image_size(Size::new(1000.0, 1000.0))?;
//!
//! session.handle(GestureEvent::Begin(GestureKind::Pinch));
//! session.handle(GestureEvent::PinchUpdate { scale: 1.5 });
//! session.handle(GestureEvent::End(GestureKind::Pinch));
//!
//! let region = session.confirm()?;
//! assert!((region.aspect_ratio() - 16.0 / 9.0).abs() < 0.01);
//! # Ok::<(), zencrop::CropError>(())
//! ```

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::fit::fit_crop_frame;
use crate::geometry::{CropError, CropFrame, PixelRect, Point, Size};
use crate::gesture::{GestureCoordinator, GestureEvent, GestureOutcome, GesturePhase};
use crate::orientation::Orientation;
use crate::region::{CropRegion, map_to_source_region};
use crate::transform::{CropConfig, Transform};

/// Resolved image dimensions as stored, plus EXIF orientation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ImageMetadata {
    /// Dimensions of the pixels as stored (pre-orientation).
    pub stored: Size,
    pub orientation: Orientation,
}

impl ImageMetadata {
    /// Metadata for an image with no orientation tag.
    pub fn upright(size: Size) -> Self {
        Self {
            stored: size,
            orientation: Orientation::IDENTITY,
        }
    }

    /// Upright dimensions the user sees and crops.
    pub fn display_size(&self) -> Size {
        self.orientation.display_size(self.stored)
    }
}

/// State of one crop screen.
#[derive(Clone, Debug)]
pub struct CropSession {
    container: Size,
    aspect_ratio: f64,
    config: CropConfig,
    frame: CropFrame,
    metadata: Option<ImageMetadata>,
    gestures: Option<GestureCoordinator>,
}

impl CropSession {
    /// Fit the crop frame to `container`. The viewport is the container.
    pub fn new(container: Size, aspect_ratio: f64, config: CropConfig) -> Result<Self, CropError> {
        let frame = fit_crop_frame(container, aspect_ratio)?;
        log::debug!("crop session {container:?} @ {aspect_ratio}: frame {frame:?}");
        Ok(Self {
            container,
            aspect_ratio,
            config,
            frame,
            metadata: None,
            gestures: None,
        })
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn frame(&self) -> CropFrame {
        self.frame
    }

    /// Center of the viewport, where the untranslated image is centered.
    pub fn viewport_center(&self) -> Point {
        self.container.center()
    }

    pub fn metadata(&self) -> Option<ImageMetadata> {
        self.metadata
    }

    /// Upright image dimensions, once known.
    pub fn image_size(&self) -> Option<Size> {
        self.metadata.map(|m| m.display_size())
    }

    /// Record metadata for an upright image. See [`Self::set_image_metadata`].
    pub fn set_image_size(&mut self, size: Size) -> Result<Transform, CropError> {
        self.set_image_metadata(ImageMetadata::upright(size))
    }

    /// Record resolved metadata and start at the initial cover transform.
    ///
    /// Replaces any previous image, discarding its gesture state.
    pub fn set_image_metadata(&mut self, metadata: ImageMetadata) -> Result<Transform, CropError> {
        if !metadata.stored.is_valid() {
            return Err(CropError::InvalidImageSize);
        }
        let image = metadata.display_size();
        let gestures = GestureCoordinator::new(image, self.frame, self.config);
        let initial = gestures.committed();
        log::debug!("image {image:?} ({:?}), initial {initial:?}", metadata.orientation);
        self.metadata = Some(metadata);
        self.gestures = Some(gestures);
        Ok(initial)
    }

    /// Forward a gesture event. Ignored until image metadata is known.
    pub fn handle(&mut self, event: GestureEvent) -> GestureOutcome {
        match &mut self.gestures {
            Some(g) => g.handle(event),
            None => {
                log::trace!("gesture before image metadata: {event:?}");
                GestureOutcome::Ignored
            }
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.gestures
            .as_ref()
            .map_or(GesturePhase::Idle, GestureCoordinator::phase)
    }

    /// Transform to render right now, once the image is known.
    pub fn live_transform(&self) -> Option<Transform> {
        self.gestures.as_ref().map(GestureCoordinator::live)
    }

    /// Transform that confirm would use, once the image is known.
    pub fn committed_transform(&self) -> Option<Transform> {
        self.gestures.as_ref().map(GestureCoordinator::committed)
    }

    /// Return to the initial transform.
    pub fn reset(&mut self) {
        if let Some(g) = &mut self.gestures {
            g.reset();
        }
    }

    /// Refit the frame to a new container size.
    ///
    /// Any in-flight gesture is dropped. A session with no committed
    /// gesture restarts at the new initial transform; otherwise the
    /// committed transform is re-clamped against the new frame.
    pub fn resize(&mut self, container: Size) -> Result<(), CropError> {
        let frame = fit_crop_frame(container, self.aspect_ratio)?;
        self.container = container;
        self.frame = frame;
        if let Some(g) = &mut self.gestures {
            g.set_frame(frame);
        }
        log::debug!("resized to {container:?}: frame {frame:?}");
        Ok(())
    }

    /// Whether [`Self::confirm`] would succeed now.
    pub fn can_confirm(&self) -> bool {
        self.gestures.as_ref().is_some_and(GestureCoordinator::is_idle)
    }

    /// The region of the upright image inside the crop frame.
    ///
    /// Uses the committed transform; a gesture still in flight is not
    /// included. Fails with [`CropError::MissingImageMetadata`] until
    /// [`Self::set_image_size`] has succeeded.
    pub fn confirm(&self) -> Result<CropRegion, CropError> {
        let committed = self
            .committed_transform()
            .ok_or(CropError::MissingImageMetadata)?;
        let region =
            map_to_source_region(committed, self.image_size(), self.frame, self.viewport_center())?;
        log::debug!("confirmed {region:?}");
        Ok(region)
    }

    /// [`Self::confirm`] rounded to whole pixels in stored (pre-orientation)
    /// coordinates, for decoders that crop before applying EXIF rotation.
    pub fn confirm_stored_pixels(&self) -> Result<PixelRect, CropError> {
        let region = self.confirm()?;
        let metadata = self.metadata.ok_or(CropError::MissingImageMetadata)?;
        let display = region.to_pixel_rect(metadata.display_size());
        let stored_w = metadata.stored.width.round() as u32;
        let stored_h = metadata.stored.height.round() as u32;
        let (display_w, display_h) = if metadata.orientation.swaps_axes() {
            (stored_h, stored_w)
        } else {
            (stored_w, stored_h)
        };
        if display.is_full(display_w, display_h) {
            return Ok(PixelRect::new(0, 0, stored_w, stored_h));
        }
        Ok(metadata
            .orientation
            .region_to_stored(display, stored_w, stored_h))
    }
}
