//! Pan/pinch gesture coordination.
//!
//! [`GestureCoordinator`] folds an ordered stream of [`GestureEvent`]s into
//! a live transform, clamping on every update, and commits the live value
//! once the last active recognizer ends. Pan and pinch may overlap (a
//! two-finger drag-and-zoom); their updates still arrive one at a time and
//! write the same live transform in arrival order.
//!
//! ```text
//!            Begin(k)                 End(last active)
//!     Idle ───────────► Gesturing ───────────────────► Idle   committed = live
//!                          │  ▲
//!                   Update │  │Begin(other)
//!                          ▼  │
//!                       Gesturing ─────Cancel(any)───► Idle   live = committed
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{CropFrame, Size};
use crate::transform::{CropConfig, Transform, clamp_transform, init_transform};

/// Which recognizer an event belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GestureKind {
    /// One- or two-finger drag.
    Pan,
    /// Two-finger zoom.
    Pinch,
}

/// One event from the platform gesture source.
///
/// Update payloads are cumulative since the matching `Begin`, not
/// incremental since the previous update.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GestureEvent {
    /// A recognizer became active.
    Begin(GestureKind),
    /// Pan translation since the pan began, in display units.
    PanUpdate { dx: f64, dy: f64 },
    /// Pinch scale factor since the pinch began.
    PinchUpdate { scale: f64 },
    /// A recognizer finished cleanly.
    End(GestureKind),
    /// A recognizer was interrupted (incoming call, system gesture, ...).
    Cancel(GestureKind),
}

/// Coordinator lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// No recognizer active; the committed transform is authoritative.
    Idle,
    /// At least one recognizer active.
    Gesturing { pan: bool, pinch: bool },
}

/// What an event did to the coordinator's state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureOutcome {
    /// The event was absorbed without effect.
    Ignored,
    /// A recognizer began or ended while another is still active.
    Tracking,
    /// The live transform was recomputed.
    Updated,
    /// The last recognizer ended and the live transform was committed.
    Committed,
    /// A recognizer was cancelled and the live transform reverted.
    Reverted,
}

/// Owns the live and committed transforms for one crop session.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureCoordinator {
    image: Size,
    frame: CropFrame,
    config: CropConfig,
    initial: Transform,
    committed: Transform,
    live: Transform,
    pan_active: bool,
    pinch_active: bool,
}

impl GestureCoordinator {
    /// Start a session at `init_transform(image, frame, config)`.
    pub fn new(image: Size, frame: CropFrame, config: CropConfig) -> Self {
        let initial = init_transform(image, frame, &config);
        Self::starting_at(image, frame, config, initial)
    }

    /// Start a session at an explicit transform (for restoring a saved
    /// position).
    ///
    /// The transform is clamped against `image` and `frame` first, so a
    /// position saved under another frame or image size still covers the
    /// frame.
    pub fn with_transform(
        image: Size,
        frame: CropFrame,
        config: CropConfig,
        transform: Transform,
    ) -> Self {
        let clamped = clamp_transform(transform, image, frame, &config);
        if clamped != transform {
            log::debug!("restored {transform:?} clamped to {clamped:?}");
        }
        Self::starting_at(image, frame, config, clamped)
    }

    fn starting_at(image: Size, frame: CropFrame, config: CropConfig, transform: Transform) -> Self {
        Self {
            image,
            frame,
            config,
            initial: transform,
            committed: transform,
            live: transform,
            pan_active: false,
            pinch_active: false,
        }
    }

    /// Transform in effect when no gesture is in flight.
    pub fn committed(&self) -> Transform {
        self.committed
    }

    /// Transform to render right now.
    pub fn live(&self) -> Transform {
        self.live
    }

    pub fn image(&self) -> Size {
        self.image
    }

    pub fn frame(&self) -> CropFrame {
        self.frame
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    pub fn phase(&self) -> GesturePhase {
        if self.pan_active || self.pinch_active {
            GesturePhase::Gesturing {
                pan: self.pan_active,
                pinch: self.pinch_active,
            }
        } else {
            GesturePhase::Idle
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase() == GesturePhase::Idle
    }

    /// Process one event. Events must be delivered in arrival order.
    pub fn handle(&mut self, event: GestureEvent) -> GestureOutcome {
        match event {
            GestureEvent::Begin(kind) => self.begin(kind),
            GestureEvent::PanUpdate { dx, dy } => self.pan(dx, dy),
            GestureEvent::PinchUpdate { scale } => self.pinch(scale),
            GestureEvent::End(kind) => self.end(kind),
            GestureEvent::Cancel(kind) => self.cancel(kind),
        }
    }

    /// Process a batch of events in order, returning the last outcome.
    pub fn handle_all<I>(&mut self, events: I) -> GestureOutcome
    where
        I: IntoIterator<Item = GestureEvent>,
    {
        events
            .into_iter()
            .fold(GestureOutcome::Ignored, |_, e| self.handle(e))
    }

    fn begin(&mut self, kind: GestureKind) -> GestureOutcome {
        let slot = self.slot(kind);
        if *slot {
            log::trace!("duplicate begin for {kind:?}");
            return GestureOutcome::Ignored;
        }
        *slot = true;
        log::trace!("{kind:?} began, phase {:?}", self.phase());
        GestureOutcome::Tracking
    }

    fn pan(&mut self, dx: f64, dy: f64) -> GestureOutcome {
        if !self.pan_active {
            log::trace!("pan update without begin");
            return GestureOutcome::Ignored;
        }
        if !(dx.is_finite() && dy.is_finite()) {
            log::trace!("ignoring non-finite pan delta ({dx}, {dy})");
            return GestureOutcome::Ignored;
        }
        let candidate = Transform {
            scale: self.live.scale,
            translate_x: self.committed.translate_x + dx,
            translate_y: self.committed.translate_y + dy,
        };
        self.live = clamp_transform(candidate, self.image, self.frame, &self.config);
        GestureOutcome::Updated
    }

    fn pinch(&mut self, scale: f64) -> GestureOutcome {
        if !self.pinch_active {
            log::trace!("pinch update without begin");
            return GestureOutcome::Ignored;
        }
        if !(scale.is_finite() && scale > 0.0) {
            log::trace!("ignoring degenerate pinch factor {scale}");
            return GestureOutcome::Ignored;
        }
        // clamp_transform bounds translation by the clamped scale, so the
        // current offset is pulled back in as the image shrinks.
        let candidate = Transform {
            scale: self.committed.scale * scale,
            translate_x: self.live.translate_x,
            translate_y: self.live.translate_y,
        };
        self.live = clamp_transform(candidate, self.image, self.frame, &self.config);
        GestureOutcome::Updated
    }

    fn end(&mut self, kind: GestureKind) -> GestureOutcome {
        let slot = self.slot(kind);
        if !*slot {
            log::trace!("end for inactive {kind:?}");
            return GestureOutcome::Ignored;
        }
        *slot = false;
        if !self.is_idle() {
            return GestureOutcome::Tracking;
        }
        self.committed = self.live;
        log::debug!("committed {:?}", self.committed);
        GestureOutcome::Committed
    }

    fn cancel(&mut self, kind: GestureKind) -> GestureOutcome {
        if self.is_idle() {
            log::trace!("cancel for {kind:?} while idle");
            return GestureOutcome::Ignored;
        }
        self.abort();
        log::debug!("{kind:?} cancelled, reverted to {:?}", self.committed);
        GestureOutcome::Reverted
    }

    /// Drop any in-flight gesture and revert the live transform.
    pub fn abort(&mut self) {
        self.pan_active = false;
        self.pinch_active = false;
        self.live = self.committed;
    }

    /// Return to the transform the session started with, committing it.
    /// Any in-flight gesture is dropped.
    pub fn reset(&mut self) {
        self.pan_active = false;
        self.pinch_active = false;
        self.committed = self.initial;
        self.live = self.initial;
        log::debug!("reset to {:?}", self.initial);
    }

    /// Replace the crop frame (after a container resize).
    ///
    /// Drops any in-flight gesture and recomputes the initial transform for
    /// the new frame. A session still at its initial transform moves to the
    /// new one; otherwise the committed transform is re-clamped.
    pub fn set_frame(&mut self, frame: CropFrame) {
        let untouched = self.committed == self.initial;
        self.frame = frame;
        self.initial = init_transform(self.image, frame, &self.config);
        self.committed = if untouched {
            self.initial
        } else {
            clamp_transform(self.committed, self.image, frame, &self.config)
        };
        self.abort();
        log::debug!("frame changed to {frame:?}, committed {:?}", self.committed);
    }

    fn slot(&mut self, kind: GestureKind) -> &mut bool {
        match kind {
            GestureKind::Pan => &mut self.pan_active,
            GestureKind::Pinch => &mut self.pinch_active,
        }
    }
}
