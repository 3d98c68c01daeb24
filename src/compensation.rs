//! Self-illumination compensation.
//!
//! The sensor sits next to the lamp it controls. Once the lamp is on, the
//! sensor sees the lamp's light too, and without correction the reading
//! would cross the threshold and switch the lamp straight back off.
//! The lamp's own contribution is measured right after switch-on and added
//! to the threshold for as long as the lamp stays on.

use crate::ambient::Intensity;

/// Signed intensity delta caused by the lamp.
pub type Offset = i32;

/// Contribution of the lamp, measured `before` and `after` switching it on.
///
/// No sign is assumed, it depends on how the sensor is wired and mounted.
pub fn compute_offset(before: Intensity, after: Intensity) -> Offset {
    Offset::from(after) - Offset::from(before)
}

/// Threshold shifted by the held offset, the reading must stay below it.
pub fn effective_threshold(threshold: Intensity, offset: Offset) -> Offset {
    Offset::from(threshold) + offset
}

/// Holds the offset for the current on-period.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Compensator {
    offset: Offset,
}

impl Compensator {
    pub const fn new() -> Self {
        Self { offset: 0 }
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Measure and hold the lamp's contribution.
    pub fn calibrate(&mut self, before: Intensity, after: Intensity) -> Offset {
        self.offset = compute_offset(before, after);
        self.offset
    }

    /// Forget the lamp's contribution, it is off now.
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}
