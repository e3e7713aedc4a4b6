//! Min/max rules applied to numeric values after bitmap arithmetic.

use crate::error::{Result, WorldError};

/// Saturating or wrapping range for numeric post-processing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clamp {
    pub min: f64,
    pub max: f64,
    /// Wrap around modulo the range instead of saturating
    pub wrap: bool,
}

impl Clamp {
    pub const NONE: Clamp = Clamp::new(f64::NEG_INFINITY, f64::INFINITY, false);
    pub const UINT8: Clamp = Clamp::new(0.0, 255.0, true);
    pub const UINT8_NOWRAP: Clamp = Clamp::new(0.0, 255.0, false);
    pub const INT8: Clamp = Clamp::new(-128.0, 127.0, true);
    pub const INT8_NOWRAP: Clamp = Clamp::new(-128.0, 127.0, false);
    pub const RGB: Clamp = Clamp::new(0.0, 16_777_215.0, false);
    pub const RGBA: Clamp = Clamp::new(0.0, 4_294_967_295.0, false);
    pub const POSITIVE: Clamp = Clamp::new(0.0, f64::INFINITY, false);
    pub const POSITIVE_NONZERO: Clamp = Clamp::new(1.0, f64::INFINITY, false);
    pub const UNIT: Clamp = Clamp::new(0.0, 1.0, false);

    pub const fn new(min: f64, max: f64, wrap: bool) -> Self {
        Self { min, max, wrap }
    }

    /// Apply the clamping rules to a value.
    ///
    /// Non-finite input is rejected: it always means an upstream computation
    /// went wrong.
    pub fn apply(&self, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(WorldError::NonFinite(value));
        }

        if self.wrap {
            let range = self.max - self.min;
            // Wrapping needs a finite, non-empty range
            if !range.is_finite() || range <= 0.0 {
                return Err(WorldError::NonFinite(range));
            }
            if value < self.min {
                Ok(self.max - (self.min - value) % range)
            } else {
                Ok(self.min + (value - self.min) % range)
            }
        } else {
            Ok(value.min(self.max).max(self.min))
        }
    }

    /// Rescale a value from its expected `[min, max]` range into this clamp's
    /// range, then apply the clamp.
    pub fn rescale(&self, value: f64, min: f64, max: f64) -> Result<f64> {
        let normalised = (value - min) / (max - min);
        self.apply(normalised * (self.max - self.min) + self.min)
    }
}

impl Default for Clamp {
    fn default() -> Self {
        Clamp::NONE
    }
}
