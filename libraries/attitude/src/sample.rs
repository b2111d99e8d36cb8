use nalgebra as na;

use crate::error::{check_finite, AttitudeResult};
use crate::transform::transform;

/// Roll, pitch and yaw of the tracked body, in radians.
///
/// Every component is finite; the constructors reject NaN and infinities so
/// the transform never has to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AttitudeSample {
    roll: f64,
    pitch: f64,
    yaw: f64,
}

impl AttitudeSample {
    /// The level, north-facing attitude
    pub const ZERO: Self = Self {
        roll: 0.0,
        pitch: 0.0,
        yaw: 0.0,
    };

    /// Build a sample from angles already in radians
    pub fn from_radians(roll: f64, pitch: f64, yaw: f64) -> AttitudeResult<Self> {
        Ok(Self {
            roll: check_finite("roll", roll)?,
            pitch: check_finite("pitch", pitch)?,
            yaw: check_finite("yaw", yaw)?,
        })
    }

    /// Build a sample from angles in degrees, as they appear on the wire
    pub fn from_degrees(roll: f64, pitch: f64, yaw: f64) -> AttitudeResult<Self> {
        // Check before converting so the error reports the value the caller gave.
        Self::from_radians(
            check_finite("roll", roll)?.to_radians(),
            check_finite("pitch", pitch)?.to_radians(),
            check_finite("yaw", yaw)?.to_radians(),
        )
    }

    pub fn roll(&self) -> f64 {
        self.roll
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    /// `[roll, pitch, yaw]` in radians
    pub fn radians(&self) -> [f64; 3] {
        [self.roll, self.pitch, self.yaw]
    }

    /// `[roll, pitch, yaw]` in degrees
    pub fn degrees(&self) -> [f64; 3] {
        [self.roll.to_degrees(), self.pitch.to_degrees(), self.yaw.to_degrees()]
    }

    /// Orientation vectors for this attitude
    pub fn frame(&self) -> OrientationFrame {
        let (axis, up) = transform(self.roll, self.pitch, self.yaw);
        OrientationFrame { axis, up }
    }
}

/// Forward axis and up vector of a posed body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationFrame {
    /// Unit vector along the body's forward direction
    pub axis: na::Vector3<f64>,
    /// Unit vector along the body's up direction
    pub up: na::Vector3<f64>,
}

impl OrientationFrame {
    /// Dot product of `axis` and `up`.
    ///
    /// The transform never re-orthogonalizes its output, so this is the only
    /// place rounding between the two vectors becomes visible. It stays at
    /// the level of floating point noise for every finite attitude.
    pub fn skew(&self) -> f64 {
        self.axis.dot(&self.up)
    }
}
