//! # Attitude - roll/pitch/yaw to scene geometry
//!
//! Turns an attitude sample (roll, pitch, yaw in radians) into the vectors a
//! renderer needs to pose a 3D model, and into the simple in-plane glyph
//! positions of a roll/pitch/compass indicator panel.
//!
//! ## Features
//!
//! - Fixed right-handed rotation convention producing a forward axis and an up vector
//! - Roll/pitch bar and compass needle projections at a fixed radius
//! - Static compass rose and reference axis geometry
//!
//! ## Platform Support
//!
//! - **desktop**: enables `nalgebra/std` (on by default)

pub mod error;
pub mod indicator;
pub mod sample;
pub mod transform;

pub use error::{AttitudeError, AttitudeResult};
pub use indicator::{
    compass_needle, compass_rose, opposing_pair, IndicatorReadout, RoseMarker, REFERENCE_AXES,
    DEFAULT_INDICATOR_RADIUS,
};
pub use sample::{AttitudeSample, OrientationFrame};
pub use transform::transform;

pub use nalgebra::Vector3;
