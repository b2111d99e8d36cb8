//! Indicator panel geometry: roll and pitch bars, compass needle and rose.
use core::f64::consts::FRAC_PI_4;

use nalgebra as na;

use crate::sample::AttitudeSample;

/// Radius of the roll, pitch and compass glyphs
pub const DEFAULT_INDICATOR_RADIUS: f64 = 0.1;

/// Labelled reference axes drawn at the origin of the pose scene
pub const REFERENCE_AXES: [(&str, [f64; 3]); 3] = [
    ("Xref", [1.0, 0.0, 0.0]),
    ("Yref", [0.0, -1.0, 0.0]),
    ("Zref", [0.0, 0.0, -1.0]),
];

/// Two opposing in-plane points at radius `radius`, rotated by `angle`.
///
/// Used for the roll and pitch bars: the second point is the exact negation
/// of the first.
pub fn opposing_pair(angle: f64, radius: f64) -> (na::Vector3<f64>, na::Vector3<f64>) {
    let (sin, cos) = angle.sin_cos();
    let tip = na::Vector3::new(radius * cos, radius * sin, 0.0);
    (tip, -tip)
}

/// Compass needle tip for `yaw`: north is +Y, east is +X
pub fn compass_needle(yaw: f64, radius: f64) -> na::Vector3<f64> {
    let (sin, cos) = yaw.sin_cos();
    na::Vector3::new(radius * sin, radius * cos, 0.0)
}

/// Glyph positions for one sample, relative to each glyph's centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorReadout {
    pub roll: (na::Vector3<f64>, na::Vector3<f64>),
    pub pitch: (na::Vector3<f64>, na::Vector3<f64>),
    pub compass: na::Vector3<f64>,
}

impl IndicatorReadout {
    pub fn new(sample: &AttitudeSample, radius: f64) -> Self {
        Self {
            roll: opposing_pair(sample.roll(), radius),
            pitch: opposing_pair(sample.pitch(), radius),
            compass: compass_needle(sample.yaw(), radius),
        }
    }
}

/// A compass rose direction label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoseMarker {
    pub text: &'static str,
    pub position: na::Vector3<f64>,
    /// Cardinal points are drawn larger than intercardinal ones
    pub cardinal: bool,
}

/// The eight direction labels around a compass of radius `radius`
pub fn compass_rose(radius: f64) -> [RoseMarker; 8] {
    let cardinal = |text, x: f64, y: f64| RoseMarker {
        text,
        position: na::Vector3::new(radius * x, radius * y, 0.0),
        cardinal: true,
    };
    let intercardinal = |text, octant: f64| {
        let (sin, cos) = (octant * FRAC_PI_4).sin_cos();
        RoseMarker {
            text,
            position: na::Vector3::new(radius * cos, radius * sin, 0.0),
            cardinal: false,
        }
    };

    [
        cardinal("N", 0.0, 1.0),
        cardinal("S", 0.0, -1.0),
        cardinal("W", -1.0, 0.0),
        cardinal("E", 1.0, 0.0),
        intercardinal("NE", 1.0),
        intercardinal("NW", 3.0),
        intercardinal("SW", 5.0),
        intercardinal("SE", 7.0),
    ]
}
