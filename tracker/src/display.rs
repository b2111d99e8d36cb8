//! Numeric readout formatting for the indicator panel.

use attitude::AttitudeSample;
use serde::Deserialize;

/// Unit the readouts are shown in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

/// How the roll, pitch and yaw labels are rendered.
///
/// Values are printed in scientific notation with `precision` digits after
/// the decimal point and a signed exponent of at least two digits, e.g.
/// `2.1817e-01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayFormat {
    pub precision: usize,
    pub unit: AngleUnit,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            precision: 4,
            unit: AngleUnit::Radians,
        }
    }
}

impl DisplayFormat {
    pub fn format_value(&self, value: f64) -> String {
        let rendered = format!("{:.*e}", self.precision, value);
        match rendered.split_once('e') {
            Some((mantissa, exponent)) => match exponent.parse::<i32>() {
                Ok(exp) => {
                    let sign = if exp < 0 { '-' } else { '+' };
                    format!("{}e{}{:02}", mantissa, sign, exp.unsigned_abs())
                }
                Err(_) => rendered,
            },
            // inf and NaN have no exponent
            None => rendered,
        }
    }

    /// Labels for roll, pitch and yaw, in that order
    pub fn readouts(&self, sample: &AttitudeSample) -> [String; 3] {
        let values = match self.unit {
            AngleUnit::Radians => sample.radians(),
            AngleUnit::Degrees => sample.degrees(),
        };
        values.map(|v| self.format_value(v))
    }
}
