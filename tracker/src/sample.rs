use attitude::AttitudeSample;

use crate::error::MalformedSample;

/// Longest line accepted, in bytes, terminator excluded
pub const MAX_LINE_LEN: usize = 256;

/// What a single raw line turned out to hold
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedLine {
    /// Empty or whitespace only
    Idle,
    Sample(AttitudeSample),
}

/// Parse `roll,pitch,yaw` in degrees.
///
/// Blank lines are not an error. Anything else must be exactly three comma
/// separated finite numbers; whitespace around each number is ignored.
pub fn parse_line(line: &str) -> Result<ParsedLine, MalformedSample> {
    if line.trim().is_empty() {
        return Ok(ParsedLine::Idle);
    }
    let raw = line.trim_end_matches(['\r', '\n']);
    if raw.len() > MAX_LINE_LEN {
        return Err(MalformedSample::TooLong {
            line: raw.to_string(),
            length: raw.len(),
            max: MAX_LINE_LEN,
        });
    }

    let tokens: Vec<&str> = raw.split(',').collect();
    if tokens.len() != 3 {
        return Err(MalformedSample::FieldCount {
            line: raw.to_string(),
            found: tokens.len(),
        });
    }

    let mut degrees = [0.0; 3];
    for (value, token) in degrees.iter_mut().zip(&tokens) {
        *value = token
            .trim()
            .parse::<f64>()
            .map_err(|_| MalformedSample::InvalidNumber {
                line: raw.to_string(),
                token: token.trim().to_string(),
            })?;
    }

    let [roll, pitch, yaw] = degrees;
    AttitudeSample::from_degrees(roll, pitch, yaw)
        .map(ParsedLine::Sample)
        .map_err(|source| MalformedSample::NonFinite {
            line: raw.to_string(),
            source,
        })
}
