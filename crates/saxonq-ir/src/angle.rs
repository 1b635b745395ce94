//! Rotation angles.
//!
//! An [`Angle`] remembers whether it was written as a multiple of π, so
//! printing and re-reading one is exact: `pi/4` prints as `pi/4` rather than
//! as a truncated decimal.

use crate::error::AngleError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// A gate parameter in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Angle {
    /// A plain value in radians.
    Radians(f64),
    /// `ratio · π` radians.
    PiMultiple(f64),
}

impl Angle {
    /// Zero radians.
    pub const ZERO: Angle = Angle::Radians(0.0);

    /// Exactly π.
    pub const PI: Angle = Angle::PiMultiple(1.0);

    /// Create an angle from radians.
    pub const fn radians(value: f64) -> Self {
        Angle::Radians(value)
    }

    /// Create `ratio · π`.
    pub const fn pi_multiple(ratio: f64) -> Self {
        Angle::PiMultiple(ratio)
    }

    /// Create `π / 2^k`, the rotation used by Fourier-transform layers.
    pub fn pi_over_power_of_two(k: u32) -> Self {
        Angle::PiMultiple(0.5f64.powi(i32::try_from(k).unwrap_or(i32::MAX)))
    }

    /// Value in radians.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Angle::Radians(v) => v,
            Angle::PiMultiple(r) => r * PI,
        }
    }

    /// The π ratio, if this angle was written as a multiple of π.
    pub fn pi_ratio(&self) -> Option<f64> {
        match *self {
            Angle::Radians(_) => None,
            Angle::PiMultiple(r) => Some(r),
        }
    }

    /// Whether the value is neither NaN nor infinite.
    pub fn is_finite(&self) -> bool {
        match *self {
            Angle::Radians(v) | Angle::PiMultiple(v) => v.is_finite(),
        }
    }

    /// Same angle with opposite sign.
    #[must_use]
    pub fn neg(self) -> Self {
        match self {
            Angle::Radians(v) => Angle::Radians(-v),
            Angle::PiMultiple(r) => Angle::PiMultiple(-r),
        }
    }

    /// Render with the `π` glyph, for human-facing explanations.
    pub fn symbolic(&self) -> String {
        match *self {
            Angle::Radians(v) => format_number(v),
            Angle::PiMultiple(r) => format_pi_multiple(r, "π"),
        }
    }
}

impl From<f64> for Angle {
    fn from(value: f64) -> Self {
        Angle::Radians(value)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Angle::Radians(v) => f.write_str(&format_number(v)),
            Angle::PiMultiple(r) => f.write_str(&format_pi_multiple(r, "pi")),
        }
    }
}

fn format_pi_multiple(ratio: f64, pi: &str) -> String {
    if ratio == 1.0 {
        return pi.to_string();
    }
    if ratio == -1.0 {
        return format!("-{pi}");
    }
    if ratio != 0.0 && ratio.is_finite() {
        let denominator = 1.0 / ratio;
        if denominator.fract() == 0.0 && denominator.abs() < 1e15 && 1.0 / denominator == ratio {
            let sign = if ratio < 0.0 { "-" } else { "" };
            return format!("{sign}{pi}/{}", denominator.abs());
        }
    }
    format!("{}*{pi}", format_number(ratio))
}

/// Shortest round-trip form; exponent notation outside `[1e-5, 1e15)` so
/// no magnitude prints as an over-long integer literal.
fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if value != 0.0 && value.is_finite() && !(1e-5..1e15).contains(&magnitude) {
        format!("{value:e}")
    } else {
        format!("{value}")
    }
}

impl FromStr for Angle {
    type Err = AngleError;

    /// Parse a product or quotient of numeric factors with at most one π.
    ///
    /// Accepted: `0.5`, `-1e-3`, `pi`, `π`, `-pi/4`, `3*pi/4`, `0.25pi`,
    /// `2/3*pi`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AngleError::Empty);
        }
        let malformed = || AngleError::Malformed(trimmed.to_string());

        let (negative, mut rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed).trim_start()),
        };

        let mut coefficient = 1.0f64;
        let mut has_pi = false;
        let mut dividing = false;

        loop {
            let (factor, remainder) = next_factor(rest).ok_or_else(malformed)?;
            match factor {
                Factor::Pi => {
                    if dividing {
                        return Err(AngleError::PiDenominator(trimmed.to_string()));
                    }
                    if has_pi {
                        return Err(AngleError::MultiplePi(trimmed.to_string()));
                    }
                    has_pi = true;
                }
                Factor::Number(value) if dividing => {
                    if value == 0.0 {
                        return Err(AngleError::DivisionByZero(trimmed.to_string()));
                    }
                    coefficient /= value;
                }
                Factor::Number(value) => coefficient *= value,
            }

            rest = remainder.trim_start();
            if rest.is_empty() {
                break;
            }
            if let Some(after) = rest.strip_prefix('*') {
                dividing = false;
                rest = after.trim_start();
            } else if let Some(after) = rest.strip_prefix('/') {
                dividing = true;
                rest = after.trim_start();
            } else if starts_with_pi(rest) {
                // `0.25pi`: implicit multiplication.
                dividing = false;
            } else {
                return Err(malformed());
            }
        }

        let value = if negative { -coefficient } else { coefficient };
        if !value.is_finite() {
            return Err(AngleError::NonFinite);
        }
        Ok(if has_pi {
            Angle::PiMultiple(value)
        } else {
            Angle::Radians(value)
        })
    }
}

enum Factor {
    Number(f64),
    Pi,
}

fn starts_with_pi(text: &str) -> bool {
    text.starts_with('π') || text.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("pi"))
}

fn next_factor(text: &str) -> Option<(Factor, &str)> {
    if let Some(rest) = text.strip_prefix('π') {
        return Some((Factor::Pi, rest));
    }
    if starts_with_pi(text) {
        return Some((Factor::Pi, &text[2..]));
    }

    let bytes = text.as_bytes();
    let mut end = 0;
    while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
        end += 1;
    }
    if end == 0 {
        return None;
    }
    // Optional exponent, only when followed by digits.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    let value: f64 = text[..end].parse().ok()?;
    Some((Factor::Number(value), &text[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Angle {
        text.parse().unwrap()
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse("0.5"), Angle::Radians(0.5));
        assert_eq!(parse("-1.2e-3"), Angle::Radians(-1.2e-3));
        assert_eq!(parse("+2"), Angle::Radians(2.0));
        assert_eq!(parse("2/4"), Angle::Radians(0.5));
    }

    #[test]
    fn test_pi_forms() {
        assert_eq!(parse("pi"), Angle::PI);
        assert_eq!(parse("π"), Angle::PI);
        assert_eq!(parse("PI"), Angle::PI);
        assert_eq!(parse("-pi/4"), Angle::PiMultiple(-0.25));
        assert_eq!(parse("3*pi/4"), Angle::PiMultiple(0.75));
        assert_eq!(parse("pi*0.25"), Angle::PiMultiple(0.25));
        assert_eq!(parse("0.25pi"), Angle::PiMultiple(0.25));
        assert_eq!(parse(" 2 / 4 * π "), Angle::PiMultiple(0.5));
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!("".parse::<Angle>(), Err(AngleError::Empty));
        assert!(matches!("abc".parse::<Angle>(), Err(AngleError::Malformed(_))));
        assert!(matches!("pi*".parse::<Angle>(), Err(AngleError::Malformed(_))));
        assert!(matches!("pi*pi".parse::<Angle>(), Err(AngleError::MultiplePi(_))));
        assert!(matches!("1/pi".parse::<Angle>(), Err(AngleError::PiDenominator(_))));
        assert!(matches!("pi/0".parse::<Angle>(), Err(AngleError::DivisionByZero(_))));
        assert!(matches!("1e999".parse::<Angle>(), Err(AngleError::NonFinite)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Angle::PI.to_string(), "pi");
        assert_eq!(Angle::PiMultiple(-1.0).to_string(), "-pi");
        assert_eq!(Angle::PiMultiple(0.25).to_string(), "pi/4");
        assert_eq!(Angle::PiMultiple(-0.5).to_string(), "-pi/2");
        assert_eq!(Angle::PiMultiple(0.75).to_string(), "0.75*pi");
        assert_eq!(Angle::PiMultiple(0.0).to_string(), "0*pi");
        assert_eq!(Angle::Radians(1.0).to_string(), "1");
        assert_eq!(Angle::Radians(1e20).to_string(), "1e20");
        assert_eq!(Angle::Radians(-1.5e-7).to_string(), "-1.5e-7");
        assert_eq!(Angle::PiMultiple(1e20).to_string(), "1e20*pi");
        assert_eq!(Angle::PiMultiple(0.5).symbolic(), "π/2");
    }

    #[test]
    fn test_display_reparses_exactly() {
        for angle in [
            Angle::PiMultiple(1.0 / 3.0),
            Angle::PiMultiple(-2.0 / 3.0),
            Angle::pi_over_power_of_two(7),
            Angle::PiMultiple(0.0),
            Angle::Radians(0.123_456_789),
            Angle::Radians(-3.0),
            Angle::Radians(1e20),
            Angle::Radians(-2.5e-9),
            Angle::Radians(f64::MAX),
            Angle::Radians(f64::MIN_POSITIVE),
            Angle::PiMultiple(1e20),
        ] {
            assert_eq!(angle.to_string().parse::<Angle>().unwrap(), angle);
        }
    }

    #[test]
    fn test_as_f64() {
        assert!((parse("pi/2").as_f64() - PI / 2.0).abs() < 1e-12);
        assert_eq!(Angle::pi_over_power_of_two(3), Angle::PiMultiple(0.125));
    }
}
