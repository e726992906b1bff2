//! Dimension units and their conversions to a canonical unit per category.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! Only absolute units convert. Relative lengths (`em`, `rem`, `vw`, ...)
//! depend on context the stylesheet alone does not carry, so they keep their
//! own unit.

use strum_macros::Display;

/// [§ 6.2 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
///
/// "1in = 2.54cm = 96px"
pub const PX_PER_IN: f64 = 96.0;
/// "1cm = 96px/2.54"
pub const PX_PER_CM: f64 = PX_PER_IN / 2.54;
/// "1mm = 1/10th of 1cm"
pub const PX_PER_MM: f64 = PX_PER_CM / 10.0;
/// "1Q = 1/40th of 1cm"
pub const PX_PER_Q: f64 = PX_PER_CM / 40.0;
/// "1pt = 1/72nd of 1in"
pub const PX_PER_PT: f64 = PX_PER_IN / 72.0;
/// "1pc = 1/6th of 1in"
pub const PX_PER_PC: f64 = PX_PER_IN / 6.0;

/// [§ 7.1 Angle Units](https://www.w3.org/TR/css-values-4/#angles)
///
/// "There are 400 gradians in a full circle."
pub const DEG_PER_GRAD: f64 = 0.9;
/// "There are 2π radians in a full circle."
pub const DEG_PER_RAD: f64 = 180.0 / std::f64::consts::PI;
/// "There is 1 turn in a full circle."
pub const DEG_PER_TURN: f64 = 360.0;

/// [§ 7.2 Duration Units](https://www.w3.org/TR/css-values-4/#time)
pub const MS_PER_S: f64 = 1000.0;

/// [§ 7.3 Frequency Units](https://www.w3.org/TR/css-values-4/#frequency)
pub const HZ_PER_KHZ: f64 = 1000.0;

/// [§ 7.4 Resolution Units](https://www.w3.org/TR/css-values-4/#resolution)
///
/// "1dppx is equivalent to 96dpi"
pub const DPI_PER_DPPX: f64 = 96.0;
/// "1dpcm ≈ 2.54dpi"
pub const DPCM_PER_DPPX: f64 = DPI_PER_DPPX / 2.54;

/// The dimension category a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum UnitCategory {
    /// [§ 6 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
    Length,
    /// [§ 7.1 Angle Units](https://www.w3.org/TR/css-values-4/#angles)
    Angle,
    /// [§ 7.2 Duration Units](https://www.w3.org/TR/css-values-4/#time)
    Time,
    /// [§ 7.3 Frequency Units](https://www.w3.org/TR/css-values-4/#frequency)
    Frequency,
    /// [§ 7.4 Resolution Units](https://www.w3.org/TR/css-values-4/#resolution)
    Resolution,
}

/// Relative length units, which keep their unit through normalization.
const RELATIVE_LENGTH_UNITS: &[&str] = &[
    "em", "rem", "ex", "rex", "cap", "rcap", "ch", "rch", "ic", "ric", "lh", "rlh", "vw", "vh",
    "vi", "vb", "vmin", "vmax", "svw", "svh", "lvw", "lvh", "dvw", "dvh", "cqw", "cqh", "cqi",
    "cqb", "cqmin", "cqmax",
];

/// Classify a unit (ASCII case-insensitive). Unknown units return `None`.
#[must_use]
pub fn unit_category(unit: &str) -> Option<UnitCategory> {
    let unit = unit.to_ascii_lowercase();
    match unit.as_str() {
        "px" | "in" | "cm" | "mm" | "q" | "pt" | "pc" => Some(UnitCategory::Length),
        u if RELATIVE_LENGTH_UNITS.contains(&u) => Some(UnitCategory::Length),
        "deg" | "grad" | "rad" | "turn" => Some(UnitCategory::Angle),
        "s" | "ms" => Some(UnitCategory::Time),
        "hz" | "khz" => Some(UnitCategory::Frequency),
        "dpi" | "dpcm" | "dppx" | "x" => Some(UnitCategory::Resolution),
        _ => None,
    }
}

/// Convert `value` in `unit` to the canonical unit of its category.
///
/// Returns the converted value and the canonical unit: `px` for absolute
/// lengths, `deg`, `ms`, `hz` and `dppx`. Relative lengths and unknown units
/// come back unchanged with their unit lowercased.
#[must_use]
pub fn to_canonical_unit(value: f64, unit: &str) -> (f64, String) {
    let unit = unit.to_ascii_lowercase();
    let factor = match unit.as_str() {
        "px" => Some((1.0, "px")),
        "in" => Some((PX_PER_IN, "px")),
        "cm" => Some((PX_PER_CM, "px")),
        "mm" => Some((PX_PER_MM, "px")),
        "q" => Some((PX_PER_Q, "px")),
        "pt" => Some((PX_PER_PT, "px")),
        "pc" => Some((PX_PER_PC, "px")),
        "deg" => Some((1.0, "deg")),
        "grad" => Some((DEG_PER_GRAD, "deg")),
        "rad" => Some((DEG_PER_RAD, "deg")),
        "turn" => Some((DEG_PER_TURN, "deg")),
        "ms" => Some((1.0, "ms")),
        "s" => Some((MS_PER_S, "ms")),
        "hz" => Some((1.0, "hz")),
        "khz" => Some((HZ_PER_KHZ, "hz")),
        "dppx" | "x" => Some((1.0, "dppx")),
        "dpi" => Some((1.0 / DPI_PER_DPPX, "dppx")),
        "dpcm" => Some((1.0 / DPCM_PER_DPPX, "dppx")),
        _ => None,
    };
    match factor {
        Some((factor, canonical)) => (value * factor, canonical.to_string()),
        None => (value, unit),
    }
}

/// Convert an angle to degrees, or `None` if `unit` is not an angle unit.
#[must_use]
pub fn angle_to_degrees(value: f64, unit: &str) -> Option<f64> {
    if unit_category(unit) != Some(UnitCategory::Angle) {
        return None;
    }
    Some(to_canonical_unit(value, unit).0)
}
