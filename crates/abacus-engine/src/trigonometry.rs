//! Trigonometry: the exact unit-circle table, numeric fallback, exact
//! degree/radian conversion as fractions of pi, and the laws of sines
//! and cosines.

use std::f64::consts::PI;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::fraction::Fraction;
use crate::problem::Problem;
use crate::util::{format_number, round_to};

/// A trig function selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrigFunction {
    Sin,
    Cos,
    Tan,
}

impl TrigFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
        }
    }
}

/// A trig value: exact radical/rational string, plain number, or
/// undefined (tangent at 90° and 270°).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrigValue {
    Exact(&'static str),
    Num(f64),
    Undefined,
}

impl fmt::Display for TrigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(s) => write!(f, "{}", s),
            Self::Num(v) => write!(f, "{}", format_number(*v)),
            Self::Undefined => write!(f, "undefined"),
        }
    }
}

/// One row of the unit-circle table.
#[derive(Debug, Clone, Copy)]
pub struct UnitCircleEntry {
    pub angle: i64,
    pub sin: TrigValue,
    pub cos: TrigValue,
    pub tan: TrigValue,
}

use TrigValue::{Exact, Num, Undefined};

/// Exact values for the standard multiples of 30°/45°/90° in [0°, 360°].
pub const UNIT_CIRCLE: [UnitCircleEntry; 17] = [
    UnitCircleEntry { angle: 0, sin: Num(0.0), cos: Num(1.0), tan: Num(0.0) },
    UnitCircleEntry { angle: 30, sin: Exact("1/2"), cos: Exact("sqrt(3)/2"), tan: Exact("sqrt(3)/3") },
    UnitCircleEntry { angle: 45, sin: Exact("sqrt(2)/2"), cos: Exact("sqrt(2)/2"), tan: Num(1.0) },
    UnitCircleEntry { angle: 60, sin: Exact("sqrt(3)/2"), cos: Exact("1/2"), tan: Exact("sqrt(3)") },
    UnitCircleEntry { angle: 90, sin: Num(1.0), cos: Num(0.0), tan: Undefined },
    UnitCircleEntry { angle: 120, sin: Exact("sqrt(3)/2"), cos: Exact("-1/2"), tan: Exact("-sqrt(3)") },
    UnitCircleEntry { angle: 135, sin: Exact("sqrt(2)/2"), cos: Exact("-sqrt(2)/2"), tan: Num(-1.0) },
    UnitCircleEntry { angle: 150, sin: Exact("1/2"), cos: Exact("-sqrt(3)/2"), tan: Exact("-sqrt(3)/3") },
    UnitCircleEntry { angle: 180, sin: Num(0.0), cos: Num(-1.0), tan: Num(0.0) },
    UnitCircleEntry { angle: 210, sin: Exact("-1/2"), cos: Exact("-sqrt(3)/2"), tan: Exact("sqrt(3)/3") },
    UnitCircleEntry { angle: 225, sin: Exact("-sqrt(2)/2"), cos: Exact("-sqrt(2)/2"), tan: Num(1.0) },
    UnitCircleEntry { angle: 240, sin: Exact("-sqrt(3)/2"), cos: Exact("-1/2"), tan: Exact("sqrt(3)") },
    UnitCircleEntry { angle: 270, sin: Num(-1.0), cos: Num(0.0), tan: Undefined },
    UnitCircleEntry { angle: 300, sin: Exact("-sqrt(3)/2"), cos: Exact("1/2"), tan: Exact("-sqrt(3)") },
    UnitCircleEntry { angle: 315, sin: Exact("-sqrt(2)/2"), cos: Exact("sqrt(2)/2"), tan: Num(-1.0) },
    UnitCircleEntry { angle: 330, sin: Exact("-1/2"), cos: Exact("sqrt(3)/2"), tan: Exact("-sqrt(3)/3") },
    UnitCircleEntry { angle: 360, sin: Num(0.0), cos: Num(1.0), tan: Num(0.0) },
];

fn lookup(angle: i64) -> Option<&'static UnitCircleEntry> {
    UNIT_CIRCLE.iter().find(|e| e.angle == angle)
}

/// Exact value for a standard angle, or a numeric value rounded to 4
/// decimals for anything off the table. Tangent where cosine vanishes
/// is `Undefined`.
pub fn trig_value(func: TrigFunction, angle_deg: f64) -> TrigValue {
    // Normalize to [0, 360)
    let normalized = ((angle_deg % 360.0) + 360.0) % 360.0;

    if normalized.fract() == 0.0 {
        if let Some(entry) = lookup(normalized as i64) {
            return match func {
                TrigFunction::Sin => entry.sin,
                TrigFunction::Cos => entry.cos,
                TrigFunction::Tan => entry.tan,
            };
        }
    }

    let rad = normalized * PI / 180.0;
    match func {
        TrigFunction::Sin => Num(round_to(rad.sin(), 4)),
        TrigFunction::Cos => Num(round_to(rad.cos(), 4)),
        TrigFunction::Tan => {
            if rad.cos().abs() < 1e-10 {
                Undefined
            } else {
                Num(round_to(rad.tan(), 4))
            }
        }
    }
}

/// Convert degrees to an exact fraction of pi: 90° → 1/2 (meaning pi/2).
/// Never a floating-point radian value.
pub fn degrees_to_radians(degrees: i64) -> Fraction {
    Fraction::new(degrees, 180).expect("180 is non-zero")
}

/// Convert a fraction of pi back to degrees: 1/2 (pi/2) → 90.
pub fn radians_to_degrees(radians: &Fraction) -> f64 {
    radians.to_f64() * 180.0
}

/// Render a fraction of pi the way students write it: "0", "2pi", "2pi/3".
pub fn format_pi_fraction(frac: &Fraction) -> String {
    if frac.numerator() == 0 {
        return "0".to_string();
    }
    if frac.denominator() == 1 {
        return format!("{}pi", frac.numerator());
    }
    format!("{}pi/{}", frac.numerator(), frac.denominator())
}

/// Law of cosines: side c from sides a, b and the included angle C,
/// rounded to 2 decimals.
pub fn law_of_cosines_side(a: f64, b: f64, angle_c_deg: f64) -> f64 {
    let c = angle_c_deg * PI / 180.0;
    let c_squared = a * a + b * b - 2.0 * a * b * c.cos();
    round_to(c_squared.sqrt(), 2)
}

/// Law of sines: angle B from side a, angle A and side b, in degrees.
/// Returns `None` when |sin B| > 1 — no such triangle exists.
pub fn law_of_sines_angle(a: f64, angle_a_deg: f64, b: f64) -> Option<f64> {
    let angle_a = angle_a_deg * PI / 180.0;
    let sin_b = b * angle_a.sin() / a;
    if sin_b.abs() > 1.0 {
        return None;
    }
    Some(round_to(sin_b.asin() * 180.0 / PI, 2))
}

// --- Problem generators ---

const COMMON_ANGLES: [i64; 16] = [
    0, 30, 45, 60, 90, 120, 135, 150, 180, 210, 225, 240, 270, 300, 315, 330,
];

const CONVERSION_ANGLES: [i64; 17] = [
    0, 30, 45, 60, 90, 120, 135, 150, 180, 210, 225, 240, 270, 300, 315, 330, 360,
];

const TRIG_TRIPLES: [[i64; 3]; 5] = [
    [3, 4, 5],
    [5, 12, 13],
    [8, 15, 17],
    [6, 8, 10],
    [7, 24, 25],
];

/// Unit-circle value problems at the standard angles.
pub fn generate_unit_circle_problems(_grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let funcs = [TrigFunction::Sin, TrigFunction::Cos, TrigFunction::Tan];
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let angle = *COMMON_ANGLES.choose(rng).unwrap_or(&0);
        let func = *funcs.choose(rng).unwrap_or(&TrigFunction::Sin);
        let value = trig_value(func, angle as f64);

        problems.push(Problem::fill_in(
            format!("What is {}({}\u{00b0})?", func.as_str(), angle),
            value.to_string(),
            format!(
                "Think about the unit circle. What are the coordinates at {}\u{00b0}?",
                angle
            ),
        ));
    }
    problems
}

/// Degree ↔ radian conversion problems with exact pi-fraction answers.
pub fn generate_radian_conversion(_grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let angle = *CONVERSION_ANGLES.choose(rng).unwrap_or(&90);
        let rad = degrees_to_radians(angle);

        if rng.gen_bool(0.5) {
            problems.push(Problem::fill_in(
                format!("Convert {}\u{00b0} to radians.", angle),
                format_pi_fraction(&rad),
                "Multiply the degree measure by \u{03c0}/180 and simplify.",
            ));
        } else {
            let rad_display = if angle == 0 {
                "0".to_string()
            } else if rad.denominator() == 1 {
                format!("{}\u{03c0}", rad.numerator())
            } else {
                format!("{}\u{03c0}/{}", rad.numerator(), rad.denominator())
            };
            problems.push(Problem::fill_in(
                format!("Convert {} radians to degrees.", rad_display),
                angle.to_string(),
                "Multiply the radian measure by 180/\u{03c0}.",
            ));
        }
    }
    problems
}

/// SOH-CAH-TOA right-triangle problems from Pythagorean triples.
pub fn generate_right_triangle_trig(_grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let funcs = [TrigFunction::Sin, TrigFunction::Cos, TrigFunction::Tan];
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let [a, b, c] = *TRIG_TRIPLES.choose(rng).unwrap_or(&TRIG_TRIPLES[0]);

        match funcs.choose(rng).unwrap_or(&TrigFunction::Sin) {
            TrigFunction::Sin => problems.push(Problem::fill_in(
                format!(
                    "In a right triangle with opposite side {} and hypotenuse {}, what is sin(\u{03b8})?",
                    a, c
                ),
                format!("{}/{}", a, c),
                "SOH: Sin = Opposite / Hypotenuse",
            )),
            TrigFunction::Cos => problems.push(Problem::fill_in(
                format!(
                    "In a right triangle with adjacent side {} and hypotenuse {}, what is cos(\u{03b8})?",
                    b, c
                ),
                format!("{}/{}", b, c),
                "CAH: Cos = Adjacent / Hypotenuse",
            )),
            TrigFunction::Tan => problems.push(Problem::fill_in(
                format!(
                    "In a right triangle with opposite side {} and adjacent side {}, what is tan(\u{03b8})?",
                    a, b
                ),
                format!("{}/{}", a, b),
                "TOA: Tan = Opposite / Adjacent",
            )),
        }
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_circle_exact_values() {
        assert_eq!(trig_value(TrigFunction::Sin, 30.0).to_string(), "1/2");
        assert_eq!(trig_value(TrigFunction::Cos, 90.0).to_string(), "0");
        assert_eq!(trig_value(TrigFunction::Tan, 90.0).to_string(), "undefined");
        assert_eq!(trig_value(TrigFunction::Tan, 270.0), Undefined);
        assert_eq!(trig_value(TrigFunction::Cos, 60.0).to_string(), "1/2");
        assert_eq!(trig_value(TrigFunction::Tan, 45.0).to_string(), "1");
    }

    #[test]
    fn test_angle_normalization() {
        // 390° wraps to 30°
        assert_eq!(trig_value(TrigFunction::Sin, 390.0).to_string(), "1/2");
        // -30° wraps to 330°
        assert_eq!(trig_value(TrigFunction::Sin, -30.0).to_string(), "-1/2");
    }

    #[test]
    fn test_numeric_fallback_for_nonstandard_angles() {
        assert_eq!(trig_value(TrigFunction::Sin, 10.0), Num(0.1736));
        assert_eq!(trig_value(TrigFunction::Tan, 50.0), Num(1.1918));
    }

    #[test]
    fn test_degree_radian_conversion_is_exact() {
        let rad = degrees_to_radians(120);
        assert_eq!((rad.numerator(), rad.denominator()), (2, 3));
        assert_eq!(format_pi_fraction(&rad), "2pi/3");
        assert_eq!(radians_to_degrees(&rad), 120.0);

        assert_eq!(format_pi_fraction(&degrees_to_radians(0)), "0");
        assert_eq!(format_pi_fraction(&degrees_to_radians(180)), "1pi");
        assert_eq!(format_pi_fraction(&degrees_to_radians(90)), "1pi/2");
        assert_eq!(format_pi_fraction(&degrees_to_radians(360)), "2pi");
    }

    #[test]
    fn test_law_of_cosines() {
        // 3-4-5 right triangle: angle between the legs is 90°
        assert_eq!(law_of_cosines_side(3.0, 4.0, 90.0), 5.0);
    }

    #[test]
    fn test_law_of_sines() {
        // Equilateral: all angles 60, all sides equal
        assert_eq!(law_of_sines_angle(5.0, 60.0, 5.0), Some(60.0));
        // b·sin(A)/a > 1 → no triangle
        assert_eq!(law_of_sines_angle(1.0, 80.0, 5.0), None);
    }
}
