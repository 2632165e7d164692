//! Typed answer-format matchers.
//!
//! Each matcher recognizes exactly one textual answer format and returns
//! `None` otherwise, so the chain in `mod.rs` can try them in priority
//! order. Keeping them separate makes each format testable on its own.

use std::f64::consts::PI;

use num_complex::Complex64;
use regex::Regex;

use crate::fraction::Fraction;

/// A parsed student answer, ready for comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedAnswer {
    /// A real number; `exact` carries the rational form when the input
    /// text pins one down (integers, fractions, decimals, percentages).
    Number { value: f64, exact: Option<Fraction> },
    /// A complex number like "3 + 2i"
    Complex(Complex64),
    /// Vector or interval notation, compared as normalized text
    Opaque(String),
}

impl ParsedAnswer {
    fn real(value: f64) -> Self {
        Self::Number { value, exact: None }
    }

    fn exact(value: f64, fraction: Fraction) -> Self {
        Self::Number {
            value,
            exact: Some(fraction),
        }
    }
}

/// Empty coefficient conventions: "" and "+" mean 1, "-" means -1.
fn signed_coefficient(s: &str) -> Option<f64> {
    match s {
        "" | "+" => Some(1.0),
        "-" => Some(-1.0),
        other => other.parse().ok(),
    }
}

/// "50%" → 0.5
pub fn match_percentage(s: &str) -> Option<ParsedAnswer> {
    let prefix = s.strip_suffix('%')?.trim();
    let value: f64 = prefix.parse().ok()?;
    let exact = prefix
        .parse::<Fraction>()
        .ok()
        .and_then(|f| Fraction::new(1, 100).ok().map(|h| f * h));
    Some(ParsedAnswer::Number {
        value: value / 100.0,
        exact,
    })
}

/// "1 3/4" or "-2 1/3"
pub fn match_mixed_number(s: &str) -> Option<ParsedAnswer> {
    let re = Regex::new(r"^(-?\d+)\s+(\d+)\s*/\s*(\d+)$").ok()?;
    let caps = re.captures(s)?;
    let whole: i64 = caps[1].parse().ok()?;
    let num: i64 = caps[2].parse().ok()?;
    let den: i64 = caps[3].parse().ok()?;
    if den == 0 {
        return None;
    }
    let sign = if caps[1].starts_with('-') { -1 } else { 1 };
    let fraction = Fraction::new(sign * (whole.abs() * den + num), den).ok()?;
    Some(ParsedAnswer::exact(fraction.to_f64(), fraction))
}

/// "3/4" or "-3/4"
pub fn match_fraction(s: &str) -> Option<ParsedAnswer> {
    let re = Regex::new(r"^(-?\d+)\s*/\s*(\d+)$").ok()?;
    let caps = re.captures(s)?;
    let num: i64 = caps[1].parse().ok()?;
    let den: i64 = caps[2].parse().ok()?;
    if den == 0 {
        return None;
    }
    let fraction = Fraction::new(num, den).ok()?;
    Some(ParsedAnswer::exact(num as f64 / den as f64, fraction))
}

/// "3.14", ".5", "-0.25" (also plain integers)
pub fn match_decimal(s: &str) -> Option<ParsedAnswer> {
    let re = Regex::new(r"^-?\d*\.?\d+$").ok()?;
    re.is_match(s).then(|| {
        let value: f64 = s.parse().unwrap_or(f64::NAN);
        match s.parse::<Fraction>() {
            Ok(f) => ParsedAnswer::exact(value, f),
            Err(_) => ParsedAnswer::real(value),
        }
    })
}

/// "42"
pub fn match_integer(s: &str) -> Option<ParsedAnswer> {
    let re = Regex::new(r"^-?\d+$").ok()?;
    if !re.is_match(s) {
        return None;
    }
    let n: i64 = s.parse().ok()?;
    Some(ParsedAnswer::exact(n as f64, Fraction::from_integer(n)))
}

/// "4pi", "4π", "-pi"
pub fn match_pi_multiple(s: &str) -> Option<ParsedAnswer> {
    let re = Regex::new(r"(?i)^(-?\d*\.?\d*)\s*(?:pi|\u{03c0})$").ok()?;
    let caps = re.captures(s)?;
    let coeff = signed_coefficient(&caps[1])?;
    Some(ParsedAnswer::real(coeff * PI))
}

/// "pi/2", "2pi/3", "π/4"
pub fn match_pi_fraction(s: &str) -> Option<ParsedAnswer> {
    let re = Regex::new(r"(?i)^(-?\d*\.?\d*)\s*(?:pi|\u{03c0})\s*/\s*(\d+)$").ok()?;
    let caps = re.captures(s)?;
    let coeff = signed_coefficient(&caps[1])?;
    let den: i64 = caps[2].parse().ok()?;
    if den == 0 {
        return None;
    }
    Some(ParsedAnswer::real(coeff * PI / den as f64))
}

/// "5i", "-3i", "i"
pub fn match_pure_imaginary(s: &str) -> Option<ParsedAnswer> {
    let re = Regex::new(r"^(-?\d*\.?\d*)i$").ok()?;
    let caps = re.captures(s)?;
    let im = signed_coefficient(&caps[1])?;
    Some(ParsedAnswer::Complex(Complex64::new(0.0, im)))
}

/// "3 + 2i", "3+2i", "-1 - 4i"
pub fn match_complex(s: &str) -> Option<ParsedAnswer> {
    let re = Regex::new(r"^(-?\d*\.?\d*)\s*([+-])\s*(\d*\.?\d*)i$").ok()?;
    let caps = re.captures(s)?;
    let re_part: f64 = if caps[1].is_empty() {
        0.0
    } else {
        caps[1].parse().ok()?
    };
    let mut im_part: f64 = if caps[3].is_empty() {
        1.0
    } else {
        caps[3].parse().ok()?
    };
    if &caps[2] == "-" {
        im_part = -im_part;
    }
    Some(ParsedAnswer::Complex(Complex64::new(re_part, im_part)))
}

/// "sqrt(2)", "2sqrt(3)", "2sqrt(3)/4"
pub fn match_radical(s: &str) -> Option<ParsedAnswer> {
    let re = Regex::new(r"(?i)^(-?\d*\.?\d*)\s*sqrt\((\d+)\)(?:\s*/\s*(\d+))?$").ok()?;
    let caps = re.captures(s)?;
    let coeff = signed_coefficient(&caps[1])?;
    let radicand: i64 = caps[2].parse().ok()?;
    let mut value = coeff * (radicand as f64).sqrt();
    if let Some(den) = caps.get(3) {
        let den: i64 = den.as_str().parse().ok()?;
        if den == 0 {
            return None;
        }
        value /= den as f64;
    }
    Some(ParsedAnswer::real(value))
}

/// "<3, 4>" — kept opaque, compared as normalized text
pub fn match_vector(s: &str) -> Option<ParsedAnswer> {
    let re = Regex::new(r"^<\s*-?\d+\s*,\s*-?\d+\s*>$").ok()?;
    re.is_match(s).then(|| ParsedAnswer::Opaque(s.to_string()))
}

/// "(-2, 5]", "[1, 3)" — kept opaque, compared as normalized text
pub fn match_interval(s: &str) -> Option<ParsedAnswer> {
    let re = Regex::new(r"^[\[(]-?\d+\.?\d*\s*,\s*-?\d+\.?\d*[\])]$").ok()?;
    re.is_match(s).then(|| ParsedAnswer::Opaque(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        match match_percentage("50%").unwrap() {
            ParsedAnswer::Number { value, exact } => {
                assert_eq!(value, 0.5);
                assert_eq!(exact, Some(Fraction::new(1, 2).unwrap()));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(match_percentage("fifty%").is_none());
        assert!(match_percentage("50").is_none());
    }

    #[test]
    fn test_mixed_number() {
        match match_mixed_number("-2 1/3").unwrap() {
            ParsedAnswer::Number { exact, .. } => {
                assert_eq!(exact, Some(Fraction::new(-7, 3).unwrap()));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(match_mixed_number("1 3/0").is_none());
        assert!(match_mixed_number("1/2").is_none());
    }

    #[test]
    fn test_fraction_and_decimal() {
        assert!(match_fraction("3/4").is_some());
        assert!(match_fraction("3/0").is_none());
        assert!(match_decimal(".5").is_some());
        assert!(match_decimal("abc").is_none());
        assert!(match_integer("-17").is_some());
    }

    #[test]
    fn test_pi_forms() {
        match match_pi_multiple("4pi").unwrap() {
            ParsedAnswer::Number { value, .. } => assert!((value - 4.0 * PI).abs() < 1e-9),
            other => panic!("unexpected {:?}", other),
        }
        match match_pi_fraction("\u{03c0}/2").unwrap() {
            ParsedAnswer::Number { value, .. } => assert!((value - PI / 2.0).abs() < 1e-9),
            other => panic!("unexpected {:?}", other),
        }
        assert!(match_pi_multiple("pie").is_none());
    }

    #[test]
    fn test_complex_forms() {
        assert_eq!(
            match_pure_imaginary("5i").unwrap(),
            ParsedAnswer::Complex(Complex64::new(0.0, 5.0))
        );
        assert_eq!(
            match_pure_imaginary("-i").unwrap(),
            ParsedAnswer::Complex(Complex64::new(0.0, -1.0))
        );
        assert_eq!(
            match_complex("3 + 2i").unwrap(),
            ParsedAnswer::Complex(Complex64::new(3.0, 2.0))
        );
        assert_eq!(
            match_complex("-1 - 4i").unwrap(),
            ParsedAnswer::Complex(Complex64::new(-1.0, -4.0))
        );
    }

    #[test]
    fn test_radical() {
        match match_radical("2sqrt(3)/4").unwrap() {
            ParsedAnswer::Number { value, .. } => {
                assert!((value - 2.0 * 3f64.sqrt() / 4.0).abs() < 1e-9)
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(match_radical("sqrt(x)").is_none());
    }

    #[test]
    fn test_opaque_forms() {
        assert!(matches!(
            match_vector("<3, 4>").unwrap(),
            ParsedAnswer::Opaque(_)
        ));
        assert!(matches!(
            match_interval("(-2, 5]").unwrap(),
            ParsedAnswer::Opaque(_)
        ));
        assert!(match_vector("<3, 4, 5>").is_none());
        assert!(match_interval("(a, b)").is_none());
    }
}
