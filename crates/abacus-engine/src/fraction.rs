//! Exact rational arithmetic and mixed-number formatting.
//!
//! `Fraction` wraps `Ratio<i64>`, so every value is stored in lowest terms
//! with the sign on the numerator and a positive denominator. Operations
//! return new fractions; nothing here mutates in place.

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use num_integer::Integer;
use num_rational::Ratio;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::EngineError;
use crate::problem::Problem;

/// Greatest common divisor (Euclidean algorithm).
pub fn gcd(a: i64, b: i64) -> i64 {
    a.abs().gcd(&b.abs())
}

/// Least common multiple.
pub fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    a.abs().lcm(&b.abs())
}

/// An exact rational number in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fraction(Ratio<i64>);

impl Fraction {
    /// Build a fraction, reducing to lowest terms and normalizing the sign
    /// onto the numerator. A zero denominator is a caller error, reported
    /// rather than panicking.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, EngineError> {
        if denominator == 0 {
            return Err(EngineError::ZeroDenominator);
        }
        Ok(Self(Ratio::new(numerator, denominator)))
    }

    pub fn from_integer(n: i64) -> Self {
        Self(Ratio::from_integer(n))
    }

    pub fn numerator(&self) -> i64 {
        *self.0.numer()
    }

    pub fn denominator(&self) -> i64 {
        *self.0.denom()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn is_negative(&self) -> bool {
        self.numerator() < 0
    }

    pub fn to_f64(&self) -> f64 {
        self.numerator() as f64 / self.denominator() as f64
    }

    /// Division, rejecting a zero divisor.
    pub fn checked_div(&self, rhs: &Fraction) -> Result<Fraction, EngineError> {
        if rhs.numerator() == 0 {
            return Err(EngineError::DivisionByZero);
        }
        Ok(Self(self.0 / rhs.0))
    }

    /// Recover a small exact fraction from a float, if one exists.
    /// Used when a solver produced a quotient of two integers as `f64`.
    pub fn approximate(value: f64) -> Option<Self> {
        let ratio = Ratio::<i64>::approximate_float(value)?;
        if *ratio.denom() > 10_000 {
            return None;
        }
        Some(Self(ratio))
    }
}

impl Add for Fraction {
    type Output = Fraction;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Fraction {
    type Output = Fraction;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Fraction {
    type Output = Fraction;
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

/// Reduce `num/den` to lowest terms.
pub fn simplify(numerator: i64, denominator: i64) -> Result<Fraction, EngineError> {
    Fraction::new(numerator, denominator)
}

impl fmt::Display for Fraction {
    /// Mixed-number formatting: `5/4` → "1 1/4", `3/1` → "3", `2/3` → "2/3".
    /// The sign sits on the whole part of a mixed number.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = self.numerator();
        let den = self.denominator();

        if den == 1 {
            return write!(f, "{}", num);
        }

        let abs_num = num.abs();
        if abs_num > den {
            let sign = if num < 0 { -1 } else { 1 };
            let whole = abs_num / den;
            let remainder = abs_num % den;
            if remainder == 0 {
                return write!(f, "{}", sign * whole);
            }
            return write!(f, "{} {}/{}", sign * whole, remainder, den);
        }

        write!(f, "{}/{}", num, den)
    }
}

impl FromStr for Fraction {
    type Err = EngineError;

    /// Accepts decimals ("0.5"), mixed numbers ("1 3/4", "-2 1/3"),
    /// simple fractions ("3/4") and whole numbers ("7").
    /// A negative mixed number composes as -(whole + part): "-2 1/3" = -7/3.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EngineError::BadNumber(s.to_string()));
        }

        // Decimal (but not a fraction with '/')
        if s.contains('.') && !s.contains('/') {
            return parse_decimal(s);
        }

        // Mixed number: "1 3/4" or "-2 1/3"
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() == 2 && parts[1].contains('/') {
            let whole: i64 = parts[0]
                .parse()
                .map_err(|_| EngineError::BadNumber(s.to_string()))?;
            let (num, den) = split_fraction(parts[1], s)?;
            if den == 0 {
                return Err(EngineError::ZeroDenominator);
            }
            let sign = if parts[0].starts_with('-') { -1 } else { 1 };
            return Fraction::new(sign * (whole.abs() * den + num), den);
        }

        // Simple fraction: "3/4"
        if s.contains('/') {
            let (num, den) = split_fraction(s, s)?;
            return Fraction::new(num, den);
        }

        // Whole number
        let n: i64 = s
            .parse()
            .map_err(|_| EngineError::BadNumber(s.to_string()))?;
        Ok(Fraction::from_integer(n))
    }
}

fn split_fraction(part: &str, original: &str) -> Result<(i64, i64), EngineError> {
    let mut halves = part.splitn(2, '/');
    let num: i64 = halves
        .next()
        .unwrap_or("")
        .trim()
        .parse()
        .map_err(|_| EngineError::BadNumber(original.to_string()))?;
    let den: i64 = halves
        .next()
        .unwrap_or("")
        .trim()
        .parse()
        .map_err(|_| EngineError::BadNumber(original.to_string()))?;
    Ok((num, den))
}

/// Exact base-10 expansion of a decimal literal: "0.25" → 1/4.
fn parse_decimal(s: &str) -> Result<Fraction, EngineError> {
    let bad = || EngineError::BadNumber(s.to_string());
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, s),
    };
    let mut halves = digits.splitn(2, '.');
    let int_part = halves.next().unwrap_or("");
    let frac_part = halves.next().unwrap_or("");
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(bad());
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(bad());
    }

    let mut numerator: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| bad())?
    };
    let mut denominator: i64 = 1;
    for c in frac_part.chars() {
        let digit = (c as u8 - b'0') as i64;
        numerator = numerator
            .checked_mul(10)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(bad)?;
        denominator = denominator.checked_mul(10).ok_or_else(bad)?;
    }

    Fraction::new(sign * numerator, denominator)
}

// --- Problem generators ---

const DEN_CHOICES: [i64; 6] = [2, 3, 4, 5, 6, 8];
const MUL_DEN_CHOICES: [i64; 5] = [2, 3, 4, 5, 6];

/// Fraction addition problems. Same denominator through grade 4,
/// mixed denominators above.
pub fn generate_fraction_addition(grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let (a_num, a_den, b_num, b_den) = if grade <= 4 {
            let den = *DEN_CHOICES.choose(rng).unwrap_or(&2);
            (
                rng.gen_range(1..=den - 1),
                den,
                rng.gen_range(1..=den - 1),
                den,
            )
        } else {
            let a_den = *DEN_CHOICES.choose(rng).unwrap_or(&2);
            let b_den = *DEN_CHOICES.choose(rng).unwrap_or(&2);
            (
                rng.gen_range(1..=a_den - 1),
                a_den,
                rng.gen_range(1..=b_den - 1),
                b_den,
            )
        };

        let result = Fraction::new(a_num, a_den).expect("nonzero denominator")
            + Fraction::new(b_num, b_den).expect("nonzero denominator");
        let common = lcm(a_den, b_den);

        problems.push(
            Problem::fill_in(
                format!("What is {}/{} + {}/{}?", a_num, a_den, b_num, b_den),
                result.to_string(),
                format!("Find a common denominator first. Try {}.", common),
            )
            .with_operation(format!("{}/{} + {}/{}", a_num, a_den, b_num, b_den)),
        );
    }
    problems
}

/// Fraction subtraction problems. Operands are swapped whenever the
/// difference would come out negative, so answers are never below zero.
pub fn generate_fraction_subtraction(grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let den = *DEN_CHOICES.choose(rng).unwrap_or(&2);
        let mut a = (rng.gen_range(2..=den), den);
        let b_den = if grade >= 5 && rng.gen_bool(0.5) {
            *DEN_CHOICES.choose(rng).unwrap_or(&2)
        } else {
            den
        };
        let mut b = (rng.gen_range(1..=a.0 - 1), b_den);

        let mut result = Fraction::new(a.0, a.1).expect("nonzero denominator")
            - Fraction::new(b.0, b.1).expect("nonzero denominator");
        if result.is_negative() {
            std::mem::swap(&mut a, &mut b);
            result = Fraction::new(a.0, a.1).expect("nonzero denominator")
                - Fraction::new(b.0, b.1).expect("nonzero denominator");
        }

        problems.push(Problem::fill_in(
            format!("What is {}/{} - {}/{}?", a.0, a.1, b.0, b.1),
            result.to_string(),
            "Make sure both fractions have the same denominator before subtracting.",
        ));
    }
    problems
}

/// Fraction multiplication problems.
pub fn generate_fraction_multiplication(
    _grade: u8,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<Problem> {
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let a_den = *MUL_DEN_CHOICES.choose(rng).unwrap_or(&2);
        let b_den = *MUL_DEN_CHOICES.choose(rng).unwrap_or(&2);
        let a_num = rng.gen_range(1..=a_den);
        let b_num = rng.gen_range(1..=b_den);

        let result = Fraction::new(a_num, a_den).expect("nonzero denominator")
            * Fraction::new(b_num, b_den).expect("nonzero denominator");

        problems.push(Problem::fill_in(
            format!("What is {}/{} \u{00d7} {}/{}?", a_num, a_den, b_num, b_den),
            result.to_string(),
            "Multiply the numerators together, then multiply the denominators.",
        ));
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(0, 5), 0);
    }

    #[test]
    fn test_new_reduces_and_normalizes_sign() {
        let f = Fraction::new(2, 4).unwrap();
        assert_eq!((f.numerator(), f.denominator()), (1, 2));

        let f = Fraction::new(3, -6).unwrap();
        assert_eq!((f.numerator(), f.denominator()), (-1, 2));

        assert_eq!(Fraction::new(1, 0), Err(EngineError::ZeroDenominator));
    }

    #[test]
    fn test_arithmetic() {
        let half = Fraction::new(1, 2).unwrap();
        let third = Fraction::new(1, 3).unwrap();
        assert_eq!(half + third, Fraction::new(5, 6).unwrap());
        assert_eq!(half - third, Fraction::new(1, 6).unwrap());
        assert_eq!(half * third, Fraction::new(1, 6).unwrap());
        assert_eq!(
            half.checked_div(&third).unwrap(),
            Fraction::new(3, 2).unwrap()
        );
        assert_eq!(
            half.checked_div(&Fraction::from_integer(0)),
            Err(EngineError::DivisionByZero)
        );
    }

    #[test]
    fn test_display_mixed_numbers() {
        assert_eq!(Fraction::new(5, 4).unwrap().to_string(), "1 1/4");
        assert_eq!(Fraction::new(3, 1).unwrap().to_string(), "3");
        assert_eq!(Fraction::new(2, 3).unwrap().to_string(), "2/3");
        assert_eq!(Fraction::new(-7, 3).unwrap().to_string(), "-2 1/3");
        assert_eq!(Fraction::new(-1, 2).unwrap().to_string(), "-1/2");
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!("3/4".parse::<Fraction>().unwrap(), Fraction::new(3, 4).unwrap());
        assert_eq!("0.5".parse::<Fraction>().unwrap(), Fraction::new(1, 2).unwrap());
        assert_eq!(".25".parse::<Fraction>().unwrap(), Fraction::new(1, 4).unwrap());
        assert_eq!("7".parse::<Fraction>().unwrap(), Fraction::from_integer(7));
        assert_eq!(
            "1 3/4".parse::<Fraction>().unwrap(),
            Fraction::new(7, 4).unwrap()
        );
        // Negative mixed number composes as -(2 + 1/3)
        assert_eq!(
            "-2 1/3".parse::<Fraction>().unwrap(),
            Fraction::new(-7, 3).unwrap()
        );
        assert_eq!(
            "2/6".parse::<Fraction>().unwrap(),
            Fraction::new(1, 3).unwrap()
        );
        assert!("abc".parse::<Fraction>().is_err());
        assert!("1/0".parse::<Fraction>().is_err());
    }

    #[test]
    fn test_format_parse_round_trip() {
        for n in -20i64..=20 {
            for d in 1i64..=12 {
                let f = simplify(n, d).unwrap();
                let back: Fraction = f.to_string().parse().unwrap();
                assert_eq!(back, f, "round trip failed for {}/{}", n, d);
            }
        }
    }

    #[test]
    fn test_subtraction_generator_never_negative() {
        let mut rng = StdRng::seed_from_u64(7);
        for grade in [2u8, 5, 8] {
            for p in generate_fraction_subtraction(grade, 40, &mut rng) {
                let answer: Fraction = p.answer.parse().unwrap();
                assert!(!answer.is_negative(), "negative answer in {:?}", p.question);
            }
        }
    }

    #[test]
    fn test_addition_generator_same_denominator_for_young_grades() {
        let mut rng = StdRng::seed_from_u64(11);
        for p in generate_fraction_addition(3, 25, &mut rng) {
            let op = p.operation.unwrap();
            let parts: Vec<&str> = op.split(" + ").collect();
            let a_den = parts[0].split('/').nth(1).unwrap();
            let b_den = parts[1].split('/').nth(1).unwrap();
            assert_eq!(a_den, b_den);
        }
    }
}
