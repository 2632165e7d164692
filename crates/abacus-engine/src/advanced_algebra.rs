//! Quadratics, 2x2 linear systems, polynomial expansion and complex
//! arithmetic (grades 9-12).
//!
//! Everything is computed by direct coefficient algebra; there is no
//! symbolic manipulation anywhere in this module.

use std::fmt;

use num_complex::Complex;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::EngineError;
use crate::problem::Problem;
use crate::util::{format_number, round_to};

/// Roots of a quadratic, keyed by the sign of the discriminant.
#[derive(Debug, Clone, PartialEq)]
pub enum QuadraticRoots {
    /// Two real roots, ascending
    TwoReal(f64, f64),
    /// One repeated root
    OneReal(f64),
    /// Conjugate pair re ± im·i
    Complex { re: f64, im: f64 },
}

impl QuadraticRoots {
    /// The roots as answer strings, the way a student would write them.
    pub fn answers(&self) -> Vec<String> {
        match self {
            Self::TwoReal(x1, x2) => vec![format_number(*x1), format_number(*x2)],
            Self::OneReal(x) => vec![format_number(*x)],
            Self::Complex { re, im } => vec![
                format!("{} + {}i", format_number(*re), format_number(*im)),
                format!("{} - {}i", format_number(*re), format_number(*im)),
            ],
        }
    }
}

/// Solve ax² + bx + c = 0 with the quadratic formula.
/// Real roots are rounded to 4 decimals and sorted ascending.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Result<QuadraticRoots, EngineError> {
    if a == 0.0 {
        return Err(EngineError::NotQuadratic);
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant > 0.0 {
        let x1 = round_to((-b + discriminant.sqrt()) / (2.0 * a), 4);
        let x2 = round_to((-b - discriminant.sqrt()) / (2.0 * a), 4);
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        Ok(QuadraticRoots::TwoReal(lo, hi))
    } else if discriminant == 0.0 {
        Ok(QuadraticRoots::OneReal(round_to(-b / (2.0 * a), 4)))
    } else {
        Ok(QuadraticRoots::Complex {
            re: round_to(-b / (2.0 * a), 4),
            im: round_to((-discriminant).sqrt() / (2.0 * a), 4),
        })
    }
}

/// Why a quadratic could not be factored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnfactorableReason {
    /// Negative discriminant
    ComplexRoots,
    /// Real but non-integer roots
    NonIntegerRoots,
}

/// Result of factoring ax² + bx + c over the integers.
#[derive(Debug, Clone, PartialEq)]
pub enum Factorization {
    Factored(String),
    Unfactorable {
        expression: String,
        reason: UnfactorableReason,
    },
}

impl fmt::Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factored(s) => write!(f, "{}", s),
            Self::Unfactorable { expression, reason } => match reason {
                UnfactorableReason::ComplexRoots => {
                    write!(f, "{} (cannot factor over reals)", expression)
                }
                UnfactorableReason::NonIntegerRoots => {
                    write!(f, "{} (no integer factoring)", expression)
                }
            },
        }
    }
}

/// Factor ax² + bx + c via its roots. Integer roots with a = 1 give the
/// plain binomial product; integer roots otherwise carry the leading
/// coefficient; anything else is reported as unfactorable with the reason.
pub fn factor_quadratic(a: i64, b: i64, c: i64) -> Factorization {
    let discriminant = b * b - 4 * a * c;

    if discriminant < 0 {
        return Factorization::Unfactorable {
            expression: format!("{}x\u{00b2} + {}x + {}", a, b, c),
            reason: UnfactorableReason::ComplexRoots,
        };
    }

    let af = a as f64;
    let bf = b as f64;
    let root = (discriminant as f64).sqrt();
    let x1 = (-bf + root) / (2.0 * af);
    let x2 = (-bf - root) / (2.0 * af);

    let is_int = |x: f64| (x - x.round()).abs() < 1e-4;

    if a == 1 && is_int(x1) && is_int(x2) {
        let r1 = x1.round() as i64;
        let r2 = x2.round() as i64;
        let term = |r: i64| {
            if r == 0 {
                "x".to_string()
            } else if r > 0 {
                format!("(x - {})", r)
            } else {
                format!("(x + {})", r.abs())
            }
        };
        return Factorization::Factored(format!("{}{}", term(r1), term(r2)));
    }

    if is_int(x1) && is_int(x2) {
        let r1 = x1.round() as i64;
        let r2 = x2.round() as i64;
        let prefix = if a == 1 { String::new() } else { a.to_string() };
        let term = |r: i64| {
            if r >= 0 {
                format!("(x - {})", r)
            } else {
                format!("(x + {})", r.abs())
            }
        };
        return Factorization::Factored(format!("{}{}{}", prefix, term(r1), term(r2)));
    }

    Factorization::Unfactorable {
        expression: pretty_quadratic(a, b, c),
        reason: UnfactorableReason::NonIntegerRoots,
    }
}

/// Sign-aware rendering of ax² + bx + c.
fn pretty_quadratic(a: i64, b: i64, c: i64) -> String {
    let mut s = String::new();
    if a != 0 {
        match a {
            1 => s.push_str("x\u{00b2}"),
            -1 => s.push_str("-x\u{00b2}"),
            _ => s.push_str(&format!("{}x\u{00b2}", a)),
        }
    }
    if b > 0 {
        if b == 1 {
            s.push_str(" + x");
        } else {
            s.push_str(&format!(" + {}x", b));
        }
    } else if b < 0 {
        if b == -1 {
            s.push_str(" - x");
        } else {
            s.push_str(&format!(" - {}x", b.abs()));
        }
    }
    if c > 0 {
        s.push_str(&format!(" + {}", c));
    } else if c < 0 {
        s.push_str(&format!(" - {}", c.abs()));
    }
    s.trim().to_string()
}

/// Solve a 2x2 linear system with Cramer's rule:
/// a1·x + b1·y = c1, a2·x + b2·y = c2.
/// Returns `None` when the determinant is zero (parallel or coincident
/// lines) — the division never happens.
pub fn solve_system_2x2(
    a1: f64,
    b1: f64,
    c1: f64,
    a2: f64,
    b2: f64,
    c2: f64,
) -> Option<(f64, f64)> {
    let det = a1 * b2 - a2 * b1;
    if det == 0.0 {
        return None;
    }
    let x = (c1 * b2 - c2 * b1) / det;
    let y = (a1 * c2 - a2 * c1) / det;
    Some((x, y))
}

/// Expand (ax + b)(cx + d) by FOIL into (x² coeff, x coeff, constant).
pub fn expand_binomials(a: i64, b: i64, c: i64, d: i64) -> (i64, i64, i64) {
    (a * c, a * d + b * c, b * d)
}

/// Format ax² + bx + c with `x**2` power notation, eliding zero terms
/// and unit coefficients.
pub fn format_polynomial(a: i64, b: i64, c: i64) -> String {
    let mut parts: Vec<String> = Vec::new();

    if a != 0 {
        parts.push(match a {
            1 => "x**2".to_string(),
            -1 => "-x**2".to_string(),
            _ => format!("{}*x**2", a),
        });
    }

    if b != 0 {
        if parts.is_empty() {
            parts.push(match b {
                1 => "x".to_string(),
                -1 => "-x".to_string(),
                _ => format!("{}*x", b),
            });
        } else {
            parts.push(match b {
                1 => "+ x".to_string(),
                -1 => "- x".to_string(),
                _ if b > 0 => format!("+ {}*x", b),
                _ => format!("- {}*x", b.abs()),
            });
        }
    }

    if c != 0 {
        if parts.is_empty() {
            parts.push(c.to_string());
        } else if c > 0 {
            parts.push(format!("+ {}", c));
        } else {
            parts.push(format!("- {}", c.abs()));
        }
    }

    if parts.is_empty() {
        return "0".to_string();
    }
    parts.join(" ")
}

/// Format a + bi, collapsing pure-real, pure-imaginary and unit
/// coefficients the way they are written by hand.
pub fn format_complex(z: Complex<i64>) -> String {
    let (re, im) = (z.re, z.im);
    if im == 0 {
        return re.to_string();
    }
    if re == 0 {
        return match im {
            1 => "i".to_string(),
            -1 => "-i".to_string(),
            _ => format!("{}i", im),
        };
    }
    if im > 0 {
        if im == 1 {
            format!("{} + i", re)
        } else {
            format!("{} + {}i", re, im)
        }
    } else if im == -1 {
        format!("{} - i", re)
    } else {
        format!("{} - {}i", re, im.abs())
    }
}

// --- Problem generators ---

/// The left side of x² + bx + c with zero terms elided, for question text.
fn quadratic_lhs(b: i64, c: i64) -> String {
    let mut s = "x\u{00b2}".to_string();
    if b > 0 {
        s.push_str(&format!(" + {}x", b));
    } else if b < 0 {
        s.push_str(&format!(" - {}x", b.abs()));
    }
    if c > 0 {
        s.push_str(&format!(" + {}", c));
    } else if c < 0 {
        s.push_str(&format!(" - {}", c.abs()));
    }
    s
}

/// Quadratic solve/factor problems, built backward from integer roots
/// in -6..=6 so every answer is exact.
pub fn generate_quadratic_problems(_grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let r1: i64 = rng.gen_range(-6..=6);
        let r2: i64 = rng.gen_range(-6..=6);
        let b = -(r1 + r2);
        let c = r1 * r2;
        let lhs = quadratic_lhs(b, c);

        if *["solve", "factor"].choose(rng).unwrap_or(&"solve") == "solve" {
            let answer = if r1 != r2 {
                let (lo, hi) = (r1.min(r2), r1.max(r2));
                format!("x = {}, x = {}", lo, hi)
            } else {
                format!("x = {}", r1)
            };
            problems.push(Problem::fill_in(
                format!("Solve: {} = 0", lhs),
                answer,
                "Try factoring or use the quadratic formula: x = (-b \u{00b1} \u{221a}(b\u{00b2}-4ac)) / 2a",
            ));
        } else {
            let factored = factor_quadratic(1, b, c);
            problems.push(Problem::fill_in(
                format!("Factor: {}", lhs),
                factored.to_string(),
                "Find two numbers that multiply to give c and add to give b.",
            ));
        }
    }
    problems
}

/// 2x2 system problems with a guaranteed unique solution.
pub fn generate_system_problems(_grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let coeff_choices = [1i64, 2, 3, -1, -2];
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let sol_x: i64 = rng.gen_range(-5..=5);
        let sol_y: i64 = rng.gen_range(-5..=5);

        let a1 = *coeff_choices.choose(rng).unwrap_or(&1);
        let b1 = *coeff_choices.choose(rng).unwrap_or(&1);
        let c1 = a1 * sol_x + b1 * sol_y;

        let mut a2 = *coeff_choices.choose(rng).unwrap_or(&1);
        let mut b2 = *coeff_choices.choose(rng).unwrap_or(&1);
        // Retry until the lines are not parallel
        while a1 * b2 == a2 * b1 {
            a2 = *coeff_choices.choose(rng).unwrap_or(&1);
            b2 = *coeff_choices.choose(rng).unwrap_or(&1);
        }
        let c2 = a2 * sol_x + b2 * sol_y;

        let fmt_eq = |a: i64, b: i64, c: i64| {
            let mut parts: Vec<String> = Vec::new();
            parts.push(match a {
                1 => "x".to_string(),
                -1 => "-x".to_string(),
                _ => format!("{}x", a),
            });
            parts.push(match b {
                1 => "+ y".to_string(),
                -1 => "- y".to_string(),
                _ if b > 0 => format!("+ {}y", b),
                _ => format!("- {}y", b.abs()),
            });
            format!("{} = {}", parts.join(" "), c)
        };

        problems.push(Problem::fill_in(
            format!("Solve the system:\n{}\n{}", fmt_eq(a1, b1, c1), fmt_eq(a2, b2, c2)),
            format!("x = {}, y = {}", sol_x, sol_y),
            "Try substitution or elimination to solve for one variable first.",
        ));
    }
    problems
}

/// Polynomial expansion and simplification problems.
pub fn generate_polynomial_problems(_grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        if *["expand", "simplify"].choose(rng).unwrap_or(&"expand") == "expand" {
            let a: i64 = rng.gen_range(1..=3);
            let b: i64 = rng.gen_range(-5..=5);
            let c: i64 = rng.gen_range(1..=3);
            let d: i64 = rng.gen_range(-5..=5);

            let (qa, qb, qc) = expand_binomials(a, b, c, d);
            problems.push(Problem::fill_in(
                format!("Expand: ({}x + {})({}x + {})", a, b, c, d),
                format_polynomial(qa, qb, qc),
                "Use FOIL: First, Outer, Inner, Last, then combine like terms.",
            ));
        } else {
            let a: i64 = rng.gen_range(1..=3);
            let b: i64 = rng.gen_range(-5..=5);
            let c: i64 = rng.gen_range(-5..=5);
            let d: i64 = rng.gen_range(1..=3);
            let e: i64 = rng.gen_range(-5..=5);

            problems.push(Problem::fill_in(
                format!(
                    "Simplify: ({}x\u{00b2} + {}x + {}) + ({}x + {})",
                    a, b, c, d, e
                ),
                format_polynomial(a, b + d, c + e),
                "Combine like terms: group x\u{00b2} terms, x terms, and constants.",
            ));
        }
    }
    problems
}

/// Complex-number arithmetic problems (+, -, ×) with i² = -1.
pub fn generate_complex_number_problems(
    _grade: u8,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<Problem> {
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let z1 = Complex::new(rng.gen_range(-5i64..=5), rng.gen_range(-5i64..=5));
        let z2 = Complex::new(rng.gen_range(-5i64..=5), rng.gen_range(-5i64..=5));

        let op = *['+', '-', '*'].choose(rng).unwrap_or(&'+');
        let (result, question) = match op {
            '+' => (
                z1 + z2,
                format!("({} + {}i) + ({} + {}i)", z1.re, z1.im, z2.re, z2.im),
            ),
            '-' => (
                z1 - z2,
                format!("({} + {}i) - ({} + {}i)", z1.re, z1.im, z2.re, z2.im),
            ),
            _ => (
                z1 * z2,
                format!("({} + {}i) * ({} + {}i)", z1.re, z1.im, z2.re, z2.im),
            ),
        };

        problems.push(Problem::fill_in(
            format!("Compute: {}", question),
            format_complex(result),
            "Remember that i\u{00b2} = -1. Combine real and imaginary parts separately.",
        ));
    }
    problems
}
