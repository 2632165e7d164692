//! Arithmetic: safe expression evaluation and the four basic-operation
//! problem generators.
//!
//! All computation happens here, deterministically. The tutor's language
//! model is never trusted to do arithmetic.

use rand::Rng;

use crate::problem::Problem;

/// Evaluate an arithmetic expression, or `None` if it is malformed,
/// contains characters outside the whitelist, or divides by zero.
///
/// Unicode operators (×, ÷, −, en/em dash) are normalized to ASCII first.
/// Integer-only expressions are evaluated in exact integer arithmetic;
/// anything containing division is promoted to floats so `7/2` is 3.5,
/// not a truncated 3.
pub fn evaluate(expression: &str) -> Option<f64> {
    let mut expr = expression.trim().to_string();
    for (from, to) in [
        ("\u{00d7}", "*"),
        ("\u{00f7}", "/"),
        ("\u{2212}", "-"),
        ("\u{2013}", "-"),
        ("\u{2014}", "-"),
    ] {
        expr = expr.replace(from, to);
    }
    let expr = expr.trim();
    if expr.is_empty() {
        return None;
    }

    // Whitelist: digits, operators, parens, dots, scientific-notation e,
    // whitespace. Anything else never reaches the evaluator.
    if !expr
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || "+-*/().eE".contains(c))
    {
        tracing::debug!(expr, "rejected expression with unsupported characters");
        return None;
    }

    let prepared = if expr.contains('/') {
        promote_integers(expr)
    } else {
        expr.to_string()
    };

    let value = evalexpr::eval(&prepared).ok()?;
    let number = value.as_number().ok()?;
    number.is_finite().then_some(number)
}

/// Rewrite bare integer literals as floats ("7/2" → "7.0/2.0") so division
/// follows school semantics instead of truncating.
fn promote_integers(expr: &str) -> String {
    let chars: Vec<char> = expr.chars().collect();
    let mut out = String::with_capacity(expr.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let starts_number =
            c.is_ascii_digit() || (c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit());
        if starts_number {
            let start = i;
            let mut seen_dot = false;
            while i < chars.len() && (chars[i].is_ascii_digit() || (chars[i] == '.' && !seen_dot)) {
                if chars[i] == '.' {
                    seen_dot = true;
                }
                i += 1;
            }
            out.extend(&chars[start..i]);
            let next_is_exponent = i < chars.len() && (chars[i] == 'e' || chars[i] == 'E');
            if !seen_dot && !next_is_exponent {
                out.push_str(".0");
            }
            continue;
        }
        out.push(c);
        i += 1;
    }
    out
}

// --- Problem generators ---
//
// Operand ranges scale with the grade band; see each generator.

/// Addition problems. Operands: grade ≤1: 0–10; grade 2: 0–50;
/// grade ≤4: 10–500; above: 100–9999.
pub fn generate_addition(grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let (a, b): (i64, i64) = if grade <= 1 {
            (rng.gen_range(0..=10), rng.gen_range(0..=10))
        } else if grade == 2 {
            (rng.gen_range(0..=50), rng.gen_range(0..=50))
        } else if grade <= 4 {
            (rng.gen_range(10..=500), rng.gen_range(10..=500))
        } else {
            (rng.gen_range(100..=9999), rng.gen_range(100..=9999))
        };

        problems.push(
            Problem::fill_in(
                format!("What is {} + {}?", a, b),
                (a + b).to_string(),
                format!("Start by adding the ones place: {} + {}", a % 10, b % 10),
            )
            .with_operation(format!("{} + {}", a, b)),
        );
    }
    problems
}

/// Subtraction problems. The subtrahend is drawn from `0..=a` (or `1..=a`),
/// so the answer is never negative at any grade.
pub fn generate_subtraction(grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let (a, b): (i64, i64) = if grade <= 1 {
            let a = rng.gen_range(1..=10);
            (a, rng.gen_range(0..=a))
        } else if grade == 2 {
            let a = rng.gen_range(10..=100);
            (a, rng.gen_range(0..=a))
        } else if grade <= 4 {
            let a = rng.gen_range(50..=1000);
            (a, rng.gen_range(1..=a))
        } else {
            let a = rng.gen_range(100..=9999);
            (a, rng.gen_range(1..=a))
        };

        problems.push(
            Problem::fill_in(
                format!("What is {} - {}?", a, b),
                (a - b).to_string(),
                format!("Think: what plus {} equals {}?", b, a),
            )
            .with_operation(format!("{} - {}", a, b)),
        );
    }
    problems
}

/// Multiplication problems. Factors: grade ≤3: 1–10 × 1–10;
/// grade 4: 10–99 × 2–12; above: 10–999 × 2–99.
pub fn generate_multiplication(grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let (a, b): (i64, i64) = if grade <= 3 {
            (rng.gen_range(1..=10), rng.gen_range(1..=10))
        } else if grade == 4 {
            (rng.gen_range(10..=99), rng.gen_range(2..=12))
        } else {
            (rng.gen_range(10..=999), rng.gen_range(2..=99))
        };

        problems.push(
            Problem::fill_in(
                format!("What is {} \u{00d7} {}?", a, b),
                (a * b).to_string(),
                format!("Think of {} groups of {}", a, b),
            )
            .with_operation(format!("{} * {}", a, b)),
        );
    }
    problems
}

/// Division problems. The dividend is constructed as divisor × quotient,
/// so every answer is a whole number with no remainder.
pub fn generate_division(grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let (divisor, quotient): (i64, i64) = if grade <= 3 {
            (rng.gen_range(1..=10), rng.gen_range(1..=10))
        } else if grade == 4 {
            (rng.gen_range(2..=12), rng.gen_range(2..=25))
        } else {
            (rng.gen_range(2..=20), rng.gen_range(2..=50))
        };

        let dividend = divisor * quotient;
        problems.push(
            Problem::fill_in(
                format!("What is {} \u{00f7} {}?", dividend, divisor),
                quotient.to_string(),
                format!("Think: {} times what equals {}?", divisor, dividend),
            )
            .with_operation(format!("{} / {}", dividend, divisor)),
        );
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_evaluate_basics() {
        assert_eq!(evaluate("3 + 4 * 2"), Some(11.0));
        assert_eq!(evaluate("(3 + 4) * 2"), Some(14.0));
        assert_eq!(evaluate("7 / 2"), Some(3.5));
        assert_eq!(evaluate("10 - 12"), Some(-2.0));
    }

    #[test]
    fn test_evaluate_unicode_operators() {
        assert_eq!(evaluate("6 \u{00d7} 7"), Some(42.0));
        assert_eq!(evaluate("10 \u{00f7} 4"), Some(2.5));
        assert_eq!(evaluate("9 \u{2212} 4"), Some(5.0));
    }

    #[test]
    fn test_evaluate_rejects_unsafe_input() {
        assert_eq!(evaluate("2 + x"), None);
        assert_eq!(evaluate("system(\"rm\")"), None);
        assert_eq!(evaluate(""), None);
        assert_eq!(evaluate("2 +* 3"), None);
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        assert_eq!(evaluate("1 / 0"), None);
        assert_eq!(evaluate("5 / (3 - 3)"), None);
    }

    #[test]
    fn test_promote_integers() {
        assert_eq!(promote_integers("7/2"), "7.0/2.0");
        assert_eq!(promote_integers("1.5/3"), "1.5/3.0");
        assert_eq!(promote_integers("100/(8-3)"), "100.0/(8.0-3.0)");
    }

    #[test]
    fn test_subtraction_never_negative() {
        let mut rng = StdRng::seed_from_u64(3);
        for grade in [0u8, 1, 2, 4, 7, 12] {
            for p in generate_subtraction(grade, 30, &mut rng) {
                let answer: i64 = p.answer.parse().unwrap();
                assert!(answer >= 0, "negative answer for grade {}", grade);
            }
        }
    }

    #[test]
    fn test_division_always_exact() {
        let mut rng = StdRng::seed_from_u64(5);
        for grade in [1u8, 4, 9] {
            for p in generate_division(grade, 30, &mut rng) {
                let op = p.operation.unwrap();
                let mut parts = op.split(" / ");
                let dividend: i64 = parts.next().unwrap().parse().unwrap();
                let divisor: i64 = parts.next().unwrap().parse().unwrap();
                assert_eq!(dividend % divisor, 0);
                assert_eq!((dividend / divisor).to_string(), p.answer);
            }
        }
    }

    #[test]
    fn test_grade_bands_scale_operands() {
        let mut rng = StdRng::seed_from_u64(9);
        for p in generate_addition(1, 20, &mut rng) {
            let op = p.operation.unwrap();
            for side in op.split(" + ") {
                let v: i64 = side.parse().unwrap();
                assert!((0..=10).contains(&v));
            }
        }
    }
}
