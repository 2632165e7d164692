//! Linear algebra over one variable: equation solving, expression
//! evaluation with substitution, and the grade 6+ problem generators.

use std::fmt;

use evalexpr::ContextWithMutableVariables;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

use crate::error::EngineError;
use crate::fraction::Fraction;
use crate::problem::Problem;

/// One side of a linear equation reduced to `coeff * x + constant`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LinearExpr {
    pub coeff: f64,
    pub constant: f64,
}

/// Outcome of solving a single-variable linear equation.
#[derive(Debug, Clone, PartialEq)]
pub enum LinearSolution {
    /// Identity: every x satisfies the equation
    Infinite,
    /// Contradiction: no x satisfies the equation
    NoSolution,
    /// Exactly one solution
    One(SolutionValue),
}

/// A solution, preferring the cleanest representation available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolutionValue {
    Integer(i64),
    Rational(Fraction),
    Real(f64),
}

impl SolutionValue {
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Integer(n) => n as f64,
            Self::Rational(f) => f.to_f64(),
            Self::Real(v) => v,
        }
    }

    fn from_f64(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            return Self::Integer(value as i64);
        }
        match Fraction::approximate(value) {
            Some(f) => Self::Rational(f),
            None => Self::Real(value),
        }
    }
}

impl fmt::Display for SolutionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Rational(r) => write!(f, "{}/{}", r.numerator(), r.denominator()),
            Self::Real(v) => write!(f, "{}", v),
        }
    }
}

/// Solve a linear equation like "2x + 3 = 7" or "3x + 2 = x + 8".
pub fn solve_linear(equation: &str) -> Result<LinearSolution, EngineError> {
    let eq = equation
        .trim()
        .replace('\u{2212}', "-")
        .replace('\u{00d7}', "*")
        .replace('\u{00b2}', "^2");

    let sides: Vec<&str> = eq.split('=').collect();
    match sides.len() {
        0 | 1 => return Err(EngineError::MissingEquals),
        2 => {}
        _ => return Err(EngineError::MultipleEquals),
    }

    let left = parse_linear_expr(sides[0].trim())?;
    let right = parse_linear_expr(sides[1].trim())?;

    // left.coeff*x + left.constant = right.coeff*x + right.constant
    let coeff_diff = left.coeff - right.coeff;
    let const_diff = right.constant - left.constant;

    if coeff_diff == 0.0 {
        if const_diff == 0.0 {
            return Ok(LinearSolution::Infinite);
        }
        return Ok(LinearSolution::NoSolution);
    }

    Ok(LinearSolution::One(SolutionValue::from_f64(
        const_diff / coeff_diff,
    )))
}

/// Parse "2x + 3" into coefficient and constant.
///
/// Terms are split on '+' after every '-' is rewritten as "+-"; a true
/// leading minus is shielded with a sentinel so it stays attached to the
/// first term.
pub(crate) fn parse_linear_expr(expr: &str) -> Result<LinearExpr, EngineError> {
    let compact: String = expr.chars().filter(|c| !c.is_whitespace()).collect();

    let mut normalized = if let Some(rest) = compact.strip_prefix('-') {
        format!("~{}", rest)
    } else {
        compact
    };
    normalized = normalized.replace('-', "+-");
    if let Some(rest) = normalized.strip_prefix('~') {
        normalized = format!("-{}", rest);
    }

    let mut coeff = 0.0;
    let mut constant = 0.0;

    for term in normalized.split('+').filter(|t| !t.is_empty()) {
        if term.contains('x') {
            let coeff_str = term.replace('x', "");
            coeff += match coeff_str.as_str() {
                "" | "+" => 1.0,
                "-" => -1.0,
                other => other
                    .parse::<f64>()
                    .map_err(|_| EngineError::Expression(expr.to_string()))?,
            };
        } else {
            constant += term
                .parse::<f64>()
                .map_err(|_| EngineError::Expression(expr.to_string()))?;
        }
    }

    Ok(LinearExpr { coeff, constant })
}

/// Evaluate an expression like "2x + 3" or "x^2 + 1", substituting `x`
/// when a value is supplied. Supports implicit multiplication ("2x").
pub fn evaluate_expression(expr: &str, x_value: Option<f64>) -> Result<f64, EngineError> {
    let mut normalized = expr
        .trim()
        .replace('\u{00b2}', "^2")
        .replace('\u{00b3}', "^3")
        .replace('\u{2212}', "-")
        .replace('\u{00d7}', "*")
        .replace('\u{00f7}', "/");

    if let Ok(re) = Regex::new(r"(\d)x") {
        normalized = re.replace_all(&normalized, "${1}*x").into_owned();
    }

    let mut context = evalexpr::HashMapContext::<evalexpr::DefaultNumericTypes>::new();
    if let Some(x) = x_value {
        context
            .set_value("x".to_string(), evalexpr::Value::Float(x))
            .map_err(|e| EngineError::Expression(e.to_string()))?;
    }

    let value = evalexpr::eval_with_context(&normalized, &context)
        .map_err(|_| EngineError::Expression(expr.to_string()))?;
    value
        .as_number()
        .map_err(|_| EngineError::Expression(expr.to_string()))
}

// --- Problem generators ---

/// Linear equation problems, built backward from a chosen integer answer
/// so the stated algorithm always recovers it exactly.
pub fn generate_linear_equations(grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let (equation, answer) = if grade == 6 {
            // Simple: ax + b = c
            let a = *[1i64, 2, 3, 4, 5].choose(rng).unwrap_or(&1);
            let answer: i64 = rng.gen_range(-10..=10);
            let b: i64 = rng.gen_range(-10..=10);
            let c = a * answer + b;
            let equation = if a == 1 {
                if b >= 0 {
                    format!("x + {} = {}", b, c)
                } else {
                    format!("x - {} = {}", b.abs(), c)
                }
            } else if b >= 0 {
                format!("{}x + {} = {}", a, b, c)
            } else {
                format!("{}x - {} = {}", a, b.abs(), c)
            };
            (equation, answer)
        } else if grade == 7 {
            // ax + b = cx + d
            let a: i64 = rng.gen_range(2..=6);
            let c_coeff: i64 = rng.gen_range(1..=a - 1);
            let answer: i64 = rng.gen_range(-5..=10);
            let b: i64 = rng.gen_range(-10..=10);
            let d = a * answer + b - c_coeff * answer;
            (format!("{}x + {} = {}x + {}", a, b, c_coeff, d), answer)
        } else if grade == 8 {
            // Larger coefficients
            let a: i64 = rng.gen_range(2..=8);
            let b: i64 = rng.gen_range(-15..=15);
            let answer: i64 = rng.gen_range(-10..=10);
            let c = a * answer + b;
            let equation = if b >= 0 {
                format!("{}x + {} = {}", a, b, c)
            } else {
                format!("{}x - {} = {}", a, b.abs(), c)
            };
            (equation, answer)
        } else {
            // Multi-step with variables on both sides
            let a: i64 = rng.gen_range(2..=6);
            let b: i64 = rng.gen_range(-8..=8);
            let c_coeff: i64 = rng.gen_range(1..=4);
            let answer: i64 = rng.gen_range(-5..=10);
            let d = a * answer + b - c_coeff * answer;
            (format!("{}x + {} = {}x + {}", a, b, c_coeff, d), answer)
        };

        problems.push(Problem::fill_in(
            format!("Solve for x: {}", equation),
            answer.to_string(),
            "Isolate x by doing the same operation on both sides of the equation.",
        ));
    }
    problems
}

/// Expression evaluation problems ("If x = 4, what is 2x + 3?").
pub fn generate_expression_evaluation(grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let x_val: i64 = rng.gen_range(1..=10);
        let (expr, answer) = if grade <= 6 {
            let a: i64 = rng.gen_range(1..=5);
            let b: i64 = rng.gen_range(1..=10);
            (format!("{}x + {}", a, b), a * x_val + b)
        } else {
            let a: i64 = rng.gen_range(1..=5);
            let b: i64 = rng.gen_range(-5..=5);
            let c: i64 = rng.gen_range(-10..=10);
            if grade == 8 {
                (
                    format!("{}x\u{00b2} + {}x + {}", a, b, c),
                    a * x_val * x_val + b * x_val + c,
                )
            } else {
                (format!("{}x + {}", a, b), a * x_val + b)
            }
        };

        problems.push(Problem::fill_in(
            format!("If x = {}, what is {}?", x_val, expr),
            answer.to_string(),
            format!("Replace x with {} and calculate step by step.", x_val),
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
    fn test_parse_linear_expr() {
        let e = parse_linear_expr("2x + 3").unwrap();
        assert_eq!((e.coeff, e.constant), (2.0, 3.0));

        let e = parse_linear_expr("-x + 5").unwrap();
        assert_eq!((e.coeff, e.constant), (-1.0, 5.0));

        let e = parse_linear_expr("7").unwrap();
        assert_eq!((e.coeff, e.constant), (0.0, 7.0));

        let e = parse_linear_expr("3x - 2 - x").unwrap();
        assert_eq!((e.coeff, e.constant), (2.0, -2.0));

        assert!(parse_linear_expr("2y + bogus").is_err());
    }

    #[test]
    fn test_solve_linear_single_solution() {
        assert_eq!(
            solve_linear("2x + 3 = 7").unwrap(),
            LinearSolution::One(SolutionValue::Integer(2))
        );
        assert_eq!(
            solve_linear("x - 4 = 10").unwrap(),
            LinearSolution::One(SolutionValue::Integer(14))
        );
        assert_eq!(
            solve_linear("3x + 2 = x + 8").unwrap(),
            LinearSolution::One(SolutionValue::Integer(3))
        );
    }

    #[test]
    fn test_solve_linear_fractional_solution() {
        match solve_linear("2x = 1").unwrap() {
            LinearSolution::One(SolutionValue::Rational(f)) => {
                assert_eq!((f.numerator(), f.denominator()), (1, 2));
            }
            other => panic!("expected rational solution, got {:?}", other),
        }
    }

    #[test]
    fn test_solve_linear_degenerate_cases() {
        assert_eq!(solve_linear("x + 1 = x + 1").unwrap(), LinearSolution::Infinite);
        assert_eq!(solve_linear("x + 1 = x + 2").unwrap(), LinearSolution::NoSolution);
        assert_eq!(solve_linear("2x + 3"), Err(EngineError::MissingEquals));
        assert_eq!(solve_linear("1 = 2 = 3"), Err(EngineError::MultipleEquals));
    }

    #[test]
    fn test_evaluate_expression() {
        assert_eq!(evaluate_expression("2x + 3", Some(4.0)).unwrap(), 11.0);
        assert_eq!(evaluate_expression("x^2 + 1", Some(3.0)).unwrap(), 10.0);
        assert_eq!(evaluate_expression("3x\u{00b2} + 2", Some(2.0)).unwrap(), 14.0);
        assert_eq!(evaluate_expression("5 + 2", None).unwrap(), 7.0);
        assert!(evaluate_expression("x + 1", None).is_err());
    }

    #[test]
    fn test_generated_equations_solve_to_stated_answer() {
        let mut rng = StdRng::seed_from_u64(21);
        for grade in [6u8, 7, 8, 10] {
            for p in generate_linear_equations(grade, 20, &mut rng) {
                let equation = p.question.trim_start_matches("Solve for x: ");
                let expected: f64 = p.answer.parse().unwrap();
                match solve_linear(equation).unwrap() {
                    LinearSolution::One(v) => {
                        assert!((v.to_f64() - expected).abs() < 1e-9, "{}", equation)
                    }
                    other => panic!("expected one solution for {}, got {:?}", equation, other),
                }
            }
        }
    }
}
