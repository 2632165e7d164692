//! Step-by-step solver: re-derives a solution and narrates every step
//! of the derivation for the student.
//!
//! Each sub-solver reaches the same numeric result as the corresponding
//! solving module, then explains how. Failure paths always produce an
//! explicit "could not parse" trace instead of panicking, so the caller
//! can render a graceful fallback.

use std::f64::consts::PI;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::algebra::parse_linear_expr;
use crate::arithmetic;
use crate::error::EngineError;
use crate::fraction::gcd;
use crate::util::{format_number, round_to};

/// An ordered, human-readable derivation with its final answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionTrace {
    pub steps: Vec<String>,
    pub answer: String,
}

impl SolutionTrace {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            steps: vec![message.into()],
            answer: "Unknown".to_string(),
        }
    }
}

/// Problem families the solver knows how to narrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemDomain {
    Arithmetic,
    Fraction,
    Equation,
    Geometry,
    Quadratic,
    Trig,
    Logarithm,
}

impl ProblemDomain {
    /// Map a caller-declared type string onto a domain.
    /// Unknown strings fall back to arithmetic.
    pub fn parse(kind: &str) -> Self {
        match kind.trim().to_lowercase().as_str() {
            "fraction" | "fractions" => Self::Fraction,
            "equation" | "linear" | "algebra" => Self::Equation,
            "area" | "perimeter" | "geometry" => Self::Geometry,
            "quadratic" => Self::Quadratic,
            "trig" | "trigonometry" => Self::Trig,
            "logarithm" | "log" => Self::Logarithm,
            _ => Self::Arithmetic,
        }
    }
}

/// Produce a step-by-step solution for `problem`, interpreted as `kind`.
pub fn solve_steps(problem: &str, kind: &str) -> SolutionTrace {
    let problem = problem.trim();
    let domain = ProblemDomain::parse(kind);
    tracing::debug!(?domain, "solving step by step");

    match domain {
        ProblemDomain::Arithmetic => solve_arithmetic(problem),
        ProblemDomain::Fraction => solve_fraction(problem),
        ProblemDomain::Equation => solve_equation(problem),
        ProblemDomain::Geometry => solve_geometry(problem),
        ProblemDomain::Quadratic => solve_quadratic_steps(problem),
        ProblemDomain::Trig => solve_trig(problem),
        ProblemDomain::Logarithm => solve_logarithm(problem),
    }
}

// --- Arithmetic ---

fn solve_arithmetic(problem: &str) -> SolutionTrace {
    let mut expr = problem
        .replace('\u{00d7}', "*")
        .replace('\u{00f7}', "/")
        .replace('\u{2212}', "-");
    if let Ok(re) = Regex::new(r"(?i)what is\s*") {
        expr = re.replace_all(&expr, "").into_owned();
    }
    let expr = expr.replace('?', "");
    let expr = expr.trim();

    match arithmetic::evaluate(expr) {
        Some(result) => SolutionTrace {
            steps: vec![
                format!("Start with: {}", problem),
                format!("Calculate: {}", expr),
                format!("The answer is: {}", format_number(result)),
            ],
            answer: format_number(result),
        },
        None => SolutionTrace::failed("Could not parse the expression."),
    }
}

// --- Fractions ---

fn solve_fraction(problem: &str) -> SolutionTrace {
    let Ok(re) = Regex::new(r"(\d+)\s*/\s*(\d+)") else {
        return SolutionTrace::failed("Could not parse the expression.");
    };

    let found: Vec<(i64, i64, usize, usize)> = re
        .captures_iter(problem)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some((
                caps[1].parse().ok()?,
                caps[2].parse().ok()?,
                whole.start(),
                whole.end(),
            ))
        })
        .collect();

    if found.len() < 2 {
        return solve_arithmetic(problem);
    }

    let (a_n, a_d, _, a_end) = found[0];
    let (b_n, b_d, b_start, _) = found[1];
    if a_d == 0 || b_d == 0 {
        return SolutionTrace {
            steps: vec!["Cannot divide by zero.".to_string()],
            answer: "undefined".to_string(),
        };
    }

    // The operator sits between the two fractions
    let between = &problem[a_end..b_start];
    let op = if between.contains('+') {
        '+'
    } else if between.contains('-') || between.contains('\u{2212}') {
        '-'
    } else if between.contains('\u{00d7}') || between.contains('*') {
        '\u{00d7}'
    } else if between.contains('\u{00f7}') {
        '\u{00f7}'
    } else {
        '+'
    };

    let mut steps = vec![format!("Start with: {}/{} {} {}/{}", a_n, a_d, op, b_n, b_d)];

    let (mut result_n, mut result_d) = match op {
        '+' | '-' => {
            if a_d != b_d {
                let lcd = a_d * b_d / gcd(a_d, b_d);
                let new_a = a_n * (lcd / a_d);
                let new_b = b_n * (lcd / b_d);
                steps.push(format!("Find common denominator: {}", lcd));
                steps.push(format!("Convert: {}/{} {} {}/{}", new_a, lcd, op, new_b, lcd));
                if op == '+' {
                    (new_a + new_b, lcd)
                } else {
                    (new_a - new_b, lcd)
                }
            } else {
                steps.push(format!("Same denominator: {}", a_d));
                if op == '+' {
                    (a_n + b_n, a_d)
                } else {
                    (a_n - b_n, a_d)
                }
            }
        }
        '\u{00d7}' => {
            steps.push(format!(
                "Multiply numerators: {} \u{00d7} {} = {}",
                a_n, b_n, a_n * b_n
            ));
            steps.push(format!(
                "Multiply denominators: {} \u{00d7} {} = {}",
                a_d, b_d, a_d * b_d
            ));
            (a_n * b_n, a_d * b_d)
        }
        _ => {
            if b_n == 0 {
                return SolutionTrace {
                    steps: vec!["Cannot divide by zero.".to_string()],
                    answer: "undefined".to_string(),
                };
            }
            steps.push(format!("Flip the second fraction: {}/{}", b_d, b_n));
            steps.push(format!(
                "Then multiply: {}/{} \u{00d7} {}/{}",
                a_n, a_d, b_d, b_n
            ));
            (a_n * b_d, a_d * b_n)
        }
    };

    // Simplify
    let g = gcd(result_n, result_d);
    if g != 0 {
        result_n /= g;
        result_d /= g;
    }
    if result_d < 0 {
        result_n = -result_n;
        result_d = -result_d;
    }

    let answer = if result_d == 1 {
        result_n.to_string()
    } else if result_n.abs() > result_d {
        let whole = result_n.abs() / result_d;
        let rem = result_n.abs() % result_d;
        let sign = if result_n < 0 { -1 } else { 1 };
        if rem == 0 {
            (sign * whole).to_string()
        } else {
            let mixed = format!("{} {}/{}", sign * whole, rem, result_d);
            steps.push(format!("Convert to mixed number: {}", mixed));
            mixed
        }
    } else {
        format!("{}/{}", result_n, result_d)
    };

    steps.push(format!("Answer: {}", answer));
    SolutionTrace { steps, answer }
}

// --- Linear equations ---

fn solve_equation(problem: &str) -> SolutionTrace {
    let mut eq = problem.to_string();
    for prefix in ["Solve for x:", "Solve:"] {
        if let Ok(re) = Regex::new(&format!("(?i){}", regex::escape(prefix))) {
            eq = re.replace(&eq, "").into_owned();
        }
    }
    let eq = eq.trim();

    if !eq.contains('=') {
        return SolutionTrace {
            steps: vec!["No equals sign found.".to_string()],
            answer: "Unknown".to_string(),
        };
    }

    let sides: Vec<&str> = eq.splitn(2, '=').collect();
    let (left, right) = match (
        parse_linear_expr(sides[0].trim()),
        parse_linear_expr(sides[1].trim()),
    ) {
        (Ok(l), Ok(r)) => (l, r),
        (Err(e), _) | (_, Err(e)) => {
            return SolutionTrace::failed(format!("Could not solve: {}", e));
        }
    };

    let mut steps = vec![format!("Start with: {}", eq)];

    let coeff_diff = left.coeff - right.coeff;
    let const_diff = right.constant - left.constant;

    if left.coeff != 0.0 && right.coeff != 0.0 {
        steps.push(format!(
            "Move x terms to one side: {}x = {}",
            format_number(coeff_diff),
            format_number(const_diff)
        ));
    } else if left.constant != 0.0 {
        steps.push(format!(
            "Subtract {} from both sides",
            format_number(left.constant)
        ));
    }

    if coeff_diff == 0.0 {
        if const_diff == 0.0 {
            steps.push("This is an identity - all values of x work.".to_string());
            return SolutionTrace {
                steps,
                answer: "all real numbers".to_string(),
            };
        }
        steps.push("No solution exists.".to_string());
        return SolutionTrace {
            steps,
            answer: "no solution".to_string(),
        };
    }

    if coeff_diff != 1.0 {
        steps.push(format!("Divide both sides by {}", format_number(coeff_diff)));
    }

    let answer = const_diff / coeff_diff;
    let answer_str = format_number(round_to(answer, 4));
    steps.push(format!("x = {}", answer_str));

    SolutionTrace {
        steps,
        answer: answer_str,
    }
}

// --- Geometry ---

/// Fuzzy keyword dispatch over shape + metric, with positional number
/// extraction. This is deliberately loose; phrasing it cannot place
/// yields an explicit failure rather than a wrong answer.
fn solve_geometry(problem: &str) -> SolutionTrace {
    let lower = problem.to_lowercase();

    let nums: Vec<f64> = match Regex::new(r"\d+\.?\d*") {
        Ok(re) => re
            .find_iter(problem)
            .filter_map(|m| m.as_str().parse().ok())
            .collect(),
        Err(_) => Vec::new(),
    };

    if lower.contains("area") && lower.contains("rectangle") && nums.len() >= 2 {
        let area = nums[0] * nums[1];
        return SolutionTrace {
            steps: vec![
                "Area of a rectangle = length \u{00d7} width".to_string(),
                format!("= {} \u{00d7} {}", format_number(nums[0]), format_number(nums[1])),
                format!("= {}", format_number(area)),
            ],
            answer: format_number(area),
        };
    }

    if lower.contains("perimeter") && lower.contains("rectangle") && nums.len() >= 2 {
        let perimeter = 2.0 * (nums[0] + nums[1]);
        return SolutionTrace {
            steps: vec![
                "Perimeter of a rectangle = 2 \u{00d7} (length + width)".to_string(),
                format!("= 2 \u{00d7} ({} + {})", format_number(nums[0]), format_number(nums[1])),
                format!("= 2 \u{00d7} {}", format_number(nums[0] + nums[1])),
                format!("= {}", format_number(perimeter)),
            ],
            answer: format_number(perimeter),
        };
    }

    if lower.contains("area") && lower.contains("triangle") && nums.len() >= 2 {
        let area = nums[0] * nums[1] / 2.0;
        return SolutionTrace {
            steps: vec![
                "Area of a triangle = (base \u{00d7} height) \u{00f7} 2".to_string(),
                format!("= ({} \u{00d7} {}) \u{00f7} 2", format_number(nums[0]), format_number(nums[1])),
                format!("= {} \u{00f7} 2", format_number(nums[0] * nums[1])),
                format!("= {}", format_number(area)),
            ],
            answer: format_number(area),
        };
    }

    if lower.contains("area") && lower.contains("circle") && !nums.is_empty() {
        let area = round_to(PI * nums[0] * nums[0], 2);
        return SolutionTrace {
            steps: vec![
                "Area of a circle = \u{03c0}r\u{00b2}".to_string(),
                format!("= \u{03c0} \u{00d7} {}\u{00b2}", format_number(nums[0])),
                format!("= \u{03c0} \u{00d7} {}", format_number(nums[0] * nums[0])),
                format!("= {}", format_number(area)),
            ],
            answer: format_number(area),
        };
    }

    if lower.contains("circumference") && lower.contains("circle") && !nums.is_empty() {
        let circ = round_to(2.0 * PI * nums[0], 2);
        return SolutionTrace {
            steps: vec![
                "Circumference = 2\u{03c0}r".to_string(),
                format!("= 2 \u{00d7} \u{03c0} \u{00d7} {}", format_number(nums[0])),
                format!("= {}", format_number(circ)),
            ],
            answer: format_number(circ),
        };
    }

    if lower.contains("volume") && (lower.contains("prism") || lower.contains("box")) && nums.len() >= 3
    {
        let vol = nums[0] * nums[1] * nums[2];
        return SolutionTrace {
            steps: vec![
                "Volume = length \u{00d7} width \u{00d7} height".to_string(),
                format!(
                    "= {} \u{00d7} {} \u{00d7} {}",
                    format_number(nums[0]),
                    format_number(nums[1]),
                    format_number(nums[2])
                ),
                format!("= {}", format_number(vol)),
            ],
            answer: format_number(vol),
        };
    }

    if lower.contains("volume") && lower.contains("cylinder") && nums.len() >= 2 {
        let vol = round_to(PI * nums[0] * nums[0] * nums[1], 2);
        return SolutionTrace {
            steps: vec![
                "Volume of cylinder = \u{03c0}r\u{00b2}h".to_string(),
                format!(
                    "= \u{03c0} \u{00d7} {}\u{00b2} \u{00d7} {}",
                    format_number(nums[0]),
                    format_number(nums[1])
                ),
                format!(
                    "= \u{03c0} \u{00d7} {} \u{00d7} {}",
                    format_number(nums[0] * nums[0]),
                    format_number(nums[1])
                ),
                format!("= {}", format_number(vol)),
            ],
            answer: format_number(vol),
        };
    }

    if lower.contains("volume") && lower.contains("cone") && nums.len() >= 2 {
        let vol = round_to((1.0 / 3.0) * PI * nums[0] * nums[0] * nums[1], 2);
        return SolutionTrace {
            steps: vec![
                "Volume of cone = (1/3)\u{03c0}r\u{00b2}h".to_string(),
                format!(
                    "= (1/3) \u{00d7} \u{03c0} \u{00d7} {}\u{00b2} \u{00d7} {}",
                    format_number(nums[0]),
                    format_number(nums[1])
                ),
                format!("= {}", format_number(vol)),
            ],
            answer: format_number(vol),
        };
    }

    if lower.contains("volume") && lower.contains("sphere") && !nums.is_empty() {
        let vol = round_to((4.0 / 3.0) * PI * nums[0].powi(3), 2);
        return SolutionTrace {
            steps: vec![
                "Volume of sphere = (4/3)\u{03c0}r\u{00b3}".to_string(),
                format!("= (4/3) \u{00d7} \u{03c0} \u{00d7} {}\u{00b3}", format_number(nums[0])),
                format!("= {}", format_number(vol)),
            ],
            answer: format_number(vol),
        };
    }

    if lower.contains("surface area") && lower.contains("sphere") && !nums.is_empty() {
        let sa = round_to(4.0 * PI * nums[0] * nums[0], 2);
        return SolutionTrace {
            steps: vec![
                "Surface area of sphere = 4\u{03c0}r\u{00b2}".to_string(),
                format!("= 4 \u{00d7} \u{03c0} \u{00d7} {}\u{00b2}", format_number(nums[0])),
                format!("= {}", format_number(sa)),
            ],
            answer: format_number(sa),
        };
    }

    if (lower.contains("pythagorean") || lower.contains("hypotenuse") || lower.contains("right triangle"))
        && nums.len() >= 2
    {
        let sum = nums[0] * nums[0] + nums[1] * nums[1];
        let c = round_to(sum.sqrt(), 2);
        return SolutionTrace {
            steps: vec![
                "Using Pythagorean theorem: a\u{00b2} + b\u{00b2} = c\u{00b2}".to_string(),
                format!("= {}\u{00b2} + {}\u{00b2}", format_number(nums[0]), format_number(nums[1])),
                format!(
                    "= {} + {}",
                    format_number(nums[0] * nums[0]),
                    format_number(nums[1] * nums[1])
                ),
                format!("= {}", format_number(sum)),
                format!("c = \u{221a}{} = {}", format_number(sum), format_number(c)),
            ],
            answer: format_number(c),
        };
    }

    SolutionTrace::failed("Could not parse geometry problem.")
}

// --- Quadratics ---

fn solve_quadratic_steps(problem: &str) -> SolutionTrace {
    let mut eq = problem.to_string();
    for prefix in ["Solve:", "Solve for x:"] {
        if let Ok(re) = Regex::new(&format!("(?i){}", regex::escape(prefix))) {
            eq = re.replace(&eq, "").into_owned();
        }
    }
    let eq = eq.trim().replace('\u{00b2}', "^2");

    let (left_str, right_str) = match eq.split_once('=') {
        Some((l, r)) => (l.trim().to_string(), r.trim().to_string()),
        None => (eq.clone(), "0".to_string()),
    };

    let (left, right) = match (
        parse_quadratic_expr(&left_str),
        parse_quadratic_expr(&right_str),
    ) {
        (Ok(l), Ok(r)) => (l, r),
        (Err(e), _) | (_, Err(e)) => {
            return SolutionTrace::failed(format!("Could not solve quadratic: {}", e));
        }
    };

    let a = left.0 - right.0;
    let b = left.1 - right.1;
    let c = left.2 - right.2;

    if a == 0.0 {
        return SolutionTrace {
            steps: vec![
                "The x\u{00b2} coefficient is 0, so this is not a quadratic equation.".to_string(),
            ],
            answer: "undefined".to_string(),
        };
    }

    let mut steps = vec![
        format!("Start with: {}", eq),
        format!(
            "Standard form: {}x\u{00b2} + {}x + {} = 0",
            format_number(a),
            format_number(b),
            format_number(c)
        ),
        "Using quadratic formula: x = (-b \u{00b1} \u{221a}(b\u{00b2}-4ac)) / 2a".to_string(),
        format!(
            "a = {}, b = {}, c = {}",
            format_number(a),
            format_number(b),
            format_number(c)
        ),
    ];

    let discriminant = b * b - 4.0 * a * c;
    steps.push(format!(
        "Discriminant = b\u{00b2} - 4ac = {}\u{00b2} - 4({})({}) = {}",
        format_number(b),
        format_number(a),
        format_number(c),
        format_number(discriminant)
    ));

    let clean = |v: f64| format_number(round_to(v, 4));

    let answer;
    if discriminant > 0.0 {
        let x1 = (-b + discriminant.sqrt()) / (2.0 * a);
        let x2 = (-b - discriminant.sqrt()) / (2.0 * a);
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        steps.push(format!(
            "Two real solutions: x = {}, x = {}",
            clean(lo),
            clean(hi)
        ));
        answer = format!("x = {}, x = {}", clean(lo), clean(hi));
    } else if discriminant == 0.0 {
        let x = -b / (2.0 * a);
        steps.push(format!("One repeated solution: x = {}", clean(x)));
        answer = format!("x = {}", clean(x));
    } else {
        let re_part = -b / (2.0 * a);
        let im_part = (-discriminant).sqrt() / (2.0 * a);
        steps.push(format!(
            "Two complex solutions: x = {} + {}i, x = {} - {}i",
            clean(re_part),
            clean(im_part),
            clean(re_part),
            clean(im_part)
        ));
        answer = format!(
            "x = {} + {}i, x = {} - {}i",
            clean(re_part),
            clean(im_part),
            clean(re_part),
            clean(im_part)
        );
    }

    SolutionTrace { steps, answer }
}

/// Parse "ax^2 + bx + c" into its three coefficients.
fn parse_quadratic_expr(expr: &str) -> Result<(f64, f64, f64), EngineError> {
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

    let mut a = 0.0;
    let mut b = 0.0;
    let mut c = 0.0;

    for term in normalized.split('+').filter(|t| !t.is_empty()) {
        if term.contains("x^2") || term.contains("x\u{00b2}") {
            let coeff = term.replace("x^2", "").replace("x\u{00b2}", "");
            a += parse_coefficient(&coeff, expr)?;
        } else if term.contains('x') {
            let coeff = term.replace('x', "");
            b += parse_coefficient(&coeff, expr)?;
        } else {
            c += term
                .parse::<f64>()
                .map_err(|_| EngineError::Expression(expr.to_string()))?;
        }
    }

    Ok((a, b, c))
}

fn parse_coefficient(coeff: &str, expr: &str) -> Result<f64, EngineError> {
    match coeff {
        "" | "+" => Ok(1.0),
        "-" => Ok(-1.0),
        other => other
            .parse()
            .map_err(|_| EngineError::Expression(expr.to_string())),
    }
}

// --- Trigonometry ---

fn solve_trig(problem: &str) -> SolutionTrace {
    let lower = problem.to_lowercase();

    for func in ["sin", "cos", "tan"] {
        let Ok(re) = Regex::new(&format!(r"{}\s*\(\s*(\d+)\s*\u{{00b0}}?\s*\)", func)) else {
            continue;
        };
        let Some(caps) = re.captures(&lower) else {
            continue;
        };
        let Ok(angle) = caps[1].parse::<i64>() else {
            continue;
        };

        let rad = angle as f64 * PI / 180.0;
        let value = match func {
            "sin" => round_to(rad.sin(), 6),
            "cos" => round_to(rad.cos(), 6),
            _ => {
                if angle.rem_euclid(180) == 90 {
                    return SolutionTrace {
                        steps: vec![format!("{}({}\u{00b0}) is undefined", func, angle)],
                        answer: "undefined".to_string(),
                    };
                }
                round_to(rad.tan(), 6)
            }
        };

        return SolutionTrace {
            steps: vec![
                format!("Find {}({}\u{00b0})", func, angle),
                format!(
                    "Convert to radians: {}\u{00b0} = {} radians",
                    angle,
                    format_number(round_to(rad, 4))
                ),
                format!("{}({}\u{00b0}) = {}", func, angle, format_number(value)),
            ],
            answer: format_number(value),
        };
    }

    SolutionTrace::failed("Could not parse trig problem.")
}

// --- Logarithms ---

fn solve_logarithm(problem: &str) -> SolutionTrace {
    // "log_2(8)", "log2(8)", "log_10(100)"
    if let Ok(re) = Regex::new(r"log_?\s*(\d+)\s*\(\s*(\d+)\s*\)") {
        if let Some(caps) = re.captures(problem) {
            let base: i64 = match caps[1].parse() {
                Ok(b) => b,
                Err(_) => return SolutionTrace::failed("Could not parse logarithm problem."),
            };
            let arg: i64 = match caps[2].parse() {
                Ok(a) => a,
                Err(_) => return SolutionTrace::failed("Could not parse logarithm problem."),
            };
            if base <= 1 || arg <= 0 {
                return SolutionTrace {
                    steps: vec![format!("log_{}({}) is undefined", base, arg)],
                    answer: "undefined".to_string(),
                };
            }

            let result = round_to((arg as f64).ln() / (base as f64).ln(), 6);

            let mut steps = vec![
                format!("Evaluate log_{}({})", base, arg),
                format!("Ask: {} raised to what power equals {}?", base, arg),
            ];

            if result.fract() == 0.0 {
                let exact = result as i64;
                steps.push(format!("{}^{} = {}", base, exact, arg));
                steps.push(format!("Answer: {}", exact));
                return SolutionTrace {
                    steps,
                    answer: exact.to_string(),
                };
            }

            steps.push(format!("log_{}({}) \u{2248} {}", base, arg, result));
            return SolutionTrace {
                steps,
                answer: format_number(result),
            };
        }
    }

    // Natural log: "ln(5)", "ln(2.718)"
    if let Ok(re) = Regex::new(r"ln\s*\(\s*(\d+\.?\d*)\s*\)") {
        if let Some(caps) = re.captures(problem) {
            if let Ok(arg) = caps[1].parse::<f64>() {
                let result = round_to(arg.ln(), 6);
                return SolutionTrace {
                    steps: vec![
                        format!("Evaluate ln({})", format_number(arg)),
                        format!("ln({}) \u{2248} {}", format_number(arg), format_number(result)),
                    ],
                    answer: format_number(result),
                };
            }
        }
    }

    SolutionTrace::failed("Could not parse logarithm problem.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_parsing() {
        assert_eq!(ProblemDomain::parse("fraction"), ProblemDomain::Fraction);
        assert_eq!(ProblemDomain::parse("Algebra"), ProblemDomain::Equation);
        assert_eq!(ProblemDomain::parse("log"), ProblemDomain::Logarithm);
        assert_eq!(ProblemDomain::parse("addition"), ProblemDomain::Arithmetic);
        assert_eq!(ProblemDomain::parse("gibberish"), ProblemDomain::Arithmetic);
    }

    #[test]
    fn test_arithmetic_steps() {
        let trace = solve_steps("What is 3 + 4 \u{00d7} 2?", "arithmetic");
        assert_eq!(trace.answer, "11");
        assert_eq!(trace.steps.len(), 3);

        let trace = solve_steps("what is one plus one", "arithmetic");
        assert_eq!(trace.answer, "Unknown");
        assert_eq!(trace.steps, vec!["Could not parse the expression."]);
    }

    #[test]
    fn test_fraction_steps_with_lcd() {
        let trace = solve_steps("1/2 + 1/3", "fraction");
        assert_eq!(trace.answer, "5/6");
        assert!(trace.steps.iter().any(|s| s.contains("common denominator: 6")));
    }

    #[test]
    fn test_fraction_steps_same_denominator() {
        let trace = solve_steps("3/8 + 1/8", "fraction");
        assert_eq!(trace.answer, "1/2");
        assert!(trace.steps.iter().any(|s| s.contains("Same denominator: 8")));
    }

    #[test]
    fn test_fraction_steps_mixed_number_result() {
        let trace = solve_steps("3/4 + 3/4", "fraction");
        assert_eq!(trace.answer, "1 1/2");
        assert!(trace
            .steps
            .iter()
            .any(|s| s.contains("Convert to mixed number")));
    }

    #[test]
    fn test_fraction_steps_division() {
        let trace = solve_steps("1/2 \u{00f7} 3/4", "fraction");
        assert_eq!(trace.answer, "2/3");
        assert!(trace.steps.iter().any(|s| s.contains("Flip the second fraction")));
    }

    #[test]
    fn test_equation_steps() {
        let trace = solve_steps("Solve for x: 2x + 3 = 7", "equation");
        assert_eq!(trace.answer, "2");
        assert!(trace.steps.last().unwrap().contains("x = 2"));

        let trace = solve_steps("Solve for x: x + 1 = x + 1", "equation");
        assert_eq!(trace.answer, "all real numbers");

        let trace = solve_steps("Solve for x: x + 1 = x + 2", "equation");
        assert_eq!(trace.answer, "no solution");

        let trace = solve_steps("2x + 3", "equation");
        assert_eq!(trace.answer, "Unknown");
    }

    #[test]
    fn test_geometry_steps_rectangle_area() {
        let trace = solve_steps(
            "What is the area of a rectangle with length 4 and width 5?",
            "geometry",
        );
        assert_eq!(trace.answer, "20");
    }

    #[test]
    fn test_geometry_steps_sphere_volume() {
        let trace = solve_steps("Find the volume of a sphere with radius 3.", "geometry");
        assert_eq!(trace.answer, "113.1");
    }

    #[test]
    fn test_geometry_steps_unrecognized() {
        let trace = solve_steps("What is the area of a dodecahedron?", "geometry");
        assert_eq!(trace.answer, "Unknown");
        assert_eq!(trace.steps, vec!["Could not parse geometry problem."]);
    }

    #[test]
    fn test_quadratic_steps_two_roots() {
        let trace = solve_steps("Solve: x\u{00b2} - 5x + 6 = 0", "quadratic");
        assert_eq!(trace.answer, "x = 2, x = 3");
        assert!(trace.steps.iter().any(|s| s.contains("Discriminant")));
    }

    #[test]
    fn test_quadratic_steps_complex_roots() {
        let trace = solve_steps("Solve: x\u{00b2} + 1 = 0", "quadratic");
        assert!(trace.answer.contains('i'));
        assert!(trace.steps.iter().any(|s| s.contains("complex")));
    }

    #[test]
    fn test_trig_steps() {
        let trace = solve_steps("What is sin(30\u{00b0})?", "trig");
        assert_eq!(trace.answer, "0.5");

        let trace = solve_steps("What is tan(90\u{00b0})?", "trig");
        assert_eq!(trace.answer, "undefined");
    }

    #[test]
    fn test_logarithm_steps_exact_and_approximate() {
        let trace = solve_steps("Evaluate log_2(8)", "logarithm");
        assert_eq!(trace.answer, "3");
        assert!(trace.steps.iter().any(|s| s.contains("2^3 = 8")));

        let trace = solve_steps("Evaluate log_2(10)", "logarithm");
        assert_eq!(trace.answer, "3.321928");

        let trace = solve_steps("ln(1)", "log");
        assert_eq!(trace.answer, "0");
    }
}
