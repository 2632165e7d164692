//! Answer validator: decides whether a student's free-text answer is
//! equivalent to the stored correct answer.
//!
//! "1/2", "0.5" and "50%" all name the same value and must all be
//! accepted. Parsing runs through an ordered chain of typed matchers —
//! percentage and fraction forms must be tried before plain decimals,
//! or "50%" and "3/4" would mis-parse.

pub mod matchers;

pub use matchers::ParsedAnswer;

use matchers::*;

type Matcher = fn(&str) -> Option<ParsedAnswer>;

/// The recognition chain, tried in priority order.
const MATCHERS: &[(&str, Matcher)] = &[
    ("percentage", match_percentage),
    ("mixed_number", match_mixed_number),
    ("fraction", match_fraction),
    ("decimal", match_decimal),
    ("integer", match_integer),
    ("pi_multiple", match_pi_multiple),
    ("pi_fraction", match_pi_fraction),
    ("pure_imaginary", match_pure_imaginary),
    ("complex", match_complex),
    ("radical", match_radical),
    ("vector", match_vector),
    ("interval", match_interval),
];

/// Numeric tolerance for decimal comparisons.
const TOLERANCE: f64 = 0.01;

/// Parse free-form answer text into a comparable value.
pub fn parse_answer(s: &str) -> Option<ParsedAnswer> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    // "1,000" → "1000"
    let s = s.replace(',', "");

    for (name, matcher) in MATCHERS {
        if let Some(parsed) = matcher(&s) {
            tracing::trace!(matcher = name, "answer format recognized");
            return Some(parsed);
        }
    }
    None
}

/// Check whether two answers denote the same value.
///
/// Symmetric: `validate_answer(a, b) == validate_answer(b, a)`.
pub fn validate_answer(student: &str, correct: &str) -> bool {
    let student = student.trim();
    let correct = correct.trim();

    // Direct string match, case-insensitive
    if student.to_lowercase() == correct.to_lowercase() {
        return true;
    }

    let (Some(student_val), Some(correct_val)) =
        (parse_answer_full(student), parse_answer_full(correct))
    else {
        return false;
    };

    match (student_val, correct_val) {
        (ParsedAnswer::Complex(a), ParsedAnswer::Complex(b)) => {
            (a.re - b.re).abs() < TOLERANCE && (a.im - b.im).abs() < TOLERANCE
        }
        // Complex never equals a real answer
        (ParsedAnswer::Complex(_), _) | (_, ParsedAnswer::Complex(_)) => false,
        // Vectors and intervals compare as whitespace-stripped text
        (ParsedAnswer::Opaque(_), _) | (_, ParsedAnswer::Opaque(_)) => {
            strip_whitespace(student) == strip_whitespace(correct)
        }
        (
            ParsedAnswer::Number {
                value: v1,
                exact: e1,
            },
            ParsedAnswer::Number {
                value: v2,
                exact: e2,
            },
        ) => {
            // Exact cross-multiplied equality when both sides carry a
            // rational form; otherwise decimal tolerance.
            if let (Some(f1), Some(f2)) = (e1, e2) {
                let lhs = f1.numerator() as i128 * f2.denominator() as i128;
                let rhs = f2.numerator() as i128 * f1.denominator() as i128;
                if lhs == rhs {
                    return true;
                }
            }
            (v1 - v2).abs() < TOLERANCE
        }
    }
}

/// Vector and interval notation contains commas, which the numeric
/// pre-pass strips. Try the raw text against those two matchers first.
fn parse_answer_full(s: &str) -> Option<ParsedAnswer> {
    match_vector(s)
        .or_else(|| match_interval(s))
        .or_else(|| parse_answer(s))
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
