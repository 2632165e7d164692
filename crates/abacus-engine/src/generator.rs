//! Problem generator dispatch: topic normalization, aliasing, and the
//! grade-appropriate fallback mix.
//!
//! Topics are a closed enum, so an unknown topic is a checked case that
//! routes to the grade mix instead of a silent missing-key lookup.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::problem::Problem;
use crate::{advanced_algebra, algebra, arithmetic, fraction, geometry, statistics, trigonometry};

/// Every canonical topic the engine can generate problems for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    FractionAddition,
    FractionSubtraction,
    FractionMultiplication,
    LinearEquations,
    Expressions,
    AreaPerimeter,
    Volume,
    Pythagorean,
    Statistics,
    AdvancedStatistics,
    UnitCircle,
    RadianConversion,
    RightTriangleTrig,
    Quadratics,
    Systems,
    Polynomials,
    ComplexNumbers,
    Circles,
    ThreeDGeometry,
}

impl Topic {
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Multiplication => "multiplication",
            Self::Division => "division",
            Self::FractionAddition => "fraction_addition",
            Self::FractionSubtraction => "fraction_subtraction",
            Self::FractionMultiplication => "fraction_multiplication",
            Self::LinearEquations => "linear_equations",
            Self::Expressions => "expressions",
            Self::AreaPerimeter => "area_perimeter",
            Self::Volume => "volume",
            Self::Pythagorean => "pythagorean",
            Self::Statistics => "statistics",
            Self::AdvancedStatistics => "advanced_statistics",
            Self::UnitCircle => "unit_circle",
            Self::RadianConversion => "radian_conversion",
            Self::RightTriangleTrig => "right_triangle_trig",
            Self::Quadratics => "quadratics",
            Self::Systems => "systems",
            Self::Polynomials => "polynomials",
            Self::ComplexNumbers => "complex_numbers",
            Self::Circles => "circles",
            Self::ThreeDGeometry => "3d_geometry",
        }
    }

    fn from_canonical(name: &str) -> Option<Self> {
        let all = [
            Self::Addition,
            Self::Subtraction,
            Self::Multiplication,
            Self::Division,
            Self::FractionAddition,
            Self::FractionSubtraction,
            Self::FractionMultiplication,
            Self::LinearEquations,
            Self::Expressions,
            Self::AreaPerimeter,
            Self::Volume,
            Self::Pythagorean,
            Self::Statistics,
            Self::AdvancedStatistics,
            Self::UnitCircle,
            Self::RadianConversion,
            Self::RightTriangleTrig,
            Self::Quadratics,
            Self::Systems,
            Self::Polynomials,
            Self::ComplexNumbers,
            Self::Circles,
            Self::ThreeDGeometry,
        ];
        all.into_iter().find(|t| t.canonical_name() == name)
    }
}

/// Common and shorthand topic names mapped to canonical ones.
static ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("add", "addition"),
        ("subtract", "subtraction"),
        ("multiply", "multiplication"),
        ("divide", "division"),
        ("fractions", "fraction_addition"),
        ("fraction_add", "fraction_addition"),
        ("fraction_sub", "fraction_subtraction"),
        ("fraction_mult", "fraction_multiplication"),
        ("algebra", "linear_equations"),
        ("equations", "linear_equations"),
        ("geometry", "area_perimeter"),
        ("area", "area_perimeter"),
        ("perimeter", "area_perimeter"),
        ("stats", "statistics"),
        ("mean", "statistics"),
        ("median", "statistics"),
        ("trig", "unit_circle"),
        ("trigonometry", "unit_circle"),
        ("sin", "right_triangle_trig"),
        ("cos", "right_triangle_trig"),
        ("tan", "right_triangle_trig"),
        ("quadratic", "quadratics"),
        ("factoring", "quadratics"),
        ("system", "systems"),
        ("systems_of_equations", "systems"),
        ("polynomial", "polynomials"),
        ("complex", "complex_numbers"),
        ("circle", "circles"),
        ("sphere", "3d_geometry"),
        ("cone", "3d_geometry"),
        ("cylinder", "3d_geometry"),
        ("standard_deviation", "advanced_statistics"),
        ("probability", "advanced_statistics"),
        ("combinations", "advanced_statistics"),
        ("permutations", "advanced_statistics"),
    ])
});

/// Normalize a free-text topic name and resolve aliases.
/// `None` means the topic is unknown and the caller should fall back.
pub fn resolve_topic(raw: &str) -> Option<Topic> {
    let normalized: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '-' { '_' } else { c })
        .collect();

    let canonical = ALIASES
        .get(normalized.as_str())
        .copied()
        .unwrap_or(normalized.as_str());
    Topic::from_canonical(canonical)
}

/// Run the generator for one canonical topic.
pub fn generate_for_topic(
    topic: Topic,
    grade: u8,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<Problem> {
    match topic {
        Topic::Addition => arithmetic::generate_addition(grade, count, rng),
        Topic::Subtraction => arithmetic::generate_subtraction(grade, count, rng),
        Topic::Multiplication => arithmetic::generate_multiplication(grade, count, rng),
        Topic::Division => arithmetic::generate_division(grade, count, rng),
        Topic::FractionAddition => fraction::generate_fraction_addition(grade, count, rng),
        Topic::FractionSubtraction => fraction::generate_fraction_subtraction(grade, count, rng),
        Topic::FractionMultiplication => {
            fraction::generate_fraction_multiplication(grade, count, rng)
        }
        Topic::LinearEquations => algebra::generate_linear_equations(grade, count, rng),
        Topic::Expressions => algebra::generate_expression_evaluation(grade, count, rng),
        Topic::AreaPerimeter => geometry::generate_area_perimeter(grade, count, rng),
        Topic::Volume => geometry::generate_volume(grade, count, rng),
        // Pythagorean problems come from fixed triples; grade is irrelevant
        Topic::Pythagorean => geometry::generate_pythagorean(count, rng),
        Topic::Statistics => statistics::generate_statistics_problems(grade, count, rng),
        Topic::AdvancedStatistics => statistics::generate_advanced_statistics(grade, count, rng),
        Topic::UnitCircle => trigonometry::generate_unit_circle_problems(grade, count, rng),
        Topic::RadianConversion => trigonometry::generate_radian_conversion(grade, count, rng),
        Topic::RightTriangleTrig => trigonometry::generate_right_triangle_trig(grade, count, rng),
        Topic::Quadratics => advanced_algebra::generate_quadratic_problems(grade, count, rng),
        Topic::Systems => advanced_algebra::generate_system_problems(grade, count, rng),
        Topic::Polynomials => advanced_algebra::generate_polynomial_problems(grade, count, rng),
        Topic::ComplexNumbers => {
            advanced_algebra::generate_complex_number_problems(grade, count, rng)
        }
        Topic::Circles => geometry::generate_circle_problems(grade, count, rng),
        Topic::ThreeDGeometry => geometry::generate_3d_problems(grade, count, rng),
    }
}

/// Generate `count` problems for a topic and grade, with an injected RNG
/// so tests can fix the sequence.
pub fn generate_problems_with(
    topic: &str,
    grade: u8,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<Problem> {
    match resolve_topic(topic) {
        Some(resolved) => {
            tracing::debug!(topic, canonical = resolved.canonical_name(), "dispatching");
            generate_for_topic(resolved, grade, count, rng)
        }
        None => {
            tracing::debug!(topic, grade, "unknown topic, using grade mix");
            generate_grade_mix(grade, count, rng)
        }
    }
}

/// Generate `count` problems using the process-wide RNG.
pub fn generate_problems(topic: &str, grade: u8, count: usize) -> Vec<Problem> {
    generate_problems_with(topic, grade, count, &mut rand::thread_rng())
}

/// Curated topic list per grade band, for the unknown-topic fallback.
fn grade_mix_topics(grade: u8) -> Vec<Topic> {
    if grade <= 2 {
        vec![Topic::Addition, Topic::Subtraction]
    } else if grade <= 4 {
        vec![
            Topic::Addition,
            Topic::Subtraction,
            Topic::Multiplication,
            Topic::Division,
        ]
    } else if grade <= 5 {
        vec![
            Topic::Multiplication,
            Topic::Division,
            Topic::FractionAddition,
            Topic::AreaPerimeter,
        ]
    } else if grade <= 6 {
        vec![
            Topic::FractionAddition,
            Topic::FractionMultiplication,
            Topic::LinearEquations,
            Topic::AreaPerimeter,
        ]
    } else if grade <= 8 {
        vec![
            Topic::LinearEquations,
            Topic::Expressions,
            Topic::Statistics,
            Topic::AreaPerimeter,
        ]
    } else if grade == 9 {
        vec![
            Topic::LinearEquations,
            Topic::Quadratics,
            Topic::Systems,
            Topic::Polynomials,
        ]
    } else if grade == 10 {
        vec![
            Topic::RightTriangleTrig,
            Topic::Circles,
            Topic::AreaPerimeter,
            Topic::ThreeDGeometry,
        ]
    } else if grade == 11 {
        vec![
            Topic::Quadratics,
            Topic::UnitCircle,
            Topic::AdvancedStatistics,
        ]
    } else {
        vec![
            Topic::AdvancedStatistics,
            Topic::ComplexNumbers,
            Topic::Systems,
        ]
    }
}

/// Fallback mix: partition `count` across the band's topics, shuffle,
/// truncate.
pub fn generate_grade_mix(grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let topics = grade_mix_topics(grade);
    let per_topic = std::cmp::max(1, count / topics.len());

    let mut problems = Vec::with_capacity(count);
    for topic in topics {
        problems.extend(generate_for_topic(topic, grade, per_topic, rng));
    }

    problems.shuffle(rng);
    problems.truncate(count);
    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_resolve_topic_aliases() {
        assert_eq!(resolve_topic("add"), Some(Topic::Addition));
        assert_eq!(resolve_topic("trig"), Some(Topic::UnitCircle));
        assert_eq!(resolve_topic("sphere"), Some(Topic::ThreeDGeometry));
        assert_eq!(resolve_topic("probability"), Some(Topic::AdvancedStatistics));
    }

    #[test]
    fn test_resolve_topic_normalization() {
        assert_eq!(resolve_topic("Fraction Addition"), Some(Topic::FractionAddition));
        assert_eq!(resolve_topic("fraction-addition"), Some(Topic::FractionAddition));
        assert_eq!(resolve_topic("UNIT_CIRCLE"), Some(Topic::UnitCircle));
    }

    #[test]
    fn test_resolve_topic_unknown() {
        assert_eq!(resolve_topic("underwater basket weaving"), None);
    }

    #[test]
    fn test_generate_problems_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        let problems = generate_problems_with("addition", 2, 7, &mut rng);
        assert_eq!(problems.len(), 7);
    }

    #[test]
    fn test_unknown_topic_falls_back_to_grade_mix() {
        let mut rng = StdRng::seed_from_u64(1);
        let problems = generate_problems_with("nonsense", 3, 8, &mut rng);
        assert!(!problems.is_empty());
        assert!(problems.len() <= 8);
    }

    #[test]
    fn test_grade_mix_truncates_to_count() {
        let mut rng = StdRng::seed_from_u64(4);
        for grade in 0..=12u8 {
            let problems = generate_grade_mix(grade, 6, &mut rng);
            assert!(problems.len() <= 6, "grade {} overflowed", grade);
            assert!(!problems.is_empty());
        }
    }

    #[test]
    fn test_pythagorean_special_case() {
        let mut rng = StdRng::seed_from_u64(8);
        let problems = generate_problems_with("pythagorean", 4, 5, &mut rng);
        assert_eq!(problems.len(), 5);
        assert!(problems[0].question.contains("right triangle"));
    }
}
