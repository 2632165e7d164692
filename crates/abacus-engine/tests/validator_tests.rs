//! Golden tests for answer equivalence.
//!
//! The validator must accept every reasonable way a student writes the
//! same value, stay symmetric, and never confuse distinct values.

use abacus_engine::validate_answer;

#[test]
fn golden_fraction_decimal_percent_equivalence() {
    assert!(validate_answer("1/2", "0.5"));
    assert!(validate_answer("50%", "0.5"));
    assert!(validate_answer("2/4", "1/2"));
    assert!(validate_answer("0.5", ".5"));
    assert!(validate_answer("25%", "1/4"));
}

#[test]
fn golden_complex_equivalence() {
    assert!(validate_answer("3+2i", "3 + 2i"));
    assert!(validate_answer("-1 - 4i", "-1-4i"));
    assert!(validate_answer("5i", "0 + 5i"));
    assert!(!validate_answer("3 + 2i", "3 - 2i"));
    assert!(!validate_answer("3 + 2i", "3"));
}

#[test]
fn golden_plain_numbers() {
    assert!(validate_answer("5", "5"));
    assert!(!validate_answer("5", "6"));
    assert!(validate_answer("1,000", "1000"));
    assert!(validate_answer("-7", "-7.0"));
}

#[test]
fn golden_mixed_numbers() {
    assert!(validate_answer("1 1/2", "3/2"));
    assert!(validate_answer("1 1/2", "1.5"));
    assert!(validate_answer("-2 1/3", "-7/3"));
}

#[test]
fn golden_pi_and_radicals() {
    assert!(validate_answer("pi/2", "1.5708"));
    assert!(validate_answer("2pi", "6.2832"));
    assert!(validate_answer("\u{03c0}/4", "pi/4"));
    assert!(validate_answer("sqrt(2)", "1.4142"));
    assert!(validate_answer("2sqrt(3)/4", "0.866"));
}

#[test]
fn golden_vectors_and_intervals() {
    assert!(validate_answer("<3, 4>", "<3,4>"));
    assert!(!validate_answer("<3, 4>", "<4,3>"));
    assert!(validate_answer("(-2, 5]", "(-2,5]"));
    assert!(!validate_answer("(-2, 5]", "(-2,5)"));
}

#[test]
fn golden_symmetry() {
    let pairs = [
        ("1/2", "0.5"),
        ("50%", "0.5"),
        ("2/4", "1/2"),
        ("3+2i", "3 + 2i"),
        ("5", "6"),
        ("1 1/2", "1.5"),
        ("pi/2", "1.5708"),
        ("sqrt(2)", "1.4142"),
        ("<3, 4>", "<3,4>"),
        ("(-2, 5]", "(-2,5]"),
        ("undefined", "Undefined"),
        ("garbage", "4"),
    ];
    for (a, b) in pairs {
        assert_eq!(
            validate_answer(a, b),
            validate_answer(b, a),
            "asymmetric for ({}, {})",
            a,
            b
        );
    }
}

#[test]
fn golden_textual_answers_match_case_insensitively() {
    assert!(validate_answer("No Solution", "no solution"));
    assert!(validate_answer("All Real Numbers", "all real numbers"));
    assert!(validate_answer("UNDEFINED", "undefined"));
    assert!(!validate_answer("no solution", "all real numbers"));
}

#[test]
fn golden_tolerance_boundaries() {
    // 0.01 decimal tolerance
    assert!(validate_answer("3.14", "3.14159"));
    assert!(!validate_answer("3.10", "3.14159"));
    // Exact fraction comparison does not tolerate different values
    assert!(!validate_answer("1/3", "1/4"));
}

#[test]
fn golden_unparseable_input_never_matches() {
    assert!(!validate_answer("banana", "42"));
    assert!(!validate_answer("", "42"));
    assert!(!validate_answer("   ", "42"));
    // ...but identical garbage still matches as text
    assert!(validate_answer("banana", "Banana"));
}
