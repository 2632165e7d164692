//! Statistics: descriptive measures, combinatorics, and the statistics
//! problem generators (grades 6-12).

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::EngineError;
use crate::fraction::gcd;
use crate::problem::Problem;
use crate::util::{format_number, round_to};

/// Arithmetic mean. Empty input is 0.
pub fn mean(numbers: &[f64]) -> f64 {
    if numbers.is_empty() {
        return 0.0;
    }
    numbers.iter().sum::<f64>() / numbers.len() as f64
}

/// Median; the two middle values are averaged for even-length input.
pub fn median(numbers: &[f64]) -> f64 {
    if numbers.is_empty() {
        return 0.0;
    }
    let mut sorted = numbers.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Mode; ties resolve to the smallest value.
pub fn mode(numbers: &[f64]) -> f64 {
    if numbers.is_empty() {
        return 0.0;
    }
    let mut counts: HashMap<u64, (f64, usize)> = HashMap::new();
    for &n in numbers {
        let entry = counts.entry(n.to_bits()).or_insert((n, 0));
        entry.1 += 1;
    }
    let max_count = counts.values().map(|&(_, c)| c).max().unwrap_or(0);
    counts
        .values()
        .filter(|&&(_, c)| c == max_count)
        .map(|&(v, _)| v)
        .fold(f64::INFINITY, f64::min)
}

/// Range: max - min. Empty input is 0.
pub fn range_of(numbers: &[f64]) -> f64 {
    if numbers.is_empty() {
        return 0.0;
    }
    let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
    max - min
}

/// Population standard deviation, rounded to 4 decimals.
/// Fewer than 2 data points yield 0.
pub fn standard_deviation(numbers: &[f64]) -> f64 {
    if numbers.len() < 2 {
        return 0.0;
    }
    let avg = mean(numbers);
    let variance =
        numbers.iter().map(|n| (n - avg).powi(2)).sum::<f64>() / numbers.len() as f64;
    round_to(variance.sqrt(), 4)
}

/// n!, computed iteratively so large n never recurses.
pub fn factorial(n: i64) -> Result<f64, EngineError> {
    if n < 0 {
        return Err(EngineError::NegativeFactorial);
    }
    let mut result = 1.0;
    for i in 2..=n {
        result *= i as f64;
    }
    Ok(result)
}

/// P(n, r) = n! / (n-r)!, rounded to absorb float residue.
pub fn permutation(n: i64, r: i64) -> Result<f64, EngineError> {
    Ok((factorial(n)? / factorial(n - r)?).round())
}

/// C(n, r) = n! / (r!(n-r)!), rounded to absorb float residue.
pub fn combination(n: i64, r: i64) -> Result<f64, EngineError> {
    Ok((factorial(n)? / (factorial(r)? * factorial(n - r)?)).round())
}

/// Reduce favorable/total and render "n/d", or "n" when it divides evenly.
fn simplify_probability(favorable: i64, total: i64) -> String {
    let g = gcd(favorable, total);
    let n = favorable / g;
    let d = total / g;
    if d == 1 {
        n.to_string()
    } else {
        format!("{}/{}", n, d)
    }
}

// --- Problem generators ---

/// Mean/median/mode/range problems. Mode problems duplicate a random
/// element first so a clear mode always exists.
pub fn generate_statistics_problems(grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let stat_types = ["mean", "median", "mode", "range"];
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let size = rng.gen_range(5..=9);
        let max_val = if grade <= 6 { 20 } else { 100 };
        let mut data: Vec<i64> = (0..size).map(|_| rng.gen_range(1..=max_val)).collect();

        match *stat_types.choose(rng).unwrap_or(&"mean") {
            "mean" => {
                let values: Vec<f64> = data.iter().map(|&n| n as f64).collect();
                let result = mean(&values);
                let answer = if result.fract() == 0.0 {
                    format_number(result)
                } else {
                    format_number(round_to(result, 2))
                };
                problems.push(Problem::fill_in(
                    format!("Find the mean (average) of: {}", join(&data)),
                    answer,
                    "Add all the numbers together, then divide by how many numbers there are.",
                ));
            }
            "median" => {
                let values: Vec<f64> = data.iter().map(|&n| n as f64).collect();
                let result = median(&values);
                let answer = if result.fract() == 0.0 {
                    format_number(result)
                } else {
                    format_number(round_to(result, 1))
                };
                problems.push(Problem::fill_in(
                    format!("Find the median of: {}", join(&data)),
                    answer,
                    "First arrange the numbers in order, then find the middle value.",
                ));
            }
            "mode" => {
                // Duplicate one element so the mode is unambiguous
                let dup = data[rng.gen_range(0..data.len())];
                data.push(dup);
                let values: Vec<f64> = data.iter().map(|&n| n as f64).collect();
                problems.push(Problem::fill_in(
                    format!("Find the mode of: {}", join(&data)),
                    format_number(mode(&values)),
                    "The mode is the number that appears most often.",
                ));
            }
            _ => {
                let values: Vec<f64> = data.iter().map(|&n| n as f64).collect();
                problems.push(Problem::fill_in(
                    format!("Find the range of: {}", join(&data)),
                    format_number(range_of(&values)),
                    "Range = largest number - smallest number",
                ));
            }
        }
    }
    problems
}

fn join(data: &[i64]) -> String {
    data.iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn probability_scenario(total: i64, favorable: i64) -> String {
    match total {
        6 => format!(
            "rolling a number less than {} on a standard die",
            favorable + 1
        ),
        10 => format!(
            "drawing one of {} specific items from a bag of {}",
            favorable, total
        ),
        12 => format!("selecting one of {} months from the year", favorable),
        20 => format!(
            "picking one of {} specific students from a class of {}",
            favorable, total
        ),
        _ => format!(
            "drawing one of {} specific cards from a standard deck",
            favorable
        ),
    }
}

/// Advanced statistics: standard deviation, probability as a reduced
/// fraction, combinations and permutations.
pub fn generate_advanced_statistics(_grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let kinds = ["std_dev", "probability", "combination", "permutation"];
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        match *kinds.choose(rng).unwrap_or(&"std_dev") {
            "std_dev" => {
                let size = rng.gen_range(5..=7);
                let data: Vec<i64> = (0..size).map(|_| rng.gen_range(10..=50)).collect();
                let values: Vec<f64> = data.iter().map(|&n| n as f64).collect();
                problems.push(Problem::fill_in(
                    format!(
                        "Find the population standard deviation of: {}. Round to 4 decimal places.",
                        join(&data)
                    ),
                    format_number(standard_deviation(&values)),
                    "First find the mean, then compute the average of squared deviations, then take the square root.",
                ));
            }
            "probability" => {
                let total = *[6i64, 10, 12, 20, 52].choose(rng).unwrap_or(&6);
                let favorable = rng.gen_range(1..=total - 1);
                problems.push(Problem::fill_in(
                    format!(
                        "What is the probability of {}?",
                        probability_scenario(total, favorable)
                    ),
                    simplify_probability(favorable, total),
                    "Probability = favorable outcomes / total outcomes",
                ));
            }
            "combination" => {
                let n = rng.gen_range(5..=10);
                let r = rng.gen_range(2..=4.min(n));
                let answer = combination(n, r).expect("n and r are non-negative");
                problems.push(Problem::fill_in(
                    format!("Calculate C({}, {}) (combinations of {} choose {}).", n, r, n, r),
                    format_number(answer),
                    "C(n,r) = n! / (r!(n-r)!). Order does not matter.",
                ));
            }
            _ => {
                let n = rng.gen_range(4..=8);
                let r = rng.gen_range(2..=3.min(n));
                let answer = permutation(n, r).expect("n and r are non-negative");
                problems.push(Problem::fill_in(
                    format!(
                        "Calculate P({}, {}) (permutations of {} taken {} at a time).",
                        n, r, n, r
                    ),
                    format_number(answer),
                    "P(n,r) = n! / (n-r)!. Order matters.",
                ));
            }
        }
    }
    problems
}
