//! Geometry: closed-form area, perimeter, volume and surface-area
//! formulas, the Pythagorean solver, and the shape problem generators.

use std::f64::consts::PI;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::problem::Problem;
use crate::util::{format_number, round_to};

pub fn area_rectangle(length: f64, width: f64) -> f64 {
    length * width
}

pub fn perimeter_rectangle(length: f64, width: f64) -> f64 {
    2.0 * (length + width)
}

pub fn area_triangle(base: f64, height: f64) -> f64 {
    0.5 * base * height
}

pub fn area_circle(radius: f64) -> f64 {
    PI * radius * radius
}

pub fn circumference_circle(radius: f64) -> f64 {
    2.0 * PI * radius
}

pub fn volume_rectangular_prism(length: f64, width: f64, height: f64) -> f64 {
    length * width * height
}

pub fn volume_cylinder(radius: f64, height: f64) -> f64 {
    PI * radius * radius * height
}

pub fn surface_area_rectangular_prism(length: f64, width: f64, height: f64) -> f64 {
    2.0 * (length * width + width * height + length * height)
}

pub fn volume_cone(radius: f64, height: f64) -> f64 {
    (1.0 / 3.0) * PI * radius * radius * height
}

pub fn volume_sphere(radius: f64) -> f64 {
    (4.0 / 3.0) * PI * radius * radius * radius
}

pub fn surface_area_sphere(radius: f64) -> f64 {
    4.0 * PI * radius * radius
}

/// Area of a circular sector with central angle in degrees.
pub fn area_circle_sector(radius: f64, angle_deg: f64) -> f64 {
    (angle_deg / 360.0) * PI * radius * radius
}

/// Arc length of a circular sector with central angle in degrees.
pub fn arc_length(radius: f64, angle_deg: f64) -> f64 {
    (angle_deg / 360.0) * 2.0 * PI * radius
}

/// Find the missing side of a right triangle. Pass `None` for exactly one
/// of the three sides.
///
/// # Panics
///
/// Panics when zero or more than one side is `None`; that is a caller
/// bug, not bad user input.
pub fn pythagorean(a: Option<f64>, b: Option<f64>, c: Option<f64>) -> f64 {
    match (a, b, c) {
        (Some(a), Some(b), None) => (a * a + b * b).sqrt(),
        (None, Some(b), Some(c)) => (c * c - b * b).sqrt(),
        (Some(a), None, Some(c)) => (c * c - a * a).sqrt(),
        _ => panic!("pythagorean: exactly one side must be None"),
    }
}

// --- Problem generators ---

/// Pythagorean triples that keep every generated answer an integer.
const TRIPLES: [[i64; 3]; 6] = [
    [3, 4, 5],
    [5, 12, 13],
    [8, 15, 17],
    [6, 8, 10],
    [9, 12, 15],
    [7, 24, 25],
];

const SECTOR_ANGLES: [i64; 6] = [30, 45, 60, 90, 120, 180];

/// Area and perimeter problems for rectangles, squares and triangles.
pub fn generate_area_perimeter(_grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let shapes = ["rectangle", "square", "triangle"];
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        match *shapes.choose(rng).unwrap_or(&"rectangle") {
            "rectangle" => {
                let l: i64 = rng.gen_range(2..=15);
                let w: i64 = rng.gen_range(2..=15);
                if rng.gen_bool(0.5) {
                    problems.push(Problem::fill_in(
                        format!(
                            "What is the area of a rectangle with length {} and width {}?",
                            l, w
                        ),
                        (l * w).to_string(),
                        "Area of a rectangle = length \u{00d7} width",
                    ));
                } else {
                    problems.push(Problem::fill_in(
                        format!(
                            "What is the perimeter of a rectangle with length {} and width {}?",
                            l, w
                        ),
                        (2 * (l + w)).to_string(),
                        "Perimeter = 2 \u{00d7} (length + width)",
                    ));
                }
            }
            "square" => {
                let s: i64 = rng.gen_range(2..=15);
                if rng.gen_bool(0.5) {
                    problems.push(Problem::fill_in(
                        format!("What is the area of a square with side length {}?", s),
                        (s * s).to_string(),
                        "Area of a square = side \u{00d7} side",
                    ));
                } else {
                    problems.push(Problem::fill_in(
                        format!("What is the perimeter of a square with side length {}?", s),
                        (4 * s).to_string(),
                        "Perimeter of a square = 4 \u{00d7} side",
                    ));
                }
            }
            _ => {
                let base: i64 = rng.gen_range(2..=15);
                let height: i64 = rng.gen_range(2..=15);
                let area = base as f64 * height as f64 / 2.0;
                problems.push(Problem::fill_in(
                    format!(
                        "What is the area of a triangle with base {} and height {}?",
                        base, height
                    ),
                    format_number(area),
                    "Area of a triangle = (base \u{00d7} height) \u{00f7} 2",
                ));
            }
        }
    }
    problems
}

/// Volume problems for rectangular prisms (grades 5+).
pub fn generate_volume(_grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let l: i64 = rng.gen_range(2..=10);
        let w: i64 = rng.gen_range(2..=10);
        let h: i64 = rng.gen_range(2..=10);
        problems.push(Problem::fill_in(
            format!(
                "What is the volume of a rectangular prism with length {}, width {}, and height {}?",
                l, w, h
            ),
            (l * w * h).to_string(),
            "Volume = length \u{00d7} width \u{00d7} height",
        ));
    }
    problems
}

/// Pythagorean problems drawn from the curated triples, asking for the
/// hypotenuse or either leg.
pub fn generate_pythagorean(count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let [a, b, c] = *TRIPLES.choose(rng).unwrap_or(&TRIPLES[0]);

        match rng.gen_range(0..3) {
            0 => problems.push(Problem::fill_in(
                format!(
                    "A right triangle has legs of length {} and {}. What is the length of the hypotenuse?",
                    a, b
                ),
                c.to_string(),
                "Use the Pythagorean theorem: a\u{00b2} + b\u{00b2} = c\u{00b2}",
            )),
            1 => problems.push(Problem::fill_in(
                format!(
                    "A right triangle has one leg of {} and hypotenuse of {}. What is the other leg?",
                    b, c
                ),
                a.to_string(),
                "Rearrange: a\u{00b2} = c\u{00b2} - b\u{00b2}",
            )),
            _ => problems.push(Problem::fill_in(
                format!(
                    "A right triangle has one leg of {} and hypotenuse of {}. What is the other leg?",
                    a, c
                ),
                b.to_string(),
                "Rearrange: b\u{00b2} = c\u{00b2} - a\u{00b2}",
            )),
        }
    }
    problems
}

/// Circle problems: area, circumference, arc length, sector area.
/// Irrational answers are rounded to 2 decimals.
pub fn generate_circle_problems(_grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let kinds = ["area", "circumference", "arc_length", "sector_area"];
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        let r: i64 = rng.gen_range(2..=10);
        let rf = r as f64;

        match *kinds.choose(rng).unwrap_or(&"area") {
            "area" => problems.push(Problem::fill_in(
                format!(
                    "Find the area of a circle with radius {}. Round to 2 decimal places.",
                    r
                ),
                format_number(round_to(area_circle(rf), 2)),
                "Area = \u{03c0}r\u{00b2}",
            )),
            "circumference" => problems.push(Problem::fill_in(
                format!(
                    "Find the circumference of a circle with radius {}. Round to 2 decimal places.",
                    r
                ),
                format_number(round_to(circumference_circle(rf), 2)),
                "Circumference = 2\u{03c0}r",
            )),
            "arc_length" => {
                let angle = *SECTOR_ANGLES.choose(rng).unwrap_or(&90);
                problems.push(Problem::fill_in(
                    format!(
                        "Find the arc length of a sector with radius {} and central angle {}\u{00b0}. Round to 2 decimal places.",
                        r, angle
                    ),
                    format_number(round_to(arc_length(rf, angle as f64), 2)),
                    "Arc length = (angle/360) \u{00d7} 2\u{03c0}r",
                ));
            }
            _ => {
                let angle = *SECTOR_ANGLES.choose(rng).unwrap_or(&90);
                problems.push(Problem::fill_in(
                    format!(
                        "Find the area of a sector with radius {} and central angle {}\u{00b0}. Round to 2 decimal places.",
                        r, angle
                    ),
                    format_number(round_to(area_circle_sector(rf, angle as f64), 2)),
                    "Sector area = (angle/360) \u{00d7} \u{03c0}r\u{00b2}",
                ));
            }
        }
    }
    problems
}

/// 3-D volume and surface-area problems for cones, spheres and cylinders.
pub fn generate_3d_problems(_grade: u8, count: usize, rng: &mut impl Rng) -> Vec<Problem> {
    let shapes = ["cone", "sphere", "cylinder"];
    let mut problems = Vec::with_capacity(count);

    for _ in 0..count {
        match *shapes.choose(rng).unwrap_or(&"cone") {
            "cone" => {
                let r: i64 = rng.gen_range(2..=8);
                let h: i64 = rng.gen_range(3..=12);
                problems.push(Problem::fill_in(
                    format!(
                        "Find the volume of a cone with radius {} and height {}. Round to 2 decimal places.",
                        r, h
                    ),
                    format_number(round_to(volume_cone(r as f64, h as f64), 2)),
                    "Volume of cone = (1/3)\u{03c0}r\u{00b2}h",
                ));
            }
            "sphere" => {
                let r: i64 = rng.gen_range(2..=8);
                if rng.gen_bool(0.5) {
                    problems.push(Problem::fill_in(
                        format!(
                            "Find the volume of a sphere with radius {}. Round to 2 decimal places.",
                            r
                        ),
                        format_number(round_to(volume_sphere(r as f64), 2)),
                        "Volume of sphere = (4/3)\u{03c0}r\u{00b3}",
                    ));
                } else {
                    problems.push(Problem::fill_in(
                        format!(
                            "Find the surface area of a sphere with radius {}. Round to 2 decimal places.",
                            r
                        ),
                        format_number(round_to(surface_area_sphere(r as f64), 2)),
                        "Surface area of sphere = 4\u{03c0}r\u{00b2}",
                    ));
                }
            }
            _ => {
                let r: i64 = rng.gen_range(2..=8);
                let h: i64 = rng.gen_range(3..=12);
                problems.push(Problem::fill_in(
                    format!(
                        "Find the volume of a cylinder with radius {} and height {}. Round to 2 decimal places.",
                        r, h
                    ),
                    format_number(round_to(volume_cylinder(r as f64, h as f64), 2)),
                    "Volume of cylinder = \u{03c0}r\u{00b2}h",
                ));
            }
        }
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_formulas() {
        assert_eq!(area_rectangle(4.0, 5.0), 20.0);
        assert_eq!(perimeter_rectangle(4.0, 5.0), 18.0);
        assert_eq!(area_triangle(6.0, 4.0), 12.0);
        assert_eq!(volume_rectangular_prism(2.0, 3.0, 4.0), 24.0);
        assert_eq!(surface_area_rectangular_prism(2.0, 3.0, 4.0), 52.0);
        assert!((area_circle(3.0) - 28.274333882308138).abs() < 1e-9);
        assert!((volume_sphere(2.0) - 33.510321638291124).abs() < 1e-9);
        assert!((area_circle_sector(2.0, 90.0) - PI).abs() < 1e-9);
        assert!((arc_length(2.0, 180.0) - 2.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_pythagorean_each_missing_side() {
        assert_eq!(pythagorean(Some(3.0), Some(4.0), None), 5.0);
        assert_eq!(pythagorean(None, Some(4.0), Some(5.0)), 3.0);
        assert_eq!(pythagorean(Some(3.0), None, Some(5.0)), 4.0);
    }

    #[test]
    #[should_panic(expected = "exactly one side")]
    fn test_pythagorean_rejects_two_missing_sides() {
        pythagorean(Some(3.0), None, None);
    }

    #[test]
    #[should_panic(expected = "exactly one side")]
    fn test_pythagorean_rejects_no_missing_side() {
        pythagorean(Some(3.0), Some(4.0), Some(5.0));
    }

    #[test]
    fn test_pythagorean_generator_uses_triples() {
        let mut rng = StdRng::seed_from_u64(2);
        for p in generate_pythagorean(30, &mut rng) {
            let answer: i64 = p.answer.parse().unwrap();
            assert!(TRIPLES.iter().any(|t| t.contains(&answer)));
        }
    }

    #[test]
    fn test_area_perimeter_answers_check_out() {
        let mut rng = StdRng::seed_from_u64(13);
        for p in generate_area_perimeter(4, 30, &mut rng) {
            let answer: f64 = p.answer.parse().unwrap();
            assert!(answer > 0.0);
            // Triangle areas may be halves, everything else is integral
            assert_eq!(answer * 2.0, (answer * 2.0).trunc());
        }
    }
}
