//! Deterministic math engine for the Abacus tutoring platform.
//!
//! Exact-arithmetic solvers, answer validation, step-by-step explanation
//! generation, and grade-scaled problem generators spanning arithmetic,
//! fractions, algebra, geometry, trigonometry and statistics.
//!
//! Everything in this crate is pure, synchronous and free of shared
//! mutable state: the web layer calls in with plain strings and numbers
//! and gets plain data back. The only ambient resource is the RNG, and
//! every generator accepts one as a parameter so tests can seed it.

pub mod advanced_algebra;
pub mod algebra;
pub mod arithmetic;
pub mod error;
pub mod fraction;
pub mod generator;
pub mod geometry;
pub mod problem;
pub mod statistics;
pub mod steps;
pub mod trigonometry;
pub mod validator;

mod util;

pub use error::EngineError;
pub use fraction::Fraction;
pub use generator::{generate_problems, generate_problems_with, resolve_topic, Topic};
pub use problem::{Problem, ProblemKind};
pub use steps::{solve_steps, ProblemDomain, SolutionTrace};
pub use validator::{parse_answer, validate_answer, ParsedAnswer};
