//! Abacus Control - CLI for the Abacus math engine.
//!
//! Exercises the engine's three call contracts from the command line:
//! problem generation, answer validation, and step-by-step solving.

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use rand::rngs::StdRng;
use rand::SeedableRng;

use abacus_engine::{generate_problems, generate_problems_with, solve_steps, validate_answer};

#[derive(Parser)]
#[command(name = "abacusctl")]
#[command(about = "Abacus - deterministic K-12 math engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate practice problems for a topic and grade
    Generate {
        /// Topic name or alias (e.g. "addition", "trig", "quadratics")
        #[arg(long)]
        topic: String,

        /// Student grade level (K = 0)
        #[arg(long)]
        grade: u8,

        /// Number of problems
        #[arg(long, default_value_t = 5)]
        count: usize,

        /// Seed the generator for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check a student answer against the correct one
    Validate {
        /// The student's answer
        student: String,

        /// The correct answer
        correct: String,
    },

    /// Show a step-by-step solution
    Steps {
        /// The problem text
        problem: String,

        /// Problem kind: arithmetic, fraction, equation, geometry,
        /// quadratic, trig, logarithm
        #[arg(long, default_value = "arithmetic")]
        kind: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            topic,
            grade,
            count,
            seed,
            json,
        } => {
            let problems = match seed {
                Some(seed) => {
                    let mut rng = StdRng::seed_from_u64(seed);
                    generate_problems_with(&topic, grade, count, &mut rng)
                }
                None => generate_problems(&topic, grade, count),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&problems)?);
            } else {
                for (i, p) in problems.iter().enumerate() {
                    println!("{} {}", format!("{}.", i + 1).bold(), p.question);
                    println!("   answer: {}", p.answer.green());
                    println!("   hint:   {}", p.hint.dimmed());
                }
            }
        }

        Commands::Validate { student, correct } => {
            let correct_answer = validate_answer(&student, &correct);
            if correct_answer {
                println!("{}", "correct".green().bold());
            } else {
                println!("{} (expected {})", "incorrect".red().bold(), correct);
                std::process::exit(1);
            }
        }

        Commands::Steps {
            problem,
            kind,
            json,
        } => {
            let trace = solve_steps(&problem, &kind);
            if json {
                println!("{}", serde_json::to_string_pretty(&trace)?);
            } else {
                for step in &trace.steps {
                    println!("  {}", step);
                }
                println!("{} {}", "answer:".bold(), trace.answer.green());
            }
        }
    }

    Ok(())
}
