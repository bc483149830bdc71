#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # knn-grader
//!
//! Command-line front end for the k-NN exercise grader: computes canonical
//! solutions for task files and grades submissions against them.

use anyhow::{Context, Result};
use bpaf::*;
use colored::Colorize;
use knn_grader::{GradingEngine, Submission, SubmissionMode, TaskDefinition};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Print the canonical solution for a task
    Solve(String),
    /// Grade a submission against a task
    Grade {
        /// Path to the task JSON file
        task:  String,
        /// The submitted answer string
        input: String,
        /// Feedback level 0-3
        level: u8,
        /// Practice mode, no grading
        run:   bool,
    },
    /// Print the parsed task definition as JSON
    Info(String),
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses the task file path
    fn task() -> impl Parser<String> {
        positional("TASK").help("Path to task JSON file")
    }

    let solve = construct!(Cmd::Solve(task()))
        .to_options()
        .command("solve")
        .help("Compute and print the canonical solution");

    let grade = {
        let level = short('l')
            .long("level")
            .help("Feedback level 0-3")
            .argument::<u8>("LEVEL")
            .fallback(1);
        let run = long("run")
            .help("Practice mode: validate syntax only, award no points")
            .switch();
        let task = task();
        let input = positional("SUBMISSION").help("Comma-separated answer labels");
        construct!(Cmd::Grade {
            level,
            run,
            task,
            input
        })
        .to_options()
        .command("grade")
        .help("Grade a submission")
    };

    let info = construct!(Cmd::Info(task()))
        .to_options()
        .command("info")
        .help("Print the parsed task definition as JSON");

    construct!([solve, grade, info])
        .to_options()
        .descr("A transparent autograder for k-NN classification exercises")
        .run()
}

/// Reads and parses a task definition from a file path.
fn load_task(path: &str) -> Result<TaskDefinition> {
    let json = std::fs::read_to_string(path).with_context(|| format!("Could not read {path}"))?;
    TaskDefinition::from_json(&json).with_context(|| format!("Could not parse {path}"))
}

fn main() -> Result<()> {
    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    match options() {
        Cmd::Solve(path) => {
            let task = load_task(&path)?;
            println!("{}", task.compute_solution()?);
        }
        Cmd::Grade {
            task,
            input,
            level,
            run,
        } => {
            let task = load_task(&task)?;
            let submission = Submission::builder()
                .input(input)
                .mode(if run {
                    SubmissionMode::Run
                } else {
                    SubmissionMode::Submit
                })
                .feedback_level(level.min(3))
                .build();

            let result = GradingEngine::new(&task).grade(&submission)?;
            println!("{}", result.table());
            if !result.general_feedback.is_empty() {
                println!("{}", result.general_feedback);
            }

            let summary = format!("{:.2}/{:.2}", result.points, result.max_points);
            if result.points == result.max_points && !run {
                println!("{}", summary.bright_green().bold());
            } else {
                println!("{}", summary.bright_yellow().bold());
            }
        }
        Cmd::Info(path) => {
            let task = load_task(&path)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
    }

    Ok(())
}
