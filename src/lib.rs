//! # knn-grader
//!
//! A transparent autograder for 2D k-nearest-neighbour classification
//! exercises. It classifies test points over a small labelled training set
//! with explainable, deterministic tie-breaking, then scores student
//! submissions against the computed solution with partial credit and
//! feedback at four verbosity levels.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// For all things related to grading submissions
pub mod grade;
/// The k-nearest-neighbour classification engine
pub mod knn;
/// Submission values accepted by the grading engine
pub mod submission;
/// Task definitions: training/test data, configuration, and solutions
pub mod task;

pub use grade::{Criterion, GradingEngine, GradingResult};
pub use knn::{
    Classification, Classifier, ClassifierConfig, ClassifierError, Metric, MetricError, Neighbor,
    Point, TieBreak, TieBreakReason,
};
pub use submission::{Submission, SubmissionMode};
pub use task::{TaskDefinition, TaskError};
