#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// The per-submission grading context: tokens, points-per-answer, counters.
pub mod context;
/// The grading engine: syntax validation, scoring, and leveled feedback.
pub mod engine;
/// Feedback text and HTML explanation rendering.
pub mod feedback;
/// Grading result types shared by the engine and its consumers.
pub mod results;

pub use engine::GradingEngine;
pub use results::{Criterion, GradingResult};
