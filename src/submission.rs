#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use bon::Builder;
use serde::{Deserialize, Serialize};

/// How a submission should be treated by the grading engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionMode {
    /// Practice run: the submission is checked for syntax but never graded,
    /// so students can exercise the classifier without seeing the answer
    /// key.
    Run,
    /// Diagnostic submission: graded with feedback, not persisted as final.
    Diagnose,
    /// Final submission: graded with feedback.
    #[default]
    Submit,
}

/// A raw student submission together with the grading options it was
/// submitted under. Built once per grading call and discarded afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(on(String, into))]
pub struct Submission {
    /// The submitted answer: comma-separated labels, one per test point.
    pub input:          String,
    /// How to treat the submission.
    #[builder(default)]
    #[serde(default)]
    pub mode:           SubmissionMode,
    /// Feedback verbosity, 0 (totals only) through 3 (full explanations
    /// plus solution visualization).
    #[builder(default)]
    #[serde(default)]
    pub feedback_level: u8,
}
