#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::{
    context::{GradingContext, ItemOutcome, round_points},
    feedback,
    results::{Criterion, GradingResult},
};
use crate::{
    submission::{Submission, SubmissionMode},
    task::{TaskDefinition, TaskError},
};

/// Grades student submissions for one task.
///
/// The engine reads the task's canonical solution (computing it with the
/// classifier when the task does not carry one), validates the submission's
/// syntax, scores each answer symmetrically, and assembles feedback at the
/// requested verbosity level.
pub struct GradingEngine<'t> {
    /// The task being graded against. Read-only for the engine's lifetime.
    task: &'t TaskDefinition,
}

/// Counts the comma-separated tokens of a raw answer string.
fn token_count(raw: &str) -> usize {
    raw.split(',').count()
}

impl<'t> GradingEngine<'t> {
    /// Creates an engine for the given task.
    pub fn new(task: &'t TaskDefinition) -> Self {
        Self { task }
    }

    /// Grades one submission, producing exactly one [`GradingResult`].
    ///
    /// Syntax failures are grading outcomes, not errors: they yield a
    /// zero-point result whose syntax criterion explains the failure. Only
    /// task configuration problems (unusable metric, empty training set
    /// when the solution must be computed) surface as `Err`.
    pub fn grade(&self, submission: &Submission) -> Result<GradingResult, TaskError> {
        let solution_raw = self.task.solution_or_compute()?;
        let submission_raw = submission.input.trim();

        debug!(
            mode = ?submission.mode,
            level = submission.feedback_level,
            "grading submission"
        );

        // Syntax validation: answer count, character set, label membership.
        // The length check compares the original token counts, before any
        // padding.
        let solution_count = token_count(&solution_raw);
        let submitted_count = token_count(submission_raw);

        let allowed = self.task.allowed_labels();
        let mut unknown: Vec<String> = Vec::new();
        for token in submission_raw.split(',').map(str::trim) {
            if token.is_empty() {
                continue; // blanks always allowed
            }
            if !allowed.contains(&token.to_uppercase()) && !unknown.iter().any(|u| u == token) {
                unknown.push(token.to_string());
            }
        }

        let length_ok = submitted_count == solution_count;
        let chars_ok = submission_raw
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == ',' || c == ' ');
        let labels_ok = unknown.is_empty();
        let syntax_valid = length_ok && chars_ok && labels_ok;

        let syntax_feedback = if syntax_valid {
            feedback::syntax_valid()
        } else if !length_ok {
            feedback::length_mismatch(solution_count, submitted_count)
        } else if !chars_ok {
            feedback::invalid_chars()
        } else {
            feedback::invalid_labels(&unknown)
        };

        let mut criteria = vec![
            Criterion::builder()
                .name(feedback::SYNTAX_CRITERION)
                .passed(syntax_valid)
                .feedback(syntax_feedback.clone())
                .build(),
        ];

        // Practice runs report the ceiling but never award points or reveal
        // per-item detail.
        if submission.mode == SubmissionMode::Run {
            return Ok(GradingResult::builder()
                .max_points(self.task.max_points)
                .points(Decimal::ZERO)
                .general_feedback("")
                .criteria(criteria)
                .build());
        }

        let mut ctx = GradingContext::new(
            &solution_raw,
            submission_raw,
            self.task.max_points,
            syntax_valid,
        );

        // Level 0: totals only, no per-item breakdown.
        if submission.feedback_level == 0 {
            let points = if syntax_valid {
                for index in 0..ctx.solution_len() {
                    ctx.grade_item(index);
                }
                ctx.total()
            } else {
                Decimal::ZERO
            };

            return Ok(GradingResult::builder()
                .max_points(self.task.max_points)
                .points(points)
                .general_feedback(syntax_feedback)
                .criteria(criteria)
                .build());
        }

        if syntax_valid {
            if submission.feedback_level == 1 {
                self.add_per_item_feedback(&mut ctx, &mut criteria);
            } else {
                self.add_per_item_feedback_with_explanations(&mut ctx, &mut criteria)?;
            }
        }

        debug!(
            correct = ctx.correct,
            incorrect = ctx.incorrect,
            skipped = ctx.skipped,
            "graded submission"
        );

        let mut overall = if syntax_valid && ctx.incorrect == 0 {
            feedback::overall_correct()
        } else {
            feedback::overall_incorrect()
        };

        if syntax_valid && submission.feedback_level >= 3 {
            if let Some(image) = self.task.solution_image_base64.as_deref().map(str::trim) {
                if !image.is_empty() {
                    overall = feedback::embed_solution_image(&overall, image);
                }
            }
        }

        Ok(GradingResult::builder()
            .max_points(self.task.max_points)
            .points(ctx.total())
            .general_feedback(overall)
            .criteria(criteria)
            .build())
    }

    /// Adds one criterion per test item with its signed point delta and a
    /// correct/incorrect/skipped verdict (feedback level 1).
    fn add_per_item_feedback(&self, ctx: &mut GradingContext, out: &mut Vec<Criterion>) {
        for index in 0..ctx.solution_len() {
            let (outcome, points) = ctx.grade_item(index);
            out.push(item_criterion(index, outcome, points, item_feedback(outcome)));
        }
    }

    /// Adds per-item criteria that additionally embed the full
    /// classification explanation (feedback levels 2 and 3).
    ///
    /// Falls back to plain per-item feedback when the task carries no
    /// training or test data to explain with.
    fn add_per_item_feedback_with_explanations(
        &self,
        ctx: &mut GradingContext,
        out: &mut Vec<Criterion>,
    ) -> Result<(), TaskError> {
        if self.task.train_points.is_empty() || self.task.test_points.is_empty() {
            warn!("Task has no training or test data; omitting classification explanations.");
            self.add_per_item_feedback(ctx, out);
            return Ok(());
        }

        let classifier = self.task.classifier()?;

        for index in 0..ctx.solution_len().min(self.task.test_points.len()) {
            let (outcome, points) = ctx.grade_item(index);
            let point = self.task.test_points[index];
            let explanation = classifier.explain(point, None)?;
            out.push(item_criterion(
                index,
                outcome,
                points,
                feedback::render_explanation(point, &explanation),
            ));
        }

        Ok(())
    }
}

/// Builds the criterion for one graded item.
fn item_criterion(index: usize, outcome: ItemOutcome, points: Decimal, text: String) -> Criterion {
    Criterion::builder()
        .name(feedback::item_criterion(index + 1))
        .points(round_points(points))
        .passed(outcome != ItemOutcome::Incorrect)
        .feedback(text)
        .build()
}

/// Plain per-item verdict text for an outcome.
fn item_feedback(outcome: ItemOutcome) -> String {
    match outcome {
        ItemOutcome::Correct => feedback::item_correct(),
        ItemOutcome::Incorrect => feedback::item_incorrect(),
        ItemOutcome::Skipped => feedback::item_skipped(),
    }
}
