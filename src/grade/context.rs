#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use rust_decimal::{Decimal, RoundingStrategy};

/// Internal precision for points-per-answer before final rounding.
const PPA_SCALE: u32 = 10;
/// Scale of all point values reported to callers.
const REPORT_SCALE: u32 = 2;

/// Rounds a point value half-up to the reporting scale of 2 decimals.
pub(crate) fn round_points(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(REPORT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// The outcome of one graded answer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemOutcome {
    /// Case-insensitive match with the solution token.
    Correct,
    /// Non-blank token that does not match the solution.
    Incorrect,
    /// Blank token; always permitted and never penalized.
    Skipped,
}

/// Counters and token sequences shared across one grading call. Created per
/// submission and discarded with it.
pub(crate) struct GradingContext {
    /// Solution tokens, split on commas and trimmed.
    solution:        Vec<String>,
    /// Submitted tokens, trimmed and padded with blanks up to the solution
    /// length. Longer submissions are never truncated; the length check
    /// reports them instead.
    provided:        Vec<String>,
    /// Points per answer at internal precision, half-up.
    ppa:             Decimal,
    /// Correctly answered items.
    pub correct:     usize,
    /// Incorrectly answered items.
    pub incorrect:   usize,
    /// Skipped (blank) items.
    pub skipped:     usize,
    /// Running total at internal precision.
    total:           Decimal,
}

/// Splits a raw answer string into trimmed comma-separated tokens.
fn tokens(raw: &str) -> Vec<String> {
    raw.split(',').map(|t| t.trim().to_string()).collect()
}

impl GradingContext {
    /// Builds a context from the raw solution and submission strings.
    ///
    /// `syntax_valid` controls whether a points-per-answer is derived; an
    /// invalid submission always grades to zero.
    pub fn new(solution_raw: &str, submission_raw: &str, max_points: Decimal, syntax_valid: bool) -> Self {
        let solution = tokens(solution_raw);
        let mut provided = tokens(submission_raw);

        while provided.len() < solution.len() {
            provided.push(String::new());
        }

        let ppa = if syntax_valid && !solution.is_empty() {
            (max_points / Decimal::from(solution.len()))
                .round_dp_with_strategy(PPA_SCALE, RoundingStrategy::MidpointAwayFromZero)
        } else {
            Decimal::ZERO
        };

        Self {
            solution,
            provided,
            ppa,
            correct: 0,
            incorrect: 0,
            skipped: 0,
            total: Decimal::ZERO,
        }
    }

    /// Number of solution tokens.
    pub fn solution_len(&self) -> usize {
        self.solution.len()
    }

    /// Grades the item at `index`: updates the counters and running total
    /// and returns the outcome with its signed point delta.
    ///
    /// Scoring is symmetric: a correct answer earns `+ppa`, a wrong answer
    /// costs `-ppa`, a blank contributes nothing.
    pub fn grade_item(&mut self, index: usize) -> (ItemOutcome, Decimal) {
        let provided = &self.provided[index];

        let outcome = if provided.is_empty() {
            ItemOutcome::Skipped
        } else if self.solution[index].eq_ignore_ascii_case(provided) {
            ItemOutcome::Correct
        } else {
            ItemOutcome::Incorrect
        };

        let points = match outcome {
            ItemOutcome::Correct => {
                self.correct += 1;
                self.ppa
            }
            ItemOutcome::Incorrect => {
                self.incorrect += 1;
                -self.ppa
            }
            ItemOutcome::Skipped => {
                self.skipped += 1;
                Decimal::ZERO
            }
        };

        self.total += points;
        (outcome, points)
    }

    /// The running total, rounded half-up to the reporting scale.
    pub fn total(&self) -> Decimal {
        round_points(self.total)
    }
}
