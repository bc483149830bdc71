#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use bon::Builder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, Width, object::Rows},
};

/// One graded criterion: the syntax check or a single test item.
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(on(String, into))]
pub struct Criterion {
    /// Display name of the criterion.
    pub name:     String,
    /// Signed point delta this criterion contributed. `None` for the syntax
    /// criterion, which carries no points of its own.
    pub points:   Option<Decimal>,
    /// Whether the criterion is satisfied. Skipped items count as passed.
    pub passed:   bool,
    /// Feedback text; plain for levels 0-1, simple HTML for levels 2-3.
    pub feedback: String,
}

/// The complete outcome of grading one submission. Produced exactly once per
/// grading call.
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(on(String, into))]
pub struct GradingResult {
    /// Maximum points awardable for the task.
    pub max_points:       Decimal,
    /// Points awarded, rounded half-up to 2 decimals. May be negative.
    pub points:           Decimal,
    /// Overall feedback for the whole submission.
    pub general_feedback: String,
    /// Ordered criteria: the syntax criterion first, then one per test item
    /// depending on feedback level.
    pub criteria:         Vec<Criterion>,
}

/// A row of the rendered results table.
#[derive(Tabled)]
struct CriterionRow {
    /// Criterion name.
    #[tabled(rename = "Criterion")]
    name:     String,
    /// Signed points, or a dash for the syntax criterion.
    #[tabled(rename = "Points")]
    points:   String,
    /// Pass/fail marker.
    #[tabled(rename = "Ok")]
    passed:   String,
    /// Feedback text.
    #[tabled(rename = "Feedback")]
    feedback: String,
}

impl GradingResult {
    /// Renders the result as a table for terminal display.
    pub fn table(&self) -> String {
        let rows = self
            .criteria
            .iter()
            .map(|c| CriterionRow {
                name:     c.name.clone(),
                points:   c.points.map_or_else(|| "-".to_string(), |p| format!("{p:.2}")),
                passed:   if c.passed { "✓".to_string() } else { "✗".to_string() },
                feedback: c.feedback.clone(),
            })
            .collect::<Vec<_>>();

        Table::new(rows)
            .with(Panel::header(format!(
                "Grade: {:.2}/{:.2}",
                self.points, self.max_points
            )))
            .with(Modify::new(Rows::new(1..)).with(Width::wrap(60).keep_words(true)))
            .with(Modify::new(Rows::new(1..)).with(Alignment::left()))
            .with(Style::modern())
            .to_string()
    }
}
