#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Write as _;

use itertools::Itertools;

use crate::knn::{Classification, Point};

/// Name of the syntax criterion.
pub(crate) const SYNTAX_CRITERION: &str = "Syntax";

/// Feedback for a submission that passed all syntax checks.
pub(crate) fn syntax_valid() -> String {
    "Submission is well-formed.".to_string()
}

/// Feedback for a submission with the wrong number of answers.
pub(crate) fn length_mismatch(expected: usize, actual: usize) -> String {
    format!("Wrong number of answers: expected {expected}, got {actual}.")
}

/// Feedback for a submission containing characters outside the allowed set.
pub(crate) fn invalid_chars() -> String {
    "Submission may only contain letters, spaces, and commas.".to_string()
}

/// Feedback naming the submitted labels that do not occur in the training
/// set.
pub(crate) fn invalid_labels(labels: &[String]) -> String {
    format!("Unknown class label(s): {}.", labels.join(", "))
}

/// Name of the per-item criterion for the 1-based test point `number`.
pub(crate) fn item_criterion(number: usize) -> String {
    format!("Classification for point {number}")
}

/// Overall feedback for a fully correct submission.
pub(crate) fn overall_correct() -> String {
    "Correct.".to_string()
}

/// Overall feedback for a submission with at least one error.
pub(crate) fn overall_incorrect() -> String {
    "Incorrect.".to_string()
}

/// Per-item feedback for a correct answer.
pub(crate) fn item_correct() -> String {
    "Correct.".to_string()
}

/// Per-item feedback for an incorrect answer.
pub(crate) fn item_incorrect() -> String {
    "Incorrect.".to_string()
}

/// Per-item feedback for a skipped answer.
pub(crate) fn item_skipped() -> String {
    "Skipped.".to_string()
}

/// Renders the full classification explanation for one test point as a
/// small HTML fragment: coordinates, prediction, the neighbour table, vote
/// counts, and the tie-break reason. Distances are shown to 2 decimals.
pub(crate) fn render_explanation(point: Point, result: &Classification) -> String {
    let mut html = String::new();

    html.push_str("<div>");
    let _ = write!(html, "<b>Test point:</b> {point}<br>");
    let _ = write!(
        html,
        "<b>Classified as:</b> <span style='color:green'>{}</span><br>",
        result.prediction
    );
    html.push_str("<b>Selected neighbours:</b>");
    html.push_str(
        "<table border='1' cellpadding='2' cellspacing='0' style='border-collapse:collapse;'>\
         <tr><th>#</th><th>Index</th><th>Class</th><th>Distance</th></tr>",
    );
    for (row, neighbor) in result.neighbors.iter().enumerate() {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td></tr>",
            row + 1,
            neighbor.index,
            neighbor.label,
            neighbor.distance
        );
    }
    html.push_str("</table>");
    let _ = write!(
        html,
        "<b>Votes per class:</b> {}<br>",
        result
            .votes
            .iter()
            .map(|(label, count)| format!("{label}: {count}"))
            .join(", ")
    );
    let _ = write!(html, "<b>Decided by:</b> {}", result.reason);
    html.push_str("</div>");

    html
}

/// Appends the solution visualization to the overall feedback when the task
/// carries one. The image itself is produced by an external collaborator;
/// only the reference is attached here.
pub(crate) fn embed_solution_image(overall: &str, image_base64: &str) -> String {
    format!(
        "{overall}<br><b>Solution visualization:</b><br><img \
         src=\"data:image/png;base64,{image_base64}\" \
         style=\"max-width:90%;border:2px solid #444;margin:8px 0;\"/>"
    )
}
