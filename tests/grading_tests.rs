use std::collections::BTreeMap;

use knn_grader::{GradingEngine, Point, Submission, SubmissionMode, TaskDefinition};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A task with one training point per label and one test point at (2, 2),
/// whose nearest neighbour is "A".
fn single_point_task() -> TaskDefinition {
    TaskDefinition::builder()
        .train_points(BTreeMap::from([
            ("A".to_string(), vec![Point::new(1, 1)]),
            ("B".to_string(), vec![Point::new(8, 8)]),
        ]))
        .test_points(vec![Point::new(2, 2)])
        .k(1)
        .metric("euclidean")
        .tiebreaker("sum")
        .max_points(dec!(10))
        .build()
}

fn submit(input: &str, level: u8) -> Submission {
    Submission::builder()
        .input(input)
        .mode(SubmissionMode::Submit)
        .feedback_level(level)
        .build()
}

#[test]
fn correct_answer_earns_full_points() {
    let task = single_point_task();
    let result = GradingEngine::new(&task).grade(&submit("A", 1)).expect("grade");
    assert_eq!(result.points, dec!(10.00));
    assert_eq!(result.max_points, dec!(10));
}

#[test]
fn valid_but_wrong_answer_earns_negative_points() {
    let task = single_point_task();
    let result = GradingEngine::new(&task).grade(&submit("B", 1)).expect("grade");
    assert!(result.points < Decimal::ZERO);
}

#[test]
fn run_mode_reports_ceiling_but_awards_nothing() {
    let task = single_point_task();
    let submission = Submission::builder()
        .input("A")
        .mode(SubmissionMode::Run)
        .feedback_level(1)
        .build();

    let result = GradingEngine::new(&task).grade(&submission).expect("grade");
    assert_eq!(result.points, Decimal::ZERO);
    assert_eq!(result.max_points, dec!(10));
    assert_eq!(result.criteria.len(), 1, "run mode must not reveal per-item detail");
    assert!(result.general_feedback.is_empty());
}

#[test]
fn too_many_answers_is_a_length_mismatch() {
    let task = single_point_task();
    let result = GradingEngine::new(&task).grade(&submit("A,B", 1)).expect("grade");
    assert_eq!(result.points, Decimal::ZERO);
    assert_eq!(result.criteria.len(), 1);
    assert!(result.criteria[0].feedback.contains("expected 1, got 2"));
}

#[test]
fn too_few_answers_is_a_length_mismatch() {
    let mut task = single_point_task();
    task.test_points = vec![Point::new(2, 2), Point::new(8, 8)];
    task.solution = Some("A,B".to_string());

    let result = GradingEngine::new(&task).grade(&submit("A", 1)).expect("grade");
    assert_eq!(result.points, Decimal::ZERO);
    assert!(result.criteria[0].feedback.contains("expected 2, got 1"));
}

#[test]
fn unknown_labels_are_named_in_the_syntax_criterion() {
    let task = single_point_task();
    let result = GradingEngine::new(&task).grade(&submit("Z", 1)).expect("grade");
    assert_eq!(result.points, Decimal::ZERO);
    assert_eq!(result.criteria.len(), 1);
    assert!(result.criteria[0].feedback.contains('Z'));
}

#[test]
fn interior_tabs_are_illegal_characters_not_unknown_labels() {
    let task = single_point_task();
    let result = GradingEngine::new(&task).grade(&submit("A\tA", 1)).expect("grade");
    assert_eq!(result.points, Decimal::ZERO);
    assert_eq!(result.criteria.len(), 1);
    assert!(result.criteria[0].feedback.contains("letters"));
    assert!(!result.criteria[0].feedback.contains("Unknown"));
}

#[test]
fn illegal_characters_fail_the_syntax_check() {
    let task = single_point_task();
    let result = GradingEngine::new(&task).grade(&submit("{}", 1)).expect("grade");
    assert_eq!(result.points, Decimal::ZERO);
    assert_eq!(result.criteria.len(), 1);
    assert!(result.criteria[0].feedback.contains("letters"));
}

#[test]
fn blank_answer_is_skipped_not_incorrect() {
    let task = single_point_task();
    let result = GradingEngine::new(&task).grade(&submit("", 1)).expect("grade");
    assert_eq!(result.points, dec!(0.00));

    let item = &result.criteria[1];
    assert!(item.feedback.contains("Skipped"));
    assert!(item.passed, "skipped answers are not wrong answers");
    assert_eq!(item.points, Some(dec!(0.00)));
}

#[test]
fn case_differences_do_not_cost_points() {
    let task = single_point_task();
    let result = GradingEngine::new(&task).grade(&submit("a", 1)).expect("grade");
    assert_eq!(result.points, dec!(10.00));
}

#[test]
fn level_zero_returns_totals_only() {
    let task = single_point_task();
    let result = GradingEngine::new(&task).grade(&submit("A", 0)).expect("grade");
    assert_eq!(result.criteria.len(), 1, "level 0 has only the syntax criterion");
    assert_eq!(result.points, dec!(10.00));
}

#[test]
fn level_one_adds_one_criterion_per_item() {
    let task = single_point_task();
    let result = GradingEngine::new(&task).grade(&submit("A", 1)).expect("grade");
    assert_eq!(result.criteria.len(), 2);
    assert!(result.criteria[1].name.contains("point 1"));
    assert_eq!(result.criteria[1].points, Some(dec!(10.00)));
}

#[test]
fn level_two_embeds_the_classification_explanation() {
    let task = single_point_task();
    let result = GradingEngine::new(&task).grade(&submit("A", 2)).expect("grade");
    assert!(result.criteria.iter().any(|c| c.feedback.contains("<table")));
    assert!(result.criteria.iter().any(|c| c.feedback.contains("majority vote")));
}

#[test]
fn explanations_degrade_to_plain_feedback_without_test_data() {
    // A stored solution lets grading proceed even when the task carries no
    // test points to explain with.
    let mut task = single_point_task();
    task.test_points = Vec::new();
    task.solution = Some("A,B".to_string());

    let result = GradingEngine::new(&task).grade(&submit("A,B", 2)).expect("grade");
    assert_eq!(result.points, dec!(10.00));
    assert_eq!(result.criteria.len(), 3, "syntax plus one criterion per item");
    assert!(result.criteria.iter().all(|c| !c.feedback.contains("<table")));
}

#[test]
fn level_three_embeds_the_solution_visualization() {
    let mut task = single_point_task();
    task.solution_image_base64 = Some("iVBORw0KGgoAAAANSUhEUgAA".to_string());

    let result = GradingEngine::new(&task).grade(&submit("A", 3)).expect("grade");
    assert!(result.general_feedback.contains("<img"));
    assert!(result.general_feedback.contains("base64"));
}

#[test]
fn tie_break_reason_shows_up_in_explanations() {
    let task = TaskDefinition::builder()
        .train_points(BTreeMap::from([
            ("A".to_string(), vec![Point::new(1, 0)]),
            ("B".to_string(), vec![Point::new(3, 0)]),
        ]))
        .test_points(vec![Point::new(0, 0)])
        .k(2)
        .metric("euclidean")
        .tiebreaker("nearest")
        .max_points(dec!(10))
        .build();

    let result = GradingEngine::new(&task).grade(&submit("A", 2)).expect("grade");
    assert!(
        result
            .criteria
            .iter()
            .any(|c| c.feedback.contains("closest single neighbour"))
    );
}

#[test]
fn balanced_right_and_wrong_answers_net_zero() {
    let task = TaskDefinition::builder()
        .train_points(BTreeMap::from([
            ("A".to_string(), vec![Point::new(1, 1)]),
            ("B".to_string(), vec![Point::new(8, 8)]),
        ]))
        .test_points(vec![Point::new(1, 1), Point::new(8, 8), Point::new(2, 2)])
        .k(1)
        .max_points(dec!(10))
        .build();

    // Solution is A,B,A: one correct, one wrong, one skipped.
    let result = GradingEngine::new(&task).grade(&submit("A,A,", 1)).expect("grade");
    assert_eq!(result.points, dec!(0.00));
    assert_eq!(result.criteria.len(), 4);
}

#[test]
fn stored_solution_takes_precedence_over_recomputation() {
    let mut task = single_point_task();
    task.solution = Some("B".to_string());

    let result = GradingEngine::new(&task).grade(&submit("B", 1)).expect("grade");
    assert_eq!(result.points, dec!(10.00));
}

#[test]
fn overall_feedback_reflects_correctness() {
    let task = single_point_task();
    let engine = GradingEngine::new(&task);

    let correct = engine.grade(&submit("A", 1)).expect("grade");
    assert_eq!(correct.general_feedback, "Correct.");

    let wrong = engine.grade(&submit("B", 1)).expect("grade");
    assert_eq!(wrong.general_feedback, "Incorrect.");

    // Skipping everything is not an error, so the overall verdict stays
    // positive.
    let skipped = engine.grade(&submit("", 1)).expect("grade");
    assert_eq!(skipped.general_feedback, "Correct.");
}
