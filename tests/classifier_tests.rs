use knn_grader::{
    Classifier, ClassifierConfig, ClassifierError, Metric, Point, TieBreak, TieBreakReason,
};

fn fitted(k: usize, metric: Metric, tie_break: TieBreak, data: &[(i64, i64, &str)]) -> Classifier {
    let points = data.iter().map(|(x, y, _)| Point::new(*x, *y)).collect();
    let labels = data.iter().map(|(_, _, l)| l.to_string()).collect();
    Classifier::fit(ClassifierConfig { k, metric, tie_break }, points, labels).expect("fit")
}

#[test]
fn k1_picks_the_single_nearest_point() {
    let clf = fitted(1, Metric::Euclidean, TieBreak::Sum, &[(2, 2, "A"), (8, 8, "B")]);

    let near_a = clf.classify(Point::new(3, 3)).expect("classify");
    assert_eq!(near_a.prediction, "A");
    assert_eq!(near_a.votes.get("A"), Some(&1));

    let near_b = clf.classify(Point::new(8, 7)).expect("classify");
    assert_eq!(near_b.prediction, "B");
    assert_eq!(near_b.votes.get("B"), Some(&1));
}

#[test]
fn clear_majority_needs_no_tie_break() {
    let clf = fitted(3, Metric::Euclidean, TieBreak::Sum, &[
        (1, 0, "A"),
        (2, 0, "A"),
        (1, 1, "B"),
    ]);
    let result = clf.classify(Point::new(0, 0)).expect("classify");
    assert_eq!(result.prediction, "A");
    assert_eq!(result.reason, TieBreakReason::Majority);
}

#[test]
fn nearest_strategy_breaks_vote_ties() {
    let clf = fitted(4, Metric::Euclidean, TieBreak::Nearest, &[
        (1, 0, "A"),
        (3, 0, "A"),
        (-2, 0, "B"),
        (-3, 0, "B"),
    ]);
    let result = clf.classify(Point::new(0, 0)).expect("classify");
    assert_eq!(result.prediction, "A");
    assert_eq!(result.reason, TieBreakReason::NearestNeighbor);
}

#[test]
fn mean_strategy_breaks_vote_ties() {
    let clf = fitted(4, Metric::Euclidean, TieBreak::Mean, &[
        (1, 0, "A"),
        (2, 0, "A"),
        (-1, 0, "B"),
        (-4, 0, "B"),
    ]);
    let result = clf.classify(Point::new(0, 0)).expect("classify");
    // mean(A) = 1.5 beats mean(B) = 2.5
    assert_eq!(result.prediction, "A");
    assert_eq!(result.reason, TieBreakReason::MeanDistance);
}

#[test]
fn sum_strategy_breaks_vote_ties() {
    let clf = fitted(4, Metric::Euclidean, TieBreak::Sum, &[
        (1, 0, "A"),
        (4, 0, "A"),
        (-1, 0, "B"),
        (-2, 0, "B"),
    ]);
    let result = clf.classify(Point::new(0, 0)).expect("classify");
    // sum(B) = 3 beats sum(A) = 5
    assert_eq!(result.prediction, "B");
    assert_eq!(result.reason, TieBreakReason::SumDistance);
}

#[test]
fn exact_statistic_tie_falls_back_to_alphabetical() {
    for strategy in [TieBreak::Sum, TieBreak::Mean, TieBreak::Nearest] {
        let clf = fitted(2, Metric::Euclidean, strategy, &[(1, 0, "A"), (-1, 0, "B")]);
        let result = clf.classify(Point::new(0, 0)).expect("classify");
        assert_eq!(result.prediction, "A");
        assert_eq!(result.reason, TieBreakReason::Alphabetical);
    }
}

#[test]
fn metric_choice_can_change_the_prediction() {
    let data = [(-10, -2, "A"), (-9, -4, "B"), (-8, -6, "C")];
    let query = Point::new(0, 0);

    let manhattan = fitted(1, Metric::Manhattan, TieBreak::Sum, &data)
        .classify(query)
        .expect("classify");
    let euclidean = fitted(1, Metric::Euclidean, TieBreak::Sum, &data)
        .classify(query)
        .expect("classify");
    let minkowski = fitted(1, Metric::Minkowski(3), TieBreak::Sum, &data)
        .classify(query)
        .expect("classify");

    assert_eq!(manhattan.prediction, "A");
    assert_eq!(euclidean.prediction, "B");
    assert_eq!(minkowski.prediction, "C");
}

#[test]
fn fit_rejects_mismatched_lengths() {
    let err = Classifier::fit(
        ClassifierConfig {
            k:         1,
            metric:    Metric::Euclidean,
            tie_break: TieBreak::Sum,
        },
        vec![Point::new(0, 0), Point::new(1, 1)],
        vec!["A".to_string()],
    )
    .expect_err("mismatched lengths");
    assert!(matches!(err, ClassifierError::MismatchedLengths { points: 2, labels: 1 }));
}

#[test]
fn classifying_without_training_data_fails() {
    let clf = Classifier::fit(
        ClassifierConfig {
            k:         1,
            metric:    Metric::Euclidean,
            tie_break: TieBreak::Sum,
        },
        Vec::new(),
        Vec::new(),
    )
    .expect("fit");
    let err = clf.classify(Point::new(0, 0)).expect_err("empty training set");
    assert!(matches!(err, ClassifierError::EmptyTrainingSet));
}

#[test]
fn classification_is_deterministic() {
    let clf = fitted(3, Metric::Euclidean, TieBreak::Mean, &[
        (1, 0, "A"),
        (2, 0, "A"),
        (-1, 0, "B"),
        (-4, 0, "B"),
    ]);
    let first = clf.classify(Point::new(0, 0)).expect("classify");
    let second = clf.classify(Point::new(0, 0)).expect("classify");
    assert_eq!(first, second);
}

#[test]
fn explain_accepts_a_one_off_strategy_override() {
    let clf = fitted(4, Metric::Euclidean, TieBreak::Sum, &[
        (1, 0, "A"),
        (4, 0, "A"),
        (-1, 0, "B"),
        (-2, 0, "B"),
    ]);

    // Configured strategy resolves by sum, the override by nearest; the
    // nearest distances tie exactly, so it falls through to alphabetical.
    let by_sum = clf.classify(Point::new(0, 0)).expect("classify");
    assert_eq!(by_sum.prediction, "B");

    let by_nearest = clf
        .explain(Point::new(0, 0), Some(TieBreak::Nearest))
        .expect("explain");
    assert_eq!(by_nearest.prediction, "A");
    assert_eq!(by_nearest.reason, TieBreakReason::Alphabetical);
}

#[test]
fn classify_all_preserves_input_order() {
    let clf = fitted(1, Metric::Euclidean, TieBreak::Sum, &[(2, 2, "A"), (8, 8, "B")]);
    let results = clf
        .classify_all(&[Point::new(8, 7), Point::new(3, 3)])
        .expect("classify all");
    let predictions = results.iter().map(|r| r.prediction.as_str()).collect::<Vec<_>>();
    assert_eq!(predictions, vec!["B", "A"]);
}
