#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::{BTreeMap, HashSet};

use bon::Builder;
use itertools::Itertools;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::knn::{Classifier, ClassifierConfig, ClassifierError, Metric, MetricError, Point, TieBreak};

/// Default number of neighbours when a task omits `k`.
const DEFAULT_K: usize = 3;

/// An enum to represent possible errors when reading or using a task
/// definition.
#[derive(thiserror::Error, Debug)]
pub enum TaskError {
    /// The task JSON could not be parsed at all.
    #[error("Could not parse task definition: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configured `k` is not a positive integer.
    #[error("k must be at least 1, got {0}.")]
    InvalidK(usize),
    /// The distance metric configuration is invalid.
    #[error(transparent)]
    Metric(#[from] MetricError),
    /// The classifier rejected the task's training data.
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// A single k-NN exercise: labelled training points, unlabelled test points,
/// classifier configuration, and grading parameters.
///
/// This is the input surface supplied by the surrounding task-management
/// layer; the engines in this crate only ever read it.
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase", default)]
#[builder(on(String, into))]
pub struct TaskDefinition {
    /// Training data as a mapping from label to its points. A missing or
    /// malformed collection degrades to empty here; classification then
    /// reports the empty training set instead of crashing.
    #[builder(default)]
    pub train_points: BTreeMap<String, Vec<Point>>,
    /// The points students are asked to classify, in answer order.
    #[builder(default)]
    pub test_points:  Vec<Point>,
    /// Number of neighbours to consult. Defaults to 3 when omitted.
    #[builder(default = DEFAULT_K)]
    pub k:            usize,
    /// Distance metric name (`manhattan`, `euclidean`, or `minkowski`).
    /// Defaults to `euclidean` when omitted.
    pub metric:       Option<String>,
    /// Minkowski order, used only when `metric` is `minkowski`.
    #[builder(default = 3)]
    pub order:        u32,
    /// Tie-break strategy name (`sum`, `mean`, `nearest`, or
    /// `alphabetical`). Defaults to `sum` when omitted.
    pub tiebreaker:   Option<String>,
    /// Maximum points awardable for this task.
    #[builder(default)]
    pub max_points:   Decimal,
    /// The canonical comma-joined solution, one label per test point. When
    /// absent it is recomputed by running the classifier.
    pub solution:     Option<String>,
    /// Optional base64-encoded PNG visualising the solution, rendered by an
    /// external collaborator. Only referenced at feedback level 3.
    pub solution_image_base64: Option<String>,
}

impl Default for TaskDefinition {
    fn default() -> Self {
        Self {
            train_points: BTreeMap::new(),
            test_points:  Vec::new(),
            k:            DEFAULT_K,
            metric:       None,
            order:        3,
            tiebreaker:   None,
            max_points:   Decimal::ZERO,
            solution:     None,
            solution_image_base64: None,
        }
    }
}

impl TaskDefinition {
    /// Parses a task definition from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, TaskError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Flattens the training map into the canonical parallel
    /// (points, labels) sequences, label groups in lexicographic order and
    /// points in insertion order within each group.
    pub fn flatten(&self) -> (Vec<Point>, Vec<String>) {
        let mut points = Vec::new();
        let mut labels = Vec::new();

        for (label, group) in &self.train_points {
            points.extend(group.iter().copied());
            labels.extend(std::iter::repeat_n(label.clone(), group.len()));
        }

        (points, labels)
    }

    /// The set of labels a submission may use, uppercased for
    /// case-insensitive membership checks.
    pub fn allowed_labels(&self) -> HashSet<String> {
        self.train_points
            .keys()
            .map(|l| l.trim().to_uppercase())
            .collect()
    }

    /// Resolves the task's classifier configuration, validating `k` and the
    /// metric name.
    pub fn classifier_config(&self) -> Result<ClassifierConfig, TaskError> {
        if self.k < 1 {
            return Err(TaskError::InvalidK(self.k));
        }

        Ok(ClassifierConfig {
            k:         self.k,
            metric:    Metric::parse(self.metric.as_deref(), self.order)?,
            tie_break: TieBreak::parse(self.tiebreaker.as_deref()),
        })
    }

    /// Builds a classifier fitted to this task's training data.
    pub fn classifier(&self) -> Result<Classifier, TaskError> {
        let config = self.classifier_config()?;
        let (points, labels) = self.flatten();
        debug!(
            k = config.k,
            metric = %config.metric,
            training_points = points.len(),
            "fitting classifier"
        );
        Ok(Classifier::fit(config, points, labels)?)
    }

    /// Computes the canonical solution by classifying every test point, as a
    /// comma-joined label string in test-point order. This is the ground
    /// truth all grading compares against.
    pub fn compute_solution(&self) -> Result<String, TaskError> {
        let classifier = self.classifier()?;
        let results = classifier.classify_all(&self.test_points)?;
        Ok(results.iter().map(|r| r.prediction.as_str()).join(","))
    }

    /// The canonical solution string: the stored one when present, otherwise
    /// freshly computed.
    pub fn solution_or_compute(&self) -> Result<String, TaskError> {
        match self.solution.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Ok(s.to_string()),
            _ => self.compute_solution(),
        }
    }
}
