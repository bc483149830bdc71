#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Metric, Point};

/// An enum to represent possible errors when fitting or querying a
/// classifier.
#[derive(thiserror::Error, Debug)]
pub enum ClassifierError {
    /// Training points and labels were of unequal length at fit time. This is
    /// a configuration failure and is never silently truncated.
    #[error("Point and label list must be of equal length, got {points} points and {labels} labels.")]
    MismatchedLengths {
        /// Number of training points supplied.
        points: usize,
        /// Number of training labels supplied.
        labels: usize,
    },
    /// Classification was attempted with no fitted training data.
    #[error("Cannot classify with an empty training set.")]
    EmptyTrainingSet,
}

/// The strategy used to resolve equal vote counts among candidate labels.
///
/// Each strategy keeps the tied labels with the smallest value of one
/// neighbour-distance statistic. If the statistic itself ties exactly, the
/// lexicographically smallest label wins regardless of strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// Smallest total neighbour distance. The documented default.
    #[default]
    Sum,
    /// Smallest mean neighbour distance.
    Mean,
    /// Smallest single nearest-neighbour distance.
    Nearest,
}

impl TieBreak {
    /// Resolves a configured strategy name into a `TieBreak`.
    ///
    /// Names are matched case-insensitively. `alphabetical` is a legal name
    /// that resolves ties like `sum` does before the final alphabetical
    /// fallback applies. A missing, blank, or unrecognized name falls back
    /// to `sum`, the documented default; that fallback is logged rather
    /// than silently applied.
    pub fn parse(name: Option<&str>) -> Self {
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(n) => n.to_ascii_lowercase(),
            None => return TieBreak::Sum,
        };

        match name.as_str() {
            "sum" | "alphabetical" => TieBreak::Sum,
            "mean" => TieBreak::Mean,
            "nearest" => TieBreak::Nearest,
            other => {
                warn!("Unrecognized tie-break strategy `{other}`, falling back to `sum`.");
                TieBreak::Sum
            }
        }
    }
}

/// The terminal outcome of the tie-break decision procedure. Exactly one
/// reason is attached to every classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TieBreakReason {
    /// A unique label held a strict majority of the votes.
    Majority,
    /// The tie was resolved by smallest total neighbour distance.
    SumDistance,
    /// The tie was resolved by smallest mean neighbour distance.
    MeanDistance,
    /// The tie was resolved by smallest single nearest-neighbour distance.
    NearestNeighbor,
    /// The chosen statistic tied exactly; the lexicographically smallest
    /// label was picked. The only outcome decided by label ordering.
    Alphabetical,
}

impl std::fmt::Display for TieBreakReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TieBreakReason::Majority => write!(f, "majority vote"),
            TieBreakReason::SumDistance => write!(f, "smallest summed distance"),
            TieBreakReason::MeanDistance => write!(f, "smallest mean distance"),
            TieBreakReason::NearestNeighbor => write!(f, "closest single neighbour"),
            TieBreakReason::Alphabetical => write!(f, "alphabetical order"),
        }
    }
}

/// A training point selected as a neighbour of a query point, for
/// explanation purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Index of the point in the fitted training set.
    pub index:    usize,
    /// Class label of the training point.
    pub label:    String,
    /// Distance from the query point.
    pub distance: f64,
}

/// The full result of classifying one query point: the prediction plus
/// everything needed to explain it. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// The predicted class label.
    pub prediction: String,
    /// The selected neighbours, ordered by distance (training-set order
    /// breaks exact distance ties). May hold more than `k` entries when
    /// several points tie at the cutoff distance.
    pub neighbors:  Vec<Neighbor>,
    /// Votes per label over the selected neighbours.
    pub votes:      BTreeMap<String, usize>,
    /// How the prediction was decided.
    pub reason:     TieBreakReason,
}

/// Per-label accumulator over the selected neighbour set. All four
/// statistics are filled in one pass, keyed by label index rather than by
/// re-hashing label strings.
#[derive(Debug, Clone)]
struct LabelStats {
    /// The label these statistics describe.
    label: String,
    /// Number of selected neighbours with this label.
    count: usize,
    /// Total distance of those neighbours.
    sum:   f64,
    /// Mean distance; derived from `sum` and `count` by a single division.
    mean:  f64,
    /// Smallest single neighbour distance.
    min:   f64,
}

/// Configuration for a classifier. Immutable for the lifetime of one fit; a
/// different configuration requires fitting a new classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Number of nearest neighbours requested (at least 1). When `k`
    /// exceeds the training-set size the cutoff clamps to the farthest
    /// available point.
    pub k:         usize,
    /// The distance metric to rank neighbours with.
    pub metric:    Metric,
    /// The strategy used when votes are not unique.
    pub tie_break: TieBreak,
}

/// A k-nearest-neighbour classifier for 2D integer points, fitted once and
/// then queried read-only.
///
/// Produces a full [`Classification`] per query with neighbour details,
/// vote counts, and the tie-break reason, so the same fitted model can back
/// solution generation, grading, and human-readable explanation.
#[derive(Debug, Clone)]
pub struct Classifier {
    /// The immutable configuration this classifier was fitted with.
    config: ClassifierConfig,
    /// Training points, in the order supplied to `fit`.
    train_points: Vec<Point>,
    /// Training labels, parallel to `train_points`.
    train_labels: Vec<String>,
}

impl Classifier {
    /// Fits a classifier to the given training data, consuming the inputs.
    ///
    /// Order of the training data is irrelevant to classification but is
    /// preserved so explanations can reference points by index. Fails with
    /// [`ClassifierError::MismatchedLengths`] when the sequences disagree in
    /// length.
    pub fn fit(
        config: ClassifierConfig,
        points: Vec<Point>,
        labels: Vec<String>,
    ) -> Result<Self, ClassifierError> {
        if points.len() != labels.len() {
            return Err(ClassifierError::MismatchedLengths {
                points: points.len(),
                labels: labels.len(),
            });
        }

        Ok(Self {
            config,
            train_points: points,
            train_labels: labels,
        })
    }

    /// Returns the configuration this classifier was fitted with.
    pub fn config(&self) -> ClassifierConfig {
        self.config
    }

    /// Classifies a single query point using the configured tie-break
    /// strategy.
    pub fn classify(&self, query: Point) -> Result<Classification, ClassifierError> {
        self.explain(query, None)
    }

    /// Classifies a single query point, optionally overriding the
    /// configured tie-break strategy for this call only.
    pub fn explain(
        &self,
        query: Point,
        tie_break: Option<TieBreak>,
    ) -> Result<Classification, ClassifierError> {
        let selected = self.rank(query)?;
        let stats = aggregate(&selected);
        let (prediction, reason) = resolve(&stats, tie_break.unwrap_or(self.config.tie_break));

        let votes = stats
            .iter()
            .map(|s| (s.label.clone(), s.count))
            .collect::<BTreeMap<_, _>>();

        Ok(Classification {
            prediction,
            neighbors: selected,
            votes,
            reason,
        })
    }

    /// Classifies every query point in order, preserving input order in the
    /// results. Fails on the first point that cannot be classified.
    pub fn classify_all(&self, queries: &[Point]) -> Result<Vec<Classification>, ClassifierError> {
        queries.iter().map(|q| self.classify(*q)).collect()
    }

    /// Ranks all training points by distance to the query and returns the
    /// tie-aware neighbour set for the configured `k`.
    ///
    /// The sort is stable, so exact distance ties keep training-set order.
    /// The cutoff is the distance of the neighbour at rank `min(k, size)`;
    /// every point at or under that distance is selected, which may be more
    /// than `k` points. Tied boundary points are deliberately never dropped
    /// so results do not depend on the insertion order of equidistant
    /// points.
    fn rank(&self, query: Point) -> Result<Vec<Neighbor>, ClassifierError> {
        if self.train_points.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }

        let mut neighbors = self
            .train_points
            .iter()
            .zip(self.train_labels.iter())
            .enumerate()
            .map(|(index, (point, label))| Neighbor {
                index,
                label: label.clone(),
                distance: self.config.metric.distance(query, *point),
            })
            .collect::<Vec<_>>();
        neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        let cutoff_rank = self.config.k.max(1).min(neighbors.len()) - 1;
        let cutoff = neighbors[cutoff_rank].distance;
        neighbors.retain(|n| n.distance <= cutoff);

        Ok(neighbors)
    }
}

/// Tallies votes and distance statistics per label over the selected
/// neighbour set, in one pass.
fn aggregate(selected: &[Neighbor]) -> Vec<LabelStats> {
    let mut stats: Vec<LabelStats> = Vec::new();

    for neighbor in selected {
        match stats.iter_mut().find(|s| s.label == neighbor.label) {
            Some(entry) => {
                entry.count += 1;
                entry.sum += neighbor.distance;
                entry.min = entry.min.min(neighbor.distance);
            }
            None => stats.push(LabelStats {
                label: neighbor.label.clone(),
                count: 1,
                sum:   neighbor.distance,
                mean:  0.0,
                min:   neighbor.distance,
            }),
        }
    }

    // One division per label; the mean never drifts from sum/count.
    for entry in &mut stats {
        entry.mean = entry.sum / entry.count as f64;
    }

    stats
}

/// Decides the winning label from the per-label statistics.
///
/// A strict state machine with three terminal outcomes: a unique vote
/// maximum wins as `majority`; otherwise the configured strategy filters the
/// tie set by its statistic; an exact numeric tie on that statistic falls
/// through to the lexicographically smallest label as `alphabetical`.
fn resolve(stats: &[LabelStats], strategy: TieBreak) -> (String, TieBreakReason) {
    let max_votes = stats.iter().map(|s| s.count).max().unwrap_or(0);
    let mut tied = stats
        .iter()
        .filter(|s| s.count == max_votes)
        .collect::<Vec<_>>();

    if tied.len() == 1 {
        return (tied[0].label.clone(), TieBreakReason::Majority);
    }

    let (statistic, reason): (fn(&LabelStats) -> f64, TieBreakReason) = match strategy {
        TieBreak::Sum => (|s| s.sum, TieBreakReason::SumDistance),
        TieBreak::Mean => (|s| s.mean, TieBreakReason::MeanDistance),
        TieBreak::Nearest => (|s| s.min, TieBreakReason::NearestNeighbor),
    };

    let best = tied
        .iter()
        .map(|s| statistic(s))
        .fold(f64::INFINITY, f64::min);
    // exact numeric comparison; only a bit-identical tie survives
    tied.retain(|s| statistic(*s) <= best);

    if tied.len() == 1 {
        (tied[0].label.clone(), reason)
    } else {
        tied.sort_by(|a, b| a.label.cmp(&b.label));
        (tied[0].label.clone(), TieBreakReason::Alphabetical)
    }
}
