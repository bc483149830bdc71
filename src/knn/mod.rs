#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// The classifier facade, neighbour ranking, vote aggregation, and
/// tie-break resolution.
pub mod classifier;
/// Distance metrics over 2D integer points.
pub mod metric;

use serde::{Deserialize, Serialize};

pub use classifier::{
    Classification, Classifier, ClassifierConfig, ClassifierError, Neighbor, TieBreak,
    TieBreakReason,
};
pub use metric::{Metric, MetricError};

/// A 2D point with integer coordinates. Equality is by value; points carry
/// no identity of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i64,
    /// Vertical coordinate.
    pub y: i64,
}

impl Point {
    /// Creates a new point from its coordinates.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<[i64; 2]> for Point {
    fn from(value: [i64; 2]) -> Self {
        Self {
            x: value[0],
            y: value[1],
        }
    }
}

impl From<Point> for [i64; 2] {
    fn from(value: Point) -> Self {
        [value.x, value.y]
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}
