#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};

use super::Point;

/// An enum to represent possible errors when parsing a metric configuration.
#[derive(thiserror::Error, Debug)]
pub enum MetricError {
    /// The configured metric name is not one of the supported metrics.
    #[error("Unknown distance metric `{0}`. Expected `manhattan`, `euclidean`, or `minkowski`.")]
    UnknownMetric(String),
    /// The configured Minkowski order is below 1.
    #[error("Distance order must be at least 1, got {0}.")]
    InvalidOrder(u32),
}

/// A Minkowski-family distance metric over 2D integer points.
///
/// The metric is resolved once at configuration-parse time into a closed
/// variant; there is no string dispatch at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Order 1: `|dx| + |dy|`.
    Manhattan,
    /// Order 2: `sqrt(dx^2 + dy^2)`.
    Euclidean,
    /// General order p: `(|dx|^p + |dy|^p)^(1/p)`.
    Minkowski(u32),
}

impl Metric {
    /// Resolves a configured metric name and order into a `Metric`.
    ///
    /// Names are matched case-insensitively; a missing or blank name defaults
    /// to `euclidean`. Unrecognized names are a configuration error rather
    /// than a silent fallback. `order` only applies to `minkowski` and must
    /// be at least 1.
    pub fn parse(name: Option<&str>, order: u32) -> Result<Self, MetricError> {
        let name = name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or("euclidean");

        match name.to_ascii_lowercase().as_str() {
            "manhattan" => Ok(Metric::Manhattan),
            "euclidean" => Ok(Metric::Euclidean),
            "minkowski" if order >= 1 => Ok(Metric::Minkowski(order)),
            "minkowski" => Err(MetricError::InvalidOrder(order)),
            other => Err(MetricError::UnknownMetric(other.to_string())),
        }
    }

    /// Returns the order `p` of this metric (1, 2, or the Minkowski order).
    pub fn order(&self) -> u32 {
        match self {
            Metric::Manhattan => 1,
            Metric::Euclidean => 2,
            Metric::Minkowski(p) => *p,
        }
    }

    /// Computes the distance between two points.
    ///
    /// Inputs are integral but the distance is a non-negative real.
    pub fn distance(&self, a: Point, b: Point) -> f64 {
        let dx = (a.x - b.x).abs() as f64;
        let dy = (a.y - b.y).abs() as f64;

        match self {
            Metric::Manhattan => dx + dy,
            Metric::Euclidean => (dx * dx + dy * dy).sqrt(),
            Metric::Minkowski(p) => {
                let p = *p as i32;
                (dx.powi(p) + dy.powi(p)).powf(1.0 / f64::from(p))
            }
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Manhattan => write!(f, "manhattan"),
            Metric::Euclidean => write!(f, "euclidean"),
            Metric::Minkowski(p) => write!(f, "minkowski (p = {p})"),
        }
    }
}
