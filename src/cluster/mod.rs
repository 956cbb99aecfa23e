//! Convex hull outlines of forecast clusters, one per label and dimension pair.

use crate::error::{Error, Result};
use crate::forecast::ForecastPoint;
use flupred_hull::{convex_hull, Point};
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;


// ----------------------------------------------------------------------------
// Dimension Pair
// ----------------------------------------------------------------------------

/// Two distinct embedding dimensions, projected as `(x, y)`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct DimensionPair {
    x: usize,
    y: usize,
}

impl DimensionPair {
    /// Returns a [`DimensionPair`], [`InvalidDimensionPair`](Error::InvalidDimensionPair) if `x == y`.
    ///
    /// ```rust
    /// use flupred::cluster::DimensionPair;
    /// let pair = DimensionPair::new(0, 2)?;
    /// assert_eq!((pair.x(), pair.y()), (0, 2));
    /// assert!(DimensionPair::new(1, 1).is_err());
    /// # Ok::<(), flupred::Error>(())
    /// ```
    pub fn new(x: usize, y: usize) -> Result<Self> {
        match x == y {
            true => Err(Error::InvalidDimensionPair(x, y)),
            false => Ok(DimensionPair { x, y }),
        }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    /// The default linked views: (0, 1), (1, 2) and (0, 2).
    pub fn defaults() -> Vec<DimensionPair> {
        vec![DimensionPair { x: 0, y: 1 }, DimensionPair { x: 1, y: 2 }, DimensionPair { x: 0, y: 2 }]
    }
}

impl TryFrom<(usize, usize)> for DimensionPair {
    type Error = Error;
    fn try_from((x, y): (usize, usize)) -> Result<Self> {
        DimensionPair::new(x, y)
    }
}

impl From<DimensionPair> for (usize, usize) {
    fn from(pair: DimensionPair) -> Self {
        (pair.x, pair.y)
    }
}

impl Display for DimensionPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

impl FromStr for DimensionPair {
    type Err = String;

    /// Parse `"x-y"` (ex. `"0-1"`).
    ///
    /// ```rust
    /// use flupred::cluster::DimensionPair;
    /// let pair: DimensionPair = "1-2".parse()?;
    /// assert_eq!(pair.to_string(), "1-2");
    /// assert!("0-0".parse::<DimensionPair>().is_err());
    /// assert!("0".parse::<DimensionPair>().is_err());
    /// # Ok::<(), String>(())
    /// ```
    fn from_str(s: &str) -> std::result::Result<Self, String> {
        let (x, y) = s.split_once('-').ok_or_else(|| format!("Expected a pair like 0-1, found {s:?}"))?;
        let parse = |d: &str| d.trim().parse::<usize>().map_err(|e| format!("{d:?}: {e}"));
        DimensionPair::new(parse(x)?, parse(y)?).map_err(|e| e.to_string())
    }
}

// ----------------------------------------------------------------------------
// Hulls
// ----------------------------------------------------------------------------

/// The closed outline of one forecast cluster in one dimension pair.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ClusterHull {
    pub label: String,
    /// Display color carried over from the forecast table.
    pub display: Option<String>,
    pub pair: DimensionPair,
    /// Counter-clockwise vertices, the first vertex repeated at the end.
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

/// A cluster that produced no hull.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SkippedCluster {
    pub label: String,
    pub reason: String,
}

/// Every hull built for one dimension pair, plus the clusters that had none.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct HullSet {
    pub hulls: Vec<ClusterHull>,
    /// Clusters with a degenerate point set.
    pub skipped: Vec<SkippedCluster>,
}

/// Build one convex hull per forecast cluster for the `pair` projection.
///
/// Clusters are processed in label order. A cluster with fewer than `min_points`
/// points produces nothing. Points missing either coordinate are ignored. A cluster
/// whose points have no area (fewer than three distinct points, or all collinear)
/// is listed in [`HullSet::skipped`] and the others are still built.
///
/// ## Examples
///
/// ```rust
/// use flupred::cluster::{build_hulls, DimensionPair};
/// use flupred::forecast::ForecastPoint;
///
/// let point = |x: f64, y: f64| ForecastPoint {
///     coords: [(0, x), (1, y)].into_iter().collect(),
///     label: "C0".to_string(),
///     display: None,
/// };
/// let points = vec![point(0.0, 0.0), point(2.0, 0.0), point(2.0, 2.0), point(0.0, 2.0), point(1.0, 1.0)];
///
/// let set = build_hulls(&points, DimensionPair::new(0, 1)?, 3);
/// assert_eq!(set.hulls[0].xs, [0.0, 2.0, 2.0, 0.0, 0.0]);
/// assert_eq!(set.hulls[0].ys, [0.0, 0.0, 2.0, 2.0, 0.0]);
///
/// let set = build_hulls(&points, DimensionPair::new(0, 1)?, 6);
/// assert!(set.hulls.is_empty());
/// # Ok::<(), flupred::Error>(())
/// ```
pub fn build_hulls(points: &[ForecastPoint], pair: DimensionPair, min_points: usize) -> HullSet {
    let mut set = HullSet::default();

    let groups = points.iter().into_group_map_by(|p| p.label.as_str());
    for (label, members) in groups.into_iter().sorted_by_key(|(label, _)| *label) {
        if members.len() < min_points {
            debug!("Cluster {label} has {} points, fewer than {min_points}, no hull.", members.len());
            continue;
        }

        let projected = members
            .iter()
            .filter_map(|p| Some(Point::new(p.coord(pair.x())?, p.coord(pair.y())?)))
            .collect_vec();

        match convex_hull(&projected) {
            Ok(polygon) => {
                let display = members.iter().find_map(|p| p.display.clone());
                set.hulls.push(ClusterHull {
                    label: label.to_string(),
                    display,
                    pair,
                    xs: polygon.xs(),
                    ys: polygon.ys(),
                });
            }
            Err(reason) => {
                let skipped = SkippedCluster { label: label.to_string(), reason: reason.to_string() };
                let error = Error::DegenerateHull { label: label.to_string(), reason };
                warn!("{error}, skipping cluster in view {pair}.");
                set.skipped.push(skipped);
            }
        }
    }

    set
}
