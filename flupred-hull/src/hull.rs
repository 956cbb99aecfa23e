use crate::{Point, Polygon};
use num_traits::Float;
use std::cmp::Ordering;
use thiserror::Error;

/// Reasons a set of points has no two-dimensional hull.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum HullError {
    /// Fewer than three distinct, finite points.
    #[error("convex hull needs at least 3 distinct points, found {distinct}")]
    TooFewPoints { distinct: usize },
    /// Every point lies on a single line.
    #[error("convex hull of {distinct} collinear points has no area")]
    Collinear { distinct: usize },
}

/// Returns the convex hull of `points` as a closed [`Polygon`].
///
/// Uses Andrew's monotone chain. The vertices wind counter-clockwise, starting at the
/// point with the lowest x (then lowest y), and points lying on a hull edge are not
/// vertices. Points with a non-finite coordinate are ignored. Every vertex is one of
/// the input points.
///
/// ## Examples
///
/// ```rust
/// use flupred_hull::{convex_hull, Point};
/// let points = [(1.0, 1.0), (0.0, 0.0), (3.0, 0.0), (0.0, 3.0)].map(Point::from);
/// let hull = convex_hull(&points)?;
/// assert_eq!(hull.xs(), [0.0, 3.0, 0.0, 0.0]);
/// assert_eq!(hull.ys(), [0.0, 0.0, 3.0, 0.0]);
/// # Ok::<(), flupred_hull::HullError>(())
/// ```
///
/// Degenerate inputs are errors, not empty polygons.
///
/// ```rust
/// use flupred_hull::{convex_hull, HullError, Point};
/// let line = [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)].map(Point::from);
/// assert_eq!(convex_hull(&line), Err(HullError::Collinear { distinct: 3 }));
/// ```
pub fn convex_hull<T>(points: &[Point<T>]) -> Result<Polygon<T>, HullError>
where
    T: Float,
{
    let mut sorted: Vec<Point<T>> = points.iter().filter(|p| p.is_finite()).copied().collect();
    // finite values always compare
    sorted.sort_by(|a, b| {
        a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal).then(a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
    });
    sorted.dedup();

    let distinct = sorted.len();
    if distinct < 3 {
        return Err(HullError::TooFewPoints { distinct });
    }

    let lower = half_hull(sorted.iter());
    let upper = half_hull(sorted.iter().rev());

    // each half ends where the other begins
    let ring: Vec<Point<T>> =
        lower[..lower.len() - 1].iter().chain(&upper[..upper.len() - 1]).copied().collect();

    if ring.len() < 3 {
        return Err(HullError::Collinear { distinct });
    }

    Ok(Polygon::close(ring))
}

/// One monotone half of the hull, keeping only strict left turns.
fn half_hull<'p, T, I>(points: I) -> Vec<Point<T>>
where
    T: Float + 'p,
    I: Iterator<Item = &'p Point<T>>,
{
    let mut chain: Vec<Point<T>> = Vec::new();
    for p in points {
        while chain.len() >= 2 && chain[chain.len() - 2].cross(&chain[chain.len() - 1], p) <= T::zero()
        {
            chain.pop();
        }
        chain.push(*p);
    }
    chain
}
