use crate::Point;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// A closed [`Polygon`], the last vertex repeats the first.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Polygon<T> {
    vertices: Vec<Point<T>>,
}

impl<T> Polygon<T>
where
    T: Float,
{
    /// Returns a closed [`Polygon`] from an open ring of vertices.
    ///
    /// The first vertex is appended again if the ring is not already closed.
    ///
    /// ```rust
    /// use flupred_hull::{Point, Polygon};
    /// let ring = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)].map(Point::from);
    /// let polygon = Polygon::close(ring.to_vec());
    /// assert_eq!(polygon.vertices().len(), 4);
    /// assert!(polygon.is_closed());
    /// ```
    pub fn close(mut vertices: Vec<Point<T>>) -> Self {
        if let (Some(first), Some(last)) = (vertices.first().copied(), vertices.last()) {
            if vertices.len() == 1 || first != *last {
                vertices.push(first);
            }
        }
        Polygon { vertices }
    }

    /// Returns the vertices, including the closing vertex.
    pub fn vertices(&self) -> &[Point<T>] {
        &self.vertices
    }

    /// Returns the number of distinct vertices (excluding the closing vertex).
    pub fn len(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the first and last vertex are identical.
    pub fn is_closed(&self) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) => self.vertices.len() > 1 && first == last,
            _ => false,
        }
    }

    /// Returns the x coordinates, ready for a multi-line glyph.
    pub fn xs(&self) -> Vec<T> {
        self.vertices.iter().map(|p| p.x).collect()
    }

    /// Returns the y coordinates, ready for a multi-line glyph.
    pub fn ys(&self) -> Vec<T> {
        self.vertices.iter().map(|p| p.y).collect()
    }

    /// Signed area by the shoelace formula, positive for counter-clockwise rings.
    ///
    /// ```rust
    /// use flupred_hull::{Point, Polygon};
    /// let square = [(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)].map(Point::from);
    /// assert_eq!(Polygon::close(square.to_vec()).signed_area(), 4.0);
    /// ```
    pub fn signed_area(&self) -> T {
        let two = T::one() + T::one();
        self.vertices
            .windows(2)
            .fold(T::zero(), |acc, w| acc + (w[0].x * w[1].y - w[1].x * w[0].y))
            / two
    }
}
