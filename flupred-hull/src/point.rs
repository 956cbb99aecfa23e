use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A [`Point`] in the plane.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

#[rustfmt::skip]
impl<T> From<(T, T)> for Point<T> { fn from((x, y): (T, T)) -> Self { Point { x, y } } }
#[rustfmt::skip]
impl<T> Display for Point<T> where T: Display { fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "({}, {})", self.x, self.y) } }

impl<T> Point<T>
where
    T: Float,
{
    /// Returns a new [`Point`].
    pub fn new(x: T, y: T) -> Self {
        Point { x, y }
    }

    /// Returns true if neither coordinate is `NaN` or infinite.
    ///
    /// ```rust
    /// use flupred_hull::Point;
    /// assert!(Point::new(1.0, 2.0).is_finite());
    /// assert!(!Point::new(f64::NAN, 2.0).is_finite());
    /// ```
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Z component of the cross product `(a - o) x (b - o)`.
    ///
    /// Positive when `o -> a -> b` turns counter-clockwise, zero when collinear.
    ///
    /// ```rust
    /// use flupred_hull::Point;
    /// let o = Point::new(0.0, 0.0);
    /// assert_eq!(o.cross(&Point::new(1.0, 0.0), &Point::new(0.0, 1.0)), 1.0);
    /// assert_eq!(o.cross(&Point::new(1.0, 1.0), &Point::new(2.0, 2.0)), 0.0);
    /// ```
    pub fn cross(&self, a: &Point<T>, b: &Point<T>) -> T {
        (a.x - self.x) * (b.y - self.y) - (a.y - self.y) * (b.x - self.x)
    }
}
