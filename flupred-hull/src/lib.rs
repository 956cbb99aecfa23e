#![doc = include_str!("../README.md")]

mod hull;
mod point;
mod polygon;

#[doc(inline)]
pub use hull::{convex_hull, HullError};
#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use polygon::Polygon;

#[cfg(test)]
mod tests;
