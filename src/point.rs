use core::fmt;

use num_traits::{Num, Signed};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A coordinate type that can be used with a triangulation.
///
/// Internally, all exact computations are performed after converting the
/// coordinates into `f64`. This type should usually be either `f32` or `f64`.
pub trait Scalar: Num + PartialOrd + Into<f64> + Copy + Signed + fmt::Debug {}

impl<T> Scalar for T where T: Num + PartialOrd + Into<f64> + Copy + Signed + fmt::Debug {}

/// A two dimensional point in the parameter plane.
///
/// This is the basic type used for defining positions.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point2<S> {
    /// The point's first coordinate.
    pub x: S,
    /// The point's second coordinate.
    pub y: S,
}

impl<S> Point2<S> {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: S, y: S) -> Self {
        Point2 { x, y }
    }
}

impl<S: Scalar> Point2<S> {
    pub(crate) fn sub(&self, other: Self) -> Self {
        Point2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    pub(crate) fn dot(&self, other: Self) -> S {
        self.x * other.x + self.y * other.y
    }

    pub(crate) fn length2(&self) -> S {
        self.dot(*self)
    }

    pub(crate) fn distance2(&self, other: Self) -> S {
        self.sub(other).length2()
    }

    /// Converts both coordinates into `f64`. The conversion is exact for
    /// `f32` and `f64` coordinates.
    #[inline]
    pub(crate) fn to_f64(self) -> Point2<f64> {
        Point2::new(self.x.into(), self.y.into())
    }
}

impl<S: Scalar> From<Point2<S>> for [S; 2] {
    #[inline]
    fn from(point: Point2<S>) -> Self {
        [point.x, point.y]
    }
}

impl<S: Scalar> From<[S; 2]> for Point2<S> {
    #[inline]
    fn from(source: [S; 2]) -> Self {
        Self::new(source[0], source[1])
    }
}

impl<S: Scalar> From<(S, S)> for Point2<S> {
    #[inline]
    fn from(source: (S, S)) -> Self {
        Self::new(source.0, source.1)
    }
}

impl<S: Scalar> From<Point2<S>> for (S, S) {
    #[inline]
    fn from(point: Point2<S>) -> (S, S) {
        (point.x, point.y)
    }
}

/// An object with a position in the parameter plane.
///
/// Vertices need to implement this trait to allow insertion into a
/// triangulation. Any payload beyond the position (e.g. the 3d location of a
/// surface sample) travels along untouched.
///
/// **Note**: The position must not change once the object has been inserted
/// into a triangulation. Failing this requirement will lead to logical
/// errors.
pub trait HasPosition {
    /// The number type used by this coordinate type.
    type Scalar: Scalar;

    /// Returns the position of this object.
    fn position(&self) -> Point2<Self::Scalar>;
}

impl<S: Scalar> HasPosition for Point2<S> {
    type Scalar = S;

    fn position(&self) -> Point2<S> {
        *self
    }
}

#[cfg(test)]
mod test {
    use super::Point2;

    #[test]
    fn test_distance2() {
        let p1 = Point2::new(1.0, 2.0);
        let p2 = Point2::new(4.0, 6.0);
        assert_eq!(p1.distance2(p2), 25.0);
        assert_eq!(p2.distance2(p1), 25.0);
        assert_eq!(p1.distance2(p1), 0.0);
    }

    #[test]
    fn test_conversions() {
        let point = Point2::new(2.0f32, -3.5);
        assert_eq!(<[f32; 2]>::from(point), [2.0, -3.5]);
        assert_eq!(Point2::from([2.0f32, -3.5]), point);
        assert_eq!(Point2::from((2.0f32, -3.5)), point);
    }
}
