//! Robust geometric predicates for the triangulation kernel.
//!
//! The sign-exact core lives in the `exact` submodule; this module adds the
//! boolean convenience wrappers and the segment-relative point
//! classification used throughout constrained edge insertion.

mod exact;

use crate::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The position of a query point relative to an oriented line segment.
///
/// The first four variants describe a point on the segment's supporting
/// line; `Left` and `Right` describe the two open half planes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// The point coincides with the segment's origin.
    Origin,
    /// The point coincides with the segment's destination.
    Destination,
    /// The point lies strictly to the left of the segment.
    Left,
    /// The point lies strictly to the right of the segment.
    Right,
    /// The point is on the supporting line, past the destination.
    Beyond,
    /// The point is on the supporting line, before the origin.
    Behind,
    /// The point is on the supporting line, strictly between the endpoints.
    Between,
}

/// Returns a value with the sign of twice the signed area of the triangle
/// `(a, b, c)`: positive if the triangle winds counterclockwise, negative
/// if clockwise and exactly zero if the points are collinear.
#[inline]
pub fn orient2d(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    exact::orient2d(a.into(), b.into(), c.into())
}

/// Returns a value whose sign tells whether `d` lies inside (positive),
/// outside (negative) or on (zero) the circle through `a`, `b` and `c`,
/// assuming the circle points wind counterclockwise.
#[inline]
pub fn incircle(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>, d: Point2<f64>) -> f64 {
    exact::incircle(a.into(), b.into(), c.into(), d.into())
}

/// Returns `true` if `c` lies strictly to the left of the directed line
/// `a -> b`.
#[inline]
pub fn is_left(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> bool {
    orient2d(a, b, c) > 0.0
}

/// Returns `true` if `c` lies to the left of, or on, the directed line
/// `a -> b`.
#[inline]
pub fn is_left_or_on(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> bool {
    orient2d(a, b, c) >= 0.0
}

/// Returns `true` if the three points are exactly collinear.
#[inline]
pub fn is_collinear(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> bool {
    orient2d(a, b, c) == 0.0
}

/// Classifies point `c` against the oriented segment `a -> b`.
///
/// Off-line positions map to [`Orientation::Left`]/[`Orientation::Right`].
/// Collinear positions are resolved along the segment's dominant axis into
/// `Origin`, `Destination`, `Between`, `Behind` or `Beyond`.
pub fn classify(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Orientation {
    let det = orient2d(a, b, c);
    if det > 0.0 {
        return Orientation::Left;
    }
    if det < 0.0 {
        return Orientation::Right;
    }

    if a == c {
        return Orientation::Origin;
    }
    if b == c {
        return Orientation::Destination;
    }

    if a.x < b.x {
        return if c.x > a.x && c.x < b.x {
            Orientation::Between
        } else if c.x < a.x {
            Orientation::Behind
        } else {
            Orientation::Beyond
        };
    }
    if a.x > b.x {
        return if c.x > b.x && c.x < a.x {
            Orientation::Between
        } else if c.x > a.x {
            Orientation::Behind
        } else {
            Orientation::Beyond
        };
    }

    // Vertical segment; fall back to the y axis.
    if a.y < b.y {
        return if c.y > a.y && c.y < b.y {
            Orientation::Between
        } else if c.y < a.y {
            Orientation::Behind
        } else {
            Orientation::Beyond
        };
    }

    if c.y < a.y && c.y > b.y {
        Orientation::Between
    } else if c.y > a.y {
        Orientation::Behind
    } else {
        Orientation::Beyond
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Point2;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn test_orient2d_antisymmetry() {
        let points = [
            (p(0.0, 0.0), p(10.0, 0.0), p(3.0, 4.0)),
            (p(-2.5, 1.0), p(7.0, -3.0), p(0.1, 0.2)),
        ];
        for &(a, b, c) in &points {
            let lhs = orient2d(a, b, c);
            let rhs = orient2d(b, a, c);
            assert_ne!(lhs, 0.0);
            assert_eq!(lhs.signum(), -rhs.signum());
        }

        // Swapping the endpoints keeps collinear input at exactly zero.
        let (a, b, c) = (p(0.1, 0.1), p(0.2, 0.2), p(0.3, 0.3));
        assert_eq!(orient2d(a, b, c), 0.0);
        assert_eq!(orient2d(b, a, c), 0.0);
    }

    #[test]
    fn test_incircle_cyclic_invariance() {
        let a = p(0.0, 0.0);
        let b = p(4.0, 0.0);
        let c = p(2.0, 3.0);
        let d = p(2.0, 1.0);
        let abc = incircle(a, b, c, d);
        let bca = incircle(b, c, a, d);
        let cab = incircle(c, a, b, d);
        assert!(abc > 0.0);
        assert_eq!(abc.signum(), bca.signum());
        assert_eq!(abc.signum(), cab.signum());

        // Reversing the orientation negates the result.
        let acb = incircle(a, c, b, d);
        assert_eq!(acb.signum(), -abc.signum());
    }

    #[test]
    fn test_classify_off_line() {
        let a = p(0.0, 0.0);
        let b = p(10.0, 0.0);
        assert_eq!(classify(a, b, p(5.0, 1.0)), Orientation::Left);
        assert_eq!(classify(a, b, p(5.0, -1.0)), Orientation::Right);
    }

    #[test]
    fn test_classify_on_line() {
        let a = p(0.0, 0.0);
        let b = p(10.0, 0.0);
        assert_eq!(classify(a, b, a), Orientation::Origin);
        assert_eq!(classify(a, b, b), Orientation::Destination);
        assert_eq!(classify(a, b, p(5.0, 0.0)), Orientation::Between);
        assert_eq!(classify(a, b, p(-1.0, 0.0)), Orientation::Behind);
        assert_eq!(classify(a, b, p(11.0, 0.0)), Orientation::Beyond);
    }

    #[test]
    fn test_classify_vertical_segment() {
        let a = p(2.0, 10.0);
        let b = p(2.0, 0.0);
        assert_eq!(classify(a, b, p(2.0, 5.0)), Orientation::Between);
        assert_eq!(classify(a, b, p(2.0, 12.0)), Orientation::Behind);
        assert_eq!(classify(a, b, p(2.0, -3.0)), Orientation::Beyond);
        assert_eq!(classify(a, b, p(1.0, 5.0)), Orientation::Right);
        assert_eq!(classify(a, b, p(3.0, 5.0)), Orientation::Left);
    }

    #[test]
    fn test_left_wrappers() {
        let a = p(0.0, 0.0);
        let b = p(1.0, 1.0);
        assert!(is_left(a, b, p(0.0, 1.0)));
        assert!(!is_left(a, b, p(1.0, 0.0)));
        assert!(is_left_or_on(a, b, p(2.0, 2.0)));
        assert!(is_collinear(a, b, p(-3.0, -3.0)));
    }
}
