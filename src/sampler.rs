//! Poisson-disk sampling of a parametric surface patch.
//!
//! The sampler throws darts into the rectangular parameter domain and
//! accepts a candidate only if its distance to every accepted sample is at
//! least twice the disk radius. Distances are measured through the
//! surface's first fundamental form, so the sample density follows the
//! surface metric rather than the parameter plane.

use log::debug;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::{HasPosition, Point2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parametric surface patch over a rectangular parameter domain.
///
/// Implementations provide the patch position and its two first partial
/// derivatives. The derivative methods must panic when queried outside the
/// parameter domain.
pub trait Surface {
    /// Lower bound of the first parameter.
    fn u_min(&self) -> f64;
    /// Upper bound of the first parameter.
    fn u_max(&self) -> f64;
    /// Lower bound of the second parameter.
    fn v_min(&self) -> f64;
    /// Upper bound of the second parameter.
    fn v_max(&self) -> f64;

    /// The surface position at `(u, v)`.
    fn point(&self, u: f64, v: f64) -> [f64; 3];

    /// The partial derivative with respect to `u`.
    ///
    /// # Panics
    ///
    /// Panics if `(u, v)` lies outside the parameter domain.
    fn du(&self, u: f64, v: f64) -> [f64; 3];

    /// The partial derivative with respect to `v`.
    ///
    /// # Panics
    ///
    /// Panics if `(u, v)` lies outside the parameter domain.
    fn dv(&self, u: f64, v: f64) -> [f64; 3];
}

/// A surface sample: a parameter-plane position plus the corresponding
/// point on the surface.
///
/// `SamplePoint` implements [`HasPosition`] with its parameter coordinates,
/// so samples can be fed directly into a
/// [`ConstrainedDelaunayTriangulation`](crate::ConstrainedDelaunayTriangulation);
/// the 3d position rides along as payload.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplePoint {
    uv: Point2<f64>,
    position: [f64; 3],
}

impl SamplePoint {
    /// Creates a sample from parameter coordinates and a surface position.
    pub fn new(uv: Point2<f64>, position: [f64; 3]) -> Self {
        SamplePoint { uv, position }
    }

    /// The sample's parameter-plane coordinates.
    pub fn uv(&self) -> Point2<f64> {
        self.uv
    }

    /// The sample's position on the surface.
    pub fn position_3d(&self) -> [f64; 3] {
        self.position
    }
}

impl HasPosition for SamplePoint {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.uv
    }
}

fn dot3(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// First-order approximation of the geodesic distance between two
/// parameter-domain points.
///
/// With `d = q - p` and the Jacobian `J = [Xu | Xv]` evaluated at `p`, the
/// squared distance is `d^T (J^T J) d`, i.e. the length of `d` under the
/// first fundamental form `E du^2 + 2 F du dv + G dv^2` at `p`.
pub fn metric_distance<S: Surface + ?Sized>(
    surface: &S,
    p: Point2<f64>,
    q: Point2<f64>,
) -> f64 {
    let delta = q.sub(p);
    let xu = surface.du(p.x, p.y);
    let xv = surface.dv(p.x, p.y);

    let e = dot3(xu, xu);
    let f = dot3(xu, xv);
    let g = dot3(xv, xv);

    (e * delta.x * delta.x + 2.0 * f * delta.x * delta.y + g * delta.y * delta.y).sqrt()
}

/// Dart-throwing Poisson-disk sampler.
///
/// Candidates are drawn uniformly from the parameter rectangle; a
/// candidate conflicts with an accepted sample if their metric distance is
/// below `2 * alpha`. Sampling stops after `max_trials` consecutive
/// rejections.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoissonDiskSampler {
    alpha: f64,
    max_trials: u32,
}

impl Default for PoissonDiskSampler {
    fn default() -> Self {
        PoissonDiskSampler {
            alpha: 0.1,
            max_trials: 100,
        }
    }
}

impl PoissonDiskSampler {
    /// Creates a sampler with the given minimum-distance parameter and
    /// termination threshold.
    pub fn new(alpha: f64, max_trials: u32) -> Self {
        assert!(alpha > 0.0, "the disk radius must be positive");
        PoissonDiskSampler { alpha, max_trials }
    }

    /// The minimum-distance parameter; the conflict radius is twice this.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Maximum number of consecutive rejections before sampling stops.
    pub fn max_trials(&self) -> u32 {
        self.max_trials
    }

    /// Samples the surface patch.
    ///
    /// The four corners of the parameter domain are always part of the
    /// result, so the samples of any patch can be triangulated.
    pub fn sample<S, R>(&self, surface: &S, rng: &mut R) -> Vec<SamplePoint>
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        let (u_min, u_max) = (surface.u_min(), surface.u_max());
        let (v_min, v_max) = (surface.v_min(), surface.v_max());

        let corner = |u, v| SamplePoint::new(Point2::new(u, v), surface.point(u, v));
        let mut samples = vec![
            corner(u_min, v_min),
            corner(u_max, v_min),
            corner(u_min, v_max),
            corner(u_max, v_max),
        ];

        let u_range = Uniform::new_inclusive(u_min, u_max);
        let v_range = Uniform::new_inclusive(v_min, v_max);
        let threshold = 2.0 * self.alpha;

        let mut trials = 0;
        while trials < self.max_trials {
            let candidate = Point2::new(u_range.sample(rng), v_range.sample(rng));

            let conflict = samples
                .iter()
                .any(|sample| metric_distance(surface, candidate, sample.uv()) < threshold);
            if conflict {
                trials += 1;
            } else {
                let position = surface.point(candidate.x, candidate.y);
                samples.push(SamplePoint::new(candidate, position));
                trials = 0;
            }
        }

        debug!(
            "poisson-disk sampling accepted {} points (alpha = {})",
            samples.len(),
            self.alpha
        );
        samples
    }
}
