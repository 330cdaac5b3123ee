//! Linear minimization oracle and projection for the DWD feasible set
//!
//! The set is the product `{‖w‖ ≤ 1} × [-u, u] × {‖xi‖ ≤ R}`. Frank-Wolfe type methods call
//! [linear_oracle], projected gradient methods call [projection].

use ndarray::{Array1, ArrayView1};
use serde_derive::{Deserialize, Serialize};

use crate::routines::math::{l2_norm, sign};
use crate::structs::params::Params;

/// How [projection_with] treats points strictly inside the balls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    /// Always rescale onto the boundary sphere, and push `mu` to `±u`
    #[default]
    Sphere,
    /// Euclidean projection onto the balls and the box. Interior points are left alone.
    Ball,
}

/// Minimizer of `g·s` over the ball `‖s‖ ≤ radius`, i.e. `-radius·g/‖g‖`
///
/// A zero `g` has no unique minimizer and gives `NaN` entries.
pub fn l2_linear_oracle(g: ArrayView1<'_, f64>, radius: f64) -> Array1<f64> {
    let norm = l2_norm(g);
    if norm == 0.0 {
        tracing::warn!(
            "Linear oracle called with a zero gradient block of length {}",
            g.len()
        );
    }
    g.mapv(|v| -v * radius / norm)
}

/// Linear minimization oracle over the full feasible set
///
/// The `w` block uses the unit ball, the `xi` block the ball of radius `radius`, and `mu` picks the vertex
/// of `[-bound, bound]` opposing the sign of its gradient. A zero intercept gradient gives `mu = 0`.
pub fn linear_oracle(grad: &Params, radius: f64, bound: f64) -> Params {
    let w = l2_linear_oracle(grad.w(), 1.0);
    let mu = -bound * sign(grad.mu());
    let xi = l2_linear_oracle(grad.xi(), radius);
    Params::concat(w, mu, xi)
}

/// Rescale `v` onto the sphere `‖v‖ = radius`
///
/// This rescales unconditionally, also for points inside the ball. See [l2_ball_projection] for the
/// projection that leaves those alone. A zero `v` gives `NaN` entries.
pub fn l2_projection(v: ArrayView1<'_, f64>, radius: f64) -> Array1<f64> {
    let norm = l2_norm(v);
    if norm == 0.0 {
        tracing::warn!(
            "Projection called with a zero block of length {}",
            v.len()
        );
    }
    v.mapv(|e| e * radius / norm)
}

/// Euclidean projection onto the ball `‖v‖ ≤ radius`
pub fn l2_ball_projection(v: ArrayView1<'_, f64>, radius: f64) -> Array1<f64> {
    let norm = l2_norm(v);
    if norm <= radius {
        v.to_owned()
    } else {
        v.mapv(|e| e * radius / norm)
    }
}

/// Blockwise rescale of `x` onto the boundary of the feasible set
///
/// Equivalent to [projection_with] in [ProjectionMode::Sphere].
pub fn projection(x: &Params, radius: f64, bound: f64) -> Params {
    let w = l2_projection(x.w(), 1.0);
    let mu = bound * sign(x.mu());
    let xi = l2_projection(x.xi(), radius);
    Params::concat(w, mu, xi)
}

/// Blockwise projection of `x`, rescaling onto the boundary in [ProjectionMode::Sphere] and clamping into
/// the balls and the box in [ProjectionMode::Ball]
pub fn projection_with(x: &Params, radius: f64, bound: f64, mode: ProjectionMode) -> Params {
    match mode {
        ProjectionMode::Sphere => projection(x, radius, bound),
        ProjectionMode::Ball => {
            let w = l2_ball_projection(x.w(), 1.0);
            let mu = match x.mu() {
                mu if mu > bound => bound,
                mu if mu < -bound => -bound,
                mu => mu,
            };
            let xi = l2_ball_projection(x.xi(), radius);
            Params::concat(w, mu, xi)
        }
    }
}

/// The two primitives a first-order method needs from its feasible set
pub trait Constraint {
    /// Minimizer of `grad·s` over the set
    fn linear_oracle(&self, grad: &Params) -> Params;

    /// Map a point back onto the set
    fn project(&self, x: &Params) -> Params;
}

/// The DWD feasible set: unit ball for `w`, `[-bound, bound]` for `mu`, ball of `radius` for `xi`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DwdConstraint {
    pub radius: f64,
    pub bound: f64,
    #[serde(default)]
    pub mode: ProjectionMode,
}

impl DwdConstraint {
    pub fn new(radius: f64, bound: f64) -> Self {
        DwdConstraint {
            radius,
            bound,
            mode: ProjectionMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ProjectionMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Constraint for DwdConstraint {
    fn linear_oracle(&self, grad: &Params) -> Params {
        linear_oracle(grad, self.radius, self.bound)
    }

    fn project(&self, x: &Params) -> Params {
        projection_with(x, self.radius, self.bound, self.mode)
    }
}
