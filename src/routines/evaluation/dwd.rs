//! Smoothed DWD loss over the packed `(w, mu, xi)` parameterization
//!
//! The objective is
//!
//! ```text
//! f(x) = 1/n Σ 1 / r_i^q  +  c·xi,      r = A·w + mu·y + xi
//! ```
//!
//! where `r` are the margins (`denom`). Every routine comes in two forms: one computing the margins from `x`,
//! and one trusting margins the caller already holds for that `x`. The kernel never checks that the two agree.
//!
//! No guard is applied to non-positive margins. Zeros and negatives propagate as `Inf`/`NaN`, and keeping
//! the iterate in the region `r > 0` is left to the calling optimizer.

use ndarray::{Array1, ArrayView2};

use crate::routines::math::sign;
use crate::structs::params::Params;
use crate::structs::problem::Problem;

/// Regularizer added to `r^(q+2)` in [hessian_quadratic_form]
pub const HESSIAN_EPS: f64 = 1e-10;

/// `A·v_w + v_mu·y + v_xi`, the action of the block row `(A, y, I)` on a packed vector
fn lift(problem: &Problem, v: &Params) -> Array1<f64> {
    debug_assert_eq!(v.dims(), problem.dims(), "Packed vector does not match the problem");
    let mut out = problem.a().dot(&v.w());
    out.scaled_add(v.mu(), problem.y());
    out += &v.xi();
    out
}

/// `(A, y, I)ᵀ·h`, scaled by `scale`, as a packed vector
fn restrict(problem: &Problem, h: &Array1<f64>, scale: f64) -> Params {
    let w = problem.a().t().dot(h) * scale;
    let mu = scale * problem.y().dot(h);
    let xi = h.mapv(|v| scale * v);
    Params::concat(w, mu, xi)
}

/// Margins `A·w + mu·y + xi` of a parameter vector
pub fn margins(problem: &Problem, x: &Params) -> Array1<f64> {
    lift(problem, x)
}

/// Objective value at `x`, together with the margins used to compute it
pub fn value(problem: &Problem, x: &Params) -> (f64, Array1<f64>) {
    let denom = margins(problem, x);
    value_with_denom(problem, x, denom)
}

/// Objective value at `x` for precomputed margins. The margins are handed back unchanged.
pub fn value_with_denom(problem: &Problem, x: &Params, denom: Array1<f64>) -> (f64, Array1<f64>) {
    let q = problem.q();
    let loss = denom.iter().map(|r| 1.0 / r.powf(q)).sum::<f64>() * (1.0 / problem.n() as f64);
    let slack = problem.c().dot(&x.xi());
    (loss + slack, denom)
}

/// Gradient of the objective at `x`
pub fn gradient(problem: &Problem, x: &Params) -> Params {
    let denom = margins(problem, x);
    gradient_with_denom(problem, &denom)
}

/// Gradient of the objective for precomputed margins
///
/// With `g = r^-(q+1)` the blocks are `(-q/n)·Aᵀg`, `(-q/n)·y·g` and `(-q/n)·g + c`.
pub fn gradient_with_denom(problem: &Problem, denom: &Array1<f64>) -> Params {
    let q = problem.q();
    let g = denom.mapv(|r| 1.0 / r.powf(q + 1.0));
    let mut grad = restrict(problem, &g, -q / problem.n() as f64);
    grad.xi_mut().zip_mut_with(problem.c(), |xi, c| *xi += c);
    grad
}

/// Quadratic form `sᵀ·H·s` of the Hessian at the point with margins `denom`
///
/// Uses `r^(q+2) + HESSIAN_EPS` in the denominator. [hessian_vector_product] does not add this term, so
/// `s·(H·s)` and this value differ by a relative amount of order `HESSIAN_EPS / r^(q+2)`.
/// Use [hessian_quadratic_form_eps] with `0.0` for the unguarded form.
pub fn hessian_quadratic_form(problem: &Problem, s: &Params, denom: &Array1<f64>) -> f64 {
    hessian_quadratic_form_eps(problem, s, denom, HESSIAN_EPS)
}

/// [hessian_quadratic_form] with margins computed from `x`
pub fn hessian_quadratic_form_from_params(problem: &Problem, s: &Params, x: &Params) -> f64 {
    let denom = margins(problem, x);
    hessian_quadratic_form(problem, s, &denom)
}

/// `sᵀ·H·s` with an explicit regularizer `eps` added to `r^(q+2)`
pub fn hessian_quadratic_form_eps(
    problem: &Problem,
    s: &Params,
    denom: &Array1<f64>,
    eps: f64,
) -> f64 {
    let q = problem.q();
    let t = lift(problem, s);
    let sum = t
        .iter()
        .zip(denom.iter())
        .map(|(t, r)| t * t * (1.0 / (r.powf(q + 2.0) + eps)))
        .sum::<f64>();
    q * (q + 1.0) / problem.n() as f64 * sum
}

/// Hessian-vector product `H·s` at the point with margins `denom`
///
/// With `t = A·s_w + s_mu·y + s_xi` and `h = t·r^-(q+2)`, the result is `q(q+1)/n · (Aᵀh, y·h, h)`.
/// The slack block is one entry per coordinate, the identity block of `(A, y, I)`.
pub fn hessian_vector_product(problem: &Problem, s: &Params, denom: &Array1<f64>) -> Params {
    let q = problem.q();
    let mut h = lift(problem, s);
    h.zip_mut_with(denom, |t, r| *t *= 1.0 / r.powf(q + 2.0));
    restrict(problem, &h, q * (q + 1.0) / problem.n() as f64)
}

/// [hessian_vector_product] with margins computed from `x`
pub fn hessian_vector_product_from_params(problem: &Problem, s: &Params, x: &Params) -> Params {
    let denom = margins(problem, x);
    hessian_vector_product(problem, s, &denom)
}

/// Classifier scores `A·w + mu` for the rows of `a`
pub fn decision_function(a: ArrayView2<'_, f64>, x: &Params) -> Array1<f64> {
    debug_assert_eq!(a.ncols(), x.dims().d, "Feature count does not match the weights");
    a.dot(&x.w()) + x.mu()
}

/// Predicted labels `sign(A·w + mu)`. A score of exactly zero is labelled `0.0`.
pub fn predict(a: ArrayView2<'_, f64>, x: &Params) -> Array1<f64> {
    decision_function(a, x).mapv(sign)
}
