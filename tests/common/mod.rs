#![allow(dead_code)]

use dwdcore::structs::params::Params;
use dwdcore::structs::problem::Problem;
use ndarray::{Array1, Array2};

pub const N: usize = 6;
pub const D: usize = 3;

/// Design matrix with deterministic "random-like" entries in (0, 1.01)
pub fn design() -> Array2<f64> {
    Array2::from_shape_fn((N, D), |(i, j)| ((i * 7 + j * 13) % 100) as f64 / 100.0 + 0.01)
}

/// Alternating +1/-1 labels
pub fn labels() -> Array1<f64> {
    Array1::from_shape_fn(N, |i| if i % 2 == 0 { 1.0 } else { -1.0 })
}

pub fn costs() -> Array1<f64> {
    Array1::from_shape_fn(N, |i| 0.1 + 0.05 * i as f64)
}

pub fn problem(q: f64) -> Problem {
    Problem::new(design(), labels(), costs(), q).unwrap()
}

/// A point whose margins are all at least 0.3
pub fn interior_point() -> Params {
    Params::concat(
        ndarray::array![0.1, -0.2, 0.05],
        0.3,
        Array1::from_shape_fn(N, |i| 1.0 + 0.1 * i as f64),
    )
}

/// A direction touching every block
pub fn direction() -> Params {
    Params::concat(
        ndarray::array![0.4, 0.1, -0.3],
        -0.25,
        Array1::from_shape_fn(N, |i| ((i * 5) % 7) as f64 / 7.0 - 0.5),
    )
}

/// `x + h·e_j`
pub fn shifted(x: &Params, j: usize, h: f64) -> Params {
    let mut out = x.clone();
    out[j] += h;
    out
}
