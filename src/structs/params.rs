use eyre::{ensure, Result};
use ndarray::{s, Array1, ArrayView1, ArrayViewMut1};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut, Range};

/// Block sizes of a packed DWD parameter vector.
///
/// A packed vector stores `w` (length `d`), then the intercept `mu`, then the slacks `xi` (length `p`).
/// Every split of a `d + 1 + p` vector goes through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    pub d: usize,
    pub p: usize,
}

impl Dims {
    pub fn new(d: usize, p: usize) -> Self {
        Dims { d, p }
    }

    /// Total length of a packed vector, `d + 1 + p`
    pub fn len(&self) -> usize {
        self.d + 1 + self.p
    }

    /// Position of the intercept in the packed vector
    pub fn mu_index(&self) -> usize {
        self.d
    }

    pub fn w_range(&self) -> Range<usize> {
        0..self.d
    }

    pub fn xi_range(&self) -> Range<usize> {
        (self.d + 1)..self.len()
    }
}

/// Packed parameter vector `(w, mu, xi)` of the DWD problem.
///
/// This is a thin wrapper around a single [ndarray::Array1<f64>] so optimizers can keep working on flat
/// storage, while the kernel reads the blocks through [Params::w], [Params::mu] and [Params::xi].
/// Gradients, oracle outputs and Hessian-vector products share the same layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    dims: Dims,
    values: Array1<f64>,
}

impl Params {
    /// All-zero vector for the given block sizes
    pub fn zeros(dims: Dims) -> Self {
        Params {
            dims,
            values: Array1::zeros(dims.len()),
        }
    }

    /// Wrap an existing flat vector, checking it has length `d + 1 + p`
    pub fn from_flat(dims: Dims, values: Array1<f64>) -> Result<Self> {
        ensure!(
            values.len() == dims.len(),
            "Packed vector has length {}, expected d + 1 + p = {} + 1 + {} = {}",
            values.len(),
            dims.d,
            dims.p,
            dims.len()
        );
        Ok(Params { dims, values })
    }

    /// Build a packed vector from its three blocks. The block sizes are taken from `w` and `xi`.
    pub fn concat(w: Array1<f64>, mu: f64, xi: Array1<f64>) -> Self {
        let dims = Dims::new(w.len(), xi.len());
        let mut values = Array1::zeros(dims.len());
        values.slice_mut(s![dims.w_range()]).assign(&w);
        values[dims.mu_index()] = mu;
        values.slice_mut(s![dims.xi_range()]).assign(&xi);
        Params { dims, values }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Linear weights
    pub fn w(&self) -> ArrayView1<'_, f64> {
        self.values.slice(s![self.dims.w_range()])
    }

    pub fn w_mut(&mut self) -> ArrayViewMut1<'_, f64> {
        let range = self.dims.w_range();
        self.values.slice_mut(s![range])
    }

    /// Intercept
    pub fn mu(&self) -> f64 {
        self.values[self.dims.mu_index()]
    }

    pub fn set_mu(&mut self, mu: f64) {
        let index = self.dims.mu_index();
        self.values[index] = mu;
    }

    /// Slack variables
    pub fn xi(&self) -> ArrayView1<'_, f64> {
        self.values.slice(s![self.dims.xi_range()])
    }

    pub fn xi_mut(&mut self) -> ArrayViewMut1<'_, f64> {
        let range = self.dims.xi_range();
        self.values.slice_mut(s![range])
    }

    /// The flat storage
    pub fn as_array(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn into_inner(self) -> Array1<f64> {
        self.values
    }

    /// Inner product of two packed vectors with the same layout
    pub fn dot(&self, other: &Params) -> f64 {
        debug_assert_eq!(self.dims, other.dims, "Packed vectors with different layouts");
        self.values.dot(&other.values)
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().cloned()
    }
}

impl Index<usize> for Params {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl IndexMut<usize> for Params {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.values[index]
    }
}

impl From<Params> for Array1<f64> {
    fn from(params: Params) -> Self {
        params.values
    }
}

#[derive(serde_derive::Serialize, serde_derive::Deserialize)]
struct PackedRepr {
    w: Vec<f64>,
    mu: f64,
    xi: Vec<f64>,
}

impl Serialize for Params {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        PackedRepr {
            w: self.w().to_vec(),
            mu: self.mu(),
            xi: self.xi().to_vec(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Params {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = PackedRepr::deserialize(deserializer)?;
        Ok(Params::concat(
            Array1::from_vec(repr.w),
            repr.mu,
            Array1::from_vec(repr.xi),
        ))
    }
}
