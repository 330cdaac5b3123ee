use eyre::{ensure, Result};
use ndarray::{Array1, Array2};

use super::params::Dims;
use crate::routines::settings::Settings;

/// The immutable data of a DWD problem
///
/// Holds the design matrix `A` (n samples by d features), the labels `y`, the slack costs `c` and the
/// smoothing exponent `q`. Shapes are checked once here, so the kernel routines can index freely.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    a: Array2<f64>,
    y: Array1<f64>,
    c: Array1<f64>,
    q: f64,
}

impl Problem {
    pub fn new(a: Array2<f64>, y: Array1<f64>, c: Array1<f64>, q: f64) -> Result<Self> {
        let n = a.nrows();
        ensure!(
            y.len() == n,
            "Label vector has length {}, but the design matrix has {} rows",
            y.len(),
            n
        );
        // Margins add the slacks elementwise, so there is one slack per sample
        ensure!(
            c.len() == n,
            "Cost vector has length {}, but the design matrix has {} rows",
            c.len(),
            n
        );
        ensure!(
            q.is_finite() && q > 0.0,
            "Smoothing exponent q must be positive and finite, got {}",
            q
        );

        tracing::debug!(
            "DWD problem with {} samples, {} features and q = {}",
            n,
            a.ncols(),
            q
        );

        Ok(Problem { a, y, c, q })
    }

    /// Build a problem using the smoothing exponent from [Settings], which are validated first
    pub fn from_settings(
        a: Array2<f64>,
        y: Array1<f64>,
        c: Array1<f64>,
        settings: &Settings,
    ) -> Result<Self> {
        settings.validate()?;
        Problem::new(a, y, c, settings.model.q)
    }

    /// Design matrix
    pub fn a(&self) -> &Array2<f64> {
        &self.a
    }

    /// Labels
    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    /// Slack costs
    pub fn c(&self) -> &Array1<f64> {
        &self.c
    }

    pub fn q(&self) -> f64 {
        self.q
    }

    /// Number of samples
    pub fn n(&self) -> usize {
        self.a.nrows()
    }

    /// Number of features
    pub fn d(&self) -> usize {
        self.a.ncols()
    }

    /// Number of slack variables
    pub fn p(&self) -> usize {
        self.c.len()
    }

    /// Layout of the packed parameter vectors of this problem
    pub fn dims(&self) -> Dims {
        Dims::new(self.d(), self.p())
    }
}
