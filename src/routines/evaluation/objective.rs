use argmin::core::{ArgminError, CostFunction, Error, Gradient, Hessian};
use argmin_math::ArgminL2Norm;
use eyre::Result;
use ndarray::{Array1, Array2};

use super::dwd::{self, HESSIAN_EPS};
use crate::routines::settings::Settings;
use crate::structs::params::Params;
use crate::structs::problem::Problem;

/// Value, margins and gradient at one point, computed from a single margin evaluation
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub value: f64,
    pub denom: Array1<f64>,
    pub gradient: Params,
}

/// The DWD objective as an [argmin] problem over flat `Array1<f64>` parameters
///
/// Lets an external argmin solver drive the kernel. The regularizer used for [DwdObjective::quadratic_form]
/// defaults to [HESSIAN_EPS].
#[derive(Debug, Clone, Copy)]
pub struct DwdObjective<'a> {
    problem: &'a Problem,
    hessian_eps: f64,
}

impl<'a> DwdObjective<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        DwdObjective {
            problem,
            hessian_eps: HESSIAN_EPS,
        }
    }

    /// Objective using the regularizer from [Settings], which are validated first
    pub fn from_settings(problem: &'a Problem, settings: &Settings) -> Result<Self> {
        settings.validate()?;
        Ok(DwdObjective::new(problem).with_hessian_eps(settings.model.hessian_eps))
    }

    pub fn with_hessian_eps(mut self, eps: f64) -> Self {
        self.hessian_eps = eps;
        self
    }

    pub fn problem(&self) -> &Problem {
        self.problem
    }

    pub fn hessian_eps(&self) -> f64 {
        self.hessian_eps
    }

    /// Interpret a flat vector with the layout of this problem
    pub fn unpack(&self, param: &Array1<f64>) -> Result<Params> {
        Params::from_flat(self.problem.dims(), param.clone())
    }

    /// Value and gradient at `x`, sharing one computation of the margins
    pub fn evaluate(&self, x: &Params) -> Evaluation {
        let (value, denom) = dwd::value(self.problem, x);
        let gradient = dwd::gradient_with_denom(self.problem, &denom);
        tracing::trace!(
            "DWD objective = {:.6e}, |grad| = {:.6e}",
            value,
            gradient.as_array().l2_norm()
        );
        Evaluation {
            value,
            denom,
            gradient,
        }
    }

    /// `sᵀ·H·s` at the point with margins `denom`, using the configured regularizer
    pub fn quadratic_form(&self, s: &Params, denom: &Array1<f64>) -> f64 {
        dwd::hessian_quadratic_form_eps(self.problem, s, denom, self.hessian_eps)
    }

    /// Dense Hessian at `x`, one unguarded Hessian-vector product per column
    pub fn dense_hessian(&self, x: &Params) -> Array2<f64> {
        let dims = self.problem.dims();
        let denom = dwd::margins(self.problem, x);
        let mut hessian = Array2::zeros((dims.len(), dims.len()));
        for j in 0..dims.len() {
            let mut unit = Params::zeros(dims);
            unit[j] = 1.0;
            let column = dwd::hessian_vector_product(self.problem, &unit, &denom);
            hessian.column_mut(j).assign(column.as_array());
        }
        hessian
    }

    fn unpack_for_argmin(&self, param: &Array1<f64>) -> Result<Params, Error> {
        self.unpack(param).map_err(|e| {
            ArgminError::InvalidParameter {
                text: e.to_string(),
            }
            .into()
        })
    }
}

impl CostFunction for DwdObjective<'_> {
    type Param = Array1<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> Result<Self::Output, Error> {
        let x = self.unpack_for_argmin(param)?;
        Ok(dwd::value(self.problem, &x).0)
    }
}

impl Gradient for DwdObjective<'_> {
    type Param = Array1<f64>;
    type Gradient = Array1<f64>;

    fn gradient(&self, param: &Self::Param) -> Result<Self::Gradient, Error> {
        let x = self.unpack_for_argmin(param)?;
        Ok(dwd::gradient(self.problem, &x).into_inner())
    }
}

impl Hessian for DwdObjective<'_> {
    type Param = Array1<f64>;
    type Hessian = Array2<f64>;

    fn hessian(&self, param: &Self::Param) -> Result<Self::Hessian, Error> {
        let x = self.unpack_for_argmin(param)?;
        Ok(self.dense_hessian(&x))
    }
}
