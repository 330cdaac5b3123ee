//! Distance-Weighted Discrimination kernel for conditional-gradient solvers
//!
//! This crate provides the smoothed DWD objective
//!
//! ```text
//! f(w, mu, xi) = 1/n Σ 1 / (A·w + mu·y + xi)_i^q  +  c·xi
//! ```
//!
//! together with its gradient and Hessian-vector products, and the linear minimization oracle and projection
//! for the feasible set `{‖w‖ ≤ 1} × [-u, u] × {‖xi‖ ≤ R}`. The optimizer loop itself lives outside this
//! crate, either hand-written on top of [routines::evaluation] or an [argmin] solver driving
//! [routines::evaluation::objective::DwdObjective].
//!
//! ```
//! use dwdcore::prelude::*;
//! use ndarray::array;
//!
//! let a = array![[1.0, 0.0], [0.0, 1.0]];
//! let problem = Problem::new(a, array![1.0, -1.0], array![1.0, 1.0], 1.0)?;
//! let x = Params::concat(array![0.5, -0.5], 0.0, array![1.0, 1.0]);
//!
//! let (value, denom) = dwd::value(&problem, &x);
//! let grad = dwd::gradient_with_denom(&problem, &denom);
//! let vertex = oracle::linear_oracle(&grad, 1.0, 1.0);
//!
//! assert!(value.is_finite());
//! assert_eq!(vertex.dims(), problem.dims());
//! # Ok::<(), eyre::Report>(())
//! ```

pub mod routines;
pub mod structs;

/// A collection of commonly used items to simplify imports.
pub mod prelude {
    pub use crate::routines::evaluation::dwd;
    pub use crate::routines::evaluation::objective::{DwdObjective, Evaluation};
    pub use crate::routines::evaluation::oracle;
    pub use crate::routines::evaluation::oracle::{Constraint, DwdConstraint, ProjectionMode};
    pub use crate::routines::logger::setup_log;
    pub use crate::routines::settings::Settings;
    pub use crate::structs::params::{Dims, Params};
    pub use crate::structs::problem::Problem;
}
