use argmin::core::{CostFunction, Gradient, Hessian};
use dwdcore::prelude::*;
use eyre::Result;
use ndarray::Array1;

mod common;

#[test]
fn test_cost_and_gradient_match_kernel() -> Result<()> {
    let problem = common::problem(1.0);
    let objective = DwdObjective::new(&problem);
    let x = common::interior_point();

    let cost = objective.cost(x.as_array()).unwrap();
    let grad = objective.gradient(x.as_array()).unwrap();

    assert_eq!(cost, dwd::value(&problem, &x).0);
    assert_eq!(&grad, dwd::gradient(&problem, &x).as_array());

    Ok(())
}

#[test]
fn test_wrong_length_is_rejected() {
    let problem = common::problem(1.0);
    let objective = DwdObjective::new(&problem);
    let too_short = Array1::zeros(problem.dims().len() - 1);

    assert!(objective.cost(&too_short).is_err());
    assert!(objective.gradient(&too_short).is_err());
    assert!(objective.hessian(&too_short).is_err());
    assert!(objective.unpack(&too_short).is_err());
}

/// The dense Hessian is symmetric and reproduces the Hessian-vector product
#[test]
fn test_dense_hessian() -> Result<()> {
    let problem = common::problem(2.0);
    let objective = DwdObjective::new(&problem);
    let x = common::interior_point();
    let s = common::direction();

    let hessian = objective.hessian(x.as_array()).unwrap();
    let len = problem.dims().len();
    assert_eq!(hessian.dim(), (len, len));

    for i in 0..len {
        for j in 0..len {
            let scale = hessian[[i, j]].abs().max(1.0);
            assert!((hessian[[i, j]] - hessian[[j, i]]).abs() < 1e-12 * scale);
        }
    }

    let hs = hessian.dot(s.as_array());
    let expected = dwd::hessian_vector_product_from_params(&problem, &s, &x);
    for (a, b) in hs.iter().zip(expected.iter()) {
        assert!((a - b).abs() < 1e-10 * b.abs().max(1.0));
    }

    Ok(())
}

#[test]
fn test_evaluate_shares_margins() {
    let problem = common::problem(1.0);
    let objective = DwdObjective::new(&problem);
    let x = common::interior_point();

    let eval = objective.evaluate(&x);
    assert_eq!(eval.denom, dwd::margins(&problem, &x));
    assert_eq!(eval.value, dwd::value(&problem, &x).0);
    assert_eq!(eval.gradient, dwd::gradient(&problem, &x));
}

#[test]
fn test_quadratic_form_uses_configured_eps() -> Result<()> {
    let problem = common::problem(1.0);
    let x = common::interior_point();
    let s = common::direction();
    let denom = dwd::margins(&problem, &x);

    let default = DwdObjective::new(&problem);
    assert_eq!(default.hessian_eps(), dwd::HESSIAN_EPS);
    assert_eq!(
        default.quadratic_form(&s, &denom),
        dwd::hessian_quadratic_form(&problem, &s, &denom)
    );

    let mut settings = Settings::default();
    settings.model.hessian_eps = 0.0;
    let unguarded = DwdObjective::from_settings(&problem, &settings)?;
    assert_eq!(
        unguarded.quadratic_form(&s, &denom),
        dwd::hessian_quadratic_form_eps(&problem, &s, &denom, 0.0)
    );

    Ok(())
}

/// Settings built in code are validated before they reach the objective
#[test]
fn test_from_settings_rejects_negative_eps() {
    let problem = common::problem(1.0);
    let mut settings = Settings::default();
    settings.model.hessian_eps = -1.0;

    assert!(DwdObjective::from_settings(&problem, &settings).is_err());
}
