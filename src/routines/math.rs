//! Small numerical helpers shared by the kernel and the oracles.

use ndarray::ArrayView1;

/// Sign of a value with `sign(0) = 0`.
///
/// Unlike [f64::signum], a zero (of either sign) maps to `0.0`, and `NaN` stays `NaN`.
/// The box oracle relies on this: a flat intercept gradient keeps the intercept at the origin.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else if x == 0.0 {
        0.0
    } else {
        x
    }
}

/// Euclidean norm of a vector
#[inline]
pub fn l2_norm(v: ArrayView1<'_, f64>) -> f64 {
    v.dot(&v).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sign_values() {
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.1), -1.0);
        assert_eq!(sign(f64::INFINITY), 1.0);
        assert_eq!(sign(f64::NEG_INFINITY), -1.0);
    }

    #[test]
    fn test_sign_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        // signum would give 1.0 here
        assert_ne!(sign(0.0), 0.0_f64.signum());
    }

    #[test]
    fn test_sign_nan() {
        assert!(sign(f64::NAN).is_nan());
    }

    #[test]
    fn test_l2_norm() {
        let v = array![3.0, 4.0];
        assert!((l2_norm(v.view()) - 5.0).abs() < 1e-15);
        let empty = ndarray::Array1::<f64>::zeros(0);
        assert_eq!(l2_norm(empty.view()), 0.0);
    }
}
