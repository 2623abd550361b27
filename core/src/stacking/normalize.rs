use ndarray::{Array1, ArrayView1};

use crate::math::quadrature::QuadratureHelper;
use crate::prelude::{StackError, StackResult};

/// Scale `powers` in place so it integrates to one over `frequencies`.
///
/// Returns the integral that was divided out. A zero or non-finite integral
/// cannot normalize and fails instead of flooding the curve with NaN.
pub fn unit_area(frequencies: ArrayView1<f64>, powers: &mut Array1<f64>) -> StackResult<f64> {
    let integral = QuadratureHelper::trapezoid(frequencies, powers.view());
    if integral == 0.0 {
        return Err(StackError::Normalization("integral is zero".into()));
    }
    if !integral.is_finite() {
        return Err(StackError::Normalization(format!(
            "integral is {}",
            integral
        )));
    }
    *powers /= integral;
    Ok(integral)
}
