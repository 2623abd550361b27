use ndarray::ArrayView1;

pub struct QuadratureHelper;

impl QuadratureHelper {
    /// Trapezoidal-rule integral of `y` over `x`. Fewer than two points
    /// enclose no area and integrate to zero.
    pub fn trapezoid(x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        if x.len() < 2 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 1..x.len() {
            area += 0.5 * (x[i] - x[i - 1]) * (y[i] + y[i - 1]);
        }
        area
    }
}
