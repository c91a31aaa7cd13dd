use std::f64::consts::E;

/// Logistic sigmoid, `1 / (1 + e^-x)`.
///
/// Total over `f64`: large negative inputs saturate to `0.0`, large positive
/// inputs to `1.0`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Derivative of the sigmoid evaluated at the pre-activation `x`.
pub fn sigmoid_derivative(x: f64) -> f64 {
    let fx = sigmoid(x);
    fx * (1.0 - fx)
}
