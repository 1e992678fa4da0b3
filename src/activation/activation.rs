use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Logistic sigmoid: `1 / (1 + e^-x)`.
///
/// Saturates to 0 or 1 at extreme inputs; that is not treated as an error.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Scalar non-linearity applied to each neuron's weighted sum.
///
/// Selected per layer. `Sigmoid` is the default and the only one the
/// reference driver uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
    Tanh,
    #[serde(rename = "relu")]
    ReLU,
    #[serde(rename = "leaky_relu")]
    LeakyReLU { alpha: f64 },
    Identity,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => sigmoid(x),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
            ActivationFunction::Identity => x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sigmoid_at_zero_is_half() {
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn test_sigmoid_is_bounded() {
        for &x in &[-30.0, -5.0, -1.0, -1e-3, 1e-3, 1.0, 5.0, 30.0] {
            let y = sigmoid(x);
            assert!(y > 0.0 && y < 1.0, "sigmoid({x}) = {y} escaped (0, 1)");
        }
    }

    #[test]
    fn test_sigmoid_saturates_without_nan() {
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
    }

    #[test]
    fn test_sigmoid_known_values() {
        assert_abs_diff_eq!(sigmoid(2.0), 0.880797, epsilon = 1e-6);
        assert_abs_diff_eq!(sigmoid(-2.0), 1.0 - 0.880797, epsilon = 1e-6);
    }

    #[test]
    fn test_default_is_sigmoid() {
        assert_eq!(ActivationFunction::default(), ActivationFunction::Sigmoid);
    }

    #[test]
    fn test_elementwise_functions() {
        assert_eq!(ActivationFunction::ReLU.function(-2.0), 0.0);
        assert_eq!(ActivationFunction::ReLU.function(3.0), 3.0);
        assert_eq!(ActivationFunction::LeakyReLU { alpha: 0.1 }.function(-2.0), -0.2);
        assert_eq!(ActivationFunction::Identity.function(-7.5), -7.5);
        assert_abs_diff_eq!(ActivationFunction::Tanh.function(0.5), 0.5_f64.tanh());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ActivationFunction::ReLU).unwrap();
        assert_eq!(json, "\"relu\"");
        let parsed: ActivationFunction = serde_json::from_str("\"sigmoid\"").unwrap();
        assert_eq!(parsed, ActivationFunction::Sigmoid);
        let leaky: ActivationFunction =
            serde_json::from_str(r#"{"leaky_relu":{"alpha":0.01}}"#).unwrap();
        assert_eq!(leaky, ActivationFunction::LeakyReLU { alpha: 0.01 });
    }
}
