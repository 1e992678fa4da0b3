use rand::Rng;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;

use crate::layers::dense::Layer;
use crate::math::matrix::fill_with;

/// Policy for filling a freshly built layer's weights and biases.
///
/// Initializers never own a generator: the caller passes one in, so runs are
/// reproducible exactly when the caller seeds it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Initializer {
    /// All weights and biases set to zero.
    Zeros,
    /// Weights and biases drawn uniformly from `[low, high)`.
    Uniform { low: f64, high: f64 },
    /// Xavier (Glorot): weights from N(0, sqrt(1 / fan_in)), biases zero.
    /// Suited to sigmoid / tanh layers.
    Xavier,
    /// He: weights from N(0, sqrt(2 / fan_in)), biases zero.
    /// Suited to ReLU layers.
    He,
}

impl Default for Initializer {
    /// Uniform `[0, 1)` for weights and biases.
    fn default() -> Self {
        Initializer::Uniform { low: 0.0, high: 1.0 }
    }
}

impl Initializer {
    pub fn initialize_layer<R: Rng + ?Sized>(&self, layer: &mut Layer, rng: &mut R) {
        let fan_in = layer.input_size() as f64;
        match *self {
            Initializer::Zeros => {
                layer.weights_mut().map_in_place(|_| 0.0);
                fill_with(layer.biases_mut(), |_| 0.0);
            }
            Initializer::Uniform { low, high } => {
                let span = high - low;
                layer.weights_mut().map_in_place(|_| low + span * rng.gen::<f64>());
                fill_with(layer.biases_mut(), |_| low + span * rng.gen::<f64>());
            }
            Initializer::Xavier => {
                let std_dev = (1.0 / fan_in).sqrt();
                layer
                    .weights_mut()
                    .map_in_place(|_| sample_standard_normal(&mut *rng) * std_dev);
                fill_with(layer.biases_mut(), |_| 0.0);
            }
            Initializer::He => {
                let std_dev = (2.0 / fan_in).sqrt();
                layer
                    .weights_mut()
                    .map_in_place(|_| sample_standard_normal(&mut *rng) * std_dev);
                fill_with(layer.biases_mut(), |_| 0.0);
            }
        }
    }
}

/// Samples a single value from N(0, 1) using the Box-Muller transform.
fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // Uniform samples in (0, 1] so ln never sees zero.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = 1.0 - rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
