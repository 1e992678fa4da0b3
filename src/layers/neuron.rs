use crate::error::{NetworkError, Result};
use crate::math::matrix::dot_from;

/// Read-only view of one neuron: its row of incoming weights and its bias.
///
/// Neurons are not stored as separate records; a `Layer` owns the weight
/// matrix and bias vector, and this view borrows the pieces for neuron `j`.
#[derive(Debug, Clone, Copy)]
pub struct Neuron<'a> {
    weights: &'a [f64],
    bias: f64,
}

impl<'a> Neuron<'a> {
    pub(crate) fn new(weights: &'a [f64], bias: f64) -> Self {
        Neuron { weights, bias }
    }

    pub fn input_count(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &'a [f64] {
        self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// `bias + sum(weight[k] * inputs[k])`, before activation.
    ///
    /// `inputs` must hold exactly one value per weight.
    pub fn pre_activation(&self, inputs: &[f64]) -> Result<f64> {
        NetworkError::check_len("neuron inputs", self.weights.len(), inputs.len())?;
        Ok(self.weighted_sum(inputs))
    }

    /// Unchecked form of `pre_activation` for the forward pass, which has
    /// already validated every buffer length.
    pub(crate) fn weighted_sum(&self, inputs: &[f64]) -> f64 {
        dot_from(self.bias, self.weights, inputs)
    }
}

/// Mutable view of one neuron, used by initializers and explicit setters.
#[derive(Debug)]
pub struct NeuronMut<'a> {
    weights: &'a mut [f64],
    bias: &'a mut f64,
}

impl<'a> NeuronMut<'a> {
    pub(crate) fn new(weights: &'a mut [f64], bias: &'a mut f64) -> Self {
        NeuronMut { weights, bias }
    }

    pub fn weights_mut(&mut self) -> &mut [f64] {
        self.weights
    }

    pub fn set_bias(&mut self, bias: f64) {
        *self.bias = bias;
    }
}
