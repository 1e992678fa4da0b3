use crate::{
    activation::activation::ActivationFunction,
    error::{NetworkError, Result},
    layers::neuron::{Neuron, NeuronMut},
    math::matrix::{zeroed_vec, Matrix},
};

/// A fully connected layer: `size` neurons, each reading `input_size` values.
///
/// Weights are one contiguous `size x input_size` matrix (row `j` belongs to
/// neuron `j`), biases one contiguous vector. The layer holds no per-pass
/// state; outputs are written into a caller-owned buffer by `feed_into`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    size: usize,
    input_size: usize,
    weights: Matrix,
    biases: Vec<f64>,
    activator: ActivationFunction,
}

impl Layer {
    /// Allocates `size` neurons of arity `input_size` with zero weights and
    /// zero biases.
    ///
    /// Both counts must be positive. Storage is allocated before the layer
    /// value exists, so a failed allocation never leaves a partial layer.
    pub fn new(size: usize, input_size: usize, activation: ActivationFunction) -> Result<Layer> {
        if size == 0 {
            return Err(NetworkError::invalid_topology("a layer needs at least one neuron"));
        }
        if input_size == 0 {
            return Err(NetworkError::invalid_topology("a neuron needs at least one input"));
        }

        let weights = Matrix::zeros(size, input_size)?;
        let biases = zeroed_vec(size)?;

        Ok(Layer {
            size,
            input_size,
            weights,
            biases,
            activator: activation,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activator
    }

    pub fn set_activation(&mut self, activation: ActivationFunction) {
        self.activator = activation;
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut Matrix {
        &mut self.weights
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    pub fn biases_mut(&mut self) -> &mut [f64] {
        &mut self.biases
    }

    /// Weight + bias count of this layer.
    pub fn parameter_count(&self) -> usize {
        self.weights.len() + self.biases.len()
    }

    pub fn neuron(&self, index: usize) -> Result<Neuron<'_>> {
        self.check_neuron(index)?;
        Ok(Neuron::new(self.weights.row(index), self.biases[index]))
    }

    pub fn neuron_mut(&mut self, index: usize) -> Result<NeuronMut<'_>> {
        self.check_neuron(index)?;
        Ok(NeuronMut::new(self.weights.row_mut(index), &mut self.biases[index]))
    }

    pub fn neurons(&self) -> impl Iterator<Item = Neuron<'_>> + '_ {
        (0..self.size).map(move |j| Neuron::new(self.weights.row(j), self.biases[j]))
    }

    /// Replaces the incoming weights of one neuron.
    pub fn set_neuron_weights(&mut self, index: usize, weights: &[f64]) -> Result<()> {
        self.check_neuron(index)?;
        NetworkError::check_len("neuron weights", self.input_size, weights.len())?;
        self.weights.row_mut(index).copy_from_slice(weights);
        Ok(())
    }

    pub fn set_neuron_bias(&mut self, index: usize, bias: f64) -> Result<()> {
        self.check_neuron(index)?;
        self.biases[index] = bias;
        Ok(())
    }

    /// Replaces all weights; `weights` is row-major, one row per neuron.
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        NetworkError::check_len("layer weights", self.weights.len(), weights.len())?;
        self.weights.as_mut_slice().copy_from_slice(weights);
        Ok(())
    }

    pub fn set_biases(&mut self, biases: &[f64]) -> Result<()> {
        NetworkError::check_len("layer biases", self.size, biases.len())?;
        self.biases.copy_from_slice(biases);
        Ok(())
    }

    /// Computes `activation(W * input + b)` into `output`.
    ///
    /// Lengths are validated by the caller (`Network::propagate`); this is the
    /// inner loop of the forward pass.
    pub(crate) fn feed_into(&self, input: &[f64], output: &mut [f64]) {
        for (o, neuron) in output.iter_mut().zip(self.neurons()) {
            *o = self.activator.function(neuron.weighted_sum(input));
        }
    }

    fn check_neuron(&self, index: usize) -> Result<()> {
        if index < self.size {
            Ok(())
        } else {
            Err(NetworkError::IndexOutOfRange { what: "neuron", index, len: self.size })
        }
    }
}
