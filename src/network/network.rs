use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::{
    activation::activation::ActivationFunction,
    error::{NetworkError, Result},
    init::initializer::Initializer,
    layers::dense::Layer,
    network::activations::Activations,
    network::topology::{LayerSpec, Topology},
};

/// An ordered stack of fully connected layers.
///
/// Layer `i`'s neuron count is always layer `i + 1`'s input arity: the
/// wiring is checked when the network is built, so a constructed `Network`
/// can only fail a forward pass on a wrongly sized input or output buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// Builds a network with zeroed weights and biases.
    ///
    /// Errors:
    /// - `InvalidTopology` when there are no layers or any count is zero
    /// - `DimensionMismatch` when a layer's input arity is not the previous
    ///   layer's size
    /// - `AllocationFailure` when parameter storage cannot be allocated
    pub fn new(topology: Topology) -> Result<Network> {
        topology.validate()?;

        let mut layers = Vec::new();
        layers
            .try_reserve_exact(topology.layers.len())
            .map_err(|_| NetworkError::AllocationFailure { requested: topology.layers.len() })?;
        for spec in &topology.layers {
            layers.push(Layer::new(spec.size, spec.input_size, spec.activation)?);
        }

        let network = Network { layers };
        debug!(
            layers = network.layer_count(),
            inputs = network.input_size(),
            outputs = network.output_size(),
            parameters = network.parameter_count(),
            "built network"
        );
        Ok(network)
    }

    /// Builds a sigmoid network from parallel per-layer neuron counts and
    /// input arities.
    pub fn from_counts(neurons_per_layer: &[usize], inputs_per_layer: &[usize]) -> Result<Network> {
        Network::new(Topology::from_counts(neurons_per_layer, inputs_per_layer)?)
    }

    /// Builds a network whose layers are chained from `input_size`.
    pub fn from_layer_sizes(
        input_size: usize,
        layer_sizes: &[usize],
        activation: ActivationFunction,
    ) -> Result<Network> {
        Network::new(Topology::from_layer_sizes(input_size, layer_sizes, activation))
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Result<&Layer> {
        let len = self.layers.len();
        self.layers
            .get(index)
            .ok_or(NetworkError::IndexOutOfRange { what: "layer", index, len })
    }

    /// Mutable access for setting parameters. The layer's shape cannot be
    /// changed through this reference, so wiring stays valid.
    pub fn layer_mut(&mut self, index: usize) -> Result<&mut Layer> {
        let len = self.layers.len();
        self.layers
            .get_mut(index)
            .ok_or(NetworkError::IndexOutOfRange { what: "layer", index, len })
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Length of the input vector `forward` expects.
    pub fn input_size(&self) -> usize {
        self.layers[0].input_size()
    }

    /// Length of the vector `forward` returns.
    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].size()
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(Layer::parameter_count).sum()
    }

    /// Shape description of this network.
    pub fn topology(&self) -> Topology {
        Topology::new(
            self.layers
                .iter()
                .map(|l| LayerSpec::new(l.size(), l.input_size()).with_activation(l.activation()))
                .collect(),
        )
    }

    pub fn set_neuron_weights(
        &mut self,
        layer: usize,
        neuron: usize,
        weights: &[f64],
    ) -> Result<()> {
        self.layer_mut(layer)?.set_neuron_weights(neuron, weights)
    }

    pub fn set_neuron_bias(&mut self, layer: usize, neuron: usize, bias: f64) -> Result<()> {
        self.layer_mut(layer)?.set_neuron_bias(neuron, bias)
    }

    /// Replaces every weight of one layer (row-major, one row per neuron).
    pub fn set_layer_weights(&mut self, layer: usize, weights: &[f64]) -> Result<()> {
        self.layer_mut(layer)?.set_weights(weights)
    }

    pub fn set_layer_biases(&mut self, layer: usize, biases: &[f64]) -> Result<()> {
        self.layer_mut(layer)?.set_biases(biases)
    }

    /// Fills every layer's parameters using `init`, drawing from `rng`.
    pub fn initialize<R: Rng + ?Sized>(&mut self, init: &Initializer, rng: &mut R) {
        for layer in &mut self.layers {
            init.initialize_layer(layer, &mut *rng);
        }
        debug!(?init, "initialized network parameters");
    }

    /// Same as `initialize` with a `StdRng` seeded from `seed`; identical
    /// seeds give identical parameters.
    pub fn initialize_seeded(&mut self, init: &Initializer, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.initialize(init, &mut rng);
    }

    /// Forward pass into caller-owned per-layer buffers.
    ///
    /// For each layer in order, neuron `j` computes
    /// `activation(bias_j + sum_k weight_jk * source_k)`, where `source` is
    /// `input` for layer 0 and the previous layer's outputs otherwise.
    /// Returns the final layer's outputs, which stay readable in
    /// `activations` together with every intermediate layer's outputs.
    ///
    /// The network itself is not modified, so passes may run concurrently
    /// over a shared `&Network` as long as each has its own `Activations`.
    pub fn propagate<'a>(
        &self,
        input: &[f64],
        activations: &'a mut Activations,
    ) -> Result<&'a [f64]> {
        NetworkError::check_len("input vector", self.input_size(), input.len())?;
        activations.check_shape(self)?;

        self.layers[0].feed_into(input, activations.layer_output_mut(0));
        for (i, layer) in self.layers.iter().enumerate().skip(1) {
            let (previous, current) = activations.previous_and_current(i);
            layer.feed_into(previous, current);
        }
        Ok(activations.output())
    }

    /// Forward pass returning a freshly allocated output vector.
    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        let mut activations = Activations::for_network(self)?;
        Ok(self.propagate(input, &mut activations)?.to_vec())
    }

    /// Forward pass writing the final layer's outputs into `output`, which
    /// must already be sized to `output_size()`.
    pub fn forward_into(&self, input: &[f64], output: &mut [f64]) -> Result<()> {
        NetworkError::check_len("output buffer", self.output_size(), output.len())?;
        let mut activations = Activations::for_network(self)?;
        output.copy_from_slice(self.propagate(input, &mut activations)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::sigmoid;
    use approx::assert_abs_diff_eq;

    fn reference_topology() -> Network {
        Network::from_counts(&[5, 3, 1], &[2, 5, 3]).unwrap()
    }

    #[test]
    fn test_from_counts_builds_each_layer() {
        let net = reference_topology();
        assert_eq!(net.layer_count(), 3);
        assert_eq!(net.input_size(), 2);
        assert_eq!(net.output_size(), 1);
        let shapes: Vec<_> = net.layers().iter().map(|l| (l.size(), l.input_size())).collect();
        assert_eq!(shapes, vec![(5, 2), (3, 5), (1, 3)]);
        assert_eq!(net.parameter_count(), 5 * 2 + 5 + 3 * 5 + 3 + 3 + 1);
    }

    #[test]
    fn test_construction_zeroes_biases() {
        let net = reference_topology();
        for layer in net.layers() {
            assert!(layer.biases().iter().all(|&b| b == 0.0));
        }
    }

    #[test]
    fn test_wiring_mismatch_rejected_at_construction() {
        let err = Network::from_counts(&[5, 3], &[2, 4]).unwrap_err();
        assert!(matches!(err, NetworkError::DimensionMismatch { expected: 5, actual: 4, .. }));
    }

    #[test]
    fn test_zero_counts_rejected() {
        assert!(matches!(Network::from_counts(&[], &[]), Err(NetworkError::InvalidTopology { .. })));
        assert!(matches!(Network::from_counts(&[0], &[2]), Err(NetworkError::InvalidTopology { .. })));
        assert!(matches!(Network::from_counts(&[1], &[0]), Err(NetworkError::InvalidTopology { .. })));
    }

    #[test]
    fn test_single_neuron_zero_input() {
        let mut net = Network::from_counts(&[1], &[1]).unwrap();
        net.set_neuron_weights(0, 0, &[1.0]).unwrap();
        assert_eq!(net.forward(&[0.0]).unwrap(), vec![0.5]);
    }

    #[test]
    fn test_single_neuron_matches_sigmoid_of_product() {
        let mut net = Network::from_counts(&[1], &[1]).unwrap();
        net.set_neuron_weights(0, 0, &[-1.5]).unwrap();
        assert_eq!(net.forward(&[2.0]).unwrap(), vec![sigmoid(-1.5 * 2.0)]);
    }

    #[test]
    fn test_two_layer_chain() {
        let mut net = Network::from_counts(&[1, 1], &[1, 1]).unwrap();
        net.set_neuron_weights(0, 0, &[1.0]).unwrap();
        net.set_neuron_weights(1, 0, &[1.0]).unwrap();

        let mut activations = Activations::for_network(&net).unwrap();
        let out = net.propagate(&[2.0], &mut activations).unwrap().to_vec();

        assert_abs_diff_eq!(activations.layer_output(0).unwrap()[0], 0.8808, epsilon = 1e-3);
        assert_abs_diff_eq!(out[0], 0.7069, epsilon = 1e-3);
        assert_eq!(out[0], sigmoid(sigmoid(2.0)));
    }

    #[test]
    fn test_bias_is_added() {
        let mut net = Network::from_counts(&[1], &[2]).unwrap();
        net.set_layer_weights(0, &[0.5, 0.25]).unwrap();
        net.set_neuron_bias(0, 0, -1.0).unwrap();
        let out = net.forward(&[2.0, 4.0]).unwrap();
        assert_eq!(out[0], sigmoid(-1.0 + 0.5 * 2.0 + 0.25 * 4.0));
    }

    #[test]
    fn test_input_length_checked() {
        let net = reference_topology();
        assert!(matches!(
            net.forward(&[1.0, 2.0, 3.0]),
            Err(NetworkError::DimensionMismatch { expected: 2, actual: 3, .. })
        ));
    }

    #[test]
    fn test_forward_into_checks_output_buffer() {
        let mut net = reference_topology();
        net.initialize_seeded(&Initializer::default(), 11);

        let mut wrong = [0.0; 2];
        assert!(matches!(
            net.forward_into(&[0.5, 0.8], &mut wrong),
            Err(NetworkError::DimensionMismatch { expected: 1, actual: 2, .. })
        ));

        let mut out = [0.0; 1];
        net.forward_into(&[0.5, 0.8], &mut out).unwrap();
        assert_eq!(out.to_vec(), net.forward(&[0.5, 0.8]).unwrap());
    }

    #[test]
    fn test_activations_from_other_shape_rejected() {
        let net = reference_topology();
        let other = Network::from_counts(&[4, 1], &[2, 4]).unwrap();
        let mut activations = Activations::for_network(&other).unwrap();
        assert!(matches!(
            net.propagate(&[0.0, 0.0], &mut activations),
            Err(NetworkError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_forward_is_deterministic() {
        let mut net = reference_topology();
        net.initialize_seeded(&Initializer::default(), 99);
        let a = net.forward(&[0.5, 0.8]).unwrap();
        let b = net.forward(&[0.5, 0.8]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeded_initialization_is_reproducible() {
        let mut a = reference_topology();
        let mut b = reference_topology();
        a.initialize_seeded(&Initializer::default(), 5);
        b.initialize_seeded(&Initializer::default(), 5);
        assert_eq!(a, b);
        b.initialize_seeded(&Initializer::default(), 6);
        assert_ne!(a, b);
    }

    #[test]
    fn test_topology_reflects_layers() {
        let net = Network::from_layer_sizes(3, &[4, 2], ActivationFunction::Tanh).unwrap();
        let t = net.topology();
        assert_eq!(t.layers[0], LayerSpec::new(4, 3).with_activation(ActivationFunction::Tanh));
        assert_eq!(Network::new(t).unwrap().layer_count(), 2);
    }

    #[test]
    fn test_layer_index_checked() {
        let mut net = reference_topology();
        assert!(matches!(
            net.set_neuron_bias(3, 0, 1.0),
            Err(NetworkError::IndexOutOfRange { what: "layer", index: 3, len: 3 })
        ));
        assert!(net.layer(2).is_ok());
    }

    #[test]
    fn test_per_layer_activation() {
        let mut net = Network::from_counts(&[1, 1], &[1, 1]).unwrap();
        net.layer_mut(1).unwrap().set_activation(ActivationFunction::Identity);
        net.set_neuron_weights(0, 0, &[1.0]).unwrap();
        net.set_neuron_weights(1, 0, &[2.0]).unwrap();
        net.set_neuron_bias(1, 0, 0.5).unwrap();
        let out = net.forward(&[0.0]).unwrap();
        assert_eq!(out[0], 0.5 + 2.0 * 0.5);
    }
}
