use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};

/// Describes one layer of a network.
///
/// Fields:
/// - `size`       — number of neurons in this layer
/// - `input_size` — inputs each neuron reads (the previous layer's `size`,
///                  or the length of the external input vector for layer 0)
/// - `activation` — non-linearity applied to each neuron's weighted sum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    #[serde(default)]
    pub activation: ActivationFunction,
}

impl LayerSpec {
    pub fn new(size: usize, input_size: usize) -> Self {
        LayerSpec { size, input_size, activation: ActivationFunction::default() }
    }

    pub fn with_activation(mut self, activation: ActivationFunction) -> Self {
        self.activation = activation;
        self
    }
}

/// The shape of a network: ordered layer descriptions, input to output.
///
/// A `Topology` carries no weights. It can be stored as JSON so a network
/// shape can be kept in a config file; parameters are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub layers: Vec<LayerSpec>,
}

impl Topology {
    pub fn new(layers: Vec<LayerSpec>) -> Self {
        Topology { layers }
    }

    /// Builds a topology from parallel per-layer neuron counts and input
    /// arities, every layer using sigmoid.
    ///
    /// The two slices must have the same length; the layer count is that
    /// length.
    pub fn from_counts(neurons_per_layer: &[usize], inputs_per_layer: &[usize]) -> Result<Topology> {
        if neurons_per_layer.len() != inputs_per_layer.len() {
            return Err(NetworkError::invalid_topology(format!(
                "{} neuron counts but {} input arities",
                neurons_per_layer.len(),
                inputs_per_layer.len()
            )));
        }
        let layers = neurons_per_layer.iter().zip(inputs_per_layer.iter())
            .map(|(&size, &input_size)| LayerSpec::new(size, input_size))
            .collect();
        Ok(Topology { layers })
    }

    /// Builds a chained topology where each layer's arity is the previous
    /// layer's size, so it is consistent by construction.
    pub fn from_layer_sizes(
        input_size: usize,
        layer_sizes: &[usize],
        activation: ActivationFunction,
    ) -> Topology {
        let mut layers = Vec::with_capacity(layer_sizes.len());
        let mut fan_in = input_size;
        for &size in layer_sizes {
            layers.push(LayerSpec { size, input_size: fan_in, activation });
            fan_in = size;
        }
        Topology { layers }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Input vector length the described network expects, if it has layers.
    pub fn input_size(&self) -> Option<usize> {
        self.layers.first().map(|l| l.input_size)
    }

    pub fn output_size(&self) -> Option<usize> {
        self.layers.last().map(|l| l.size)
    }

    /// Checks counts and inter-layer wiring.
    ///
    /// - no layers, or any zero size / arity → `InvalidTopology`
    /// - layer `i`'s `input_size` differs from layer `i - 1`'s `size`
    ///   → `DimensionMismatch`
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(NetworkError::invalid_topology("a network needs at least one layer"));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.size == 0 {
                return Err(NetworkError::invalid_topology(format!("layer {i} has no neurons")));
            }
            if layer.input_size == 0 {
                return Err(NetworkError::invalid_topology(format!("layer {i} neurons have no inputs")));
            }
        }
        for (i, pair) in self.layers.windows(2).enumerate() {
            NetworkError::check_len(
                &format!("layer {} input arity (layer {} size)", i + 1, i),
                pair[0].size,
                pair[1].input_size,
            )?;
        }
        Ok(())
    }

    /// Serializes the topology to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a topology from a JSON file. The result is not validated
    /// here; `Network::new` does that.
    pub fn load_json(path: &str) -> Result<Topology> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let topology: Topology = serde_json::from_reader(reader)?;
        debug!(path, layers = topology.layers.len(), "loaded topology");
        Ok(topology)
    }
}
