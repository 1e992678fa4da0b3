use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::activation::activation::ActivationFunction;
use crate::error::Result;
use crate::init::initializer::Initializer;
use crate::network::network::Network;
use crate::network::topology::Topology;

/// Everything the command-line driver needs for one run.
///
/// Loaded from JSON; any omitted field falls back to the built-in demo
/// (2 inputs → 5 → 3 → 1 sigmoid, uniform `[0, 1)` parameters, input
/// `[0.5, 0.8]`, unseeded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub topology: Topology,
    pub input: Vec<f64>,
    /// Seed for parameter initialization. `None` draws from the OS.
    pub seed: Option<u64>,
    pub init: Initializer,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            topology: Topology::from_layer_sizes(2, &[5, 3, 1], ActivationFunction::Sigmoid),
            input: vec![0.5, 0.8],
            seed: None,
            init: Initializer::default(),
        }
    }
}

impl DriverConfig {
    pub fn load_json(path: &str) -> Result<DriverConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: DriverConfig = serde_json::from_reader(reader)?;
        debug!(path, layers = config.topology.layer_count(), "loaded driver config");
        Ok(config)
    }

    /// Builds the configured network, initializes it, and runs one forward
    /// pass over `input`.
    pub fn run(&self) -> Result<Vec<f64>> {
        let mut network = Network::new(self.topology.clone())?;
        match self.seed {
            Some(seed) => network.initialize_seeded(&self.init, seed),
            None => network.initialize(&self.init, &mut rand::thread_rng()),
        }
        network.forward(&self.input)
    }
}
