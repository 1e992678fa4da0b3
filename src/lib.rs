pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod init;
pub mod config;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::{sigmoid, ActivationFunction};
pub use layers::dense::Layer;
pub use layers::neuron::{Neuron, NeuronMut};
pub use network::network::Network;
pub use network::activations::Activations;
pub use network::topology::{LayerSpec, Topology};
pub use init::initializer::Initializer;
pub use config::driver_config::DriverConfig;
