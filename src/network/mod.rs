pub mod activations;
pub mod network;
pub mod topology;

pub use activations::Activations;
pub use network::Network;
pub use topology::{LayerSpec, Topology};
