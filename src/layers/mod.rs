pub mod dense;
pub mod neuron;

pub use dense::Layer;
pub use neuron::{Neuron, NeuronMut};
