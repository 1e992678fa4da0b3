use crate::error::{NetworkError, Result};
use crate::math::matrix::zeroed_vec;
use crate::network::network::Network;

/// Per-pass output buffers, one per layer.
///
/// A forward pass writes layer `i`'s outputs into `layer_output(i)` and reads
/// them back as layer `i + 1`'s inputs. Keeping these outside the `Network`
/// lets one network be evaluated from several threads at once, each thread
/// with its own `Activations`. A buffer can be reused across passes on any
/// network of the same shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Activations {
    outputs: Vec<Vec<f64>>,
}

impl Activations {
    /// Allocates zeroed buffers sized to `network`'s layers.
    pub fn for_network(network: &Network) -> Result<Activations> {
        let mut outputs = Vec::new();
        outputs
            .try_reserve_exact(network.layer_count())
            .map_err(|_| NetworkError::AllocationFailure { requested: network.layer_count() })?;
        for layer in network.layers() {
            outputs.push(zeroed_vec(layer.size())?);
        }
        Ok(Activations { outputs })
    }

    pub fn layer_count(&self) -> usize {
        self.outputs.len()
    }

    /// Outputs of layer `index` from the most recent pass.
    pub fn layer_output(&self, index: usize) -> Option<&[f64]> {
        self.outputs.get(index).map(Vec::as_slice)
    }

    /// Outputs of the final layer from the most recent pass.
    pub fn output(&self) -> &[f64] {
        self.outputs.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Checks these buffers line up with `network`'s layer sizes.
    pub(crate) fn check_shape(&self, network: &Network) -> Result<()> {
        NetworkError::check_len(
            "activation buffer layer count",
            network.layer_count(),
            self.outputs.len(),
        )?;
        for (i, (layer, buf)) in network.layers().iter().zip(self.outputs.iter()).enumerate() {
            NetworkError::check_len(
                &format!("activation buffer for layer {i}"),
                layer.size(),
                buf.len(),
            )?;
        }
        Ok(())
    }

    /// Splits into (outputs of layer `index - 1`, outputs of layer `index`).
    pub(crate) fn previous_and_current(&mut self, index: usize) -> (&[f64], &mut [f64]) {
        let (before, rest) = self.outputs.split_at_mut(index);
        (before[index - 1].as_slice(), rest[0].as_mut_slice())
    }

    pub(crate) fn layer_output_mut(&mut self, index: usize) -> &mut [f64] {
        &mut self.outputs[index]
    }
}
