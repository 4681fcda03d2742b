//! Shallow feed-forward network definition
//!
//! This module builds the computation graph used by the classifier:
//! an input-to-hidden linear transform, a configurable nonlinearity,
//! and a hidden-to-output linear transform producing per-class logits.

use burn::{
    config::Config,
    module::{Ignored, Module},
    nn::{Linear, LinearConfig},
    tensor::{Float, Tensor, activation, backend::Backend},
};
use serde::{Deserialize, Serialize};

/// Hidden-layer nonlinearity.
///
/// Applied element-wise between the two linear transforms. `Tanh` is the
/// default used by [`crate::ClassifierConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    Relu,
    Tanh,
    Sigmoid,
    Gelu,
}

impl Activation {
    /// Applies the activation to a 2-D tensor.
    pub fn forward<B: Backend>(&self, input: Tensor<B, 2, Float>) -> Tensor<B, 2, Float> {
        match self {
            Activation::Relu => activation::relu(input),
            Activation::Tanh => activation::tanh(input),
            Activation::Sigmoid => activation::sigmoid(input),
            Activation::Gelu => activation::gelu(input),
        }
    }
}

/// Configuration for [`ShallowNet`].
///
/// All four values are resolved before graph construction: the input width
/// and class count are observed from the training data, the hidden width
/// and activation come from the classifier configuration.
#[derive(Config, Debug)]
pub struct ShallowNetConfig {
    pub input_dim: usize,
    pub hidden_dim: usize,
    pub n_classes: usize,
    pub activation: Activation,
}

impl ShallowNetConfig {
    /// Initializes the network on the given device.
    ///
    /// Layer parameters use burn's default `Linear` initialization; there is
    /// no randomness contract beyond that.
    pub fn init<B: Backend>(&self, device: &B::Device) -> ShallowNet<B> {
        ShallowNet {
            input: LinearConfig::new(self.input_dim, self.hidden_dim).init(device),
            output: LinearConfig::new(self.hidden_dim, self.n_classes).init(device),
            activation: Ignored(self.activation),
        }
    }
}

/// Single hidden-layer feed-forward network.
///
/// Architecture: `input_dim` → `hidden_dim` (activation) → `n_classes`.
/// The forward pass produces unnormalized per-class scores (logits);
/// softmax normalization happens at inference time, not here, because
/// the cross-entropy loss consumes raw logits during training.
///
/// # Example
/// ```ignore
/// use burn::backend::ndarray::{NdArray, NdArrayDevice};
///
/// let device = NdArrayDevice::Cpu;
/// let net = ShallowNetConfig::new(4, 16, 3, Activation::Tanh).init::<NdArray>(&device);
/// let logits = net.forward(batch); // [batch_size, 3]
/// ```
#[derive(Module, Debug)]
pub struct ShallowNet<B: Backend> {
    input: Linear<B>,
    output: Linear<B>,
    activation: Ignored<Activation>,
}

impl<B: Backend> ShallowNet<B> {
    /// Maps an input batch of shape `[batch_size, input_dim]` to logits of
    /// shape `[batch_size, n_classes]`.
    pub fn forward(&self, input: Tensor<B, 2, Float>) -> Tensor<B, 2, Float> {
        let x = self.input.forward(input);
        let x = self.activation.forward(x);
        self.output.forward(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{NdArray, ndarray::NdArrayDevice};

    #[test]
    fn forward_produces_one_logit_row_per_example() {
        let device = NdArrayDevice::Cpu;
        let net = ShallowNetConfig::new(2, 8, 3, Activation::Tanh).init::<NdArray>(&device);

        let input = Tensor::<NdArray, 1>::from_floats([0.0, 1.0, 1.0, 0.0, 0.5, 0.5], &device)
            .reshape([3, 2]);
        let logits = net.forward(input);

        assert_eq!(logits.dims(), [3, 3]);
    }

    #[test]
    fn activations_preserve_shape() {
        let device = NdArrayDevice::Cpu;
        let input =
            Tensor::<NdArray, 1>::from_floats([-1.0, 0.0, 2.0, 3.0], &device).reshape([2, 2]);

        for activation in [
            Activation::Relu,
            Activation::Tanh,
            Activation::Sigmoid,
            Activation::Gelu,
        ] {
            let out = activation.forward(input.clone());
            assert_eq!(out.dims(), [2, 2]);
        }
    }
}
