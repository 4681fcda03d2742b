//! Classifier hyperparameters
//!
//! An explicit, immutable configuration object replaces ad-hoc shared
//! defaults: every option is documented here with its default value and
//! is fixed for the lifetime of the classifier instance.

use burn::config::Config;
use serde::{Deserialize, Serialize};

use crate::model::Activation;

/// Gradient-descent update rule applied at each batch step.
///
/// `Sgd` and `Adam` treat the configured L2 strength as a coupled weight
/// decay penalty; `AdamW` applies it as decoupled decay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizerKind {
    Sgd,
    Adam,
    AdamW,
}

/// Hyperparameters for [`crate::ShallowNeuralClassifier`].
///
/// Built with `ClassifierConfig::new()` and adjusted through the generated
/// `with_*` methods:
///
/// ```ignore
/// let config = ClassifierConfig::new()
///     .with_hidden_dim(16)
///     .with_activation(Activation::Relu)
///     .with_max_epochs(200);
/// ```
#[derive(Config, Debug)]
pub struct ClassifierConfig {
    /// Width of the single hidden layer.
    #[config(default = 50)]
    pub hidden_dim: usize,
    /// Nonlinearity between the two linear transforms.
    #[config(default = "Activation::Tanh")]
    pub activation: Activation,
    /// Number of examples per gradient step.
    #[config(default = 1028)]
    pub batch_size: usize,
    /// Fixed learning rate passed to the optimizer at every step.
    #[config(default = 0.01)]
    pub learning_rate: f64,
    /// L2 regularization strength; `0.0` disables weight decay.
    #[config(default = 0.0)]
    pub l2_strength: f64,
    /// Update rule used during training.
    #[config(default = "OptimizerKind::Adam")]
    pub optimizer: OptimizerKind,
    /// Number of full passes over the training batches. Exhausting this
    /// count is the only stopping condition.
    #[config(default = 100)]
    pub max_epochs: usize,
}
