//! A shallow feed-forward neural network classifier built on the burn
//! autodiff framework.
//!
//! One hidden layer, configurable activation, cross-entropy objective,
//! shuffled mini-batch gradient descent. Labels can be any hashable,
//! orderable type; the fitted model decodes predictions back to the
//! original label values.
//!
//! The fit/predict lifecycle is encoded in the types: an unfitted
//! [`ShallowNeuralClassifier`] holds only hyperparameters, and `fit`
//! returns an independent [`FittedModel`] carrying the trained graph,
//! label mapping, error history, and optional dev-set snapshots.
//!
//! ```ignore
//! use burn::backend::{Autodiff, NdArray, ndarray::NdArrayDevice};
//! use shallow_classifier::{ClassifierConfig, ShallowNeuralClassifier};
//!
//! let x = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
//! let y = vec![0, 1, 1, 0];
//!
//! let classifier = ShallowNeuralClassifier::<Autodiff<NdArray>>::new(
//!     ClassifierConfig::new().with_max_epochs(50),
//!     NdArrayDevice::Cpu,
//! );
//! let model = classifier.fit(&x, &y)?;
//! let predictions = model.predict(&x)?;
//! ```

pub mod classifier;
pub mod config;
pub mod data;
pub mod label;
pub mod model;
pub mod tensor;
pub mod training;

pub use classifier::{FitOptions, FittedModel, ShallowNeuralClassifier};
pub use config::{ClassifierConfig, OptimizerKind};
pub use label::LabelIndex;
pub use model::{Activation, ShallowNet, ShallowNetConfig};
pub use training::accuracy;
