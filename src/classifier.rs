//! Fit/predict lifecycle
//!
//! The classifier has exactly two states, and they are two types:
//! [`ShallowNeuralClassifier`] is the unfitted state (hyperparameters and a
//! device, no parameters, no label mapping), and [`FittedModel`] is the
//! fitted state returned by `fit`. Inference methods exist only on
//! [`FittedModel`], so predicting before fitting is a compile error rather
//! than a runtime failure. Re-fitting produces a fresh independent handle
//! and leaves prior handles untouched.

use std::collections::BTreeMap;
use std::hash::Hash;

use anyhow::{Result, anyhow, ensure};
use burn::{
    module::AutodiffModule,
    optim::{AdamConfig, AdamWConfig, SgdConfig, decay::WeightDecayConfig},
    tensor::{
        Float, Tensor,
        activation::softmax,
        backend::{AutodiffBackend, Backend},
    },
};

use crate::config::{ClassifierConfig, OptimizerKind};
use crate::label::LabelIndex;
use crate::model::{ShallowNet, ShallowNetConfig};
use crate::tensor::{indices_to_tensor, rows_to_tensor};
use crate::training::{TrainInputs, run_epochs};

/// Optional extras for [`ShallowNeuralClassifier::fit_with`].
///
/// Supplying a dev (held-out) feature matrix makes training record the
/// model's predictions on it every `dev_iter` epochs, which allows
/// inspecting learning progress without stopping training. The dev set is
/// never used for gradient updates.
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// Held-out feature matrix to predict on periodically.
    pub x_dev: Option<Vec<Vec<f32>>>,
    /// Epoch stride between dev-set predictions.
    pub dev_iter: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            x_dev: None,
            dev_iter: 10,
        }
    }
}

impl FitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dev_set(mut self, x_dev: Vec<Vec<f32>>) -> Self {
        self.x_dev = Some(x_dev);
        self
    }

    pub fn with_dev_iter(mut self, dev_iter: usize) -> Self {
        self.dev_iter = dev_iter;
        self
    }
}

/// Unfitted shallow neural classifier.
///
/// Holds an immutable hyperparameter set and the target device. Calling
/// [`fit`](Self::fit) builds a fresh graph and optimizer, trains them to
/// completion, and returns the resulting [`FittedModel`]; the classifier
/// itself never changes and can be reused to train further independent
/// models.
///
/// # Example
/// ```ignore
/// use burn::backend::{Autodiff, NdArray, ndarray::NdArrayDevice};
/// use shallow_classifier::{ClassifierConfig, ShallowNeuralClassifier};
///
/// let classifier = ShallowNeuralClassifier::<Autodiff<NdArray>>::new(
///     ClassifierConfig::new().with_max_epochs(50),
///     NdArrayDevice::Cpu,
/// );
/// let model = classifier.fit(&x_train, &y_train)?;
/// let predictions = model.predict(&x_test)?;
/// ```
pub struct ShallowNeuralClassifier<B: AutodiffBackend> {
    config: ClassifierConfig,
    device: B::Device,
}

impl<B: AutodiffBackend> ShallowNeuralClassifier<B> {
    /// Creates an unfitted classifier from a hyperparameter set and device.
    pub fn new(config: ClassifierConfig, device: B::Device) -> Self {
        Self { config, device }
    }

    /// The hyperparameters this classifier trains with.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Fits a model with default extras (no dev set).
    ///
    /// See [`fit_with`](Self::fit_with).
    pub fn fit<L>(&self, x: &[Vec<f32>], y: &[L]) -> Result<FittedModel<B, L>>
    where
        L: Clone + Ord + Hash,
    {
        self.fit_with(x, y, FitOptions::default())
    }

    /// Fits a model on a feature matrix and a matching label sequence.
    ///
    /// The distinct labels of `y` are collected, sorted, and assigned
    /// contiguous class indices; the input layer is sized to the observed
    /// row width and the output layer to the class count. Training runs
    /// for exactly `max_epochs` epochs of shuffled mini-batches; there is
    /// no convergence check and no checkpointing. Every call starts from
    /// freshly initialized parameters and optimizer state.
    ///
    /// # Errors
    /// Fails on an empty or ragged feature matrix, a label sequence whose
    /// length differs from the row count, or non-positive `hidden_dim`,
    /// `batch_size`, or `dev_iter` values.
    pub fn fit_with<L>(&self, x: &[Vec<f32>], y: &[L], options: FitOptions) -> Result<FittedModel<B, L>>
    where
        L: Clone + Ord + Hash,
    {
        ensure!(!x.is_empty(), "training set has no examples");
        ensure!(
            x.len() == y.len(),
            "feature matrix has {} rows but {} labels were given",
            x.len(),
            y.len()
        );
        ensure!(self.config.hidden_dim > 0, "hidden_dim must be positive");
        ensure!(self.config.batch_size > 0, "batch_size must be positive");
        ensure!(options.dev_iter > 0, "dev_iter must be positive");

        let input_dim = x[0].len();
        let labels = LabelIndex::from_labels(y);
        let encoded = labels.encode_all(y)?;

        let x_tensor = rows_to_tensor::<B>(x, &self.device)?;
        let y_tensor = indices_to_tensor::<B>(&encoded, &self.device);
        let x_dev = options
            .x_dev
            .as_deref()
            .map(|rows| rows_to_tensor::<B::InnerBackend>(rows, &self.device))
            .transpose()?;

        let graph = ShallowNetConfig::new(
            input_dim,
            self.config.hidden_dim,
            labels.len(),
            self.config.activation,
        )
        .init::<B>(&self.device);

        let inputs = TrainInputs {
            x: x_tensor,
            y: y_tensor,
            x_dev,
            labels: &labels,
            learning_rate: self.config.learning_rate,
            batch_size: self.config.batch_size,
            max_epochs: self.config.max_epochs,
            dev_iter: options.dev_iter,
        };

        let outcome = match self.config.optimizer {
            OptimizerKind::Sgd => {
                let optimizer = SgdConfig::new()
                    .with_weight_decay(self.weight_decay())
                    .init::<B, ShallowNet<B>>();
                run_epochs(graph, optimizer, inputs)?
            }
            OptimizerKind::Adam => {
                let optimizer = AdamConfig::new()
                    .with_weight_decay(self.weight_decay())
                    .init::<B, ShallowNet<B>>();
                run_epochs(graph, optimizer, inputs)?
            }
            OptimizerKind::AdamW => {
                let optimizer = AdamWConfig::new()
                    .with_weight_decay(self.config.l2_strength as f32)
                    .init::<B, ShallowNet<B>>();
                run_epochs(graph, optimizer, inputs)?
            }
        };

        Ok(FittedModel {
            model: outcome.model.valid(),
            labels,
            input_dim,
            errors: outcome.errors,
            dev_predictions: outcome.dev_predictions,
            device: self.device.clone(),
        })
    }

    fn weight_decay(&self) -> Option<WeightDecayConfig> {
        if self.config.l2_strength > 0.0 {
            Some(WeightDecayConfig {
                penalty: self.config.l2_strength as f32,
            })
        } else {
            None
        }
    }
}

/// A trained model, returned by [`ShallowNeuralClassifier::fit`].
///
/// Owns the trained graph (on the inference backend, so no gradient state
/// is ever tracked), the label mapping built at fit time, and the training
/// bookkeeping. All methods take `&self`; inference has no side effects.
pub struct FittedModel<B: AutodiffBackend, L> {
    model: ShallowNet<B::InnerBackend>,
    labels: LabelIndex<L>,
    input_dim: usize,
    errors: Vec<f64>,
    dev_predictions: BTreeMap<usize, Vec<L>>,
    device: B::Device,
}

impl<B: AutodiffBackend, L> FittedModel<B, L> {
    /// Per-class probabilities for each input row.
    ///
    /// Runs the stored graph and applies a softmax over the class
    /// dimension; every returned row sums to 1. The input width must match
    /// the width seen at fit time — a mismatch surfaces as the tensor
    /// backend's own shape failure.
    pub fn predict_proba(&self, x: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        let x = rows_to_tensor::<B::InnerBackend>(x, &self.device)?;
        predict_proba_graph(&self.model, x)
    }

    /// Predicted label for each input row, in the original label type.
    ///
    /// Takes the arg-max class of [`predict_proba`](Self::predict_proba)
    /// per row (first maximum on ties) and decodes it through the label
    /// mapping built at fit time.
    pub fn predict(&self, x: &[Vec<f32>]) -> Result<Vec<L>>
    where
        L: Clone,
    {
        let x = rows_to_tensor::<B::InnerBackend>(x, &self.device)?;
        predict_labels_graph(&self.model, &self.labels, x)
    }

    /// Distinct labels seen at fit time, sorted, in class-index order.
    pub fn classes(&self) -> &[L] {
        self.labels.classes()
    }

    /// Number of distinct classes.
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Feature width the input layer was sized to.
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Summed per-batch loss for each completed epoch, in epoch order.
    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    /// Dev-set predictions recorded during training, keyed by epoch number.
    ///
    /// Empty unless a dev set was supplied through [`FitOptions`].
    pub fn dev_predictions(&self) -> &BTreeMap<usize, Vec<L>> {
        &self.dev_predictions
    }
}

/// Softmax-normalized forward pass, shared by inference and the periodic
/// dev-set snapshot inside the training loop.
pub(crate) fn predict_proba_graph<B: Backend>(
    model: &ShallowNet<B>,
    x: Tensor<B, 2, Float>,
) -> Result<Vec<Vec<f32>>> {
    let probabilities = softmax(model.forward(x), 1);
    let n_classes = probabilities.dims()[1];
    let flat = probabilities
        .into_data()
        .to_vec::<f32>()
        .map_err(|err| anyhow!("failed to read probabilities from tensor: {err:?}"))?;

    Ok(flat.chunks(n_classes).map(<[f32]>::to_vec).collect())
}

pub(crate) fn predict_labels_graph<B: Backend, L: Clone>(
    model: &ShallowNet<B>,
    labels: &LabelIndex<L>,
    x: Tensor<B, 2, Float>,
) -> Result<Vec<L>> {
    predict_proba_graph(model, x)?
        .iter()
        .map(|row| {
            let best = argmax(row);
            labels
                .decode(best)
                .cloned()
                .ok_or_else(|| anyhow!("class index {best} out of range"))
        })
        .collect()
}

/// Index of the first maximum entry.
fn argmax(row: &[f32]) -> usize {
    let mut best = 0;
    for (index, value) in row.iter().enumerate() {
        if *value > row[best] {
            best = index;
        }
    }
    best
}
