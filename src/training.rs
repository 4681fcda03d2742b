//! Training loop
//!
//! This module owns the epoch loop of `fit`: per-epoch shuffled mini-batch
//! iteration, cross-entropy loss, one optimizer step per batch, error
//! bookkeeping, and the optional periodic dev-set snapshot.

use std::collections::BTreeMap;
use std::hash::Hash;

use anyhow::Result;
use burn::{
    module::AutodiffModule,
    nn::loss::CrossEntropyLossConfig,
    optim::{GradientsParams, Optimizer},
    tensor::{ElementConversion, Float, Int, Tensor, backend::AutodiffBackend},
};
use rand::seq::SliceRandom;

use crate::classifier::predict_labels_graph;
use crate::label::LabelIndex;
use crate::model::ShallowNet;
use crate::tensor::indices_to_tensor;

/// Everything the epoch loop needs besides the model and optimizer.
///
/// The training tensors live on the autodiff backend; the optional dev
/// matrix stays on the inner backend since it is only ever used for
/// gradient-free prediction.
pub(crate) struct TrainInputs<'a, B: AutodiffBackend, L> {
    pub x: Tensor<B, 2, Float>,
    pub y: Tensor<B, 1, Int>,
    pub x_dev: Option<Tensor<B::InnerBackend, 2, Float>>,
    pub labels: &'a LabelIndex<L>,
    pub learning_rate: f64,
    pub batch_size: usize,
    pub max_epochs: usize,
    pub dev_iter: usize,
}

/// Result of a completed training run.
pub(crate) struct TrainOutcome<B: AutodiffBackend, L> {
    pub model: ShallowNet<B>,
    pub errors: Vec<f64>,
    pub dev_predictions: BTreeMap<usize, Vec<L>>,
}

/// Partitions `0..n` into randomly ordered batches of at most `batch_size`.
///
/// Every index appears in exactly one batch; the final batch may be short.
fn shuffled_batches<R: rand::Rng>(n: usize, batch_size: usize, rng: &mut R) -> Vec<Vec<i64>> {
    let mut indices: Vec<i64> = (0..n as i64).collect();
    indices.shuffle(rng);
    indices.chunks(batch_size).map(<[i64]>::to_vec).collect()
}

/// Runs the configured number of epochs over the training tensors.
///
/// Each epoch draws a fresh shuffled batch partition, accumulates the sum
/// of per-batch loss values as the epoch error, and applies one gradient
/// step per batch. When a dev matrix is present, every `dev_iter`-th epoch
/// records the model's current predictions on it, keyed by epoch number.
/// One progress line per completed epoch goes to stderr.
pub(crate) fn run_epochs<B, O, L>(
    mut model: ShallowNet<B>,
    mut optimizer: O,
    inputs: TrainInputs<'_, B, L>,
) -> Result<TrainOutcome<B, L>>
where
    B: AutodiffBackend,
    O: Optimizer<ShallowNet<B>, B>,
    L: Clone + Ord + Hash,
{
    let device = inputs.x.device();
    let criterion = CrossEntropyLossConfig::new().init(&device);
    let n_examples = inputs.x.dims()[0];

    let mut rng = rand::thread_rng();
    let mut errors = Vec::with_capacity(inputs.max_epochs);
    let mut dev_predictions = BTreeMap::new();

    for epoch in 1..=inputs.max_epochs {
        let mut epoch_error = 0.0f64;

        for batch in shuffled_batches(n_examples, inputs.batch_size, &mut rng) {
            let indices = indices_to_tensor::<B>(&batch, &device);
            let x_batch = inputs.x.clone().select(0, indices.clone());
            let y_batch = inputs.y.clone().select(0, indices);

            let logits = model.forward(x_batch);
            let loss = criterion.forward(logits, y_batch);
            epoch_error += loss.clone().into_scalar().elem::<f64>();

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optimizer.step(inputs.learning_rate, model, grads);
        }

        if let Some(x_dev) = &inputs.x_dev {
            if epoch % inputs.dev_iter == 0 {
                let snapshot = predict_labels_graph(&model.valid(), inputs.labels, x_dev.clone())?;
                dev_predictions.insert(epoch, snapshot);
            }
        }

        errors.push(epoch_error);
        eprintln!(
            "Finished epoch {} of {}; error is {}",
            epoch, inputs.max_epochs, epoch_error
        );
    }

    Ok(TrainOutcome {
        model,
        errors,
        dev_predictions,
    })
}

/// Fraction of positions where `predictions` equals `targets`.
///
/// # Example
/// ```
/// use shallow_classifier::accuracy;
///
/// let score = accuracy(&[1, 2, 2, 3], &[1, 2, 3, 3]);
/// assert_eq!(score, 0.75);
/// ```
pub fn accuracy<L: PartialEq>(predictions: &[L], targets: &[L]) -> f32 {
    if predictions.is_empty() {
        return 0.0;
    }
    let correct = predictions
        .iter()
        .zip(targets)
        .filter(|(predicted, target)| predicted == target)
        .count();
    correct as f32 / predictions.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_partition_every_index_exactly_once() {
        let mut rng = rand::thread_rng();
        let batches = shuffled_batches(10, 3, &mut rng);

        assert_eq!(batches.len(), 4);
        assert_eq!(batches.last().unwrap().len(), 1);

        let mut seen: Vec<i64> = batches.into_iter().flatten().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<i64>>());
    }

    #[test]
    fn oversized_batch_size_yields_a_single_batch() {
        let mut rng = rand::thread_rng();
        let batches = shuffled_batches(4, 1028, &mut rng);

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 4);
    }

    #[test]
    fn accuracy_counts_matching_positions() {
        assert_eq!(accuracy(&["a", "b"], &["a", "b"]), 1.0);
        assert_eq!(accuracy(&["a", "b"], &["b", "a"]), 0.0);
        assert_eq!(accuracy::<i32>(&[], &[]), 0.0);
    }
}
