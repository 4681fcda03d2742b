//! Label encoding
//!
//! Classifier labels can be any hashable, orderable value (integers,
//! strings, ...). Training works on contiguous integer class indices, so a
//! fitted model carries a bidirectional mapping between the caller's label
//! values and the internal index space.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use anyhow::{Context, Result};

/// Bidirectional mapping between label values and class indices.
///
/// Built once per `fit` call from the distinct labels of the training set,
/// sorted, and assigned contiguous indices `0..k`. The mapping is immutable
/// after construction; re-fitting builds an entirely new one.
#[derive(Debug, Clone)]
pub struct LabelIndex<L> {
    classes: Vec<L>,
    lookup: HashMap<L, usize>,
}

impl<L> LabelIndex<L>
where
    L: Clone + Ord + Hash,
{
    /// Collects the distinct labels of `y`, sorted, into a fresh index.
    pub fn from_labels(y: &[L]) -> Self {
        let classes: Vec<L> = y.iter().cloned().collect::<BTreeSet<L>>().into_iter().collect();
        let lookup = classes
            .iter()
            .enumerate()
            .map(|(index, label)| (label.clone(), index))
            .collect();

        Self { classes, lookup }
    }

    /// Returns the class index of `label`, if it was seen at fit time.
    pub fn encode(&self, label: &L) -> Option<usize> {
        self.lookup.get(label).copied()
    }

    /// Encodes a full label sequence into `i64` class indices.
    pub fn encode_all(&self, y: &[L]) -> Result<Vec<i64>> {
        y.iter()
            .map(|label| {
                self.encode(label)
                    .map(|index| index as i64)
                    .context("label not present in the fitted label index")
            })
            .collect()
    }

}

impl<L> LabelIndex<L> {
    /// Returns the original label value for a class index.
    pub fn decode(&self, index: usize) -> Option<&L> {
        self.classes.get(index)
    }

    /// The distinct labels, in index order.
    pub fn classes(&self) -> &[L] {
        &self.classes
    }

    /// Number of distinct classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
