//! Assembles several fragment samples into one batch.

use crate::datasets::FragmentSample;
use fragset_core::{ops::stack, FragsetError, Tensor};

/// A batch of fragment samples.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentBatch<K, L> {
    /// Shape `[B, k, C, H, W]`.
    pub images: Tensor<f32>,
    /// Shape `[B, k]`.
    pub labels: Tensor<L>,
    /// One origin key per sample, in batch order.
    pub origins: Vec<K>,
}

impl<K, L> FragmentBatch<K, L> {
    /// Number of samples in the batch.
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

/// Stacks samples along a new leading batch axis.
///
/// # Errors
///
/// * `EmptyTensorList` for an empty batch.
/// * `ShapeMismatch` when samples disagree on shape, which happens when a
///   group smaller than the requested fragment count landed in the batch.
pub fn collate_fragments<K, L: Clone>(
    samples: Vec<FragmentSample<K, L>>,
) -> Result<FragmentBatch<K, L>, FragsetError> {
    let first_shape = samples
        .first()
        .ok_or(FragsetError::EmptyTensorList)?
        .images
        .shape();
    if let Some(odd) = samples.iter().find(|s| s.images.shape() != first_shape) {
        return Err(FragsetError::ShapeMismatch {
            expected: first_shape,
            actual: odd.images.shape(),
            operation: "collate_fragments".to_string(),
        });
    }

    let mut images = Vec::with_capacity(samples.len());
    let mut labels = Vec::with_capacity(samples.len());
    let mut origins = Vec::with_capacity(samples.len());
    for sample in samples {
        images.push(sample.images);
        labels.push(sample.labels);
        origins.push(sample.origin);
    }

    Ok(FragmentBatch {
        images: stack(&images, 0)?,
        labels: stack(&labels, 0)?,
        origins,
    })
}
