// fragset-data/src/samplers/fragment_sampler.rs

use crate::datasets::Fragment;
use crate::transforms::Transform;
use fragset_core::{ops::stack, FragsetError, Tensor};
use log::trace;
use rand::seq::index;
use rand::Rng;

/// Picks the fragments of one origin group that make up a sample.
///
/// A group larger than the requested count yields `requested_count` distinct
/// members drawn afresh on every call. A group of at most `requested_count`
/// members yields all of them, in stored order, with no padding: callers
/// batching several samples together must either tolerate different leading
/// sizes or only use groups with at least `requested_count` members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentSampler {
    requested_count: usize,
}

impl FragmentSampler {
    /// # Errors
    ///
    /// Returns `FragsetError::InvalidArgument` if `requested_count` is 0.
    pub fn new(requested_count: usize) -> Result<Self, FragsetError> {
        if requested_count == 0 {
            return Err(FragsetError::InvalidArgument(
                "requested fragment count must be at least 1".to_string(),
            ));
        }
        Ok(Self { requested_count })
    }

    pub fn requested_count(&self) -> usize {
        self.requested_count
    }

    /// Positions, within a group of `group_len` members, of the members to use.
    ///
    /// Always returns `min(group_len, requested_count)` distinct positions.
    pub fn select<R: Rng + ?Sized>(&self, group_len: usize, rng: &mut R) -> Vec<usize> {
        if group_len > self.requested_count {
            index::sample(rng, group_len, self.requested_count).into_vec()
        } else {
            trace!(
                "Shortfall: group has {} members, {} requested",
                group_len,
                self.requested_count
            );
            (0..group_len).collect()
        }
    }

    /// Selects members, transforms each image and stacks the results.
    ///
    /// Returns `(images, labels)` with shapes `[k, C, H, W]` and `[k]`, where
    /// `k = min(members.len(), requested_count)`.
    ///
    /// # Errors
    ///
    /// The first transform failure is returned as is. Transforms disagreeing on
    /// output shape fail with `FragsetError::ShapeMismatch`; an empty member
    /// list fails with `FragsetError::EmptyTensorList`.
    pub fn sample<I, L, T, R>(
        &self,
        members: &[Fragment<I, L>],
        transform: &T,
        rng: &mut R,
    ) -> Result<(Tensor<f32>, Tensor<L>), FragsetError>
    where
        L: Clone,
        T: Transform<I> + ?Sized,
        R: Rng + ?Sized,
    {
        let selected = self.select(members.len(), rng);

        let images = selected
            .iter()
            .map(|&i| transform.apply(&members[i].image))
            .collect::<Result<Vec<_>, _>>()?;
        let labels = selected.iter().map(|&i| members[i].label.clone()).collect();

        Ok((stack(&images, 0)?, Tensor::from_vec(labels)))
    }
}

#[cfg(test)]
#[path = "fragment_sampler_test.rs"]
mod tests;
