// fragset-data/src/samplers/traits.rs

use std::fmt::Debug;

/// A Sampler trait that defines how to iterate over indices of a dataset.
///
/// Samplers are used by `DataLoader` to generate a sequence of indices
/// to fetch data from a `Dataset`. They order whole dataset items (origin
/// groups); choosing crops inside a group is [`FragmentSampler`](super::FragmentSampler)'s job.
pub trait Sampler: Debug + Send + Sync {
    /// Returns an iterator over the indices of a dataset.
    ///
    /// # Arguments
    ///
    /// * `dataset_len` - The total number of items in the dataset.
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Returns the total number of samples that will be yielded by the iterator.
    ///
    /// # Arguments
    ///
    /// * `dataset_len` - The total number of items in the dataset.
    fn len(&self, dataset_len: usize) -> usize;

    /// Tells the sampler which epoch the next `iter` call serves. Samplers
    /// whose order does not depend on the epoch ignore it.
    fn set_epoch(&mut self, _epoch: u64) {}
}

impl Sampler for Box<dyn Sampler> {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        (**self).iter(dataset_len)
    }

    fn len(&self, dataset_len: usize) -> usize {
        (**self).len(dataset_len)
    }

    fn set_epoch(&mut self, epoch: u64) {
        (**self).set_epoch(epoch)
    }
}
