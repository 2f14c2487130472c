use super::group_index::GroupIndex;
use super::traits::Dataset;
use crate::config::FragmentDatasetConfig;
use crate::samplers::FragmentSampler;
use crate::storage::FragmentSource;
use crate::transforms::Transform;
use fragset_core::{FragsetError, Tensor};
use log::debug;
use rand::Rng;
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// What one dataset access returns.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentSample<K, L> {
    /// Transformed fragments, shape `[k, C, H, W]` with `C, H, W` set by the transform.
    pub images: Tensor<f32>,
    /// Content labels of the same fragments, shape `[k]`.
    pub labels: Tensor<L>,
    /// Origin key shared by every fragment.
    pub origin: K,
}

/// A dataset with one item per origin image.
///
/// Each access draws up to `n_fragments` crops of that origin at random,
/// transforms them and stacks them. Accesses share no mutable state, so the
/// dataset can be read from many threads at once.
pub struct FragmentDataset<K, I, L> {
    index: GroupIndex<K, I, L>,
    sampler: FragmentSampler,
    transform: Arc<dyn Transform<I>>,
    config: FragmentDatasetConfig,
}

impl<K, I, L> FragmentDataset<K, I, L>
where
    K: Eq + Hash + Ord + Clone + Debug,
    L: Clone,
{
    /// Reads the storage columns, builds the origin index and applies the
    /// configured portion filter.
    ///
    /// # Errors
    ///
    /// Fails on an invalid config, a missing or short storage column.
    pub fn new<S>(
        source: &S,
        config: FragmentDatasetConfig,
        transform: Arc<dyn Transform<I>>,
    ) -> Result<Self, FragsetError>
    where
        S: FragmentSource<Image = I, Label = L, Key = K>,
    {
        config.validate()?;
        let columns = source.read_columns()?;
        let index = GroupIndex::from_columns(columns)?;
        Self::from_index(index, config, transform)
    }

    /// Wraps an already built index. The config's portion filter is applied here.
    pub fn from_index(
        index: GroupIndex<K, I, L>,
        config: FragmentDatasetConfig,
        transform: Arc<dyn Transform<I>>,
    ) -> Result<Self, FragsetError> {
        config.validate()?;
        let index = index.with_portion(config.portion)?;
        let sampler = FragmentSampler::new(config.n_fragments)?;
        debug!(
            "FragmentDataset ready: {} origin groups, n_fragments={}, fragment_len={}, portion={}",
            index.len(),
            config.n_fragments,
            config.fragment_len,
            config.portion
        );
        Ok(Self {
            index,
            sampler,
            transform,
            config,
        })
    }

    /// Draws the sample for origin group `idx` using the given random source.
    ///
    /// # Errors
    ///
    /// * `IndexOutOfBounds` if `idx >= self.len()`.
    /// * Any transform failure, unchanged.
    pub fn get_with_rng<R: Rng + ?Sized>(
        &self,
        idx: usize,
        rng: &mut R,
    ) -> Result<FragmentSample<K, L>, FragsetError> {
        let (key, members) = self.index.group_at(idx)?;
        let (images, labels) = self.sampler.sample(members, self.transform.as_ref(), rng)?;
        Ok(FragmentSample {
            images,
            labels,
            origin: key.clone(),
        })
    }

    pub fn index(&self) -> &GroupIndex<K, I, L> {
        &self.index
    }

    pub fn config(&self) -> &FragmentDatasetConfig {
        &self.config
    }

    pub fn n_fragments(&self) -> usize {
        self.sampler.requested_count()
    }
}

impl<K, I, L> Dataset for FragmentDataset<K, I, L>
where
    K: Eq + Hash + Ord + Clone + Debug + Send + 'static,
    L: Clone + Send + Sync + 'static,
{
    type Item = FragmentSample<K, L>;

    fn get(&self, index: usize) -> Result<Self::Item, FragsetError> {
        self.get_with_rng(index, &mut rand::thread_rng())
    }

    fn len(&self) -> usize {
        self.index.len()
    }
}

impl<K: Debug, I, L> fmt::Debug for FragmentDataset<K, I, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FragmentDataset")
            .field("groups", &self.index.keys().len())
            .field("sampler", &self.sampler)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "fragment_dataset_test.rs"]
mod tests;
