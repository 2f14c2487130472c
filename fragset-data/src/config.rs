//! Construction-time settings for datasets and loaders.

use fragset_core::FragsetError;

/// Settings for a [`FragmentDataset`](crate::datasets::FragmentDataset).
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentDatasetConfig {
    /// Number of fragments drawn from each origin group per access.
    pub n_fragments: usize,
    /// Nominal side of a transformed fragment. Informational: the transform
    /// decides the real `H` and `W`, and accesses never check them against it.
    pub fragment_len: usize,
    /// Share of origin groups kept, in `(0, 1]`.
    pub portion: f64,
}

impl Default for FragmentDatasetConfig {
    fn default() -> Self {
        Self {
            n_fragments: 3,
            fragment_len: 32,
            portion: 1.0,
        }
    }
}

impl FragmentDatasetConfig {
    pub fn n_fragments(mut self, n: usize) -> Self {
        self.n_fragments = n;
        self
    }
    pub fn fragment_len(mut self, len: usize) -> Self {
        self.fragment_len = len;
        self
    }
    pub fn portion(mut self, p: f64) -> Self {
        self.portion = p;
        self
    }

    /// Checks every field, failing on the first invalid one.
    pub fn validate(&self) -> Result<(), FragsetError> {
        if self.n_fragments == 0 {
            return Err(FragsetError::InvalidArgument(
                "n_fragments must be at least 1".to_string(),
            ));
        }
        if self.fragment_len == 0 {
            return Err(FragsetError::InvalidArgument(
                "fragment_len must be at least 1".to_string(),
            ));
        }
        // Written this way round so NaN is rejected too.
        if !(self.portion > 0.0 && self.portion <= 1.0) {
            return Err(FragsetError::InvalidPortion(self.portion));
        }
        Ok(())
    }
}

/// Settings for the batching harness built by
/// [`get_dataloader`](crate::dataloader::get_dataloader).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Number of dataset items per batch.
    pub batch_size: usize,
    /// Visit dataset indices in random order each epoch.
    pub shuffle: bool,
    /// Worker threads used to fetch the items of a batch. 0 fetches inline.
    pub num_workers: usize,
    /// Drop the trailing batch when it is smaller than `batch_size`.
    pub drop_last: bool,
    /// Seed for the index shuffle. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 1,
            shuffle: true,
            num_workers: 0,
            drop_last: false,
            seed: None,
        }
    }
}

impl LoaderConfig {
    pub fn batch_size(mut self, bs: usize) -> Self {
        self.batch_size = bs;
        self
    }
    pub fn shuffle(mut self, s: bool) -> Self {
        self.shuffle = s;
        self
    }
    pub fn num_workers(mut self, n: usize) -> Self {
        self.num_workers = n;
        self
    }
    pub fn drop_last(mut self, d: bool) -> Self {
        self.drop_last = d;
        self
    }
    pub fn seed(mut self, s: u64) -> Self {
        self.seed = Some(s);
        self
    }

    pub fn validate(&self) -> Result<(), FragsetError> {
        if self.batch_size == 0 {
            return Err(FragsetError::InvalidArgument(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_config_defaults() {
        let config = FragmentDatasetConfig::default();
        assert_eq!(config.n_fragments, 3);
        assert_eq!(config.fragment_len, 32);
        assert_eq!(config.portion, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dataset_config_builder() {
        let config = FragmentDatasetConfig::default()
            .n_fragments(2)
            .fragment_len(16)
            .portion(0.25);
        assert_eq!(config.n_fragments, 2);
        assert_eq!(config.fragment_len, 16);
        assert_eq!(config.portion, 0.25);
    }

    #[test]
    fn test_dataset_config_rejects_invalid() {
        assert!(matches!(
            FragmentDatasetConfig::default().n_fragments(0).validate(),
            Err(FragsetError::InvalidArgument(_))
        ));
        assert!(matches!(
            FragmentDatasetConfig::default().fragment_len(0).validate(),
            Err(FragsetError::InvalidArgument(_))
        ));
        for bad in [0.0, -0.5, 1.01, f64::NAN] {
            assert!(matches!(
                FragmentDatasetConfig::default().portion(bad).validate(),
                Err(FragsetError::InvalidPortion(_))
            ));
        }
    }

    #[test]
    fn test_loader_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.batch_size, 1);
        assert!(config.shuffle);
        assert_eq!(config.num_workers, 0);
        assert_eq!(config.seed, None);

        let config = config.batch_size(8).shuffle(false).num_workers(4).drop_last(true).seed(7);
        assert_eq!(config.batch_size, 8);
        assert!(!config.shuffle);
        assert!(config.drop_last);
        assert_eq!(config.seed, Some(7));
        assert!(config.validate().is_ok());
        assert!(LoaderConfig::default().batch_size(0).validate().is_err());
    }
}
