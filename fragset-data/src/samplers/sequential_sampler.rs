// fragset-data/src/samplers/sequential_sampler.rs

use super::traits::Sampler;

/// Samples elements sequentially, always in the same order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSampler;

impl SequentialSampler {
    /// Creates a new `SequentialSampler`.
    pub fn new() -> Self {
        SequentialSampler
    }
}

impl Sampler for SequentialSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        Box::new(0..dataset_len)
    }

    fn len(&self, dataset_len: usize) -> usize {
        dataset_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_sampler_len() {
        let sampler = SequentialSampler::new();
        assert_eq!(sampler.len(0), 0);
        assert_eq!(sampler.len(5), 5);
    }

    #[test]
    fn test_sequential_sampler_iter() {
        let sampler = SequentialSampler::new();
        assert_eq!(sampler.iter(0).next(), None);
        assert_eq!(sampler.iter(5).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }
}
