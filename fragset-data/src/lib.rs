//! Origin-grouped fragment datasets.
//!
//! A flat collection of image crops, each tagged with a content label and the
//! key of the source image it was cut from, is regrouped by origin
//! ([`GroupIndex`]). Every access to a [`FragmentDataset`] then draws a fresh
//! random subset of one group ([`FragmentSampler`]), transforms each crop and
//! stacks the results. The [`DataLoader`] drives repeated accesses into
//! batches, optionally on worker threads.

pub mod collate;
pub mod config;
pub mod dataloader;
pub mod datasets;
pub mod samplers;
pub mod storage;
pub mod transforms;

// Re-export main components
pub use collate::{collate_fragments, FragmentBatch};
pub use config::{FragmentDatasetConfig, LoaderConfig};
pub use dataloader::{get_dataloader, DataLoader, FragmentLoader};
pub use datasets::{Dataset, Fragment, FragmentDataset, FragmentSample, GroupIndex};
pub use samplers::{FragmentSampler, RandomSampler, Sampler, SequentialSampler};
pub use storage::{FragmentColumns, FragmentSource, InMemorySource, RawImage};
pub use transforms::{default_transform, Compose, Normalize, TensorTransform, ToTensor, Transform};
