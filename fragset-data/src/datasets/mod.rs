pub mod fragment_dataset;
pub mod group_index;
pub mod traits;

pub use fragment_dataset::{FragmentDataset, FragmentSample};
pub use group_index::{Fragment, GroupIndex};
pub use traits::Dataset;
