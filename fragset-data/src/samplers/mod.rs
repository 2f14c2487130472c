pub mod fragment_sampler;
pub mod random_sampler;
pub mod sequential_sampler;
pub mod traits;

pub use fragment_sampler::FragmentSampler;
pub use random_sampler::RandomSampler;
pub use sequential_sampler::SequentialSampler;
pub use traits::Sampler;
