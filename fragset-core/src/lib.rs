// Modules principaux de la crate
pub mod error;
pub mod ops;
pub mod tensor;

// Ré-exporte les types les plus utilisés pour `fragset_core::Tensor` / `fragset_core::FragsetError`
pub use error::FragsetError;
pub use tensor::Tensor;
