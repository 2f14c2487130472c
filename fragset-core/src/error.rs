use thiserror::Error;

/// Custom error type for the fragset crates.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum FragsetError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Index out of bounds: index {index:?} for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Cannot stack an empty list of tensors")]
    EmptyTensorList,

    #[error("Origin key {0} is not present in the group index")]
    MissingKey(String),

    #[error("Required storage column '{0}' is missing")]
    MissingColumn(String),

    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid portion {0}: must be in (0, 1]")]
    InvalidPortion(f64),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Transform failed: {0}")]
    TransformError(String),

    #[error("Data loader worker panicked: {0}")]
    WorkerPanicked(String),
}
