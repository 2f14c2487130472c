use crate::error::FragsetError;
use crate::tensor::Tensor;

/// Stacks a sequence of tensors along a new dimension.
///
/// All input tensors must have the same shape. The output has rank
/// `rank + 1` with `tensors.len()` inserted at position `dim`.
///
/// # Arguments
/// * `tensors` - A slice of tensors to stack.
/// * `dim` - The dimension along which to stack. The new dimension will be inserted here.
///
/// # Errors
/// * `EmptyTensorList` if `tensors` is empty.
/// * `IndexOutOfBounds` if `dim > rank`.
/// * `ShapeMismatch` if any tensor's shape differs from the first one.
pub fn stack<T: Clone>(tensors: &[Tensor<T>], dim: usize) -> Result<Tensor<T>, FragsetError> {
    let first = tensors.first().ok_or(FragsetError::EmptyTensorList)?;
    let first_shape = first.shape();
    let rank = first_shape.len();

    if dim > rank {
        return Err(FragsetError::IndexOutOfBounds {
            index: vec![dim],
            shape: vec![rank + 1],
        });
    }

    for tensor in tensors.iter().skip(1) {
        if tensor.shape != first_shape {
            return Err(FragsetError::ShapeMismatch {
                expected: first_shape,
                actual: tensor.shape(),
                operation: "stack".to_string(),
            });
        }
    }

    let mut output_shape = first_shape.clone();
    output_shape.insert(dim, tensors.len());

    // Every input splits into `outer` contiguous chunks of `inner` elements;
    // the output interleaves chunk `o` of each input in order.
    let outer: usize = first_shape[..dim].iter().product();
    let inner: usize = first_shape[dim..].iter().product();

    let mut output_data = Vec::with_capacity(output_shape.iter().product());
    for o in 0..outer {
        let start = o * inner;
        for tensor in tensors {
            output_data.extend_from_slice(&tensor.data[start..start + inner]);
        }
    }

    Tensor::new(output_data, output_shape)
}

impl<T: Clone> Tensor<T> {
    /// Method form of [`stack`].
    pub fn stack(tensors: &[Tensor<T>], dim: usize) -> Result<Tensor<T>, FragsetError> {
        stack(tensors, dim)
    }
}

#[cfg(test)]
#[path = "stack_test.rs"]
mod tests;
