// src/tensor/mod.rs

use crate::error::FragsetError;
use std::sync::Arc;

pub mod utils;

use utils::calculate_strides;

/// A contiguous, row-major, CPU-resident multi-dimensional array.
///
/// The element buffer is held behind an `Arc`, so clones are cheap and a
/// `Tensor<T>` can be handed to other threads whenever `T: Send + Sync`.
/// Tensors are immutable once built; every operation returns a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T = f32> {
    pub(crate) data: Arc<Vec<T>>,
    pub(crate) shape: Vec<usize>,
}

impl<T> Tensor<T> {
    /// Creates a new tensor from flattened row-major data and a shape.
    ///
    /// # Errors
    /// Returns `FragsetError::TensorCreationError` if `data.len()` does not match
    /// the number of elements described by `shape`.
    pub fn new(data: Vec<T>, shape: Vec<usize>) -> Result<Self, FragsetError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(FragsetError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(Self {
            data: Arc::new(data),
            shape,
        })
    }

    /// Creates a rank-1 tensor holding `data`.
    pub fn from_vec(data: Vec<T>) -> Self {
        let shape = vec![data.len()];
        Self {
            data: Arc::new(data),
            shape,
        }
    }

    /// Creates a rank-0 tensor.
    pub fn scalar(value: T) -> Self {
        Self {
            data: Arc::new(vec![value]),
            shape: vec![],
        }
    }

    /// Returns the shape of the tensor.
    pub fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the total number of elements.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Contiguous strides for the current shape.
    pub fn strides(&self) -> Vec<usize> {
        calculate_strides(&self.shape)
    }

    /// Borrows the flattened row-major elements.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns a tensor with the same elements and a new shape.
    ///
    /// The element buffer is shared, not copied.
    pub fn reshape(&self, new_shape: Vec<usize>) -> Result<Self, FragsetError> {
        let numel: usize = new_shape.iter().product();
        if numel != self.numel() {
            return Err(FragsetError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: new_shape,
                operation: "reshape".to_string(),
            });
        }
        Ok(Self {
            data: Arc::clone(&self.data),
            shape: new_shape,
        })
    }

    fn linear_index(&self, coords: &[usize]) -> Result<usize, FragsetError> {
        if coords.len() != self.rank()
            || coords.iter().zip(&self.shape).any(|(&c, &dim)| c >= dim)
        {
            return Err(FragsetError::IndexOutOfBounds {
                index: coords.to_vec(),
                shape: self.shape.clone(),
            });
        }
        Ok(coords
            .iter()
            .zip(self.strides())
            .map(|(&c, stride)| c * stride)
            .sum())
    }
}

impl<T: Clone> Tensor<T> {
    /// Copies the elements out into a new `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.data.as_ref().clone()
    }

    /// Returns the element at the given multi-dimensional coordinates.
    ///
    /// # Errors
    /// Returns `FragsetError::IndexOutOfBounds` if the coordinates have the wrong
    /// rank or fall outside the shape.
    pub fn at(&self, coords: &[usize]) -> Result<T, FragsetError> {
        let idx = self.linear_index(coords)?;
        Ok(self.data[idx].clone())
    }

    /// Returns the sub-tensor at `index` along the leading dimension.
    ///
    /// The result has rank `self.rank() - 1`.
    pub fn select(&self, index: usize) -> Result<Self, FragsetError> {
        let leading = match self.shape.first() {
            Some(&d) => d,
            None => {
                return Err(FragsetError::IndexOutOfBounds {
                    index: vec![index],
                    shape: vec![],
                })
            }
        };
        if index >= leading {
            return Err(FragsetError::IndexOutOfBounds {
                index: vec![index],
                shape: self.shape.clone(),
            });
        }
        let inner_shape = self.shape[1..].to_vec();
        let inner: usize = inner_shape.iter().product();
        let start = index * inner;
        Tensor::new(self.data[start..start + inner].to_vec(), inner_shape)
    }
}

#[cfg(test)]
mod tests;
