//! Per-fragment preprocessing: raw crop in, normalised `[C, H, W]` tensor out.

use crate::storage::RawImage;
use fragset_core::{FragsetError, Tensor};

/// Turns one stored image into a normalised fixed-shape tensor.
///
/// Implementations must be deterministic and must produce the same output
/// shape for every image of a dataset. Any closure
/// `Fn(&I) -> Result<Tensor<f32>, FragsetError>` is a transform.
pub trait Transform<I>: Send + Sync {
    fn apply(&self, image: &I) -> Result<Tensor<f32>, FragsetError>;
}

impl<I, F> Transform<I> for F
where
    F: Fn(&I) -> Result<Tensor<f32>, FragsetError> + Send + Sync,
{
    fn apply(&self, image: &I) -> Result<Tensor<f32>, FragsetError> {
        self(image)
    }
}

/// A stage that maps a tensor to another tensor.
pub trait TensorTransform: Send + Sync {
    fn apply(&self, tensor: Tensor<f32>) -> Result<Tensor<f32>, FragsetError>;
}

/// Converts an HWC `u8` image into a CHW `f32` tensor scaled to `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToTensor;

impl ToTensor {
    pub fn new() -> Self {
        ToTensor
    }
}

impl Transform<RawImage> for ToTensor {
    fn apply(&self, image: &RawImage) -> Result<Tensor<f32>, FragsetError> {
        let (h, w, c) = (image.height(), image.width(), image.channels());
        let pixels = image.pixels();
        let mut data = Vec::with_capacity(pixels.len());
        for ch in 0..c {
            for y in 0..h {
                for x in 0..w {
                    data.push(f32::from(pixels[(y * w + x) * c + ch]) / 255.0);
                }
            }
        }
        Tensor::new(data, vec![c, h, w])
    }
}

/// Per-channel standardisation: `(x - mean[c]) / std[c]`.
///
/// A single mean/std value applies to every channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalize {
    mean: Vec<f32>,
    std: Vec<f32>,
}

impl Normalize {
    /// # Errors
    /// Returns `FragsetError::InvalidArgument` if either list is empty, the
    /// lists differ in length, or any std is zero.
    pub fn new(mean: Vec<f32>, std: Vec<f32>) -> Result<Self, FragsetError> {
        if mean.is_empty() || mean.len() != std.len() {
            return Err(FragsetError::InvalidArgument(format!(
                "Normalize needs matching non-empty mean/std, got {} and {} values",
                mean.len(),
                std.len()
            )));
        }
        if std.iter().any(|&s| s == 0.0) {
            return Err(FragsetError::InvalidArgument(
                "Normalize std must be non-zero".to_string(),
            ));
        }
        Ok(Self { mean, std })
    }

    /// Uses the same mean and std for every channel.
    pub fn uniform(mean: f32, std: f32) -> Result<Self, FragsetError> {
        Self::new(vec![mean], vec![std])
    }
}

impl TensorTransform for Normalize {
    fn apply(&self, tensor: Tensor<f32>) -> Result<Tensor<f32>, FragsetError> {
        let shape = tensor.shape();
        if shape.len() != 3 {
            return Err(FragsetError::TransformError(format!(
                "Normalize expects a [C, H, W] tensor, got shape {:?}",
                shape
            )));
        }
        let channels = shape[0];
        if self.mean.len() != 1 && self.mean.len() != channels {
            return Err(FragsetError::ShapeMismatch {
                expected: vec![self.mean.len()],
                actual: vec![channels],
                operation: "Normalize".to_string(),
            });
        }
        let plane = shape[1] * shape[2];
        let data = tensor
            .data()
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let ch = if self.mean.len() == 1 { 0 } else { i / plane };
                (x - self.mean[ch]) / self.std[ch]
            })
            .collect();
        Tensor::new(data, shape)
    }
}

/// A head transform followed by zero or more tensor stages, applied in order.
pub struct Compose<I> {
    head: Box<dyn Transform<I>>,
    stages: Vec<Box<dyn TensorTransform>>,
}

impl<I> Compose<I> {
    pub fn new(head: Box<dyn Transform<I>>) -> Self {
        Self {
            head,
            stages: Vec::new(),
        }
    }

    /// Appends a stage.
    pub fn then(mut self, stage: Box<dyn TensorTransform>) -> Self {
        self.stages.push(stage);
        self
    }
}

impl<I> Transform<I> for Compose<I> {
    fn apply(&self, image: &I) -> Result<Tensor<f32>, FragsetError> {
        let mut tensor = self.head.apply(image)?;
        for stage in &self.stages {
            tensor = stage.apply(tensor)?;
        }
        Ok(tensor)
    }
}

/// `ToTensor` followed by `Normalize(0.5, 0.5)`: pixels end up in `[-1, 1]`.
pub fn default_transform() -> Compose<RawImage> {
    let normalize = Normalize {
        mean: vec![0.5],
        std: vec![0.5],
    };
    Compose::new(Box::new(ToTensor)).then(Box::new(normalize))
}

#[cfg(test)]
#[path = "transforms_test.rs"]
mod tests;
