//! The seam between fragment datasets and whatever reads the stored crops.
//!
//! Storage is read once, as three parallel columns. Decoding the on-disk
//! format is the reader's job; this module only fixes the column contract.

use fragset_core::FragsetError;

/// Column holding the raw crops.
pub const DATA_COLUMN: &str = "data";
/// Column holding the content label of each crop.
pub const CONTENT_LABEL_COLUMN: &str = "content_label";
/// Column holding the origin key of each crop.
pub const ORIGIN_KEY_COLUMN: &str = "style_label";

/// One stored crop: 8-bit pixels in height, width, channel order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    height: usize,
    width: usize,
    channels: usize,
    pixels: Vec<u8>,
}

impl RawImage {
    /// # Errors
    /// Returns `FragsetError::TensorCreationError` if `pixels.len()` is not
    /// `height * width * channels`.
    pub fn new(
        height: usize,
        width: usize,
        channels: usize,
        pixels: Vec<u8>,
    ) -> Result<Self, FragsetError> {
        if pixels.len() != height * width * channels {
            return Err(FragsetError::TensorCreationError {
                data_len: pixels.len(),
                shape: vec![height, width, channels],
            });
        }
        Ok(Self {
            height,
            width,
            channels,
            pixels,
        })
    }

    /// An image with every pixel set to `value`.
    pub fn filled(height: usize, width: usize, channels: usize, value: u8) -> Self {
        Self {
            height,
            width,
            channels,
            pixels: vec![value; height * width * channels],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// The three parallel columns read from storage. Row `i` of each column
/// describes the same crop.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentColumns<I, L, K> {
    pub images: Vec<I>,
    pub content_labels: Vec<L>,
    pub origin_keys: Vec<K>,
}

impl<I, L, K> FragmentColumns<I, L, K> {
    pub fn new(images: Vec<I>, content_labels: Vec<L>, origin_keys: Vec<K>) -> Self {
        Self {
            images,
            content_labels,
            origin_keys,
        }
    }

    /// Number of rows, taken from the image column.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Checks that every column has as many rows as the image column.
    ///
    /// # Errors
    /// Returns `FragsetError::ColumnLengthMismatch` naming the first column
    /// whose length differs.
    pub fn validate(&self) -> Result<(), FragsetError> {
        let expected = self.images.len();
        for (column, actual) in [
            (CONTENT_LABEL_COLUMN, self.content_labels.len()),
            (ORIGIN_KEY_COLUMN, self.origin_keys.len()),
        ] {
            if actual != expected {
                return Err(FragsetError::ColumnLengthMismatch {
                    column: column.to_string(),
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// A reader that supplies the fragment columns.
pub trait FragmentSource {
    type Image;
    type Label;
    type Key;

    /// Reads all three columns.
    ///
    /// # Errors
    /// Returns `FragsetError::MissingColumn` if a required column is absent,
    /// or any error raised by the underlying reader.
    fn read_columns(
        &self,
    ) -> Result<FragmentColumns<Self::Image, Self::Label, Self::Key>, FragsetError>;
}

/// Columns already held in memory. Any column may be left out, in which case
/// reading fails the way a storage file without that column would.
#[derive(Debug, Clone)]
pub struct InMemorySource<I, L, K> {
    images: Option<Vec<I>>,
    content_labels: Option<Vec<L>>,
    origin_keys: Option<Vec<K>>,
}

impl<I, L, K> InMemorySource<I, L, K> {
    pub fn new(images: Vec<I>, content_labels: Vec<L>, origin_keys: Vec<K>) -> Self {
        Self {
            images: Some(images),
            content_labels: Some(content_labels),
            origin_keys: Some(origin_keys),
        }
    }

    /// A source with no columns at all.
    pub fn empty() -> Self {
        Self {
            images: None,
            content_labels: None,
            origin_keys: None,
        }
    }

    pub fn with_images(mut self, images: Vec<I>) -> Self {
        self.images = Some(images);
        self
    }

    pub fn with_content_labels(mut self, content_labels: Vec<L>) -> Self {
        self.content_labels = Some(content_labels);
        self
    }

    pub fn with_origin_keys(mut self, origin_keys: Vec<K>) -> Self {
        self.origin_keys = Some(origin_keys);
        self
    }
}

fn require<T: Clone>(column: &Option<Vec<T>>, name: &str) -> Result<Vec<T>, FragsetError> {
    column
        .clone()
        .ok_or_else(|| FragsetError::MissingColumn(name.to_string()))
}

impl<I: Clone, L: Clone, K: Clone> FragmentSource for InMemorySource<I, L, K> {
    type Image = I;
    type Label = L;
    type Key = K;

    fn read_columns(&self) -> Result<FragmentColumns<I, L, K>, FragsetError> {
        Ok(FragmentColumns {
            images: require(&self.images, DATA_COLUMN)?,
            content_labels: require(&self.content_labels, CONTENT_LABEL_COLUMN)?,
            origin_keys: require(&self.origin_keys, ORIGIN_KEY_COLUMN)?,
        })
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
