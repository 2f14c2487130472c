use fragset_core::FragsetError;

/// Represents a dataset that can be accessed by index.
///
/// One index addresses one item; for fragment datasets an item is a whole
/// origin group's sample, not a single crop.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    ///
    /// This type must be `Send` and `'static` so that items can be fetched on
    /// data loader worker threads.
    type Item: Send + 'static;

    /// Returns the item at the given index.
    ///
    /// # Errors
    ///
    /// Returns `FragsetError::IndexOutOfBounds` if the index is out of bounds,
    /// or whatever error building the item raised.
    fn get(&self, index: usize) -> Result<Self::Item, FragsetError>;

    /// Returns the total number of items in the dataset.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
