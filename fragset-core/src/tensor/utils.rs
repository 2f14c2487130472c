/// Calculates contiguous (row-major) strides for a given shape.
///
/// The last dimension has stride 1; every earlier stride is the product of
/// the sizes of the dimensions that follow it.
pub fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }
    let rank = shape.len();
    let mut strides = vec![1; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}
