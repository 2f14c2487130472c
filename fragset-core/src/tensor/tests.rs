use super::*;
use approx::assert_relative_eq;

fn create_test_tensor(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Failed to create test tensor")
}

#[test]
fn test_tensor_new() {
    let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]);
    assert_eq!(t.shape(), vec![2, 3]);
    assert_eq!(t.rank(), 2);
    assert_eq!(t.numel(), 6);
    assert_eq!(t.strides(), vec![3, 1]);
}

#[test]
fn test_tensor_new_length_mismatch() {
    let err = Tensor::new(vec![1.0_f32, 2.0, 3.0], vec![2, 2]).unwrap_err();
    match err {
        FragsetError::TensorCreationError { data_len, shape } => {
            assert_eq!(data_len, 3);
            assert_eq!(shape, vec![2, 2]);
        }
        e => panic!("Expected TensorCreationError, got {:?}", e),
    }
}

#[test]
fn test_from_vec_and_scalar() {
    let t = Tensor::from_vec(vec![7_i64, 8, 9]);
    assert_eq!(t.shape(), vec![3]);
    assert_eq!(t.at(&[2]).unwrap(), 9);

    let s = Tensor::scalar(3.5_f32);
    assert_eq!(s.rank(), 0);
    assert_eq!(s.numel(), 1);
    assert_relative_eq!(s.at(&[]).unwrap(), 3.5);
}

#[test]
fn test_at_row_major() {
    let t = create_test_tensor((0..24).map(|x| x as f32).collect(), vec![2, 3, 4]);
    assert_relative_eq!(t.at(&[0, 0, 0]).unwrap(), 0.0);
    assert_relative_eq!(t.at(&[1, 2, 3]).unwrap(), 23.0);
    assert_relative_eq!(t.at(&[1, 0, 2]).unwrap(), 14.0);
}

#[test]
fn test_at_out_of_bounds() {
    let t = create_test_tensor(vec![1.0, 2.0], vec![1, 2]);
    assert!(matches!(
        t.at(&[0, 2]),
        Err(FragsetError::IndexOutOfBounds { .. })
    ));
    // Wrong rank is also out of bounds
    assert!(t.at(&[0]).is_err());
}

#[test]
fn test_reshape_shares_buffer() {
    let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![4]);
    let r = t.reshape(vec![2, 2]).unwrap();
    assert_eq!(r.shape(), vec![2, 2]);
    assert!(Arc::ptr_eq(&t.data, &r.data));
    assert!(t.reshape(vec![3]).is_err());
}

#[test]
fn test_select_leading_dim() {
    let t = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2]);
    let row = t.select(1).unwrap();
    assert_eq!(row.shape(), vec![2]);
    assert_eq!(row.to_vec(), vec![3.0, 4.0]);

    match t.select(3) {
        Err(FragsetError::IndexOutOfBounds { index, shape }) => {
            assert_eq!(index, vec![3]);
            assert_eq!(shape, vec![3, 2]);
        }
        other => panic!("Expected IndexOutOfBounds, got {:?}", other),
    }
    assert!(Tensor::scalar(1.0_f32).select(0).is_err());
}
