//! Row-matrix to tensor conversions
//!
//! The public API works on plain `Vec<f32>` feature rows; these helpers
//! turn them into burn tensors on the target device.

use anyhow::{Result, ensure};
use burn::tensor::{Float, Int, Tensor, backend::Backend};

/// Converts feature rows into a 2-D float tensor of shape
/// `[rows.len(), rows[0].len()]`.
///
/// The matrix must be rectangular and non-empty; ragged or empty input is
/// rejected before it reaches the tensor backend.
pub fn rows_to_tensor<B: Backend>(rows: &[Vec<f32>], device: &B::Device) -> Result<Tensor<B, 2, Float>> {
    ensure!(!rows.is_empty(), "feature matrix has no rows");
    let width = rows[0].len();
    ensure!(width > 0, "feature rows must have at least one column");
    for (row_index, row) in rows.iter().enumerate() {
        ensure!(
            row.len() == width,
            "feature matrix is ragged: row {} has {} columns, expected {}",
            row_index,
            row.len(),
            width
        );
    }

    let flat: Vec<f32> = rows.iter().flatten().copied().collect();
    let tensor = Tensor::<B, 1, Float>::from_floats(flat.as_slice(), device).reshape([rows.len(), width]);

    Ok(tensor)
}

/// Converts encoded class indices into a 1-D integer tensor.
pub fn indices_to_tensor<B: Backend>(indices: &[i64], device: &B::Device) -> Tensor<B, 1, Int> {
    Tensor::<B, 1, Int>::from_ints(indices, device)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{NdArray, ndarray::NdArrayDevice};

    #[test]
    fn rectangular_rows_become_a_matrix() {
        let device = NdArrayDevice::Cpu;
        let rows = vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]];

        let tensor = rows_to_tensor::<NdArray>(&rows, &device).unwrap();
        assert_eq!(tensor.dims(), [3, 2]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let device = NdArrayDevice::Cpu;
        let rows = vec![vec![0.0, 1.0], vec![2.0]];

        let err = rows_to_tensor::<NdArray>(&rows, &device).unwrap_err();
        assert!(err.to_string().contains("ragged"));
    }

    #[test]
    fn empty_matrix_is_rejected() {
        let device = NdArrayDevice::Cpu;

        assert!(rows_to_tensor::<NdArray>(&[], &device).is_err());
        assert!(rows_to_tensor::<NdArray>(&[vec![]], &device).is_err());
    }

    #[test]
    fn indices_become_an_int_vector() {
        let device = NdArrayDevice::Cpu;

        let tensor = indices_to_tensor::<NdArray>(&[0, 2, 1], &device);
        assert_eq!(tensor.dims(), [3]);
    }
}
