//! Per-class reference vectors

use ieit_core::{BinaryMatrix, ReferenceVector};

use crate::RecogResult;

/// Reduce a class's binary matrix to its reference vector
///
/// Each bit is the column mean rounded half-up, so a column that is set in
/// exactly half of the rows becomes 1. The comparison is done on integer
/// counts and never touches floating point.
pub fn build_vector(matrix: &BinaryMatrix) -> RecogResult<ReferenceVector> {
    let rows = matrix.rows();
    let bits = matrix
        .column_counts()
        .into_iter()
        .map(|count| u8::from(2 * count >= rows))
        .collect();
    Ok(ReferenceVector::new(bits)?)
}
