//! Binary encoding against the limit vector
//!
//! A pixel value `v` in feature column `j` encodes to 1 when
//!
//! ```text
//!   limit[j] - delta <= v <= limit[j] + delta
//! ```
//!
//! and to 0 otherwise. Widening `delta` can only turn zeros into ones.

use ieit_core::{BinaryMatrix, Error, LimitVector, PixelMatrix};

use crate::RecogResult;

/// Columnwise mean of the reference class's samples
///
/// The reference class is class 0 by convention; every binary matrix in a
/// run is encoded against this one vector.
pub fn compute_limit_vector(class_zero_samples: &PixelMatrix) -> LimitVector {
    LimitVector::from_samples(class_zero_samples)
}

/// Threshold a pixel matrix into a binary matrix
///
/// # Arguments
///
/// * `samples` - Pixel matrix to encode
/// * `limit` - Band centre per feature column
/// * `delta` - Band half-width
///
/// # Errors
///
/// Returns [`Error::FeatureMismatch`] (wrapped in
/// [`RecogError::Core`](crate::RecogError::Core)) if the sample width
/// differs from the limit vector length.
pub fn encode(samples: &PixelMatrix, limit: &LimitVector, delta: u32) -> RecogResult<BinaryMatrix> {
    if samples.cols() != limit.len() {
        return Err(Error::FeatureMismatch {
            expected: limit.len(),
            actual: samples.cols(),
        }
        .into());
    }

    let delta = delta as f64;
    let bounds: Vec<(f64, f64)> = limit
        .as_slice()
        .iter()
        .map(|&l| (l - delta, l + delta))
        .collect();

    let mut data = Vec::with_capacity(samples.rows() * samples.cols());
    for row in samples.iter_rows() {
        data.extend(
            row.iter()
                .zip(&bounds)
                .map(|(&v, &(lo, hi))| u8::from(v >= lo && v <= hi)),
        );
    }

    Ok(BinaryMatrix::from_flat(data, samples.rows(), samples.cols())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecogError;

    fn samples() -> PixelMatrix {
        PixelMatrix::from_rows(&[[10.0, 20.0, 30.0], [12.0, 26.0, 30.0]]).unwrap()
    }

    #[test]
    fn test_limit_vector_is_column_mean() {
        let limit = compute_limit_vector(&samples());
        assert_eq!(limit.as_slice(), &[11.0, 23.0, 30.0]);
    }

    #[test]
    fn test_encode_band_is_inclusive() {
        let m = samples();
        let limit = compute_limit_vector(&m);
        let b = encode(&m, &limit, 1).unwrap();
        assert_eq!(b.row(0).unwrap(), &[1, 0, 1]);
        assert_eq!(b.row(1).unwrap(), &[1, 0, 1]);

        let b = encode(&m, &limit, 3).unwrap();
        assert_eq!(b.row(0).unwrap(), &[1, 1, 1]);
        assert_eq!(b.row(1).unwrap(), &[1, 1, 1]);
    }

    #[test]
    fn test_encode_zero_delta() {
        let m = samples();
        let limit = LimitVector::new(vec![10.0, 26.0, 31.0]).unwrap();
        let b = encode(&m, &limit, 0).unwrap();
        assert_eq!(b.row(0).unwrap(), &[1, 0, 0]);
        assert_eq!(b.row(1).unwrap(), &[0, 1, 0]);
    }

    #[test]
    fn test_encode_feature_mismatch() {
        let limit = LimitVector::new(vec![1.0, 2.0]).unwrap();
        assert!(matches!(
            encode(&samples(), &limit, 5),
            Err(RecogError::Core(Error::FeatureMismatch {
                expected: 2,
                actual: 3
            }))
        ));
    }
}
