//! BinaryMatrix, ReferenceVector - Thresholded 0/1 encodings
//!
//! A `BinaryMatrix` has the same shape as the `PixelMatrix` it was derived
//! from; every entry is exactly 0 or 1. A `ReferenceVector` is the
//! per-class prototype obtained by rounding the column means of a class's
//! binary matrix.

use crate::error::{Error, Result};

/// Count the positions at which two binary slices differ
///
/// Both slices are expected to have the same length; any excess entries of
/// the longer slice are ignored.
#[inline]
pub fn hamming_distance(a: &[u8], b: &[u8]) -> usize {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

fn check_binary(data: &[u8]) -> Result<()> {
    match data.iter().position(|&v| v > 1) {
        Some(i) => Err(Error::InvalidInput(format!(
            "entry {} has value {}, expected 0 or 1",
            i, data[i]
        ))),
        None => Ok(()),
    }
}

/// Matrix of 0/1 entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    data: Vec<u8>,
    rows: usize,
    cols: usize,
}

impl BinaryMatrix {
    /// Create a binary matrix from row-major data
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the matrix is empty, the data length
    /// does not match `rows * cols`, or any entry is not 0 or 1.
    pub fn from_flat(data: Vec<u8>, rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidInput(format!(
                "binary matrix must be non-empty, got {}x{}",
                rows, cols
            )));
        }
        if data.len() != rows * cols {
            return Err(Error::InvalidInput(format!(
                "data length {} does not match {}x{}",
                data.len(),
                rows,
                cols
            )));
        }
        check_binary(&data)?;
        Ok(Self { data, rows, cols })
    }

    /// Create a binary matrix from row slices
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::InvalidInput(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend_from_slice(row);
        }
        Self::from_flat(data, rows.len(), cols)
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get one row
    pub fn row(&self, index: usize) -> Option<&[u8]> {
        if index < self.rows {
            Some(&self.data[index * self.cols..(index + 1) * self.cols])
        } else {
            None
        }
    }

    /// Iterate over rows in order
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[u8]> {
        self.data.chunks_exact(self.cols)
    }

    /// Row-major view of all entries
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Number of 1-entries per column
    pub fn column_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.cols];
        for row in self.iter_rows() {
            for (c, &v) in counts.iter_mut().zip(row) {
                *c += v as usize;
            }
        }
        counts
    }

    /// Hamming distance from `vector` to every row, in row order
    pub fn distances_to(&self, vector: &ReferenceVector) -> Result<Vec<usize>> {
        if vector.len() != self.cols {
            return Err(Error::FeatureMismatch {
                expected: self.cols,
                actual: vector.len(),
            });
        }
        Ok(self
            .iter_rows()
            .map(|row| hamming_distance(vector.as_slice(), row))
            .collect())
    }
}

/// Per-class binary prototype
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceVector {
    bits: Vec<u8>,
}

impl ReferenceVector {
    /// Create a reference vector from 0/1 entries
    pub fn new(bits: Vec<u8>) -> Result<Self> {
        if bits.is_empty() {
            return Err(Error::InvalidInput("reference vector is empty".to_string()));
        }
        check_binary(&bits)?;
        Ok(Self { bits })
    }

    /// Number of features
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the vector has no features
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Entries as a slice
    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    /// Hamming distance to another binary row of the same length
    pub fn distance(&self, other: &[u8]) -> Result<usize> {
        if other.len() != self.bits.len() {
            return Err(Error::FeatureMismatch {
                expected: self.bits.len(),
                actual: other.len(),
            });
        }
        Ok(hamming_distance(&self.bits, other))
    }
}
