//! Ordered map over independent work items
//!
//! Every sweep in this crate evaluates independent items (deltas, classes,
//! tiles) and then reduces them in index order. With the `rayon` feature
//! the map step runs on the global rayon pool; the output order, and so
//! every reduction, is the same as the sequential path.

use crate::RecogResult;

#[cfg(feature = "rayon")]
pub(crate) fn map_ordered<T, R, F>(items: &[T], parallel: bool, f: F) -> RecogResult<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> RecogResult<R> + Sync + Send,
{
    use rayon::prelude::*;

    if parallel {
        items.par_iter().map(&f).collect()
    } else {
        items.iter().map(f).collect()
    }
}

#[cfg(not(feature = "rayon"))]
pub(crate) fn map_ordered<T, R, F>(items: &[T], _parallel: bool, f: F) -> RecogResult<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> RecogResult<R> + Sync + Send,
{
    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecogError;

    #[test]
    fn test_map_ordered_preserves_order() {
        let items: Vec<usize> = (0..100).collect();
        let seq = map_ordered(&items, false, |&i| Ok(i * i)).unwrap();
        let par = map_ordered(&items, true, |&i| Ok(i * i)).unwrap();
        assert_eq!(seq, par);
        assert_eq!(seq[9], 81);
    }

    #[test]
    fn test_map_ordered_propagates_error() {
        let items: Vec<usize> = (0..10).collect();
        let result = map_ordered(&items, true, |&i| {
            if i == 7 {
                Err(RecogError::InvalidParameter("seven".to_string()))
            } else {
                Ok(i)
            }
        });
        assert!(result.is_err());
    }
}
