use crate::error::CatalogError;

/// Split a slice into consecutive groups of at most `size` elements, order
/// preserved, last group possibly shorter. A zero size is rejected instead of
/// looping forever.
pub fn chunk<T>(items: &[T], size: usize) -> Result<Vec<&[T]>, CatalogError> {
    if size == 0 {
        return Err(CatalogError::Validation(
            "chunk size must be at least 1".into(),
        ));
    }
    Ok(items.chunks(size).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_with_short_tail() {
        let groups = chunk(&[1, 2, 3, 4, 5], 2).unwrap();
        assert_eq!(groups, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
    }

    #[test]
    fn exact_multiple_has_no_tail() {
        let groups = chunk(&[1, 2, 3, 4], 2).unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.len() == 2));
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let groups = chunk::<i32>(&[], 3).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn zero_size_is_an_error() {
        let err = chunk(&[1, 2, 3], 0).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }
}
