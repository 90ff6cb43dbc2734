//! Collection helpers

/// Replaces the contents of `target` with `source`, keeping `target`'s
/// allocation
///
/// `source` is drained completely before `target` is cleared, so it may be
/// built from `target`'s previous contents (`target.clone().into_iter().filter(..)`).
pub fn replace_collection<T, I>(target: &mut Vec<T>, source: I)
where
    I: IntoIterator<Item = T>,
{
    let items: Vec<T> = source.into_iter().collect();
    target.clear();
    target.extend(items);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_collection() {
        let mut values = vec![1, 2, 3, 4];
        let evens: Vec<i32> = values.iter().copied().filter(|v| v % 2 == 0).collect();
        replace_collection(&mut values, evens);
        assert_eq!(values, vec![2, 4]);
    }

    #[test]
    fn test_replace_with_empty() {
        let mut values = vec!["a", "b"];
        replace_collection(&mut values, std::iter::empty());
        assert!(values.is_empty());
    }
}
