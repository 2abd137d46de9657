//! Canonical ordering of unordered criterion pairs.
//!
//! Pairs `(i, j)` with `i < j` are enumerated lexicographically: all pairs
//! with `i = 0` first (`j = 1..n`), then `i = 1` (`j = 2..n`), and so on.
//! Step counts, progress fractions and undo all index into this order.

/// Number of unordered pairs over `n` items: `n(n-1)/2`.
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// All unordered pairs over `n` items in lexicographic order.
///
/// # Examples
///
/// ```
/// use u_ahp::matrix::pair_order;
///
/// assert_eq!(pair_order(3), vec![(0, 1), (0, 2), (1, 2)]);
/// ```
pub fn pair_order(n: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(pair_count(n));
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push((i, j));
        }
    }
    pairs
}

/// Position of pair `(i, j)` (`i < j < n`) in [`pair_order`].
///
/// Returns `None` when the pair is not a valid upper-triangle pair.
pub fn pair_index(n: usize, i: usize, j: usize) -> Option<usize> {
    if i >= j || j >= n {
        return None;
    }
    // Rows 0..i contribute (n-1) + (n-2) + ... + (n-i) pairs.
    let before = i * (2 * n - i - 1) / 2;
    Some(before + (j - i - 1))
}

/// Pair at position `k` of [`pair_order`], or `None` past the end.
pub fn pair_at(n: usize, k: usize) -> Option<(usize, usize)> {
    if k >= pair_count(n) {
        return None;
    }
    let mut remaining = k;
    for i in 0..n {
        let row_len = n - i - 1;
        if remaining < row_len {
            return Some((i, i + 1 + remaining));
        }
        remaining -= row_len;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(2), 1);
        assert_eq!(pair_count(4), 6);
        assert_eq!(pair_count(12), 66);
    }

    #[test]
    fn test_pair_order_four() {
        assert_eq!(
            pair_order(4),
            vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
    }

    #[test]
    fn test_pair_index_matches_order() {
        for n in 2..9 {
            for (k, &(i, j)) in pair_order(n).iter().enumerate() {
                assert_eq!(pair_index(n, i, j), Some(k));
                assert_eq!(pair_at(n, k), Some((i, j)));
            }
            assert_eq!(pair_at(n, pair_count(n)), None);
        }
    }

    #[test]
    fn test_pair_index_rejects_invalid() {
        assert_eq!(pair_index(4, 1, 1), None);
        assert_eq!(pair_index(4, 2, 1), None);
        assert_eq!(pair_index(4, 0, 4), None);
    }
}
