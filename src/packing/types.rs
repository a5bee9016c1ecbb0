//! Decoded packing.

/// An assignment of items to bins, decoded from a solver incumbent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packing {
    /// Item indices per candidate bin.
    pub bins: Vec<Vec<usize>>,
    /// `used(j)` flag per candidate bin.
    pub used: Vec<bool>,
    /// Item weights, in item order.
    pub weights: Vec<u64>,
    /// Bin capacity.
    pub capacity: u64,
}

impl Packing {
    /// Number of bins flagged as used (the objective value).
    pub fn bins_used(&self) -> usize {
        self.used.iter().filter(|&&u| u).count()
    }

    /// Number of bins holding at least one item.
    pub fn non_empty_bins(&self) -> usize {
        self.bins.iter().filter(|b| !b.is_empty()).count()
    }

    /// Load of every candidate bin.
    pub fn loads(&self) -> Vec<u64> {
        self.bins
            .iter()
            .map(|items| items.iter().map(|&i| self.weights[i]).sum())
            .collect()
    }

    /// Whether used bins form a prefix: `used(j)` implies `used(j - 1)`.
    pub fn is_monotonic(&self) -> bool {
        self.used.windows(2).all(|w| w[0] || !w[1])
    }

    /// Whether every bin is within capacity and every loaded bin is used.
    pub fn respects_capacity(&self) -> bool {
        self.loads()
            .iter()
            .zip(&self.used)
            .all(|(&load, &used)| load <= self.capacity && (used || load == 0))
    }

    /// Whether every item sits in exactly one bin.
    pub fn is_exact_cover(&self) -> bool {
        let mut seen = vec![0usize; self.weights.len()];
        for &i in self.bins.iter().flatten() {
            match seen.get_mut(i) {
                Some(count) => *count += 1,
                None => return false,
            }
        }
        seen.iter().all(|&c| c == 1)
    }

    /// All structural checks at once.
    pub fn is_valid(&self) -> bool {
        self.is_exact_cover() && self.respects_capacity() && self.is_monotonic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packing(bins: Vec<Vec<usize>>, used: Vec<bool>) -> Packing {
        Packing {
            bins,
            used,
            weights: vec![4, 4, 4, 4],
            capacity: 8,
        }
    }

    #[test]
    fn test_valid_packing() {
        let p = packing(
            vec![vec![0, 1], vec![2, 3], vec![], vec![]],
            vec![true, true, false, false],
        );
        assert_eq!(p.bins_used(), 2);
        assert_eq!(p.non_empty_bins(), 2);
        assert_eq!(p.loads(), vec![8, 8, 0, 0]);
        assert!(p.is_valid());
    }

    #[test]
    fn test_gap_in_used_bins() {
        let p = packing(
            vec![vec![0, 1], vec![], vec![2, 3], vec![]],
            vec![true, false, true, false],
        );
        assert!(p.is_exact_cover());
        assert!(p.respects_capacity());
        assert!(!p.is_monotonic());
        assert!(!p.is_valid());
    }

    #[test]
    fn test_overloaded_bin() {
        let p = packing(vec![vec![0, 1, 2], vec![3]], vec![true, true]);
        assert!(!p.respects_capacity());
    }

    #[test]
    fn test_loaded_bin_must_be_used() {
        let p = packing(vec![vec![0, 1], vec![2, 3]], vec![true, false]);
        assert!(!p.respects_capacity());
    }

    #[test]
    fn test_duplicate_or_missing_item() {
        let dup = packing(vec![vec![0, 1], vec![1, 2, 3]], vec![true, true]);
        assert!(!dup.is_exact_cover());

        let missing = packing(vec![vec![0, 1], vec![2]], vec![true, true]);
        assert!(!missing.is_exact_cover());

        let out_of_range = packing(vec![vec![0, 1], vec![2, 3, 9]], vec![true, true]);
        assert!(!out_of_range.is_exact_cover());
    }
}
