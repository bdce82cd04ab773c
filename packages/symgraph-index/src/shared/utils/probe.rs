//! Galloping position lookup
//!
//! The proximity walk visits tree nodes in roughly ascending position order
//! and asks, per node, whether the node's position is tracked. Over a
//! sorted position list a naive scan is linear per node; the galloping
//! probe starts at the last hit, doubles its step until it overshoots, then
//! binary-searches the bracketed window, keeping each lookup logarithmic in
//! the distance advanced since the previous one.

/// Sorted set of tracked byte positions with an amortized-doubling probe
#[derive(Debug, Clone, Default)]
pub struct PositionSet {
    positions: Vec<usize>,
}

impl PositionSet {
    /// Build from arbitrary positions; sorts and de-duplicates
    pub fn new(mut positions: Vec<usize>) -> Self {
        positions.sort_unstable();
        positions.dedup();
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Fresh probe cursor; one per walk
    pub fn probe(&self) -> PositionProbe<'_> {
        PositionProbe {
            positions: &self.positions,
            cursor: 0,
        }
    }
}

/// Stateful cursor over a `PositionSet`
///
/// `contains` calls with non-decreasing targets are amortized O(log gap);
/// an out-of-order target falls back to galloping from the cursor's last
/// resting point, which stays correct, just less cheap.
#[derive(Debug)]
pub struct PositionProbe<'a> {
    positions: &'a [usize],
    cursor: usize,
}

impl<'a> PositionProbe<'a> {
    /// Is `target` a tracked position?
    pub fn contains(&mut self, target: usize) -> bool {
        self.index_of(target).is_some()
    }

    /// Index of `target` in the underlying sorted list, if tracked
    pub fn index_of(&mut self, target: usize) -> Option<usize> {
        let positions = self.positions;
        if positions.is_empty() {
            return None;
        }

        // Rewind when the walk jumped backwards (sibling subtrees).
        if self.cursor >= positions.len() || positions[self.cursor] > target {
            self.cursor = 0;
        }
        if positions[self.cursor] > target {
            return None;
        }

        // Gallop: double the step until we bracket the target.
        let mut step = 1;
        let mut high = self.cursor;
        while high < positions.len() && positions[high] < target {
            self.cursor = high;
            high = match high.checked_add(step) {
                Some(next) => next,
                None => positions.len(),
            };
            step *= 2;
        }
        let high = high.min(positions.len());

        // Back off into the bracketed window with a binary search.
        match positions[self.cursor..high].binary_search(&target) {
            Ok(i) => {
                self.cursor += i;
                Some(self.cursor)
            }
            Err(i) => {
                // Rest just before the insertion point so the next
                // non-decreasing target gallops from here.
                self.cursor = (self.cursor + i).saturating_sub(1);
                if high < positions.len() && positions[high] == target {
                    self.cursor = high;
                    Some(high)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set() {
        let set = PositionSet::default();
        let mut probe = set.probe();
        assert!(!probe.contains(5));
    }

    #[test]
    fn test_ascending_hits() {
        let set = PositionSet::new(vec![3, 8, 21, 55, 144]);
        let mut probe = set.probe();
        assert!(probe.contains(3));
        assert!(!probe.contains(4));
        assert!(probe.contains(21));
        assert!(probe.contains(144));
        assert!(!probe.contains(145));
    }

    #[test]
    fn test_backwards_target_still_correct() {
        let set = PositionSet::new(vec![1, 10, 100, 1000]);
        let mut probe = set.probe();
        assert!(probe.contains(1000));
        assert!(probe.contains(10));
        assert!(probe.contains(1));
    }

    #[test]
    fn test_duplicates_deduped() {
        let set = PositionSet::new(vec![5, 5, 5, 9]);
        assert_eq!(set.len(), 2);
        let mut probe = set.probe();
        assert_eq!(probe.index_of(9), Some(1));
    }

    #[test]
    fn test_large_gap_gallop() {
        let positions: Vec<usize> = (0..10_000).map(|i| i * 7).collect();
        let set = PositionSet::new(positions);
        let mut probe = set.probe();
        assert!(probe.contains(0));
        assert!(probe.contains(7 * 9_999));
        assert!(!probe.contains(7 * 9_999 + 1));
    }
}
