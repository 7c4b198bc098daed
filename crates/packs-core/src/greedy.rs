//! Greedy allocation strategies

use crate::allocation::Allocation;
use crate::allocator::Allocator;

/// Largest-first greedy fill.
///
/// Runs in time linear in the number of sizes regardless of the order
/// amount, which is why it backs the reachability search for huge orders.
/// It always covers the order but may waste more, or ship more packs, than
/// necessary when the sizes do not form a canonical coin system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyDivideAllocator;

impl GreedyDivideAllocator {
    /// Returns the allocation and its total.
    pub fn divide(&self, amount: u64, sizes: &[u64]) -> (Allocation, u64) {
        let mut allocation = Allocation::new();
        let mut remaining = amount;
        let mut total_items = 0u64;

        for &size in sizes {
            if remaining == 0 {
                break;
            }
            let count = remaining / size;
            if count > 0 {
                allocation.add(size, count);
                remaining -= count * size;
                total_items += count * size;
            }
        }

        if remaining > 0 {
            if let Some(&smallest) = sizes.last() {
                allocation.add(smallest, 1);
                total_items += smallest;
            }
        }

        (allocation, total_items)
    }
}

impl Allocator for GreedyDivideAllocator {
    fn name(&self) -> &'static str {
        "greedy-divide"
    }

    fn allocate(&self, amount: u64, sizes: &[u64]) -> Allocation {
        self.divide(amount, sizes).0
    }
}

/// Consolidate small packs into the next size up.
///
/// Walks adjacent size pairs from the smallest upward. Whenever there are at
/// least `ceil(large / small)` packs of `small`, each full group becomes one
/// `large` pack. Since such a group holds at least `large` items, every
/// conversion keeps the order covered, never adds waste and always removes
/// packs. Merged packs can merge again further up in the same pass.
pub fn merge_packs(allocation: &mut Allocation, sizes: &[u64]) {
    for pair in sizes.windows(2).rev() {
        let (large, small) = (pair[0], pair[1]);
        let required = large.div_ceil(small);
        if required <= 1 {
            continue;
        }

        let have = allocation.count(small);
        if have < required {
            continue;
        }

        let groups = have / required;
        allocation.remove(small, groups * required);
        allocation.add(large, groups);
        log::trace!(
            "Merged {} packs of {} into {} packs of {}",
            groups * required,
            small,
            groups,
            large
        );
    }
}

/// Greedy divide followed by [`merge_packs`].
///
/// Deterministic and tighter than the plain greedy fill; used as the
/// reference answer when generating distractors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyMergeAllocator;

impl Allocator for GreedyMergeAllocator {
    fn name(&self) -> &'static str {
        "greedy-merge"
    }

    fn allocate(&self, amount: u64, sizes: &[u64]) -> Allocation {
        let (mut allocation, _) = GreedyDivideAllocator.divide(amount, sizes);
        merge_packs(&mut allocation, sizes);
        allocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: [u64; 5] = [5000, 2000, 1000, 500, 250];

    fn alloc(pairs: &[(u64, u64)]) -> Allocation {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_divide_small_orders() {
        assert_eq!(
            GreedyDivideAllocator.divide(1, &SIZES),
            (Allocation::single(250, 1), 250)
        );
        assert_eq!(
            GreedyDivideAllocator.divide(251, &SIZES),
            (Allocation::single(250, 2), 500)
        );
    }

    #[test]
    fn test_divide_takes_largest_first() {
        let (allocation, total) = GreedyDivideAllocator.divide(12001, &SIZES);
        assert_eq!(total, 12250);
        assert_eq!(allocation, alloc(&[(5000, 2), (2000, 1), (250, 1)]));
    }

    #[test]
    fn test_divide_exact_fit_needs_no_extra_pack() {
        let (allocation, total) = GreedyDivideAllocator.divide(8250, &SIZES);
        assert_eq!(total, 8250);
        assert_eq!(
            allocation,
            alloc(&[(5000, 1), (2000, 1), (1000, 1), (250, 1)])
        );
    }

    #[test]
    fn test_divide_non_canonical_sizes_overshoots() {
        let (allocation, total) = GreedyDivideAllocator.divide(60, &[53, 31, 23]);
        assert_eq!(total, 76);
        assert_eq!(allocation, alloc(&[(53, 1), (23, 1)]));
    }

    #[test]
    fn test_merge_two_smallest_into_next() {
        let mut allocation = Allocation::single(250, 2);
        merge_packs(&mut allocation, &SIZES);
        assert_eq!(allocation, Allocation::single(500, 1));
    }

    #[test]
    fn test_merge_cascades_upward() {
        let mut allocation = alloc(&[(250, 2), (500, 1), (1000, 1)]);
        merge_packs(&mut allocation, &SIZES);
        assert_eq!(allocation, Allocation::single(2000, 1));
    }

    #[test]
    fn test_merge_keeps_leftovers() {
        let mut allocation = Allocation::single(250, 5);
        merge_packs(&mut allocation, &SIZES);
        assert_eq!(allocation, alloc(&[(1000, 1), (250, 1)]));
    }

    #[test]
    fn test_merge_with_rounded_up_groups() {
        // ceil(7 / 3) = 3 packs of 3 become one 7, trading 9 items for 7
        let mut allocation = Allocation::single(3, 4);
        merge_packs(&mut allocation, &[7, 3]);
        assert_eq!(allocation, alloc(&[(7, 1), (3, 1)]));
    }

    #[test]
    fn test_merge_never_grows_totals() {
        let sizes = [53, 31, 23];
        for amount in 1..2000 {
            let (mut allocation, _) = GreedyDivideAllocator.divide(amount, &sizes);
            let (items, packs) = (allocation.total_items(), allocation.total_packs());
            merge_packs(&mut allocation, &sizes);
            assert!(allocation.total_items() <= items, "amount {}", amount);
            assert!(allocation.total_packs() <= packs, "amount {}", amount);
            assert!(allocation.total_items() >= amount, "amount {}", amount);
        }
    }

    #[test]
    fn test_greedy_merge_allocator() {
        let allocator = GreedyMergeAllocator;
        assert_eq!(allocator.name(), "greedy-merge");
        assert_eq!(allocator.allocate(1, &SIZES), Allocation::single(250, 1));
        assert_eq!(allocator.allocate(251, &SIZES), Allocation::single(500, 1));
        assert_eq!(
            allocator.allocate(12001, &SIZES),
            alloc(&[(5000, 2), (2000, 1), (250, 1)])
        );
    }
}
