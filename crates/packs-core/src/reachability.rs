//! Bounded reachability search for the smallest coverable total
//!
//! The search walks totals upward from zero, recording for each total whether
//! some combination of pack sizes sums to it exactly. The first reachable
//! total at or above the order amount has the least possible waste; the table
//! also keeps the fewest packs needed for each total so the reconstructed
//! combination is as compact as possible.
//!
//! Memory grows with the totals covered, so the table is bounded. Orders whose
//! answer lies beyond the bound fall back to [`GreedyDivideAllocator`].

use crate::allocation::Allocation;
use crate::allocator::Allocator;
use crate::greedy::GreedyDivideAllocator;

/// Default ceiling on the totals covered by the reachability table.
pub const DEFAULT_TABLE_LIMIT: u64 = 1_000_000;

/// Hard ceiling for a configured table limit (about 600 MB of table).
pub const MAX_TABLE_LIMIT: u64 = 50_000_000;

const UNREACHABLE: u64 = u64::MAX;

/// Minimal-waste allocator backed by a bounded reachability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReachabilityAllocator {
    table_limit: u64,
}

impl Default for ReachabilityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReachabilityAllocator {
    pub fn new() -> Self {
        Self {
            table_limit: DEFAULT_TABLE_LIMIT,
        }
    }

    /// Limits above [`MAX_TABLE_LIMIT`] are clamped to it.
    pub fn with_table_limit(table_limit: u64) -> Self {
        Self {
            table_limit: table_limit.min(MAX_TABLE_LIMIT),
        }
    }

    /// Highest total the table will cover for this order.
    ///
    /// `amount + largest` always contains a multiple of the largest size, so
    /// anything above it can never be the first reachable total.
    pub fn search_bound(&self, amount: u64, sizes: &[u64]) -> u64 {
        let largest = sizes.first().copied().unwrap_or(0);
        amount
            .saturating_mul(2)
            .min(amount.saturating_add(largest))
            .min(self.table_limit)
    }

    /// Find the smallest reachable total `>= amount` and one combination
    /// reaching it. Returns the allocation and its total.
    pub fn search(&self, amount: u64, sizes: &[u64]) -> (Allocation, u64) {
        let Some(&smallest) = sizes.last() else {
            return (Allocation::new(), 0);
        };

        if amount <= smallest {
            return (Allocation::single(smallest, 1), smallest);
        }

        let cap = self.search_bound(amount, sizes);
        let table = if cap < amount {
            None
        } else {
            usize::try_from(cap)
                .ok()
                .and_then(|cap| Table::fill(amount as usize, cap, sizes))
        };

        let Some((table, total)) = table else {
            log::debug!(
                "No reachable total for {} within bound {}; falling back to greedy divide",
                amount,
                cap
            );
            return GreedyDivideAllocator.divide(amount, sizes);
        };

        let allocation = table.reconstruct(total, sizes);
        log::debug!(
            "Reachability chose total {} for {} (bound {}): {}",
            total,
            amount,
            cap,
            allocation
        );
        (allocation, total as u64)
    }
}

impl Allocator for ReachabilityAllocator {
    fn name(&self) -> &'static str {
        "reachability"
    }

    fn allocate(&self, amount: u64, sizes: &[u64]) -> Allocation {
        self.search(amount, sizes).0
    }
}

/// Per-total bookkeeping: fewest packs reaching each total, and the index
/// (into the descending size list) of the last pack used to get there.
struct Table {
    packs: Vec<u64>,
    last: Vec<u32>,
}

impl Table {
    /// Fill totals `0..=cap`, stopping at the first reachable total `>= amount`.
    fn fill(amount: usize, cap: usize, sizes: &[u64]) -> Option<(Self, usize)> {
        let len = cap.checked_add(1)?;
        let mut packs = filled(len, UNREACHABLE)?;
        let mut last = filled(len, 0u32)?;
        packs[0] = 0;

        for total in 1..=cap {
            // Sizes are descending and only a strictly smaller count replaces
            // an entry, so ties keep the larger pack.
            for (index, &size) in sizes.iter().enumerate() {
                let Ok(size) = usize::try_from(size) else {
                    continue;
                };
                if size > total {
                    continue;
                }
                let before = packs[total - size];
                if before == UNREACHABLE {
                    continue;
                }
                if before + 1 < packs[total] {
                    packs[total] = before + 1;
                    last[total] = index as u32;
                }
            }

            if total >= amount && packs[total] != UNREACHABLE {
                return Some((Self { packs, last }, total));
            }
        }

        None
    }

    fn reconstruct(&self, total: usize, sizes: &[u64]) -> Allocation {
        debug_assert!(self.packs[total] != UNREACHABLE);

        let mut allocation = Allocation::new();
        let mut remaining = total;
        while remaining > 0 {
            let size = sizes[self.last[remaining] as usize];
            allocation.add(size, 1);
            remaining -= size as usize;
        }
        allocation
    }
}

/// A vector of `len` copies of `value`, or `None` when memory for it cannot
/// be reserved.
fn filled<T: Clone>(len: usize, value: T) -> Option<Vec<T>> {
    let mut values = Vec::new();
    if let Err(e) = values.try_reserve_exact(len) {
        log::warn!("Cannot allocate a reachability table of {} entries: {}", len, e);
        return None;
    }
    values.resize(len, value);
    Some(values)
}
