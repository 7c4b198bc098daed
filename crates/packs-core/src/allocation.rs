//! Allocation types: how many packs of each size to ship

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A mapping from pack size to the number of packs of that size.
///
/// Zero counts are never stored, so two allocations are equal exactly when
/// they ship the same packs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Allocation {
    counts: BTreeMap<u64, u64>,
}

impl Allocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// An allocation made of `count` packs of a single size.
    pub fn single(size: u64, count: u64) -> Self {
        let mut allocation = Self::new();
        allocation.add(size, count);
        allocation
    }

    /// Add `count` packs of `size`.
    pub fn add(&mut self, size: u64, count: u64) {
        if count == 0 {
            return;
        }
        *self.counts.entry(size).or_insert(0) += count;
    }

    /// Remove up to `count` packs of `size`, dropping the entry when it reaches zero.
    pub fn remove(&mut self, size: u64, count: u64) {
        if let Some(have) = self.counts.get_mut(&size) {
            *have = have.saturating_sub(count);
            if *have == 0 {
                self.counts.remove(&size);
            }
        }
    }

    /// Number of packs of `size` (zero when absent).
    pub fn count(&self, size: u64) -> u64 {
        self.counts.get(&size).copied().unwrap_or(0)
    }

    /// Sum of `size * count` over all entries.
    pub fn total_items(&self) -> u64 {
        self.counts.iter().map(|(size, count)| size * count).sum()
    }

    /// Sum of counts.
    pub fn total_packs(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries as `(size, count)`, largest size first.
    pub fn packs(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().rev().map(|(&size, &count)| (size, count))
    }

    /// Build the externally visible result for an order of `amount` items.
    pub fn to_result(&self, amount: u64) -> AllocationResult {
        AllocationResult {
            amount,
            total_items: self.total_items(),
            total_packs: self.total_packs(),
            packs: self
                .packs()
                .map(|(pack_size, count)| PackCount { pack_size, count })
                .collect(),
        }
    }
}

impl FromIterator<(u64, u64)> for Allocation {
    fn from_iter<T: IntoIterator<Item = (u64, u64)>>(iter: T) -> Self {
        let mut allocation = Self::new();
        for (size, count) in iter {
            allocation.add(size, count);
        }
        allocation
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "(none)");
        }
        let parts: Vec<String> = self
            .packs()
            .map(|(size, count)| format!("{}x{}", size, count))
            .collect();
        write!(f, "{}", parts.join(" + "))
    }
}

/// One line of an [`AllocationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PackCount {
    pub pack_size: u64,
    pub count: u64,
}

/// The answer to an order: what ships, and how much of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationResult {
    pub amount: u64,
    pub total_items: u64,
    pub total_packs: u64,
    /// Sorted by pack size, largest first.
    pub packs: Vec<PackCount>,
}

impl AllocationResult {
    /// Items shipped beyond the order.
    pub fn waste(&self) -> u64 {
        self.total_items.saturating_sub(self.amount)
    }

    /// Rebuild the allocation this result describes.
    pub fn allocation(&self) -> Allocation {
        self.packs.iter().map(|p| (p.pack_size, p.count)).collect()
    }
}
