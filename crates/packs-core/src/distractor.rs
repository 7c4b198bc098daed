//! Plausible-but-wrong allocations for negative fixtures and UI choices

use crate::allocation::Allocation;

/// Builds single-size allocations that look like reasonable answers to an
/// order but differ from the canonical one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistractorGenerator;

impl DistractorGenerator {
    /// The naive single-size cover of `amount` using only `size`.
    pub fn propose(amount: u64, size: u64) -> Allocation {
        if size >= amount {
            Allocation::single(size, 1)
        } else {
            Allocation::single(size, amount / size + 1)
        }
    }

    /// One proposal per catalog size, in catalog order, skipping any that
    /// equals `canonical`.
    pub fn generate(&self, amount: u64, sizes: &[u64], canonical: &Allocation) -> Vec<Allocation> {
        let distractors: Vec<Allocation> = sizes
            .iter()
            .map(|&size| Self::propose(amount, size))
            .filter(|proposal| proposal != canonical)
            .collect();

        log::debug!(
            "Generated {} distractors for {} (canonical {})",
            distractors.len(),
            amount,
            canonical
        );
        distractors
    }
}
