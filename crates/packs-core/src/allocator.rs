//! Allocator capability and strategy selection

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::allocation::Allocation;
use crate::greedy::{GreedyDivideAllocator, GreedyMergeAllocator};
use crate::reachability::{ReachabilityAllocator, DEFAULT_TABLE_LIMIT};

/// A strategy that decides how many packs of each size to ship.
pub trait Allocator: fmt::Debug + Send + Sync {
    /// Short, stable name of the strategy.
    fn name(&self) -> &'static str;

    /// Allocate packs for `amount` items.
    ///
    /// Callers guarantee `amount > 0` and that `sizes` is non-empty, distinct
    /// and sorted descending (as handed out by a [`crate::Catalog`]).
    /// The returned allocation always covers `amount`.
    fn allocate(&self, amount: u64, sizes: &[u64]) -> Allocation;
}

/// Named allocation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Bounded reachability search with greedy fallback
    #[default]
    Reachability,
    /// Greedy divide followed by the merge pass
    GreedyMerge,
    /// Plain greedy divide
    GreedyDivide,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown allocation strategy \"{0}\" (expected one of: reachability, greedy-merge, greedy-divide)")]
pub struct UnknownStrategyError(pub String);

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Reachability => "reachability",
            Strategy::GreedyMerge => "greedy-merge",
            Strategy::GreedyDivide => "greedy-divide",
        }
    }

    pub fn all() -> &'static [Strategy] {
        &[Strategy::Reachability, Strategy::GreedyMerge, Strategy::GreedyDivide]
    }

    /// Build the allocator for this strategy.
    pub fn allocator(&self, config: &AllocatorConfig) -> Box<dyn Allocator> {
        match self {
            Strategy::Reachability => {
                Box::new(ReachabilityAllocator::with_table_limit(config.table_limit))
            }
            Strategy::GreedyMerge => Box::new(GreedyMergeAllocator),
            Strategy::GreedyDivide => Box::new(GreedyDivideAllocator),
        }
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::all()
            .iter()
            .copied()
            .find(|strategy| strategy.as_str() == s.trim())
            .ok_or_else(|| UnknownStrategyError(s.to_string()))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settings for the allocation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorConfig {
    /// Strategy used to answer `allocate` calls
    pub strategy: Strategy,
    /// Largest total the reachability table may cover
    pub table_limit: u64,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            table_limit: DEFAULT_TABLE_LIMIT,
        }
    }
}

impl AllocatorConfig {
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn table_limit(mut self, limit: u64) -> Self {
        self.table_limit = limit;
        self
    }
}
