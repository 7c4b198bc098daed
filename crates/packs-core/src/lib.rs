//! Pack-size allocation engine
//!
//! Fulfils an order for N items from a catalog of pack sizes, shipping at
//! least N items while keeping the surplus, then the number of packs, as small
//! as possible. Several strategies sit behind the [`Allocator`] trait; the
//! [`PackService`] facade owns the active catalog and exposes the operations
//! used by outer layers.

mod allocation;
mod allocator;
mod catalog;
mod distractor;
mod error;
mod greedy;
mod reachability;
mod service;


pub use allocation::{Allocation, AllocationResult, PackCount};
pub use allocator::{Allocator, AllocatorConfig, Strategy, UnknownStrategyError};
pub use catalog::{Catalog, PackCatalog, DEFAULT_PACK_SIZES};
pub use distractor::DistractorGenerator;
pub use error::{PackError, Result};
pub use greedy::{merge_packs, GreedyDivideAllocator, GreedyMergeAllocator};
pub use reachability::{ReachabilityAllocator, DEFAULT_TABLE_LIMIT, MAX_TABLE_LIMIT};
pub use service::{CrossCheck, PackService};
