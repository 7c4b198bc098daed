//! Pack service facade: the entry points used by outer layers

use std::sync::Arc;

use crate::allocation::{Allocation, AllocationResult};
use crate::allocator::{Allocator, AllocatorConfig, Strategy};
use crate::catalog::{Catalog, PackCatalog};
use crate::distractor::DistractorGenerator;
use crate::error::{validate_amount, Result};
use crate::greedy::GreedyMergeAllocator;

/// Outcome of running the configured strategy next to the greedy-merge reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossCheck {
    pub strategy: Strategy,
    pub primary: AllocationResult,
    pub reference: AllocationResult,
}

impl CrossCheck {
    /// Both strategies produced the same packs.
    pub fn agrees(&self) -> bool {
        self.primary.packs == self.reference.packs
    }

    /// The primary answer is at least as good as the reference: no more
    /// waste, and no more packs when waste ties.
    pub fn primary_is_no_worse(&self) -> bool {
        let primary = (self.primary.total_items, self.primary.total_packs);
        let reference = (self.reference.total_items, self.reference.total_packs);
        primary <= reference
    }
}

/// Main facade for pack allocation.
///
/// Owns the process-wide catalog and the configured strategy. Every call
/// takes one catalog snapshot at entry and works on it exclusively, so a
/// concurrent [`PackService::set_catalog`] never affects a call in flight.
#[derive(Debug)]
pub struct PackService {
    catalog: PackCatalog,
    config: AllocatorConfig,
    allocator: Box<dyn Allocator>,
}

impl Default for PackService {
    fn default() -> Self {
        Self::new()
    }
}

impl PackService {
    /// Service with the default catalog and strategy.
    pub fn new() -> Self {
        Self::with_config(Catalog::default(), AllocatorConfig::default())
    }

    pub fn with_config(catalog: Catalog, config: AllocatorConfig) -> Self {
        log::debug!(
            "Pack service using {} strategy (table limit {}) with catalog [{}]",
            config.strategy,
            config.table_limit,
            catalog
        );
        Self {
            catalog: PackCatalog::new(catalog),
            allocator: config.strategy.allocator(&config),
            config,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.config.strategy
    }

    /// Replace the active catalog. On error the previous catalog stays active.
    pub fn set_catalog<I>(&self, sizes: I) -> Result<Arc<Catalog>>
    where
        I: IntoIterator<Item = i64>,
    {
        self.catalog.replace(sizes)
    }

    /// The catalog active right now.
    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog.snapshot()
    }

    /// Allocate packs for an order with the configured strategy.
    pub fn allocate(&self, amount: i64) -> Result<AllocationResult> {
        let amount = validate_amount(amount)?;
        let catalog = self.catalog.snapshot();
        let allocation = self.allocator.allocate(amount, catalog.sizes());
        Ok(allocation.to_result(amount))
    }

    /// The canonical reference allocation used for distractors.
    pub fn canonical(&self, amount: i64) -> Result<Allocation> {
        let amount = validate_amount(amount)?;
        let catalog = self.catalog.snapshot();
        Ok(GreedyMergeAllocator.allocate(amount, catalog.sizes()))
    }

    /// Plausible wrong answers for an order, in catalog order.
    pub fn distractors(&self, amount: i64) -> Result<Vec<Allocation>> {
        let amount = validate_amount(amount)?;
        let catalog = self.catalog.snapshot();
        let canonical = GreedyMergeAllocator.allocate(amount, catalog.sizes());
        Ok(DistractorGenerator.generate(amount, catalog.sizes(), &canonical))
    }

    /// Run the configured strategy and the greedy-merge reference on the
    /// same catalog snapshot.
    pub fn cross_check(&self, amount: i64) -> Result<CrossCheck> {
        let amount = validate_amount(amount)?;
        let catalog = self.catalog.snapshot();
        let primary = self.allocator.allocate(amount, catalog.sizes());
        let reference = GreedyMergeAllocator.allocate(amount, catalog.sizes());

        if primary != reference {
            log::debug!(
                "{} and greedy-merge disagree for {}: {} vs {}",
                self.allocator.name(),
                amount,
                primary,
                reference
            );
        }

        Ok(CrossCheck {
            strategy: self.config.strategy,
            primary: primary.to_result(amount),
            reference: reference.to_result(amount),
        })
    }
}
