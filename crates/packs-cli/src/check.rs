//! Check command - compare the configured strategy against greedy-merge.

use anyhow::Result;
use clap::Args;
use packs_core::PackService;
use serde::Serialize;

use crate::catalog::CatalogArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Number of items ordered
    #[arg(allow_hyphen_values = true)]
    pub amount: i64,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Print the comparison as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    strategy: &'a str,
    agrees: bool,
    primary_is_no_worse: bool,
    primary: &'a packs_core::AllocationResult,
    reference: &'a packs_core::AllocationResult,
}

/// Exits with 1 when the configured strategy does worse than greedy-merge.
pub fn execute(args: CheckArgs, service: &PackService) -> Result<i32> {
    args.catalog.apply(service)?;
    let check = service.cross_check(args.amount)?;

    if args.json {
        output::print_json(&CheckReport {
            strategy: check.strategy.as_str(),
            agrees: check.agrees(),
            primary_is_no_worse: check.primary_is_no_worse(),
            primary: &check.primary,
            reference: &check.reference,
        })?;
    } else {
        output::print_cross_check(&check);
    }

    Ok(if check.primary_is_no_worse() { 0 } else { 1 })
}
