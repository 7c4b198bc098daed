//! Distractors command - list plausible but wrong allocations for an order.

use anyhow::Result;
use clap::Args;
use packs_core::{AllocationResult, PackService};

use crate::catalog::CatalogArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct DistractorsArgs {
    /// Number of items ordered
    #[arg(allow_hyphen_values = true)]
    pub amount: i64,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Print the distractors as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: DistractorsArgs, service: &PackService) -> Result<i32> {
    args.catalog.apply(service)?;
    let distractors = service.distractors(args.amount)?;

    // Validated by `distractors` above
    let amount = args.amount as u64;
    let results: Vec<AllocationResult> = distractors.iter().map(|d| d.to_result(amount)).collect();

    if args.json {
        output::print_json(&results)?;
    } else {
        output::print_distractors(amount, &results);
    }
    Ok(0)
}
