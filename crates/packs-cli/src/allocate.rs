//! Allocate command - compute the packs to ship for an order.

use anyhow::Result;
use clap::Args;
use packs_core::PackService;

use crate::catalog::CatalogArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct AllocateArgs {
    /// Number of items ordered
    #[arg(allow_hyphen_values = true)]
    pub amount: i64,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: AllocateArgs, service: &PackService) -> Result<i32> {
    args.catalog.apply(service)?;
    let result = service.allocate(args.amount)?;
    log::info!(
        "Allocated {} items in {} packs for {} using {}",
        result.total_items,
        result.total_packs,
        result.amount,
        service.strategy()
    );

    if args.json {
        output::print_json(&result)?;
    } else {
        output::print_result(&result);
    }
    Ok(0)
}
