//! Catalog command and the shared `--sizes` option.

use anyhow::Result;
use clap::Args;
use packs_core::PackService;

use crate::output;

/// Catalog replacement accepted by every command
#[derive(Args, Debug, Default)]
pub struct CatalogArgs {
    /// Replace the pack catalog before running (comma-separated sizes)
    #[arg(long, value_name = "SIZES", value_delimiter = ',', allow_hyphen_values = true)]
    pub sizes: Option<Vec<i64>>,
}

impl CatalogArgs {
    /// Install the requested catalog, if any
    pub fn apply(&self, service: &PackService) -> Result<()> {
        if let Some(sizes) = &self.sizes {
            service.set_catalog(sizes.iter().copied())?;
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ShowCatalogArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: ShowCatalogArgs, service: &PackService) -> Result<i32> {
    args.catalog.apply(service)?;
    let catalog = service.catalog();

    if args.json {
        output::print_json(catalog.sizes())?;
    } else {
        output::print_catalog(&catalog);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use packs_core::PackError;

    #[test]
    fn test_apply_replaces_catalog() {
        let service = PackService::new();
        let args = CatalogArgs { sizes: Some(vec![31, 23, 53]) };
        args.apply(&service).unwrap();
        assert_eq!(service.catalog().sizes(), &[53, 31, 23]);
    }

    #[test]
    fn test_apply_without_sizes_is_noop() {
        let service = PackService::new();
        CatalogArgs::default().apply(&service).unwrap();
        assert_eq!(service.catalog().sizes(), &[5000, 2000, 1000, 500, 250]);
    }

    #[test]
    fn test_apply_rejects_invalid_sizes() {
        let service = PackService::new();
        let args = CatalogArgs { sizes: Some(vec![250, -1]) };
        let err = args.apply(&service).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::InvalidCatalog(_))
        ));
        assert_eq!(service.catalog().sizes(), &[5000, 2000, 1000, 500, 250]);
    }
}
