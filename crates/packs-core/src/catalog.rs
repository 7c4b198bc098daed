//! Pack catalog: the active set of shippable pack sizes

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::error::{PackError, Result};

/// Pack sizes used when no catalog has been configured.
pub const DEFAULT_PACK_SIZES: [u64; 5] = [5000, 2000, 1000, 500, 250];

/// An immutable, validated set of pack sizes.
///
/// Sizes are distinct, strictly positive and stored in descending order.
/// A `Catalog` can only be built through [`Catalog::new`], so every value in
/// circulation already satisfies those invariants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Catalog {
    sizes: Vec<u64>,
}

impl Catalog {
    /// Validate and build a catalog from raw sizes.
    ///
    /// Duplicates are collapsed. Fails with [`PackError::InvalidCatalog`]
    /// when the input is empty or contains a non-positive size.
    pub fn new<I>(sizes: I) -> Result<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut validated = Vec::new();
        for size in sizes {
            if size <= 0 {
                return Err(PackError::InvalidCatalog(format!(
                    "pack size {} is not positive",
                    size
                )));
            }
            validated.push(size as u64);
        }

        if validated.is_empty() {
            return Err(PackError::InvalidCatalog("no pack sizes given".to_string()));
        }

        validated.sort_unstable_by(|a, b| b.cmp(a));
        validated.dedup();

        Ok(Self { sizes: validated })
    }

    /// Sizes in descending order.
    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }

    pub fn largest(&self) -> u64 {
        self.sizes[0]
    }

    pub fn smallest(&self) -> u64 {
        self.sizes[self.sizes.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Never true for a validated catalog.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn contains(&self, size: u64) -> bool {
        self.sizes.contains(&size)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_PACK_SIZES.to_vec(),
        }
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.sizes.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Process-wide holder of the active catalog.
///
/// Replacement swaps a whole new [`Catalog`] in; readers take an `Arc`
/// snapshot and keep using it for the rest of their call, so they observe
/// either the old set or the new one, never a mix.
#[derive(Debug)]
pub struct PackCatalog {
    current: RwLock<Arc<Catalog>>,
}

impl Default for PackCatalog {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

impl PackCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Validate `sizes` and make them the active catalog.
    ///
    /// On error the previous catalog stays active.
    pub fn replace<I>(&self, sizes: I) -> Result<Arc<Catalog>>
    where
        I: IntoIterator<Item = i64>,
    {
        let catalog = Arc::new(Catalog::new(sizes)?);
        self.install(Arc::clone(&catalog));
        log::info!("Pack catalog replaced: [{}]", catalog);
        Ok(catalog)
    }

    /// Swap in an already validated catalog.
    fn install(&self, catalog: Arc<Catalog>) {
        // A poisoned lock still holds a complete Arc: the only write is a swap.
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = catalog;
    }

    /// The catalog active right now.
    pub fn snapshot(&self) -> Arc<Catalog> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }
}
