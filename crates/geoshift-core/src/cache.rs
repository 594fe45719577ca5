//! Single-slot operation cache keyed by the exact `(src, dst)` identifiers.

use serde::{Deserialize, Serialize};

use crate::builder::OperationPlan;
use crate::error::BuildError;

/// Counters for cache usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered by the live entry.
    pub hits: u64,
    /// Lookups that had to invoke the builder.
    pub misses: u64,
    /// Successful builds.
    pub builds: u64,
}

#[derive(Debug)]
struct CacheEntry<Op> {
    src_id: String,
    dst_id: String,
    plan: OperationPlan<Op>,
}

impl<Op> CacheEntry<Op> {
    fn matches(&self, src: &str, dst: &str) -> bool {
        !src.is_empty() && !dst.is_empty() && self.src_id == src && self.dst_id == dst
    }
}

/// Holds at most one compiled operation.
///
/// Identifiers are compared byte for byte; two spellings of the same CRS are
/// different keys.
#[derive(Debug)]
pub struct OperationCache<Op> {
    entry: Option<CacheEntry<Op>>,
    stats: CacheStats,
}

impl<Op> Default for OperationCache<Op> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Op> OperationCache<Op> {
    pub const fn new() -> Self {
        Self {
            entry: None,
            stats: CacheStats {
                hits: 0,
                misses: 0,
                builds: 0,
            },
        }
    }

    /// Return the plan for `(src, dst)`, building it with `build` on a miss.
    ///
    /// A miss drops the previous operation before `build` runs. If `build`
    /// fails the cache is left empty.
    pub fn get_or_build<F>(
        &mut self,
        src: &str,
        dst: &str,
        build: F,
    ) -> Result<&OperationPlan<Op>, BuildError>
    where
        F: FnOnce(&str, &str) -> Result<OperationPlan<Op>, BuildError>,
    {
        if let Some(stale) = self.entry.take_if(|entry| !entry.matches(src, dst)) {
            tracing::debug!(
                src = stale.src_id.as_str(),
                dst = stale.dst_id.as_str(),
                "evicting cached operation"
            );
        }

        match self.entry {
            Some(ref entry) => {
                self.stats.hits += 1;
                tracing::trace!(src, dst, "operation cache hit");
                Ok(&entry.plan)
            }
            None => {
                self.stats.misses += 1;
                let plan = build(src, dst)?;
                self.stats.builds += 1;
                let entry = self.entry.insert(CacheEntry {
                    src_id: src.to_string(),
                    dst_id: dst.to_string(),
                    plan,
                });
                Ok(&entry.plan)
            }
        }
    }

    /// Drop the live operation, if any. Idempotent.
    pub fn clear(&mut self) {
        if self.entry.take().is_some() {
            tracing::debug!("operation cache cleared");
        }
    }

    /// Identifiers of the live entry.
    pub fn key(&self) -> Option<(&str, &str)> {
        self.entry
            .as_ref()
            .map(|entry| (entry.src_id.as_str(), entry.dst_id.as_str()))
    }

    /// The live plan, if any.
    pub fn plan(&self) -> Option<&OperationPlan<Op>> {
        self.entry.as_ref().map(|entry| &entry.plan)
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
