//! Engine lifecycle and coordinate transforms.

use std::path::Path;

use crate::axis::AxisOrder;
use crate::builder::OperationBuilder;
use crate::cache::{CacheStats, OperationCache};
use crate::config::{DataLayout, SessionConfig};
use crate::coord::Coordinate;
use crate::engine::GeodeticEngine;
use crate::error::{BuildError, InitError, TransformError};

/// An engine context plus its single-slot operation cache.
///
/// A session starts uninitialized. [`init`](Self::init) creates the engine
/// context, [`transform`](Self::transform) compiles and caches operations on
/// demand, and [`cleanup`](Self::cleanup) (or dropping the session) releases
/// the cached operation and then the context.
pub struct Session<E: GeodeticEngine> {
    // Declared before `engine` so the cached operation drops first.
    cache: OperationCache<E::Operation>,
    engine: Option<E>,
}

impl<E: GeodeticEngine> Default for Session<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GeodeticEngine> Session<E> {
    /// An uninitialized session.
    pub fn new() -> Self {
        Self {
            cache: OperationCache::new(),
            engine: None,
        }
    }

    /// Create a session and initialize it from `config`.
    pub fn with_config(config: &SessionConfig) -> Result<Self, InitError> {
        let mut session = Self::new();
        session.init_with(config)?;
        Ok(session)
    }

    /// Create the engine context if it does not exist yet.
    ///
    /// Calling this on an initialized session succeeds without touching the
    /// existing context, whatever `data_dir` is. When a context is created and
    /// `data_dir` is non-empty, the engine searches that directory and opens
    /// its `proj.db`.
    pub fn init(&mut self, data_dir: Option<&Path>) -> Result<(), InitError> {
        if self.engine.is_some() {
            tracing::debug!("engine context already initialized");
            return Ok(());
        }

        let mut engine = E::create()?;

        if let Some(dir) = data_dir.filter(|dir| !dir.as_os_str().is_empty()) {
            let layout = DataLayout::new(dir);
            if let Err(err) = engine.set_search_paths(&layout.search_paths) {
                tracing::warn!("cannot set search path {}: {err}", dir.display());
            }
            if let Err(err) = engine.set_database_path(&layout.database) {
                tracing::warn!("cannot open database {}: {err}", layout.database.display());
            }
            tracing::info!("engine context initialized with data dir {}", dir.display());
        } else {
            tracing::info!("engine context initialized with default data paths");
        }

        self.engine = Some(engine);
        Ok(())
    }

    pub fn init_with(&mut self, config: &SessionConfig) -> Result<(), InitError> {
        self.init(config.data_dir())
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    /// Transform one coordinate in place.
    ///
    /// `x` and `y` are required. `z` is fed as 0.0 when absent and only written
    /// back when present. Missing identifiers are treated as empty.
    ///
    /// # Errors
    ///
    /// - [`TransformError::MissingOrdinate`] when `x` or `y` is absent.
    /// - [`TransformError::OperationUnavailable`] when no operation can be
    ///   produced for the pair.
    /// - [`TransformError::Evaluation`] when the engine rejects this
    ///   coordinate. The cached operation is kept.
    pub fn transform_in_place(
        &mut self,
        src: Option<&str>,
        dst: Option<&str>,
        x: Option<&mut f64>,
        y: Option<&mut f64>,
        z: Option<&mut f64>,
    ) -> Result<(), TransformError> {
        let x = x.ok_or(TransformError::MissingOrdinate("x"))?;
        let y = y.ok_or(TransformError::MissingOrdinate("y"))?;
        let src = src.unwrap_or_default();
        let dst = dst.unwrap_or_default();

        let unavailable = |source| TransformError::OperationUnavailable {
            src: src.to_string(),
            dst: dst.to_string(),
            source,
        };

        let engine = self
            .engine
            .as_ref()
            .ok_or_else(|| unavailable(BuildError::NotInitialized))?;
        let plan = self
            .cache
            .get_or_build(src, dst, |src, dst| OperationBuilder::new(engine).build(src, dst))
            .map_err(unavailable)?;

        let (a, b) = plan.inbound.apply(*x, *y);
        let height = z.as_deref().copied().unwrap_or(0.0);

        let out = engine
            .forward(&plan.operation, [a, b, height, 0.0])
            .map_err(|err| {
                tracing::debug!(src, dst, "evaluation failed: {err}");
                TransformError::Evaluation(err)
            })?;

        let (out_x, out_y) = plan.outbound.apply(out[0], out[1]);
        *x = out_x;
        *y = out_y;
        if let Some(z) = z {
            *z = out[2];
        }

        Ok(())
    }

    /// Transform a coordinate from `src` to `dst`.
    pub fn transform(
        &mut self,
        src: &str,
        dst: &str,
        coord: Coordinate,
    ) -> Result<Coordinate, TransformError> {
        let Coordinate { mut x, mut y, mut z } = coord;
        self.transform_in_place(Some(src), Some(dst), Some(&mut x), Some(&mut y), z.as_mut())?;
        Ok(Coordinate { x, y, z })
    }

    /// Release the cached operation. Never fails.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Release the cached operation and the engine context.
    pub fn cleanup(&mut self) {
        self.cache.clear();
        if self.engine.take().is_some() {
            tracing::info!("engine context destroyed");
        }
    }

    /// `(src, dst)` of the cached operation.
    pub fn cached_pair(&self) -> Option<(&str, &str)> {
        self.cache.key()
    }

    /// `(inbound, outbound)` axis layouts of the cached operation.
    pub fn cached_layout(&self) -> Option<(AxisOrder, AxisOrder)> {
        self.cache.plan().map(|plan| (plan.inbound, plan.outbound))
    }

    pub fn cached_operation(&self) -> Option<&E::Operation> {
        self.cache.plan().map(|plan| &plan.operation)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl<E: GeodeticEngine> Drop for Session<E> {
    fn drop(&mut self) {
        self.cleanup();
    }
}
