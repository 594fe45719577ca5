//! Operation building and axis-layout resolution.
//!
//! Two paths produce an [`OperationPlan`]:
//!
//! - **Standard**: neither CRS has a vertical component. The engine compiles
//!   the pipeline and normalizes it to east/north order, so both layouts are
//!   [`AxisOrder::Forward`].
//! - **Vertical**: at least one CRS has a vertical component. The engine's
//!   normalization step breaks area-of-use evaluation for vertical grid
//!   candidates, so it is skipped and the layouts are derived from the native
//!   axis order of each side instead.

use crate::axis::AxisOrder;
use crate::classify::{Classification, classify, horizontal_crs};
use crate::engine::GeodeticEngine;
use crate::error::{BuildError, EngineError};

/// A compiled operation together with the axis layouts at both ends.
#[derive(Debug)]
pub struct OperationPlan<Op> {
    pub operation: Op,
    /// Applied to `(x, y)` before evaluation.
    pub inbound: AxisOrder,
    /// Applied to the first two outputs after evaluation.
    pub outbound: AxisOrder,
}

/// Builds operation plans against one engine context.
pub struct OperationBuilder<'e, E> {
    engine: &'e E,
}

impl<'e, E: GeodeticEngine> OperationBuilder<'e, E> {
    pub fn new(engine: &'e E) -> Self {
        Self { engine }
    }

    /// Build the plan for `src` → `dst`.
    ///
    /// Every CRS handle obtained on the way is dropped before this returns,
    /// whatever the outcome.
    pub fn build(&self, src: &str, dst: &str) -> Result<OperationPlan<E::Operation>, BuildError> {
        if src.is_empty() {
            return Err(BuildError::EmptyIdentifier("source"));
        }
        if dst.is_empty() {
            return Err(BuildError::EmptyIdentifier("target"));
        }

        let src_class = self.classify(src)?;
        let dst_class = self.classify(dst)?;

        if src_class.has_vertical() || dst_class.has_vertical() {
            self.build_vertical(src, dst, &src_class, &dst_class)
        } else {
            self.build_standard(src, dst)
        }
    }

    fn classify(&self, id: &str) -> Result<Classification, BuildError> {
        classify(self.engine, id).map_err(|source| BuildError::Materialize {
            id: id.to_string(),
            source,
        })
    }

    fn build_standard(
        &self,
        src: &str,
        dst: &str,
    ) -> Result<OperationPlan<E::Operation>, BuildError> {
        let raw = self
            .engine
            .operation_from_definitions(src, dst)
            .map_err(BuildError::Compile)?;
        let operation = self
            .engine
            .normalize_for_visualization(&raw)
            .map_err(BuildError::Normalize)?;

        tracing::debug!(src, dst, "built normalized operation");

        Ok(OperationPlan {
            operation,
            inbound: AxisOrder::Forward,
            outbound: AxisOrder::Forward,
        })
    }

    fn build_vertical(
        &self,
        src: &str,
        dst: &str,
        src_class: &Classification,
        dst_class: &Classification,
    ) -> Result<OperationPlan<E::Operation>, BuildError> {
        // A bare vertical source has no horizontal axes; borrow them from dst.
        let lift_source = src_class.is_vertical_only() && !dst_class.is_vertical_only();

        let operation = if lift_source {
            self.lifted_source_operation(src, dst)?
        } else {
            self.engine
                .operation_from_definitions(src, dst)
                .map_err(BuildError::Compile)?
        };

        let (inbound, outbound) = resolve_layouts(src_class, dst_class);

        tracing::debug!(
            src,
            dst,
            lifted = lift_source,
            ?inbound,
            ?outbound,
            "built vertical operation"
        );

        Ok(OperationPlan {
            operation,
            inbound,
            outbound,
        })
    }

    /// Compile from `horizontal(dst) + src` to `dst`, falling back to the bare
    /// identifiers when the compound cannot be synthesized.
    fn lifted_source_operation(&self, src: &str, dst: &str) -> Result<E::Operation, BuildError> {
        match self.synthesize_compound(src, dst) {
            Ok((compound, target)) => self
                .engine
                .operation_between(&compound, &target)
                .map_err(BuildError::Compile),
            Err(err) => {
                tracing::warn!(src, dst, "compound synthesis failed, using identifiers: {err}");
                self.engine
                    .operation_from_definitions(src, dst)
                    .map_err(BuildError::Compile)
            }
        }
    }

    fn synthesize_compound(&self, src: &str, dst: &str) -> Result<(E::Crs, E::Crs), EngineError> {
        let vertical = self.engine.crs_from_definition(src)?;
        let target = self.engine.crs_from_definition(dst)?;
        let horizontal = horizontal_crs(self.engine, &target)?
            .ok_or(EngineError::InvalidArgument("target has no horizontal component"))?;

        let name = format!(
            "{} + {}",
            self.engine.crs_name(&horizontal).as_deref().unwrap_or(dst),
            self.engine.crs_name(&vertical).as_deref().unwrap_or(src),
        );
        let compound = self.engine.compound_crs(&name, &horizontal, &vertical)?;
        Ok((compound, target))
    }
}

/// Inbound/outbound layouts for a pair on the vertical path.
///
/// A vertical-only source feeds the pipeline through dst's horizontal axes, so
/// it takes dst's order. A vertical-only target has no horizontal axes to
/// disagree with, so when it would otherwise be forward it mirrors inbound.
pub fn resolve_layouts(src: &Classification, dst: &Classification) -> (AxisOrder, AxisOrder) {
    let inbound = if src.is_vertical_only() && !dst.is_vertical_only() {
        AxisOrder::from(dst.horizontal_order)
    } else {
        AxisOrder::from(src.horizontal_order)
    };

    let mut outbound = AxisOrder::from(dst.horizontal_order);
    if dst.is_vertical_only() && outbound == AxisOrder::Forward {
        outbound = inbound;
    }

    (inbound, outbound)
}
