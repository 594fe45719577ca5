//! The seam between this crate and a geodetic transformation engine.
//!
//! Everything the core needs from the engine goes through [`GeodeticEngine`].
//! The engine owns pipeline compilation, datum shifts and grid files; the core
//! only decides which pipeline to ask for and how to feed it.

use std::path::{Path, PathBuf};

use crate::axis::AxisDirection;
use crate::error::EngineError;

/// CRS types as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrsKind {
    Geographic2D,
    /// Geographic with ellipsoidal height as third axis.
    Geographic3D,
    Geocentric,
    Projected,
    /// Vertical-only (a height or depth datum).
    Vertical,
    /// Horizontal member plus vertical member.
    Compound,
    Bound,
    Engineering,
    Temporal,
    Other,
}

impl CrsKind {
    /// True for kinds that carry a vertical component.
    pub const fn has_vertical(self) -> bool {
        matches!(self, Self::Geographic3D | Self::Compound | Self::Vertical)
    }

    pub const fn is_vertical_only(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

/// A geodetic engine context.
///
/// One value of an implementing type corresponds to one engine runtime
/// context. `Crs` and `Operation` are owned handles that release their engine
/// resource on drop; they must not outlive the context that created them in a
/// way the engine cannot tolerate, which implementations guarantee themselves.
pub trait GeodeticEngine: Sized {
    /// A materialized coordinate reference system.
    type Crs;
    /// A compiled, directional transformation pipeline.
    type Operation;

    /// Create a fresh engine context.
    fn create() -> Result<Self, EngineError>;

    /// Replace the directories searched for grids and resource files.
    fn set_search_paths(&mut self, paths: &[PathBuf]) -> Result<(), EngineError>;

    /// Point the context at a specific CRS database file.
    fn set_database_path(&mut self, path: &Path) -> Result<(), EngineError>;

    /// Materialize a CRS from an identifier (WKT, `AUTH:CODE`, PROJ string).
    fn crs_from_definition(&self, definition: &str) -> Result<Self::Crs, EngineError>;

    fn crs_kind(&self, crs: &Self::Crs) -> CrsKind;

    fn crs_name(&self, crs: &Self::Crs) -> Option<String>;

    /// Member `index` of a compound CRS.
    fn sub_crs(&self, crs: &Self::Crs, index: usize) -> Result<Self::Crs, EngineError>;

    /// 2D demotion of a 3D CRS.
    fn demote_to_2d(&self, crs: &Self::Crs) -> Result<Self::Crs, EngineError>;

    /// An independently owned copy of `crs`.
    fn clone_crs(&self, crs: &Self::Crs) -> Result<Self::Crs, EngineError>;

    /// Directions of the axes of the CRS coordinate system, in order.
    fn axis_directions(&self, crs: &Self::Crs) -> Result<Vec<AxisDirection>, EngineError>;

    fn compound_crs(
        &self,
        name: &str,
        horizontal: &Self::Crs,
        vertical: &Self::Crs,
    ) -> Result<Self::Crs, EngineError>;

    /// Compile an operation between two CRS given by identifier.
    fn operation_from_definitions(
        &self,
        src: &str,
        dst: &str,
    ) -> Result<Self::Operation, EngineError>;

    /// Compile an operation between two already materialized CRS.
    fn operation_between(
        &self,
        src: &Self::Crs,
        dst: &Self::Crs,
    ) -> Result<Self::Operation, EngineError>;

    /// Return a copy of `op` that consumes and emits east/north axis order.
    fn normalize_for_visualization(
        &self,
        op: &Self::Operation,
    ) -> Result<Self::Operation, EngineError>;

    /// Evaluate `op` forward on `(x, y, z, t)`.
    fn forward(&self, op: &Self::Operation, coord: [f64; 4]) -> Result<[f64; 4], EngineError>;
}
