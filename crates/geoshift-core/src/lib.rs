//! geoshift core: cached CRS-to-CRS transforms with a fixed axis convention.
//!
//! Callers always hand in and receive `(east/lon, north/lat, height)`. The
//! engine behind [`GeodeticEngine`] may natively expect the opposite order,
//! and its own normalization cannot be used once a vertical component is
//! involved, so this crate classifies both CRS, decides the axis layout of
//! each compiled operation, and caches the most recent operation.
//!
//! No FFI lives here; see `geoshift-proj` for the PROJ-backed engine.

pub mod axis;
pub mod builder;
pub mod cache;
pub mod classify;
pub mod config;
pub mod coord;
pub mod engine;
pub mod error;
pub mod session;
pub mod shared;

#[cfg(test)]
mod test_support;

// Re-exports for convenience.
pub use axis::{AxisDirection, AxisOrder, HorizontalOrder};
pub use builder::{OperationBuilder, OperationPlan};
pub use cache::{CacheStats, OperationCache};
pub use classify::{Classification, classify, horizontal_crs};
pub use config::SessionConfig;
pub use coord::Coordinate;
pub use engine::{CrsKind, GeodeticEngine};
pub use error::{BuildError, EngineError, InitError, TransformError};
pub use session::Session;
pub use shared::SharedSession;
