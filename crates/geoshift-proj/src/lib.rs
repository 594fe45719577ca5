//! PROJ-backed engine for geoshift.
//!
//! A safe wrapper over the parts of the PROJ C API that
//! [`geoshift_core::GeodeticEngine`] needs. Requires PROJ 8 or newer.
#![allow(unsafe_code)]
// FFI wrappers necessarily use unsafe externs and raw pointers.

mod context;
mod crs;
mod engine;
mod error;
mod operation;
mod sys;

pub use crs::ProjCrs;
pub use engine::ProjEngine;
pub use operation::ProjOperation;

/// A transform session on PROJ.
pub type ProjSession = geoshift_core::Session<ProjEngine>;

/// A thread-shareable transform session on PROJ.
pub type SharedProjSession = geoshift_core::SharedSession<ProjEngine>;
