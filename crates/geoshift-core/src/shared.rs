//! A session that can be shared between threads.

use std::path::Path;

use parking_lot::{Mutex, MutexGuard};

use crate::coord::Coordinate;
use crate::engine::GeodeticEngine;
use crate::error::{InitError, TransformError};
use crate::session::Session;

/// Mutex-guarded [`Session`].
///
/// Each call holds the lock for its whole duration, so building and storing a
/// cache entry, and evaluating against it, never interleave with another
/// caller.
pub struct SharedSession<E: GeodeticEngine> {
    inner: Mutex<Session<E>>,
}

impl<E: GeodeticEngine> Default for SharedSession<E> {
    fn default() -> Self {
        Self::new(Session::new())
    }
}

impl<E: GeodeticEngine> SharedSession<E> {
    pub fn new(session: Session<E>) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    pub fn init(&self, data_dir: Option<&Path>) -> Result<(), InitError> {
        self.inner.lock().init(data_dir)
    }

    pub fn transform(
        &self,
        src: &str,
        dst: &str,
        coord: Coordinate,
    ) -> Result<Coordinate, TransformError> {
        self.inner.lock().transform(src, dst, coord)
    }

    pub fn clear_cache(&self) {
        self.inner.lock().clear_cache();
    }

    pub fn cleanup(&self) {
        self.inner.lock().cleanup();
    }

    /// Lock the session for a sequence of calls.
    pub fn lock(&self) -> MutexGuard<'_, Session<E>> {
        self.inner.lock()
    }

    pub fn into_inner(self) -> Session<E> {
        self.inner.into_inner()
    }
}
