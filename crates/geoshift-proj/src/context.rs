use std::ffi::CString;
use std::path::{Path, PathBuf};
use std::ptr::{self, NonNull};
use std::sync::Arc;

use geoshift_core::EngineError;
use parking_lot::ReentrantMutex;

use crate::error::{context_error, cstr_to_string};
use crate::sys;

/// An owned `PJ_CONTEXT`.
///
/// PROJ contexts are single-threaded. Every call that touches the context,
/// or any object created on it, goes through [`Context::with`], which holds
/// the context lock for the duration of the call. The lock is re-entrant so
/// that objects may be created and released while it is held.
pub(crate) struct Context {
    ptr: NonNull<sys::PjContext>,
    lock: ReentrantMutex<()>,
}

// SAFETY: the raw context is only dereferenced by PROJ inside `with`, which
// serializes access through `lock`. `Drop` has exclusive access.
unsafe impl Send for Context {}
// SAFETY: see above.
unsafe impl Sync for Context {}

impl Context {
    pub(crate) fn create() -> Result<Self, EngineError> {
        // SAFETY: FFI constructor returns owned opaque pointer or null on error.
        let ptr = unsafe { sys::proj_context_create() };
        NonNull::new(ptr)
            .map(|ptr| Self {
                ptr,
                lock: ReentrantMutex::new(()),
            })
            .ok_or_else(|| EngineError::engine(0, "proj_context_create returned null"))
    }

    /// Run `f` with the raw context while holding the context lock.
    pub(crate) fn with<R>(&self, f: impl FnOnce(*mut sys::PjContext) -> R) -> R {
        let _guard = self.lock.lock();
        f(self.ptr.as_ptr())
    }

    pub(crate) fn set_search_paths(&self, paths: &[PathBuf]) -> Result<(), EngineError> {
        let paths = paths
            .iter()
            .map(|p| CString::new(p.to_string_lossy().as_bytes()))
            .collect::<Result<Vec<_>, _>>()?;
        let ptrs: Vec<_> = paths.iter().map(|p| p.as_ptr()).collect();
        let count = i32::try_from(ptrs.len())
            .map_err(|_| EngineError::InvalidArgument("too many search paths"))?;

        self.with(|ctx| {
            // SAFETY: `ptrs` holds `count` valid C strings that outlive the call;
            // PROJ copies them.
            unsafe { sys::proj_context_set_search_paths(ctx, count, ptrs.as_ptr()) };
        });
        Ok(())
    }

    pub(crate) fn set_database_path(&self, path: &Path) -> Result<(), EngineError> {
        let path = CString::new(path.to_string_lossy().as_bytes())?;
        self.with(|ctx| {
            // SAFETY: pointers are valid while called; null aux/options are allowed.
            let ok = unsafe {
                sys::proj_context_set_database_path(
                    ctx,
                    path.as_ptr(),
                    ptr::null(),
                    ptr::null(),
                )
            };
            if ok == 0 {
                Err(context_error(ctx))
            } else {
                Ok(())
            }
        })
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        // SAFETY: pointer came from FFI constructor and is owned by this wrapper.
        // Every object holds an `Arc<Context>`, so none outlive it.
        unsafe { sys::proj_context_destroy(self.ptr.as_ptr()) };
    }
}

/// An owned `PJ` object (CRS, coordinate system or operation) tied to the
/// context it was created on.
pub(crate) struct Object {
    ptr: NonNull<sys::Pj>,
    ctx: Arc<Context>,
}

// SAFETY: the object is only used through its context's lock, and keeps the
// context alive through `ctx`.
unsafe impl Send for Object {}

impl Object {
    /// Run a PROJ constructor under the context lock and take ownership of
    /// its result. A null result becomes the context's current error.
    pub(crate) fn create(
        ctx: &Arc<Context>,
        f: impl FnOnce(*mut sys::PjContext) -> *mut sys::Pj,
    ) -> Result<Self, EngineError> {
        ctx.with(|raw| {
            NonNull::new(f(raw))
                .map(|ptr| Self {
                    ptr,
                    ctx: Arc::clone(ctx),
                })
                .ok_or_else(|| context_error(raw))
        })
    }

    /// Run `f` with the raw context and object while holding the context lock.
    pub(crate) fn with<R>(&self, f: impl FnOnce(*mut sys::PjContext, *mut sys::Pj) -> R) -> R {
        self.ctx.with(|raw| f(raw, self.ptr.as_ptr()))
    }

    pub(crate) fn context(&self) -> &Arc<Context> {
        &self.ctx
    }

    pub(crate) fn belongs_to(&self, ctx: &Arc<Context>) -> bool {
        Arc::ptr_eq(&self.ctx, ctx)
    }

    pub(crate) fn pj_type(&self) -> i32 {
        // SAFETY: `self.ptr` is valid for the life of `self`.
        self.with(|_, obj| unsafe { sys::proj_get_type(obj) })
    }

    pub(crate) fn name(&self) -> Option<String> {
        // SAFETY: the returned string is owned by the object and copied under the lock.
        self.with(|_, obj| cstr_to_string(unsafe { sys::proj_get_name(obj) }))
    }
}

impl Drop for Object {
    fn drop(&mut self) {
        let ptr = self.ptr.as_ptr();
        // SAFETY: pointer came from a PROJ constructor and is owned by this wrapper.
        self.ctx.with(|_| unsafe { sys::proj_destroy(ptr) });
    }
}
