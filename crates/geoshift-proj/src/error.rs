use std::ffi::{CStr, c_char, c_int};

use geoshift_core::EngineError;

use crate::sys;

/// Message PROJ associates with error `code`.
///
/// The caller must hold the lock of the context behind `ctx`.
pub(crate) fn errno_message(ctx: *mut sys::PjContext, code: c_int) -> String {
    // SAFETY: `ctx` is live and locked; PROJ returns null or a NUL-terminated
    // string owned by the context, copied before the lock is released.
    let ptr = unsafe { sys::proj_context_errno_string(ctx, code) };
    cstr_to_string(ptr).unwrap_or_else(|| format!("unknown PROJ error {code}"))
}

/// Error for a PROJ call on `ctx` that returned null or a failure flag.
///
/// The caller must hold the lock of the context behind `ctx`.
pub(crate) fn context_error(ctx: *mut sys::PjContext) -> EngineError {
    // SAFETY: `ctx` is live and locked.
    let code = unsafe { sys::proj_context_errno(ctx) };
    if code == 0 {
        return EngineError::engine(0, "PROJ call failed without setting an error");
    }
    EngineError::engine(code, errno_message(ctx, code))
}

pub(crate) fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: FFI contract returns valid NUL-terminated strings.
    let s = unsafe { CStr::from_ptr(ptr) }.to_string_lossy();
    if s.is_empty() {
        None
    } else {
        Some(s.into_owned())
    }
}
