use geoshift_core::EngineError;

use crate::context::Object;
use crate::error::errno_message;
use crate::sys;

/// A compiled PROJ coordinate operation.
pub struct ProjOperation {
    pub(crate) obj: Object,
}

impl ProjOperation {
    pub fn name(&self) -> Option<String> {
        self.obj.name()
    }

    /// Evaluate the operation forward on `(x, y, z, t)`.
    ///
    /// The per-operation error state is reset first, so a failure left over
    /// from an earlier call is never reported against this one.
    pub fn forward(&self, coord: [f64; 4]) -> Result<[f64; 4], EngineError> {
        self.obj.with(|ctx, op| {
            // SAFETY: `op` is a live operation on the locked context.
            let (out, code) = unsafe {
                sys::proj_errno_reset(op);
                let out = sys::proj_trans(op, sys::PJ_FWD, sys::PjCoord { v: coord });
                (out, sys::proj_errno(op))
            };
            if code != 0 {
                return Err(EngineError::engine(code, errno_message(ctx, code)));
            }
            Ok(out.v)
        })
    }
}
