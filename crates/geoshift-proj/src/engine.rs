use std::ffi::{CString, c_int};
use std::path::{Path, PathBuf};
use std::ptr;
use std::sync::Arc;

use geoshift_core::{AxisDirection, CrsKind, EngineError, GeodeticEngine};

use crate::context::{Context, Object};
use crate::crs::ProjCrs;
use crate::operation::ProjOperation;
use crate::sys;

/// [`GeodeticEngine`] backed by a PROJ context.
///
/// CRS and operation handles keep the context alive, so they may outlive the
/// engine value itself.
pub struct ProjEngine {
    ctx: Arc<Context>,
}

impl ProjEngine {
    fn own(&self, obj: &Object) -> Result<(), EngineError> {
        if obj.belongs_to(&self.ctx) {
            Ok(())
        } else {
            Err(EngineError::InvalidArgument(
                "object was created on another PROJ context",
            ))
        }
    }

    fn crs(
        &self,
        f: impl FnOnce(*mut sys::PjContext) -> *mut sys::Pj,
    ) -> Result<ProjCrs, EngineError> {
        Object::create(&self.ctx, f).map(|obj| ProjCrs { obj })
    }

    fn operation(
        &self,
        f: impl FnOnce(*mut sys::PjContext) -> *mut sys::Pj,
    ) -> Result<ProjOperation, EngineError> {
        Object::create(&self.ctx, f).map(|obj| ProjOperation { obj })
    }
}

impl GeodeticEngine for ProjEngine {
    type Crs = ProjCrs;
    type Operation = ProjOperation;

    fn create() -> Result<Self, EngineError> {
        let ctx = Context::create()?;
        tracing::debug!("created PROJ context");
        Ok(Self { ctx: Arc::new(ctx) })
    }

    fn set_search_paths(&mut self, paths: &[PathBuf]) -> Result<(), EngineError> {
        self.ctx.set_search_paths(paths)
    }

    fn set_database_path(&mut self, path: &Path) -> Result<(), EngineError> {
        self.ctx.set_database_path(path)
    }

    fn crs_from_definition(&self, definition: &str) -> Result<ProjCrs, EngineError> {
        let definition = CString::new(definition)?;
        // SAFETY: context is locked and the definition outlives the call.
        self.crs(|ctx| unsafe { sys::proj_create(ctx, definition.as_ptr()) })
    }

    fn crs_kind(&self, crs: &ProjCrs) -> CrsKind {
        crs.kind()
    }

    fn crs_name(&self, crs: &ProjCrs) -> Option<String> {
        crs.name()
    }

    fn sub_crs(&self, crs: &ProjCrs, index: usize) -> Result<ProjCrs, EngineError> {
        self.own(&crs.obj)?;
        let index =
            c_int::try_from(index).map_err(|_| EngineError::InvalidArgument("sub-CRS index"))?;
        crs.obj.with(|ctx, raw| {
            // SAFETY: context is locked and `raw` is alive.
            self.crs(|_| unsafe { sys::proj_crs_get_sub_crs(ctx, raw, index) })
        })
    }

    fn demote_to_2d(&self, crs: &ProjCrs) -> Result<ProjCrs, EngineError> {
        self.own(&crs.obj)?;
        crs.obj.with(|ctx, raw| {
            // SAFETY: context is locked; a null name keeps the source name.
            self.crs(|_| unsafe { sys::proj_crs_demote_to_2D(ctx, ptr::null(), raw) })
        })
    }

    fn clone_crs(&self, crs: &ProjCrs) -> Result<ProjCrs, EngineError> {
        self.own(&crs.obj)?;
        crs.obj.with(|ctx, raw| {
            // SAFETY: context is locked and `raw` is alive.
            self.crs(|_| unsafe { sys::proj_clone(ctx, raw) })
        })
    }

    fn axis_directions(&self, crs: &ProjCrs) -> Result<Vec<AxisDirection>, EngineError> {
        self.own(&crs.obj)?;
        crs.axis_directions()
    }

    fn compound_crs(
        &self,
        name: &str,
        horizontal: &ProjCrs,
        vertical: &ProjCrs,
    ) -> Result<ProjCrs, EngineError> {
        self.own(&horizontal.obj)?;
        self.own(&vertical.obj)?;
        let name = CString::new(name)?;
        horizontal.obj.with(|ctx, h| {
            vertical.obj.with(|_, v| {
                // SAFETY: context is locked and both members are alive.
                self.crs(|_| unsafe { sys::proj_create_compound_crs(ctx, name.as_ptr(), h, v) })
            })
        })
    }

    fn operation_from_definitions(
        &self,
        src: &str,
        dst: &str,
    ) -> Result<ProjOperation, EngineError> {
        let src = CString::new(src)?;
        let dst = CString::new(dst)?;
        self.operation(|ctx| {
            // SAFETY: context is locked; a null area means no area of interest.
            unsafe {
                sys::proj_create_crs_to_crs(ctx, src.as_ptr(), dst.as_ptr(), ptr::null_mut())
            }
        })
    }

    fn operation_between(
        &self,
        src: &ProjCrs,
        dst: &ProjCrs,
    ) -> Result<ProjOperation, EngineError> {
        self.own(&src.obj)?;
        self.own(&dst.obj)?;
        src.obj.with(|ctx, s| {
            dst.obj.with(|_, d| {
                // SAFETY: context is locked, both CRS are alive, null area and
                // options are allowed.
                self.operation(|_| unsafe {
                    sys::proj_create_crs_to_crs_from_pj(
                        ctx,
                        s,
                        d,
                        ptr::null_mut(),
                        ptr::null(),
                    )
                })
            })
        })
    }

    fn normalize_for_visualization(
        &self,
        op: &ProjOperation,
    ) -> Result<ProjOperation, EngineError> {
        self.own(&op.obj)?;
        op.obj.with(|ctx, raw| {
            // SAFETY: context is locked and `raw` is alive.
            self.operation(|_| unsafe { sys::proj_normalize_for_visualization(ctx, raw) })
        })
    }

    fn forward(&self, op: &ProjOperation, coord: [f64; 4]) -> Result<[f64; 4], EngineError> {
        self.own(&op.obj)?;
        op.forward(coord)
    }
}

impl Drop for ProjEngine {
    fn drop(&mut self) {
        let handles = Arc::strong_count(&self.ctx) - 1;
        if handles > 0 {
            tracing::debug!(handles, "PROJ context outlives engine");
        }
    }
}
