use std::ffi::c_int;
use std::ptr;

use geoshift_core::{AxisDirection, CrsKind, EngineError};

use crate::context::Object;
use crate::error::{context_error, cstr_to_string};
use crate::sys::{self, pj_type};

/// A materialized PROJ coordinate reference system.
pub struct ProjCrs {
    pub(crate) obj: Object,
}

impl ProjCrs {
    pub fn kind(&self) -> CrsKind {
        kind_from_pj_type(self.obj.pj_type())
    }

    pub fn name(&self) -> Option<String> {
        self.obj.name()
    }

    /// Directions of the axes of this CRS's coordinate system.
    ///
    /// Fails for CRS types without a single coordinate system, such as
    /// compound CRS.
    pub fn axis_directions(&self) -> Result<Vec<AxisDirection>, EngineError> {
        let cs = Object::create(self.obj.context(), |ctx| {
            // SAFETY: context is locked and `self.obj` is alive.
            self.obj
                .with(|_, crs| unsafe { sys::proj_crs_get_coordinate_system(ctx, crs) })
        })?;

        cs.with(|ctx, cs| {
            // SAFETY: `cs` is a live coordinate system on the locked context.
            let count = unsafe { sys::proj_cs_get_axis_count(ctx, cs) };
            if count < 0 {
                return Err(context_error(ctx));
            }
            (0..count).map(|index| axis_direction(ctx, cs, index)).collect()
        })
    }
}

fn axis_direction(
    ctx: *mut sys::PjContext,
    cs: *mut sys::Pj,
    index: c_int,
) -> Result<AxisDirection, EngineError> {
    let mut direction = ptr::null();
    // SAFETY: index is in range; unused out-params may be null. The direction
    // string is owned by `cs` and copied before returning.
    let ok = unsafe {
        sys::proj_cs_get_axis_info(
            ctx,
            cs,
            index,
            ptr::null_mut(),
            ptr::null_mut(),
            &mut direction,
            ptr::null_mut(),
            ptr::null_mut(),
            ptr::null_mut(),
            ptr::null_mut(),
        )
    };
    if ok == 0 {
        return Err(context_error(ctx));
    }
    Ok(AxisDirection::from_label(
        &cstr_to_string(direction).unwrap_or_default(),
    ))
}

pub(crate) fn kind_from_pj_type(value: c_int) -> CrsKind {
    match value {
        pj_type::GEOGRAPHIC_2D_CRS | pj_type::GEOGRAPHIC_CRS => CrsKind::Geographic2D,
        pj_type::GEOGRAPHIC_3D_CRS => CrsKind::Geographic3D,
        pj_type::GEOCENTRIC_CRS => CrsKind::Geocentric,
        pj_type::PROJECTED_CRS | pj_type::DERIVED_PROJECTED_CRS => CrsKind::Projected,
        pj_type::VERTICAL_CRS => CrsKind::Vertical,
        pj_type::COMPOUND_CRS => CrsKind::Compound,
        pj_type::BOUND_CRS => CrsKind::Bound,
        pj_type::ENGINEERING_CRS => CrsKind::Engineering,
        pj_type::TEMPORAL_CRS => CrsKind::Temporal,
        pj_type::GEODETIC_CRS => CrsKind::Other,
        // Non-CRS objects.
        _ => CrsKind::Other,
    }
}
