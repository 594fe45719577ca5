use std::ffi::{c_char, c_double, c_int};

#[repr(C)]
pub struct PjContext {
    _private: [u8; 0],
}

#[repr(C)]
pub struct Pj {
    _private: [u8; 0],
}

#[repr(C)]
pub struct PjArea {
    _private: [u8; 0],
}

/// `PJ_COORD`: a union of four doubles in every variant.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct PjCoord {
    pub v: [c_double; 4],
}

/// `PJ_DIRECTION::PJ_FWD`.
pub const PJ_FWD: c_int = 1;

/// `PJ_TYPE` values.
pub mod pj_type {
    use std::ffi::c_int;

    pub const GEODETIC_CRS: c_int = 9;
    pub const GEOCENTRIC_CRS: c_int = 10;
    pub const GEOGRAPHIC_CRS: c_int = 11;
    pub const GEOGRAPHIC_2D_CRS: c_int = 12;
    pub const GEOGRAPHIC_3D_CRS: c_int = 13;
    pub const VERTICAL_CRS: c_int = 14;
    pub const PROJECTED_CRS: c_int = 15;
    pub const COMPOUND_CRS: c_int = 16;
    pub const TEMPORAL_CRS: c_int = 17;
    pub const ENGINEERING_CRS: c_int = 18;
    pub const BOUND_CRS: c_int = 19;
    pub const DERIVED_PROJECTED_CRS: c_int = 28;
}

unsafe extern "C" {
    pub fn proj_context_create() -> *mut PjContext;
    pub fn proj_context_destroy(ctx: *mut PjContext) -> *mut PjContext;
    pub fn proj_context_set_search_paths(
        ctx: *mut PjContext,
        count_paths: c_int,
        paths: *const *const c_char,
    );
    pub fn proj_context_set_database_path(
        ctx: *mut PjContext,
        db_path: *const c_char,
        aux_db_paths: *const *const c_char,
        options: *const *const c_char,
    ) -> c_int;
    pub fn proj_context_errno(ctx: *mut PjContext) -> c_int;
    pub fn proj_context_errno_string(ctx: *mut PjContext, err: c_int) -> *const c_char;

    pub fn proj_create(ctx: *mut PjContext, definition: *const c_char) -> *mut Pj;
    pub fn proj_destroy(p: *mut Pj) -> *mut Pj;
    pub fn proj_clone(ctx: *mut PjContext, obj: *const Pj) -> *mut Pj;
    pub fn proj_get_type(obj: *const Pj) -> c_int;
    pub fn proj_get_name(obj: *const Pj) -> *const c_char;

    pub fn proj_crs_get_sub_crs(ctx: *mut PjContext, crs: *const Pj, index: c_int) -> *mut Pj;
    pub fn proj_crs_demote_to_2D(
        ctx: *mut PjContext,
        crs_2d_name: *const c_char,
        crs_3d: *const Pj,
    ) -> *mut Pj;
    pub fn proj_crs_get_coordinate_system(ctx: *mut PjContext, crs: *const Pj) -> *mut Pj;
    pub fn proj_cs_get_axis_count(ctx: *mut PjContext, cs: *const Pj) -> c_int;
    pub fn proj_cs_get_axis_info(
        ctx: *mut PjContext,
        cs: *const Pj,
        index: c_int,
        out_name: *mut *const c_char,
        out_abbrev: *mut *const c_char,
        out_direction: *mut *const c_char,
        out_unit_conv_factor: *mut c_double,
        out_unit_name: *mut *const c_char,
        out_unit_auth_name: *mut *const c_char,
        out_unit_code: *mut *const c_char,
    ) -> c_int;
    pub fn proj_create_compound_crs(
        ctx: *mut PjContext,
        crs_name: *const c_char,
        horiz_crs: *const Pj,
        vert_crs: *const Pj,
    ) -> *mut Pj;

    pub fn proj_create_crs_to_crs(
        ctx: *mut PjContext,
        source_crs: *const c_char,
        target_crs: *const c_char,
        area: *mut PjArea,
    ) -> *mut Pj;
    pub fn proj_create_crs_to_crs_from_pj(
        ctx: *mut PjContext,
        source_crs: *const Pj,
        target_crs: *const Pj,
        area: *mut PjArea,
        options: *const *const c_char,
    ) -> *mut Pj;
    pub fn proj_normalize_for_visualization(ctx: *mut PjContext, obj: *const Pj) -> *mut Pj;

    pub fn proj_trans(p: *mut Pj, direction: c_int, coord: PjCoord) -> PjCoord;
    pub fn proj_errno(p: *const Pj) -> c_int;
    pub fn proj_errno_reset(p: *mut Pj) -> c_int;
}
