//! In-memory engine used by the unit tests.
//!
//! Every CRS maps onto one shared canonical point `(lon, lat, ellipsoidal h)`.
//! Operations decode their input in the source's native axis order (or
//! east/north once normalized) and encode into the target's native order,
//! which is enough to observe every axis-layout decision the core makes.
//! Live handles, compilations and evaluations are counted.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicIsize, AtomicUsize, Ordering};

use crate::axis::{AxisDirection, HorizontalOrder};
use crate::engine::{CrsKind, GeodeticEngine};
use crate::error::EngineError;

const PROJ_ERR_OTHER: i32 = 4096;
const PROJ_ERR_COORD_TRANSFM_OUTSIDE_PROJECTION_DOMAIN: i32 = 2050;

static NEXT_ENGINE_ID: AtomicUsize = AtomicUsize::new(1);

#[derive(Debug, Default)]
pub struct Counters {
    live_crs: AtomicIsize,
    live_operations: AtomicIsize,
    materializations: AtomicUsize,
    compilations: AtomicUsize,
    normalizations: AtomicUsize,
    evaluations: AtomicUsize,
}

impl Counters {
    pub fn live_crs(&self) -> isize {
        self.live_crs.load(Ordering::SeqCst)
    }

    pub fn live_operations(&self) -> isize {
        self.live_operations.load(Ordering::SeqCst)
    }

    pub fn materializations(&self) -> usize {
        self.materializations.load(Ordering::SeqCst)
    }

    pub fn compilations(&self) -> usize {
        self.compilations.load(Ordering::SeqCst)
    }

    pub fn normalizations(&self) -> usize {
        self.normalizations.load(Ordering::SeqCst)
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }
}

/// Decrements a live counter when dropped.
#[derive(Debug)]
struct LiveGuard {
    counters: Arc<Counters>,
    operation: bool,
}

impl LiveGuard {
    fn crs(counters: &Arc<Counters>) -> Self {
        counters.live_crs.fetch_add(1, Ordering::SeqCst);
        Self {
            counters: Arc::clone(counters),
            operation: false,
        }
    }

    fn operation(counters: &Arc<Counters>) -> Self {
        counters.live_operations.fetch_add(1, Ordering::SeqCst);
        Self {
            counters: Arc::clone(counters),
            operation: true,
        }
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        let counter = if self.operation {
            &self.counters.live_operations
        } else {
            &self.counters.live_crs
        };
        counter.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
struct CrsDef {
    name: String,
    kind: CrsKind,
    axes: Vec<AxisDirection>,
    /// Native horizontal units per degree.
    scale: f64,
    false_easting: f64,
    /// Geoid separation for vertical datums.
    height_offset: f64,
    members: Vec<CrsDef>,
    unreachable: bool,
    synthesized: bool,
}

impl CrsDef {
    fn new(name: &str, kind: CrsKind, axes: &[AxisDirection]) -> Self {
        Self {
            name: name.to_string(),
            kind,
            axes: axes.to_vec(),
            scale: 1.0,
            false_easting: 0.0,
            height_offset: 0.0,
            members: Vec::new(),
            unreachable: false,
            synthesized: false,
        }
    }

    fn projected(name: &str, scale: f64, false_easting: f64) -> Self {
        use AxisDirection::*;
        Self {
            scale,
            false_easting,
            ..Self::new(name, CrsKind::Projected, &[East, North])
        }
    }

    fn vertical(name: &str, height_offset: f64) -> Self {
        Self {
            height_offset,
            ..Self::new(name, CrsKind::Vertical, &[AxisDirection::Up])
        }
    }

    fn compound(name: &str, horizontal: CrsDef, vertical: CrsDef) -> Self {
        Self {
            members: vec![horizontal, vertical],
            ..Self::new(name, CrsKind::Compound, &[])
        }
    }

    fn horizontal(&self) -> Option<&CrsDef> {
        match self.kind {
            CrsKind::Compound => self.members.first(),
            CrsKind::Vertical => None,
            _ => Some(self),
        }
    }

    /// Vertical datum offset, or `None` when the CRS carries no height.
    fn height_offset(&self) -> Option<f64> {
        match self.kind {
            CrsKind::Geographic3D => Some(0.0),
            CrsKind::Vertical => Some(self.height_offset),
            CrsKind::Compound => self.members.get(1).map(|v| v.height_offset),
            _ => None,
        }
    }

    fn north_first(&self, normalized: bool) -> bool {
        !normalized && HorizontalOrder::from_axes(&self.axes).is_north_first()
    }

    fn decode_horizontal(&self, a: f64, b: f64, normalized: bool) -> (f64, f64) {
        let (east, north) = if self.north_first(normalized) { (b, a) } else { (a, b) };
        ((east - self.false_easting) / self.scale, north / self.scale)
    }

    fn encode_horizontal(&self, lon: f64, lat: f64, normalized: bool) -> (f64, f64) {
        let east = lon * self.scale + self.false_easting;
        let north = lat * self.scale;
        if self.north_first(normalized) { (north, east) } else { (east, north) }
    }
}

fn catalog(id: &str) -> Option<CrsDef> {
    use AxisDirection::*;

    let wgs84 = || CrsDef::new("WGS 84", CrsKind::Geographic2D, &[North, East]);
    let jgd2011 = || CrsDef::new("JGD2011", CrsKind::Geographic2D, &[North, East]);
    let bng = || CrsDef::projected("OSGB36 / British National Grid", 100_000.0, 400_000.0);
    let jgd_height = || CrsDef::vertical("JGD2011 (vertical) height", 40.0);
    let odn = || CrsDef::vertical("ODN height", 50.0);

    let def = match id {
        "EPSG:4326" => wgs84(),
        "OGC:CRS84" => CrsDef::new("WGS 84 (CRS84)", CrsKind::Geographic2D, &[East, North]),
        "EPSG:4979" => CrsDef::new("WGS 84", CrsKind::Geographic3D, &[North, East, Up]),
        "EPSG:6668" => jgd2011(),
        "EPSG:3857" => CrsDef::projected("WGS 84 / Pseudo-Mercator", 100_000.0, 0.0),
        "EPSG:32618" => CrsDef::projected("WGS 84 / UTM zone 18N", 100_000.0, 500_000.0),
        "EPSG:27700" => bng(),
        "EPSG:5773" => CrsDef::vertical("EGM96 height", 30.0),
        "EPSG:6695" => jgd_height(),
        "EPSG:5701" => odn(),
        "EPSG:6697" => CrsDef::compound(
            "JGD2011 + JGD2011 (vertical) height",
            jgd2011(),
            jgd_height(),
        ),
        "EPSG:7405" => {
            CrsDef::compound("OSGB36 / British National Grid + ODN height", bng(), odn())
        }
        "EPSG:2000" => CrsDef {
            unreachable: true,
            ..CrsDef::new(
                "Anguilla 1957 / British West Indies Grid",
                CrsKind::Engineering,
                &[East, North],
            )
        },
        _ => return None,
    };
    Some(def)
}

fn not_found(id: &str) -> EngineError {
    EngineError::engine(PROJ_ERR_OTHER, format!("crs not found: {id}"))
}

#[derive(Debug)]
pub struct FakeCrs {
    def: CrsDef,
    _live: LiveGuard,
}

#[derive(Debug)]
pub struct FakeOperation {
    src: CrsDef,
    dst: CrsDef,
    normalized: bool,
    _live: LiveGuard,
}

impl FakeOperation {
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    pub fn source_is_synthesized(&self) -> bool {
        self.src.synthesized
    }

    pub fn source_name(&self) -> &str {
        &self.src.name
    }
}

#[derive(Debug)]
pub struct FakeEngine {
    id: usize,
    counters: Arc<Counters>,
    search_paths: Vec<PathBuf>,
    database_path: Option<PathBuf>,
    fail_compound: AtomicBool,
}

impl FakeEngine {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Counters that outlive the engine itself.
    pub fn shared_counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    pub fn database_path(&self) -> Option<&Path> {
        self.database_path.as_deref()
    }

    pub fn fail_compound_synthesis(&self, fail: bool) {
        self.fail_compound.store(fail, Ordering::SeqCst);
    }

    fn handle(&self, def: CrsDef) -> FakeCrs {
        FakeCrs {
            def,
            _live: LiveGuard::crs(&self.counters),
        }
    }

    fn compile(&self, src: CrsDef, dst: CrsDef) -> Result<FakeOperation, EngineError> {
        self.counters.compilations.fetch_add(1, Ordering::SeqCst);
        if src.unreachable || dst.unreachable {
            return Err(EngineError::engine(
                PROJ_ERR_OTHER,
                format!("no operation found between {} and {}", src.name, dst.name),
            ));
        }
        Ok(FakeOperation {
            src,
            dst,
            normalized: false,
            _live: LiveGuard::operation(&self.counters),
        })
    }
}

impl GeodeticEngine for FakeEngine {
    type Crs = FakeCrs;
    type Operation = FakeOperation;

    fn create() -> Result<Self, EngineError> {
        Ok(Self {
            id: NEXT_ENGINE_ID.fetch_add(1, Ordering::SeqCst),
            counters: Arc::default(),
            search_paths: Vec::new(),
            database_path: None,
            fail_compound: AtomicBool::new(false),
        })
    }

    fn set_search_paths(&mut self, paths: &[PathBuf]) -> Result<(), EngineError> {
        self.search_paths = paths.to_vec();
        Ok(())
    }

    fn set_database_path(&mut self, path: &Path) -> Result<(), EngineError> {
        self.database_path = Some(path.to_path_buf());
        Ok(())
    }

    fn crs_from_definition(&self, definition: &str) -> Result<FakeCrs, EngineError> {
        self.counters.materializations.fetch_add(1, Ordering::SeqCst);
        let def = catalog(definition).ok_or_else(|| not_found(definition))?;
        Ok(self.handle(def))
    }

    fn crs_kind(&self, crs: &FakeCrs) -> CrsKind {
        crs.def.kind
    }

    fn crs_name(&self, crs: &FakeCrs) -> Option<String> {
        Some(crs.def.name.clone())
    }

    fn sub_crs(&self, crs: &FakeCrs, index: usize) -> Result<FakeCrs, EngineError> {
        let member = crs
            .def
            .members
            .get(index)
            .ok_or(EngineError::InvalidArgument("not a compound CRS"))?;
        Ok(self.handle(member.clone()))
    }

    fn demote_to_2d(&self, crs: &FakeCrs) -> Result<FakeCrs, EngineError> {
        if crs.def.kind != CrsKind::Geographic3D {
            return Err(EngineError::InvalidArgument("not a 3D geographic CRS"));
        }
        let mut def = crs.def.clone();
        def.kind = CrsKind::Geographic2D;
        def.axes.truncate(2);
        Ok(self.handle(def))
    }

    fn clone_crs(&self, crs: &FakeCrs) -> Result<FakeCrs, EngineError> {
        Ok(self.handle(crs.def.clone()))
    }

    fn axis_directions(&self, crs: &FakeCrs) -> Result<Vec<AxisDirection>, EngineError> {
        if crs.def.kind == CrsKind::Compound {
            return Err(EngineError::InvalidArgument("compound CRS has no coordinate system"));
        }
        Ok(crs.def.axes.clone())
    }

    fn compound_crs(
        &self,
        name: &str,
        horizontal: &FakeCrs,
        vertical: &FakeCrs,
    ) -> Result<FakeCrs, EngineError> {
        if self.fail_compound.load(Ordering::SeqCst) {
            return Err(EngineError::engine(PROJ_ERR_OTHER, "compound synthesis disabled"));
        }
        if vertical.def.kind != CrsKind::Vertical || horizontal.def.kind.has_vertical() {
            return Err(EngineError::InvalidArgument("invalid compound members"));
        }
        let mut def = CrsDef::compound(name, horizontal.def.clone(), vertical.def.clone());
        def.synthesized = true;
        Ok(self.handle(def))
    }

    fn operation_from_definitions(
        &self,
        src: &str,
        dst: &str,
    ) -> Result<FakeOperation, EngineError> {
        let src = catalog(src).ok_or_else(|| not_found(src))?;
        let dst = catalog(dst).ok_or_else(|| not_found(dst))?;
        self.compile(src, dst)
    }

    fn operation_between(
        &self,
        src: &FakeCrs,
        dst: &FakeCrs,
    ) -> Result<FakeOperation, EngineError> {
        self.compile(src.def.clone(), dst.def.clone())
    }

    fn normalize_for_visualization(
        &self,
        op: &FakeOperation,
    ) -> Result<FakeOperation, EngineError> {
        self.counters.normalizations.fetch_add(1, Ordering::SeqCst);
        Ok(FakeOperation {
            src: op.src.clone(),
            dst: op.dst.clone(),
            normalized: true,
            _live: LiveGuard::operation(&self.counters),
        })
    }

    fn forward(&self, op: &FakeOperation, coord: [f64; 4]) -> Result<[f64; 4], EngineError> {
        self.counters.evaluations.fetch_add(1, Ordering::SeqCst);
        let [a, b, c, t] = coord;

        // Without horizontal axes on both sides the pipeline only touches z.
        let (x, y) = match (op.src.horizontal(), op.dst.horizontal()) {
            (Some(src), Some(dst)) => {
                let (lon, lat) = src.decode_horizontal(a, b, op.normalized);
                if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
                    return Err(EngineError::engine(
                        PROJ_ERR_COORD_TRANSFM_OUTSIDE_PROJECTION_DOMAIN,
                        "Point outside of projection domain",
                    ));
                }
                dst.encode_horizontal(lon, lat, op.normalized)
            }
            _ => (a, b),
        };

        let h = match op.src.height_offset() {
            Some(offset) => c + offset,
            None => c,
        };
        let z = match op.dst.height_offset() {
            Some(offset) => h - offset,
            None => h,
        };

        Ok([x, y, z, t])
    }
}
