//! Forward-then-inverse transforms over a regional table of CRS pairs.
//!
//! Each case transforms its origin from `a` to `b` and back, and passes when
//! the returned coordinate matches the origin within the round-trip
//! tolerances. Cases that depend on grids absent from the data directory show
//! up as errors rather than being skipped.

use geoshift_core::Coordinate;
use geoshift_proj::ProjSession;

use crate::report::{CaseReport, Delta, Status};
use crate::tolerance::{self, is_geographic};

pub const SUITE: &str = "round-trip";

#[derive(Debug, Clone, Copy)]
pub struct RoundTripCase {
    pub label: &'static str,
    pub a: &'static str,
    pub b: &'static str,
    pub origin: Coordinate,
}

const fn case(
    label: &'static str,
    a: &'static str,
    b: &'static str,
    x: f64,
    y: f64,
    z: f64,
) -> RoundTripCase {
    RoundTripCase {
        label,
        a,
        b,
        origin: Coordinate::xyz(x, y, z),
    }
}

const TOKYO: (f64, f64) = (139.7671, 35.6812);
const NYC: (f64, f64) = (-74.0060, 40.7128);

pub const CASES: &[RoundTripCase] = &[
    // Japan: WGS 84 to plane rectangular zones
    case("JP:Tokyo WGS84↔IX", "EPSG:4326", "EPSG:6677", TOKYO.0, TOKYO.1, 0.0),
    case("JP:Osaka WGS84↔VI", "EPSG:4326", "EPSG:6674", 135.5023, 34.6937, 0.0),
    case("JP:Sapporo WGS84↔XII", "EPSG:4326", "EPSG:6680", 141.3469, 43.0621, 0.0),
    case("JP:Naha WGS84↔XV", "EPSG:4326", "EPSG:6683", 127.6811, 26.2124, 0.0),
    case("JP:Yonaguni WGS84↔XVI", "EPSG:4326", "EPSG:6684", 122.9333, 24.4667, 0.0),
    case("JP:Etorofu WGS84↔XIII", "EPSG:4326", "EPSG:6681", 148.8, 45.5, 0.0),
    case("JP:MinamiT WGS84↔XIX", "EPSG:4326", "EPSG:6687", 153.9811, 24.2867, 0.0),
    case("JP:Tokyo JGD2011↔IX", "EPSG:6668", "EPSG:6677", TOKYO.0, TOKYO.1, 0.0),
    case("JP:Tokyo WGS84↔IX Z=50", "EPSG:4326", "EPSG:6677", TOKYO.0, TOKYO.1, 50.0),
    case("JP:Fujisan WGS84↔VIII", "EPSG:4326", "EPSG:6676", 138.7274, 35.3606, 3776.0),
    // Japan: datums
    case("JP:JGD2000↔JGD2011", "EPSG:4612", "EPSG:6668", TOKYO.0, TOKYO.1, 0.0),
    case("JP:Tokyo↔JGD2011", "EPSG:4301", "EPSG:6668", TOKYO.0, TOKYO.1, 0.0),
    case("JP:WGS84↔JGD2000", "EPSG:4326", "EPSG:4612", TOKYO.0, TOKYO.1, 0.0),
    case("JP:4979↔4326 Z=50", "EPSG:4979", "EPSG:4326", TOKYO.0, TOKYO.1, 50.0),
    // Japan: geoids
    case("JP:GSIGEO2011 RT", "EPSG:6667", "EPSG:6697", TOKYO.0, TOKYO.1, 76.0),
    case("JP:JPGEO2024 RT", "EPSG:6667", "EPSG:6695", TOKYO.0, TOKYO.1, 76.0),
    case("JP:WGS84→JGD2024 RT", "EPSG:4979", "CZM:JGD2024", TOKYO.0, TOKYO.1, 76.0),
    // United States
    case("US:NYC NAD27↔NAD83(2011)", "EPSG:4267", "EPSG:6318", NYC.0, NYC.1, 0.0),
    case("US:NYC NAD83↔NAD83(2011)", "EPSG:4269", "EPSG:6318", NYC.0, NYC.1, 0.0),
    case("US:NYC WGS84↔UTM18N", "EPSG:4326", "EPSG:32618", NYC.0, NYC.1, 0.0),
    case("US:SF WGS84↔UTM10N", "EPSG:4326", "EPSG:32610", -122.4194, 37.7749, 0.0),
    case("US:NYC NAD83↔StatePlane", "EPSG:4269", "EPSG:2260", NYC.0, NYC.1, 0.0),
    // Europe
    case("BE:Brussels BD72↔ETRS89", "EPSG:4313", "EPSG:4258", 4.3517, 50.8503, 0.0),
    case("BE:Brussels BL72↔BL2008", "EPSG:31370", "EPSG:3812", 150_327.0, 170_563.0, 0.0),
    case("UK:London OSGB36↔ETRS89", "EPSG:4277", "EPSG:4258", -0.1278, 51.5074, 0.0),
    case("UK:London BNG↔WGS84", "EPSG:27700", "EPSG:4326", 530_000.0, 180_000.0, 0.0),
    case("FR:Paris NTF↔RGF93", "EPSG:4275", "EPSG:4171", 2.3522, 48.8566, 0.0),
    case("DE:Berlin DHDN↔ETRS89", "EPSG:4314", "EPSG:4258", 13.4050, 52.5200, 0.0),
    case("DE:Berlin GK4↔UTM32", "EPSG:31468", "EPSG:25832", 4_587_442.0, 5_822_377.0, 0.0),
    case("CH:Bern CH1903+↔ETRS89", "EPSG:4150", "EPSG:4258", 7.4474, 46.9481, 0.0),
    case("NL:Amsterdam RD↔ETRS89", "EPSG:4289", "EPSG:4258", 4.9041, 52.3676, 0.0),
    case("AT:Vienna MGI↔ETRS89", "EPSG:4312", "EPSG:4258", 16.3738, 48.2082, 0.0),
    case("NO:Oslo NGO48↔ETRS89", "EPSG:4273", "EPSG:4258", 10.7522, 59.9139, 0.0),
    // Oceania
    case("NZ:Wellington NZGD49↔2000", "EPSG:4272", "EPSG:4167", 174.7762, -41.2865, 0.0),
    case("NZ:Wellington WGS84↔NZTM", "EPSG:4326", "EPSG:2193", 174.7762, -41.2865, 0.0),
    case("AU:Sydney GDA94↔GDA2020", "EPSG:4283", "EPSG:7844", 151.2093, -33.8688, 0.0),
    case("AU:Sydney WGS84↔MGA56", "EPSG:4326", "EPSG:28356", 151.2093, -33.8688, 0.0),
    // Global: EGM96 geoid
    case("GL:NYC WGS84↔EGM96", "EPSG:4979", "EPSG:5773", NYC.0, NYC.1, 30.0),
    case("GL:London WGS84↔EGM96", "EPSG:4979", "EPSG:5773", -0.1278, 51.5074, 80.0),
];

pub fn run(session: &mut ProjSession) -> Vec<CaseReport> {
    CASES.iter().map(|case| run_case(session, case)).collect()
}

fn run_case(session: &mut ProjSession, case: &RoundTripCase) -> CaseReport {
    let report = CaseReport::new(SUITE, case.label, case.a, case.b, case.origin);

    let result = session
        .transform(case.a, case.b, case.origin)
        .and_then(|forward| session.transform(case.b, case.a, forward));

    match result {
        Ok(back) => {
            let delta = Delta::between(&back, &case.origin);
            let passed = delta.within(
                round_trip_tolerance(case.a),
                tolerance::ROUND_TRIP_HEIGHT,
            );
            report
                .with_output(back)
                .with_delta(delta)
                .with_status(if passed { Status::Pass } else { Status::Fail })
        }
        Err(err) => {
            tracing::debug!(label = case.label, "round trip failed: {err}");
            report.with_error(Status::Error, &err)
        }
    }
}

/// Horizontal tolerance, chosen by the units of the origin CRS.
pub fn round_trip_tolerance(origin: &str) -> f64 {
    if is_geographic(origin) {
        tolerance::ROUND_TRIP_GEOGRAPHIC
    } else {
        tolerance::ROUND_TRIP_PROJECTED
    }
}
