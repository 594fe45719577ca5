//! Axis-order and robustness probes.
//!
//! The axis probe feeds each case once in the external `(lon, lat)` order and
//! once swapped. The correct order must produce a finite result; the swapped
//! one should be rejected or produce non-finite output, and is flagged as a
//! warning when the engine accepts it. Robustness cases only record what
//! happened.

use geoshift_core::Coordinate;
use geoshift_proj::ProjSession;

use crate::report::{CaseReport, Status, is_finite};

pub const AXIS_SUITE: &str = "axis-order";
pub const ROBUSTNESS_SUITE: &str = "robustness";

#[derive(Debug, Clone, Copy)]
pub struct AxisCase {
    pub label: &'static str,
    pub src: &'static str,
    pub dst: &'static str,
    pub lon: f64,
    pub lat: f64,
    pub z: f64,
}

pub const AXIS_CASES: &[AxisCase] = &[
    AxisCase {
        label: "Tokyo IX",
        src: "EPSG:4326",
        dst: "EPSG:6677",
        lon: 139.7671,
        lat: 35.6812,
        z: 0.0,
    },
    AxisCase {
        label: "Tokyo→JGD2011",
        src: "EPSG:4301",
        dst: "EPSG:6668",
        lon: 139.7671,
        lat: 35.6812,
        z: 0.0,
    },
    AxisCase {
        label: "Geoid",
        src: "EPSG:6667",
        dst: "EPSG:6697",
        lon: 139.7671,
        lat: 35.6812,
        z: 76.0,
    },
    AxisCase {
        label: "JPGEO2024",
        src: "EPSG:6667",
        dst: "EPSG:6695",
        lon: 139.7671,
        lat: 35.6812,
        z: 76.0,
    },
    AxisCase {
        label: "JGD2024",
        src: "EPSG:4979",
        dst: "CZM:JGD2024",
        lon: 139.7671,
        lat: 35.6812,
        z: 76.0,
    },
];

pub fn run_axis(session: &mut ProjSession) -> Vec<CaseReport> {
    let mut reports = Vec::with_capacity(AXIS_CASES.len() * 2);
    for case in AXIS_CASES {
        reports.push(axis_probe(session, case, false));
        reports.push(axis_probe(session, case, true));
    }
    reports
}

fn axis_probe(session: &mut ProjSession, case: &AxisCase, swapped: bool) -> CaseReport {
    let (x, y) = if swapped {
        (case.lat, case.lon)
    } else {
        (case.lon, case.lat)
    };
    let input = Coordinate::xyz(x, y, case.z);
    let label = format!("{} {}", case.label, if swapped { "SWAPPED" } else { "correct" });
    let report = CaseReport::new(AXIS_SUITE, &label, case.src, case.dst, input);

    match session.transform(case.src, case.dst, input) {
        Ok(out) => {
            let status = axis_verdict(swapped, Some(&out));
            let report = report.with_output(out).with_status(status);
            match status {
                Status::Warn => report.with_note("accepted swapped input"),
                Status::Pass if swapped => report.with_note("correctly rejected"),
                _ => report,
            }
        }
        Err(err) if swapped => report
            .with_status(axis_verdict(swapped, None))
            .with_note(format!("correctly rejected: {err}")),
        Err(err) => report.with_error(Status::Fail, &err),
    }
}

/// Verdict for one axis probe; `out` is `None` when the transform failed.
pub fn axis_verdict(swapped: bool, out: Option<&Coordinate>) -> Status {
    let finite = out.is_some_and(|c| c.x.is_finite() && c.y.is_finite());
    match (swapped, finite) {
        (false, true) | (true, false) => Status::Pass,
        (false, false) => Status::Fail,
        (true, true) => Status::Warn,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RobustnessCase {
    pub label: &'static str,
    pub src: &'static str,
    pub dst: &'static str,
    pub input: Coordinate,
}

const fn robust(label: &'static str, src: &'static str, x: f64, y: f64, z: f64) -> RobustnessCase {
    RobustnessCase {
        label,
        src,
        dst: "EPSG:6677",
        input: Coordinate::xyz(x, y, z),
    }
}

pub const ROBUSTNESS_CASES: &[RobustnessCase] = &[
    robust("lat > 90", "EPSG:4326", 139.77, 95.0, 0.0),
    robust("lat = -90", "EPSG:4326", 139.77, -90.0, 0.0),
    robust("lon > 180", "EPSG:4326", 200.0, 35.68, 0.0),
    robust("lon = -180", "EPSG:4326", -180.0, 35.68, 0.0),
    robust("NaN lat", "EPSG:4326", 139.77, f64::NAN, 0.0),
    robust("NaN lon", "EPSG:4326", f64::NAN, 35.68, 0.0),
    robust("Inf lon", "EPSG:4326", f64::INFINITY, 35.68, 0.0),
    robust("NaN z", "EPSG:4326", 139.77, 35.68, f64::NAN),
    robust("London→IX", "EPSG:4326", -0.1278, 51.5074, 0.0),
    robust("New York→IX", "EPSG:4326", -74.006, 40.7128, 0.0),
    robust("Sydney→IX", "EPSG:4326", 151.209, -33.868, 0.0),
    robust("Origin(0,0)→IX", "EPSG:4326", 0.0, 0.0, 0.0),
    robust("Invalid src CRS", "EPSG:9999999", 139.77, 35.68, 0.0),
    robust("Empty src CRS", "", 139.77, 35.68, 0.0),
    robust("Garbage CRS", "not_a_crs", 139.77, 35.68, 0.0),
    robust("Negative Z=-100", "EPSG:4326", 139.77, 35.68, -100.0),
    robust("Z=100000m (100km)", "EPSG:4326", 139.77, 35.68, 100_000.0),
    RobustnessCase {
        label: "Invalid dst CRS",
        src: "EPSG:4326",
        dst: "EPSG:9999999",
        input: Coordinate::xyz(139.77, 35.68, 0.0),
    },
];

pub fn run_robustness(session: &mut ProjSession) -> Vec<CaseReport> {
    ROBUSTNESS_CASES
        .iter()
        .map(|case| {
            let report =
                CaseReport::new(ROBUSTNESS_SUITE, case.label, case.src, case.dst, case.input);
            match session.transform(case.src, case.dst, case.input) {
                Ok(out) if is_finite(&out) => report.with_output(out).with_note("returned"),
                Ok(out) => report.with_output(out).with_note("non-finite"),
                Err(err) => report.with_error(Status::Info, &err),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SuiteSummary;

    #[test]
    fn test_correct_order_must_be_finite() {
        let ok = Coordinate::xy(1.0, 2.0);
        let nan = Coordinate::xy(f64::NAN, 2.0);
        assert_eq!(axis_verdict(false, Some(&ok)), Status::Pass);
        assert_eq!(axis_verdict(false, Some(&nan)), Status::Fail);
        assert_eq!(axis_verdict(false, None), Status::Fail);
    }

    #[test]
    fn test_swapped_order_should_be_rejected() {
        let ok = Coordinate::xy(1.0, 2.0);
        let inf = Coordinate::xy(f64::INFINITY, 2.0);
        assert_eq!(axis_verdict(true, None), Status::Pass);
        assert_eq!(axis_verdict(true, Some(&inf)), Status::Pass);
        assert_eq!(axis_verdict(true, Some(&ok)), Status::Warn);
    }

    #[test]
    fn test_recorded_errors_do_not_fail_the_suite() {
        let err = geoshift_core::TransformError::MissingOrdinate("x");
        let reports: Vec<_> = ROBUSTNESS_CASES
            .iter()
            .map(|c| {
                CaseReport::new(ROBUSTNESS_SUITE, c.label, c.src, c.dst, c.input)
                    .with_error(Status::Info, &err)
            })
            .collect();
        let summary = SuiteSummary::tally(ROBUSTNESS_SUITE, &reports);
        assert!(summary.all_passed());
        assert_eq!(summary.total, ROBUSTNESS_CASES.len());
    }
}
