//! Comparison against externally computed reference transforms.
//!
//! The CSV has the header
//! `label,src_crs,dst_crs,in_x,in_y,in_z,expected_x,expected_y,expected_z`.
//! Empty `in_z` is fed as 0; empty `expected_z` skips the height check.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use geoshift_core::Coordinate;
use geoshift_proj::ProjSession;
use serde::Deserialize;

use crate::error::DemoError;
use crate::report::{CaseReport, Delta, Status};
use crate::tolerance::{self, is_geographic};

pub const SUITE: &str = "reference";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReferenceRow {
    pub label: String,
    pub src_crs: String,
    pub dst_crs: String,
    pub in_x: f64,
    pub in_y: f64,
    #[serde(default)]
    pub in_z: Option<f64>,
    pub expected_x: f64,
    pub expected_y: f64,
    #[serde(default)]
    pub expected_z: Option<f64>,
}

impl ReferenceRow {
    fn input(&self) -> Coordinate {
        Coordinate::xyz(self.in_x, self.in_y, self.in_z.unwrap_or(0.0))
    }

    fn expected(&self) -> Coordinate {
        Coordinate {
            x: self.expected_x,
            y: self.expected_y,
            z: self.expected_z,
        }
    }

    /// Horizontal tolerance, chosen by the units of the destination CRS.
    fn xy_tolerance(&self) -> f64 {
        if is_geographic(&self.dst_crs) {
            tolerance::GEOGRAPHIC
        } else {
            tolerance::PROJECTED
        }
    }
}

pub fn read_rows(reader: impl Read) -> Result<Vec<ReferenceRow>, csv::Error> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect()
}

pub fn load(path: &Path) -> Result<Vec<ReferenceRow>, DemoError> {
    let reference = |source| DemoError::Reference {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(|err| reference(csv::Error::from(err)))?;
    let rows = read_rows(file).map_err(reference)?;
    tracing::info!("loaded {} reference rows from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn run(session: &mut ProjSession, rows: &[ReferenceRow]) -> Vec<CaseReport> {
    rows.iter()
        .map(|row| {
            let report =
                CaseReport::new(SUITE, &row.label, &row.src_crs, &row.dst_crs, row.input());
            match session.transform(&row.src_crs, &row.dst_crs, row.input()) {
                Ok(got) => judge(row, got, report),
                Err(err) => report.with_error(Status::Error, &err),
            }
        })
        .collect()
}

fn judge(row: &ReferenceRow, got: Coordinate, report: CaseReport) -> CaseReport {
    let delta = Delta::between(&got, &row.expected());
    let passed = delta.within(row.xy_tolerance(), tolerance::HEIGHT);
    report
        .with_output(got)
        .with_delta(delta)
        .with_status(if passed { Status::Pass } else { Status::Fail })
}
