//! Per-case results and suite summaries.

use std::io::Write;

use geoshift_core::{Coordinate, TransformError};
use serde::Serialize;

use crate::error::DemoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
    /// Accepted input it was expected to reject.
    Warn,
    /// Transform error where success was expected.
    Error,
    /// Recorded without a verdict.
    Info,
}

impl Status {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Warn => "WARN",
            Self::Error => "ERR",
            Self::Info => "INFO",
        }
    }
}

/// Signed differences `got - want`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dz: Option<f64>,
}

impl Delta {
    /// Heights are compared only when both sides carry one.
    pub fn between(got: &Coordinate, want: &Coordinate) -> Self {
        Self {
            dx: got.x - want.x,
            dy: got.y - want.y,
            dz: got.z.zip(want.z).map(|(got, want)| got - want),
        }
    }

    /// NaN differences never pass.
    pub fn within(&self, xy_tolerance: f64, z_tolerance: f64) -> bool {
        self.dx.abs() <= xy_tolerance
            && self.dy.abs() <= xy_tolerance
            && self.dz.is_none_or(|dz| dz.abs() <= z_tolerance)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub suite: &'static str,
    pub label: String,
    pub src: String,
    pub dst: String,
    pub input: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<Delta>,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CaseReport {
    pub fn new(suite: &'static str, label: &str, src: &str, dst: &str, input: Coordinate) -> Self {
        Self {
            suite,
            label: label.to_string(),
            src: src.to_string(),
            dst: dst.to_string(),
            input,
            output: None,
            delta: None,
            status: Status::Info,
            note: None,
        }
    }

    pub fn with_output(mut self, output: Coordinate) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_delta(mut self, delta: Delta) -> Self {
        self.delta = Some(delta);
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Record a transform failure, keeping its numeric code in the note.
    pub fn with_error(self, status: Status, err: &TransformError) -> Self {
        self.with_status(status)
            .with_note(format!("[{}] {err}", err.code()))
    }

    pub fn write_text(&self, out: &mut impl Write) -> Result<(), DemoError> {
        write!(
            out,
            "{:<4} {:<30} {}→{}",
            self.status.label(),
            self.label,
            self.src,
            self.dst
        )?;
        if let Some(output) = &self.output {
            write!(out, "  {}", format_coord(output))?;
        }
        if let Some(delta) = &self.delta {
            write!(out, "  Δ=({:.3e}, {:.3e}", delta.dx, delta.dy)?;
            if let Some(dz) = delta.dz {
                write!(out, ", {dz:.3e}")?;
            }
            write!(out, ")")?;
        }
        if let Some(note) = &self.note {
            write!(out, "  {note}")?;
        }
        writeln!(out)?;
        Ok(())
    }

    pub fn write_json(&self, out: &mut impl Write) -> Result<(), DemoError> {
        serde_json::to_writer(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

fn format_coord(coord: &Coordinate) -> String {
    match coord.z {
        Some(z) => format!("({:.6}, {:.6}, {:.4})", coord.x, coord.y, z),
        None => format!("({:.6}, {:.6})", coord.x, coord.y),
    }
}

/// Whether both planar ordinates (and the height, if any) are finite.
pub fn is_finite(coord: &Coordinate) -> bool {
    coord.x.is_finite() && coord.y.is_finite() && coord.z.is_none_or(f64::is_finite)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuiteSummary {
    pub suite: &'static str,
    pub passed: usize,
    /// Failures and errors.
    pub failed: usize,
    pub warned: usize,
    pub total: usize,
}

impl SuiteSummary {
    pub fn tally(suite: &'static str, reports: &[CaseReport]) -> Self {
        let mut summary = Self {
            suite,
            total: reports.len(),
            ..Self::default()
        };
        for report in reports {
            match report.status {
                Status::Pass => summary.passed += 1,
                Status::Fail | Status::Error => summary.failed += 1,
                Status::Warn => summary.warned += 1,
                Status::Info => {}
            }
        }
        summary
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn write_text(&self, out: &mut impl Write) -> Result<(), DemoError> {
        write!(out, "{}: {}/{} passed", self.suite, self.passed, self.total)?;
        if self.warned > 0 {
            write!(out, ", {} warnings", self.warned)?;
        }
        writeln!(out)?;
        Ok(())
    }
}
