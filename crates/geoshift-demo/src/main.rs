//! geoshift demo: exercises the PROJ-backed session end to end.
//!
//! Runs a smoke transform, the regional round-trip suite, the axis-order and
//! robustness probes, and optionally a comparison against a reference CSV.
//! Exits non-zero when any case fails.

mod config;
mod error;
mod probes;
mod reference;
mod report;
mod roundtrip;
mod tolerance;

use std::io::{self, Write};
use std::process::ExitCode;

use geoshift_core::Coordinate;
use geoshift_proj::ProjSession;

use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::report::{CaseReport, Status, SuiteSummary, is_finite};

const SMOKE_SUITE: &str = "smoke";

fn main() -> ExitCode {
    let mut config = DemoConfig::default();
    if let Err(err) = config.apply_args(std::env::args().skip(1)) {
        eprintln!("{err}");
        return ExitCode::from(2);
    }
    init_tracing(&config.log_filter);

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

/// Run every configured suite. Returns whether all of them passed.
fn run(config: &DemoConfig) -> Result<bool, DemoError> {
    let mut session = ProjSession::with_config(&config.session)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut suites = vec![
        (SMOKE_SUITE, vec![smoke(&mut session)]),
        (roundtrip::SUITE, roundtrip::run(&mut session)),
    ];
    if config.probes {
        suites.push((probes::AXIS_SUITE, probes::run_axis(&mut session)));
        suites.push((probes::ROBUSTNESS_SUITE, probes::run_robustness(&mut session)));
    }
    if let Some(path) = &config.reference_csv {
        let rows = reference::load(path)?;
        suites.push((reference::SUITE, reference::run(&mut session, &rows)));
    }

    let mut summaries = Vec::with_capacity(suites.len());
    for (suite, reports) in &suites {
        for report in reports {
            if config.json {
                report.write_json(&mut out)?;
            } else {
                report.write_text(&mut out)?;
            }
        }
        summaries.push(SuiteSummary::tally(*suite, reports));
    }

    for summary in &summaries {
        if config.json {
            serde_json::to_writer(&mut out, summary)?;
            writeln!(out)?;
        } else {
            summary.write_text(&mut out)?;
        }
    }

    let stats = session.cache_stats();
    tracing::info!(
        hits = stats.hits,
        misses = stats.misses,
        builds = stats.builds,
        "operation cache"
    );

    Ok(summaries.iter().all(SuiteSummary::all_passed))
}

/// Tokyo from WGS 84 to Web Mercator.
fn smoke(session: &mut ProjSession) -> CaseReport {
    let (src, dst) = ("EPSG:4326", "EPSG:3857");
    let input = Coordinate::xyz(139.6917, 35.6895, 0.0);
    let report = CaseReport::new(SMOKE_SUITE, "Tokyo WGS84→WebMercator", src, dst, input);

    match session.transform(src, dst, input) {
        Ok(out) if is_finite(&out) => {
            tracing::info!(x = out.x, y = out.y, "smoke transform");
            report.with_output(out).with_status(Status::Pass)
        }
        Ok(out) => report
            .with_output(out)
            .with_status(Status::Fail)
            .with_note("non-finite output"),
        Err(err) => report.with_error(Status::Error, &err),
    }
}
