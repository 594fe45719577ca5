use std::io;
use std::path::PathBuf;

use geoshift_core::InitError;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("{0}\nusage: geoshift-demo [--json] [--no-probes] [REFERENCE_CSV]")]
    Usage(String),
    #[error(transparent)]
    Init(#[from] InitError),
    #[error("cannot read reference file {}: {source}", path.display())]
    Reference { path: PathBuf, source: csv::Error },
    #[error("cannot write report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot write report: {0}")]
    Io(#[from] io::Error),
}
