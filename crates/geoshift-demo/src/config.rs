//! Runtime configuration for the demo.

use std::path::PathBuf;

use geoshift_core::SessionConfig;

use crate::error::DemoError;

/// Tracing filter used when neither `RUST_LOG` nor `GEOSHIFT_DEMO_LOG` is set.
const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime configuration for the geoshift demo.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// PROJ data directory (`GEOSHIFT_PROJ_DATA`).
    pub session: SessionConfig,
    /// CSV of reference transforms to compare against.
    pub reference_csv: Option<PathBuf>,
    /// Print one JSON object per case instead of text lines.
    pub json: bool,
    /// Run the axis-order and robustness probes.
    pub probes: bool,
    pub log_filter: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::from_env(),
            reference_csv: std::env::var_os("GEOSHIFT_DEMO_REFERENCE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            json: std::env::var("GEOSHIFT_DEMO_JSON").is_ok(),
            probes: std::env::var("GEOSHIFT_DEMO_SKIP_PROBES").is_err(),
            log_filter: std::env::var("GEOSHIFT_DEMO_LOG")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

impl DemoConfig {
    /// Apply command-line arguments on top of the environment.
    pub fn apply_args(&mut self, args: impl IntoIterator<Item = String>) -> Result<(), DemoError> {
        for arg in args {
            match arg.as_str() {
                "--json" => self.json = true,
                "--no-probes" => self.probes = false,
                flag if flag.starts_with('-') => {
                    return Err(DemoError::Usage(format!("unknown option {flag}")));
                }
                _ if self.reference_csv.is_some() => {
                    return Err(DemoError::Usage(format!("unexpected argument {arg}")));
                }
                _ => self.reference_csv = Some(PathBuf::from(arg)),
            }
        }
        Ok(())
    }
}
