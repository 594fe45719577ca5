//! Pass thresholds for the suites, in CRS units (degrees or metres).

/// Reference comparison, geographic destination.
pub const GEOGRAPHIC: f64 = 1e-6;
/// Reference comparison, projected destination.
pub const PROJECTED: f64 = 0.01;
pub const HEIGHT: f64 = 0.01;

pub const ROUND_TRIP_GEOGRAPHIC: f64 = 1e-8;
pub const ROUND_TRIP_PROJECTED: f64 = 0.001;
pub const ROUND_TRIP_HEIGHT: f64 = 0.001;

/// EPSG codes whose horizontal ordinates are degrees (geographic 2D/3D,
/// compound with a geographic member, and vertical-only CRS that inherit
/// one).
const GEOGRAPHIC_CODES: &[&str] = &[
    "4150", "4167", "4171", "4258", "4267", "4269", "4271", "4272", "4273", "4275", "4277",
    "4283", "4289", "4312", "4313", "4314", "4326", "4612", "4617", "4979", "5773", "6318",
    "6319", "6667", "6668", "6695", "6697", "7844",
];

/// Whether `id` names a CRS with angular horizontal ordinates.
pub fn is_geographic(id: &str) -> bool {
    if id.contains("CZM:") {
        return true;
    }
    id.strip_prefix("EPSG:")
        .is_some_and(|code| GEOGRAPHIC_CODES.contains(&code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_geographic_codes() {
        assert!(is_geographic("EPSG:4326"));
        assert!(is_geographic("EPSG:6697"));
        assert!(is_geographic("EPSG:5773"));
        assert!(is_geographic("CZM:JGD2024"));
    }

    #[test]
    fn test_projected_and_partial_matches() {
        assert!(!is_geographic("EPSG:3857"));
        assert!(!is_geographic("EPSG:32618"));
        assert!(!is_geographic("EPSG:43260"));
        assert!(!is_geographic("epsg:4326"));
        assert!(!is_geographic(""));
    }
}
