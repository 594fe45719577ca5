use serde::{Deserialize, Serialize};

/// A coordinate in the fixed external convention.
///
/// `x` is easting or longitude, `y` northing or latitude, `z` an optional
/// height. Whatever the native axis order of the CRS involved, callers always
/// read and write this order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Coordinate {
    pub const fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub const fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::xy(x, y)
    }
}

impl From<(f64, f64, f64)> for Coordinate {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::xyz(x, y, z)
    }
}
