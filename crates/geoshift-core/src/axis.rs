//! Axis directions and the horizontal axis layout contract.

use serde::{Deserialize, Serialize};

/// Direction of a single coordinate-system axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisDirection {
    North,
    South,
    East,
    West,
    Up,
    Down,
    /// Anything else the engine reports, kept verbatim.
    Other(String),
}

impl AxisDirection {
    /// Parse an engine direction label. Only the exact lowercase labels map
    /// to a known direction.
    pub fn from_label(label: &str) -> Self {
        const KNOWN: [(&str, AxisDirection); 6] = [
            ("north", AxisDirection::North),
            ("south", AxisDirection::South),
            ("east", AxisDirection::East),
            ("west", AxisDirection::West),
            ("up", AxisDirection::Up),
            ("down", AxisDirection::Down),
        ];

        KNOWN
            .into_iter()
            .find(|(name, _)| label == *name)
            .map(|(_, dir)| dir)
            .unwrap_or_else(|| Self::Other(label.to_string()))
    }
}

/// Native horizontal order of a CRS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalOrder {
    /// Easting/longitude first. Also used for anything that is not exactly
    /// north-then-east.
    #[default]
    EastFirst,
    /// Northing/latitude first.
    NorthFirst,
}

impl HorizontalOrder {
    /// Decide the order from the leading axes of a coordinate system.
    ///
    /// Only an exact `(north, east)` prefix counts as north-first.
    pub fn from_axes(axes: &[AxisDirection]) -> Self {
        match axes {
            [AxisDirection::North, AxisDirection::East, ..] => Self::NorthFirst,
            _ => Self::EastFirst,
        }
    }

    pub const fn is_north_first(self) -> bool {
        matches!(self, Self::NorthFirst)
    }
}

/// Whether the first two ordinates must be exchanged at a pipeline boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisOrder {
    /// Pass `(x, y)` through unchanged.
    #[default]
    Forward,
    /// Exchange `(x, y)` into `(y, x)`.
    Swapped,
}

impl AxisOrder {
    pub const fn is_swapped(self) -> bool {
        matches!(self, Self::Swapped)
    }

    /// Apply this layout to a horizontal pair.
    #[inline]
    pub const fn apply(self, a: f64, b: f64) -> (f64, f64) {
        match self {
            Self::Forward => (a, b),
            Self::Swapped => (b, a),
        }
    }
}

impl From<HorizontalOrder> for AxisOrder {
    fn from(order: HorizontalOrder) -> Self {
        match order {
            HorizontalOrder::EastFirst => Self::Forward,
            HorizontalOrder::NorthFirst => Self::Swapped,
        }
    }
}
