//! CRS classification: vertical content and native horizontal axis order.

use crate::axis::HorizontalOrder;
use crate::engine::{CrsKind, GeodeticEngine};
use crate::error::EngineError;

/// What the operation builder needs to know about one CRS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: CrsKind,
    /// Order of the horizontal sub-CRS axes.
    pub horizontal_order: HorizontalOrder,
}

impl Classification {
    pub const fn has_vertical(&self) -> bool {
        self.kind.has_vertical()
    }

    pub const fn is_vertical_only(&self) -> bool {
        self.kind.is_vertical_only()
    }

    pub const fn is_north_or_lat_first(&self) -> bool {
        self.horizontal_order.is_north_first()
    }
}

/// Materialize `crs_id` and classify it. The CRS handle is released before
/// returning.
pub fn classify<E: GeodeticEngine>(
    engine: &E,
    crs_id: &str,
) -> Result<Classification, EngineError> {
    let crs = engine.crs_from_definition(crs_id)?;
    Ok(classify_crs(engine, &crs))
}

/// Classify an already materialized CRS.
pub fn classify_crs<E: GeodeticEngine>(engine: &E, crs: &E::Crs) -> Classification {
    let kind = engine.crs_kind(crs);
    let horizontal_order = horizontal_order(engine, crs, kind);

    tracing::debug!(
        ?kind,
        ?horizontal_order,
        name = engine.crs_name(crs).as_deref().unwrap_or("<unnamed>"),
        "classified CRS"
    );

    Classification {
        kind,
        horizontal_order,
    }
}

fn horizontal_order<E: GeodeticEngine>(engine: &E, crs: &E::Crs, kind: CrsKind) -> HorizontalOrder {
    let axes = if kind == CrsKind::Compound {
        engine
            .sub_crs(crs, 0)
            .and_then(|horizontal| engine.axis_directions(&horizontal))
    } else {
        engine.axis_directions(crs)
    };

    match axes {
        Ok(axes) => HorizontalOrder::from_axes(&axes),
        Err(err) => {
            tracing::debug!("axis directions unavailable, assuming east-first: {err}");
            HorizontalOrder::EastFirst
        }
    }
}

/// Horizontal-only part of `crs`, owned independently of it.
///
/// Compound → horizontal member, 3D geographic → 2D demotion, vertical →
/// `None`, anything else → a clone.
pub fn horizontal_crs<E: GeodeticEngine>(
    engine: &E,
    crs: &E::Crs,
) -> Result<Option<E::Crs>, EngineError> {
    match engine.crs_kind(crs) {
        CrsKind::Compound => engine.sub_crs(crs, 0).map(Some),
        CrsKind::Geographic3D => engine.demote_to_2d(crs).map(Some),
        CrsKind::Vertical => Ok(None),
        _ => engine.clone_crs(crs).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeEngine;

    #[test]
    fn test_geographic_2d_is_north_first_without_vertical() {
        let engine = FakeEngine::create().unwrap();
        let class = classify(&engine, "EPSG:4326").unwrap();
        assert_eq!(class.kind, CrsKind::Geographic2D);
        assert!(!class.has_vertical());
        assert!(!class.is_vertical_only());
        assert!(class.is_north_or_lat_first());
    }

    #[test]
    fn test_projected_is_east_first() {
        let engine = FakeEngine::create().unwrap();
        let class = classify(&engine, "EPSG:3857").unwrap();
        assert!(!class.has_vertical());
        assert!(!class.is_north_or_lat_first());
    }

    #[test]
    fn test_vertical_kinds_are_flagged() {
        let engine = FakeEngine::create().unwrap();

        let geo3d = classify(&engine, "EPSG:4979").unwrap();
        assert!(geo3d.has_vertical());
        assert!(!geo3d.is_vertical_only());
        assert!(geo3d.is_north_or_lat_first());

        let vertical = classify(&engine, "EPSG:5773").unwrap();
        assert!(vertical.has_vertical());
        assert!(vertical.is_vertical_only());
        assert!(!vertical.is_north_or_lat_first());
    }

    #[test]
    fn test_compound_uses_horizontal_member_order() {
        let engine = FakeEngine::create().unwrap();
        let compound = classify(&engine, "EPSG:6697").unwrap();
        assert_eq!(compound.kind, CrsKind::Compound);
        assert!(compound.has_vertical());
        assert!(compound.is_north_or_lat_first());

        let projected_compound = classify(&engine, "EPSG:7405").unwrap();
        assert!(!projected_compound.is_north_or_lat_first());
    }

    #[test]
    fn test_unknown_identifier_fails_and_releases_nothing() {
        let engine = FakeEngine::create().unwrap();
        assert!(classify(&engine, "EPSG:999999").is_err());
        assert!(classify(&engine, "").is_err());
        assert_eq!(engine.counters().live_crs(), 0);
    }

    #[test]
    fn test_classification_releases_transient_handles() {
        let engine = FakeEngine::create().unwrap();
        for id in ["EPSG:4326", "EPSG:6697", "EPSG:5773", "EPSG:4979"] {
            classify(&engine, id).unwrap();
        }
        assert_eq!(engine.counters().live_crs(), 0);
    }

    #[test]
    fn test_horizontal_crs_per_kind() {
        let engine = FakeEngine::create().unwrap();

        let compound = engine.crs_from_definition("EPSG:6697").unwrap();
        let horizontal = horizontal_crs(&engine, &compound).unwrap().unwrap();
        assert_eq!(engine.crs_kind(&horizontal), CrsKind::Geographic2D);

        let geo3d = engine.crs_from_definition("EPSG:4979").unwrap();
        let demoted = horizontal_crs(&engine, &geo3d).unwrap().unwrap();
        assert_eq!(engine.crs_kind(&demoted), CrsKind::Geographic2D);

        let vertical = engine.crs_from_definition("EPSG:5773").unwrap();
        assert!(horizontal_crs(&engine, &vertical).unwrap().is_none());

        let projected = engine.crs_from_definition("EPSG:3857").unwrap();
        let cloned = horizontal_crs(&engine, &projected).unwrap().unwrap();
        assert_eq!(engine.crs_kind(&cloned), CrsKind::Projected);
        drop(projected);
        // The clone stays usable after the source handle is gone.
        assert_eq!(engine.crs_kind(&cloned), CrsKind::Projected);

        drop((compound, horizontal, geo3d, demoted, vertical, cloned));
        assert_eq!(engine.counters().live_crs(), 0);
    }
}
