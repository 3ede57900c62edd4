//! Map-layer composition.
//!
//! Exactly one layer's collection is projected into markers at a time,
//! keyed by a stable per-record identifier. Switching layers replaces the
//! whole marker set; nothing from a previously active layer survives.

use kavach_intel_models::{GeoPoint, RiskTier};

use crate::store::{DashboardState, MapLayer};

/// Popup payload attached to every marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPopup {
    /// Short display label.
    pub label: String,
    /// Descriptive text.
    pub details: String,
    /// Derived risk tier, where the source collection carries one.
    pub tier: Option<RiskTier>,
}

/// One display-ready map marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Stable per-record identifier, unique within the active layer.
    pub id: String,
    /// Plot position. FIR-backed location markers carry none — the wire
    /// record has no coordinates, so they are listed in the side panel
    /// instead of plotted.
    pub position: Option<GeoPoint>,
    /// Area-of-effect radius in meters, for zone markers.
    pub radius: Option<f64>,
    /// Popup payload.
    pub popup: MarkerPopup,
}

/// Projects the active layer's collection into markers.
///
/// The three layers are mutually exclusive: the result contains markers
/// for `state.layer` only.
#[must_use]
pub fn markers(state: &DashboardState) -> Vec<Marker> {
    match state.layer {
        MapLayer::Locations => state
            .firs
            .iter()
            .map(|fir| Marker {
                id: fir.fir_uid.clone(),
                position: None,
                radius: None,
                popup: MarkerPopup {
                    label: fir.fir_uid.clone(),
                    details: format!("BNS {} / {} / {}", fir.bns_section, fir.weapon_type, fir.status),
                    tier: Some(fir.risk),
                },
            })
            .collect(),
        MapLayer::Hotspots => state
            .hotspots
            .iter()
            .enumerate()
            .map(|(idx, hotspot)| Marker {
                id: format!("hotspot-{idx}"),
                position: Some(hotspot.position()),
                radius: None,
                popup: MarkerPopup {
                    label: format!("Hotspot {}", idx + 1),
                    details: format!("Risk score {:.1}", hotspot.risk_score),
                    tier: Some(hotspot.tier()),
                },
            })
            .collect(),
        MapLayer::PredictiveZones => state
            .zones
            .iter()
            .map(|zone| Marker {
                id: zone.id.clone(),
                position: Some(zone.pos),
                radius: Some(zone.radius),
                popup: MarkerPopup {
                    label: zone.label.clone(),
                    details: zone.details.clone(),
                    tier: None,
                },
            })
            .collect(),
    }
}
