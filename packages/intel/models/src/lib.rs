#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Wire and domain types for the KAVACH crime intelligence dashboard.
//!
//! Everything the backend serves is a transient data-transfer shape: records
//! are fetched, rendered, and discarded when the consuming view unmounts.
//! Field spellings follow the backend's JSON exactly (`FIR_UID`,
//! `Risk_Score`, ...), so these types deserialize the live responses without
//! a translation layer.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Categorical risk bucket derived from a numeric score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum RiskTier {
    /// Routine monitoring only.
    Low = 1,
    /// Elevated attention.
    Medium = 2,
    /// Priority response.
    High = 3,
    /// Immediate escalation.
    Critical = 4,
}

impl RiskTier {
    /// Returns the numeric value of this tier (1-4).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Derives a tier from a hotspot feed score.
    ///
    /// Hotspot scores arrive on a 0-10 scale. Boundaries are exclusive:
    /// exactly 7.0 is `High` and exactly 4.0 is `Medium`. The hotspot feed
    /// never produces `Low`.
    #[must_use]
    pub fn from_hotspot_score(score: f64) -> Self {
        if score > 7.0 {
            Self::Critical
        } else if score > 4.0 {
            Self::High
        } else {
            Self::Medium
        }
    }

    /// Derives a tier from a live prediction service score.
    ///
    /// The prediction service reports on a 0-100 scale but this call site
    /// has always cut at 8 and 5, matching the historical display. Kept as
    /// a separate constructor from [`Self::from_hotspot_score`] rather than
    /// unified; see the workspace design notes.
    #[must_use]
    pub fn from_prediction_score(score: f64) -> Self {
        if score > 8.0 {
            Self::Critical
        } else if score > 5.0 {
            Self::High
        } else {
            Self::Medium
        }
    }
}

/// Display band for the composite risk index on the calculator panel.
///
/// Distinct from [`RiskTier`]: the calculator renders three colour bands
/// over the 0-100 composite index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
pub enum RiskBand {
    /// Index 0-50.
    Guarded,
    /// Index 51-80.
    Elevated,
    /// Index 81-100.
    Severe,
}

impl RiskBand {
    /// Classifies a composite risk index (0-100) into its display band.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        if index > 80 {
            Self::Severe
        } else if index > 50 {
            Self::Elevated
        } else {
            Self::Guarded
        }
    }
}

/// Case status of a First Information Report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum FirStatus {
    /// Preliminary inquiry open.
    Inquiry,
    /// Suspect in custody.
    Arrested,
    /// Awaiting assignment.
    Pending,
    /// Case closed.
    Closed,
    /// Before the court.
    Trial,
}

/// A First Information Report as served by `GET /firs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirRecord {
    /// Unique case identifier (e.g. `"FIR-2023-001"`).
    #[serde(rename = "FIR_UID")]
    pub fir_uid: String,
    /// BNS section code classifying the offense (e.g. `"111"`).
    #[serde(rename = "BNS_Section")]
    pub bns_section: String,
    /// Weapon or offense category (e.g. `"Organized Crime"`). Doubles as
    /// the category-filter field in the listing view.
    #[serde(rename = "Weapon_Type")]
    pub weapon_type: String,
    /// Current case status.
    #[serde(rename = "Status")]
    pub status: FirStatus,
    /// Assessed risk tier.
    #[serde(rename = "Risk")]
    pub risk: RiskTier,
}

/// A geographic coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east.
    pub longitude: f64,
}

/// A geographic point with an associated risk score, served by
/// `GET /hotspots`.
///
/// The wire shape carries no identifier; consumers derive a stable id from
/// the record's position in the feed (ordering is preserved end to end).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Degrees north.
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    /// Degrees east.
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    /// Numeric risk score on the hotspot feed's 0-10 scale.
    #[serde(rename = "Risk_Score")]
    pub risk_score: f64,
}

impl Hotspot {
    /// Returns the coordinate pair.
    #[must_use]
    pub const fn position(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Derives the risk tier from this hotspot's score.
    #[must_use]
    pub fn tier(&self) -> RiskTier {
        RiskTier::from_hotspot_score(self.risk_score)
    }
}

/// A geographic area flagged by the forecasting process, served by
/// `GET /predictive-zones`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictiveZone {
    /// Stable zone identifier.
    pub id: String,
    /// Zone centre, serialized as a `[latitude, longitude]` pair.
    #[serde(with = "lat_lng_pair")]
    pub pos: GeoPoint,
    /// Short display label.
    pub label: String,
    /// Descriptive text for the popup.
    pub details: String,
    /// Area-of-effect radius in meters.
    pub radius: f64,
}

/// Serde adapter for coordinates wired as a two-element `[lat, lng]` array.
mod lat_lng_pair {
    use serde::{Deserialize, Deserializer, Serialize as _, Serializer};

    use super::GeoPoint;

    pub fn serialize<S: Serializer>(point: &GeoPoint, serializer: S) -> Result<S::Ok, S::Error> {
        [point.latitude, point.longitude].serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GeoPoint, D::Error> {
        let [latitude, longitude] = <[f64; 2]>::deserialize(deserializer)?;
        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }
}

/// Per-section case tally from `GET /bns-stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTally {
    /// BNS section code (e.g. `"303"`).
    pub section: String,
    /// Human-readable label (e.g. `"BNS 303 (Theft)"`).
    pub label: String,
    /// Case count over the reporting window.
    pub count: u64,
}

/// Time-of-day category for prediction requests.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

/// Request body for `POST /predict`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east.
    pub longitude: f64,
    /// Time-of-day category.
    pub time_of_day: TimeOfDay,
    /// Distance to the nearest police station, in kilometers.
    pub dist_to_ps: f64,
}

/// Response body for `POST /predict`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Predicted risk score.
    pub risk_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotspot_tier_boundaries() {
        assert_eq!(RiskTier::from_hotspot_score(7.5), RiskTier::Critical);
        assert_eq!(RiskTier::from_hotspot_score(8.0), RiskTier::Critical);
        assert_eq!(RiskTier::from_hotspot_score(7.0), RiskTier::High);
        assert_eq!(RiskTier::from_hotspot_score(4.0), RiskTier::Medium);
        assert_eq!(RiskTier::from_hotspot_score(4.1), RiskTier::High);
        assert_eq!(RiskTier::from_hotspot_score(0.0), RiskTier::Medium);
    }

    #[test]
    fn prediction_tier_boundaries() {
        assert_eq!(RiskTier::from_prediction_score(8.5), RiskTier::Critical);
        assert_eq!(RiskTier::from_prediction_score(8.0), RiskTier::High);
        assert_eq!(RiskTier::from_prediction_score(5.0), RiskTier::Medium);
        assert_eq!(RiskTier::from_prediction_score(6.2), RiskTier::High);
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(RiskBand::from_index(81), RiskBand::Severe);
        assert_eq!(RiskBand::from_index(80), RiskBand::Elevated);
        assert_eq!(RiskBand::from_index(51), RiskBand::Elevated);
        assert_eq!(RiskBand::from_index(50), RiskBand::Guarded);
        assert_eq!(RiskBand::from_index(0), RiskBand::Guarded);
        assert_eq!(RiskBand::from_index(100), RiskBand::Severe);
    }

    #[test]
    fn fir_record_wire_shape() {
        let json = r#"{
            "FIR_UID": "FIR-2023-001",
            "BNS_Section": "111",
            "Weapon_Type": "Organized Crime",
            "Status": "Inquiry",
            "Risk": "High"
        }"#;
        let record: FirRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.fir_uid, "FIR-2023-001");
        assert_eq!(record.bns_section, "111");
        assert_eq!(record.status, FirStatus::Inquiry);
        assert_eq!(record.risk, RiskTier::High);
    }

    #[test]
    fn hotspot_wire_shape() {
        let json = r#"[{"Latitude": 19.04, "Longitude": 72.86, "Risk_Score": 7.5}]"#;
        let hotspots: Vec<Hotspot> = serde_json::from_str(json).unwrap();
        assert_eq!(hotspots.len(), 1);
        assert_eq!(hotspots[0].tier(), RiskTier::Critical);
        let pos = hotspots[0].position();
        assert!((pos.latitude - 19.04).abs() < f64::EPSILON);
    }

    #[test]
    fn zone_pos_round_trips_as_pair() {
        let json = r#"{
            "id": "zone-7",
            "pos": [19.0728, 72.8826],
            "label": "Kurla-Sion Corridor",
            "details": "Forecast concentration of section 303 activity",
            "radius": 750.0
        }"#;
        let zone: PredictiveZone = serde_json::from_str(json).unwrap();
        assert!((zone.pos.latitude - 19.0728).abs() < f64::EPSILON);
        assert!((zone.pos.longitude - 72.8826).abs() < f64::EPSILON);

        let out = serde_json::to_value(&zone).unwrap();
        assert_eq!(out["pos"][0], 19.0728);
        assert_eq!(out["pos"][1], 72.8826);
    }

    #[test]
    fn predict_request_wire_shape() {
        let request = PredictRequest {
            latitude: 19.0728,
            longitude: 72.8826,
            time_of_day: TimeOfDay::Night,
            dist_to_ps: 2.0,
        };
        let value = serde_json::to_value(request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "latitude": 19.0728,
                "longitude": 72.8826,
                "time_of_day": "night",
                "dist_to_ps": 2.0
            })
        );
    }

    #[test]
    fn status_parses_from_wire_string() {
        assert_eq!("Trial".parse::<FirStatus>().unwrap(), FirStatus::Trial);
        assert!("Unknown".parse::<FirStatus>().is_err());
    }
}
