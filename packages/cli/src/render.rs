//! Plain-text rendering for the dashboard views.
//!
//! Every function returns the rendered view as a `String` so the
//! supervisory layer can intercept a crashing render and substitute the
//! fallback screen.

use kavach_dashboard::map::{Marker, markers};
use kavach_dashboard::stats::SectionBar;
use kavach_dashboard::store::DashboardState;
use kavach_intel_models::{FirRecord, Hotspot, PredictiveZone};

/// Width of the widest stats bar, in characters.
const BAR_WIDTH: usize = 40;

/// Renders the active map layer's markers.
pub fn marker_view(state: &DashboardState) -> String {
    let rendered = markers(state);
    if rendered.is_empty() {
        return format!("[{}] no markers", state.layer);
    }
    let mut out = format!("[{}] {} markers\n", state.layer, rendered.len());
    for marker in &rendered {
        out.push_str(&marker_line(marker));
        out.push('\n');
    }
    out
}

fn marker_line(marker: &Marker) -> String {
    let position = marker.position.map_or_else(
        || "unplotted".to_string(),
        |pos| format!("{:.4}, {:.4}", pos.latitude, pos.longitude),
    );
    let tier = marker
        .popup
        .tier
        .map_or_else(String::new, |tier| format!(" [{tier}]"));
    format!(
        "  {} ({position}){tier} {} - {}",
        marker.id, marker.popup.label, marker.popup.details
    )
}

/// Renders the hotspot collection with derived tiers.
pub fn hotspot_listing(hotspots: &[Hotspot]) -> String {
    let mut out = format!("{} hotspots\n", hotspots.len());
    for (idx, hotspot) in hotspots.iter().enumerate() {
        out.push_str(&format!(
            "  {:>3}. {:.4}, {:.4}  score {:>4.1}  {}\n",
            idx + 1,
            hotspot.latitude,
            hotspot.longitude,
            hotspot.risk_score,
            hotspot.tier(),
        ));
    }
    out
}

/// Renders the predictive zone collection.
pub fn zone_listing(zones: &[PredictiveZone]) -> String {
    let mut out = format!("{} predictive zones\n", zones.len());
    for zone in zones {
        out.push_str(&format!(
            "  {}  {} ({:.4}, {:.4}, r={:.0}m)\n      {}\n",
            zone.id, zone.label, zone.pos.latitude, zone.pos.longitude, zone.radius, zone.details,
        ));
    }
    out
}

/// Renders a filtered FIR listing.
pub fn fir_listing(records: &[&FirRecord]) -> String {
    let mut out = format!("{} FIR records\n", records.len());
    for record in records {
        out.push_str(&format!(
            "  {}  BNS {:<4} {:<20} {:<8} {}\n",
            record.fir_uid, record.bns_section, record.weapon_type, record.status, record.risk,
        ));
    }
    out
}

/// Renders section-frequency bars.
pub fn stats_view(bars: &[SectionBar]) -> String {
    let mut out = String::from("BNS section frequency\n");
    for bar in bars {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let filled = (bar.fraction * BAR_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "  {:<24} {:<width$} {} cases\n",
            bar.label,
            "#".repeat(filled),
            bar.count,
            width = BAR_WIDTH,
        ));
    }
    out
}

/// Renders the calculator panel.
pub fn calculator_view(state: &DashboardState) -> String {
    let prediction = state.prediction.last_score.map_or_else(
        || "none".to_string(),
        |score| {
            let tier = state
                .prediction
                .tier()
                .map_or_else(String::new, |t| format!(" ({t})"));
            format!("{score:.1}{tier}")
        },
    );
    format!(
        "Weights: alpha={:.2} beta={:.2} gamma={:.2} delta={:.2}\n\
         Composite risk index: {}\n\
         Last remote prediction: {prediction}",
        state.weights.alpha,
        state.weights.beta,
        state.weights.gamma,
        state.weights.delta,
        state.risk_index,
    )
}
