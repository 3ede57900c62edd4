//! The dashboard's unidirectional state store.
//!
//! [`DashboardState`] is an immutable record; [`reduce`] consumes the
//! current state plus an [`Action`] and produces the next state. Feed
//! results enter as [`Action::Feed`] after the consumer has already
//! discarded stale generations, so the reducer never sees an event from a
//! torn-down view.

use kavach_feed::FeedEvent;
use kavach_intel_models::{FirRecord, Hotspot, PredictiveZone, RiskTier, SectionTally};
use kavach_scoring::{BaselineMetrics, WeightVector, predict_risk_index};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::filter::FirFilter;

/// Top-level navigation tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum DashboardTab {
    /// Main command view: map, FIR listing, calculator.
    Command,
    /// Section-frequency analytics.
    Analytics,
    /// Personnel and resource overview.
    Resources,
}

/// Active map layer. Any layer is reachable from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum MapLayer {
    /// Reported crime locations (the FIR listing).
    Locations,
    /// Geographic hotspots.
    Hotspots,
    /// Forecast risk zones.
    PredictiveZones,
}

/// Which remote collection a loading flag refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Hotspots,
    Zones,
    Firs,
    Stats,
}

/// Per-collection loading flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadingFlags {
    pub hotspots: bool,
    pub zones: bool,
    pub firs: bool,
    pub stats: bool,
}

/// State of the live prediction panel.
///
/// A failed request reverts to idle and leaves the prior score on display;
/// the viewer sees stale data rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PredictionState {
    /// A request is in flight.
    pub loading: bool,
    /// Most recent score returned by the prediction service, if any.
    pub last_score: Option<f64>,
}

impl PredictionState {
    /// Tier for the displayed score, on the prediction service's scale.
    #[must_use]
    pub fn tier(&self) -> Option<RiskTier> {
        self.last_score.map(RiskTier::from_prediction_score)
    }
}

/// The complete dashboard view state.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// Active navigation tab.
    pub tab: DashboardTab,
    /// Active map layer.
    pub layer: MapLayer,
    /// Hotspot collection (empty until loaded, empty again on failure).
    pub hotspots: Vec<Hotspot>,
    /// Predictive zone collection.
    pub zones: Vec<PredictiveZone>,
    /// FIR listing.
    pub firs: Vec<FirRecord>,
    /// Per-section case tallies.
    pub stats: Vec<SectionTally>,
    /// Per-collection loading flags.
    pub loading: LoadingFlags,
    /// FIR listing search/category filter.
    pub filter: FirFilter,
    /// Calculator slider positions.
    pub weights: WeightVector,
    /// Composite risk index for the current weights.
    pub risk_index: u8,
    /// Live prediction panel state.
    pub prediction: PredictionState,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            tab: DashboardTab::Command,
            layer: MapLayer::Locations,
            hotspots: Vec::new(),
            zones: Vec::new(),
            firs: Vec::new(),
            stats: Vec::new(),
            loading: LoadingFlags::default(),
            filter: FirFilter::default(),
            weights: WeightVector::DEFAULT,
            risk_index: predict_risk_index(&WeightVector::DEFAULT, &BaselineMetrics::DEFAULT)
                .unwrap_or(0),
            prediction: PredictionState::default(),
        }
    }
}

/// Every state transition the dashboard supports.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Switch the navigation tab.
    SelectTab(DashboardTab),
    /// Switch the active map layer.
    SelectLayer(MapLayer),
    /// A fetch was spawned for the given collection.
    BeginLoad(DataKind),
    /// A feed result arrived (already generation-checked by the consumer).
    Feed(FeedEvent),
    /// Edit the FIR search term.
    SetSearch(String),
    /// Select a category filter value (`"All"` or an exact category).
    SetCategoryFilter(String),
    /// Move the calculator sliders.
    SetWeights(WeightVector),
    /// A prediction request was issued.
    PredictRequested,
}

/// Produces the next state for an action. Pure: the input state is never
/// mutated, and equal inputs yield equal outputs.
#[must_use]
pub fn reduce(state: &DashboardState, action: &Action) -> DashboardState {
    let mut next = state.clone();
    match action {
        Action::SelectTab(tab) => next.tab = *tab,
        Action::SelectLayer(layer) => next.layer = *layer,
        Action::BeginLoad(kind) => match kind {
            DataKind::Hotspots => next.loading.hotspots = true,
            DataKind::Zones => next.loading.zones = true,
            DataKind::Firs => next.loading.firs = true,
            DataKind::Stats => next.loading.stats = true,
        },
        Action::Feed(event) => apply_feed_event(&mut next, event),
        Action::SetSearch(search) => next.filter.search = search.clone(),
        Action::SetCategoryFilter(category) => next.filter.category = category.clone(),
        Action::SetWeights(weights) => {
            // Recompute against the fixed calibration baselines. An
            // out-of-range slider value leaves the state untouched.
            match predict_risk_index(weights, &BaselineMetrics::DEFAULT) {
                Ok(index) => {
                    next.weights = *weights;
                    next.risk_index = index;
                }
                Err(e) => log::warn!("Rejected weight update: {e}"),
            }
        }
        Action::PredictRequested => next.prediction.loading = true,
    }
    next
}

fn apply_feed_event(next: &mut DashboardState, event: &FeedEvent) {
    match event {
        FeedEvent::Hotspots(hotspots) => {
            next.hotspots = hotspots.clone();
            next.loading.hotspots = false;
        }
        FeedEvent::HotspotsFailed => {
            next.hotspots = Vec::new();
            next.loading.hotspots = false;
        }
        FeedEvent::Zones(zones) => {
            next.zones = zones.clone();
            next.loading.zones = false;
        }
        FeedEvent::ZonesFailed => {
            next.zones = Vec::new();
            next.loading.zones = false;
        }
        FeedEvent::Firs(firs) => {
            next.firs = firs.clone();
            next.loading.firs = false;
        }
        FeedEvent::FirsFailed => {
            next.firs = Vec::new();
            next.loading.firs = false;
        }
        FeedEvent::Stats(stats) => {
            next.stats = stats.clone();
            next.loading.stats = false;
        }
        FeedEvent::StatsFailed => {
            next.stats = Vec::new();
            next.loading.stats = false;
        }
        FeedEvent::Prediction(score) => {
            next.prediction.loading = false;
            next.prediction.last_score = Some(*score);
        }
        FeedEvent::PredictionFailed => {
            // Revert to idle; the previously displayed score stays.
            next.prediction.loading = false;
        }
    }
}
