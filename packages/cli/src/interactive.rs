//! Interactive dashboard session.
//!
//! Drives the full view-state store the way the single-page dashboard
//! does: one feed session per mount, events reduced into immutable state,
//! views rendered under the supervisory layer. A crashed render is
//! terminal — the fallback screen is shown and the session ends.

use std::sync::Arc;

use dialoguer::{Confirm, Input, Select};
use kavach_client::{ApiClient, IntelBackend};
use kavach_dashboard::filter::filter_firs;
use kavach_dashboard::stats::section_frequency;
use kavach_dashboard::store::{Action, DashboardState, DashboardTab, DataKind, MapLayer, reduce};
use kavach_dashboard::supervisor::{Rendered, supervise};
use kavach_feed::{FeedEvent, FeedReceiver, FeedSession, feed_channel};
use kavach_intel_models::{PredictRequest, TimeOfDay};
use kavach_scoring::WeightVector;

use crate::render;

/// Top-level view selection.
enum View {
    Map,
    Firs,
    Analytics,
    Calculator,
    Refresh,
    Quit,
}

impl View {
    const ALL: &[Self] = &[
        Self::Map,
        Self::Firs,
        Self::Analytics,
        Self::Calculator,
        Self::Refresh,
        Self::Quit,
    ];

    const fn label(&self) -> &'static str {
        match self {
            Self::Map => "Map layers",
            Self::Firs => "FIR listing",
            Self::Analytics => "Section analytics",
            Self::Calculator => "Risk calculator",
            Self::Refresh => "Refresh collections",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the interactive session until the user quits or a render crashes.
///
/// # Errors
///
/// Returns an error if a terminal prompt fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("KAVACH Crime Intelligence");
    println!();

    let backend: Arc<dyn IntelBackend> = Arc::new(ApiClient::from_env());
    let (tx, mut rx) = feed_channel();

    let mut session = FeedSession::new(Arc::clone(&backend), tx.clone());
    let mut state = load_collections(DashboardState::default(), &mut session, &mut rx).await;

    let labels: Vec<&str> = View::ALL.iter().map(View::label).collect();

    loop {
        println!();
        let idx = Select::new()
            .with_prompt("View")
            .items(&labels)
            .default(0)
            .interact()?;

        match View::ALL[idx] {
            View::Map => {
                state = reduce(&state, &Action::SelectTab(DashboardTab::Command));
                let layers = [
                    MapLayer::Locations,
                    MapLayer::Hotspots,
                    MapLayer::PredictiveZones,
                ];
                let layer_idx = Select::new()
                    .with_prompt("Layer")
                    .items(&["Crime locations", "Crime hotspots", "Predictive risk"])
                    .default(0)
                    .interact()?;
                state = reduce(&state, &Action::SelectLayer(layers[layer_idx]));
                if !show(supervise(|| render::marker_view(&state))) {
                    return Ok(());
                }
            }
            View::Firs => {
                let search: String = Input::new()
                    .with_prompt("Search FIR or category")
                    .allow_empty(true)
                    .interact_text()?;
                let category: String = Input::new()
                    .with_prompt("Category filter")
                    .default("All".to_string())
                    .interact_text()?;
                state = reduce(&state, &Action::SetSearch(search));
                state = reduce(&state, &Action::SetCategoryFilter(category));
                let rendered = supervise(|| {
                    let hits = filter_firs(&state.firs, &state.filter);
                    render::fir_listing(&hits)
                });
                if !show(rendered) {
                    return Ok(());
                }
            }
            View::Analytics => {
                state = reduce(&state, &Action::SelectTab(DashboardTab::Analytics));
                let rendered = supervise(|| render::stats_view(&section_frequency(&state.stats)));
                if !show(rendered) {
                    return Ok(());
                }
            }
            View::Calculator => {
                state = calculator(state, &mut session, &mut rx).await?;
            }
            View::Refresh => {
                // Remount: tear the old session down (cancelling anything
                // still in flight) and load under a fresh generation.
                session = FeedSession::new(Arc::clone(&backend), tx.clone());
                log::info!("Remounted feed session (generation {})", session.generation());
                state = load_collections(state, &mut session, &mut rx).await;
                println!("Collections refreshed.");
            }
            View::Quit => break,
        }
    }

    Ok(())
}

/// Spawns the full on-mount load and reduces events until every
/// collection has answered (or the channel closes).
async fn load_collections(
    state: DashboardState,
    session: &mut FeedSession,
    rx: &mut FeedReceiver,
) -> DashboardState {
    let mut state = [
        DataKind::Hotspots,
        DataKind::Zones,
        DataKind::Firs,
        DataKind::Stats,
    ]
    .iter()
    .fold(state, |s, kind| reduce(&s, &Action::BeginLoad(*kind)));

    session.load_all();

    let mut pending = 4u8;
    while pending > 0 {
        let Some(envelope) = rx.recv().await else {
            break;
        };
        if let Some(event) = session.accept(envelope) {
            state = reduce(&state, &Action::Feed(event));
            pending -= 1;
        }
    }
    state
}

/// Calculator view: adjust the sliders, then optionally request a live
/// prediction from the backend.
async fn calculator(
    state: DashboardState,
    session: &mut FeedSession,
    rx: &mut FeedReceiver,
) -> Result<DashboardState, Box<dyn std::error::Error>> {
    let alpha: f64 = prompt_weight("Historical bias (alpha)", state.weights.alpha)?;
    let beta: f64 = prompt_weight("Seasonal variance (beta)", state.weights.beta)?;
    let gamma: f64 = prompt_weight("Response proximity (gamma)", state.weights.gamma)?;
    let delta: f64 = prompt_weight("Population hubs (delta)", state.weights.delta)?;

    let mut state = reduce(
        &state,
        &Action::SetWeights(WeightVector {
            alpha,
            beta,
            gamma,
            delta,
        }),
    );

    if Confirm::new()
        .with_prompt("Request a live prediction?")
        .default(false)
        .interact()?
    {
        let latitude: f64 = Input::new().with_prompt("Latitude").interact_text()?;
        let longitude: f64 = Input::new().with_prompt("Longitude").interact_text()?;
        let dist_to_ps: f64 = Input::new()
            .with_prompt("Distance to police station (km)")
            .default(2.0)
            .interact_text()?;
        let times = [
            TimeOfDay::Morning,
            TimeOfDay::Afternoon,
            TimeOfDay::Evening,
            TimeOfDay::Night,
        ];
        let time_idx = Select::new()
            .with_prompt("Time of day")
            .items(&["Morning", "Afternoon", "Evening", "Night"])
            .default(3)
            .interact()?;

        state = reduce(&state, &Action::PredictRequested);
        session.request_prediction(PredictRequest {
            latitude,
            longitude,
            time_of_day: times[time_idx],
            dist_to_ps,
        });

        // Wait for the prediction to settle; collection events arriving
        // in the meantime are reduced as usual.
        while state.prediction.loading {
            let Some(envelope) = rx.recv().await else {
                break;
            };
            if let Some(event) = session.accept(envelope) {
                let failed = matches!(event, FeedEvent::PredictionFailed);
                state = reduce(&state, &Action::Feed(event));
                if failed {
                    println!("Prediction unavailable; showing last known score.");
                }
            }
        }
    }

    if show(supervise(|| render::calculator_view(&state))) {
        Ok(state)
    } else {
        Err("rendering failed".into())
    }
}

fn prompt_weight(prompt: &str, current: f64) -> Result<f64, Box<dyn std::error::Error>> {
    Ok(Input::new()
        .with_prompt(prompt)
        .default(current)
        .interact_text()?)
}

/// Prints a supervised render. Returns `false` when the fallback screen
/// was shown — terminal for the session.
fn show(rendered: Rendered) -> bool {
    match rendered {
        Rendered::View(view) => {
            println!("{view}");
            true
        }
        Rendered::Fallback(fallback) => {
            println!("SYSTEM FAILURE");
            println!("{}", fallback.message);
            println!();
            println!("{}", fallback.trace);
            false
        }
    }
}
