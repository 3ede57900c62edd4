#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Cancellable data-fetch tasks feeding the dashboard views.
//!
//! Each view owns a [`FeedSession`] for its lifetime. Mounting spawns
//! independent, unordered fetch tasks; every result is posted into the
//! consumer's channel as an [`Envelope`] stamped with the session's
//! generation. Tearing the session down aborts in-flight tasks, and any
//! result that was already queued is rejected by [`FeedSession::accept`]
//! because its generation is stale — a torn-down view can never mutate
//! state.
//!
//! Fetch failures are logged and converted into `*Failed` events that the
//! store maps to an empty collection. There is no retry and no timeout
//! beyond the transport's own.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use kavach_client::IntelBackend;
use kavach_intel_models::{FirRecord, Hotspot, PredictRequest, PredictiveZone, SectionTally};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Issues a unique generation to every session, process-wide.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Outcome of one fetch task.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// `GET /hotspots` succeeded.
    Hotspots(Vec<Hotspot>),
    /// `GET /hotspots` failed; collection should render empty.
    HotspotsFailed,
    /// `GET /predictive-zones` succeeded.
    Zones(Vec<PredictiveZone>),
    /// `GET /predictive-zones` failed.
    ZonesFailed,
    /// `GET /firs` succeeded.
    Firs(Vec<FirRecord>),
    /// `GET /firs` failed.
    FirsFailed,
    /// `GET /bns-stats` succeeded.
    Stats(Vec<SectionTally>),
    /// `GET /bns-stats` failed.
    StatsFailed,
    /// `POST /predict` succeeded with a risk score.
    Prediction(f64),
    /// `POST /predict` failed; the prior score stays on display.
    PredictionFailed,
}

/// A [`FeedEvent`] stamped with the generation of the session that
/// produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    generation: u64,
    /// The fetch outcome.
    pub event: FeedEvent,
}

impl Envelope {
    /// The generation of the producing session.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Sender half of a feed channel.
pub type FeedSender = mpsc::UnboundedSender<Envelope>;
/// Receiver half of a feed channel.
pub type FeedReceiver = mpsc::UnboundedReceiver<Envelope>;

/// Creates the channel a consumer drains feed events from.
///
/// The consumer keeps one receiver across view remounts; each mount gets
/// its own [`FeedSession`] over a clone of the sender.
#[must_use]
pub fn feed_channel() -> (FeedSender, FeedReceiver) {
    mpsc::unbounded_channel()
}

/// Owns the fetch tasks spawned for one view lifetime.
///
/// Dropping the session aborts every in-flight task.
pub struct FeedSession {
    backend: Arc<dyn IntelBackend>,
    tx: FeedSender,
    generation: u64,
    tasks: Vec<JoinHandle<()>>,
}

impl FeedSession {
    /// Opens a session for a freshly mounted view.
    #[must_use]
    pub fn new(backend: Arc<dyn IntelBackend>, tx: FeedSender) -> Self {
        Self {
            backend,
            tx,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            tasks: Vec::new(),
        }
    }

    /// The generation stamped onto every event this session produces.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Accepts an envelope if it was produced by this session, rejecting
    /// results from any torn-down predecessor.
    #[must_use]
    pub fn accept(&self, envelope: Envelope) -> Option<FeedEvent> {
        (envelope.generation == self.generation).then_some(envelope.event)
    }

    /// Spawns the three collection fetches plus the stats aggregate —
    /// the full on-mount load. The calls are independent and unordered.
    pub fn load_all(&mut self) {
        self.load_hotspots();
        self.load_zones();
        self.load_firs();
        self.load_stats();
    }

    /// Spawns the hotspot collection fetch.
    pub fn load_hotspots(&mut self) {
        let backend = Arc::clone(&self.backend);
        self.spawn(async move {
            match backend.hotspots().await {
                Ok(hotspots) => FeedEvent::Hotspots(hotspots),
                Err(e) => {
                    log::error!("Failed to fetch hotspots: {e}");
                    FeedEvent::HotspotsFailed
                }
            }
        });
    }

    /// Spawns the predictive zone collection fetch.
    pub fn load_zones(&mut self) {
        let backend = Arc::clone(&self.backend);
        self.spawn(async move {
            match backend.predictive_zones().await {
                Ok(zones) => FeedEvent::Zones(zones),
                Err(e) => {
                    log::error!("Failed to fetch predictive zones: {e}");
                    FeedEvent::ZonesFailed
                }
            }
        });
    }

    /// Spawns the FIR listing fetch.
    pub fn load_firs(&mut self) {
        let backend = Arc::clone(&self.backend);
        self.spawn(async move {
            match backend.firs().await {
                Ok(firs) => FeedEvent::Firs(firs),
                Err(e) => {
                    log::error!("Failed to fetch FIRs: {e}");
                    FeedEvent::FirsFailed
                }
            }
        });
    }

    /// Spawns the per-section tally fetch.
    pub fn load_stats(&mut self) {
        let backend = Arc::clone(&self.backend);
        self.spawn(async move {
            match backend.bns_stats().await {
                Ok(stats) => FeedEvent::Stats(stats),
                Err(e) => {
                    log::error!("Failed to fetch BNS stats: {e}");
                    FeedEvent::StatsFailed
                }
            }
        });
    }

    /// Spawns a live prediction request.
    pub fn request_prediction(&mut self, request: PredictRequest) {
        let backend = Arc::clone(&self.backend);
        self.spawn(async move {
            match backend.predict(request).await {
                Ok(response) => FeedEvent::Prediction(response.risk_score),
                Err(e) => {
                    log::warn!("Prediction request failed: {e}");
                    FeedEvent::PredictionFailed
                }
            }
        });
    }

    /// Aborts every in-flight task. Called automatically on drop.
    pub fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    fn spawn<F>(&mut self, work: F)
    where
        F: Future<Output = FeedEvent> + Send + 'static,
    {
        let tx = self.tx.clone();
        let generation = self.generation;
        self.tasks.push(tokio::spawn(async move {
            let event = work.await;
            // The receiver may already be gone mid-teardown.
            let _ = tx.send(Envelope { generation, event });
        }));
    }
}

impl Drop for FeedSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use kavach_client::ClientError;
    use kavach_intel_models::PredictResponse;

    use super::*;

    /// In-memory backend with switchable failures, standing in for live
    /// HTTP the way fixture sources stand in for city APIs.
    struct FixtureBackend {
        fail_hotspots: bool,
        hang_forever: bool,
    }

    impl FixtureBackend {
        const fn healthy() -> Self {
            Self {
                fail_hotspots: false,
                hang_forever: false,
            }
        }

        fn error() -> ClientError {
            ClientError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            }
        }

        async fn stall(&self) {
            if self.hang_forever {
                // Pending forever; only task abort gets us out.
                std::future::pending::<()>().await;
            }
        }
    }

    #[async_trait]
    impl IntelBackend for FixtureBackend {
        async fn hotspots(&self) -> Result<Vec<Hotspot>, ClientError> {
            self.stall().await;
            if self.fail_hotspots {
                return Err(Self::error());
            }
            Ok(vec![Hotspot {
                latitude: 19.04,
                longitude: 72.86,
                risk_score: 7.5,
            }])
        }

        async fn predictive_zones(&self) -> Result<Vec<PredictiveZone>, ClientError> {
            Ok(Vec::new())
        }

        async fn firs(&self) -> Result<Vec<FirRecord>, ClientError> {
            Ok(Vec::new())
        }

        async fn bns_stats(&self) -> Result<Vec<SectionTally>, ClientError> {
            Ok(Vec::new())
        }

        async fn predict(&self, _request: PredictRequest) -> Result<PredictResponse, ClientError> {
            Ok(PredictResponse { risk_score: 42.0 })
        }
    }

    #[tokio::test]
    async fn successful_fetch_delivers_collection() {
        let (tx, mut rx) = feed_channel();
        let mut session = FeedSession::new(Arc::new(FixtureBackend::healthy()), tx);
        session.load_hotspots();

        let envelope = rx.recv().await.unwrap();
        match session.accept(envelope) {
            Some(FeedEvent::Hotspots(hotspots)) => assert_eq!(hotspots.len(), 1),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_fetch_becomes_failure_event() {
        let (tx, mut rx) = feed_channel();
        let backend = FixtureBackend {
            fail_hotspots: true,
            hang_forever: false,
        };
        let mut session = FeedSession::new(Arc::new(backend), tx);
        session.load_hotspots();

        let envelope = rx.recv().await.unwrap();
        assert_eq!(session.accept(envelope), Some(FeedEvent::HotspotsFailed));
    }

    #[tokio::test]
    async fn stale_generation_is_discarded() {
        let (tx, mut rx) = feed_channel();
        let backend: Arc<dyn IntelBackend> = Arc::new(FixtureBackend::healthy());

        let mut old = FeedSession::new(Arc::clone(&backend), tx.clone());
        old.load_hotspots();
        let envelope = rx.recv().await.unwrap();

        // Remount: the old session is torn down, a new one takes over the
        // same channel. The queued result must not leak into it.
        drop(old);
        let new = FeedSession::new(backend, tx);
        assert_eq!(new.accept(envelope), None);
    }

    #[tokio::test]
    async fn teardown_aborts_in_flight_tasks() {
        let (tx, mut rx) = feed_channel();
        let backend = FixtureBackend {
            fail_hotspots: false,
            hang_forever: true,
        };
        let mut session = FeedSession::new(Arc::new(backend), tx);
        session.load_hotspots();
        session.shutdown();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn load_all_spawns_every_collection() {
        let (tx, mut rx) = feed_channel();
        let mut session = FeedSession::new(Arc::new(FixtureBackend::healthy()), tx);
        session.load_all();

        let mut events = Vec::new();
        for _ in 0..4 {
            let envelope = rx.recv().await.unwrap();
            events.push(session.accept(envelope).unwrap());
        }
        assert!(events.iter().any(|e| matches!(e, FeedEvent::Hotspots(_))));
        assert!(events.iter().any(|e| matches!(e, FeedEvent::Zones(_))));
        assert!(events.iter().any(|e| matches!(e, FeedEvent::Firs(_))));
        assert!(events.iter().any(|e| matches!(e, FeedEvent::Stats(_))));
    }
}
