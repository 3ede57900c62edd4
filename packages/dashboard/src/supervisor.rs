//! Supervisory layer over rendering.
//!
//! Any unhandled failure inside a render pass is intercepted and replaced
//! with a static [`FallbackView`] carrying the failure message and a
//! truncated trace. The fallback is terminal for the session: there is no
//! retry affordance, only a full restart.

use std::backtrace::Backtrace;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Maximum length of the trace excerpt shown on the fallback screen.
const TRACE_PREVIEW_LEN: usize = 200;

/// The static failure screen substituted for a crashed render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackView {
    /// The panic message, if one could be extracted.
    pub message: String,
    /// Truncated trace captured at the recovery point.
    pub trace: String,
}

/// Outcome of a supervised render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// The render completed; its output passes through untouched.
    View(String),
    /// The render crashed; the fallback replaces the entire interface.
    Fallback(FallbackView),
}

/// Runs a render closure, substituting the fallback view if it panics.
pub fn supervise<R>(render: R) -> Rendered
where
    R: FnOnce() -> String,
{
    match catch_unwind(AssertUnwindSafe(render)) {
        Ok(view) => Rendered::View(view),
        Err(payload) => {
            let message = payload.downcast_ref::<&str>().map_or_else(
                || {
                    payload
                        .downcast_ref::<String>()
                        .cloned()
                        .unwrap_or_else(|| "unhandled rendering failure".to_string())
                },
                |s| (*s).to_string(),
            );
            log::error!("Rendering failed: {message}");

            let trace: String = Backtrace::force_capture()
                .to_string()
                .chars()
                .take(TRACE_PREVIEW_LEN)
                .collect();

            Rendered::Fallback(FallbackView { message, trace })
        }
    }
}
