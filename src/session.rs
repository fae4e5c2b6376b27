//! Lookup session: the UI-facing side of a lookup
//!
//! Drives `Idle -> Loading -> {Success, Error}`, keeps the single result slot,
//! and reports each transition to an injected [`Presenter`]. Submissions are
//! last-wins: a lookup that settles after a newer one was submitted is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::error::LookupError;
use crate::lookup::LookupService;
use crate::models::{LookupQuery, LookupState, ReferencePoint, Resolution};

/// Receives every state transition of a session
pub trait Presenter: Send + Sync {
    fn present(&self, state: &LookupState);
}

/// Presenter writing transitions to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPresenter;

impl Presenter for TracingPresenter {
    fn present(&self, state: &LookupState) {
        match state {
            LookupState::Idle => debug!("Lookup idle"),
            LookupState::Loading { query, .. } => info!("Looking up '{}'", query),
            LookupState::Success { message, .. } => info!("{}", message),
            LookupState::Error { message, .. } => warn!("{}", message),
        }
    }
}

pub struct LookupSession {
    service: LookupService,
    presenter: Arc<dyn Presenter>,
    min_display: Duration,
    generation: AtomicU64,
    slot: Mutex<LookupState>,
}

impl LookupSession {
    pub fn new(service: LookupService, presenter: Arc<dyn Presenter>, min_display: Duration) -> Self {
        Self {
            service,
            presenter,
            min_display,
            generation: AtomicU64::new(0),
            slot: Mutex::new(LookupState::Idle),
        }
    }

    #[must_use]
    pub fn reference(&self) -> &ReferencePoint {
        self.service.reference()
    }

    /// Latest state of the result slot
    #[must_use]
    pub fn state(&self) -> LookupState {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run one lookup and return the state it settled in.
    ///
    /// Blank queries settle as an error right away, without a loading phase.
    /// Otherwise the outcome is held back until `min_display` has passed.
    #[instrument(skip(self))]
    pub async fn submit(&self, raw_query: &str) -> LookupState {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = match LookupQuery::parse(raw_query) {
            Ok(query) => query,
            Err(err) => return self.settle(generation, raw_query.trim(), Err(err)),
        };

        self.transition(
            generation,
            LookupState::Loading {
                query: query.to_string(),
                started_at: Utc::now(),
            },
        );

        let (outcome, ()) = tokio::join!(
            self.service.resolve_query(&query),
            tokio::time::sleep(self.min_display)
        );

        self.settle(generation, query.as_str(), outcome)
    }

    fn settle(
        &self,
        generation: u64,
        query: &str,
        outcome: Result<Resolution, LookupError>,
    ) -> LookupState {
        let state = match outcome {
            Ok(resolution) => LookupState::Success {
                query: query.to_string(),
                message: success_message(self.reference(), &resolution),
                place: resolution.place,
                distance: resolution.distance,
                completed_at: Utc::now(),
            },
            Err(err) => LookupState::Error {
                query: query.to_string(),
                kind: err.kind(),
                message: error_message(&err),
                completed_at: Utc::now(),
            },
        };

        self.transition(generation, state.clone());
        state
    }

    /// Overwrite the slot unless a newer submission has started
    fn transition(&self, generation: u64, state: LookupState) {
        {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            if generation != self.generation.load(Ordering::SeqCst) {
                debug!("Dropping stale lookup #{}", generation);
                return;
            }
            *slot = state.clone();
        }
        // the slot lock is released so presenters may read `state()`
        self.presenter.present(&state);
    }
}

#[must_use]
pub fn success_message(reference: &ReferencePoint, resolution: &Resolution) -> String {
    format!(
        "You are about {} as the crow flies from {}!",
        resolution.distance, reference.name
    )
}

#[must_use]
pub fn error_message(err: &LookupError) -> String {
    match err {
        LookupError::Validation { .. } => format!("{}!", err.user_message()),
        _ => format!(
            "Error: {}. Are you sure you're not in another dimension?",
            err.user_message()
        ),
    }
}
