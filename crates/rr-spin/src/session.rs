//! Spin session — sequential multi-carousel state machine
//!
//! ```text
//! Idle ──start──▶ Running(0) ──complete(0)──▶ Running(1) ── … ──▶ Aggregating ──▶ Complete
//!   ▲                                                                             │
//!   └──────────────────────────────── restart ───────────────────────────────────┘
//! ```
//!
//! Every carousel is generated at `start`; playout only flips `is_done` flags in
//! order. Out-of-order or duplicate completion reports are rejected.

use std::fmt;

use serde::{Deserialize, Serialize};

use rr_core::{Mode, RrError, RrResult, validate_spin_count};

use crate::aggregate::{AggregatedResult, aggregate};
use crate::carousel::{CarouselResult, generate_carousel};
use crate::random::RandomSource;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Nothing generated yet
    Idle,
    /// Carousel `active_index` is playing (or about to)
    Running { active_index: usize },
    /// All carousels done, result being computed
    Aggregating,
    /// Aggregated result available
    Complete,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running { active_index } => write!(f, "running carousel {active_index}"),
            Self::Aggregating => write!(f, "aggregating"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Read-only view of a session for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub state: SessionState,
    pub mode: Option<Mode>,
    pub spin_count: usize,
    pub active_index: usize,
    pub carousels: Vec<CarouselResult>,
    pub result: Option<AggregatedResult>,
}

/// Spin session
///
/// Owns its random source; single-threaded, driven by the presentation layer.
#[derive(Debug)]
pub struct SpinSession {
    /// Random source for every carousel of every round
    source: RandomSource,
    /// Mode of the current round (None while idle)
    mode: Option<Mode>,
    /// Carousels in this round
    spin_count: usize,
    /// Pre-generated carousels
    carousels: Vec<CarouselResult>,
    /// Carousel playing or about to play; `spin_count` once complete
    active_index: usize,
    /// Lifecycle state
    state: SessionState,
    /// Aggregated result (Complete only)
    result: Option<AggregatedResult>,
    /// Rounds started so far (start + restarts)
    round: u64,
}

impl SpinSession {
    /// Create an idle session with an entropy-seeded source
    pub fn new() -> Self {
        Self::with_source(RandomSource::new())
    }

    /// Create an idle session with a specific source
    pub fn with_source(source: RandomSource) -> Self {
        Self {
            source,
            mode: None,
            spin_count: 0,
            carousels: Vec::new(),
            active_index: 0,
            state: SessionState::Idle,
            result: None,
            round: 0,
        }
    }

    /// Seed the random source for reproducible rounds
    pub fn seed(&mut self, seed: u64) {
        self.source = RandomSource::seeded(seed);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // TRANSITIONS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Generate all carousels and enter `Running(0)`
    ///
    /// Valid from `Idle` only. On error the session stays idle.
    pub fn start(&mut self, mode: Mode, spin_count: usize) -> RrResult<()> {
        if self.state != SessionState::Idle {
            return Err(self.reject("start a new round".into()));
        }
        let spin_count = validate_spin_count(spin_count)?;

        let carousels = (0..spin_count)
            .map(|_| generate_carousel(&mode, &mut self.source))
            .collect::<RrResult<Vec<_>>>()?;

        self.round += 1;
        log::info!(
            "{} started: {:?} mode, {} carousel(s)",
            self.session_id(),
            mode.kind(),
            spin_count
        );

        self.mode = Some(mode);
        self.spin_count = spin_count;
        self.carousels = carousels;
        self.active_index = 0;
        self.result = None;
        self.state = SessionState::Running { active_index: 0 };
        Ok(())
    }

    /// Mark carousel `index` done and advance
    ///
    /// Valid only for the active carousel. The last report aggregates all
    /// winners and completes the session. Returns the new state.
    pub fn report_carousel_complete(&mut self, index: usize) -> RrResult<SessionState> {
        let active = match self.state {
            SessionState::Running { active_index } => active_index,
            _ => return Err(self.reject(format!("report completion of carousel {index}"))),
        };
        if index != active || self.carousels[index].is_done() {
            return Err(self.reject(format!("report completion of carousel {index}")));
        }

        self.carousels[index].mark_done();
        log::debug!(
            "{} carousel {index} landed on {:?}",
            self.session_id(),
            self.carousels[index].winner_value()
        );

        let next = index + 1;
        if next < self.spin_count {
            self.active_index = next;
            self.state = SessionState::Running { active_index: next };
            return Ok(self.state);
        }

        self.active_index = self.spin_count;
        self.state = SessionState::Aggregating;

        let winners: Vec<&str> = self.carousels.iter().map(|c| c.winner_value()).collect();
        let result = aggregate(&winners)?;
        log::info!(
            "{} complete: winner {:?} ({}/{})",
            self.session_id(),
            result.winner(),
            result.count_of(result.winner()),
            self.spin_count
        );

        self.result = Some(result);
        self.state = SessionState::Complete;
        Ok(self.state)
    }

    /// Start a fresh round with the same mode and spin count
    ///
    /// Valid from `Complete` only; every carousel is redrawn.
    pub fn restart(&mut self) -> RrResult<()> {
        if self.state != SessionState::Complete {
            return Err(self.reject("restart".into()));
        }
        let Some(mode) = self.mode.take() else {
            return Err(self.reject("restart without a mode".into()));
        };
        let spin_count = self.spin_count;

        self.clear();
        log::debug!("restarting after {}", self.session_id());
        self.start(mode, spin_count)
    }

    /// Discard the round and return to `Idle` (user navigated away)
    pub fn abort(&mut self) {
        if self.state != SessionState::Idle {
            log::debug!("{} aborted while {}", self.session_id(), self.state);
        }
        self.clear();
    }

    fn clear(&mut self) {
        self.mode = None;
        self.spin_count = 0;
        self.carousels.clear();
        self.active_index = 0;
        self.result = None;
        self.state = SessionState::Idle;
    }

    fn reject(&self, action: String) -> RrError {
        log::error!("{}: cannot {action} while {}", self.session_id(), self.state);
        RrError::InvalidTransition {
            action,
            state: self.state.to_string(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Mode of the current round
    pub fn mode(&self) -> Option<&Mode> {
        self.mode.as_ref()
    }

    /// Number of carousels in the current round
    pub fn spin_count(&self) -> usize {
        self.spin_count
    }

    /// All carousels of the current round
    pub fn carousels(&self) -> &[CarouselResult] {
        &self.carousels
    }

    /// Index of the carousel playing or about to play
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Carousel playing or about to play (None once complete)
    pub fn active_carousel(&self) -> Option<&CarouselResult> {
        match self.state {
            SessionState::Running { active_index } => self.carousels.get(active_index),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    /// Aggregated result (Complete only)
    pub fn result(&self) -> Option<&AggregatedResult> {
        self.result.as_ref()
    }

    /// Identifier of the current round, e.g. `session-000003`
    pub fn session_id(&self) -> String {
        format!("session-{:06}", self.round)
    }

    /// Progress counter `(shown, total)`: `min(active + 1, total)`
    pub fn progress(&self) -> (usize, usize) {
        ((self.active_index + 1).min(self.spin_count), self.spin_count)
    }

    /// Progress counter as shown above the carousels, e.g. `2 / 3`
    pub fn progress_label(&self) -> String {
        let (shown, total) = self.progress();
        format!("{shown} / {total}")
    }

    /// Copy of the session state for rendering
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id(),
            state: self.state,
            mode: self.mode.clone(),
            spin_count: self.spin_count,
            active_index: self.active_index,
            carousels: self.carousels.clone(),
            result: self.result.clone(),
        }
    }

    /// Export snapshot as JSON
    pub fn export_snapshot(&self) -> String {
        serde_json::to_string_pretty(&self.snapshot()).unwrap_or_default()
    }
}

impl Default for SpinSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SpinSession {
        SpinSession::with_source(RandomSource::seeded(2024))
    }

    #[test]
    fn test_session_creation() {
        let session = SpinSession::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.carousels().is_empty());
        assert!(session.result().is_none());
    }

    #[test]
    fn test_start_generates_all_carousels() {
        let mut session = seeded();
        session.start(Mode::numeric(1, 6), 3).unwrap();

        assert_eq!(session.state(), SessionState::Running { active_index: 0 });
        assert_eq!(session.carousels().len(), 3);
        assert!(session.carousels().iter().all(|c| !c.is_done()));
        assert_eq!(session.session_id(), "session-000001");
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut session = seeded();
        session.start(Mode::YesNo, 1).unwrap();
        assert!(matches!(
            session.start(Mode::YesNo, 1),
            Err(RrError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_invalid_spin_count_stays_idle() {
        let mut session = seeded();
        assert!(matches!(
            session.start(Mode::YesNo, 0),
            Err(RrError::InvalidSpinCount(0))
        ));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_empty_options_stays_idle() {
        let mut session = seeded();
        let result = session.start(Mode::OptionList { options: vec![] }, 3);
        assert!(matches!(result, Err(RrError::EmptyInput(_))));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.carousels().is_empty());
    }

    #[test]
    fn test_sequential_advance() {
        let mut session = seeded();
        session.start(Mode::options(["A", "B", "C"]), 3).unwrap();

        assert_eq!(
            session.report_carousel_complete(0).unwrap(),
            SessionState::Running { active_index: 1 }
        );
        assert!(session.carousels()[0].is_done());
        assert_eq!(session.progress_label(), "2 / 3");

        session.report_carousel_complete(1).unwrap();
        assert_eq!(session.report_carousel_complete(2).unwrap(), SessionState::Complete);
        assert_eq!(session.active_index(), 3);
        assert_eq!(session.progress_label(), "3 / 3");
        assert!(session.active_carousel().is_none());
        assert_eq!(session.result().unwrap().total(), 3);
    }

    #[test]
    fn test_out_of_order_rejected() {
        let mut session = seeded();
        session.start(Mode::numeric(1, 10), 2).unwrap();

        assert!(matches!(
            session.report_carousel_complete(1),
            Err(RrError::InvalidTransition { .. })
        ));
        // Nothing moved
        assert_eq!(session.state(), SessionState::Running { active_index: 0 });
        assert!(!session.carousels()[1].is_done());
    }

    #[test]
    fn test_duplicate_report_rejected() {
        let mut session = seeded();
        session.start(Mode::numeric(1, 10), 3).unwrap();
        session.report_carousel_complete(0).unwrap();
        assert!(session.report_carousel_complete(0).is_err());
    }

    #[test]
    fn test_report_when_idle_or_complete_rejected() {
        let mut session = seeded();
        assert!(session.report_carousel_complete(0).is_err());

        session.start(Mode::YesNo, 1).unwrap();
        session.report_carousel_complete(0).unwrap();
        let err = session.report_carousel_complete(0).unwrap_err();
        assert!(err.to_string().contains("while complete"));
    }

    #[test]
    fn test_restart_only_from_complete() {
        let mut session = seeded();
        assert!(session.restart().is_err());

        session.start(Mode::numeric(1, 1_000_000), 3).unwrap();
        assert!(session.restart().is_err());

        for i in 0..3 {
            session.report_carousel_complete(i).unwrap();
        }
        let before: Vec<String> = session
            .carousels()
            .iter()
            .map(|c| c.winner_value().to_string())
            .collect();

        session.restart().unwrap();
        assert_eq!(session.state(), SessionState::Running { active_index: 0 });
        assert_eq!(session.spin_count(), 3);
        assert_eq!(session.mode(), Some(&Mode::numeric(1, 1_000_000)));
        assert!(session.result().is_none());
        assert_eq!(session.session_id(), "session-000002");

        let after: Vec<String> = session
            .carousels()
            .iter()
            .map(|c| c.winner_value().to_string())
            .collect();
        // Redrawn, not cached (a full 3-way repeat over 1e6 values is not expected)
        assert_ne!(before, after);
    }

    #[test]
    fn test_abort_discards_round() {
        let mut session = seeded();
        session.start(Mode::YesNo, 5).unwrap();
        session.report_carousel_complete(0).unwrap();

        session.abort();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.carousels().is_empty());
        assert!(session.mode().is_none());

        // A new round can begin straight away
        session.start(Mode::YesNo, 1).unwrap();
    }

    #[test]
    fn test_snapshot_export() {
        let mut session = seeded();
        session.start(Mode::numeric(1, 6), 1).unwrap();
        session.report_carousel_complete(0).unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, SessionState::Complete);
        assert_eq!(snapshot.carousels.len(), 1);

        let json = session.export_snapshot();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.result, snapshot.result);
        assert_eq!(back.carousels, snapshot.carousels);
    }

    #[test]
    fn test_snapshot_with_broken_carousel_rejected() {
        let json = r#"{
            "session_id": "session-000001",
            "state": "Complete",
            "mode": null,
            "spin_count": 1,
            "active_index": 1,
            "carousels": [{"items": [], "winning_slot": 99, "winner_value": "x", "is_done": true}],
            "result": null
        }"#;
        assert!(serde_json::from_str::<SessionSnapshot>(json).is_err());
    }
}
