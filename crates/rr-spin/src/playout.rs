//! Playout schedule generation
//!
//! Turns a started session into a timeline a presentation layer can follow:
//! when each carousel starts scrolling, where it lands, and when its completion
//! should be reported back through `report_carousel_complete`.

use serde::{Deserialize, Serialize};

use crate::session::SpinSession;
use crate::timing::{PlayoutClock, TimingConfig};

/// What happens at a point of the playout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayoutStage {
    /// Spinner screen shown
    SessionStart,
    /// Carousel `index` begins scrolling toward `landing_offset`
    CarouselSpinStart { index: usize, landing_offset: f64 },
    /// Carousel `index` rests on `value`; report completion now
    CarouselStop { index: usize, value: String },
    /// All carousels rested; read the winner from `SpinSession::result`
    ResultReady,
}

/// Timed playout event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayoutEvent {
    pub stage: PlayoutStage,
    pub timestamp_ms: f64,
}

impl PlayoutEvent {
    pub fn new(stage: PlayoutStage, timestamp_ms: f64) -> Self {
        Self {
            stage,
            timestamp_ms,
        }
    }
}

impl SpinSession {
    /// Timeline for the current round (empty while idle)
    pub fn playout_schedule(&self, timing: &TimingConfig) -> Vec<PlayoutEvent> {
        let carousels = self.carousels();
        if carousels.is_empty() {
            return Vec::new();
        }

        let mut clock = PlayoutClock::new(timing.clone());
        let mut events = Vec::with_capacity(carousels.len() * 2 + 2);

        // 1. Screen shown
        events.push(PlayoutEvent::new(PlayoutStage::SessionStart, clock.current()));

        // 2. One start/stop pair per carousel, strictly sequential
        for (index, carousel) in carousels.iter().enumerate() {
            let start = clock.carousel_start(index);
            events.push(PlayoutEvent::new(
                PlayoutStage::CarouselSpinStart {
                    index,
                    landing_offset: timing.landing_offset(carousel.winning_slot()),
                },
                start,
            ));

            let stop = clock.carousel_stop();
            events.push(PlayoutEvent::new(
                PlayoutStage::CarouselStop {
                    index,
                    value: carousel.winner_value().to_string(),
                },
                stop,
            ));
        }

        // 3. Result
        events.push(PlayoutEvent::new(PlayoutStage::ResultReady, clock.current()));

        events
    }
}
