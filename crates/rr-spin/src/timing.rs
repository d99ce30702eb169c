//! Timing profiles for carousel playout
//!
//! Timing never affects results: all draws are committed at session start.
//! These values only tell a presentation layer when to start, land and
//! report each carousel.

use serde::{Deserialize, Serialize};

/// Timing profile for playout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimingProfile {
    /// Popover timing
    Normal,
    /// Faster playout
    Turbo,
    /// No waiting at all (tests, scripted runs)
    Instant,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::Normal
    }
}

/// Detailed timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Profile type
    pub profile: TimingProfile,

    /// Delay before the first carousel starts (ms)
    pub first_start_delay_ms: f64,

    /// Scroll animation from offset 0 to the winning slot (ms)
    pub spin_duration_ms: f64,

    /// Pause after the animation before completion is reported (ms)
    pub settle_ms: f64,

    /// Pause between one carousel finishing and the next starting (ms)
    pub next_carousel_delay_ms: f64,

    /// Cell width in points
    pub cell_width: f64,

    /// Gap between cells in points
    pub cell_spacing: f64,
}

impl TimingConfig {
    /// Normal popover timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            first_start_delay_ms: 300.0,
            spin_duration_ms: 3500.0,
            settle_ms: 100.0,
            next_carousel_delay_ms: 400.0,
            cell_width: 76.0,
            cell_spacing: 4.0,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            first_start_delay_ms: 100.0,
            spin_duration_ms: 1200.0,
            settle_ms: 50.0,
            next_carousel_delay_ms: 150.0,
            ..Self::normal()
        }
    }

    /// Instant playout
    pub fn instant() -> Self {
        Self {
            profile: TimingProfile::Instant,
            first_start_delay_ms: 0.0,
            spin_duration_ms: 0.0,
            settle_ms: 0.0,
            next_carousel_delay_ms: 0.0,
            ..Self::normal()
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Instant => Self::instant(),
        }
    }

    /// Horizontal distance between consecutive cell origins
    pub fn cell_pitch(&self) -> f64 {
        self.cell_width + self.cell_spacing
    }

    /// Strip offset that centres `slot` under the pointer
    pub fn landing_offset(&self, slot: usize) -> f64 {
        -(slot as f64) * self.cell_pitch()
    }

    /// Time from a carousel starting to its completion being reported
    pub fn carousel_duration_ms(&self) -> f64 {
        self.spin_duration_ms + self.settle_ms
    }

    /// Wall-clock length of a full session with `spin_count` carousels
    pub fn session_duration_ms(&self, spin_count: usize) -> f64 {
        if spin_count == 0 {
            return 0.0;
        }
        self.first_start_delay_ms
            + spin_count as f64 * self.carousel_duration_ms()
            + (spin_count - 1) as f64 * self.next_carousel_delay_ms
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

/// Monotonic playout clock
#[derive(Debug, Clone)]
pub struct PlayoutClock {
    current_ms: f64,
    config: TimingConfig,
}

impl PlayoutClock {
    /// Create new clock at zero
    pub fn new(config: TimingConfig) -> Self {
        Self {
            current_ms: 0.0,
            config,
        }
    }

    /// Reset to zero
    pub fn reset(&mut self) {
        self.current_ms = 0.0;
    }

    /// Get current timestamp
    pub fn current(&self) -> f64 {
        self.current_ms
    }

    /// Advance by duration and return new timestamp
    pub fn advance(&mut self, duration_ms: f64) -> f64 {
        self.current_ms += duration_ms.max(0.0);
        self.current_ms
    }

    /// Advance to the start of carousel `index`
    pub fn carousel_start(&mut self, index: usize) -> f64 {
        if index == 0 {
            self.advance(self.config.first_start_delay_ms)
        } else {
            self.advance(self.config.next_carousel_delay_ms)
        }
    }

    /// Advance to the moment carousel completion is reported
    pub fn carousel_stop(&mut self) -> f64 {
        self.advance(self.config.carousel_duration_ms())
    }

    /// Get timing config reference
    pub fn config(&self) -> &TimingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_profiles() {
        let normal = TimingConfig::normal();
        let turbo = TimingConfig::turbo();
        let instant = TimingConfig::instant();

        assert!(turbo.spin_duration_ms < normal.spin_duration_ms);
        assert_eq!(instant.carousel_duration_ms(), 0.0);
        // Geometry is shared by every profile
        assert_eq!(turbo.cell_pitch(), normal.cell_pitch());
    }

    #[test]
    fn test_landing_offset() {
        let config = TimingConfig::normal();
        assert_eq!(config.landing_offset(0), 0.0);
        assert_eq!(config.landing_offset(45), -3600.0);
    }

    #[test]
    fn test_session_duration() {
        let config = TimingConfig::normal();
        assert_eq!(config.session_duration_ms(0), 0.0);
        assert_eq!(config.session_duration_ms(1), 300.0 + 3600.0);
        assert_eq!(config.session_duration_ms(3), 300.0 + 3.0 * 3600.0 + 2.0 * 400.0);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut clock = PlayoutClock::new(TimingConfig::normal());
        assert_eq!(clock.current(), 0.0);

        let s0 = clock.carousel_start(0);
        let e0 = clock.carousel_stop();
        let s1 = clock.carousel_start(1);
        assert!(s0 < e0 && e0 < s1);

        assert_eq!(clock.advance(-50.0), s1);
        clock.reset();
        assert_eq!(clock.current(), 0.0);
    }
}
