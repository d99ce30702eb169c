//! Randomizer modes and spin-count rules

use serde::{Deserialize, Serialize};

use crate::error::{RrError, RrResult};

/// Label rendered for a "yes" coin flip
pub const YES_LABEL: &str = "Да";

/// Label rendered for a "no" coin flip
pub const NO_LABEL: &str = "Нет";

/// Spin counts offered by the configuration screen
pub const SPIN_COUNT_PRESETS: [usize; 3] = [1, 3, 5];

/// Largest number of carousels a single session may play
pub const MAX_SPIN_COUNT: usize = 5;

/// Check that a session can be started with `count` carousels
pub fn validate_spin_count(count: usize) -> RrResult<usize> {
    if (1..=MAX_SPIN_COUNT).contains(&count) {
        Ok(count)
    } else {
        log::error!("rejected spin count {count} (allowed 1..={MAX_SPIN_COUNT})");
        Err(RrError::InvalidSpinCount(count))
    }
}

/// Mode selector without its configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeKind {
    /// Random integer in a range
    Numbers,
    /// Random pick from a custom list
    Options,
    /// Coin flip
    YesNo,
}

impl ModeKind {
    /// All modes in the order the selection screen lists them
    pub const ALL: [ModeKind; 3] = [ModeKind::Numbers, ModeKind::Options, ModeKind::YesNo];

    /// Screen title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Numbers => "Числа",
            Self::Options => "Варианты",
            Self::YesNo => "Да / Нет",
        }
    }

    /// One-line description shown on the mode card
    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::Numbers => "Случайное число в диапазоне",
            Self::Options => "Случайный выбор из списка",
            Self::YesNo => "Простой ответ на вопрос",
        }
    }
}

/// A configured randomizer mode
///
/// Each variant carries exactly the configuration its generation rule needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mode {
    /// Integer in `[min, max]`; an inverted range is clamped to `[min, min]`
    Numeric { min: i64, max: i64 },
    /// One of the listed options
    OptionList { options: Vec<String> },
    /// "Да" or "Нет"
    YesNo,
}

impl Mode {
    /// Numeric mode
    pub fn numeric(min: i64, max: i64) -> Self {
        Self::Numeric { min, max }
    }

    /// Option-list mode
    pub fn options<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OptionList {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Which mode this is
    pub fn kind(&self) -> ModeKind {
        match self {
            Self::Numeric { .. } => ModeKind::Numbers,
            Self::OptionList { .. } => ModeKind::Options,
            Self::YesNo => ModeKind::YesNo,
        }
    }

    /// Bounds actually used for generation: `(min, max(min, max))`
    pub fn effective_range(&self) -> Option<(i64, i64)> {
        match *self {
            Self::Numeric { min, max } => Some((min, max.max(min))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_range_clamps_inverted() {
        assert_eq!(Mode::numeric(1, 6).effective_range(), Some((1, 6)));
        assert_eq!(Mode::numeric(10, 3).effective_range(), Some((10, 10)));
        assert_eq!(Mode::YesNo.effective_range(), None);
    }

    #[test]
    fn test_spin_count_validation() {
        assert!(validate_spin_count(0).is_err());
        assert_eq!(validate_spin_count(2).unwrap(), 2);
        for n in SPIN_COUNT_PRESETS {
            assert!(validate_spin_count(n).is_ok());
        }
        assert!(matches!(
            validate_spin_count(MAX_SPIN_COUNT + 1),
            Err(RrError::InvalidSpinCount(6))
        ));
    }

    #[test]
    fn test_mode_kind() {
        assert_eq!(Mode::options(["A", "B"]).kind(), ModeKind::Options);
        assert_eq!(ModeKind::YesNo.title(), "Да / Нет");
    }

    #[test]
    fn test_mode_serialization() {
        let mode = Mode::numeric(1, 6);
        let json = serde_json::to_string(&mode).unwrap();
        assert!(json.contains("\"kind\":\"numeric\""));
        let back: Mode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mode);
    }
}
