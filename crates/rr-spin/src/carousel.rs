//! Carousel generation
//!
//! A carousel is a fixed strip of `CELL_COUNT` display strings. The landing
//! value is drawn separately from the visible pool and written into
//! `WINNING_SLOT`, so the presentation layer always animates to a known offset.

use serde::{Deserialize, Serialize};

use rr_core::{Mode, NO_LABEL, RrError, RrResult, YES_LABEL};

use crate::random::RandomSource;

/// Number of cells on every carousel strip
pub const CELL_COUNT: usize = 50;

/// Index the carousel comes to rest on
pub const WINNING_SLOT: usize = 45;

const _: () = assert!(WINNING_SLOT < CELL_COUNT);

/// One generated carousel
///
/// Deserialisation goes through [`RawCarousel`] so a stored strip must still
/// have `CELL_COUNT` cells with the winner under `WINNING_SLOT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCarousel")]
pub struct CarouselResult {
    items: Vec<String>,
    winning_slot: usize,
    winner_value: String,
    is_done: bool,
}

/// Unchecked wire form of [`CarouselResult`]
#[derive(Deserialize)]
struct RawCarousel {
    items: Vec<String>,
    winning_slot: usize,
    winner_value: String,
    is_done: bool,
}

impl TryFrom<RawCarousel> for CarouselResult {
    type Error = RrError;

    fn try_from(raw: RawCarousel) -> RrResult<Self> {
        if raw.items.len() != CELL_COUNT {
            return Err(RrError::Serialization(format!(
                "carousel has {} cells, expected {CELL_COUNT}",
                raw.items.len()
            )));
        }
        if raw.winning_slot != WINNING_SLOT {
            return Err(RrError::Serialization(format!(
                "carousel lands on slot {}, expected {WINNING_SLOT}",
                raw.winning_slot
            )));
        }
        if raw.items[raw.winning_slot] != raw.winner_value {
            return Err(RrError::Serialization(format!(
                "winner {:?} is not under slot {WINNING_SLOT}",
                raw.winner_value
            )));
        }
        Ok(Self {
            items: raw.items,
            winning_slot: raw.winning_slot,
            winner_value: raw.winner_value,
            is_done: raw.is_done,
        })
    }
}

impl CarouselResult {
    /// Build from a visual pool; the winner overwrites `WINNING_SLOT`
    fn from_pool(mut items: Vec<String>, winner_value: String) -> Self {
        debug_assert_eq!(items.len(), CELL_COUNT);
        items[WINNING_SLOT] = winner_value.clone();
        Self {
            items,
            winning_slot: WINNING_SLOT,
            winner_value,
            is_done: false,
        }
    }

    /// Visible strip, `CELL_COUNT` entries
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Index of the landing cell
    pub fn winning_slot(&self) -> usize {
        self.winning_slot
    }

    /// Value under the pointer once the carousel rests
    pub fn winner_value(&self) -> &str {
        &self.winner_value
    }

    /// Has the playout of this carousel finished?
    pub fn is_done(&self) -> bool {
        self.is_done
    }

    pub(crate) fn mark_done(&mut self) {
        self.is_done = true;
    }

    /// Cells within `radius` of the winning slot (clipped to the strip)
    pub fn window(&self, radius: usize) -> &[String] {
        let start = self.winning_slot.saturating_sub(radius);
        let end = self
            .winning_slot
            .saturating_add(radius)
            .saturating_add(1)
            .min(self.items.len());
        &self.items[start..end]
    }
}

/// Generate one carousel for `mode`
///
/// All draws for the strip and the winner happen here, before any animation.
pub fn generate_carousel(mode: &Mode, source: &mut RandomSource) -> RrResult<CarouselResult> {
    let result = match mode {
        Mode::Numeric { min, max } => generate_numeric(*min, (*max).max(*min), source),
        Mode::OptionList { options } => generate_options(options, source)?,
        Mode::YesNo => generate_yes_no(source),
    };

    log::debug!(
        "generated {:?} carousel, winner {:?} at slot {}",
        mode.kind(),
        result.winner_value,
        result.winning_slot
    );
    Ok(result)
}

fn generate_numeric(low: i64, high: i64, source: &mut RandomSource) -> CarouselResult {
    let pool = (0..CELL_COUNT)
        .map(|_| source.uniform_int(low, high).to_string())
        .collect();
    let winner = source.uniform_int(low, high).to_string();
    CarouselResult::from_pool(pool, winner)
}

fn generate_options(options: &[String], source: &mut RandomSource) -> RrResult<CarouselResult> {
    if options.is_empty() {
        log::error!("option-list carousel requested with no options");
        return Err(RrError::EmptyInput("option list is empty".into()));
    }

    // Whole shuffled permutations keep every option evenly represented
    let mut pool = Vec::with_capacity(CELL_COUNT + options.len());
    while pool.len() < CELL_COUNT {
        let mut round = options.to_vec();
        source.shuffle(&mut round);
        pool.extend(round);
    }
    pool.truncate(CELL_COUNT);

    let winner = source.pick_one(options)?.clone();
    Ok(CarouselResult::from_pool(pool, winner))
}

fn generate_yes_no(source: &mut RandomSource) -> CarouselResult {
    let mut flip = || {
        let label = if source.coin_flip() { YES_LABEL } else { NO_LABEL };
        label.to_string()
    };
    let pool = (0..CELL_COUNT).map(|_| flip()).collect();
    let winner = flip();
    CarouselResult::from_pool(pool, winner)
}
