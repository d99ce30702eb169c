//! Last-used configuration
//!
//! Values the configuration screen carries from one visit to the next:
//! - numeric bounds
//! - custom option list
//! - spin count
//!
//! The spin engine never reads this; it only receives the `Mode` and spin count
//! built from it.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use rr_core::{Mode, ModeKind, RrError, RrResult, SPIN_COUNT_PRESETS};

/// File name inside the config directory
const CONFIG_FILE: &str = "last_used.json";

/// Options offered on first launch
fn default_options() -> Vec<String> {
    ["Вариант А", "Вариант Б", "Вариант В"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Last-used configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LastUsedConfig {
    /// Lower numeric bound
    pub min_number: i64,
    /// Upper numeric bound (may be below `min_number`; the generator clamps)
    pub max_number: i64,
    /// Custom options, never empty
    pub custom_options: Vec<String>,
    /// Spin count, one of the presets
    pub spin_count: usize,
}

impl Default for LastUsedConfig {
    fn default() -> Self {
        Self {
            min_number: 1,
            max_number: 100,
            custom_options: default_options(),
            spin_count: 1,
        }
    }
}

impl LastUsedConfig {
    // ═══════════════════════════════════════════════════════════════════════════
    // INPUT
    // ═══════════════════════════════════════════════════════════════════════════

    /// Apply the text of the min / max fields
    ///
    /// A field that does not parse as an integer keeps its previous value.
    pub fn apply_numeric_input(&mut self, min_text: &str, max_text: &str) {
        match min_text.trim().parse() {
            Ok(v) => self.min_number = v,
            Err(_) => log::warn!("ignoring min {min_text:?}, keeping {}", self.min_number),
        }
        match max_text.trim().parse() {
            Ok(v) => self.max_number = v,
            Err(_) => log::warn!("ignoring max {max_text:?}, keeping {}", self.max_number),
        }
    }

    /// Apply the option fields
    ///
    /// Entries are trimmed and blanks dropped. If nothing is left the previous
    /// list is kept. Returns whether the list was replaced.
    pub fn apply_options_input<S: AsRef<str>>(&mut self, texts: &[S]) -> bool {
        let options = sanitize_options(texts);
        if options.is_empty() {
            log::warn!("no non-blank options entered, keeping previous list");
            return false;
        }
        self.custom_options = options;
        true
    }

    /// Set the spin count (presets only)
    pub fn set_spin_count(&mut self, count: usize) -> RrResult<()> {
        if !SPIN_COUNT_PRESETS.contains(&count) {
            log::warn!("spin count {count} is not one of {SPIN_COUNT_PRESETS:?}");
            return Err(RrError::InvalidSpinCount(count));
        }
        self.spin_count = count;
        Ok(())
    }

    /// Build the mode for a session from the stored values
    pub fn mode_for(&self, kind: ModeKind) -> Mode {
        match kind {
            ModeKind::Numbers => Mode::numeric(self.min_number, self.max_number),
            ModeKind::Options => Mode::OptionList {
                options: self.custom_options.clone(),
            },
            ModeKind::YesNo => Mode::YesNo,
        }
    }

    /// Repair values a hand-edited file may contain
    fn sanitized(mut self) -> Self {
        self.custom_options = sanitize_options(self.custom_options.as_slice());
        if self.custom_options.is_empty() {
            self.custom_options = default_options();
        }
        if !SPIN_COUNT_PRESETS.contains(&self.spin_count) {
            log::warn!("stored spin count {} reset to 1", self.spin_count);
            self.spin_count = 1;
        }
        self
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PERSISTENCE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Load from the standard location
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    /// Load from a path; missing or unreadable files give the defaults
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Self>(&content) {
                Ok(config) => config.sanitized(),
                Err(e) => {
                    log::warn!("corrupt config {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save to the standard location
    pub fn save(&self) -> RrResult<()> {
        self.save_to(Self::default_path())
    }

    /// Save to a path, creating parent directories
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> RrResult<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| RrError::Serialization(e.to_string()))?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("randomych"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_FILE)
    }
}

fn sanitize_options<S: AsRef<str>>(texts: &[S]) -> Vec<String> {
    texts
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
