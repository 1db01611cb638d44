//! Engine configuration.
//!
//! The board shape and the handful of numeric rules (checkpoint, hand size,
//! hero destroys) live here rather than being hardcoded, so harnesses can
//! run small boards. `EngineConfig::default()` is the standard game.
//!
//! Configs deserialize with every field optional:
//!
//! ```
//! use minoan_paths::core::EngineConfig;
//!
//! let config = EngineConfig::default().with_seed(7).with_hand_size(5);
//! assert_eq!(config.path_names.len(), 4);
//! assert!(config.validate().is_ok());
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::SetupError;

/// Palace names of the standard board, in path order.
pub const STANDARD_PALACES: [&str; 4] = ["Knossos", "Phaistos", "Malia", "Zakros"];

/// Largest accepted hand size.
pub const MAX_HAND_SIZE: usize = 64;

/// Path ids are a byte.
pub const MAX_PATHS: usize = u8::MAX as usize + 1;

/// Largest accepted path length.
pub const MAX_PATH_LENGTH: usize = 255;

/// Whether a 1-based position index can hold a finding on a path of `length`.
///
/// Even indices and the final position are finding slots.
#[must_use]
pub fn is_finding_slot(index: usize, length: usize) -> bool {
    index % 2 == 0 || index == length
}

/// Board and rule parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Path (palace) names, in board order.
    pub path_names: Vec<String>,

    /// Positions per path.
    pub path_length: usize,

    /// Position whose occupation ends the game.
    pub checkpoint_index: usize,

    /// Position that holds a palace's rare finding.
    pub rare_slot_index: usize,

    /// Opening hand size and hand cap.
    pub hand_size: usize,

    /// Archaeologists per player (each player also gets one hero).
    pub archaeologists_per_player: usize,

    /// Destroy uses a hero starts with.
    pub hero_destroys: u8,

    /// Seed for every random choice.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path_names: STANDARD_PALACES.iter().map(|s| s.to_string()).collect(),
            path_length: 9,
            checkpoint_index: 7,
            rare_slot_index: 2,
            hand_size: 8,
            archaeologists_per_player: 3,
            hero_destroys: 3,
            seed: 0,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_path_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.path_names = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_path_length(mut self, length: usize) -> Self {
        self.path_length = length;
        self
    }

    #[must_use]
    pub fn with_checkpoint(mut self, index: usize) -> Self {
        self.checkpoint_index = index;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    #[must_use]
    pub fn with_archaeologists(mut self, count: usize) -> Self {
        self.archaeologists_per_player = count;
        self
    }

    #[must_use]
    pub fn with_hero_destroys(mut self, uses: u8) -> Self {
        self.hero_destroys = uses;
        self
    }

    /// Pawns each player owns.
    #[must_use]
    pub fn pawns_per_player(&self) -> usize {
        self.archaeologists_per_player.saturating_add(1)
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), SetupError> {
        let invalid = |msg: String| Err(SetupError::InvalidConfig(msg));

        if self.path_names.is_empty() {
            return invalid("at least one path is required".into());
        }
        if self.path_names.len() > MAX_PATHS {
            return invalid(format!(
                "{} paths configured, at most {MAX_PATHS} supported",
                self.path_names.len()
            ));
        }
        if self.path_length > MAX_PATH_LENGTH {
            return invalid(format!(
                "path length {} exceeds {MAX_PATH_LENGTH}",
                self.path_length
            ));
        }
        let mut seen = FxHashSet::default();
        for name in &self.path_names {
            if name.trim().is_empty() {
                return invalid("path names cannot be blank".into());
            }
            if !seen.insert(name.to_lowercase()) {
                return invalid(format!("duplicate path name `{name}`"));
            }
        }
        if !(2..=self.path_length).contains(&self.checkpoint_index) {
            return invalid(format!(
                "checkpoint {} must lie within 2..={}",
                self.checkpoint_index, self.path_length
            ));
        }
        if self.rare_slot_index == 0
            || self.rare_slot_index > self.path_length
            || !is_finding_slot(self.rare_slot_index, self.path_length)
        {
            return invalid(format!(
                "rare slot {} is not a finding slot",
                self.rare_slot_index
            ));
        }
        if self.hand_size == 0 {
            return invalid("hand size must be positive".into());
        }
        if self.hand_size > MAX_HAND_SIZE {
            return invalid(format!(
                "hand size {} exceeds {MAX_HAND_SIZE}",
                self.hand_size
            ));
        }
        if self.pawns_per_player() > self.path_names.len() {
            return invalid(format!(
                "{} pawns per player need as many paths, only {} configured",
                self.pawns_per_player(),
                self.path_names.len()
            ));
        }
        Ok(())
    }
}
