#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod session;
mod types;

/// Board dimensions the reference game is played on.
pub const DEFAULT_SIZE: Coord2 = (10, 15);

/// Per-cell mine probability the reference game uses.
pub const DEFAULT_MINE_PROBABILITY: f64 = 1.0 / 7.0;

/// How densely the generator fills the board with mines.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MineDensity {
    /// Each cell is a mine independently with this probability.
    Probability(f64),
    /// Exactly this many mines, placed uniformly.
    Count(CellCount),
}

impl Default for MineDensity {
    fn default() -> Self {
        Self::Probability(DEFAULT_MINE_PROBABILITY)
    }
}

/// Product rules that differ between game variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Flagged cells cannot be revealed, neither directly nor by a cascade.
    pub flag_blocks_reveal: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            flag_blocks_reveal: true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub density: MineDensity,
    pub rules: Rules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            density: MineDensity::default(),
            rules: Rules::default(),
        }
    }
}

impl GameConfig {
    pub fn new(size: Coord2, density: MineDensity) -> Self {
        Self {
            size,
            density,
            rules: Rules::default(),
        }
    }

    pub fn with_rules(self, rules: Rules) -> Self {
        Self { rules, ..self }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Rejects configurations that could never leave a safe cell.
    pub fn validate(&self) -> Result<()> {
        let total_cells = self.total_cells();
        if total_cells == 0 {
            return Err(ConfigError::EmptyBoard.into());
        }

        match self.density {
            MineDensity::Probability(p) if !p.is_finite() || !(0.0..1.0).contains(&p) => {
                Err(ConfigError::InvalidProbability.into())
            }
            MineDensity::Count(requested) if requested >= total_cells => {
                Err(ConfigError::TooManyMines {
                    requested,
                    capacity: total_cells - 1,
                }
                .into())
            }
            _ => Ok(()),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Result of a single reveal, the status after it and every newly revealed cell.
///
/// `revealed` is ordered for playback: breadth-first from the origin on a safe reveal, the
/// triggered mine first and then row-major order on a loss.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealReport {
    pub status: GameStatus,
    pub revealed: Vec<Coord2>,
}

impl RevealReport {
    pub(crate) const fn unchanged(status: GameStatus) -> Self {
        Self {
            status,
            revealed: Vec::new(),
        }
    }

    /// Whether this outcome could have caused an update to the board
    pub fn has_update(&self) -> bool {
        !self.revealed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_game() {
        let config = GameConfig::default();

        assert_eq!(config.size, (10, 15));
        assert_eq!(config.total_cells(), 150);
        assert_eq!(config.density, MineDensity::Probability(1.0 / 7.0));
        assert!(config.rules.flag_blocks_reveal);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn config_fills_missing_fields_from_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "density": { "count": 12 } }"#).unwrap();

        assert_eq!(config.size, DEFAULT_SIZE);
        assert_eq!(config.density, MineDensity::Count(12));
        assert_eq!(config.rules, Rules::default());

        let config: GameConfig =
            serde_json::from_str(r#"{ "size": [4, 4], "rules": { "flag_blocks_reveal": false } }"#)
                .unwrap();

        assert_eq!(config.size, (4, 4));
        assert!(!config.rules.flag_blocks_reveal);
    }

    #[test]
    fn validate_rejects_unsatisfiable_density() {
        let full = GameConfig::new((2, 2), MineDensity::Count(4));
        assert_eq!(
            full.validate(),
            Err(GameError::InvalidConfig(ConfigError::TooManyMines {
                requested: 4,
                capacity: 3
            }))
        );

        let certain = GameConfig::new((2, 2), MineDensity::Probability(1.0));
        assert_eq!(
            certain.validate(),
            Err(GameError::InvalidConfig(ConfigError::InvalidProbability))
        );

        let nan = GameConfig::new((2, 2), MineDensity::Probability(f64::NAN));
        assert_eq!(
            nan.validate(),
            Err(GameError::InvalidConfig(ConfigError::InvalidProbability))
        );

        let empty = GameConfig::new((0, 3), MineDensity::Count(0));
        assert_eq!(
            empty.validate(),
            Err(GameError::InvalidConfig(ConfigError::EmptyBoard))
        );
    }

    #[test]
    fn validate_accepts_all_but_one_mine() {
        assert_eq!(GameConfig::new((2, 2), MineDensity::Count(3)).validate(), Ok(()));
        assert_eq!(
            GameConfig::new((1, 1), MineDensity::Probability(0.99)).validate(),
            Ok(())
        );
    }

    #[test]
    fn reveal_report_tracks_updates() {
        assert!(!RevealReport::unchanged(GameStatus::Lost).has_update());
        assert!(MarkOutcome::Changed.has_update());
        assert!(!MarkOutcome::NoChange.has_update());
    }
}
