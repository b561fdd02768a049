//! Game configuration types.
//!
//! - `Level`: cup count, swap count and pacing for one round
//! - `LevelTable`: validated, ordered sequence of levels
//! - `Pacing`: the fixed dwell and pause lengths around each phase
//! - `GameConfig`: combines all configuration
//!
//! Validation happens once, when a table is built. The round machine
//! assumes every level it receives is playable.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// 1-based stage number shown to the player.
    pub stage: u8,

    /// Number of cups (and slots) on the table.
    pub cup_count: u8,

    /// Number of swaps performed during the shuffle.
    pub swap_count: u32,

    /// Duration of each swap animation.
    pub swap_speed_ms: u64,
}

impl Level {
    /// Create a new level.
    #[must_use]
    pub const fn new(stage: u8, cup_count: u8, swap_count: u32, swap_speed_ms: u64) -> Self {
        Self {
            stage,
            cup_count,
            swap_count,
            swap_speed_ms,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.cup_count < 2 {
            return Err(ConfigError::TooFewCups {
                stage: self.stage,
                cup_count: self.cup_count,
            });
        }
        if self.swap_speed_ms == 0 {
            return Err(ConfigError::ZeroSwapSpeed { stage: self.stage });
        }
        Ok(())
    }

    /// Harder on at least one axis and easier on none.
    fn is_harder_than(&self, prev: &Level) -> bool {
        let no_easier = self.cup_count >= prev.cup_count
            && self.swap_count >= prev.swap_count
            && self.swap_speed_ms <= prev.swap_speed_ms;
        let some_harder = self.cup_count > prev.cup_count
            || self.swap_count > prev.swap_count
            || self.swap_speed_ms < prev.swap_speed_ms;
        no_easier && some_harder
    }
}

const STANDARD_LEVELS: [Level; 5] = [
    Level::new(1, 3, 4, 700),
    Level::new(2, 3, 6, 620),
    Level::new(3, 3, 10, 540),
    Level::new(4, 4, 12, 480),
    Level::new(5, 5, 14, 420),
];

/// Ordered, validated sequence of round configurations.
///
/// Deserializing goes through [`LevelTable::new`], so a table obtained
/// any way other than `standard()` has passed validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Level>", into = "Vec<Level>")]
pub struct LevelTable {
    levels: Vec<Level>,
}

impl LevelTable {
    /// Validate and build a table.
    pub fn new(levels: Vec<Level>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::EmptyLevelTable);
        }

        for (i, level) in levels.iter().enumerate() {
            let expected = u8::try_from(i + 1).map_err(|_| ConfigError::Malformed {
                message: format!("too many levels ({})", levels.len()),
            })?;
            if level.stage != expected {
                return Err(ConfigError::StageOutOfOrder {
                    expected,
                    found: level.stage,
                });
            }
            level.validate()?;
        }

        for pair in levels.windows(2) {
            if !pair[1].is_harder_than(&pair[0]) {
                return Err(ConfigError::DifficultyRegression { stage: pair[1].stage });
            }
        }

        Ok(Self { levels })
    }

    /// The five-stage table the game ships with.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            levels: STANDARD_LEVELS.to_vec(),
        }
    }

    /// Get a level by 0-based index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    /// Number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false for a validated table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Is `index` the final level?
    #[must_use]
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.levels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<Level>> for LevelTable {
    type Error = ConfigError;

    fn try_from(levels: Vec<Level>) -> Result<Self, Self::Error> {
        Self::new(levels)
    }
}

impl From<LevelTable> for Vec<Level> {
    fn from(table: LevelTable) -> Self {
        table.levels
    }
}

/// Fixed pauses around each phase of a round, in milliseconds.
///
/// Lift durations are hints for the presentation layer; they do not
/// delay the round on their own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Ball shown and cups lifted before the shuffle.
    pub reveal_dwell_ms: u64,

    /// Cups lowered and ball hidden, before the first swap.
    pub reveal_settle_ms: u64,

    /// Floor for the pause between swap steps.
    pub min_step_pause_ms: u64,

    /// Ball revealed at its true slot before the outcome cue.
    pub resolve_reveal_ms: u64,

    /// Outcome cue playing, before the cups come down.
    pub resolve_cue_ms: u64,

    /// Cups lowered, before the ball is hidden and the outcome applies.
    pub resolve_lower_ms: u64,

    /// Gap before the next round starts.
    pub inter_round_ms: u64,

    /// Delay before the menu reappears after a reset.
    pub menu_delay_ms: u64,

    pub reveal_lift_ms: u64,
    pub reveal_lower_ms: u64,
    pub resolve_lift_ms: u64,
    pub resolve_drop_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            reveal_dwell_ms: 1100,
            reveal_settle_ms: 360,
            min_step_pause_ms: 80,
            resolve_reveal_ms: 520,
            resolve_cue_ms: 600,
            resolve_lower_ms: 420,
            inter_round_ms: 900,
            menu_delay_ms: 420,
            reveal_lift_ms: 320,
            reveal_lower_ms: 340,
            resolve_lift_ms: 320,
            resolve_drop_ms: 360,
        }
    }
}

impl Pacing {
    /// Pause after each swap: a quarter of the swap speed, rounded,
    /// never below `min_step_pause_ms`.
    #[must_use]
    pub fn step_pause_ms(&self, swap_speed_ms: u64) -> u64 {
        let quarter = (swap_speed_ms + 2) / 4;
        quarter.max(self.min_step_pause_ms)
    }

    /// Compress every pause to zero. Useful for headless simulation.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            reveal_dwell_ms: 0,
            reveal_settle_ms: 0,
            min_step_pause_ms: 0,
            resolve_reveal_ms: 0,
            resolve_cue_ms: 0,
            resolve_lower_ms: 0,
            inter_round_ms: 0,
            menu_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Set the reveal dwell.
    #[must_use]
    pub fn with_reveal_dwell(mut self, ms: u64) -> Self {
        self.reveal_dwell_ms = ms;
        self
    }

    /// Set the gap between rounds.
    #[must_use]
    pub fn with_inter_round(mut self, ms: u64) -> Self {
        self.inter_round_ms = ms;
        self
    }

    /// Set the menu return delay.
    #[must_use]
    pub fn with_menu_delay(mut self, ms: u64) -> Self {
        self.menu_delay_ms = ms;
        self
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rounds played in order.
    pub levels: LevelTable,

    /// Phase pauses.
    pub pacing: Pacing,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Malformed {
            message: e.to_string(),
        })
    }

    /// Replace the level table.
    #[must_use]
    pub fn with_levels(mut self, levels: LevelTable) -> Self {
        self.levels = levels;
        self
    }

    /// Replace the pacing.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let table = LevelTable::standard();
        assert_eq!(table.len(), 5);

        let rows: Vec<_> = table
            .iter()
            .map(|l| (l.stage, l.cup_count, l.swap_count, l.swap_speed_ms))
            .collect();
        assert_eq!(
            rows,
            vec![
                (1, 3, 4, 700),
                (2, 3, 6, 620),
                (3, 3, 10, 540),
                (4, 4, 12, 480),
                (5, 5, 14, 420),
            ]
        );
        assert!(table.is_last(4));
        assert!(!table.is_last(3));
    }

    #[test]
    fn test_standard_table_validates() {
        let rebuilt = LevelTable::new(STANDARD_LEVELS.to_vec()).unwrap();
        assert_eq!(rebuilt, LevelTable::standard());
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(LevelTable::new(vec![]), Err(ConfigError::EmptyLevelTable));
    }

    #[test]
    fn test_rejects_single_cup() {
        let err = LevelTable::new(vec![Level::new(1, 1, 3, 500)]).unwrap_err();
        assert_eq!(err, ConfigError::TooFewCups { stage: 1, cup_count: 1 });
    }

    #[test]
    fn test_rejects_zero_speed() {
        let err = LevelTable::new(vec![Level::new(1, 3, 3, 0)]).unwrap_err();
        assert_eq!(err, ConfigError::ZeroSwapSpeed { stage: 1 });
    }

    #[test]
    fn test_rejects_misnumbered_stage() {
        let err = LevelTable::new(vec![Level::new(1, 3, 3, 500), Level::new(3, 3, 4, 500)])
            .unwrap_err();
        assert_eq!(err, ConfigError::StageOutOfOrder { expected: 2, found: 3 });
    }

    #[test]
    fn test_rejects_easier_stage() {
        let err = LevelTable::new(vec![Level::new(1, 4, 6, 500), Level::new(2, 3, 8, 400)])
            .unwrap_err();
        assert_eq!(err, ConfigError::DifficultyRegression { stage: 2 });
    }

    #[test]
    fn test_rejects_identical_stage() {
        let err = LevelTable::new(vec![Level::new(1, 3, 4, 700), Level::new(2, 3, 4, 700)])
            .unwrap_err();
        assert_eq!(err, ConfigError::DifficultyRegression { stage: 2 });
    }

    #[test]
    fn test_faster_stage_alone_is_harder() {
        let table = LevelTable::new(vec![Level::new(1, 3, 4, 700), Level::new(2, 3, 4, 650)]);
        assert!(table.is_ok());
    }

    #[test]
    fn test_zero_swaps_allowed() {
        let table = LevelTable::new(vec![Level::new(1, 2, 0, 100)]).unwrap();
        assert_eq!(table.get(0).map(|l| l.swap_count), Some(0));
    }

    #[test]
    fn test_step_pause() {
        let pacing = Pacing::default();
        assert_eq!(pacing.step_pause_ms(700), 175);
        assert_eq!(pacing.step_pause_ms(620), 155);
        assert_eq!(pacing.step_pause_ms(540), 135);
        assert_eq!(pacing.step_pause_ms(420), 105);
        assert_eq!(pacing.step_pause_ms(200), 80);
        // 0.25 * 482 = 120.5 rounds up
        assert_eq!(pacing.step_pause_ms(482), 121);
    }

    #[test]
    fn test_config_json_defaults() {
        let config = GameConfig::from_json_str(r#"{"seed": 11}"#).unwrap();
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.levels, LevelTable::standard());
        assert_eq!(config.pacing, Pacing::default());
    }

    #[test]
    fn test_config_json_invalid_levels() {
        let json = r#"{"levels": [{"stage": 1, "cup_count": 1, "swap_count": 2, "swap_speed_ms": 300}]}"#;
        let err = GameConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
        assert!(err.to_string().contains("at least 2 cups"));
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::default()
            .with_seed(5)
            .with_pacing(Pacing::default().with_reveal_dwell(50));
        let json = serde_json::to_string(&config).unwrap();
        let back = GameConfig::from_json_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_builder_pattern() {
        let pacing = Pacing::instant().with_inter_round(10).with_menu_delay(5);
        assert_eq!(pacing.reveal_dwell_ms, 0);
        assert_eq!(pacing.inter_round_ms, 10);
        assert_eq!(pacing.menu_delay_ms, 5);
        assert_eq!(pacing.reveal_lift_ms, 320);
    }
}
