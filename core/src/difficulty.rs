use serde::{Deserialize, Serialize};

use crate::*;

/// Difficulty tier a game is played at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// Host-provided rules, see [`DifficultyConfig::custom`].
    Custom,
}

impl Difficulty {
    pub const PRESETS: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Rules for a preset tier, `None` for [`Difficulty::Custom`].
    pub const fn preset(self) -> Option<DifficultyConfig> {
        match self {
            Self::Easy => Some(DifficultyConfig::EASY),
            Self::Medium => Some(DifficultyConfig::MEDIUM),
            Self::Hard => Some(DifficultyConfig::HARD),
            Self::Custom => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Custom => "custom",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

/// Static rules of a game: board shape, mines and the rewind economy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub difficulty: Difficulty,
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
    /// Credits at game start, also the cap for restored credits.
    pub initial_rewinds: u8,
    /// Consecutive safe reveals that earn a credit back.
    pub safe_clicks_to_restore: u8,
}

impl DifficultyConfig {
    pub const EASY: Self = Self::new_unchecked(Difficulty::Easy, (8, 8), 10, 5, 4);
    pub const MEDIUM: Self = Self::new_unchecked(Difficulty::Medium, (12, 12), 25, 3, 5);
    pub const HARD: Self = Self::new_unchecked(Difficulty::Hard, (16, 16), 45, 2, 6);

    pub(crate) const fn new_unchecked(
        difficulty: Difficulty,
        (rows, cols): Coord2,
        mines: CellCount,
        initial_rewinds: u8,
        safe_clicks_to_restore: u8,
    ) -> Self {
        Self {
            difficulty,
            rows,
            cols,
            mines,
            initial_rewinds,
            safe_clicks_to_restore,
        }
    }

    /// Custom rules, validated so that any first click can be honored.
    pub fn custom(
        size: Coord2,
        mines: CellCount,
        initial_rewinds: u8,
        safe_clicks_to_restore: u8,
    ) -> Result<Self> {
        let config = Self::new_unchecked(
            Difficulty::Custom,
            size,
            mines,
            initial_rewinds,
            safe_clicks_to_restore,
        );
        config.validate()?;
        Ok(config)
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    /// Checks the rules can be played.
    ///
    /// Mine capacity is checked against the smallest possible safe zone (a
    /// corner click); the exact zone is checked again at placement time.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if self.initial_rewinds == 0 || self.safe_clicks_to_restore == 0 {
            return Err(GameError::InvalidRules);
        }

        let corner_zone = mult(self.rows.min(2), self.cols.min(2));
        let available = self.total_cells() - corner_zone;
        if self.mines == 0 || self.mines >= available {
            log::warn!(
                "Rejected {} rules: {} mines, {} cells outside the safe zone",
                self.difficulty.name(),
                self.mines,
                available
            );
            return Err(GameError::TooManyMines {
                mines: self.mines,
                available,
            });
        }

        Ok(())
    }
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self::EASY
    }
}
