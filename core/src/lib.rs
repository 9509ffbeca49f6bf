use std::ops::BitOr;

pub use error::*;
pub use field::*;
pub use frontend::*;
pub use generator::*;
pub use grid::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod error;
mod field;
mod frontend;
mod generator;
mod grid;
mod session;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub height: Coord,
    pub width: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(height: Coord, width: Coord, mines: CellCount) -> Self {
        Self {
            height,
            width,
            mines,
        }
    }

    /// Rejects empty grids and mine counts that do not fit.
    pub fn new(height: Coord, width: Coord, mines: CellCount) -> Result<Self> {
        if height == 0 || width == 0 || mines > mult(height, width) {
            return Err(GameError::InvalidConfiguration {
                height,
                width,
                mines,
            });
        }
        Ok(Self::new_unchecked(height, width, mines))
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(24, 24, 99)
    }

    /// Grid bounds as `(width, height)`, matching `(x, y)` coordinates.
    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.height, self.width)
    }
}

/// Outcome of toggling a flag
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
    Won,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
            Self::Won => true,
        }
    }
}

/// Outcome of revealing one or more tiles
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Used to merge outcomes when chording
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// Outcome of a primary action, see [`Field::play`]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PlayOutcome {
    Flag(FlagOutcome),
    Reveal(RevealOutcome),
}

impl PlayOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Flag(outcome) => outcome.has_update(),
            Self::Reveal(outcome) => outcome.has_update(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_too_many_mines() {
        assert_eq!(
            GameConfig::new(2, 2, 5),
            Err(GameError::InvalidConfiguration {
                height: 2,
                width: 2,
                mines: 5
            })
        );
    }

    #[test]
    fn config_rejects_empty_dimensions() {
        assert!(GameConfig::new(0, 4, 0).is_err());
        assert!(GameConfig::new(4, 0, 0).is_err());
    }

    #[test]
    fn config_accepts_full_and_empty_boards() {
        assert!(GameConfig::new(3, 3, 9).is_ok());
        assert!(GameConfig::new(3, 3, 0).is_ok());
    }

    #[test]
    fn presets_are_valid() {
        for preset in [
            GameConfig::beginner(),
            GameConfig::intermediate(),
            GameConfig::expert(),
        ] {
            assert_eq!(
                GameConfig::new(preset.height, preset.width, preset.mines),
                Ok(preset)
            );
        }
    }

    #[test]
    fn hit_mine_dominates_merged_outcomes() {
        use RevealOutcome::*;
        assert_eq!(Revealed | HitMine | Won, HitMine);
        assert_eq!(NoChange | Won, Won);
        assert_eq!(NoChange | NoChange, NoChange);
    }

    #[test]
    fn only_no_change_is_without_update() {
        assert!(!PlayOutcome::Flag(FlagOutcome::NoChange).has_update());
        assert!(!PlayOutcome::Reveal(RevealOutcome::NoChange).has_update());
        assert!(PlayOutcome::Flag(FlagOutcome::Changed).has_update());
        assert!(PlayOutcome::Reveal(RevealOutcome::HitMine).has_update());
    }
}
