use std::collections::VecDeque;
use std::ops::BitOr;

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Won,
    Lost,
}

impl Phase {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Playing
    }
}

/// A grid together with the flag budget and win/loss tracking.
///
/// Illegal moves (out of bounds, acting on the wrong kind of tile, moves after the game ended) are ignored and
/// reported as `NoChange`.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    grid: Grid,
    flags_remaining: CellCount,
    unresolved: CellCount,
    phase: Phase,
}

impl Field {
    pub fn new(grid: Grid) -> Self {
        Self {
            flags_remaining: grid.mine_count(),
            unresolved: grid.total_cells(),
            grid,
            phase: Default::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ended(&self) -> bool {
        self.phase.is_final()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.grid.mine_count()
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.flags_remaining
    }

    /// Hidden tiles that are not flagged.
    ///
    /// A mine revealed on a loss is not resolved and stays counted, so this never reaches zero
    /// on a loss.
    pub fn unresolved(&self) -> CellCount {
        self.unresolved
    }

    pub fn tile(&self, coords: Coord2) -> Option<Tile> {
        self.grid.tile(coords)
    }

    /// Primary action: chord or reveal, or toggle a flag when `flag` is set.
    ///
    /// Flagging a visible tile does nothing, revealing a visible tile chords it.
    pub fn play(&mut self, coords: Coord2, flag: bool) -> PlayOutcome {
        let visible = self.tile(coords).is_some_and(Tile::is_visible);
        match (flag, visible) {
            (true, true) => PlayOutcome::Flag(FlagOutcome::NoChange),
            (true, false) => PlayOutcome::Flag(self.toggle_flag(coords)),
            (false, true) => PlayOutcome::Reveal(self.chord(coords)),
            (false, false) => PlayOutcome::Reveal(self.reveal(coords)),
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        use Visibility::*;

        let Some(tile) = self.playable_tile(coords) else {
            return FlagOutcome::NoChange;
        };

        match tile.visibility() {
            Hidden if self.flags_remaining == 0 => {
                log::debug!("No flags left for {:?}", coords);
                return FlagOutcome::NoChange;
            }
            Hidden => {
                self.grid.tile_mut(coords).set_visibility(Flagged);
                self.flags_remaining -= 1;
                self.unresolved -= 1;
            }
            Flagged => {
                self.grid.tile_mut(coords).set_visibility(Hidden);
                self.flags_remaining += 1;
                self.unresolved += 1;
            }
            Visible => return FlagOutcome::NoChange,
        }
        log::debug!(
            "Toggled flag at {:?}, {} flags left",
            coords,
            self.flags_remaining
        );

        if self.check_won() {
            FlagOutcome::Won
        } else {
            FlagOutcome::Changed
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let outcome = match self.playable_tile(coords) {
            Some(tile) if tile.is_hidden() => self.open_tile(coords),
            _ => return RevealOutcome::NoChange,
        };
        self.settle(outcome)
    }

    /// Whether chording at `coords` would open its neighbors
    pub fn is_chordable(&self, coords: Coord2) -> bool {
        match self.tile(coords) {
            Some(tile) if tile.is_visible() => match tile.count() {
                Some(count) if count > 0 => {
                    count == self.grid.count_neighbors(coords, Tile::is_flagged)
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// Open every hidden neighbor of a visible tile whose flagged-neighbor count matches its number.
    pub fn chord(&mut self, coords: Coord2) -> RevealOutcome {
        if self.ended() || !self.is_chordable(coords) {
            return RevealOutcome::NoChange;
        }

        log::debug!("Chording at {:?}", coords);
        let outcome = self
            .grid
            .neighbors(coords)
            .map(|neighbor_coords| self.open_tile(neighbor_coords))
            .reduce(BitOr::bitor)
            .unwrap_or(RevealOutcome::NoChange);
        self.settle(outcome)
    }

    /// In-bounds tile while the game is still being played
    fn playable_tile(&self, coords: Coord2) -> Option<Tile> {
        if self.ended() {
            return None;
        }
        self.tile(coords)
    }

    /// Open a single hidden tile and flood-fill from it if it has no adjacent mines. Does not check for a win.
    fn open_tile(&mut self, coords: Coord2) -> RevealOutcome {
        let tile = self.grid[coords];
        if !tile.is_hidden() {
            return RevealOutcome::NoChange;
        }

        self.grid.tile_mut(coords).set_visibility(Visibility::Visible);

        let Some(count) = tile.count() else {
            log::debug!("Hit mine at {:?}", coords);
            self.phase = Phase::Lost;
            return RevealOutcome::HitMine;
        };
        self.unresolved -= 1;
        log::debug!("Open tile at {:?}, mine count: {}", coords, count);

        if count == 0 {
            self.flood_fill(coords);
        }
        RevealOutcome::Revealed
    }

    /// Opens the zero region around an already visible zero tile and its numbered border.
    ///
    /// Tiles are marked visible when enqueued, so each tile enters the queue at most once.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut to_visit = VecDeque::from([origin]);

        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in self.grid.neighbors(visit_coords) {
                let neighbor = self.grid[pos];
                if !neighbor.is_hidden() {
                    continue;
                }

                // zero regions are bordered by numbers, never by mines
                let Some(count) = neighbor.count() else {
                    continue;
                };

                self.grid.tile_mut(pos).set_visibility(Visibility::Visible);
                self.unresolved -= 1;
                log::trace!("Flood opened tile at {:?}, mine count: {}", pos, count);

                if count == 0 {
                    to_visit.push_back(pos);
                }
            }
        }
    }

    /// Applies the win check once the whole action has been carried out
    fn settle(&mut self, outcome: RevealOutcome) -> RevealOutcome {
        match outcome {
            RevealOutcome::Revealed if self.check_won() => RevealOutcome::Won,
            outcome => outcome,
        }
    }

    fn check_won(&mut self) -> bool {
        if self.phase == Phase::Playing && self.unresolved == 0 {
            log::debug!("All tiles resolved, game won");
            self.phase = Phase::Won;
            true
        } else {
            false
        }
    }
}
