/// What a tile holds, fixed when the grid is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileValue {
    Mine,
    /// Number of neighboring mines, `0..=8`.
    Count(u8),
}

impl Default for TileValue {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// Player-visible state of a tile. Visible and flagged are exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
    Flagged,
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    value: TileValue,
    visibility: Visibility,
}

impl Tile {
    pub(crate) const fn new(value: TileValue) -> Self {
        Self {
            value,
            visibility: Visibility::Hidden,
        }
    }

    pub const fn value(self) -> TileValue {
        self.value
    }

    pub const fn visibility(self) -> Visibility {
        self.visibility
    }

    pub const fn is_mine(self) -> bool {
        matches!(self.value, TileValue::Mine)
    }

    /// Adjacent mine count, `None` for mines.
    pub const fn count(self) -> Option<u8> {
        match self.value {
            TileValue::Mine => None,
            TileValue::Count(count) => Some(count),
        }
    }

    pub const fn is_visible(self) -> bool {
        matches!(self.visibility, Visibility::Visible)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.visibility, Visibility::Flagged)
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self.visibility, Visibility::Hidden)
    }

    /// Visible or flagged.
    pub const fn is_resolved(self) -> bool {
        !self.is_hidden()
    }

    pub(crate) fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }
}
