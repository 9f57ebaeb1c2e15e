use serde::{Deserialize, Serialize};

/// Player-visible state of a single tile.
///
/// Valid transitions:
/// - Covered -> Flagged
/// - Covered -> Revealed
/// - Covered -> MineExploded
/// - Flagged -> Covered
///
/// Once the game is lost, covered mines become `MineRevealed` and flags over
/// safe tiles become `FlagIncorrect`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileStatus {
    Covered,
    Flagged,
    /// Safe tile showing its adjacent mine count, `0` being an empty tile.
    Revealed(u8),
    /// The mine the player revealed.
    MineExploded,
    /// A mine left covered when the game was lost.
    MineRevealed,
    /// A flag placed over a safe tile, shown after the game was lost.
    FlagIncorrect,
}

impl TileStatus {
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered)
    }

    /// Whether a flag marker sits on this tile, including wrong flags shown
    /// after a loss.
    pub const fn is_flag(self) -> bool {
        matches!(self, Self::Flagged | Self::FlagIncorrect)
    }

    /// Revealed tile with a non-zero count.
    pub const fn numbered(self) -> Option<u8> {
        match self {
            Self::Revealed(count) if count > 0 => Some(count),
            _ => None,
        }
    }

    /// No player action changes this tile anymore.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Covered | Self::Flagged)
    }
}

impl Default for TileStatus {
    fn default() -> Self {
        Self::Covered
    }
}

/// One cell of the grid.
///
/// `has_mine` and `mines_near` are fixed when the grid is built. `status` and
/// `flagged_near` are owned by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    has_mine: bool,
    mines_near: u8,
    status: TileStatus,
    flagged_near: u8,
}

impl Tile {
    pub(crate) const fn new(has_mine: bool, mines_near: u8) -> Self {
        Self {
            has_mine,
            mines_near,
            status: TileStatus::Covered,
            flagged_near: 0,
        }
    }

    pub const fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub const fn mines_near(&self) -> u8 {
        self.mines_near
    }

    pub const fn status(&self) -> TileStatus {
        self.status
    }

    /// Number of adjacent tiles currently carrying a flag.
    pub const fn flagged_near(&self) -> u8 {
        self.flagged_near
    }

    pub(crate) fn set_status(&mut self, status: TileStatus) {
        self.status = status;
    }

    pub(crate) fn add_flagged_near(&mut self) {
        debug_assert!(self.flagged_near < 8);
        self.flagged_near += 1;
    }

    pub(crate) fn remove_flagged_near(&mut self) {
        debug_assert!(self.flagged_near > 0);
        self.flagged_near = self.flagged_near.saturating_sub(1);
    }

    /// Revealed number whose adjacent flags account for every nearby mine.
    pub const fn is_satisfied(&self) -> bool {
        match self.status {
            TileStatus::Revealed(count) => count == self.flagged_near,
            _ => false,
        }
    }
}
