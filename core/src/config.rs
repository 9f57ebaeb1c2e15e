use serde::{Deserialize, Serialize};

use crate::*;

/// Grid dimensions and mine count for a new game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps both sides to at least one tile and the mines to what fits.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size_x = size_x.max(1);
        let size_y = size_y.max(1);
        let mines = mines.min(mult(size_x, size_y));
        Self::new_unchecked((size_x, size_y), mines)
    }

    pub fn checked(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        if mines > mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((30, 16), 99)
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_tiles(&self) -> CellCount {
        self.total_tiles().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_degenerate_values() {
        let config = GameConfig::new((0, 3), 10);

        assert_eq!(config.size, (1, 3));
        assert_eq!(config.mines, 3);
        assert_eq!(config.safe_tiles(), 0);
    }

    #[test]
    fn checked_rejects_overfull_grid() {
        assert_eq!(GameConfig::checked((2, 2), 5), Err(GameError::TooManyMines));
        assert_eq!(
            GameConfig::checked((0, 2), 0),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(
            GameConfig::checked((2, 2), 4),
            Ok(GameConfig::new_unchecked((2, 2), 4))
        );
    }

    #[test]
    fn presets() {
        assert_eq!(GameConfig::beginner().total_tiles(), 81);
        assert_eq!(GameConfig::intermediate().safe_tiles(), 216);
        assert_eq!(GameConfig::expert().total_tiles(), 480);
        assert_eq!(GameConfig::default(), GameConfig::beginner());
    }

    #[test]
    fn serializes_as_plain_fields() {
        let json = serde_json::to_string(&GameConfig::expert()).unwrap();
        assert_eq!(json, r#"{"size":[30,16],"mines":99}"#);

        let config: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, GameConfig::expert());
    }
}
