use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Owned snapshot of everything a renderer needs, taken between actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub status: GameStatus,
    pub tiles: Array2<TileStatus>,
    pub mine_count: CellCount,
    pub flagged_count: CellCount,
    pub revealed_count: CellCount,
    pub triggered_mine: Option<Coord2>,
}

impl BoardView {
    pub fn from_engine(engine: &GameEngine) -> Self {
        let grid = engine.grid();
        let size = grid.size();
        let mut tiles = Array2::from_elem(size.to_nd_index(), TileStatus::Covered);
        for (coords, tile) in grid.indexed_tiles() {
            tiles[coords.to_nd_index()] = tile.status();
        }

        Self {
            size,
            status: engine.status(),
            tiles,
            mine_count: engine.mine_count(),
            flagged_count: engine.flagged_count(),
            revealed_count: engine.revealed_count(),
            triggered_mine: engine.triggered_mine(),
        }
    }

    pub fn status_at(&self, coords: Coord2) -> Option<TileStatus> {
        self.tiles.get(coords.to_nd_index()).copied()
    }

    pub fn total_tiles(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn progress(&self) -> CellCount {
        self.revealed_count + self.flagged_count
    }

    pub fn mines_left(&self) -> i64 {
        i64::from(self.mine_count) - i64::from(self.flagged_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_engine_copies_statuses_and_counters() {
        let grid = Grid::from_mine_coords((3, 2), &[(0, 0)]).unwrap();
        let mut engine = GameEngine::new(grid);
        engine.secondary_action((2, 1), DiscoveryPolicy::Easy).unwrap();
        engine.primary_action((0, 0), DiscoveryPolicy::Easy).unwrap();

        let view = BoardView::from_engine(&engine);

        assert_eq!(view.size, (3, 2));
        assert_eq!(view.status, GameStatus::Won);
        assert_eq!(view.status_at((0, 0)), Some(TileStatus::Flagged));
        assert_eq!(view.status_at((1, 0)), Some(TileStatus::Revealed(1)));
        assert_eq!(view.status_at((2, 1)), Some(TileStatus::Revealed(0)));
        assert_eq!(view.status_at((3, 0)), None);
        assert_eq!(view.total_tiles(), 6);
        assert_eq!(view.progress(), engine.progress());
        assert_eq!(view.mines_left(), 0);
    }
}
