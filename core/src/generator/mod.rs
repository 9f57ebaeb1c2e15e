use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

/// Places mines and builds the grid once, before the first action.
pub trait GridGenerator {
    fn generate(self, config: GameConfig) -> Result<Grid>;
}

/// Generator with explicit mine positions, mostly for fixtures and replays of
/// known boards.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedGenerator {
    mines: Vec<Coord2>,
}

impl FixedGenerator {
    pub fn new(mines: &[Coord2]) -> Self {
        Self {
            mines: mines.to_vec(),
        }
    }
}

impl GridGenerator for FixedGenerator {
    fn generate(self, config: GameConfig) -> Result<Grid> {
        let grid = Grid::from_mine_coords(config.size, &self.mines)?;
        if grid.mine_count() != config.mines {
            log::warn!(
                "Fixed layout has {} distinct mines, config asked for {}",
                grid.mine_count(),
                config.mines
            );
        }
        Ok(grid)
    }
}
