use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Uniformly random placement of exactly `config.mines` mines, reproducible
/// from the seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGenerator {
    seed: u64,
}

impl RandomGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGenerator {
    fn generate(self, config: GameConfig) -> Result<Grid> {
        let config = GameConfig::checked(config.size, config.mines)?;
        let total_tiles = config.total_tiles() as usize;
        let mines = config.mines as usize;

        // optimize for full boards
        if mines == total_tiles {
            log::warn!("Every tile of the grid holds a mine");
            return Grid::from_mine_mask(Array2::from_elem(config.size.to_nd_index(), true));
        }

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        {
            // Array2::default is always in standard layout
            let Some(tiles) = mine_mask.as_slice_mut() else {
                return Err(GameError::InvalidBoardShape);
            };
            for place in index::sample(&mut rng, total_tiles, mines) {
                tiles[place] = true;
            }
        }

        log::debug!(
            "Generated {}x{} grid with {} mines from seed {}",
            config.size.0,
            config.size.1,
            mines,
            self.seed
        );
        Grid::from_mine_mask(mine_mask)
    }
}
