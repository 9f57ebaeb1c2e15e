use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Rectangular field of tiles addressed by `(x, y)`.
///
/// Mines and adjacency counts are fixed at construction. Linear (ordinal)
/// addressing follows the same x-major order as [`Grid::tiles`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    tiles: Array2<Tile>,
    mine_count: CellCount,
}

impl Grid {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (width, height) = mine_mask.dim();
        if width == 0 || height == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        let size: Coord2 = (
            width.try_into().map_err(|_| GameError::InvalidBoardShape)?,
            height.try_into().map_err(|_| GameError::InvalidBoardShape)?,
        );

        let tiles = Array2::from_shape_fn(mine_mask.dim(), |(x, y)| {
            // both axes already fit in Coord
            let coords = (x as Coord, y as Coord);
            let mines_near = NeighborIter::new(coords, size)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count() as u8;
            Tile::new(mine_mask[[x, y]], mines_near)
        });
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;

        log::debug!("Built {}x{} grid with {} mines", size.0, size.1, mine_count);
        Ok(Self { tiles, mine_count })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.tiles.dim();
        // checked in from_mine_mask
        (width as Coord, height as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_tiles(&self) -> CellCount {
        self.tiles.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_tiles(&self) -> CellCount {
        self.total_tiles() - self.mine_count
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<&Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.tiles[coords.to_nd_index()])
    }

    pub(crate) fn tile_mut(&mut self, coords: Coord2) -> &mut Tile {
        &mut self.tiles[coords.to_nd_index()]
    }

    /// In-bounds neighbor coordinates in a fixed order: top row, then the
    /// left and right sides, then the bottom row.
    pub fn neighbor_coords(&self, coords: Coord2) -> Result<SmallVec<[Coord2; 8]>> {
        let coords = self.validate_coords(coords)?;
        Ok(self.iter_neighbors(coords).collect())
    }

    pub fn neighbors_of(&self, coords: Coord2) -> Result<SmallVec<[&Tile; 8]>> {
        let coords = self.validate_coords(coords)?;
        Ok(self
            .iter_neighbors(coords)
            .map(|pos| &self.tiles[pos.to_nd_index()])
            .collect())
    }

    /// Caller guarantees `coords` is in bounds.
    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn indexed_tiles(&self) -> impl Iterator<Item = (Coord2, &Tile)> {
        self.tiles
            .indexed_iter()
            .map(|((x, y), tile)| ((x as Coord, y as Coord), tile))
    }

    pub(crate) fn indexed_tiles_mut(&mut self) -> impl Iterator<Item = (Coord2, &mut Tile)> {
        self.tiles
            .indexed_iter_mut()
            .map(|((x, y), tile)| ((x as Coord, y as Coord), tile))
    }

    pub fn ordinal(&self, coords: Coord2) -> Result<usize> {
        let (x, y) = self.validate_coords(coords)?;
        Ok(usize::from(x) * usize::from(self.height()) + usize::from(y))
    }

    pub fn coords_of(&self, ordinal: usize) -> Result<Coord2> {
        if ordinal >= self.tiles.len() {
            return Err(GameError::OutOfBounds);
        }
        let height = usize::from(self.height());
        Ok(((ordinal / height) as Coord, (ordinal % height) as Coord))
    }

    pub fn tile_by_ordinal(&self, ordinal: usize) -> Result<&Tile> {
        self.tile_at(self.coords_of(ordinal)?)
    }

    /// Adjusts the flag counter of every neighbor of `coords`.
    pub(crate) fn update_flagged_near(&mut self, coords: Coord2, flagged: bool) {
        for pos in self.iter_neighbors(coords) {
            let tile = self.tile_mut(pos);
            if flagged {
                tile.add_flagged_near();
            } else {
                tile.remove_flagged_near();
            }
        }
    }
}

impl Index<Coord2> for Grid {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}
