use alloc::vec::Vec;
use core::ops::BitOr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Playing
    }
}

/// Result of a single player action.
///
/// `Won` and `Lost` are only reported by the action that ended the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    NoChange,
    Changed,
    Won,
    Lost,
}

impl ActionOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// `Some(won)` when this action ended the game.
    pub const fn finished_with(self) -> Option<bool> {
        match self {
            Self::Won => Some(true),
            Self::Lost => Some(false),
            Self::NoChange | Self::Changed => None,
        }
    }
}

/// Used to merge outcomes of consecutive actions
impl BitOr for ActionOutcome {
    type Output = ActionOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use ActionOutcome::*;
        match (self, rhs) {
            (Lost, _) => Lost,
            (_, Lost) => Lost,
            (Won, _) => Won,
            (_, Won) => Won,
            (Changed, _) => Changed,
            (_, Changed) => Changed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Cascade {
    /// Only empty tiles open their neighbors.
    Plain,
    /// Numbers whose flags match their count open their neighbors too, empty
    /// tiles always do.
    Fast,
}

/// Rules engine for one game on one grid.
///
/// Counters are kept up to date on every transition and never recomputed
/// from the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEngine {
    grid: Grid,
    status: GameStatus,
    flagged_count: CellCount,
    correctly_flagged_count: CellCount,
    revealed_count: CellCount,
    triggered_mine: Option<Coord2>,
}

impl GameEngine {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            status: GameStatus::default(),
            flagged_count: 0,
            correctly_flagged_count: 0,
            revealed_count: 0,
            triggered_mine: None,
        }
    }

    pub fn generate(generator: impl GridGenerator, config: GameConfig) -> Result<Self> {
        Ok(Self::new(generator.generate(config)?))
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn total_tiles(&self) -> CellCount {
        self.grid.total_tiles()
    }

    pub fn mine_count(&self) -> CellCount {
        self.grid.mine_count()
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<&Tile> {
        self.grid.tile_at(coords)
    }

    pub fn status_at(&self, coords: Coord2) -> Result<TileStatus> {
        Ok(self.grid.tile_at(coords)?.status())
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn correctly_flagged_count(&self) -> CellCount {
        self.correctly_flagged_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Tiles the player has dealt with so far, revealed or flagged.
    pub fn progress(&self) -> CellCount {
        self.revealed_count + self.flagged_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> i64 {
        i64::from(self.grid.mine_count()) - i64::from(self.flagged_count)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// No tile has been flagged or revealed yet.
    pub fn is_untouched(&self) -> bool {
        !self.is_finished() && self.revealed_count == 0 && self.flagged_count == 0
    }

    /// Toggles a flag on a covered tile, or opens the neighbors of a revealed
    /// number when `policy` allows it.
    pub fn primary_action(
        &mut self,
        coords: Coord2,
        policy: DiscoveryPolicy,
    ) -> Result<ActionOutcome> {
        use TileStatus::*;

        let coords = self.grid.validate_coords(coords)?;
        if self.is_finished() {
            return Ok(ActionOutcome::NoChange);
        }
        let before = self.status;
        let tile = self.grid[coords];
        log::debug!(
            "Primary action at {:?} on {:?} with {:?}",
            coords,
            tile.status(),
            policy
        );

        let changed = match tile.status() {
            Covered | Flagged => {
                self.set_flag(coords, tile.status().is_covered());
                if policy.is_automatic() {
                    self.open_satisfied_neighbors(coords);
                }
                self.check_win();
                true
            }
            Revealed(count) if count > 0 => {
                if policy.allows_chord(count, tile.flagged_near()) {
                    let covered = self.covered_neighbors(coords);
                    self.reveal_all(covered, Cascade::Plain)
                } else {
                    false
                }
            }
            _ => false,
        };

        Ok(self.outcome(before, changed))
    }

    /// Reveals a covered tile, removing its flag first if it has one.
    ///
    /// Returns `NoChange` when the tile cannot be revealed.
    pub fn secondary_action(
        &mut self,
        coords: Coord2,
        policy: DiscoveryPolicy,
    ) -> Result<ActionOutcome> {
        use TileStatus::*;

        let coords = self.grid.validate_coords(coords)?;
        if self.is_finished() {
            return Ok(ActionOutcome::NoChange);
        }
        let before = self.status;
        log::debug!(
            "Secondary action at {:?} on {:?} with {:?}",
            coords,
            self.grid[coords].status(),
            policy
        );

        match self.grid[coords].status() {
            Flagged => self.set_flag(coords, false),
            Covered => {}
            _ => return Ok(ActionOutcome::NoChange),
        }

        let cascade = if policy.is_automatic() {
            Cascade::Fast
        } else {
            Cascade::Plain
        };
        self.reveal_all([coords], cascade);
        self.check_win();

        Ok(self.outcome(before, true))
    }

    /// Ends the game as won when the flags sit exactly on the mines.
    pub fn check_win(&mut self) -> bool {
        if self.is_finished() {
            return matches!(self.status, GameStatus::Won);
        }

        let mines = self.grid.mine_count();
        if self.correctly_flagged_count == mines && self.correctly_flagged_count == self.flagged_count
        {
            self.status = GameStatus::Won;
            log::debug!(
                "Game won, {} mines flagged, {} tiles revealed",
                mines,
                self.revealed_count
            );
            true
        } else {
            false
        }
    }

    /// Ends the game as lost, uncovering the remaining mines and marking
    /// wrong flags.
    pub fn game_over(&mut self) {
        if self.is_finished() {
            return;
        }
        self.status = GameStatus::Lost;
        log::debug!("Game lost, triggered mine: {:?}", self.triggered_mine);

        for (coords, tile) in self.grid.indexed_tiles_mut() {
            match (tile.status(), tile.has_mine()) {
                (TileStatus::Covered, true) => tile.set_status(TileStatus::MineRevealed),
                (TileStatus::Flagged, false) => {
                    log::trace!("Incorrect flag at {:?}", coords);
                    tile.set_status(TileStatus::FlagIncorrect);
                }
                _ => {}
            }
        }
    }

    fn outcome(&self, before: GameStatus, changed: bool) -> ActionOutcome {
        match (before, self.status) {
            (GameStatus::Playing, GameStatus::Won) => ActionOutcome::Won,
            (GameStatus::Playing, GameStatus::Lost) => ActionOutcome::Lost,
            _ if changed => ActionOutcome::Changed,
            _ => ActionOutcome::NoChange,
        }
    }

    fn set_flag(&mut self, coords: Coord2, flagged: bool) {
        let tile = self.grid.tile_mut(coords);
        let has_mine = tile.has_mine();
        if flagged {
            tile.set_status(TileStatus::Flagged);
            self.flagged_count += 1;
            if has_mine {
                self.correctly_flagged_count += 1;
            }
        } else {
            tile.set_status(TileStatus::Covered);
            self.flagged_count -= 1;
            if has_mine {
                self.correctly_flagged_count -= 1;
            }
        }
        self.grid.update_flagged_near(coords, flagged);
        log::trace!(
            "Flag at {:?} set to {}, {} flags placed",
            coords,
            flagged,
            self.flagged_count
        );
    }

    /// A flag change next to a number can complete its count; such numbers
    /// then open the rest of their neighbors.
    fn open_satisfied_neighbors(&mut self, coords: Coord2) {
        for pos in self.grid.iter_neighbors(coords) {
            if self.grid[pos].is_satisfied() {
                log::trace!("Flags around {:?} match its count", pos);
                let covered = self.covered_neighbors(pos);
                self.reveal_all(covered, Cascade::Fast);
            }
        }
    }

    fn covered_neighbors(&self, coords: Coord2) -> Vec<Coord2> {
        self.grid
            .iter_neighbors(coords)
            .filter(|&pos| self.grid[pos].status().is_covered())
            .collect()
    }

    /// Reveals every covered tile in `start` and keeps opening neighbors
    /// according to `cascade`. A mine going off ends the game but the rest of
    /// the cascade still opens; remaining mines are no longer covered by then.
    fn reveal_all(&mut self, start: impl IntoIterator<Item = Coord2>, cascade: Cascade) -> bool {
        let mut to_visit: Vec<Coord2> = start.into_iter().collect();
        let mut changed = false;

        while let Some(coords) = to_visit.pop() {
            let tile = self.grid[coords];
            // each tile opens at most once, duplicates in the worklist are skipped here
            if !tile.status().is_covered() {
                continue;
            }
            changed = true;
            self.revealed_count += 1;

            if tile.has_mine() {
                self.grid.tile_mut(coords).set_status(TileStatus::MineExploded);
                self.triggered_mine = Some(coords);
                self.game_over();
                continue;
            }

            let count = tile.mines_near();
            self.grid.tile_mut(coords).set_status(TileStatus::Revealed(count));
            log::trace!("Opened tile at {:?}, mine count: {}", coords, count);

            let open_neighbors = match cascade {
                Cascade::Plain => count == 0,
                Cascade::Fast => count == 0 || count == tile.flagged_near(),
            };
            if open_neighbors {
                to_visit.extend(
                    self.grid
                        .iter_neighbors(coords)
                        .filter(|&pos| self.grid[pos].status().is_covered()),
                );
            }
        }

        changed
    }
}
