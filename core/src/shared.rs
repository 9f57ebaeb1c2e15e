use alloc::boxed::Box;
use alloc::vec::Vec;
use core::{fmt, mem};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::*;

type FinishObserver = Box<dyn FnMut(bool) + Send>;

/// Thread-safe handle to a game in progress.
///
/// Every action holds the write lock until its cascade is complete, so
/// [`SharedGame::view`] never sees a half-applied move.
#[derive(Clone)]
pub struct SharedGame {
    engine: Arc<RwLock<GameEngine>>,
    observers: Arc<Mutex<Vec<FinishObserver>>>,
}

impl SharedGame {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
            observers: Arc::default(),
        }
    }

    /// Registers `observer` to be called with `won` once the game ends.
    ///
    /// Observers run after the engine lock is released and may read the game or
    /// register further observers.
    pub fn on_finish(&self, observer: impl FnMut(bool) + Send + 'static) {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(observer));
    }

    pub fn primary_action(
        &self,
        coords: Coord2,
        policy: DiscoveryPolicy,
    ) -> Result<ActionOutcome> {
        self.apply(|engine| engine.primary_action(coords, policy))
    }

    pub fn secondary_action(
        &self,
        coords: Coord2,
        policy: DiscoveryPolicy,
    ) -> Result<ActionOutcome> {
        self.apply(|engine| engine.secondary_action(coords, policy))
    }

    pub fn view(&self) -> BoardView {
        self.read(BoardView::from_engine)
    }

    pub fn status(&self) -> GameStatus {
        self.read(GameEngine::status)
    }

    /// Runs `f` against the engine under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&GameEngine) -> R) -> R {
        let engine = self.engine.read().unwrap_or_else(PoisonError::into_inner);
        f(&engine)
    }

    fn apply(
        &self,
        action: impl FnOnce(&mut GameEngine) -> Result<ActionOutcome>,
    ) -> Result<ActionOutcome> {
        let outcome = {
            let mut engine = self.engine.write().unwrap_or_else(PoisonError::into_inner);
            action(&mut engine)?
        };

        if let Some(won) = outcome.finished_with() {
            self.notify(won);
        }
        Ok(outcome)
    }

    fn notify(&self, won: bool) {
        let mut observers = mem::take(
            &mut *self.observers.lock().unwrap_or_else(PoisonError::into_inner),
        );
        log::debug!("Notifying {} observers, won: {}", observers.len(), won);
        for observer in observers.iter_mut() {
            observer(won);
        }

        // keep observers added while notifying, after the existing ones
        let mut registered = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        observers.append(&mut registered);
        *registered = observers;
    }
}

impl fmt::Debug for SharedGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedGame")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use DiscoveryPolicy::*;

    fn shared(size: Coord2, mines: &[Coord2]) -> SharedGame {
        SharedGame::new(GameEngine::new(Grid::from_mine_coords(size, mines).unwrap()))
    }

    #[test]
    fn observers_fire_once_on_finish() {
        let game = shared((3, 3), &[(2, 2)]);
        let calls = Arc::new(AtomicUsize::new(0));
        let wins = Arc::new(AtomicUsize::new(0));
        {
            let calls = Arc::clone(&calls);
            let wins = Arc::clone(&wins);
            game.on_finish(move |won| {
                calls.fetch_add(1, Ordering::SeqCst);
                if won {
                    wins.fetch_add(1, Ordering::SeqCst);
                }
            });
        }

        game.secondary_action((0, 0), Easy).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert_eq!(game.primary_action((2, 2), Easy).unwrap(), ActionOutcome::Won);
        assert_eq!(game.primary_action((2, 2), Easy).unwrap(), ActionOutcome::NoChange);
        assert_eq!(game.secondary_action((2, 2), Easy).unwrap(), ActionOutcome::NoChange);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(wins.load(Ordering::SeqCst), 1);
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn observer_can_read_the_finished_game() {
        let game = shared((2, 2), &[(0, 0)]);
        let seen = Arc::new(Mutex::new(None));
        {
            let reader = game.clone();
            let seen = Arc::clone(&seen);
            game.on_finish(move |won| {
                *seen.lock().unwrap() = Some((won, reader.view().triggered_mine));
            });
        }

        assert_eq!(game.secondary_action((0, 0), Easy).unwrap(), ActionOutcome::Lost);
        assert_eq!(*seen.lock().unwrap(), Some((false, Some((0, 0)))));
    }

    #[test]
    fn observer_can_register_another_observer() {
        let game = shared((2, 1), &[(0, 0)]);
        let calls = Arc::new(AtomicUsize::new(0));
        {
            let registrar = game.clone();
            let calls = Arc::clone(&calls);
            game.on_finish(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                let calls = Arc::clone(&calls);
                registrar.on_finish(move |_| {
                    calls.fetch_add(10, Ordering::SeqCst);
                });
            });
        }

        assert_eq!(game.primary_action((0, 0), Easy).unwrap(), ActionOutcome::Won);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(game.observers.lock().unwrap().len(), 2);
    }

    #[test]
    fn out_of_bounds_propagates() {
        let game = shared((2, 2), &[]);
        assert_eq!(
            game.primary_action((2, 2), Easy),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn readers_never_see_partial_cascades() {
        // large empty area with a mine row at the bottom: one reveal opens
        // everything above it in a single action
        let width = 64;
        let height = 64;
        let mines: Vec<Coord2> = (0..width).map(|x| (x, height - 1)).collect();
        let game = shared((width, height), &mines);

        thread::scope(|scope| {
            for _ in 0..4 {
                let game = game.clone();
                scope.spawn(move || {
                    for _ in 0..200 {
                        let view = game.view();
                        let opened = view
                            .tiles
                            .iter()
                            .filter(|status| matches!(status, TileStatus::Revealed(_)))
                            .count();
                        assert_eq!(opened as CellCount, view.revealed_count);
                        assert!(opened == 0 || opened == usize::from(width) * usize::from(height - 1));
                    }
                });
            }

            game.secondary_action((0, 0), Easy).unwrap();
        });

        assert_eq!(game.read(GameEngine::revealed_count), 64 * 63);
    }
}
