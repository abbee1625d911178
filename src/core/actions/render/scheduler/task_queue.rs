use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::core::actions::render::scheduler::tile_grid::tile_grid;
use crate::core::data::tile::Tile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueuedTile {
    tile: Tile,
    claimed: bool,
}

/// Shared list of tiles that workers claim one at a time.
///
/// Built fresh for each render pass. Claims scan the list in row-major order
/// under a single mutex and hand out the first unclaimed tile.
#[derive(Debug)]
pub struct TaskQueue {
    tiles: Mutex<Vec<QueuedTile>>,
}

impl TaskQueue {
    #[must_use]
    pub fn new(width: u32, height: u32, tile_size: u32) -> Self {
        Self::from_tiles(tile_grid(width, height, tile_size))
    }

    #[must_use]
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        let tiles = tiles
            .into_iter()
            .map(|tile| QueuedTile { tile, claimed: false })
            .collect();

        Self { tiles: Mutex::new(tiles) }
    }

    // Claims never leave the list half-updated, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<QueuedTile>> {
        self.tiles.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks the first unclaimed tile as claimed and returns it, or `None`
    /// once every tile has been handed out.
    pub fn claim_next_tile(&self) -> Option<Tile> {
        let mut tiles = self.lock();
        let next = tiles.iter_mut().find(|queued| !queued.claimed)?;
        next.claimed = true;

        Some(next.tile)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    #[must_use]
    pub fn unclaimed(&self) -> usize {
        self.lock().iter().filter(|queued| !queued.claimed).count()
    }

    #[must_use]
    pub fn all_claimed(&self) -> bool {
        self.unclaimed() == 0
    }
}
