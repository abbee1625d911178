use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::actions::render::scheduler::tile_grid::tile_grid;
use crate::core::data::tile::Tile;

/// Lock-free variant of [`TaskQueue`](super::TaskQueue).
///
/// The tile list is fixed up front and claims are a single `fetch_add` on the
/// next index, so the claim order is the same row-major order but no lock is
/// taken.
#[derive(Debug)]
pub struct AtomicTaskQueue {
    tiles: Vec<Tile>,
    next: AtomicUsize,
}

impl AtomicTaskQueue {
    #[must_use]
    pub fn new(width: u32, height: u32, tile_size: u32) -> Self {
        Self::from_tiles(tile_grid(width, height, tile_size))
    }

    #[must_use]
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles, next: AtomicUsize::new(0) }
    }

    pub fn claim_next_tile(&self) -> Option<Tile> {
        let index = self.next.fetch_add(1, Ordering::Relaxed);

        self.tiles.get(index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn unclaimed(&self) -> usize {
        self.tiles.len().saturating_sub(self.next.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn all_claimed(&self) -> bool {
        self.unclaimed() == 0
    }
}
