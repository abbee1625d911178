//! Work distribution for a render pass.
//!
//! Two families of policy share the same unit of work, a [`Tile`]:
//! static row bands fixed before any worker starts, and a grid of square
//! tiles that workers claim at runtime until none are left.
//!
//! [`Tile`]: crate::core::data::tile::Tile

pub mod atomic_task_queue;
pub mod static_partition;
pub mod task_queue;
pub mod tile_grid;

pub use atomic_task_queue::AtomicTaskQueue;
pub use static_partition::{static_band, static_bands};
pub use task_queue::TaskQueue;
pub use tile_grid::tile_grid;
