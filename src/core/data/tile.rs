use crate::core::data::point::Point;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("tile size must be positive: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// A rectangular block of pixels handed to one worker as a unit of work.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl Tile {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Result<Self, TileError> {
        if width == 0 || height == 0 {
            return Err(TileError::InvalidSize { width, height });
        }

        Ok(Self { x, y, width, height })
    }

    #[must_use]
    pub fn x(&self) -> u32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> u32 {
        self.y
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        Point { x: self.x, y: self.y }
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width
            && point.y < self.y + self.height
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Every pixel of the tile in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| Point { x, y }))
    }
}
