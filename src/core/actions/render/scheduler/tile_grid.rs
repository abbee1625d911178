use crate::core::data::tile::Tile;

/// Square tiles covering the surface in row-major order.
///
/// Partial tiles at the right and bottom edges are not produced: only
/// `width / tile_size` columns and `height / tile_size` rows are covered.
/// A `tile_size` of zero yields no tiles.
#[must_use]
pub fn tile_grid(width: u32, height: u32, tile_size: u32) -> Vec<Tile> {
    if tile_size == 0 {
        return Vec::new();
    }

    let columns = width / tile_size;
    let rows = height / tile_size;

    (0..rows)
        .flat_map(|row| (0..columns).map(move |column| (column, row)))
        .filter_map(|(column, row)| {
            Tile::new(column * tile_size, row * tile_size, tile_size, tile_size).ok()
        })
        .collect()
}
