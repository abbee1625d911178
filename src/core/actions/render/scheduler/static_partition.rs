use crate::core::data::tile::Tile;

/// Row band owned by `worker` out of `workers`: rows
/// `[worker * (height / workers), (worker + 1) * (height / workers))`.
///
/// The `height % workers` rows below the last band belong to nobody. Returns
/// `None` when the band is empty (more workers than rows, or a zero-sized
/// surface) or when `worker` is out of range.
#[must_use]
pub fn static_band(worker: usize, workers: usize, width: u32, height: u32) -> Option<Tile> {
    if worker >= workers {
        return None;
    }

    let band_height = u32::try_from(height as usize / workers).ok()?;
    let band_top = u32::try_from(worker).ok()?.checked_mul(band_height)?;

    Tile::new(0, band_top, width, band_height).ok()
}

/// One entry per worker, in worker order.
#[must_use]
pub fn static_bands(workers: usize, width: u32, height: u32) -> Vec<Option<Tile>> {
    (0..workers)
        .map(|worker| static_band(worker, workers, width, height))
        .collect()
}
