//! Fork-join render passes.
//!
//! Every pass spawns exactly `workers` threads, each of which pulls tiles from
//! its work source until none are left, computes every pixel of the tile
//! without holding any lock, and writes each pixel to the surface under the
//! one mutex shared by all workers. The pass returns only after every worker
//! has been joined.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::actions::render::policy::RenderPolicy;
use crate::core::actions::render::ports::colour_map::ColourMap;
use crate::core::actions::render::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::render::ports::render_surface::RenderSurface;
use crate::core::actions::render::scheduler::{
    AtomicTaskQueue, TaskQueue, static_band, tile_grid,
};
use crate::core::data::tile::Tile;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;

pub const DEFAULT_TILE_SIZE: u32 = 20;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("a render pass needs at least one worker")]
    NoWorkers,
    #[error("tile size must be greater than zero")]
    ZeroTileSize,
    #[error("failed to spawn render worker {worker}: {source}")]
    Spawn { worker: usize, source: io::Error },
    #[error("render worker {worker} panicked")]
    WorkerPanicked { worker: usize },
    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub policy: RenderPolicy,
    pub workers: usize,
    pub tile_size: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            policy: RenderPolicy::default(),
            workers: 1,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.workers == 0 {
            return Err(RenderError::NoWorkers);
        }

        if self.tile_size == 0 && self.policy != RenderPolicy::StaticPartition {
            return Err(RenderError::ZeroTileSize);
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker: usize,
    pub tiles: usize,
    pub pixels: u64,
}

impl WorkerReport {
    fn idle(worker: usize) -> Self {
        Self { worker, tiles: 0, pixels: 0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStats {
    pub policy: RenderPolicy,
    pub workers: usize,
    pub tiles: usize,
    pub pixels: u64,
    pub elapsed: Duration,
    pub reports: Vec<WorkerReport>,
}

/// Where a worker gets its next tile from.
enum WorkSource<'q> {
    Band(Option<Tile>),
    Queue(&'q TaskQueue),
    AtomicQueue(&'q AtomicTaskQueue),
}

impl WorkSource<'_> {
    fn next_tile(&mut self) -> Option<Tile> {
        match self {
            Self::Band(band) => band.take(),
            Self::Queue(queue) => queue.claim_next_tile(),
            Self::AtomicQueue(queue) => queue.claim_next_tile(),
        }
    }
}

/// Renders the whole surface for `viewport` and blocks until every worker
/// has finished.
///
/// A zero worker count is rejected before any thread exists. A spawn failure
/// leaves the surface partially rendered and is reported as
/// [`RenderError::Spawn`]; callers treat it as fatal.
pub fn render_pass<S, CMap>(
    viewport: &Viewport,
    settings: &RenderSettings,
    colour_map: &CMap,
    surface: &mut S,
) -> Result<RenderStats, RenderError>
where
    S: RenderSurface + Send,
    CMap: ColourMap<u32> + Sync,
{
    settings.validate()?;

    let (width, height) = surface.size();
    let algorithm = MandelbrotAlgorithm::new(*viewport, width, height);
    let workers = settings.workers;
    let start = Instant::now();

    let reports = match settings.policy {
        RenderPolicy::StaticPartition => {
            render_static_partition(workers, width, height, &algorithm, colour_map, surface)?
        }
        RenderPolicy::TaskQueue => {
            let queue = TaskQueue::new(width, height, settings.tile_size);
            render_task_queue(&queue, workers, &algorithm, colour_map, surface)?
        }
        RenderPolicy::AtomicTaskQueue => {
            let queue = AtomicTaskQueue::new(width, height, settings.tile_size);
            render_atomic_task_queue(&queue, workers, &algorithm, colour_map, surface)?
        }
        RenderPolicy::WorkStealing => {
            let tiles = tile_grid(width, height, settings.tile_size);
            render_work_stealing(&tiles, workers, &algorithm, colour_map, surface)?
        }
    };

    let stats = RenderStats {
        policy: settings.policy,
        workers,
        tiles: reports.iter().map(|report| report.tiles).sum(),
        pixels: reports.iter().map(|report| report.pixels).sum(),
        elapsed: start.elapsed(),
        reports,
    };

    info!(
        policy = %stats.policy,
        workers = stats.workers,
        tiles = stats.tiles,
        pixels = stats.pixels,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "render pass complete"
    );

    Ok(stats)
}

pub(crate) fn render_static_partition<Alg, CMap, S>(
    workers: usize,
    width: u32,
    height: u32,
    algorithm: &Alg,
    colour_map: &CMap,
    surface: &mut S,
) -> Result<Vec<WorkerReport>, RenderError>
where
    Alg: FractalAlgorithm + Sync,
    CMap: ColourMap<Alg::Success> + Sync,
    S: RenderSurface + Send,
{
    spawn_workers(
        workers,
        |worker| WorkSource::Band(static_band(worker, workers, width, height)),
        algorithm,
        colour_map,
        surface,
    )
}

pub(crate) fn render_task_queue<Alg, CMap, S>(
    queue: &TaskQueue,
    workers: usize,
    algorithm: &Alg,
    colour_map: &CMap,
    surface: &mut S,
) -> Result<Vec<WorkerReport>, RenderError>
where
    Alg: FractalAlgorithm + Sync,
    CMap: ColourMap<Alg::Success> + Sync,
    S: RenderSurface + Send,
{
    spawn_workers(workers, |_| WorkSource::Queue(queue), algorithm, colour_map, surface)
}

pub(crate) fn render_atomic_task_queue<Alg, CMap, S>(
    queue: &AtomicTaskQueue,
    workers: usize,
    algorithm: &Alg,
    colour_map: &CMap,
    surface: &mut S,
) -> Result<Vec<WorkerReport>, RenderError>
where
    Alg: FractalAlgorithm + Sync,
    CMap: ColourMap<Alg::Success> + Sync,
    S: RenderSurface + Send,
{
    spawn_workers(workers, |_| WorkSource::AtomicQueue(queue), algorithm, colour_map, surface)
}

/// Same tile grid as the queue policies, handed to a rayon pool built with
/// exactly `workers` threads for this pass only. The pool's threads are
/// spawned in a scope and joined before this returns.
pub(crate) fn render_work_stealing<Alg, CMap, S>(
    tiles: &[Tile],
    workers: usize,
    algorithm: &Alg,
    colour_map: &CMap,
    surface: &mut S,
) -> Result<Vec<WorkerReport>, RenderError>
where
    Alg: FractalAlgorithm + Sync,
    CMap: ColourMap<Alg::Success> + Sync,
    S: RenderSurface + Send,
{
    let surface = Mutex::new(surface);

    let rendered = thread::scope(|scope| -> Result<Vec<Result<(usize, u64), usize>>, RenderError> {
        let mut handles = Vec::with_capacity(workers);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|worker| format!("render-worker-{worker}"))
            .spawn_handler(|pool_thread| {
                let mut builder = thread::Builder::new();
                if let Some(name) = pool_thread.name() {
                    builder = builder.name(name.to_owned());
                }

                let handle = builder.spawn_scoped(scope, move || pool_thread.run())?;
                handles.push(handle);

                Ok(())
            })
            .build();

        let rendered = pool.map(|pool| {
            pool.install(|| {
                tiles
                    .par_iter()
                    .map(|&tile| {
                        let worker = rayon::current_thread_index().unwrap_or(0);

                        panic::catch_unwind(AssertUnwindSafe(|| render_tile(tile, algorithm, colour_map, &surface)))
                            .map(|pixels| (worker, pixels))
                            .map_err(|_| worker)
                    })
                    .collect::<Vec<_>>()
            })
        });

        // The pool was dropped inside `map` (or never built), so its threads are exiting.
        for handle in handles {
            let _ = handle.join();
        }

        Ok(rendered?)
    })?;

    let mut reports: Vec<WorkerReport> = (0..workers).map(WorkerReport::idle).collect();
    let mut panicked = None;

    for result in rendered {
        match result {
            Ok((worker, pixels)) => {
                if let Some(report) = reports.get_mut(worker) {
                    report.tiles += 1;
                    report.pixels += pixels;
                }
            }
            Err(worker) => {
                panicked.get_or_insert(worker);
            }
        }
    }

    if let Some(worker) = panicked {
        return Err(RenderError::WorkerPanicked { worker });
    }

    for report in &reports {
        debug!(worker = report.worker, tiles = report.tiles, pixels = report.pixels, "render worker finished");
    }

    Ok(reports)
}

fn spawn_workers<'q, Alg, CMap, S>(
    workers: usize,
    mut work_for: impl FnMut(usize) -> WorkSource<'q>,
    algorithm: &Alg,
    colour_map: &CMap,
    surface: &mut S,
) -> Result<Vec<WorkerReport>, RenderError>
where
    Alg: FractalAlgorithm + Sync,
    CMap: ColourMap<Alg::Success> + Sync,
    S: RenderSurface + Send,
{
    let surface = Mutex::new(surface);
    let surface = &surface;

    thread::scope(|scope| -> Result<Vec<WorkerReport>, RenderError> {
        let mut handles = Vec::with_capacity(workers);
        let mut spawn_error = None;

        for worker in 0..workers {
            let mut work = work_for(worker);

            let spawned = thread::Builder::new()
                .name(format!("render-worker-{worker}"))
                .spawn_scoped(scope, move || {
                    run_worker(worker, &mut work, algorithm, colour_map, surface)
                });

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    spawn_error = Some(RenderError::Spawn { worker, source });
                    break;
                }
            }
        }

        // Every handle is joined, even after a failure, so no panic escapes the scope.
        let joined: Vec<_> = handles.into_iter().map(|handle| handle.join()).collect();

        if let Some(err) = spawn_error {
            return Err(err);
        }

        joined
            .into_iter()
            .enumerate()
            .map(|(worker, joined)| joined.map_err(|_| RenderError::WorkerPanicked { worker }))
            .collect()
    })
}

fn run_worker<Alg, CMap, S>(
    worker: usize,
    work: &mut WorkSource<'_>,
    algorithm: &Alg,
    colour_map: &CMap,
    surface: &Mutex<&mut S>,
) -> WorkerReport
where
    Alg: FractalAlgorithm,
    CMap: ColourMap<Alg::Success>,
    S: RenderSurface,
{
    let mut report = WorkerReport::idle(worker);

    while let Some(tile) = work.next_tile() {
        report.pixels += render_tile(tile, algorithm, colour_map, surface);
        report.tiles += 1;
    }

    debug!(worker, tiles = report.tiles, pixels = report.pixels, "render worker finished");

    report
}

/// Computes each pixel unlocked, then takes the surface lock for the
/// colour + point pair only. Returns the number of pixels written.
fn render_tile<Alg, CMap, S>(
    tile: Tile,
    algorithm: &Alg,
    colour_map: &CMap,
    surface: &Mutex<&mut S>,
) -> u64
where
    Alg: FractalAlgorithm,
    CMap: ColourMap<Alg::Success>,
    S: RenderSurface,
{
    for point in tile.points() {
        let colour = colour_map.map(algorithm.compute(point));

        // Poison means another worker panicked; that panic is reported when it is joined.
        let mut surface = surface.lock().unwrap_or_else(PoisonError::into_inner);
        surface.set_draw_colour(colour);
        surface.draw_point(point);
    }

    tile.size()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::pixel_buffer::PixelBuffer;
    use crate::core::data::point::Point;
    use crate::core::fractals::mandelbrot::colour_mapping::factory::mandelbrot_colour_map_factory;
    use crate::core::fractals::mandelbrot::colour_mapping::kinds::MandelbrotColourMapKinds;
    use crate::core::fractals::mandelbrot::colour_mapping::maps::channel_multiplier::ChannelMultiplierMap;
    use std::cell::RefCell;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    const SENTINEL: Colour = Colour { r: 1, g: 2, b: 3 };

    fn viewport() -> Viewport {
        Viewport::new(-1.5, 0.5, -1.0, 1.0, 60).unwrap()
    }

    fn colour_map() -> ChannelMultiplierMap {
        mandelbrot_colour_map_factory(MandelbrotColourMapKinds::Tiled, viewport().max_iterations())
    }

    fn settings(policy: RenderPolicy, workers: usize) -> RenderSettings {
        RenderSettings { policy, workers, tile_size: DEFAULT_TILE_SIZE }
    }

    fn blank(width: u32, height: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(width, height).unwrap();
        buffer.clear(SENTINEL);
        buffer
    }

    /// Single-threaded render of the pixels accepted by `covered`.
    fn reference(width: u32, height: u32, covered: impl Fn(Point) -> bool) -> PixelBuffer {
        let algorithm = MandelbrotAlgorithm::new(viewport(), width, height);
        let colour_map = colour_map();
        let mut buffer = blank(width, height);

        for y in 0..height {
            for x in 0..width {
                let point = Point { x, y };
                if covered(point) {
                    buffer.set_pixel(point, colour_map.map(algorithm.compute(point))).unwrap();
                }
            }
        }

        buffer
    }

    fn render(policy: RenderPolicy, workers: usize, width: u32, height: u32) -> (PixelBuffer, RenderStats) {
        let mut buffer = blank(width, height);
        let stats = render_pass(&viewport(), &settings(policy, workers), &colour_map(), &mut buffer).unwrap();

        (buffer, stats)
    }

    #[test]
    fn test_all_policies_produce_identical_images() {
        let (width, height) = (80, 60);
        let expected = reference(width, height, |_| true);

        for &policy in RenderPolicy::ALL {
            for workers in [1, 2, 3, 4, 5, 6] {
                let (buffer, stats) = render(policy, workers, width, height);

                assert_eq!(buffer, expected, "{policy} with {workers} workers");
                assert_eq!(stats.pixels, u64::from(width * height));
            }
        }
    }

    #[test]
    fn test_static_partition_matches_reference_for_every_worker_count() {
        let (width, height) = (30, 24);

        for workers in 1..=height as usize {
            let covered_rows = workers as u32 * (height / workers as u32);
            let expected = reference(width, height, |p| p.y < covered_rows);
            let (buffer, stats) = render(RenderPolicy::StaticPartition, workers, width, height);

            assert_eq!(buffer, expected, "{workers} workers");
            assert_eq!(stats.pixels, u64::from(width * covered_rows));
            assert_eq!(stats.reports.len(), workers);
        }
    }

    #[test]
    fn test_tile_policies_match_reference_for_every_worker_count() {
        let (width, height) = (50, 45);
        let expected = reference(width, height, |p| p.x < 40 && p.y < 40);

        for &policy in &[RenderPolicy::TaskQueue, RenderPolicy::AtomicTaskQueue, RenderPolicy::WorkStealing] {
            for workers in 1..=height as usize {
                let (buffer, stats) = render(policy, workers, width, height);

                assert_eq!(buffer, expected, "{policy} with {workers} workers");
                assert_eq!(stats.tiles, 4);
            }
        }
    }

    #[test]
    fn test_zero_workers_is_rejected_before_rendering() {
        let mut buffer = blank(40, 40);

        for &policy in RenderPolicy::ALL {
            let result = render_pass(&viewport(), &settings(policy, 0), &colour_map(), &mut buffer);
            assert!(matches!(result, Err(RenderError::NoWorkers)));
        }

        assert_eq!(buffer, blank(40, 40));
    }

    #[test]
    fn test_zero_tile_size_is_rejected_for_tile_policies() {
        let mut buffer = blank(40, 40);
        let settings = RenderSettings { policy: RenderPolicy::TaskQueue, workers: 2, tile_size: 0 };

        let result = render_pass(&viewport(), &settings, &colour_map(), &mut buffer);

        assert!(matches!(result, Err(RenderError::ZeroTileSize)));
    }

    #[test]
    fn test_task_queue_is_exhausted_after_pass() {
        let (width, height) = (100, 60);
        let queue = TaskQueue::new(width, height, DEFAULT_TILE_SIZE);
        let algorithm = MandelbrotAlgorithm::new(viewport(), width, height);
        let mut buffer = blank(width, height);

        let reports = render_task_queue(&queue, 4, &algorithm, &colour_map(), &mut buffer).unwrap();

        assert!(queue.all_claimed());
        assert_eq!(queue.claim_next_tile(), None);
        assert_eq!(reports.iter().map(|r| r.tiles).sum::<usize>(), 15);
    }

    #[test]
    fn test_atomic_task_queue_is_exhausted_after_pass() {
        let (width, height) = (100, 60);
        let queue = AtomicTaskQueue::new(width, height, DEFAULT_TILE_SIZE);
        let algorithm = MandelbrotAlgorithm::new(viewport(), width, height);
        let mut buffer = blank(width, height);

        render_atomic_task_queue(&queue, 3, &algorithm, &colour_map(), &mut buffer).unwrap();

        assert!(queue.all_claimed());
        assert_eq!(queue.claim_next_tile(), None);
    }

    #[test]
    fn test_more_workers_than_rows_renders_nothing_statically() {
        let (buffer, stats) = render(RenderPolicy::StaticPartition, 10, 8, 4);

        assert_eq!(buffer, blank(8, 4));
        assert_eq!(stats.pixels, 0);
        assert_eq!(stats.workers, 10);
    }

    /// Flags any `draw_point` that starts while another is still running.
    struct InterleaveDetector {
        width: u32,
        height: u32,
        in_progress: AtomicBool,
        overlapped: AtomicBool,
        writes: AtomicUsize,
    }

    impl InterleaveDetector {
        fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                in_progress: AtomicBool::new(false),
                overlapped: AtomicBool::new(false),
                writes: AtomicUsize::new(0),
            }
        }
    }

    impl RenderSurface for InterleaveDetector {
        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn set_draw_colour(&mut self, _colour: Colour) {}

        fn draw_point(&mut self, _point: Point) {
            if self.in_progress.swap(true, Ordering::SeqCst) {
                self.overlapped.store(true, Ordering::SeqCst);
            }

            for _ in 0..32 {
                std::hint::spin_loop();
            }

            self.writes.fetch_add(1, Ordering::SeqCst);
            self.in_progress.store(false, Ordering::SeqCst);
        }

        fn clear(&mut self, _colour: Colour) {}
    }

    #[test]
    fn test_surface_writes_never_interleave() {
        let mut surface = InterleaveDetector::new(200, 160);

        let stats = render_pass(
            &viewport(),
            &settings(RenderPolicy::TaskQueue, 8),
            &colour_map(),
            &mut surface,
        )
        .unwrap();

        assert!(!surface.overlapped.load(Ordering::SeqCst));
        assert_eq!(surface.writes.load(Ordering::SeqCst), 200 * 160);
        assert_eq!(stats.pixels, 200 * 160);
    }

    thread_local! {
        static HELD_TOKEN: RefCell<Option<Arc<()>>> = const { RefCell::new(None) };
    }

    /// Parks a clone of `token` in a thread-local of every thread that maps a
    /// pixel. The clone is only released when that thread has fully exited.
    struct ThreadTrackingMap {
        token: Arc<()>,
        threads: AtomicUsize,
    }

    impl ColourMap<u32> for ThreadTrackingMap {
        fn map(&self, _value: u32) -> Colour {
            HELD_TOKEN.with(|held| {
                let mut held = held.borrow_mut();
                if held.is_none() {
                    *held = Some(Arc::clone(&self.token));
                    self.threads.fetch_add(1, Ordering::SeqCst);
                }
            });

            Colour::BLACK
        }

        fn display_name(&self) -> &str {
            "thread tracking"
        }
    }

    #[test]
    fn test_no_worker_thread_outlives_its_pass() {
        for &policy in RenderPolicy::ALL {
            for _ in 0..5 {
                let colour_map = ThreadTrackingMap { token: Arc::new(()), threads: AtomicUsize::new(0) };
                let mut buffer = blank(80, 60);

                render_pass(&viewport(), &settings(policy, 8), &colour_map, &mut buffer).unwrap();

                assert!(colour_map.threads.load(Ordering::SeqCst) > 0, "{policy}");
                assert_eq!(Arc::strong_count(&colour_map.token), 1, "{policy} left worker threads running");
            }
        }
    }

    /// Panics on the first pixel of every 20th row.
    struct PanickingSurface(PixelBuffer);

    impl RenderSurface for PanickingSurface {
        fn size(&self) -> (u32, u32) {
            self.0.size()
        }

        fn set_draw_colour(&mut self, colour: Colour) {
            self.0.set_draw_colour(colour);
        }

        fn draw_point(&mut self, point: Point) {
            assert!(point.x != 0 || point.y % 20 != 0, "surface rejected {point:?}");
            self.0.draw_point(point);
        }

        fn clear(&mut self, colour: Colour) {
            self.0.clear(colour);
        }
    }

    #[test]
    fn test_worker_panics_are_reported_as_errors() {
        for &policy in RenderPolicy::ALL {
            for workers in [1, 3, 8] {
                let mut surface = PanickingSurface(blank(80, 60));

                let result = render_pass(&viewport(), &settings(policy, workers), &colour_map(), &mut surface);

                assert!(
                    matches!(result, Err(RenderError::WorkerPanicked { worker }) if worker < workers),
                    "{policy} with {workers} workers: {result:?}"
                );
            }
        }
    }

    #[test]
    fn test_surface_is_usable_after_a_worker_panicked() {
        let mut surface = PanickingSurface(blank(80, 60));
        let _ = render_pass(&viewport(), &settings(RenderPolicy::TaskQueue, 4), &colour_map(), &mut surface);

        let mut buffer = surface.0;
        let stats = render_pass(&viewport(), &settings(RenderPolicy::TaskQueue, 4), &colour_map(), &mut buffer).unwrap();

        assert_eq!(stats.pixels, 80 * 60);
        assert_eq!(buffer, reference(80, 60, |_| true));
    }
}
