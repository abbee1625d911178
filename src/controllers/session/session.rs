use thiserror::Error;
use tracing::{debug, info, warn};

use crate::controllers::session::command::Command;
use crate::core::actions::navigate::Navigation;
use crate::core::actions::render::ports::render_surface::RenderSurface;
use crate::core::actions::render::worker_pool::{RenderError, RenderSettings, RenderStats, render_pass};
use crate::core::data::colour::Colour;
use crate::core::data::viewport::{Viewport, ViewportError};
use crate::core::fractals::mandelbrot::colour_mapping::factory::mandelbrot_colour_map_factory;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::MandelbrotColourMapKinds;
use crate::core::fractals::mandelbrot::mandelbrot_config::MandelbrotConfig;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Viewport(#[from] ViewportError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("worker count must be at least 1")]
    InvalidWorkerCount,
}

impl SessionError {
    /// Errors after which the surface can no longer be trusted.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Render(
                RenderError::Spawn { .. } | RenderError::ThreadPool(_) | RenderError::WorkerPanicked { .. }
            )
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Rendered(RenderStats),
    /// Settings changed; nothing was drawn.
    Updated,
    Quit,
}

pub struct Session<S: RenderSurface> {
    surface: S,
    viewport: Viewport,
    settings: RenderSettings,
    colour_map_kind: MandelbrotColourMapKinds,
    clear_colour: Colour,
}

impl<S: RenderSurface + Send> Session<S> {
    pub fn new(config: &MandelbrotConfig, surface: S) -> Result<Self, SessionError> {
        let viewport = config.viewport()?;
        let settings = config.render_settings();
        settings.validate()?;

        Ok(Self {
            surface,
            viewport,
            settings,
            colour_map_kind: config.colour_map_kind,
            clear_colour: config.clear_colour,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn settings(&self) -> RenderSettings {
        self.settings
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Clears the surface and draws the first frame.
    pub fn start(&mut self) -> Result<RenderStats, SessionError> {
        info!(
            "coordinates: {} {} {} {}",
            self.viewport.xmin(),
            self.viewport.xmax(),
            self.viewport.ymin(),
            self.viewport.ymax()
        );

        self.surface.clear(self.clear_colour);
        self.render()
    }

    /// Runs one full render pass of the current viewport.
    pub fn render(&mut self) -> Result<RenderStats, SessionError> {
        let colour_map = mandelbrot_colour_map_factory(self.colour_map_kind, self.viewport.max_iterations());

        Ok(render_pass(&self.viewport, &self.settings, &colour_map, &mut self.surface)?)
    }

    /// Applies `command`, rendering synchronously if it changes the viewport.
    ///
    /// A rejected transform leaves the current viewport in place.
    pub fn handle(&mut self, command: Command) -> Result<SessionOutcome, SessionError> {
        match command {
            Command::Navigate(navigation) => self.navigate(navigation),
            Command::Recenter { x, y } => {
                let (width, height) = self.surface.size();
                self.navigate(Navigation::Recenter { x, y, width, height })
            }
            Command::SetWorkers(0) => {
                warn!("ignoring request for zero render workers");
                Err(SessionError::InvalidWorkerCount)
            }
            Command::SetWorkers(workers) => {
                debug!(workers, "render worker count changed");
                self.settings.workers = workers;
                Ok(SessionOutcome::Updated)
            }
            Command::SetPolicy(policy) => {
                let settings = RenderSettings { policy, ..self.settings };
                settings.validate()?;

                debug!(%policy, "render policy changed");
                self.settings = settings;
                Ok(SessionOutcome::Updated)
            }
            Command::Quit => Ok(SessionOutcome::Quit),
        }
    }

    fn navigate(&mut self, navigation: Navigation) -> Result<SessionOutcome, SessionError> {
        let viewport = navigation.apply(&self.viewport).inspect_err(|err| {
            warn!(command = navigation.name(), %err, "rejected viewport transform");
        })?;

        debug!(
            command = navigation.name(),
            xmin = viewport.xmin(),
            xmax = viewport.xmax(),
            ymin = viewport.ymin(),
            ymax = viewport.ymax(),
            max_iterations = viewport.max_iterations(),
            "viewport updated"
        );

        self.viewport = viewport;

        Ok(SessionOutcome::Rendered(self.render()?))
    }
}
