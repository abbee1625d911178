use crate::core::actions::navigate::Navigation;
use crate::core::actions::render::policy::RenderPolicy;

/// One step of the interactive command loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Apply a viewport transform and re-render.
    Navigate(Navigation),
    /// Recentre on a clicked surface pixel and re-render.
    Recenter { x: u32, y: u32 },
    /// Takes effect on the next render; does not render by itself.
    SetWorkers(usize),
    /// Takes effect on the next render; does not render by itself.
    SetPolicy(RenderPolicy),
    Quit,
}

impl Command {
    #[must_use]
    pub fn triggers_render(&self) -> bool {
        matches!(self, Self::Navigate(_) | Self::Recenter { .. })
    }
}
