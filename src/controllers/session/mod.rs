//! The control thread of the explorer.
//!
//! A [`Session`] owns the current viewport, the render settings and the
//! surface. Each command is applied in full, including the synchronous render
//! pass it triggers, before the next one is accepted.

mod command;
mod session;

pub use command::Command;
pub use session::{Session, SessionError, SessionOutcome};
