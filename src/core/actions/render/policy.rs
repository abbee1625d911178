use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// How a render pass distributes pixels across its workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPolicy {
    /// One contiguous row band per worker, fixed before the workers start.
    StaticPartition,
    /// Workers claim square tiles from a mutex-guarded list.
    #[default]
    TaskQueue,
    /// Same tiles as `TaskQueue`, claimed through an atomic index.
    AtomicTaskQueue,
    /// Same tiles, scheduled by a per-pass rayon pool.
    WorkStealing,
}

impl RenderPolicy {
    pub const ALL: &'static [Self] = &[
        Self::TaskQueue,
        Self::StaticPartition,
        Self::AtomicTaskQueue,
        Self::WorkStealing,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StaticPartition => "static",
            Self::TaskQueue => "queue",
            Self::AtomicTaskQueue => "atomic",
            Self::WorkStealing => "work-stealing",
        }
    }
}

impl fmt::Display for RenderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown render policy '{0}', expected one of: static, queue, atomic, work-stealing")]
pub struct ParseRenderPolicyError(String);

impl FromStr for RenderPolicy {
    type Err = ParseRenderPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|policy| policy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseRenderPolicyError(s.to_owned()))
    }
}
