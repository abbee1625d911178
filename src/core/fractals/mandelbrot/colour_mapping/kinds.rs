/// Colour presets, one per rendering strategy of the classic explorer.
///
/// The presets only differ in the per-channel multipliers; see
/// [`ChannelMultiplierMap`](super::maps::channel_multiplier::ChannelMultiplierMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MandelbrotColourMapKinds {
    Serial,
    Banded,
    #[default]
    Tiled,
}

impl MandelbrotColourMapKinds {
    pub const ALL: &'static [Self] = &[Self::Tiled, Self::Banded, Self::Serial];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Serial => "Serial",
            Self::Banded => "Banded",
            Self::Tiled => "Tiled",
        }
    }

    #[must_use]
    pub const fn multipliers(self) -> [u64; 3] {
        match self {
            Self::Serial => [4, 1, 1],
            Self::Banded => [5, 10, 15],
            Self::Tiled => [10, 20, 50],
        }
    }
}

impl std::fmt::Display for MandelbrotColourMapKinds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}
