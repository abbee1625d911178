use crate::core::actions::render::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;

/// Scales the iteration count to `0..=255`, then multiplies each channel.
///
/// Channels are not clamped: a product above 255 keeps only its low byte,
/// which is what gives the banded look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMultiplierMap {
    name: &'static str,
    max_iterations: u32,
    multipliers: [u64; 3],
}

impl ChannelMultiplierMap {
    #[must_use]
    pub fn new(name: &'static str, max_iterations: u32, multipliers: [u64; 3]) -> Self {
        Self { name, max_iterations: max_iterations.max(1), multipliers }
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

impl ColourMap<u32> for ChannelMultiplierMap {
    fn map(&self, iterations: u32) -> Colour {
        let level = 255 * u64::from(iterations) / u64::from(self.max_iterations);
        let [r, g, b] = self.multipliers;

        Colour::from_wrapping(level * r, level * g, level * b)
    }

    fn display_name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_iterations_is_black() {
        let map = ChannelMultiplierMap::new("test", 100, [10, 20, 50]);

        assert_eq!(map.map(0), Colour::BLACK);
    }

    #[test]
    fn test_unit_multipliers_give_grey_ramp() {
        let map = ChannelMultiplierMap::new("grey", 100, [1, 1, 1]);

        assert_eq!(map.map(100), Colour::new(255, 255, 255));
        assert_eq!(map.map(50), Colour::new(127, 127, 127));
    }

    #[test]
    fn test_channels_wrap_instead_of_clamping() {
        let map = ChannelMultiplierMap::new("banded", 500, [5, 10, 15]);

        // 255 * 5 = 1275, 255 * 10 = 2550, 255 * 15 = 3825
        assert_eq!(map.map(500), Colour::new(251, 246, 241));
    }

    #[test]
    fn test_level_uses_integer_division() {
        let map = ChannelMultiplierMap::new("serial", 500, [4, 1, 1]);

        // 255 * 3 / 500 = 1
        assert_eq!(map.map(3), Colour::new(4, 1, 1));
        // 255 * 1 / 500 = 0
        assert_eq!(map.map(1), Colour::BLACK);
    }

    #[test]
    fn test_huge_budgets_do_not_overflow() {
        let map = ChannelMultiplierMap::new("tiled", u32::MAX, [10, 20, 50]);

        assert_eq!(map.map(u32::MAX), Colour::from_wrapping(2550, 5100, 12750));
    }
}
