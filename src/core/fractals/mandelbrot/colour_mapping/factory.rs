use crate::core::fractals::mandelbrot::colour_mapping::kinds::MandelbrotColourMapKinds;
use crate::core::fractals::mandelbrot::colour_mapping::maps::channel_multiplier::ChannelMultiplierMap;

#[must_use]
pub fn mandelbrot_colour_map_factory(
    kind: MandelbrotColourMapKinds,
    max_iterations: u32,
) -> ChannelMultiplierMap {
    ChannelMultiplierMap::new(kind.display_name(), max_iterations, kind.multipliers())
}
