#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from wide channel values, keeping only the low 8 bits of each.
    #[must_use]
    pub const fn from_wrapping(r: u64, g: u64, b: u64) -> Self {
        Self {
            r: r as u8,
            g: g as u8,
            b: b as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wrapping_keeps_low_byte() {
        assert_eq!(Colour::from_wrapping(255, 256, 1275), Colour::new(255, 0, 251));
    }
}
