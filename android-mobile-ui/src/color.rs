use core::fmt;

use crate::Theme;

/// A 32-bit ARGB color, laid out as `0xAARRGGBB`.
///
/// This is the same packing that `android.graphics.Color` uses, so the raw
/// value can be handed to `Window.setStatusBarColor()` as-is.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(0xff, 0xff, 0xff);
    pub const TRANSPARENT: Color = Color::from_argb(0, 0, 0, 0);

    pub const fn from_argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self((alpha as u32) << 24 | (red as u32) << 16 | (green as u32) << 8 | blue as u32)
    }

    /// An opaque color
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::from_argb(0xff, red, green, blue)
    }

    pub const fn argb(&self) -> u32 {
        self.0
    }

    pub const fn alpha(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(&self) -> u8 {
        self.0 as u8
    }

    /// Perceived darkness in `[0, 1]`, using the ITU-R BT.601 luma weights.
    pub fn darkness(&self) -> f64 {
        let luma = 0.299 * self.red() as f64 + 0.587 * self.green() as f64 + 0.114 * self.blue() as f64;
        1.0 - luma / 255.0
    }

    /// Whether this color is light enough that bar content drawn on top of
    /// it needs to be dark. Alpha is ignored.
    pub fn is_light(&self) -> bool {
        self.darkness() < 0.2
    }

    /// The bar [`Theme`] for a bar with this background color
    pub fn bar_theme(&self) -> Theme {
        if self.is_light() {
            Theme::Light
        } else {
            Theme::Dark
        }
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Self(argb)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(#{:08x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_unpack_from_argb() {
        let c = Color::from(0x80_12_34_56);
        assert_eq!(c.alpha(), 0x80);
        assert_eq!(c.red(), 0x12);
        assert_eq!(c.green(), 0x34);
        assert_eq!(c.blue(), 0x56);
        assert_eq!(Color::from_argb(0x80, 0x12, 0x34, 0x56), c);
    }

    #[test]
    fn extremes() {
        assert!(Color::WHITE.is_light());
        assert!(!Color::BLACK.is_light());
        assert_eq!(Color::WHITE.bar_theme(), Theme::Light);
        assert_eq!(Color::BLACK.bar_theme(), Theme::Dark);
    }

    #[test]
    fn light_threshold_is_exclusive() {
        // darkness == 0.2 exactly needs luma == 204; a grey of 204 sits on it
        // and anything brighter is light.
        let on_threshold = Color::from_rgb(204, 204, 204);
        assert!((on_threshold.darkness() - 0.2).abs() < 1e-9);
        assert!(Color::from_rgb(205, 205, 205).is_light());
        assert!(!Color::from_rgb(200, 200, 200).is_light());
    }

    #[test]
    fn green_weighs_more_than_blue() {
        // Pure green is fairly bright, pure blue is very dark.
        assert!(Color::from_rgb(0, 255, 0).darkness() < Color::from_rgb(0, 0, 255).darkness());
        assert!(!Color::from_rgb(0, 0, 255).is_light());
        assert!(Color::from_rgb(255, 255, 0).is_light());
    }

    #[test]
    fn alpha_does_not_affect_lightness() {
        assert_eq!(
            Color::from_argb(0, 250, 250, 250).is_light(),
            Color::from_argb(0xff, 250, 250, 250).is_light()
        );
    }
}
