//! Android's system UI bit flags, plus the read-modify-write helpers that
//! flip a single "light bar" bit for a given [`SystemBar`].

use bitflags::bitflags;

use crate::{SystemBar, Theme};

bitflags! {
    /// Flags for [`Window.addFlags()`] and [`Window.clearFlags()`]
    ///
    /// Only the flags this crate touches are named here.
    ///
    /// [`Window.addFlags()`]: https://developer.android.com/reference/android/view/Window#addFlags(int)
    /// [`Window.clearFlags()`]: https://developer.android.com/reference/android/view/Window#clearFlags(int)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        const KEEP_SCREEN_ON = 0x0000_0080;
        const TRANSLUCENT_STATUS = 0x0400_0000;
        const TRANSLUCENT_NAVIGATION = 0x0800_0000;
        const DRAWS_SYSTEM_BAR_BACKGROUNDS = 0x8000_0000;
    }
}

bitflags! {
    /// `View.SYSTEM_UI_FLAG_*` bits, as used with `View.setSystemUiVisibility()`
    ///
    /// Deprecated by Android in API level 30, where [`Appearance`] takes over.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SystemUiVisibility: u32 {
        const LIGHT_NAVIGATION_BAR = 0x0000_0010;
        const LAYOUT_STABLE = 0x0000_0100;
        const LAYOUT_HIDE_NAVIGATION = 0x0000_0200;
        const LIGHT_STATUS_BAR = 0x0000_2000;

        // Bits we don't name must survive a read-modify-write
        const _ = !0;
    }
}

bitflags! {
    /// `WindowInsetsController.APPEARANCE_*` bits (API level 30+)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Appearance: u32 {
        const OPAQUE_STATUS_BARS = 0x0000_0001;
        const OPAQUE_NAVIGATION_BARS = 0x0000_0002;
        const LOW_PROFILE_BARS = 0x0000_0004;
        const LIGHT_STATUS_BARS = 0x0000_0008;
        const LIGHT_NAVIGATION_BARS = 0x0000_0010;
        const SEMI_TRANSPARENT_STATUS_BARS = 0x0000_0020;
        const SEMI_TRANSPARENT_NAVIGATION_BARS = 0x0000_0040;

        const _ = !0;
    }
}

impl WindowFlags {
    /// The translucency flag that has to be cleared before a bar's
    /// background color takes effect.
    pub fn translucent(bar: SystemBar) -> Self {
        match bar {
            SystemBar::Status => WindowFlags::TRANSLUCENT_STATUS,
            SystemBar::Navigation => WindowFlags::TRANSLUCENT_NAVIGATION,
        }
    }

    /// `jint` view of the flags. `DRAWS_SYSTEM_BAR_BACKGROUNDS` is the sign bit.
    pub fn as_jint(&self) -> i32 {
        self.bits() as i32
    }
}

impl SystemUiVisibility {
    pub fn light_bar(bar: SystemBar) -> Self {
        match bar {
            SystemBar::Status => SystemUiVisibility::LIGHT_STATUS_BAR,
            SystemBar::Navigation => SystemUiVisibility::LIGHT_NAVIGATION_BAR,
        }
    }

    /// Returns `self` with only the light-bar bit of `bar` changed to match `theme`.
    pub fn with_theme(self, bar: SystemBar, theme: Theme) -> Self {
        let mut visibility = self;
        visibility.set(Self::light_bar(bar), theme == Theme::Light);
        visibility
    }
}

impl Appearance {
    pub fn light_bar(bar: SystemBar) -> Self {
        match bar {
            SystemBar::Status => Appearance::LIGHT_STATUS_BARS,
            SystemBar::Navigation => Appearance::LIGHT_NAVIGATION_BARS,
        }
    }

    /// Computes the `(appearance, mask)` pair for
    /// `WindowInsetsController.setSystemBarsAppearance()`.
    ///
    /// The mask only contains the light-bar bit of `bar`, so the controller
    /// leaves every other appearance bit alone.
    pub fn with_theme(self, bar: SystemBar, theme: Theme) -> (Self, Self) {
        let mask = Self::light_bar(bar);
        let mut appearance = self;
        appearance.set(mask, theme == Theme::Light);
        (appearance, mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_system_bar_backgrounds_is_the_sign_bit() {
        assert_eq!(WindowFlags::DRAWS_SYSTEM_BAR_BACKGROUNDS.as_jint(), i32::MIN);
        assert_eq!(WindowFlags::KEEP_SCREEN_ON.as_jint(), 0x80);
    }

    #[test]
    fn appearance_only_touches_the_targeted_bit() {
        // Every possible "other bits" pattern in the low byte plus some
        // unnamed high bits.
        for low in 0u32..=0xff {
            let current = Appearance::from_bits_retain(low | 0x5a00_0000);
            for bar in [SystemBar::Status, SystemBar::Navigation] {
                let target = Appearance::light_bar(bar);
                for theme in [Theme::Light, Theme::Dark] {
                    let (value, mask) = current.with_theme(bar, theme);
                    assert_eq!(mask, target);
                    assert_eq!(value.difference(target), current.difference(target));
                    assert_eq!(value.contains(target), theme == Theme::Light);
                }
            }
        }
    }

    #[test]
    fn legacy_visibility_only_touches_the_targeted_bit() {
        let current = SystemUiVisibility::LAYOUT_STABLE
            | SystemUiVisibility::LIGHT_NAVIGATION_BAR
            | SystemUiVisibility::from_bits_retain(0x0001_0000);

        let dark = current.with_theme(SystemBar::Navigation, Theme::Dark);
        assert_eq!(
            dark,
            SystemUiVisibility::LAYOUT_STABLE | SystemUiVisibility::from_bits_retain(0x0001_0000)
        );

        let light = current.with_theme(SystemBar::Status, Theme::Light);
        assert_eq!(light, current | SystemUiVisibility::LIGHT_STATUS_BAR);
    }

    #[test]
    fn translucency_flag_per_bar() {
        assert_eq!(WindowFlags::translucent(SystemBar::Status), WindowFlags::TRANSLUCENT_STATUS);
        assert_eq!(
            WindowFlags::translucent(SystemBar::Navigation),
            WindowFlags::TRANSLUCENT_NAVIGATION
        );
    }
}
