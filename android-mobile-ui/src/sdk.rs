use core::fmt;

use crate::flags::{Appearance, SystemUiVisibility};
use crate::{SystemBar, Theme};

/// An Android API level, as found in [`Build.VERSION.SDK_INT`]
///
/// [`Build.VERSION.SDK_INT`]: https://developer.android.com/reference/android/os/Build.VERSION#SDK_INT
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiLevel(pub i32);

impl ApiLevel {
    /// Android 8.0, `VibrationEffect`
    pub const O: ApiLevel = ApiLevel(26);
    /// Android 9, `DisplayCutout`
    pub const P: ApiLevel = ApiLevel(28);
    /// Android 11, `WindowInsetsController`
    pub const R: ApiLevel = ApiLevel(30);

    pub fn has_display_cutout(&self) -> bool {
        *self >= Self::P
    }

    pub fn has_predefined_vibrations(&self) -> bool {
        *self >= Self::O
    }

    pub fn has_insets_controller(&self) -> bool {
        *self >= Self::R
    }
}

impl fmt::Debug for ApiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API {}", self.0)
    }
}

/// How system bar themes get applied on this device
///
/// Resolved once from the [`ApiLevel`] when the bridge is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarStyle {
    /// `View.setSystemUiVisibility()` (API level 23 to 29)
    SystemUiVisibility,
    /// `WindowInsetsController.setSystemBarsAppearance()` (API level 30+)
    InsetsController,
}

impl BarStyle {
    pub fn for_api_level(api: ApiLevel) -> Self {
        if api.has_insets_controller() {
            BarStyle::InsetsController
        } else {
            BarStyle::SystemUiVisibility
        }
    }

    /// Android resets the inset controller's appearance on rotation, so the
    /// theme has to be re-applied whenever the display rotates.
    pub fn resets_on_rotation(&self) -> bool {
        matches!(self, BarStyle::InsetsController)
    }
}

/// A theme change ready to be written to the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BarStyleUpdate {
    Visibility(SystemUiVisibility),
    Appearance {
        appearance: Appearance,
        mask: Appearance,
    },
}

impl BarStyleUpdate {
    pub(crate) fn visibility(current: SystemUiVisibility, bar: SystemBar, theme: Theme) -> Self {
        BarStyleUpdate::Visibility(current.with_theme(bar, theme))
    }

    pub(crate) fn appearance(current: Appearance, bar: SystemBar, theme: Theme) -> Self {
        let (appearance, mask) = current.with_theme(bar, theme);
        BarStyleUpdate::Appearance { appearance, mask }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_switches_at_api_30() {
        assert_eq!(BarStyle::for_api_level(ApiLevel(23)), BarStyle::SystemUiVisibility);
        assert_eq!(BarStyle::for_api_level(ApiLevel(29)), BarStyle::SystemUiVisibility);
        assert_eq!(BarStyle::for_api_level(ApiLevel(30)), BarStyle::InsetsController);
        assert_eq!(BarStyle::for_api_level(ApiLevel(34)), BarStyle::InsetsController);
        assert!(!BarStyle::SystemUiVisibility.resets_on_rotation());
        assert!(BarStyle::InsetsController.resets_on_rotation());
    }

    #[test]
    fn capability_gates() {
        assert!(!ApiLevel(27).has_display_cutout());
        assert!(ApiLevel(28).has_display_cutout());
        assert!(!ApiLevel(25).has_predefined_vibrations());
        assert!(ApiLevel(26).has_predefined_vibrations());
    }

    #[test]
    fn appearance_update_masks_the_bar_bit() {
        let update = BarStyleUpdate::appearance(
            Appearance::OPAQUE_STATUS_BARS,
            SystemBar::Navigation,
            Theme::Light,
        );
        assert_eq!(
            update,
            BarStyleUpdate::Appearance {
                appearance: Appearance::OPAQUE_STATUS_BARS | Appearance::LIGHT_NAVIGATION_BARS,
                mask: Appearance::LIGHT_NAVIGATION_BARS,
            }
        );
    }
}
