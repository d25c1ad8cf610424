use std::time::Duration;

use crate::haptics::VibrationEffect;

/// Tunables for an [`AndroidUiBridge`](crate::AndroidUiBridge)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Reported by [`AndroidUiBridge::statusbar_height()`](crate::AndroidUiBridge::statusbar_height),
    /// in logical pixels.
    pub statusbar_height: i32,

    /// Reported by [`AndroidUiBridge::navbar_height()`](crate::AndroidUiBridge::navbar_height),
    /// in logical pixels.
    pub navbar_height: i32,

    /// Effect played by [`AndroidUiBridge::vibrate()`](crate::AndroidUiBridge::vibrate) on API level 26+
    pub haptic_effect: VibrationEffect,

    /// Pulse length for devices that predate `VibrationEffect`
    pub legacy_vibration: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        // TODO: query the real bar heights from the `status_bar_height` and
        // `navigation_bar_height` dimension resources
        Self {
            statusbar_height: 24,
            navbar_height: 48,
            haptic_effect: VibrationEffect::Tick,
            legacy_vibration: Duration::from_millis(25),
        }
    }
}
