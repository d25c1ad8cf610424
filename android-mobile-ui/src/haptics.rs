use std::time::Duration;

use crate::sdk::ApiLevel;

/// `VibrationEffect.EFFECT_*` predefined haptic effects (API level 26+)
///
/// See [VibrationEffect docs](https://developer.android.com/reference/android/os/VibrationEffect#EFFECT_CLICK)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, num_enum::IntoPrimitive)]
#[repr(i32)]
pub enum VibrationEffect {
    Click = 0,
    DoubleClick = 1,
    #[default]
    Tick = 2,
    HeavyClick = 5,
}

/// What a single haptic pulse turns into on a given device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Vibration {
    Predefined(VibrationEffect),
    /// `Vibrator.vibrate(long)`, deprecated in API level 26
    OneShot(Duration),
}

impl Vibration {
    pub(crate) fn plan(api: ApiLevel, effect: VibrationEffect, fallback: Duration) -> Self {
        if api.has_predefined_vibrations() {
            Vibration::Predefined(effect)
        } else {
            Vibration::OneShot(fallback)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_codes() {
        assert_eq!(i32::from(VibrationEffect::Click), 0);
        assert_eq!(i32::from(VibrationEffect::DoubleClick), 1);
        assert_eq!(i32::from(VibrationEffect::Tick), 2);
        assert_eq!(i32::from(VibrationEffect::HeavyClick), 5);
    }

    #[test]
    fn legacy_devices_get_a_timed_pulse() {
        let ms25 = Duration::from_millis(25);
        assert_eq!(
            Vibration::plan(ApiLevel(25), VibrationEffect::HeavyClick, ms25),
            Vibration::OneShot(ms25)
        );
        assert_eq!(
            Vibration::plan(ApiLevel(26), VibrationEffect::HeavyClick, ms25),
            Vibration::Predefined(VibrationEffect::HeavyClick)
        );
    }
}
