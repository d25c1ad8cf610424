use std::time::Duration;

use crate::error::InternalResult;
use crate::flags::{Appearance, SystemUiVisibility, WindowFlags};
use crate::haptics::VibrationEffect;
use crate::orientation::{DisplayRotation, ScreenOrientation};
use crate::sdk::ApiLevel;
use crate::{Color, SystemBar};

/// Safe insets of a display cutout, in physical pixels
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CutoutInsets {
    pub top: i32,
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

/// The Android calls the bridge is built from
///
/// Every method is a thin wrapper around one Java call (or a short fixed chain
/// of getters). Version checks and flag arithmetic stay in the bridge, so an
/// implementation only has to translate. Methods that mutate the window are
/// only ever called from a [`UiTask`](crate::UiTask).
pub(crate) trait Platform: Send + Sync {
    /// Read once, when the bridge is created
    fn api_level(&self) -> ApiLevel;

    fn add_window_flags(&self, flags: WindowFlags) -> InternalResult<()>;
    fn clear_window_flags(&self, flags: WindowFlags) -> InternalResult<()>;
    fn set_bar_color(&self, bar: SystemBar, color: Color) -> InternalResult<()>;

    fn system_ui_visibility(&self) -> InternalResult<SystemUiVisibility>;
    fn set_system_ui_visibility(&self, visibility: SystemUiVisibility) -> InternalResult<()>;

    fn system_bars_appearance(&self) -> InternalResult<Appearance>;
    fn set_system_bars_appearance(&self, appearance: Appearance, mask: Appearance)
        -> InternalResult<()>;

    /// `None` if the window isn't attached or the display has no cutout.
    /// Only called on API level 28+.
    fn display_cutout(&self) -> InternalResult<Option<CutoutInsets>>;
    /// `DisplayMetrics.density`, i.e. physical pixels per logical pixel
    fn display_density(&self) -> InternalResult<f32>;
    fn display_rotation(&self) -> InternalResult<DisplayRotation>;
    /// The raw `Configuration.uiMode` field
    fn ui_mode(&self) -> InternalResult<i32>;

    fn set_requested_orientation(&self, orientation: ScreenOrientation) -> InternalResult<()>;

    fn has_vibrator(&self) -> InternalResult<bool>;
    /// Only called on API level 26+
    fn vibrate_effect(&self, effect: VibrationEffect) -> InternalResult<()>;
    fn vibrate_for(&self, duration: Duration) -> InternalResult<()>;

    /// Calls a public `void name()` method on the Activity. May be called
    /// from any thread.
    fn call_activity_method(&self, name: &str) -> InternalResult<()>;
}

#[cfg(test)]
pub(crate) mod fake {
    //! A recording stand-in for the JNI platform

    use std::sync::Mutex;

    use super::*;
    use crate::error::InternalError;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        AddWindowFlags(WindowFlags),
        ClearWindowFlags(WindowFlags),
        SetBarColor(SystemBar, Color),
        SetSystemUiVisibility(SystemUiVisibility),
        SetSystemBarsAppearance(Appearance, Appearance),
        SetRequestedOrientation(ScreenOrientation),
        VibrateEffect(VibrationEffect),
        VibrateFor(Duration),
        CallActivityMethod(String),
    }

    #[derive(Debug)]
    pub(crate) struct DeviceState {
        pub visibility: SystemUiVisibility,
        pub appearance: Appearance,
        pub cutout: Option<CutoutInsets>,
        pub density: f32,
        pub rotation: DisplayRotation,
        pub ui_mode: i32,
        pub has_vibrator: bool,
        /// Make every call fail as if a Java exception had been thrown
        pub failing: bool,
        /// Make only `Window.addFlags` / `Window.clearFlags` fail
        pub rejects_window_flags: bool,
        /// Make only `Window.set{Status,Navigation}BarColor` fail
        pub rejects_bar_color: bool,
    }

    impl Default for DeviceState {
        fn default() -> Self {
            Self {
                visibility: SystemUiVisibility::empty(),
                appearance: Appearance::empty(),
                cutout: None,
                density: 1.0,
                rotation: DisplayRotation::Rotation0,
                ui_mode: 0x11, // UI_MODE_TYPE_NORMAL | UI_MODE_NIGHT_NO
                has_vibrator: true,
                failing: false,
                rejects_window_flags: false,
                rejects_bar_color: false,
            }
        }
    }

    #[derive(Debug)]
    pub(crate) struct FakePlatform {
        api: ApiLevel,
        pub state: Mutex<DeviceState>,
        pub calls: Mutex<Vec<Call>>,
    }

    impl FakePlatform {
        pub fn new(api: i32) -> Self {
            Self {
                api: ApiLevel(api),
                state: Mutex::new(DeviceState::default()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn take_calls(&self) -> Vec<Call> {
            std::mem::take(&mut *self.calls.lock().unwrap())
        }

        fn check(&self) -> InternalResult<()> {
            if self.state.lock().unwrap().failing {
                Err(thrown())
            } else {
                Ok(())
            }
        }

        fn check_rejected(&self, rejected: impl FnOnce(&DeviceState) -> bool) -> InternalResult<()> {
            if rejected(&*self.state.lock().unwrap()) {
                Err(thrown())
            } else {
                Ok(())
            }
        }

        fn record(&self, call: Call) -> InternalResult<()> {
            self.check()?;
            self.calls.lock().unwrap().push(call);
            Ok(())
        }
    }

    fn thrown() -> InternalError {
        InternalError::JniException("java.lang.IllegalStateException".to_owned())
    }

    impl Platform for FakePlatform {
        fn api_level(&self) -> ApiLevel {
            self.api
        }

        fn add_window_flags(&self, flags: WindowFlags) -> InternalResult<()> {
            self.check_rejected(|state| state.rejects_window_flags)?;
            self.record(Call::AddWindowFlags(flags))
        }

        fn clear_window_flags(&self, flags: WindowFlags) -> InternalResult<()> {
            self.check_rejected(|state| state.rejects_window_flags)?;
            self.record(Call::ClearWindowFlags(flags))
        }

        fn set_bar_color(&self, bar: SystemBar, color: Color) -> InternalResult<()> {
            self.check_rejected(|state| state.rejects_bar_color)?;
            self.record(Call::SetBarColor(bar, color))
        }

        fn system_ui_visibility(&self) -> InternalResult<SystemUiVisibility> {
            self.check()?;
            Ok(self.state.lock().unwrap().visibility)
        }

        fn set_system_ui_visibility(&self, visibility: SystemUiVisibility) -> InternalResult<()> {
            self.record(Call::SetSystemUiVisibility(visibility))?;
            self.state.lock().unwrap().visibility = visibility;
            Ok(())
        }

        fn system_bars_appearance(&self) -> InternalResult<Appearance> {
            self.check()?;
            Ok(self.state.lock().unwrap().appearance)
        }

        fn set_system_bars_appearance(
            &self,
            appearance: Appearance,
            mask: Appearance,
        ) -> InternalResult<()> {
            self.record(Call::SetSystemBarsAppearance(appearance, mask))?;
            let mut state = self.state.lock().unwrap();
            state.appearance = (state.appearance - mask) | (appearance & mask);
            Ok(())
        }

        fn display_cutout(&self) -> InternalResult<Option<CutoutInsets>> {
            assert!(self.api.has_display_cutout(), "DisplayCutout queried before API 28");
            self.check()?;
            Ok(self.state.lock().unwrap().cutout)
        }

        fn display_density(&self) -> InternalResult<f32> {
            self.check()?;
            Ok(self.state.lock().unwrap().density)
        }

        fn display_rotation(&self) -> InternalResult<DisplayRotation> {
            self.check()?;
            Ok(self.state.lock().unwrap().rotation)
        }

        fn ui_mode(&self) -> InternalResult<i32> {
            self.check()?;
            Ok(self.state.lock().unwrap().ui_mode)
        }

        fn set_requested_orientation(&self, orientation: ScreenOrientation) -> InternalResult<()> {
            self.record(Call::SetRequestedOrientation(orientation))
        }

        fn has_vibrator(&self) -> InternalResult<bool> {
            self.check()?;
            Ok(self.state.lock().unwrap().has_vibrator)
        }

        fn vibrate_effect(&self, effect: VibrationEffect) -> InternalResult<()> {
            assert!(self.api.has_predefined_vibrations(), "VibrationEffect used before API 26");
            self.record(Call::VibrateEffect(effect))
        }

        fn vibrate_for(&self, duration: Duration) -> InternalResult<()> {
            self.record(Call::VibrateFor(duration))
        }

        fn call_activity_method(&self, name: &str) -> InternalResult<()> {
            self.record(Call::CallActivityMethod(name.to_owned()))
        }
    }
}
