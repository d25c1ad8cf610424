//! Status bar, navigation bar, safe area, orientation and haptics glue for
//! Rust applications on Android.
//!
//! The [`AndroidUiBridge`] takes small, platform-neutral requests ("make the
//! status bar white", "keep the screen on", "lock to portrait") and turns them
//! into the matching calls on the Android `Window`, decor `View`,
//! `WindowInsetsController`, `Activity` and `Vibrator` via JNI.
//!
//! The bridge finds the Java VM and Activity through [`ndk_context`], so some
//! glue crate (such as `android-activity`) has to have initialized that
//! context before the bridge is created.
//!
//! # Threading
//!
//! Android only allows the thread that owns the view hierarchy to modify it.
//! Everything that changes the window is packaged as a [`UiTask`] and posted
//! to the [`UiExecutor`] given to the bridge. Posting never blocks and nothing
//! is reported back.
//!
//! The thread that owns the view hierarchy is the Activity's Java main thread,
//! not the `android_main()` thread of `android-activity`, so the usual executor
//! is a [`UiQueue`] drained from a native method that the Activity runs via
//! `runOnUiThread()`. [`UiQueue::waking_activity()`] wires the waker side of
//! that up; see [`UiQueue`] for the Java and Rust halves.
//! Queries ([`AndroidUiBridge::safe_area()`], [`AndroidUiBridge::device_theme()`])
//! run synchronously on the calling thread.
//!
//! # Errors
//!
//! Styling the system bars is cosmetic and best effort: platform failures are
//! logged (via the [`log`] crate) and swallowed. Queries fall back to a neutral
//! default. Only creating the bridge can fail.
//!
//! # API levels
//!
//! The device API level is read once. From it the bridge decides between the
//! legacy `View.setSystemUiVisibility()` flags (API level 23 to 29) and
//! `WindowInsetsController` appearance flags (API level 30+), whether display
//! cutouts can be queried (28+) and whether predefined vibration effects exist
//! (26+).

mod bridge;
mod color;
mod config;
mod error;
mod executor;
mod flags;
mod haptics;
mod orientation;
mod platform;
mod sdk;

#[cfg(target_os = "android")]
mod jni_platform;
#[cfg(target_os = "android")]
mod jni_utils;

pub use bridge::AndroidUiBridge;
pub use color::Color;
pub use config::BridgeConfig;
pub use error::{Error, Result};
pub use executor::{InlineExecutor, UiExecutor, UiQueue, UiTask};
pub use flags::{Appearance, SystemUiVisibility, WindowFlags};
pub use haptics::VibrationEffect;
pub use orientation::{DisplayRotation, Orientation, ScreenOrientation};
pub use sdk::{ApiLevel, BarStyle};

// Configuration.UI_MODE_NIGHT_*
const UI_MODE_NIGHT_MASK: i32 = 0x30;
const UI_MODE_NIGHT_YES: i32 = 0x20;

/// The style of a system bar
///
/// A [`Theme::Light`] bar has a light background, so Android draws its
/// content (icons, clock, ...) dark. This is what `SYSTEM_UI_FLAG_LIGHT_STATUS_BAR`
/// and `APPEARANCE_LIGHT_STATUS_BARS` select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, num_enum::IntoPrimitive, num_enum::FromPrimitive)]
#[repr(i32)]
pub enum Theme {
    #[default]
    Light = 0,
    Dark = 1,
}

impl Theme {
    /// Maps a `Configuration.uiMode` value to the device theme.
    ///
    /// Only `UI_MODE_NIGHT_YES` counts as dark; `UI_MODE_NIGHT_NO` and
    /// `UI_MODE_NIGHT_UNDEFINED` are both light.
    pub fn from_ui_mode(ui_mode: i32) -> Self {
        if ui_mode & UI_MODE_NIGHT_MASK == UI_MODE_NIGHT_YES {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

/// One of the two system bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemBar {
    Status,
    Navigation,
}

/// Screen insets not obstructed by notches and cutouts, in logical pixels
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SafeArea {
    pub top: i32,
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

#[test]
fn test_bridge_is_send_sync() {
    fn needs_send_sync<T: Send + Sync>() {}
    needs_send_sync::<AndroidUiBridge>();
    needs_send_sync::<UiQueue>();
}

#[test]
fn test_theme_from_ui_mode() {
    // UI_MODE_TYPE_NORMAL (0x01) in the low bits must not matter
    assert_eq!(Theme::from_ui_mode(0x21), Theme::Dark);
    assert_eq!(Theme::from_ui_mode(0x20), Theme::Dark);
    assert_eq!(Theme::from_ui_mode(0x11), Theme::Light);
    assert_eq!(Theme::from_ui_mode(0x00), Theme::Light);
    // 0x30 isn't a defined night mode
    assert_eq!(Theme::from_ui_mode(0x30), Theme::Light);
}
