use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::BridgeConfig;
use crate::error::InternalResult;
use crate::executor::UiExecutor;
use crate::flags::WindowFlags;
use crate::haptics::{Vibration, VibrationEffect};
use crate::orientation::{DisplayRotation, Orientation};
use crate::platform::{CutoutInsets, Platform};
use crate::sdk::{ApiLevel, BarStyle, BarStyleUpdate};
use crate::{Color, SafeArea, SystemBar, Theme};

#[derive(Debug, Clone, Copy, Default)]
struct BarThemes {
    statusbar: Theme,
    navbar: Theme,
}

struct BridgeInner {
    platform: Arc<dyn Platform>,
    executor: Arc<dyn UiExecutor>,
    config: BridgeConfig,
    api: ApiLevel,
    bar_style: BarStyle,

    themes: Mutex<BarThemes>,
    rotation_refresh_connected: AtomicBool,
    last_rotation: Mutex<Option<DisplayRotation>>,
}

/// A (cheaply clonable) handle for styling the Android system UI
///
/// All clones share the same cached bar themes.
///
/// Calls that change the window are posted to the bridge's [`UiExecutor`]
/// and return immediately. Queries run on the calling thread.
#[derive(Clone)]
pub struct AndroidUiBridge {
    inner: Arc<BridgeInner>,
}

impl PartialEq for AndroidUiBridge {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
impl Eq for AndroidUiBridge {}

impl Hash for AndroidUiBridge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).cast::<()>().hash(state);
    }
}

impl std::fmt::Debug for AndroidUiBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndroidUiBridge")
            .field("api", &self.inner.api)
            .field("bar_style", &self.inner.bar_style)
            .field("themes", &*self.inner.themes.lock().unwrap())
            .finish_non_exhaustive()
    }
}

impl AndroidUiBridge {
    /// Creates a bridge for the Activity registered with [`ndk_context`].
    ///
    /// Fails if the Java VM can't be reached or the device API level can't be
    /// read.
    #[cfg(target_os = "android")]
    pub fn from_android_context(
        executor: Arc<dyn UiExecutor>,
        config: BridgeConfig,
    ) -> crate::Result<Self> {
        let platform = crate::jni_platform::JniPlatform::from_android_context()?;
        Ok(Self::with_platform(Arc::new(platform), executor, config))
    }

    #[cfg_attr(not(target_os = "android"), allow(dead_code))]
    pub(crate) fn with_platform(
        platform: Arc<dyn Platform>,
        executor: Arc<dyn UiExecutor>,
        config: BridgeConfig,
    ) -> Self {
        let api = platform.api_level();
        let bar_style = BarStyle::for_api_level(api);
        log::debug!("System bar styling for {api:?}: {bar_style:?}");

        Self {
            inner: Arc::new(BridgeInner {
                platform,
                executor,
                config,
                api,
                bar_style,
                themes: Mutex::new(BarThemes::default()),
                rotation_refresh_connected: AtomicBool::new(false),
                last_rotation: Mutex::new(None),
            }),
        }
    }

    /// Always `true`: everything here works on the minimum supported API level (23)
    pub fn is_available(&self) -> bool {
        true
    }

    pub fn api_level(&self) -> ApiLevel {
        self.inner.api
    }

    pub fn bar_style(&self) -> BarStyle {
        self.inner.bar_style
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.inner.config
    }

    /// The system wide day/night setting
    ///
    /// Returns [`Theme::Light`] if the configuration can't be queried.
    pub fn device_theme(&self) -> Theme {
        match self.inner.platform.ui_mode() {
            Ok(ui_mode) => Theme::from_ui_mode(ui_mode),
            Err(err) => {
                log::warn!("Failed to query Configuration.uiMode: {err}");
                Theme::Light
            }
        }
    }

    /// Sets the status bar background and picks a matching [`Theme`] from its
    /// luminance.
    pub fn set_statusbar_color(&self, color: Color) {
        self.set_bar_color(SystemBar::Status, color);
    }

    pub fn set_statusbar_theme(&self, theme: Theme) {
        self.set_bar_theme(SystemBar::Status, theme);
    }

    /// The most recently requested status bar theme
    ///
    /// This doesn't mean the platform actually applied it.
    pub fn statusbar_theme(&self) -> Theme {
        self.inner.themes.lock().unwrap().statusbar
    }

    /// Sets the navigation bar background and picks a matching [`Theme`] from
    /// its luminance.
    pub fn set_navbar_color(&self, color: Color) {
        self.set_bar_color(SystemBar::Navigation, color);
    }

    pub fn set_navbar_theme(&self, theme: Theme) {
        self.set_bar_theme(SystemBar::Navigation, theme);
    }

    /// The most recently requested navigation bar theme
    pub fn navbar_theme(&self) -> Theme {
        self.inner.themes.lock().unwrap().navbar
    }

    /// Status bar height in logical pixels, from [`BridgeConfig::statusbar_height`]
    pub fn statusbar_height(&self) -> i32 {
        self.inner.config.statusbar_height
    }

    /// Navigation bar height in logical pixels, from [`BridgeConfig::navbar_height`]
    pub fn navbar_height(&self) -> i32 {
        self.inner.config.navbar_height
    }

    /// Insets that keep content clear of display cutouts, in logical pixels
    ///
    /// All zero before API level 28, when the window isn't attached yet, when
    /// the display has no cutout, or if the query fails.
    pub fn safe_area(&self) -> SafeArea {
        if !self.inner.api.has_display_cutout() {
            return SafeArea::default();
        }

        match self.inner.platform.display_cutout() {
            Ok(Some(cutout)) => {
                let density = match self.inner.platform.display_density() {
                    Ok(density) if density > 0.0 => density,
                    Ok(density) => {
                        log::warn!("Ignoring bogus display density {density}");
                        1.0
                    }
                    Err(err) => {
                        log::warn!("Failed to query display density: {err}");
                        1.0
                    }
                };
                to_logical(cutout, density)
            }
            Ok(None) => SafeArea::default(),
            Err(err) => {
                log::warn!("Failed to query DisplayCutout: {err}");
                SafeArea::default()
            }
        }
    }

    pub fn safe_area_top(&self) -> i32 {
        self.safe_area().top
    }

    pub fn safe_area_left(&self) -> i32 {
        self.safe_area().left
    }

    pub fn safe_area_right(&self) -> i32 {
        self.safe_area().right
    }

    pub fn safe_area_bottom(&self) -> i32 {
        self.safe_area().bottom
    }

    /// Stops (or allows again) the display from sleeping while this window is visible
    pub fn set_screen_keep_on(&self, on: bool) {
        self.post("update FLAG_KEEP_SCREEN_ON", move |inner| {
            if on {
                inner.platform.add_window_flags(WindowFlags::KEEP_SCREEN_ON)
            } else {
                inner.platform.clear_window_flags(WindowFlags::KEEP_SCREEN_ON)
            }
        });
    }

    pub fn lock_screen_orientation(&self, orientation: Orientation) {
        self.post("set the requested orientation", move |inner| {
            inner.platform.set_requested_orientation(orientation.into())
        });
    }

    /// Plays a short haptic pulse, if the device has a vibrator
    pub fn vibrate(&self) {
        self.vibrate_with(self.inner.config.haptic_effect);
    }

    /// Like [`Self::vibrate()`] with a specific effect
    ///
    /// Devices older than API level 26 play a plain
    /// [`BridgeConfig::legacy_vibration`] pulse instead.
    pub fn vibrate_with(&self, effect: VibrationEffect) {
        let vibration = Vibration::plan(self.inner.api, effect, self.inner.config.legacy_vibration);
        let inner = self.inner.clone();
        self.inner.executor.post(Box::new(move || {
            if let Err(err) = inner.vibrate(vibration) {
                // Not worth a warning, devices without haptics are common
                log::debug!("Vibration failed: {err}");
            }
        }));
    }

    /// Forwards an Android configuration change (e.g. `MainEvent::ConfigChanged`)
    ///
    /// Android resets the inset controller's appearance flags when the display
    /// rotates, so once a theme has been applied through the inset controller
    /// this re-applies the cached status bar theme after every rotation.
    ///
    /// A 180° flip (e.g. landscape to reverse landscape) keeps the same screen
    /// size, so Android sends no configuration change for it and the theme is
    /// not refreshed. Hosts that care can also call this from a
    /// `DisplayManager.DisplayListener`; calls that see no new rotation do
    /// nothing.
    pub fn on_configuration_changed(&self) {
        if !self.inner.rotation_refresh_connected.load(Ordering::Acquire) {
            return;
        }
        self.post("refresh the status bar theme", |inner| {
            inner.refresh_after_rotation()
        });
    }

    fn set_bar_color(&self, bar: SystemBar, color: Color) {
        let theme = color.bar_theme();
        self.inner.cache_theme(bar, theme);
        self.post("set the bar theme", move |inner| {
            inner.apply_color(bar, color);
            inner.apply_theme(bar, theme)
        });
    }

    fn set_bar_theme(&self, bar: SystemBar, theme: Theme) {
        self.inner.cache_theme(bar, theme);
        self.post("set the bar theme", move |inner| inner.apply_theme(bar, theme));
    }

    fn post<F>(&self, what: &'static str, f: F)
    where
        F: FnOnce(&BridgeInner) -> InternalResult<()> + Send + 'static,
    {
        let inner = self.inner.clone();
        self.inner.executor.post(Box::new(move || {
            if let Err(err) = f(&inner) {
                log::warn!("Failed to {what}: {err}");
            }
        }));
    }
}

impl BridgeInner {
    fn cache_theme(&self, bar: SystemBar, theme: Theme) {
        let mut themes = self.themes.lock().unwrap();
        match bar {
            SystemBar::Status => themes.statusbar = theme,
            SystemBar::Navigation => themes.navbar = theme,
        }
    }

    /// Each step is attempted even if an earlier one failed, and none of them
    /// stops the theme that follows.
    fn apply_color(&self, bar: SystemBar, color: Color) {
        log::trace!("{bar:?} bar color = {color:?}");
        if let Err(err) = self
            .platform
            .add_window_flags(WindowFlags::DRAWS_SYSTEM_BAR_BACKGROUNDS)
        {
            log::warn!("Failed to draw the system bar backgrounds: {err}");
        }
        if let Err(err) = self.platform.clear_window_flags(WindowFlags::translucent(bar)) {
            log::warn!("Failed to clear the translucent {bar:?} bar flag: {err}");
        }
        if let Err(err) = self.platform.set_bar_color(bar, color) {
            log::warn!("Failed to set the {bar:?} bar color: {err}");
        }
    }

    fn apply_theme(&self, bar: SystemBar, theme: Theme) -> InternalResult<()> {
        log::trace!("{bar:?} bar theme = {theme:?}");
        if self.bar_style.resets_on_rotation() {
            // Either bar connects the refresh, but the refresh only knows
            // about the status bar.
            self.connect_rotation_refresh();
        }

        let update = match self.bar_style {
            BarStyle::SystemUiVisibility => {
                BarStyleUpdate::visibility(self.platform.system_ui_visibility()?, bar, theme)
            }
            BarStyle::InsetsController => {
                BarStyleUpdate::appearance(self.platform.system_bars_appearance()?, bar, theme)
            }
        };

        match update {
            BarStyleUpdate::Visibility(visibility) => {
                self.platform.set_system_ui_visibility(visibility)
            }
            BarStyleUpdate::Appearance { appearance, mask } => {
                self.platform.set_system_bars_appearance(appearance, mask)
            }
        }
    }

    fn connect_rotation_refresh(&self) {
        if self
            .rotation_refresh_connected
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            let rotation = self.platform.display_rotation().ok();
            *self.last_rotation.lock().unwrap() = rotation;
            log::debug!("Re-applying the status bar theme on display rotation (now {rotation:?})");
        }
    }

    fn refresh_after_rotation(&self) -> InternalResult<()> {
        let rotation = self.platform.display_rotation()?;
        {
            let mut last = self.last_rotation.lock().unwrap();
            if *last == Some(rotation) {
                return Ok(());
            }
            *last = Some(rotation);
        }

        let theme = self.themes.lock().unwrap().statusbar;
        log::debug!("Display rotated to {rotation:?}, re-applying status bar theme {theme:?}");
        self.apply_theme(SystemBar::Status, theme)
    }

    fn vibrate(&self, vibration: Vibration) -> InternalResult<()> {
        if !self.platform.has_vibrator()? {
            return Ok(());
        }
        match vibration {
            Vibration::Predefined(effect) => self.platform.vibrate_effect(effect),
            Vibration::OneShot(duration) => self.platform.vibrate_for(duration),
        }
    }
}

fn to_logical(cutout: CutoutInsets, density: f32) -> SafeArea {
    let scale = |px: i32| (px as f64 / density as f64) as i32;
    SafeArea {
        top: scale(cutout.top),
        left: scale(cutout.left),
        right: scale(cutout.right),
        bottom: scale(cutout.bottom),
    }
}
