use std::time::Duration;

use jni::{
    objects::{GlobalRef, JObject, JValue},
    JNIEnv, JavaVM,
};

use crate::error::{InternalError, InternalResult};
use crate::flags::{Appearance, SystemUiVisibility, WindowFlags};
use crate::haptics::VibrationEffect;
use crate::jni_utils::{self, non_null};
use crate::orientation::{DisplayRotation, ScreenOrientation};
use crate::platform::{CutoutInsets, Platform};
use crate::sdk::ApiLevel;
use crate::{Color, SystemBar};

/// [`Platform`] backed by the Activity registered with [`ndk_context`]
pub(crate) struct JniPlatform {
    jvm: JavaVM,
    activity: GlobalRef,
    api: ApiLevel,
}

impl JniPlatform {
    pub(crate) fn from_android_context() -> InternalResult<Self> {
        let cx = ndk_context::android_context();
        let jvm = unsafe { JavaVM::from_raw(cx.vm().cast()) }?;

        let activity = {
            let mut env = jvm.attach_current_thread_permanently()?;
            let activity = unsafe { JObject::from_raw(cx.context().cast()) };
            env.new_global_ref(activity)?
        };

        let api = sdk_version()?;
        log::debug!("JniPlatform ready ({api:?})");

        Ok(Self { jvm, activity, api })
    }

    /// Runs `f` with the current thread attached to the JVM, inside a fresh
    /// JNI local frame.
    fn with_env<T, F>(&self, f: F) -> InternalResult<T>
    where
        F: FnOnce(&mut JNIEnv<'_>, &JObject<'_>) -> InternalResult<T>,
    {
        // Attach 'permanently' to avoid any chance of detaching the thread from the VM
        // (e.g. the UI thread, which Java owns)
        let mut env = self.jvm.attach_current_thread_permanently()?;
        let activity = self.activity.as_obj();

        // We don't want to accidentally leak any local references while we
        // aren't going to be returning from here back to the JVM, to unwind, so
        // we make a local frame
        let result = env.with_local_frame(16, |env| f(env, activity));

        result.map_err(|err| match err {
            InternalError::JvmError(err) => jni_utils::clear_and_map_exception_to_err(&mut env, err),
            err => err,
        })
    }
}

fn sdk_version() -> InternalResult<ApiLevel> {
    let mut prop = android_properties::getprop("ro.build.version.sdk");
    prop.value()
        .and_then(|val| val.trim().parse::<i32>().ok())
        .map(ApiLevel)
        .ok_or(InternalError::MissingSdkVersion)
}

fn window<'local>(env: &mut JNIEnv<'local>, activity: &JObject<'_>) -> InternalResult<JObject<'local>> {
    let window = env
        .call_method(activity, "getWindow", "()Landroid/view/Window;", &[])?
        .l()?;
    non_null(window, "Window")
}

fn decor_view<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject<'_>,
) -> InternalResult<JObject<'local>> {
    let window = window(env, activity)?;
    let view = env
        .call_method(&window, "getDecorView", "()Landroid/view/View;", &[])?
        .l()?;
    non_null(view, "DecorView")
}

fn insets_controller<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject<'_>,
) -> InternalResult<JObject<'local>> {
    let window = window(env, activity)?;
    let controller = env
        .call_method(
            &window,
            "getInsetsController",
            "()Landroid/view/WindowInsetsController;",
            &[],
        )?
        .l()?;
    non_null(controller, "WindowInsetsController")
}

fn resources<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject<'_>,
) -> InternalResult<JObject<'local>> {
    let resources = env
        .call_method(
            activity,
            "getResources",
            "()Landroid/content/res/Resources;",
            &[],
        )?
        .l()?;
    non_null(resources, "Resources")
}

/// `None` if the device has no vibrator service at all
fn vibrator<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject<'_>,
) -> InternalResult<Option<JObject<'local>>> {
    let name = env.new_string("vibrator")?;
    let service = env
        .call_method(
            activity,
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[JValue::Object(&name)],
        )?
        .l()?;
    Ok((!service.is_null()).then_some(service))
}

impl Platform for JniPlatform {
    fn api_level(&self) -> ApiLevel {
        self.api
    }

    fn add_window_flags(&self, flags: WindowFlags) -> InternalResult<()> {
        self.with_env(|env, activity| {
            let window = window(env, activity)?;
            env.call_method(&window, "addFlags", "(I)V", &[JValue::Int(flags.as_jint())])?;
            Ok(())
        })
    }

    fn clear_window_flags(&self, flags: WindowFlags) -> InternalResult<()> {
        self.with_env(|env, activity| {
            let window = window(env, activity)?;
            env.call_method(&window, "clearFlags", "(I)V", &[JValue::Int(flags.as_jint())])?;
            Ok(())
        })
    }

    fn set_bar_color(&self, bar: SystemBar, color: Color) -> InternalResult<()> {
        let setter = match bar {
            SystemBar::Status => "setStatusBarColor",
            SystemBar::Navigation => "setNavigationBarColor",
        };
        self.with_env(|env, activity| {
            let window = window(env, activity)?;
            env.call_method(&window, setter, "(I)V", &[JValue::Int(color.argb() as i32)])?;
            Ok(())
        })
    }

    fn system_ui_visibility(&self) -> InternalResult<SystemUiVisibility> {
        self.with_env(|env, activity| {
            let view = decor_view(env, activity)?;
            let bits = env
                .call_method(&view, "getSystemUiVisibility", "()I", &[])?
                .i()?;
            Ok(SystemUiVisibility::from_bits_retain(bits as u32))
        })
    }

    fn set_system_ui_visibility(&self, visibility: SystemUiVisibility) -> InternalResult<()> {
        self.with_env(|env, activity| {
            let view = decor_view(env, activity)?;
            env.call_method(
                &view,
                "setSystemUiVisibility",
                "(I)V",
                &[JValue::Int(visibility.bits() as i32)],
            )?;
            Ok(())
        })
    }

    fn system_bars_appearance(&self) -> InternalResult<Appearance> {
        self.with_env(|env, activity| {
            let controller = insets_controller(env, activity)?;
            let bits = env
                .call_method(&controller, "getSystemBarsAppearance", "()I", &[])?
                .i()?;
            Ok(Appearance::from_bits_retain(bits as u32))
        })
    }

    fn set_system_bars_appearance(
        &self,
        appearance: Appearance,
        mask: Appearance,
    ) -> InternalResult<()> {
        self.with_env(|env, activity| {
            let controller = insets_controller(env, activity)?;
            env.call_method(
                &controller,
                "setSystemBarsAppearance",
                "(II)V",
                &[
                    JValue::Int(appearance.bits() as i32),
                    JValue::Int(mask.bits() as i32),
                ],
            )?;
            Ok(())
        })
    }

    fn display_cutout(&self) -> InternalResult<Option<CutoutInsets>> {
        self.with_env(|env, activity| {
            let view = decor_view(env, activity)?;
            let insets = env
                .call_method(
                    &view,
                    "getRootWindowInsets",
                    "()Landroid/view/WindowInsets;",
                    &[],
                )?
                .l()?;
            if insets.is_null() {
                // Not attached to a window yet
                return Ok(None);
            }

            let cutout = env
                .call_method(
                    &insets,
                    "getDisplayCutout",
                    "()Landroid/view/DisplayCutout;",
                    &[],
                )?
                .l()?;
            if cutout.is_null() {
                return Ok(None);
            }

            let mut inset = |getter: &str| -> InternalResult<i32> {
                Ok(env.call_method(&cutout, getter, "()I", &[])?.i()?)
            };
            Ok(Some(CutoutInsets {
                top: inset("getSafeInsetTop")?,
                left: inset("getSafeInsetLeft")?,
                right: inset("getSafeInsetRight")?,
                bottom: inset("getSafeInsetBottom")?,
            }))
        })
    }

    fn display_density(&self) -> InternalResult<f32> {
        self.with_env(|env, activity| {
            let resources = resources(env, activity)?;
            let metrics = env
                .call_method(
                    &resources,
                    "getDisplayMetrics",
                    "()Landroid/util/DisplayMetrics;",
                    &[],
                )?
                .l()?;
            let metrics = non_null(metrics, "DisplayMetrics")?;
            Ok(env.get_field(&metrics, "density", "F")?.f()?)
        })
    }

    fn display_rotation(&self) -> InternalResult<DisplayRotation> {
        self.with_env(|env, activity| {
            let window_manager = env
                .call_method(
                    activity,
                    "getWindowManager",
                    "()Landroid/view/WindowManager;",
                    &[],
                )?
                .l()?;
            let window_manager = non_null(window_manager, "WindowManager")?;
            let display = env
                .call_method(
                    &window_manager,
                    "getDefaultDisplay",
                    "()Landroid/view/Display;",
                    &[],
                )?
                .l()?;
            let display = non_null(display, "Display")?;
            let rotation = env.call_method(&display, "getRotation", "()I", &[])?.i()?;
            Ok(DisplayRotation::from(rotation))
        })
    }

    fn ui_mode(&self) -> InternalResult<i32> {
        self.with_env(|env, activity| {
            let resources = resources(env, activity)?;
            let config = env
                .call_method(
                    &resources,
                    "getConfiguration",
                    "()Landroid/content/res/Configuration;",
                    &[],
                )?
                .l()?;
            let config = non_null(config, "Configuration")?;
            Ok(env.get_field(&config, "uiMode", "I")?.i()?)
        })
    }

    fn set_requested_orientation(&self, orientation: ScreenOrientation) -> InternalResult<()> {
        self.with_env(|env, activity| {
            env.call_method(
                activity,
                "setRequestedOrientation",
                "(I)V",
                &[JValue::Int(orientation.into())],
            )?;
            Ok(())
        })
    }

    fn has_vibrator(&self) -> InternalResult<bool> {
        self.with_env(|env, activity| match vibrator(env, activity)? {
            Some(vibrator) => Ok(env.call_method(&vibrator, "hasVibrator", "()Z", &[])?.z()?),
            None => Ok(false),
        })
    }

    fn vibrate_effect(&self, effect: VibrationEffect) -> InternalResult<()> {
        self.with_env(|env, activity| {
            let Some(vibrator) = vibrator(env, activity)? else {
                return Ok(());
            };
            let effect = env
                .call_static_method(
                    "android/os/VibrationEffect",
                    "createPredefined",
                    "(I)Landroid/os/VibrationEffect;",
                    &[JValue::Int(effect.into())],
                )?
                .l()?;
            env.call_method(
                &vibrator,
                "vibrate",
                "(Landroid/os/VibrationEffect;)V",
                &[JValue::Object(&effect)],
            )?;
            jni_utils::clear_pending_exception(env)
        })
    }

    fn vibrate_for(&self, duration: Duration) -> InternalResult<()> {
        self.with_env(|env, activity| {
            let Some(vibrator) = vibrator(env, activity)? else {
                return Ok(());
            };
            let millis = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
            env.call_method(&vibrator, "vibrate", "(J)V", &[JValue::Long(millis)])?;
            jni_utils::clear_pending_exception(env)
        })
    }

    fn call_activity_method(&self, name: &str) -> InternalResult<()> {
        self.with_env(|env, activity| {
            env.call_method(activity, name, "()V", &[])?;
            Ok(())
        })
    }
}
