//! The JNI calls we make in this crate are not part of a Java native method
//! implementation and so we can't assume we have a JNI local frame that is
//! going to unwind and free local references, and we also can't just leave
//! exceptions to get thrown when returning to Java.
//!
//! These utilities help us check + clear exceptions and map them into Rust Errors.

use jni::{
    objects::{JObject, JString},
    JNIEnv,
};

use crate::error::{InternalError, InternalResult};

/// Use with `.map_err()` to map `jni::errors::Error::JavaException` into a
/// richer error based on the actual contents of the `JThrowable`
///
/// (The `jni` crate doesn't do that automatically since it's more
/// common to let the exception get thrown when returning to Java)
///
/// This will also clear the exception
pub(crate) fn clear_and_map_exception_to_err(
    env: &mut JNIEnv<'_>,
    err: jni::errors::Error,
) -> InternalError {
    if matches!(err, jni::errors::Error::JavaException) {
        let result = env.with_local_frame::<_, _, InternalError>(5, |env| {
            let e = env.exception_occurred()?;
            env.exception_clear()?;
            if e.is_null() {
                return Ok("UNKNOWN (no pending exception)".to_owned());
            }

            // Throwable.toString() is "<class name>: <message>" and never null,
            // unlike getMessage()
            let msg = env
                .call_method(&e, "toString", "()Ljava/lang/String;", &[])?
                .l()?;
            let msg = JString::from(msg);
            let msg: String = env.get_string(&msg)?.into();

            Ok(msg)
        });

        match result {
            Ok(msg) => InternalError::JniException(msg),
            Err(err) => InternalError::JniException(format!(
                "UNKNOWN (Failed to query JThrowable: {err:?})"
            )),
        }
    } else {
        err.into()
    }
}

/// Clears any exception left pending by a call whose failure we don't care about
pub(crate) fn clear_pending_exception(env: &mut JNIEnv<'_>) -> InternalResult<()> {
    if env.exception_check()? {
        log::trace!("Clearing pending Java exception");
        env.exception_clear()?;
    }
    Ok(())
}

pub(crate) fn non_null<'local>(
    obj: JObject<'local>,
    what: &'static str,
) -> InternalResult<JObject<'local>> {
    if obj.is_null() {
        Err(InternalError::NullObject(what))
    } else {
        Ok(obj)
    }
}
