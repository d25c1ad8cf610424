use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Java VM or JNI error, including Java exceptions: {0}")]
    JavaError(String),

    #[error("Couldn't read the ro.build.version.sdk system property")]
    MissingSdkVersion,
}

pub type Result<T> = std::result::Result<T, Error>;

// XXX: we don't want to expose jni-rs in the public API
// so we have an internal error type that the platform
// backend uses and then we strip the error in the
// frontend of the API.
//
// This way we avoid exposing a public trait implementation for
// `From<jni::errors::Error>`
#[derive(Error, Debug)]
#[cfg_attr(not(target_os = "android"), allow(dead_code))]
pub(crate) enum InternalError {
    #[error("A JNI error")]
    JniError(jni::errors::JniError),
    #[error("A Java Exception was thrown via a JNI method call: {0}")]
    JniException(String),
    #[error("A Java VM error")]
    JvmError(jni::errors::Error),
    #[error("{0} was null")]
    NullObject(&'static str),
    #[error("Couldn't read the ro.build.version.sdk system property")]
    MissingSdkVersion,
}

pub(crate) type InternalResult<T> = std::result::Result<T, InternalError>;

impl From<jni::errors::Error> for InternalError {
    fn from(value: jni::errors::Error) -> Self {
        InternalError::JvmError(value)
    }
}
impl From<jni::errors::JniError> for InternalError {
    fn from(value: jni::errors::JniError) -> Self {
        InternalError::JniError(value)
    }
}

impl From<InternalError> for Error {
    fn from(value: InternalError) -> Self {
        match value {
            InternalError::JniError(err) => Error::JavaError(err.to_string()),
            InternalError::JniException(msg) => Error::JavaError(msg),
            InternalError::JvmError(err) => Error::JavaError(err.to_string()),
            InternalError::NullObject(what) => Error::JavaError(format!("{what} was null")),
            InternalError::MissingSdkVersion => Error::MissingSdkVersion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exception_message_survives_into_public_error() {
        let err: Error = InternalError::JniException("boom".to_owned()).into();
        assert!(matches!(err, Error::JavaError(ref msg) if msg == "boom"));
    }

    #[test]
    fn null_object_names_the_object() {
        let err: Error = InternalError::NullObject("WindowInsetsController").into();
        assert_eq!(
            err.to_string(),
            "Java VM or JNI error, including Java exceptions: WindowInsetsController was null"
        );
    }
}
