/// The screen orientations a cross-platform caller can lock to
///
/// This implements `From<i32>` so that integer values coming from a
/// platform-neutral facade can be converted directly. Unknown values fall
/// back to [`Orientation::Unspecified`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, num_enum::FromPrimitive, num_enum::IntoPrimitive,
)]
#[repr(i32)]
pub enum Orientation {
    /// Let the system (or the user) decide.
    #[default]
    Unspecified = 0,
    Portrait = 1,
    PortraitUpsideDown = 2,
    /// Either portrait direction, following the sensor.
    PortraitSensor = 3,
    LandscapeLeft = 4,
    LandscapeRight = 5,
    /// Either landscape direction, following the sensor.
    LandscapeSensor = 6,
}

/// `ActivityInfo.SCREEN_ORIENTATION_*` values
///
/// See [ActivityInfo docs](https://developer.android.com/reference/android/content/pm/ActivityInfo#SCREEN_ORIENTATION_UNSPECIFIED)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, num_enum::IntoPrimitive)]
#[repr(i32)]
pub enum ScreenOrientation {
    Unspecified = -1,
    Landscape = 0,
    Portrait = 1,
    SensorLandscape = 6,
    SensorPortrait = 7,
    ReverseLandscape = 8,
    ReversePortrait = 9,
}

impl From<Orientation> for ScreenOrientation {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Unspecified => ScreenOrientation::Unspecified,
            Orientation::Portrait => ScreenOrientation::Portrait,
            Orientation::PortraitUpsideDown => ScreenOrientation::ReversePortrait,
            Orientation::PortraitSensor => ScreenOrientation::SensorPortrait,
            Orientation::LandscapeLeft => ScreenOrientation::Landscape,
            Orientation::LandscapeRight => ScreenOrientation::ReverseLandscape,
            Orientation::LandscapeSensor => ScreenOrientation::SensorLandscape,
        }
    }
}

/// The rotation of the default display, as reported by `Display.getRotation()`
///
/// # Android Extensible Enum
///
/// This is a runtime extensible enum and should be handled similar to a
/// `#[non_exhaustive]` enum to maintain forwards compatibility.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, num_enum::FromPrimitive, num_enum::IntoPrimitive,
)]
#[non_exhaustive]
#[repr(i32)]
pub enum DisplayRotation {
    Rotation0 = 0,
    Rotation90 = 1,
    Rotation180 = 2,
    Rotation270 = 3,

    #[doc(hidden)]
    #[num_enum(catch_all)]
    __Unknown(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(orientation: Orientation) -> i32 {
        ScreenOrientation::from(orientation).into()
    }

    #[test]
    fn named_orientations_map_to_activity_info_codes() {
        assert_eq!(code(Orientation::Unspecified), -1);
        assert_eq!(code(Orientation::Portrait), 1);
        assert_eq!(code(Orientation::PortraitUpsideDown), 9);
        assert_eq!(code(Orientation::PortraitSensor), 7);
        assert_eq!(code(Orientation::LandscapeLeft), 0);
        assert_eq!(code(Orientation::LandscapeRight), 8);
        assert_eq!(code(Orientation::LandscapeSensor), 6);
    }

    #[test]
    fn unknown_facade_values_are_unspecified() {
        for raw in [-5, 7, 42, i32::MAX] {
            assert_eq!(Orientation::from(raw), Orientation::Unspecified);
            assert_eq!(code(Orientation::from(raw)), -1);
        }
        assert_eq!(Orientation::from(4), Orientation::LandscapeLeft);
    }

    #[test]
    fn unknown_rotations_are_preserved() {
        assert_eq!(DisplayRotation::from(2), DisplayRotation::Rotation180);
        let odd = DisplayRotation::from(7);
        assert_eq!(i32::from(odd), 7);
    }
}
