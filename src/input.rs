//! Turning user-supplied text into checked kinematic inputs.
//!
//! Everything here is a single parse-then-validate step that returns a [`Result`]. Asking again
//! after a bad answer is up to the caller; the command-line tool in this crate, for instance,
//! keeps prompting until it gets a valid orientation.

use crate::error::KinematicsError;
use crate::parallel::{PlatformGeometry, PlatformOrientation};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uom::si::angle::{degree, radian};
use uom::si::f64::Angle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The unit an angle typed in by a user is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Interprets `value` as an angle in this unit.
    #[must_use]
    pub fn angle(self, value: f64) -> Angle {
        match self {
            Self::Degrees => Angle::new::<degree>(value),
            Self::Radians => Angle::new::<radian>(value),
        }
    }
}

impl Display for AngleUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Degrees => "deg",
            Self::Radians => "rad",
        })
    }
}

/// The error returned when a string is not a known [`AngleUnit`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown angle unit '{0}', expected 'deg' or 'rad'")]
pub struct UnknownAngleUnit(String);

impl FromStr for AngleUnit {
    type Err = UnknownAngleUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Ok(Self::Degrees),
            "rad" | "radian" | "radians" => Ok(Self::Radians),
            _ => Err(UnknownAngleUnit(s.to_owned())),
        }
    }
}

/// Errors from turning text into kinematic inputs.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error(transparent)]
    Kinematics(#[from] KinematicsError),
}

/// Parses `text` as a finite number of `unit`s.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// [`InputError::NotANumber`] if `text` isn't a number, or is infinite or NaN.
pub fn parse_angle(text: &str, unit: AngleUnit) -> Result<Angle, InputError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(unit.angle(value)),
        _ => {
            tracing::debug!(input = trimmed, %unit, "rejecting non-numeric angle");
            Err(InputError::NotANumber(trimmed.to_owned()))
        }
    }
}

/// Parses a list of angles separated by commas and/or whitespace, eg `30, 45 -30`.
///
/// An empty (or all-whitespace) `text` is an empty list.
///
/// # Errors
///
/// [`InputError::NotANumber`] for the first entry that isn't a finite number.
pub fn parse_angle_list(text: &str, unit: AngleUnit) -> Result<Vec<Angle>, InputError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|entry| !entry.is_empty())
        .map(|entry| parse_angle(entry, unit))
        .collect()
}

/// Parses `text` as a platform orientation and checks it against `geometry`'s valid range.
///
/// The range check is [`PlatformGeometry::orientation`]; this only adds parsing in front of it.
///
/// # Errors
///
/// - [`InputError::NotANumber`] if `text` isn't a finite number.
/// - [`InputError::Kinematics`] with [`KinematicsError::OrientationOutOfRange`] if the angle is
///   outside the geometry's valid range.
pub fn parse_platform_orientation<'g>(
    text: &str,
    unit: AngleUnit,
    geometry: &'g PlatformGeometry,
) -> Result<PlatformOrientation<'g>, InputError> {
    let angle = parse_angle(text, unit)?;
    Ok(geometry.orientation(angle)?)
}

#[cfg(test)]
mod tests {
    use super::{
        parse_angle, parse_angle_list, parse_platform_orientation, AngleUnit, InputError,
    };
    use crate::error::KinematicsError;
    use crate::parallel::PlatformGeometry;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use uom::si::angle::{degree, radian};
    use uom::si::f64::Angle;

    #[rstest]
    #[case("30", AngleUnit::Degrees, 30f64.to_radians())]
    #[case("  -45.5\n", AngleUnit::Degrees, (-45.5f64).to_radians())]
    #[case("1.5", AngleUnit::Radians, 1.5)]
    #[case("1e-3", AngleUnit::Radians, 0.001)]
    fn parses_angles_in_the_declared_unit(
        #[case] text: &str,
        #[case] unit: AngleUnit,
        #[case] expected_radians: f64,
    ) {
        assert_relative_eq!(
            parse_angle(text, unit).unwrap().get::<radian>(),
            expected_radians
        );
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("30deg")]
    #[case("inf")]
    #[case("NaN")]
    fn non_numbers_are_rejected(#[case] text: &str) {
        assert_eq!(
            parse_angle(text, AngleUnit::Degrees),
            Err(InputError::NotANumber(text.trim().to_owned()))
        );
    }

    #[test]
    fn lists_accept_commas_and_spaces() {
        let angles = parse_angle_list("30, 45 -30,", AngleUnit::Degrees).unwrap();
        let degrees: Vec<_> = angles.iter().map(|a| a.get::<degree>()).collect();
        assert_eq!(degrees.len(), 3);
        assert_relative_eq!(degrees[0], 30., epsilon = 1e-9);
        assert_relative_eq!(degrees[1], 45., epsilon = 1e-9);
        assert_relative_eq!(degrees[2], -30., epsilon = 1e-9);

        assert_eq!(parse_angle_list("  ", AngleUnit::Degrees), Ok(vec![]));
        assert_eq!(
            parse_angle_list("30,x", AngleUnit::Degrees),
            Err(InputError::NotANumber("x".into()))
        );
    }

    #[test]
    fn orientation_goes_through_the_geometry_range_check() {
        let geometry = PlatformGeometry::default();

        let orientation = parse_platform_orientation("15", AngleUnit::Degrees, &geometry).unwrap();
        assert_eq!(orientation.angle(), Angle::new::<degree>(15.));

        let err = parse_platform_orientation("120", AngleUnit::Degrees, &geometry).unwrap_err();
        assert_eq!(
            err,
            InputError::Kinematics(geometry.orientation(Angle::new::<degree>(120.)).unwrap_err())
        );
        assert!(matches!(
            err,
            InputError::Kinematics(KinematicsError::OrientationOutOfRange { .. })
        ));

        insta::assert_snapshot!(
            err.to_string(),
            @"platform orientation 120° is outside the valid range [-90°, 90°]"
        );
        insta::assert_snapshot!(
            parse_platform_orientation("ninety", AngleUnit::Degrees, &geometry)
                .unwrap_err()
                .to_string(),
            @"'ninety' is not a number"
        );
    }

    #[rstest]
    #[case("deg", AngleUnit::Degrees)]
    #[case("Degrees", AngleUnit::Degrees)]
    #[case("rad", AngleUnit::Radians)]
    fn units_parse(#[case] text: &str, #[case] expected: AngleUnit) {
        assert_eq!(text.parse::<AngleUnit>(), Ok(expected));
    }

    #[test]
    fn unknown_unit() {
        insta::assert_snapshot!(
            "grad".parse::<AngleUnit>().unwrap_err().to_string(),
            @"unknown angle unit 'grad', expected 'deg' or 'rad'"
        );
    }
}
