use crate::parallel::AngleRange;
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

/// Errors reported by the kinematics computations.
///
/// Every variant is a local failure of the call that returned it: a call either yields a complete
/// result or one of these.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum KinematicsError {
    #[error(
        "a chain needs one joint angle per link, got {link_lengths} link lengths and \
         {joint_angles} joint angles"
    )]
    DimensionMismatch {
        link_lengths: usize,
        joint_angles: usize,
    },

    #[error(
        "link {index} has length {}m, but link lengths must be positive",
        length.get::<meter>()
    )]
    InvalidLinkLength { index: usize, length: Length },

    #[error(
        "platform orientation {}° is outside the valid range {range}",
        crate::util::display_degrees(*orientation)
    )]
    OrientationOutOfRange { orientation: Angle, range: AngleRange },
}

pub type Result<T> = std::result::Result<T, KinematicsError>;
