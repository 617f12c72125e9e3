use uom::si::angle::{degree, radian};
use uom::si::f64::Angle;

/// Returns `angle` wrapped into [-180°, 180°), in radians.
///
/// uom does not normalize angles, so two angles that describe the same heading (eg, -90° and
/// 270°) compare unequal until they are both wrapped.
pub(crate) fn signed_half_turn(angle: Angle) -> f64 {
    let full_turn = Angle::FULL_TURN.get::<radian>();
    let half_turn = Angle::HALF_TURN.get::<radian>();
    let bounded = angle.get::<radian>().rem_euclid(full_turn);
    if bounded < half_turn {
        bounded
    } else {
        bounded - full_turn
    }
}

/// Returns `angle` in degrees, rounded to a nanodegree for display.
///
/// Angles are stored in radians, so a round trip through degrees leaves noise in the last few bits
/// (eg, 120° reads back as 119.99999999999999°).
pub(crate) fn display_degrees(angle: Angle) -> f64 {
    (angle.get::<degree>() * 1e9).round() / 1e9
}

/// Whether two angles describe the same heading to within `epsilon` radians.
#[cfg(any(test, feature = "approx"))]
pub(crate) fn same_heading(a: Angle, b: Angle, epsilon: f64) -> bool {
    signed_half_turn(a - b).abs() <= epsilon
}
