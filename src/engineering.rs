//! Planar spatial operations expressed in engineering language.
//!
//! This module provides wrappers around the types in [`mod math`](crate::math) that are easier to
//! grok for those with more of an engineering background. The types here have slightly less
//! expressive power than the "raw" mathematical constructs there, but are more straightforward to
//! construct and use for mechanisms.
//!
//! The main type provided by this module is [`Pose`], which describes a rigid body's position and
//! heading in a coordinate system (see [`CoordinateSystem`]). Poses can be converted between
//! coordinate systems using [`RigidBodyTransform`] (eg, [`RigidBodyTransform::transform`]).
//!
//! This module also provides the [`Orientation`] type to represent a body's heading in a
//! coordinate system independent of its position. To represent just a body's position, you can
//! use [`Coordinate`], which is shared between the math and engineering modules.
//!
//! Every body is assumed to have "body axes": positive X runs along the body (eg, along a link,
//! or along a platform from its first attachment point to its second), and positive Y is a quarter
//! turn counterclockwise from that. A body's orientation is then the angle its body X axis makes
//! with the X axis of the reference system.
//!
//! One method worth calling out in particular is [`Pose::map_as_zero_in`], which allows you to
//! start a new coordinate system with origin and axes equal to that of the current pose. This is,
//! for example, how a parallel mechanism ties [`PlatformFrame`] to [`MechanismBase`].

use crate::coordinates::Coordinate;
use crate::math::{RigidBodyTransform, Rotation};
use crate::util::display_degrees;
use crate::vectors::Vector;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::ops::Mul;
use uom::si::f64::Angle;
use uom::ConstZero;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::{
    systems::{MechanismBase, PlatformFrame},
    CoordinateSystem,
};

#[derive(Clone, Copy, Debug)]
pub(crate) struct ObjectCoordinateSystem;

/// Defines the heading of a rigid body in [`CoordinateSystem`] `In`.
///
/// <div class="warning">
///
/// When deserializing, the coordinate system of the deserialized value is _not_ checked, so this
/// is a foot-gun to be mindful of.
///
/// </div>
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// don't require In: Serialize/Deserialize since we skip it anyway
#[cfg_attr(feature = "serde", serde(bound = ""))]
// no need for the "inner": indirection
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Orientation<In> {
    pub(crate) inner: Rotation<In, ObjectCoordinateSystem>,
}

// manual impls of Clone and Copy to avoid requiring In: Copy + Clone
impl<In> Clone for Orientation<In> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<In> Copy for Orientation<In> {}

impl<In> PartialEq<Self> for Orientation<In> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq(&other.inner)
    }
}

impl<In> Orientation<In> {
    /// Constructs an orientation from the angle between the body's X axis and `In`'s X axis.
    ///
    /// Positive headings turn counterclockwise, from positive X towards positive Y.
    #[must_use]
    pub fn from_heading(heading: impl Into<Angle>) -> Self {
        Self {
            // SAFETY: the object coordinate system is implicitly defined by this heading.
            inner: unsafe { Rotation::from_angle(heading) },
        }
    }

    /// Constructs an orientation whose body axes line up with those of `In`.
    #[must_use]
    pub fn aligned() -> Self {
        Self::from_heading(Angle::ZERO)
    }

    /// Returns the heading of this orientation, in [-180°, 180°).
    #[must_use]
    pub fn heading(&self) -> Angle {
        self.inner.angle()
    }

    /// Constructs a rotation into [`CoordinateSystem`] `To` such that `self` has a heading of
    /// zero in `To` (ie, [`Orientation::aligned`]).
    ///
    /// Or, if you prefer a more mathematical description: this defines the axes of the whole
    /// coordinate system `To` _in_ `In`.
    ///
    /// # Safety
    ///
    /// This method allows you to end up with erroneous transforms if you're not careful. See
    /// [`Pose::map_as_zero_in`] for more details.
    ///
    /// Specifically in the case of `Orientation`, you are also asserting that _only_ rotation (ie,
    /// no translation) is needed to convert from `In` to `To`.
    #[doc(alias = "as_transform_to")]
    #[must_use]
    pub unsafe fn map_as_zero_in<To>(self) -> Rotation<In, To> {
        Rotation {
            inner: self.inner.inner,
            from: self.inner.from,
            to: PhantomData::<To>,
        }
    }
}

impl<In> Default for Orientation<In> {
    fn default() -> Self {
        Self::aligned()
    }
}

impl<In> Display for Orientation<In> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let degrees = display_degrees(self.heading());
        match f.precision() {
            Some(p) => write!(f, "heading {degrees:.p$}°"),
            None => write!(f, "heading {degrees}°"),
        }
    }
}

impl<From, To> Mul<Rotation<From, To>> for Orientation<From> {
    type Output = Orientation<To>;

    fn mul(self, rhs: Rotation<From, To>) -> Self::Output {
        rhs.inverse() * self
    }
}

impl<From, To> Mul<Orientation<To>> for Rotation<From, To> {
    type Output = Orientation<From>;

    fn mul(self, rhs: Orientation<To>) -> Self::Output {
        Orientation {
            inner: self * rhs.inner,
        }
    }
}

#[cfg(any(test, feature = "approx"))]
impl<In> AbsDiffEq<Self> for Orientation<In> {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        Rotation::<In, ObjectCoordinateSystem>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.inner.abs_diff_eq(&other.inner, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl<In> RelativeEq for Orientation<In> {
    fn default_max_relative() -> Self::Epsilon {
        Rotation::<In, ObjectCoordinateSystem>::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.inner.relative_eq(&other.inner, epsilon, max_relative)
    }
}

/// Defines the pose (ie, position and heading) of a rigid body in [`CoordinateSystem`] `In`.
///
/// <div class="warning">
///
/// When deserializing, the coordinate system of the deserialized value is _not_ checked, so this
/// is a foot-gun to be mindful of.
///
/// </div>
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// don't require In: Serialize/Deserialize since we skip it anyway
#[cfg_attr(feature = "serde", serde(bound = ""))]
// no need for the "inner": indirection
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Pose<In> {
    pub(crate) inner: RigidBodyTransform<In, ObjectCoordinateSystem>,
}

// manual impls of Clone and Copy to avoid requiring In: Copy + Clone
impl<In> Clone for Pose<In> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<In> Copy for Pose<In> {}

impl<In> PartialEq<Self> for Pose<In> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq(&other.inner)
    }
}

impl<In> Pose<In> {
    /// Constructs a pose from a position and orientation.
    #[must_use]
    pub fn new(position: Coordinate<In>, orientation: Orientation<In>) -> Self {
        Self {
            // SAFETY: the object coordinate system is implictly defined, and so if we're told this
            // is the position and orientation of the body axes, then so be it.
            inner: unsafe {
                RigidBodyTransform::new(Vector::from(position), orientation.map_as_zero_in())
            },
        }
    }

    /// Constructs a transform into [`CoordinateSystem`] `To` such that `self` is "zero" in `To`.
    ///
    /// Less informally,
    ///
    /// - if this transform is applied to the [`Coordinate`] of this pose, it will yield
    ///   [`Coordinate::origin`], and
    /// - if this transform is applied to the [`Orientation`] of this pose, it will yield
    ///   [`Orientation::aligned`].
    ///
    /// Conversely, a point that sits at some fixed offset on the body (say, an attachment point
    /// at `(-1, 0)` in the body's own frame) is carried into `In` by the _inverse_ of this
    /// transform, which is what [`RigidBodyTransform::inverse_transform`] does.
    ///
    /// # Safety
    ///
    /// <div class="warning">
    ///
    /// This method allows you to end up with erroneous transforms if you're not careful.
    ///
    /// </div>
    ///
    /// The type parameter `To` names the coordinate system whose origin and axes are _defined_
    /// by this pose. Calling this twice with the same `To` for two different poses, or with a `To`
    /// that already has a meaning elsewhere in the program, yields transforms that silently move
    /// values between type-safe wrappers _without_ doing the correct corrections to their embedded
    /// data, thus defeating the type safety elsewhere.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use approx::assert_relative_eq;
    /// use planar_kinematics::{coordinate, system, Coordinate, engineering::{Orientation, Pose}};
    /// use uom::si::f64::{Angle, Length};
    /// use uom::si::{angle::degree, length::meter};
    ///
    /// system!(struct Workcell using right-handed XY);
    /// system!(struct Tray using right-handed XY);
    ///
    /// let m = Length::new::<meter>;
    ///
    /// // the tray sits at (2, 1), turned a quarter turn counterclockwise
    /// let tray = Pose::<Workcell>::new(
    ///     coordinate!(x = m(2.), y = m(1.)),
    ///     Orientation::from_heading(Angle::new::<degree>(90.)),
    /// );
    ///
    /// // SAFETY: Tray is defined by this pose and nothing else.
    /// let workcell_to_tray = unsafe { tray.map_as_zero_in::<Tray>() };
    ///
    /// // a slot 1m along the tray is 1m "up" from the tray's position in the workcell
    /// let slot = coordinate!(x = m(1.), y = m(0.); in Tray);
    /// assert_relative_eq!(
    ///     workcell_to_tray.inverse_transform(slot),
    ///     coordinate!(x = m(2.), y = m(2.)),
    /// );
    /// ```
    #[doc(alias = "as_transform_to")]
    #[doc(alias = "defines_pose_of")]
    #[must_use]
    pub unsafe fn map_as_zero_in<To>(self) -> RigidBodyTransform<In, To> {
        RigidBodyTransform {
            inner: self.inner.inner,
            from: self.inner.from,
            to: PhantomData::<To>,
        }
    }

    #[must_use]
    pub fn position(&self) -> Coordinate<In> {
        Coordinate::origin() + self.inner.translation()
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation<In> {
        Orientation {
            inner: self.inner.rotation(),
        }
    }
}

impl<In> Default for Pose<In> {
    fn default() -> Self {
        Self::new(Coordinate::origin(), Orientation::aligned())
    }
}

impl<In> Display for Pose<In> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.p$} {:.p$}", self.position(), self.orientation()),
            None => write!(f, "{} {}", self.position(), self.orientation()),
        }
    }
}

impl<From, To> Mul<RigidBodyTransform<From, To>> for Pose<From> {
    type Output = Pose<To>;

    fn mul(self, rhs: RigidBodyTransform<From, To>) -> Self::Output {
        // this is rhs.inverse() * self, but nalgebra can do that without the intermediate
        // inverse through inv_mul
        Pose {
            inner: RigidBodyTransform {
                inner: rhs.inner.inv_mul(&self.inner.inner),
                from: rhs.to,
                to: self.inner.to,
            },
        }
    }
}

impl<From, To> Mul<Pose<To>> for RigidBodyTransform<From, To> {
    type Output = Pose<From>;

    fn mul(self, rhs: Pose<To>) -> Self::Output {
        Pose {
            inner: self * rhs.inner,
        }
    }
}

#[cfg(any(test, feature = "approx"))]
impl<In> AbsDiffEq<Self> for Pose<In> {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        RigidBodyTransform::<In, ObjectCoordinateSystem>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.inner.abs_diff_eq(&other.inner, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl<In> RelativeEq for Pose<In> {
    fn default_max_relative() -> Self::Epsilon {
        RigidBodyTransform::<In, ObjectCoordinateSystem>::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.inner.relative_eq(&other.inner, epsilon, max_relative)
    }
}
