//! Planar spatial operations expressed in mathematical language.
//!
//! This module provides type-safe wrappers around the mathematical constructs that underpin
//! planar rigid body transforms (unit complex numbers and 2D isometries). For an interface in
//! terms of an object's heading and position, see [`mod engineering`](crate::engineering).
//!
//! The main type provided by this module is [`RigidBodyTransform`], which describes the isometry
//! (ie, rotation and translation) between two coordinate systems (see also [`CoordinateSystem`]).
//! [`RigidBodyTransform`] implements the various mathematical operations you would expect such
//! that you can multiply them together to combine them, take one's inverse, and multiply with a
//! [`Coordinate`] or [`Vector`] to apply the isometry to transform between coordinate systems.
//!
//! This module also provides the [`Rotation`] type for transforms between coordinate systems
//! that share an origin, and [`rotate`], the plain rotation of a point about the origin of the
//! coordinate system it is already in.

use crate::coordinates::Coordinate;
use crate::util::{display_degrees, signed_half_turn};
use crate::vectors::Vector;
use crate::{Isometry2, UnitComplex};
use nalgebra::Translation2;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::ops::{Mul, Neg};
use uom::si::angle::radian;
use uom::si::f64::Angle;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::{engineering, CoordinateSystem};

/// Rotates `point` counterclockwise about the origin of its coordinate system by `angle`.
///
/// This is the standard planar rotation
///
/// ```text
/// x' = x·cos(θ) − y·sin(θ)
/// y' = x·sin(θ) + y·cos(θ)
/// ```
///
/// It preserves the distance from the origin, and rotating by `a` and then by `b` is the same as
/// rotating by `a + b` (up to floating point error). Any finite angle is accepted; the unit is
/// carried by [`Angle`], so degrees and radians cannot be confused here.
///
/// ```rust
/// use approx::assert_relative_eq;
/// use planar_kinematics::{coordinate, math::rotate, systems::ChainBase};
/// use uom::si::f64::{Angle, Length};
/// use uom::si::{angle::degree, length::meter};
///
/// let m = Length::new::<meter>;
/// let p = coordinate!(x = m(3.), y = m(2.); in ChainBase);
/// assert_relative_eq!(
///     rotate(p, Angle::new::<degree>(90.)),
///     coordinate!(x = m(-2.), y = m(3.)),
/// );
/// ```
#[must_use]
pub fn rotate<In>(point: Coordinate<In>, angle: impl Into<Angle>) -> Coordinate<In> {
    Coordinate::from_nalgebra_point(rotation_by(angle) * point.point)
}

/// The counterclockwise rotation by `angle` about the origin, shared by everything that rotates.
pub(crate) fn rotation_by(angle: impl Into<Angle>) -> UnitComplex {
    UnitComplex::new(angle.into().get::<radian>())
}

/// Defines a [rotation transform] between two planar [`CoordinateSystem`]s that share an origin.
///
/// There are generally two ways to construct a rotation:
///
/// 1. by using [`engineering::Orientation::map_as_zero_in`] when you already have an
///    [`engineering::Orientation`];
/// 2. by using [`Rotation::from_angle`] directly.
///
/// Mathematically speaking, this is a type-safe wrapper around a [unit complex number].
///
/// <div class="warning">
///
/// Rotations can be chained with other transformations using `*` (ie, the [`Mul`] trait). However,
/// note that the order of the operands to `*` matter, and do not match the mathematical
/// convention. Matrix multiply for transforms traditionally has the transform on the left and the
/// vector to transform on the right. Doing so here would lead to a type signature of
///
/// ```rust,ignore
/// let _: Coordinate<To> = Rotation<From, To> * Coordinate<From>;
/// ```
///
/// Which violates the expectation that a matrix multiply eliminates the "middle" component (ie,
/// (m × n)(n × p) = (m × p)). So, we require that the rotation is on the _right_ to go from
/// `From` into `To`, and that the rotation is on the _left_ to go from `To` into `From` (ie, for
/// the inverse transform).
///
/// </div>
///
/// [rotation transform]: https://en.wikipedia.org/wiki/Rotation_(mathematics)#Two_dimensions
/// [unit complex number]: https://en.wikipedia.org/wiki/Complex_number#Polar_form
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// don't require From/To: Serialize/Deserialize since we skip it anyway
#[cfg_attr(feature = "serde", serde(bound = ""))]
pub struct Rotation<From, To> {
    /// The rotation that takes components in `To` to components in `From`, ie, the orientation
    /// of `To`'s axes as seen from `From`. Going `From` -> `To` therefore applies the _inverse_ of
    /// this, which is what you'll see across the `impl Mul`s further down.
    pub(crate) inner: UnitComplex,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) from: PhantomData<From>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) to: PhantomData<To>,
}

// manual impls of Clone and Copy to avoid requiring From/To: Copy + Clone
impl<From, To> Clone for Rotation<From, To> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<From, To> Copy for Rotation<From, To> {}

impl<From, To> PartialEq<Self> for Rotation<From, To> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq(&other.inner)
    }
}

impl<From, To> Display for Rotation<From, To> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let degrees = display_degrees(self.angle());
        match f.precision() {
            Some(p) => write!(f, "rotation by {degrees:.p$}°"),
            None => write!(f, "rotation by {degrees}°"),
        }
    }
}

impl<From, To> Rotation<From, To> {
    /// Constructs the rotation between two coordinate systems where `To`'s axes are `From`'s
    /// axes turned counterclockwise by `angle`.
    ///
    /// # Safety
    ///
    /// This asserts a relationship between `From` and `To` that the type system cannot check. If
    /// the two systems do not share an origin, or are not turned by `angle` relative to one
    /// another, transforming with the result silently moves values into the wrong coordinate
    /// system.
    #[must_use]
    pub unsafe fn from_angle(angle: impl Into<Angle>) -> Self {
        Self {
            inner: rotation_by(angle),
            from: PhantomData::<From>,
            to: PhantomData::<To>,
        }
    }

    /// Returns the angle `To` is turned by relative to `From`, in [-180°, 180°).
    #[must_use]
    pub fn angle(&self) -> Angle {
        Angle::new::<radian>(signed_half_turn(Angle::new::<radian>(self.inner.angle())))
    }

    /// Returns the equal-but-opposite transform to this one.
    ///
    /// That is, a rotation _from_ the [`CoordinateSystem`] `To` _into_ the coordinate system
    /// `From`.
    #[must_use]
    pub fn inverse(&self) -> Rotation<To, From> {
        Rotation {
            inner: self.inner.inverse(),
            from: PhantomData::<To>,
            to: PhantomData::<From>,
        }
    }

    /// Transforms an element in [`CoordinateSystem`] `From` into `To`.
    #[doc(alias = "apply")]
    pub fn transform<T>(&self, in_from: T) -> <T as Mul<Self>>::Output
    where
        T: Mul<Self>,
    {
        in_from * *self
    }

    /// Transforms an element in [`CoordinateSystem`] `To` into `From`.
    ///
    /// This is equivalent to (but more efficient than) first inverting the transform with
    /// [`Rotation::inverse`] and then calling [`Rotation::transform`].
    #[doc(alias = "undo")]
    pub fn inverse_transform<T>(&self, in_to: T) -> <Self as Mul<T>>::Output
    where
        Self: Mul<T>,
    {
        *self * in_to
    }
}

#[cfg(any(test, feature = "approx"))]
impl<From, To> AbsDiffEq<Self> for Rotation<From, To> {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        // this is very accurate in radians
        0.000_000_001
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        crate::util::same_heading(self.angle(), other.angle(), epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl<From, To> RelativeEq for Rotation<From, To> {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
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

impl<From, To> Neg for Rotation<From, To> {
    type Output = Rotation<To, From>;

    fn neg(self) -> Self::Output {
        self.inverse()
    }
}

// Rotation<From, Over> * Rotation<Over, To> -> Rotation<From, To>
//
// self.inner takes Over into From and rhs.inner takes To into Over, so To into From is
// self.inner after rhs.inner.
impl<From, Over, To> Mul<Rotation<Over, To>> for Rotation<From, Over> {
    type Output = Rotation<From, To>;

    fn mul(self, rhs: Rotation<Over, To>) -> Self::Output {
        Self::Output {
            inner: self.inner * rhs.inner,
            from: self.from,
            to: rhs.to,
        }
    }
}

/// Defines a [rigid body transform] between two planar [`CoordinateSystem`]s.
///
/// There are generally two ways to construct a rigid body transform:
///
/// 1. by using [`engineering::Pose::map_as_zero_in`] when you already have an
///    [`engineering::Pose`]; this is how a platform's body frame is tied to the frame of the
///    mechanism it sits in;
/// 2. by using [`RigidBodyTransform::new`] with a translation and a [`Rotation`].
///
/// Mathematically speaking, this is a type-safe wrapper around a planar [isometry].
///
/// The same operand-order rules as for [`Rotation`] apply: the transform goes on the _right_ to
/// move a value from `From` into `To`, and on the _left_ to move a value from `To` into `From`.
///
/// [rigid body transform]: https://en.wikipedia.org/wiki/Rigid_transformation
/// [isometry]: https://en.wikipedia.org/wiki/Isometry
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// don't require From/To: Serialize/Deserialize since we skip it anyway
#[cfg_attr(feature = "serde", serde(bound = ""))]
pub struct RigidBodyTransform<From, To> {
    /// Takes coordinates in `To` to coordinates in `From`; see [`Rotation::inner`].
    pub(crate) inner: Isometry2,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) from: PhantomData<From>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) to: PhantomData<To>,
}

// manual impls of Clone and Copy to avoid requiring From/To: Copy + Clone
impl<From, To> Clone for RigidBodyTransform<From, To> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<From, To> Copy for RigidBodyTransform<From, To> {}

impl<From, To> RigidBodyTransform<From, To> {
    /// Constructs a transform directly from a translation and a rotation.
    ///
    /// `translation` is the position of `To`'s origin as seen from `From`, and `rotation` is the
    /// orientation of `To`'s axes as seen from `From`.
    ///
    /// # Safety
    ///
    /// This method is marked as `unsafe` for the same reason [`engineering::Pose::map_as_zero_in`]
    /// is; if you construct a transform incorrectly, it allows moving between different
    /// type-enforced coordinate systems without performing the correct conversions, leading to a
    /// defeat of type safety.
    #[must_use]
    pub unsafe fn new(translation: Vector<From>, rotation: Rotation<From, To>) -> Self {
        Self {
            inner: Isometry2::from_parts(Translation2::from(translation.inner), rotation.inner),
            from: PhantomData::<From>,
            to: PhantomData::<To>,
        }
    }

    /// Chains two transforms to produce a new transform that can transform directly from `From` to
    /// `NewTo`.
    #[must_use]
    pub fn and_then<NewTo>(
        self,
        rhs: RigidBodyTransform<To, NewTo>,
    ) -> RigidBodyTransform<From, NewTo> {
        self * rhs
    }

    /// Returns the equal-but-opposite transform to this one.
    #[must_use]
    pub fn inverse(&self) -> RigidBodyTransform<To, From> {
        RigidBodyTransform {
            inner: self.inner.inverse(),
            from: PhantomData::<To>,
            to: PhantomData::<From>,
        }
    }

    /// Returns the position of `To`'s origin as seen from `From`.
    #[must_use]
    pub fn translation(&self) -> Vector<From> {
        Vector::from_nalgebra_vector(self.inner.translation.vector)
    }

    /// Returns the rotational part of this transform.
    #[must_use]
    pub fn rotation(&self) -> Rotation<From, To> {
        Rotation {
            inner: self.inner.rotation,
            from: PhantomData::<From>,
            to: PhantomData::<To>,
        }
    }

    /// Transforms an element in [`CoordinateSystem`] `From` into `To`.
    #[doc(alias = "apply")]
    pub fn transform<T>(&self, in_from: T) -> <T as Mul<Self>>::Output
    where
        T: Mul<Self>,
    {
        in_from * *self
    }

    /// Transforms an element in [`CoordinateSystem`] `To` into `From`.
    ///
    /// This is equivalent to (but more efficient than) first inverting the transform with
    /// [`RigidBodyTransform::inverse`] and then calling [`RigidBodyTransform::transform`].
    #[doc(alias = "undo")]
    pub fn inverse_transform<T>(&self, in_to: T) -> <Self as Mul<T>>::Output
    where
        Self: Mul<T>,
    {
        *self * in_to
    }
}

impl<From, To> PartialEq<Self> for RigidBodyTransform<From, To> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq(&other.inner)
    }
}

impl<From, To> Display for RigidBodyTransform<From, To> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(
                f,
                "translation {:.p$}, {:.p$}",
                self.translation(),
                self.rotation()
            ),
            None => write!(f, "translation {}, {}", self.translation(), self.rotation()),
        }
    }
}

impl<From, To> Neg for RigidBodyTransform<From, To> {
    type Output = RigidBodyTransform<To, From>;

    fn neg(self) -> Self::Output {
        self.inverse()
    }
}

// Coordinate<From> * Rotation<From, To> -> Coordinate<To>
impl<From, To> Mul<Rotation<From, To>> for Coordinate<From> {
    type Output = Coordinate<To>;

    fn mul(self, rhs: Rotation<From, To>) -> Self::Output {
        Coordinate::from_nalgebra_point(rhs.inner.inverse_transform_point(&self.point))
    }
}

// Rotation<From, To> * Coordinate<To> -> Coordinate<From>
impl<From, To> Mul<Coordinate<To>> for Rotation<From, To> {
    type Output = Coordinate<From>;

    fn mul(self, rhs: Coordinate<To>) -> Self::Output {
        Coordinate::from_nalgebra_point(self.inner.transform_point(&rhs.point))
    }
}

// Vector<From> * Rotation<From, To> -> Vector<To>
impl<From, To> Mul<Rotation<From, To>> for Vector<From> {
    type Output = Vector<To>;

    fn mul(self, rhs: Rotation<From, To>) -> Self::Output {
        Vector::from_nalgebra_vector(rhs.inner.inverse_transform_vector(&self.inner))
    }
}

// Rotation<From, To> * Vector<To> -> Vector<From>
impl<From, To> Mul<Vector<To>> for Rotation<From, To> {
    type Output = Vector<From>;

    fn mul(self, rhs: Vector<To>) -> Self::Output {
        Vector::from_nalgebra_vector(self.inner.transform_vector(&rhs.inner))
    }
}

// Coordinate<From> * RigidBodyTransform<From, To> -> Coordinate<To>
impl<From, To> Mul<RigidBodyTransform<From, To>> for Coordinate<From> {
    type Output = Coordinate<To>;

    fn mul(self, rhs: RigidBodyTransform<From, To>) -> Self::Output {
        Coordinate::from_nalgebra_point(rhs.inner.inverse_transform_point(&self.point))
    }
}

// RigidBodyTransform<From, To> * Coordinate<To> -> Coordinate<From>
impl<From, To> Mul<Coordinate<To>> for RigidBodyTransform<From, To> {
    type Output = Coordinate<From>;

    fn mul(self, rhs: Coordinate<To>) -> Self::Output {
        Coordinate::from_nalgebra_point(self.inner.transform_point(&rhs.point))
    }
}

// Vector<From> * RigidBodyTransform<From, To> -> Vector<To>
//
// vectors are displacements, so only the rotational part applies
impl<From, To> Mul<RigidBodyTransform<From, To>> for Vector<From> {
    type Output = Vector<To>;

    fn mul(self, rhs: RigidBodyTransform<From, To>) -> Self::Output {
        Vector::from_nalgebra_vector(rhs.inner.inverse_transform_vector(&self.inner))
    }
}

// RigidBodyTransform<From, To> * Vector<To> -> Vector<From>
impl<From, To> Mul<Vector<To>> for RigidBodyTransform<From, To> {
    type Output = Vector<From>;

    fn mul(self, rhs: Vector<To>) -> Self::Output {
        Vector::from_nalgebra_vector(self.inner.transform_vector(&rhs.inner))
    }
}

// RigidBodyTransform<From, Over> * RigidBodyTransform<Over, To> -> RigidBodyTransform<From, To>
impl<From, Over, To> Mul<RigidBodyTransform<Over, To>> for RigidBodyTransform<From, Over> {
    type Output = RigidBodyTransform<From, To>;

    fn mul(self, rhs: RigidBodyTransform<Over, To>) -> Self::Output {
        Self::Output {
            inner: self.inner * rhs.inner,
            from: self.from,
            to: rhs.to,
        }
    }
}

// RigidBodyTransform<From, Over> * Rotation<Over, To> -> RigidBodyTransform<From, To>
impl<From, Over, To> Mul<Rotation<Over, To>> for RigidBodyTransform<From, Over> {
    type Output = RigidBodyTransform<From, To>;

    fn mul(self, rhs: Rotation<Over, To>) -> Self::Output {
        Self::Output {
            inner: Isometry2::from_parts(self.inner.translation, self.inner.rotation * rhs.inner),
            from: self.from,
            to: rhs.to,
        }
    }
}

#[cfg(any(test, feature = "approx"))]
impl<From, To> AbsDiffEq<Self> for RigidBodyTransform<From, To> {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        Isometry2::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.inner.abs_diff_eq(&other.inner, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl<From, To> RelativeEq for RigidBodyTransform<From, To> {
    fn default_max_relative() -> Self::Epsilon {
        Isometry2::default_max_relative()
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
