use crate::coordinate_systems::{CoordinateSystem, RightHandedXyLike};
use crate::systems::EquivalentTo;
use crate::vectors::Vector;
use crate::{math, Point2};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Defines a point (ie, position) in the planar coordinate system specified by `In`.
///
/// You can construct one from [cartesian](Coordinate::from_cartesian) or
/// [polar](Coordinate::from_polar) components, or with the [`coordinate!`](crate::coordinate)
/// macro.
///
/// Coordinates are plain values: every computation in this crate produces new coordinates rather
/// than moving existing ones.
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
// no need for the "point": indirection
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Coordinate<In> {
    /// X, Y in meters
    pub(crate) point: Point2,
    #[cfg_attr(feature = "serde", serde(skip))]
    system: PhantomData<In>,
}

// manual impls of Clone and Copy to avoid requiring In: Copy + Clone
impl<In> Clone for Coordinate<In> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<In> Copy for Coordinate<In> {}

impl<In> Coordinate<In> {
    pub(crate) fn from_nalgebra_point(p: Point2) -> Self {
        Self {
            point: p,
            system: PhantomData,
        }
    }

    /// Constructs a coordinate at the given (x, y) cartesian point in the [`CoordinateSystem`]
    /// `In`.
    pub fn from_cartesian(x: impl Into<Length>, y: impl Into<Length>) -> Self {
        Self::from_nalgebra_point(Point2::new(
            x.into().get::<meter>(),
            y.into().get::<meter>(),
        ))
    }

    /// Constructs a coordinate at the given (r, φ) polar point in the [`CoordinateSystem`] `In`.
    ///
    /// `φ` is measured counterclockwise from positive X.
    ///
    /// ```rust
    /// use approx::assert_relative_eq;
    /// use planar_kinematics::{Coordinate, systems::ChainBase};
    /// use uom::si::f64::{Angle, Length};
    /// use uom::si::{angle::degree, length::meter};
    ///
    /// let zero = Length::new::<meter>(0.);
    /// let unit = Length::new::<meter>(1.);
    /// assert_relative_eq!(
    ///     Coordinate::<ChainBase>::from_polar(unit, Angle::new::<degree>(90.)),
    ///     Coordinate::<ChainBase>::from_cartesian(zero, unit),
    /// );
    /// ```
    pub fn from_polar(radius: impl Into<Length>, azimuth: impl Into<Angle>) -> Self {
        Self::origin() + Vector::from_polar(radius, azimuth)
    }

    /// Constructs a coordinate at the origin of the coordinate system `In`.
    #[must_use]
    pub fn origin() -> Self {
        Self {
            point: Point2::origin(),
            system: PhantomData,
        }
    }

    /// Casts the coordinate system type parameter of the coordinate to the equivalent coordinate
    /// system `NewIn`.
    ///
    /// See [`EquivalentTo`] for details on when this is useful (and safe).
    #[must_use]
    pub fn cast<NewIn>(self) -> Coordinate<NewIn>
    where
        In: EquivalentTo<NewIn>,
    {
        Coordinate {
            point: self.point,
            system: PhantomData::<NewIn>,
        }
    }

    /// Returns this coordinate rotated about the origin of `In` by `angle`.
    ///
    /// See [`math::rotate`].
    #[must_use]
    pub fn rotated(self, angle: impl Into<Angle>) -> Self {
        math::rotate(self, angle)
    }

    /// Returns the point halfway between this coordinate and `other`.
    #[must_use]
    pub fn midpoint(&self, other: &Self) -> Self {
        self.lerp(other, 0.5)
    }

    /// Linearly interpolate between this coordinate and another coordinate.
    ///
    /// Specifically, returns `self * (1.0 - t) + rhs * t`, i.e., the linear blend of the
    /// two coordinates using the scalar value `t`.
    ///
    /// The value for `t` is not restricted to the range [0, 1].
    #[must_use]
    pub fn lerp(&self, rhs: &Self, t: f64) -> Self {
        Self {
            point: self.point.lerp(&rhs.point, t),
            system: self.system,
        }
    }

    /// Computes the distance of this point from the coordinate system's origin.
    #[doc(alias = "norm")]
    #[must_use]
    pub fn distance_from_origin(&self) -> Length {
        Length::new::<meter>(self.point.coords.norm())
    }

    /// Computes the distance between this point and the given point.
    ///
    /// ```rust
    /// use planar_kinematics::{Coordinate, systems::MechanismBase};
    /// use uom::si::f64::Length;
    /// use uom::si::length::meter;
    ///
    /// let a = Coordinate::<MechanismBase>::from_cartesian(
    ///     Length::new::<meter>(1.),
    ///     Length::new::<meter>(1.),
    /// );
    /// let b = Coordinate::<MechanismBase>::from_cartesian(
    ///     Length::new::<meter>(4.),
    ///     Length::new::<meter>(5.),
    /// );
    /// assert_eq!(a.distance_from(&b), Length::new::<meter>(5.));
    /// ```
    #[must_use]
    pub fn distance_from(&self, other: &Coordinate<In>) -> Length {
        (*other - *self).magnitude()
    }
}

impl<In> Default for Coordinate<In> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<In> Coordinate<In>
where
    In: CoordinateSystem<Convention = RightHandedXyLike>,
{
    #[must_use]
    pub fn x(&self) -> Length {
        Length::new::<meter>(self.point.x)
    }

    #[must_use]
    pub fn y(&self) -> Length {
        Length::new::<meter>(self.point.y)
    }
}

/// Constructs a [`Coordinate`] from named components.
///
/// ```rust
/// use planar_kinematics::{coordinate, systems::MechanismBase};
/// use uom::si::f64::Length;
/// use uom::si::length::meter;
///
/// let b1 = coordinate!(x = Length::new::<meter>(1.), y = Length::new::<meter>(1.); in MechanismBase);
/// assert_eq!(b1.y(), Length::new::<meter>(1.));
/// ```
#[macro_export]
macro_rules! coordinate {
    (x = $x:expr, y = $y:expr $(,)?) => {
        $crate::coordinate!(x = $x, y = $y; in _)
    };
    (x = $x:expr, y = $y:expr; in $in:ty) => {
        $crate::Coordinate::<$in>::from_cartesian($x, $y)
    };
}

impl<In> PartialEq<Self> for Coordinate<In> {
    fn eq(&self, other: &Self) -> bool {
        self.point.eq(&other.point)
    }
}

#[cfg(any(test, feature = "approx"))]
impl<In> AbsDiffEq<Self> for Coordinate<In> {
    type Epsilon = Length;

    fn default_epsilon() -> Self::Epsilon {
        // the mechanisms here are a few meters across; a nanometer is plenty
        Length::new::<meter>(1e-9)
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        // NOTE: this measures whether the absolute difference in any _one_ component is off by
        // more than epsilon, not whether the distance between the coordinates is below epsilon.
        self.point.abs_diff_eq(&other.point, epsilon.get::<meter>())
    }
}

#[cfg(any(test, feature = "approx"))]
impl<In> RelativeEq for Coordinate<In> {
    fn default_max_relative() -> Self::Epsilon {
        Length::new::<meter>(Point2::default_max_relative())
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.point.relative_eq(
            &other.point,
            epsilon.get::<meter>(),
            max_relative.get::<meter>(),
        )
    }
}

impl<In> Display for Coordinate<In> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "({:.*}, {:.*})", p, self.point.x, p, self.point.y),
            None => write!(f, "({}, {})", self.point.x, self.point.y),
        }
    }
}

impl<In> Neg for Coordinate<In> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            point: -self.point,
            system: self.system,
        }
    }
}

impl<In> Sub<Self> for Coordinate<In> {
    type Output = Vector<In>;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector::from_nalgebra_vector(self.point - rhs.point)
    }
}

impl<In> Add<Vector<In>> for Coordinate<In> {
    type Output = Coordinate<In>;

    fn add(self, rhs: Vector<In>) -> Self::Output {
        Coordinate {
            point: self.point + rhs.inner,
            system: self.system,
        }
    }
}

impl<In> AddAssign<Vector<In>> for Coordinate<In> {
    fn add_assign(&mut self, rhs: Vector<In>) {
        self.point += rhs.inner;
    }
}

impl<In> Sub<Vector<In>> for Coordinate<In> {
    type Output = Coordinate<In>;

    fn sub(self, rhs: Vector<In>) -> Self::Output {
        Coordinate {
            point: self.point - rhs.inner,
            system: self.system,
        }
    }
}

impl<In> SubAssign<Vector<In>> for Coordinate<In> {
    fn sub_assign(&mut self, rhs: Vector<In>) {
        self.point -= rhs.inner;
    }
}
