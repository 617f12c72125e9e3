use crate::coordinate_systems::{CoordinateSystem, RightHandedXyLike};
use crate::coordinates::Coordinate;
use crate::math;
use crate::Vector2;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use uom::si::angle::radian;
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Defines a displacement (ie, direction and length) in the planar coordinate system `In`.
///
/// Vectors are what you get when subtracting two [`Coordinate`]s, and what you add to a
/// [`Coordinate`] to move it. A link of a serial chain is a vector, as is the offset from the
/// centre of a platform to one of its joints.
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
pub struct Vector<In> {
    /// X, Y in meters
    pub(crate) inner: Vector2,
    #[cfg_attr(feature = "serde", serde(skip))]
    system: PhantomData<In>,
}

// manual impls of Clone and Copy to avoid requiring In: Copy + Clone
impl<In> Clone for Vector<In> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<In> Copy for Vector<In> {}

/// Constructs a [`Vector`] from named components.
///
/// ```rust
/// use planar_kinematics::{vector, systems::PlatformFrame};
/// use uom::si::f64::Length;
/// use uom::si::length::meter;
///
/// let overhang = vector!(x = Length::new::<meter>(1.), y = Length::new::<meter>(0.); in PlatformFrame);
/// assert_eq!(overhang.magnitude(), Length::new::<meter>(1.));
/// ```
#[macro_export]
macro_rules! vector {
    (x = $x:expr, y = $y:expr $(,)?) => {
        $crate::vector!(x = $x, y = $y; in _)
    };
    (x = $x:expr, y = $y:expr; in $in:ty) => {
        $crate::Vector::<$in>::from_cartesian($x, $y)
    };
}

impl<In> Vector<In> {
    pub(crate) fn from_nalgebra_vector(value: Vector2) -> Self {
        Self {
            inner: value,
            system: PhantomData,
        }
    }

    /// Constructs a vector with the given (x, y) cartesian components in the
    /// [`CoordinateSystem`] `In`.
    pub fn from_cartesian(x: impl Into<Length>, y: impl Into<Length>) -> Self {
        Self::from_nalgebra_vector(Vector2::new(
            x.into().get::<meter>(),
            y.into().get::<meter>(),
        ))
    }

    /// Constructs a vector of the given length pointing at `azimuth` counterclockwise from
    /// positive X in the [`CoordinateSystem`] `In`.
    ///
    /// This is exactly the displacement contributed by one link of a serial chain whose
    /// cumulative orientation is `azimuth`.
    pub fn from_polar(length: impl Into<Length>, azimuth: impl Into<Angle>) -> Self {
        let length = length.into().get::<meter>();
        let (sin, cos) = azimuth.into().get::<radian>().sin_cos();
        Self::from_nalgebra_vector(Vector2::new(length * cos, length * sin))
    }

    /// Constructs a zero-length vector.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_nalgebra_vector(Vector2::zeros())
    }

    /// Returns the length of this vector.
    #[doc(alias = "norm")]
    #[must_use]
    pub fn magnitude(&self) -> Length {
        Length::new::<meter>(self.inner.norm())
    }

    /// Returns the angle of this vector counterclockwise from positive X, in (-180°, 180°].
    ///
    /// Returns `None` for the zero vector, whose direction is ill-defined.
    #[must_use]
    pub fn azimuth(&self) -> Option<Angle> {
        if self.inner.x == 0. && self.inner.y == 0. {
            return None;
        }
        // + 0. turns -0. into 0., so the negative X axis is 180° rather than -180°
        let y = self.inner.y + 0.;
        Some(Angle::new::<radian>(y.atan2(self.inner.x)))
    }

    /// Returns this vector rotated counterclockwise by `angle`.
    ///
    /// See [`math::rotate`](crate::math::rotate).
    #[must_use]
    pub fn rotated(self, angle: impl Into<Angle>) -> Self {
        Self::from_nalgebra_vector(math::rotation_by(angle) * self.inner)
    }
}

impl<In> Vector<In>
where
    In: CoordinateSystem<Convention = RightHandedXyLike>,
{
    #[must_use]
    pub fn x(&self) -> Length {
        Length::new::<meter>(self.inner.x)
    }

    #[must_use]
    pub fn y(&self) -> Length {
        Length::new::<meter>(self.inner.y)
    }

    #[must_use]
    pub fn x_axis() -> Self {
        Self::from_nalgebra_vector(*Vector2::x_axis())
    }

    #[must_use]
    pub fn y_axis() -> Self {
        Self::from_nalgebra_vector(*Vector2::y_axis())
    }
}

impl<In> From<Coordinate<In>> for Vector<In> {
    fn from(value: Coordinate<In>) -> Self {
        Self::from_nalgebra_vector(value.point.coords)
    }
}

impl<In> Default for Vector<In> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<In> Neg for Vector<In> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_nalgebra_vector(-self.inner)
    }
}

impl<In> Add<Self> for Vector<In> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_nalgebra_vector(self.inner + rhs.inner)
    }
}

impl<In> AddAssign<Self> for Vector<In> {
    fn add_assign(&mut self, rhs: Self) {
        self.inner += rhs.inner;
    }
}

impl<In> Sub<Self> for Vector<In> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_nalgebra_vector(self.inner - rhs.inner)
    }
}

impl<In> SubAssign<Self> for Vector<In> {
    fn sub_assign(&mut self, rhs: Self) {
        self.inner -= rhs.inner;
    }
}

impl<In> Sum for Vector<In> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, v| acc + v)
    }
}

impl<In> Mul<f64> for Vector<In> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::from_nalgebra_vector(self.inner * rhs)
    }
}

impl<In> Div<f64> for Vector<In> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self::from_nalgebra_vector(self.inner / rhs)
    }
}

impl<In> PartialEq<Self> for Vector<In> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq(&other.inner)
    }
}

impl<In> Display for Vector<In> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "[{:.*}, {:.*}]", p, self.inner.x, p, self.inner.y),
            None => write!(f, "[{}, {}]", self.inner.x, self.inner.y),
        }
    }
}

#[cfg(any(test, feature = "approx"))]
impl<In> AbsDiffEq<Self> for Vector<In> {
    type Epsilon = Length;

    fn default_epsilon() -> Self::Epsilon {
        Length::new::<meter>(1e-9)
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.inner.abs_diff_eq(&other.inner, epsilon.get::<meter>())
    }
}

#[cfg(any(test, feature = "approx"))]
impl<In> RelativeEq for Vector<In> {
    fn default_max_relative() -> Self::Epsilon {
        Length::new::<meter>(Vector2::default_max_relative())
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.inner.relative_eq(
            &other.inner,
            epsilon.get::<meter>(),
            max_relative.get::<meter>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::coordinate_systems::{ChainBase, PlatformFrame};
    use crate::coordinates::Coordinate;
    use crate::vectors::Vector;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use uom::si::f64::{Angle, Length};
    use uom::si::{angle::degree, length::meter};

    fn m(meters: f64) -> Length {
        Length::new::<meter>(meters)
    }
    fn d(degrees: f64) -> Angle {
        Angle::new::<degree>(degrees)
    }

    #[rstest]
    #[case(d(0.), [1., 0.])]
    #[case(d(90.), [0., 1.])]
    #[case(d(180.), [-1., 0.])]
    #[case(d(270.), [0., -1.])]
    #[case(d(-90.), [0., -1.])]
    #[case(d(45.), [std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2])]
    fn from_polar_unit(#[case] azimuth: Angle, #[case] expected: [f64; 2]) {
        assert_relative_eq!(
            Vector::<ChainBase>::from_polar(m(1.), azimuth),
            vector!(x = m(expected[0]), y = m(expected[1]))
        );
    }

    #[rstest]
    #[case([1., 0.], Some(0.))]
    #[case([0., 2.], Some(90.))]
    #[case([-3., 0.], Some(180.))]
    #[case([-3., -0.], Some(180.))]
    #[case([0., -0.5], Some(-90.))]
    #[case([0., 0.], None)]
    fn azimuth(#[case] components: [f64; 2], #[case] expected_degrees: Option<f64>) {
        let v = Vector::<PlatformFrame>::from_cartesian(m(components[0]), m(components[1]));
        match (v.azimuth(), expected_degrees) {
            (Some(actual), Some(expected)) => {
                assert_relative_eq!(actual.get::<degree>(), expected, epsilon = 1e-12)
            }
            (None, None) => {}
            (actual, expected) => panic!("expected {expected:?}°, got {actual:?}"),
        }
    }

    #[test]
    fn links_sum_to_reach() {
        let links = [
            Vector::<ChainBase>::from_polar(m(1.), d(0.)),
            Vector::<ChainBase>::from_polar(m(2.), d(0.)),
            Vector::<ChainBase>::from_polar(m(0.5), d(0.)),
        ];
        let reach: Vector<ChainBase> = links.into_iter().sum();
        assert_relative_eq!(reach.magnitude().get::<meter>(), 3.5);
    }

    #[test]
    fn rotated_quarter_turn() {
        let v = vector!(x = m(2.), y = m(0.); in PlatformFrame);
        assert_relative_eq!(v.rotated(d(90.)), vector!(x = m(0.), y = m(2.)));
    }

    #[rstest]
    #[case(d(10.))]
    #[case(d(-135.))]
    #[case(d(400.))]
    fn vectors_and_points_rotate_alike(#[case] angle: Angle) {
        let v = vector!(x = m(3.), y = m(2.); in ChainBase);
        let p = Coordinate::<ChainBase>::origin() + v;
        assert_relative_eq!(
            Coordinate::<ChainBase>::origin() + v.rotated(angle),
            crate::math::rotate(p, angle)
        );
        assert_relative_eq!(p.rotated(angle), crate::math::rotate(p, angle));
    }

    #[test]
    fn display() {
        let v = vector!(x = m(1.), y = m(-2.25); in ChainBase);
        insta::assert_snapshot!(v.to_string(), @"[1, -2.25]");
    }
}
