#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::{Coordinate, Vector};

/// Defines how a planar coordinate system behaves.
///
/// For example, a coordinate system that implements `CoordinateSystem<Convention = RightHandedXyLike>`
/// gets `x` and `y` accessors on types like [`Coordinate`] and [`Vector`].
///
/// While you _can_ implement this trait directly, prefer using [`system!`](crate::system).
pub trait CoordinateSystem {
    /// What standard coordinate system convention this coordinate system conforms to.
    type Convention;
}

/// Indicates that the implementing coordinate system is exactly equivalent to
/// `OtherCoordinateSystem`.
///
/// More technically, `impl EquivalentTo<B> for A` should only exist if the transform from `A` to
/// `B` is the identity function.
///
/// This is useful when two crates (or two parts of one program) have separately declared a frame
/// for the same physical thing, for instance the base plate of one particular arm, and values need
/// to move between them.
///
/// When an `impl EquivalentTo<B> for A` exists, a number of the types in this library provide a
/// `cast` method that allows directly changing the coordinate system type parameter without any
/// other transformation argument.
///
/// # Safety
///
/// This trait is unsafe to implement because it allows moving between types annotated with two
/// different coordinate systems without performing any transform on them. If a transform actually
/// _is_ needed (and thus this implementation is incorrect), this would violate type safety.
pub unsafe trait EquivalentTo<OtherCoordinateSystem> {}

/// All coordinate systems are equivalent to themselves.
unsafe impl<System> EquivalentTo<System> for System {}

/// Marks a planar coordinate system with a right-handed X and Y axis.
///
/// - Positive X points "right" (along the direction an unrotated link extends).
/// - Positive Y points "up", a quarter turn counterclockwise from positive X.
///
/// Positive angles therefore rotate counterclockwise, from positive X towards positive Y.
///
/// There is no intrinsic relationship between two XY-like coordinate systems. While two of them
/// _may_ share an origin and axes, that shared meaning is not communicated through this type.
pub struct RightHandedXyLike;

/// Defines a new planar coordinate system.
///
/// Note that the coordinate system is a zero-sized type used only to mark things like
/// [`Coordinate`] and [`Vector`] with what coordinate system they are in. A coordinate system does
/// not know its relation to any other coordinate system.
///
/// ```rust
/// # use planar_kinematics::system;
/// system!(pub struct GripperFrame using right-handed XY);
/// ```
///
/// You can include doc comments and attributes directly in the invocation of `system!` to add docs
/// and derived traits to your type:
///
/// ```rust
/// planar_kinematics::system! {
///     /// The frame of the second link of the elbow.
///     #[derive(Hash)]
///     pub(crate) struct ElbowFrame using right-handed XY
/// }
/// ```
#[macro_export]
macro_rules! system {
    ($(#[$attr:meta])* $vis:vis struct $name:ident using right-handed XY) => {
        $crate::system!($(#[$attr])* $vis struct $name as RightHandedXyLike);
    };
    {
        $(#[$attr:meta])*
        $vis:vis struct $name:ident
        as $convention:ident
    } => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        $vis struct $name;

        impl $crate::CoordinateSystem for $name {
            type Convention = $crate::systems::$convention;
        }
    };
}

system! {
    /// The frame at the root of a serial link chain.
    ///
    /// The origin is the first (base) joint; an unrotated first link extends along positive X.
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct ChainBase using right-handed XY
}

system! {
    /// The fixed world frame of a parallel mechanism.
    ///
    /// Base joints of the legs are expressed in this frame, and so is every point a solve
    /// returns.
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct MechanismBase using right-handed XY
}

system! {
    /// The body frame of the moving platform of a parallel mechanism.
    ///
    /// The origin is the centre of the platform and positive X runs along the platform towards
    /// the second attachment point when the platform is unrotated.
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct PlatformFrame using right-handed XY
}

#[cfg(test)]
mod tests {
    use super::{ChainBase, EquivalentTo, MechanismBase};
    use crate::Coordinate;
    use uom::si::f64::Length;
    use uom::si::length::meter;

    system!(struct SensorFrame using right-handed XY);

    // SAFETY: test-only; the two frames are declared to coincide.
    unsafe impl EquivalentTo<ChainBase> for SensorFrame {}

    #[test]
    fn cast_between_equivalent_systems_keeps_components() {
        let p = Coordinate::<SensorFrame>::from_cartesian(
            Length::new::<meter>(1.5),
            Length::new::<meter>(-2.),
        );
        let q: Coordinate<ChainBase> = p.cast();
        assert_eq!(q.x(), p.x());
        assert_eq!(q.y(), p.y());
    }

    #[test]
    fn systems_are_zero_sized() {
        assert_eq!(std::mem::size_of::<MechanismBase>(), 0);
        assert_eq!(std::mem::size_of::<SensorFrame>(), 0);
    }
}
