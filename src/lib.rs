//! This library provides hard-to-misuse kinematics for small planar mechanisms: serial link chains
//! (forward kinematics) and two-legged 2-RPS parallel platforms (inverse kinematics).
//!
//! First and foremost, the library provides [`Coordinate`] and [`Vector`] types for representing
//! points and displacements in the plane. They are generic over a [`CoordinateSystem`] so that a
//! point in one frame cannot (easily) be used as though it were in a different one. The
//! [`system!`] macro allows you to define additional frames, and the crate comes with the three it
//! needs itself: [`ChainBase`](systems::ChainBase) at the root of a serial chain,
//! [`MechanismBase`](systems::MechanismBase) as the fixed frame of a parallel mechanism, and
//! [`PlatformFrame`](systems::PlatformFrame) riding along on its moving platform.
//!
//! Lengths and angles are [`uom`] quantities throughout, so degrees and radians can't be mixed up
//! by accident; pick the unit when you construct the quantity and the library takes it from there.
//!
//! The mechanisms live in [`serial`] and [`parallel`]. They are built on the rotations and rigid
//! body transforms in [`math`], and on the poses in [`engineering`], which you can also use
//! directly for your own frames. Parsing user input (with an explicit unit) is in [`input`], and
//! describing mechanisms in configuration files is in `config`.
//!
//! # Examples
//!
//! A three-link arm, posed by its joint angles:
//!
//! ```
//! use approx::assert_relative_eq;
//! use planar_kinematics::serial::{forward_kinematics, LinkChain};
//! use uom::si::f64::{Angle, Length};
//! use uom::si::{angle::degree, length::meter};
//!
//! let arm = LinkChain::new(
//!     [Length::new::<meter>(1.); 3],
//!     [
//!         Angle::new::<degree>(30.),
//!         Angle::new::<degree>(45.),
//!         Angle::new::<degree>(-30.),
//!     ],
//! );
//! let pose = forward_kinematics(&arm).expect("one angle per link and positive lengths");
//!
//! // base, two elbows, and the tip of the arm
//! assert_eq!(pose.joints().len(), 4);
//! assert_eq!(pose.base(), planar_kinematics::Coordinate::origin());
//! assert_relative_eq!(
//!     pose.end_effector().x().get::<meter>(),
//!     30f64.to_radians().cos() + 75f64.to_radians().cos() + 45f64.to_radians().cos(),
//!     epsilon = 1e-9,
//! );
//! ```
//!
//! And the 2-RPS platform, solved for the leg lengths that hold it at 30°:
//!
//! ```
//! use planar_kinematics::parallel::PlatformGeometry;
//! use uom::si::f64::Angle;
//! use uom::si::{angle::degree, length::meter};
//!
//! let platform = PlatformGeometry::default();
//! let solution = platform
//!     .solve(Angle::new::<degree>(30.))
//!     .expect("30° is within [-90°, 90°]");
//!
//! let legs = solution.leg_lengths();
//! println!("s1 = {:.3}, s2 = {:.3}", legs.s1().get::<meter>(), legs.s2().get::<meter>());
//!
//! // orientations outside the platform's range are reported, never clamped
//! assert!(platform.solve(Angle::new::<degree>(120.)).is_err());
//! ```

#[macro_use]
mod coordinate_systems;

mod coordinates;
mod util;
mod vectors;

pub mod engineering;
pub mod error;
pub mod input;
pub mod math;
pub mod parallel;
pub mod serial;

#[cfg(feature = "serde")]
pub mod config;

pub(crate) type Point2 = nalgebra::Point2<f64>;
pub(crate) type Vector2 = nalgebra::Vector2<f64>;
pub(crate) type UnitComplex = nalgebra::UnitComplex<f64>;
pub(crate) type Isometry2 = nalgebra::Isometry2<f64>;

// re-structure our imports slightly to better match user expectation
/// Well-known coordinate systems and conventions.
pub mod systems {
    pub use super::coordinate_systems::{
        ChainBase, EquivalentTo, MechanismBase, PlatformFrame, RightHandedXyLike,
    };
}
pub use coordinate_systems::CoordinateSystem;
pub use coordinates::Coordinate;
pub use error::{KinematicsError, Result};
pub use vectors::Vector;
