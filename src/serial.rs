//! Forward kinematics of planar serial link chains.
//!
//! A serial chain is a sequence of rigid links joined end to end by revolute joints. The first
//! joint sits at the origin of [`ChainBase`], and every joint angle is measured relative to the
//! previous link, so the absolute direction of link `i` is the sum of the first `i` joint angles.
//!
//! ```rust
//! use approx::assert_relative_eq;
//! use planar_kinematics::{coordinate, serial::LinkChain};
//! use uom::si::f64::{Angle, Length};
//! use uom::si::{angle::degree, length::meter};
//!
//! let m = Length::new::<meter>;
//! let d = Angle::new::<degree>;
//!
//! // a two-link arm reaching straight up and then folding back to the right
//! let chain = LinkChain::new([m(1.), m(1.)], [d(90.), d(-90.)]);
//! let pose = chain.forward_kinematics().expect("one angle per link, positive lengths");
//! assert_eq!(pose.len(), 2);
//! assert_relative_eq!(pose.end_effector(), coordinate!(x = m(1.), y = m(1.)));
//! ```

use crate::coordinate_systems::ChainBase;
use crate::coordinates::Coordinate;
use crate::engineering::{Orientation, Pose};
use crate::error::{KinematicsError, Result};
use crate::vectors::Vector;
use std::fmt;
use std::fmt::{Display, Formatter};
use uom::si::angle::radian;
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;
use uom::ConstZero;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The link lengths and joint angles of a planar serial chain.
///
/// Link `i` has length `link_lengths[i]` and is turned by `joint_angles[i]` relative to link
/// `i - 1` (or relative to the X axis of [`ChainBase`] for the first link).
///
/// Construction does not validate anything; [`forward_kinematics`] does.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkChain {
    link_lengths: Vec<Length>,
    joint_angles: Vec<Angle>,
}

impl LinkChain {
    #[must_use]
    pub fn new(
        link_lengths: impl IntoIterator<Item = Length>,
        joint_angles: impl IntoIterator<Item = Angle>,
    ) -> Self {
        Self {
            link_lengths: link_lengths.into_iter().collect(),
            joint_angles: joint_angles.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn link_lengths(&self) -> &[Length] {
        &self.link_lengths
    }

    #[must_use]
    pub fn joint_angles(&self) -> &[Angle] {
        &self.joint_angles
    }

    /// Returns the same links posed with a different set of joint angles.
    ///
    /// This is what a caller driving the chain interactively does on every update: the links are
    /// fixed, only the joints move.
    #[must_use]
    pub fn with_joint_angles(&self, joint_angles: impl IntoIterator<Item = Angle>) -> Self {
        Self {
            link_lengths: self.link_lengths.clone(),
            joint_angles: joint_angles.into_iter().collect(),
        }
    }

    /// See [`forward_kinematics`].
    pub fn forward_kinematics(&self) -> Result<ChainPose> {
        forward_kinematics(self)
    }
}

/// Computes the position of every joint of `chain`, base first, end-effector last.
///
/// For a chain of `n` links this yields `n + 1` points. The first is always the origin of
/// [`ChainBase`], and each following point is
///
/// ```text
/// Θ_i        = θ_1 + … + θ_i
/// position_i = position_{i-1} + L_i·(cos Θ_i, sin Θ_i)
/// ```
///
/// A chain without links is valid and yields just the base.
///
/// # Errors
///
/// - [`KinematicsError::DimensionMismatch`] if there isn't exactly one joint angle per link. This
///   is checked before anything else.
/// - [`KinematicsError::InvalidLinkLength`] for the first link whose length is not a positive,
///   finite number.
pub fn forward_kinematics(chain: &LinkChain) -> Result<ChainPose> {
    let LinkChain {
        link_lengths,
        joint_angles,
    } = chain;

    if link_lengths.len() != joint_angles.len() {
        tracing::debug!(
            link_lengths = link_lengths.len(),
            joint_angles = joint_angles.len(),
            "rejecting chain with mismatched dimensions"
        );
        return Err(KinematicsError::DimensionMismatch {
            link_lengths: link_lengths.len(),
            joint_angles: joint_angles.len(),
        });
    }
    if let Some((index, &length)) = link_lengths
        .iter()
        .enumerate()
        .find(|(_, length)| !is_valid_link_length(**length))
    {
        tracing::debug!(
            index,
            length_m = length.get::<meter>(),
            "rejecting chain with invalid link length"
        );
        return Err(KinematicsError::InvalidLinkLength { index, length });
    }

    let mut joints = Vec::with_capacity(link_lengths.len() + 1);
    let mut position = Coordinate::<ChainBase>::origin();
    let mut heading = Angle::ZERO;
    joints.push(position);
    for (&length, &angle) in link_lengths.iter().zip(joint_angles) {
        heading += angle;
        position += Vector::from_polar(length, heading);
        joints.push(position);
    }

    tracing::trace!(
        links = link_lengths.len(),
        heading_rad = heading.get::<radian>(),
        end_effector = %position,
        "solved forward kinematics"
    );

    Ok(ChainPose {
        joints,
        end_effector_heading: heading,
    })
}

fn is_valid_link_length(length: Length) -> bool {
    let meters = length.get::<meter>();
    meters > 0. && meters.is_finite()
}

/// The joint positions of a posed serial chain, in [`ChainBase`].
///
/// Always holds at least the base joint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ChainPose {
    joints: Vec<Coordinate<ChainBase>>,
    end_effector_heading: Angle,
}

impl ChainPose {
    /// All joint positions, base first and end-effector last.
    #[must_use]
    pub fn joints(&self) -> &[Coordinate<ChainBase>] {
        &self.joints
    }

    /// The position of the base joint, which is always the origin.
    #[must_use]
    pub fn base(&self) -> Coordinate<ChainBase> {
        self.joints[0]
    }

    /// The position of the tip of the last link.
    ///
    /// For a chain without links this is the base.
    #[must_use]
    pub fn end_effector(&self) -> Coordinate<ChainBase> {
        self.joints[self.joints.len() - 1]
    }

    /// The position and heading of the tip of the last link.
    ///
    /// The heading is the direction the last link points in, ie, the sum of all joint angles.
    #[must_use]
    pub fn end_effector_pose(&self) -> Pose<ChainBase> {
        Pose::new(
            self.end_effector(),
            Orientation::from_heading(self.end_effector_heading),
        )
    }

    /// The start and end point of each link, in chain order.
    pub fn links(
        &self,
    ) -> impl ExactSizeIterator<Item = (Coordinate<ChainBase>, Coordinate<ChainBase>)> + '_ {
        self.joints.windows(2).map(|link| (link[0], link[1]))
    }

    /// The number of links in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len() - 1
    }

    /// Whether the chain has no links (and thus only a base joint).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Coordinate<ChainBase>> {
        self.joints
    }
}

impl IntoIterator for ChainPose {
    type Item = Coordinate<ChainBase>;
    type IntoIter = std::vec::IntoIter<Coordinate<ChainBase>>;

    fn into_iter(self) -> Self::IntoIter {
        self.joints.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChainPose {
    type Item = &'a Coordinate<ChainBase>;
    type IntoIter = std::slice::Iter<'a, Coordinate<ChainBase>>;

    fn into_iter(self) -> Self::IntoIter {
        self.joints.iter()
    }
}

impl Display for ChainPose {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, joint) in self.joints.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match f.precision() {
                Some(p) => write!(f, "{joint:.p$}")?,
                None => write!(f, "{joint}")?,
            }
        }
        Ok(())
    }
}
