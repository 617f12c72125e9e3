//! Inverse kinematics of a planar 2-RPS parallel platform.
//!
//! The mechanism has two legs. Each leg is anchored at a fixed base joint in [`MechanismBase`] and
//! attached to a moving platform at a point that is fixed in the platform's own body frame,
//! [`PlatformFrame`]. Given the platform's orientation, the platform is placed at its nominal
//! centre (the midpoint of the base joints, raised by a fixed height), turned by that orientation,
//! and the length each leg must extend to is read off as the distance from its base joint to its
//! platform joint.
//!
//! The valid range of orientations is part of the geometry. It is enforced in exactly one place,
//! [`PlatformGeometry::orientation`], which hands out a [`PlatformOrientation`] borrowing the
//! geometry that checked it. Solving that orientation with [`PlatformOrientation::solve`] is
//! infallible, and always uses that same geometry. [`PlatformGeometry::solve`] is the two
//! combined.
//!
//! ```rust
//! use approx::assert_relative_eq;
//! use planar_kinematics::parallel::PlatformGeometry;
//! use uom::si::f64::Angle;
//! use uom::si::{angle::degree, length::meter};
//!
//! let geometry = PlatformGeometry::default();
//! let solution = geometry.solve(Angle::new::<degree>(0.)).expect("0° is in [-90°, 90°]");
//! let legs = solution.leg_lengths();
//! assert_relative_eq!(legs.s1().get::<meter>(), 5f64.sqrt());
//! assert_relative_eq!(legs.s2().get::<meter>(), 5f64.sqrt());
//!
//! assert!(geometry.solve(Angle::new::<degree>(120.)).is_err());
//! ```

use crate::coordinate_systems::{MechanismBase, PlatformFrame};
use crate::coordinates::Coordinate;
use crate::engineering::{Orientation, Pose};
use crate::error::{KinematicsError, Result};
use crate::util::display_degrees;
use crate::vectors::Vector;
use std::fmt;
use std::fmt::{Display, Formatter};
use uom::si::angle::{degree, radian};
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;
use uom::ConstZero;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A closed interval of angles, `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AngleRange {
    min: Angle,
    max: Angle,
}

impl AngleRange {
    /// Constructs the interval `[min, max]`.
    ///
    /// Returns `None` if either end is not finite or if `min > max`.
    #[must_use]
    pub fn new(min: impl Into<Angle>, max: impl Into<Angle>) -> Option<Self> {
        let (min, max) = (min.into(), max.into());
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return None;
        }
        Some(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> Angle {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Angle {
        self.max
    }

    /// Whether `angle` lies within the interval, ends included.
    ///
    /// NaN is never contained.
    #[must_use]
    pub fn contains(&self, angle: Angle) -> bool {
        self.min <= angle && angle <= self.max
    }
}

impl Default for AngleRange {
    /// `[-90°, 90°]`
    fn default() -> Self {
        Self {
            min: Angle::new::<degree>(-90.),
            max: Angle::new::<degree>(90.),
        }
    }
}

impl Display for AngleRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}°, {}°]",
            display_degrees(self.min),
            display_degrees(self.max)
        )
    }
}

/// The fixed geometry of a 2-RPS platform.
///
/// Construct one with [`PlatformGeometry::builder`], or use [`PlatformGeometry::default`] for the
/// reference mechanism: base joints at `(1, 1)` and `(5, 1)`, platform centre raised by 2m,
/// attachments 1m either side of the centre, and an extended platform reaching 1m further out,
/// turning within `[-90°, 90°]`.
///
/// A geometry is plain configuration. Solving never modifies it, so one geometry can be solved
/// for any number of orientations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PlatformGeometry {
    base_joints: [Coordinate<MechanismBase>; 2],
    attachments: [Coordinate<PlatformFrame>; 2],
    extended_attachments: [Coordinate<PlatformFrame>; 2],
    height: Length,
    range: AngleRange,
}

impl Default for PlatformGeometry {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl PlatformGeometry {
    /// Starts building a geometry from the reference mechanism (see [`PlatformGeometry::default`]).
    #[must_use]
    pub fn builder() -> PlatformGeometryBuilder {
        PlatformGeometryBuilder::default()
    }

    /// The base joints of the first and second leg.
    #[must_use]
    pub fn base_joints(&self) -> [Coordinate<MechanismBase>; 2] {
        self.base_joints
    }

    /// Where the first and second leg attach to the platform, in the platform's body frame.
    #[must_use]
    pub fn attachments(&self) -> [Coordinate<PlatformFrame>; 2] {
        self.attachments
    }

    /// The ends of the extended platform, in the platform's body frame.
    #[must_use]
    pub fn extended_attachments(&self) -> [Coordinate<PlatformFrame>; 2] {
        self.extended_attachments
    }

    /// How far the platform centre sits above the midpoint of the base joints.
    #[must_use]
    pub fn height(&self) -> Length {
        self.height
    }

    #[must_use]
    pub fn range(&self) -> AngleRange {
        self.range
    }

    /// The position of the platform centre, which does not depend on the orientation.
    #[must_use]
    pub fn platform_center(&self) -> Coordinate<MechanismBase> {
        let [b1, b2] = self.base_joints;
        b1.midpoint(&b2) + Vector::from_cartesian(Length::ZERO, self.height)
    }

    /// Checks `orientation` against the valid range of this geometry.
    ///
    /// This is the only place the range is enforced; out-of-range angles are reported, never
    /// clamped.
    ///
    /// # Errors
    ///
    /// [`KinematicsError::OrientationOutOfRange`] if `orientation` is outside
    /// [`PlatformGeometry::range`] (or is NaN).
    pub fn orientation(&self, orientation: impl Into<Angle>) -> Result<PlatformOrientation<'_>> {
        let orientation = orientation.into();
        if !self.range.contains(orientation) {
            tracing::debug!(
                orientation_rad = orientation.get::<radian>(),
                range = %self.range,
                "rejecting out-of-range platform orientation"
            );
            return Err(KinematicsError::OrientationOutOfRange {
                orientation,
                range: self.range,
            });
        }
        Ok(PlatformOrientation {
            angle: orientation,
            geometry: self,
        })
    }

    /// Places the platform at `orientation` and computes the leg lengths and joint positions.
    ///
    /// # Errors
    ///
    /// See [`PlatformGeometry::orientation`].
    pub fn solve(&self, orientation: impl Into<Angle>) -> Result<PlatformSolution> {
        Ok(self.orientation(orientation)?.solve())
    }

    // only reachable through a PlatformOrientation checked against `self`
    fn place(&self, orientation: Angle) -> PlatformSolution {
        let pose = Pose::new(
            self.platform_center(),
            Orientation::from_heading(orientation),
        );
        // SAFETY: PlatformFrame is, by definition, the frame whose origin is the platform centre
        // and whose X axis runs along the platform, which is exactly what this pose describes.
        let base_to_platform = unsafe { pose.map_as_zero_in::<PlatformFrame>() };

        let joints = self
            .attachments
            .map(|attachment| base_to_platform.inverse_transform(attachment));
        let extended_joints = self
            .extended_attachments
            .map(|attachment| base_to_platform.inverse_transform(attachment));

        let [b1, b2] = self.base_joints;
        let [j1, j2] = joints;
        let leg_lengths = LegLengths {
            s1: b1.distance_from(&j1),
            s2: b2.distance_from(&j2),
        };

        tracing::trace!(
            orientation_rad = orientation.get::<radian>(),
            s1_m = leg_lengths.s1.get::<meter>(),
            s2_m = leg_lengths.s2.get::<meter>(),
            "solved platform"
        );

        PlatformSolution {
            base_joints: self.base_joints,
            joints,
            extended_joints,
            pose,
            leg_lengths,
            orientation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Extension {
    Explicit([Coordinate<PlatformFrame>; 2]),
    Outward(Length),
}

/// Builds a [`PlatformGeometry`]; see [`PlatformGeometry::builder`].
///
/// Every setter is optional and starts from the reference mechanism.
#[derive(Debug, Clone)]
#[must_use]
pub struct PlatformGeometryBuilder {
    base_joints: [Coordinate<MechanismBase>; 2],
    attachments: [Coordinate<PlatformFrame>; 2],
    extension: Extension,
    height: Length,
    range: AngleRange,
}

impl Default for PlatformGeometryBuilder {
    fn default() -> Self {
        let m = Length::new::<meter>;
        Self {
            base_joints: [
                Coordinate::from_cartesian(m(1.), m(1.)),
                Coordinate::from_cartesian(m(5.), m(1.)),
            ],
            attachments: [
                Coordinate::from_cartesian(m(-1.), m(0.)),
                Coordinate::from_cartesian(m(1.), m(0.)),
            ],
            extension: Extension::Outward(m(1.)),
            height: m(2.),
            range: AngleRange::default(),
        }
    }
}

impl PlatformGeometryBuilder {
    pub fn base_joints(
        mut self,
        first: Coordinate<MechanismBase>,
        second: Coordinate<MechanismBase>,
    ) -> Self {
        self.base_joints = [first, second];
        self
    }

    pub fn attachments(
        mut self,
        first: Coordinate<PlatformFrame>,
        second: Coordinate<PlatformFrame>,
    ) -> Self {
        self.attachments = [first, second];
        self
    }

    /// Sets the ends of the extended platform explicitly.
    ///
    /// Overrides any earlier [`extension`](Self::extension).
    pub fn extended_attachments(
        mut self,
        first: Coordinate<PlatformFrame>,
        second: Coordinate<PlatformFrame>,
    ) -> Self {
        self.extension = Extension::Explicit([first, second]);
        self
    }

    /// Places the ends of the extended platform `length` further out than each attachment, along
    /// the direction from the platform centre to that attachment.
    ///
    /// An attachment at the platform centre has no outward direction and is not extended.
    /// Overrides any earlier [`extended_attachments`](Self::extended_attachments).
    pub fn extension(mut self, length: impl Into<Length>) -> Self {
        self.extension = Extension::Outward(length.into());
        self
    }

    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }

    pub fn range(mut self, range: AngleRange) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn build(self) -> PlatformGeometry {
        let extended_attachments = match self.extension {
            Extension::Explicit(ends) => ends,
            Extension::Outward(length) => self.attachments.map(|attachment| {
                match Vector::from(attachment).azimuth() {
                    Some(outward) => attachment + Vector::from_polar(length, outward),
                    None => attachment,
                }
            }),
        };
        PlatformGeometry {
            base_joints: self.base_joints,
            attachments: self.attachments,
            extended_attachments,
            height: self.height,
            range: self.range,
        }
    }
}

/// A platform orientation that lies within the valid range of the geometry that produced it.
///
/// The only way to get one is [`PlatformGeometry::orientation`], and it stays tied to that
/// geometry: [`PlatformOrientation::solve`] places the very platform whose range admitted it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformOrientation<'g> {
    angle: Angle,
    geometry: &'g PlatformGeometry,
}

impl<'g> PlatformOrientation<'g> {
    #[must_use]
    pub fn angle(&self) -> Angle {
        self.angle
    }

    /// The geometry whose range this orientation was checked against.
    #[must_use]
    pub fn geometry(&self) -> &'g PlatformGeometry {
        self.geometry
    }

    /// Places the platform at this orientation and computes the leg lengths and joint positions.
    #[must_use]
    pub fn solve(&self) -> PlatformSolution {
        self.geometry.place(self.angle)
    }
}

impl Display for PlatformOrientation<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", display_degrees(self.angle))
    }
}

/// How far each leg must extend, from its base joint to where it attaches to the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LegLengths {
    s1: Length,
    s2: Length,
}

impl LegLengths {
    #[must_use]
    pub fn s1(&self) -> Length {
        self.s1
    }

    #[must_use]
    pub fn s2(&self) -> Length {
        self.s2
    }

    #[must_use]
    pub fn as_array(&self) -> [Length; 2] {
        [self.s1, self.s2]
    }
}

impl Display for LegLengths {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (s1, s2) = (self.s1.get::<meter>(), self.s2.get::<meter>());
        match f.precision() {
            Some(p) => write!(f, "s1 = {s1:.p$}, s2 = {s2:.p$}"),
            None => write!(f, "s1 = {s1}, s2 = {s2}"),
        }
    }
}

/// The platform placed at one orientation, in [`MechanismBase`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PlatformSolution {
    base_joints: [Coordinate<MechanismBase>; 2],
    joints: [Coordinate<MechanismBase>; 2],
    extended_joints: [Coordinate<MechanismBase>; 2],
    pose: Pose<MechanismBase>,
    leg_lengths: LegLengths,
    orientation: Angle,
}

impl PlatformSolution {
    #[must_use]
    pub fn leg_lengths(&self) -> LegLengths {
        self.leg_lengths
    }

    /// The points a renderer needs, always in the order
    /// `[B1, J1, J2, B2, J1_ext, J2_ext]`: first base joint, first platform joint, second platform
    /// joint, second base joint, then the two ends of the extended platform.
    #[must_use]
    pub fn key_points(&self) -> [Coordinate<MechanismBase>; 6] {
        let [b1, b2] = self.base_joints;
        let [j1, j2] = self.joints;
        let [e1, e2] = self.extended_joints;
        [b1, j1, j2, b2, e1, e2]
    }

    #[must_use]
    pub fn platform_center(&self) -> Coordinate<MechanismBase> {
        self.pose.position()
    }

    #[must_use]
    pub fn platform_pose(&self) -> Pose<MechanismBase> {
        self.pose
    }

    /// Each leg as (base joint, platform joint).
    #[must_use]
    pub fn legs(&self) -> [(Coordinate<MechanismBase>, Coordinate<MechanismBase>); 2] {
        let [b1, b2] = self.base_joints;
        let [j1, j2] = self.joints;
        [(b1, j1), (b2, j2)]
    }

    /// The platform as the segment between its two joints.
    #[must_use]
    pub fn platform(&self) -> (Coordinate<MechanismBase>, Coordinate<MechanismBase>) {
        let [j1, j2] = self.joints;
        (j1, j2)
    }

    #[must_use]
    pub fn extended_platform(&self) -> (Coordinate<MechanismBase>, Coordinate<MechanismBase>) {
        let [e1, e2] = self.extended_joints;
        (e1, e2)
    }

    #[must_use]
    pub fn orientation(&self) -> Angle {
        self.orientation
    }
}

impl Display for PlatformSolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        const LABELS: [&str; 6] = ["B1", "J1", "J2", "B2", "J1_ext", "J2_ext"];
        match f.precision() {
            Some(p) => write!(f, "{:.p$}", self.leg_lengths)?,
            None => write!(f, "{}", self.leg_lengths)?,
        }
        for (label, point) in LABELS.into_iter().zip(self.key_points()) {
            match f.precision() {
                Some(p) => write!(f, "\n{label} = {point:.p$}")?,
                None => write!(f, "\n{label} = {point}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AngleRange, PlatformGeometry};
    use crate::coordinate;
    use crate::coordinate_systems::{MechanismBase, PlatformFrame};
    use crate::coordinates::Coordinate;
    use crate::error::KinematicsError;
    use crate::math::rotate;
    use crate::vectors::Vector;
    use approx::assert_relative_eq;
    use quickcheck::{quickcheck, TestResult};
    use rstest::rstest;
    use uom::si::f64::{Angle, Length};
    use uom::si::{angle::degree, length::meter};

    fn m(meters: f64) -> Length {
        Length::new::<meter>(meters)
    }
    fn d(degrees: f64) -> Angle {
        Angle::new::<degree>(degrees)
    }

    #[test]
    fn level_platform_is_symmetric() {
        let solution = PlatformGeometry::default().solve(d(0.)).unwrap();

        assert_eq!(
            solution.platform_center(),
            coordinate!(x = m(3.), y = m(3.); in MechanismBase)
        );
        let (j1, j2) = solution.platform();
        assert_relative_eq!(j1, coordinate!(x = m(2.), y = m(3.)));
        assert_relative_eq!(j2, coordinate!(x = m(4.), y = m(3.)));

        let legs = solution.leg_lengths();
        assert_relative_eq!(legs.s1().get::<meter>(), 5f64.sqrt());
        assert_relative_eq!(legs.s2().get::<meter>(), 5f64.sqrt());
    }

    #[test]
    fn key_points_are_in_render_order() {
        let solution = PlatformGeometry::default().solve(d(0.)).unwrap();
        let expected = [(1., 1.), (2., 3.), (4., 3.), (5., 1.), (1., 3.), (5., 3.)];
        for (point, (x, y)) in solution.key_points().into_iter().zip(expected) {
            assert_relative_eq!(point, coordinate!(x = m(x), y = m(y)));
        }
        assert_eq!(solution.legs()[0].0, solution.key_points()[0]);
        assert_eq!(solution.legs()[1].0, solution.key_points()[3]);
        assert_eq!(solution.extended_platform().0, solution.key_points()[4]);
    }

    #[test]
    fn tilted_platform_rotates_offsets_about_its_center() {
        let geometry = PlatformGeometry::default();
        let solution = geometry.solve(d(30.)).unwrap();
        let center = geometry.platform_center();

        let expected_j1 = center
            + Vector::from(rotate(
                coordinate!(x = m(-1.), y = m(0.); in MechanismBase),
                d(30.),
            ));
        assert_relative_eq!(solution.platform().0, expected_j1);
        assert_relative_eq!(
            solution.platform().0,
            coordinate!(x = m(3. - 3f64.sqrt() / 2.), y = m(2.5))
        );
        assert_relative_eq!(
            solution.platform().1,
            coordinate!(x = m(3. + 3f64.sqrt() / 2.), y = m(3.5))
        );

        // tilting counterclockwise lowers the first joint and raises the second
        let legs = solution.leg_lengths();
        assert!(legs.s1() < legs.s2());
        assert_relative_eq!(
            legs.s1().get::<meter>(),
            solution.legs()[0].0.distance_from(&solution.legs()[0].1).get::<meter>()
        );
    }

    #[rstest]
    #[case(d(120.))]
    #[case(d(-90.000_001))]
    #[case(d(90.1))]
    #[case(d(f64::NAN))]
    fn out_of_range_orientations_are_rejected(#[case] orientation: Angle) {
        let geometry = PlatformGeometry::default();
        match geometry.solve(orientation) {
            Err(KinematicsError::OrientationOutOfRange {
                orientation: rejected,
                range,
            }) => {
                assert_eq!(range, AngleRange::default());
                assert_eq!(rejected.is_nan(), orientation.is_nan());
            }
            other => panic!("expected OrientationOutOfRange, got {other:?}"),
        }
    }

    #[rstest]
    #[case(d(-90.))]
    #[case(d(90.))]
    #[case(d(0.))]
    fn range_is_closed(#[case] orientation: Angle) {
        assert!(PlatformGeometry::default().solve(orientation).is_ok());
    }

    #[test]
    fn solve_is_check_then_solve() {
        let geometry = PlatformGeometry::default();
        let orientation = geometry.orientation(d(42.)).unwrap();
        assert_eq!(orientation.angle(), d(42.));
        assert_eq!(geometry.solve(d(42.)).unwrap(), orientation.solve());
        assert_eq!(orientation.solve().orientation(), d(42.));
    }

    #[test]
    fn checked_orientation_solves_only_its_own_geometry() {
        let wide = PlatformGeometry::default();
        let narrow = PlatformGeometry::builder()
            .base_joints(
                coordinate!(x = m(0.), y = m(0.)),
                coordinate!(x = m(6.), y = m(0.)),
            )
            .range(AngleRange::new(d(-10.), d(10.)).unwrap())
            .build();

        let orientation = wide.orientation(d(80.)).unwrap();
        assert!(std::ptr::eq(orientation.geometry(), &wide));
        assert_eq!(orientation.solve(), wide.solve(d(80.)).unwrap());
        assert_eq!(
            orientation.solve().key_points()[0],
            coordinate!(x = m(1.), y = m(1.); in MechanismBase)
        );

        // the narrow platform never gets placed at 80°
        assert!(matches!(
            narrow.solve(d(80.)),
            Err(KinematicsError::OrientationOutOfRange { .. })
        ));
        assert!(narrow.orientation(d(80.)).is_err());
    }

    #[test]
    fn custom_range_is_honored() {
        let geometry = PlatformGeometry::builder()
            .range(AngleRange::new(d(-10.), d(10.)).unwrap())
            .build();
        assert!(geometry.solve(d(10.)).is_ok());
        assert!(geometry.solve(d(30.)).is_err());
    }

    #[rstest]
    #[case(d(10.), d(-10.))]
    #[case(d(f64::NAN), d(10.))]
    #[case(d(0.), d(f64::INFINITY))]
    fn invalid_ranges_are_refused(#[case] min: Angle, #[case] max: Angle) {
        assert_eq!(AngleRange::new(min, max), None);
    }

    #[test]
    fn extension_reaches_outward_from_each_attachment() {
        let geometry = PlatformGeometry::builder()
            .attachments(
                coordinate!(x = m(-1.), y = m(0.)),
                coordinate!(x = m(0.), y = m(0.)),
            )
            .extension(m(0.5))
            .build();
        let [e1, e2] = geometry.extended_attachments();
        assert_relative_eq!(e1, coordinate!(x = m(-1.5), y = m(0.); in PlatformFrame));
        // an attachment at the centre has nowhere to extend to
        assert_eq!(e2, Coordinate::<PlatformFrame>::origin());

        let explicit = PlatformGeometry::builder()
            .extension(m(3.))
            .extended_attachments(
                coordinate!(x = m(-2.), y = m(0.5)),
                coordinate!(x = m(2.), y = m(0.5)),
            )
            .build();
        assert_eq!(
            explicit.extended_attachments()[1],
            coordinate!(x = m(2.), y = m(0.5); in PlatformFrame)
        );
    }

    #[test]
    fn default_geometry_is_the_reference_mechanism() {
        let geometry = PlatformGeometry::default();
        assert_eq!(
            geometry.base_joints(),
            [
                coordinate!(x = m(1.), y = m(1.); in MechanismBase),
                coordinate!(x = m(5.), y = m(1.)),
            ]
        );
        assert_eq!(geometry.height(), m(2.));
        assert_relative_eq!(
            geometry.extended_attachments()[0],
            coordinate!(x = m(-2.), y = m(0.); in PlatformFrame)
        );
        assert_eq!(geometry.range(), AngleRange::default());
    }

    quickcheck! {
        fn mirror_symmetric_platforms_have_equal_legs(
            half_base: u16,
            half_platform: u16,
            height: u16,
            base_y: i16
        ) -> TestResult {
            let half_base = m(f64::from(half_base % 1000 + 1) / 100.);
            let half_platform = m(f64::from(half_platform % 1000 + 1) / 100.);
            let height = m(f64::from(height % 1000) / 100.);
            let base_y = m(f64::from(base_y) / 100.);
            let geometry = PlatformGeometry::builder()
                .base_joints(
                    Coordinate::from_cartesian(-half_base, base_y),
                    Coordinate::from_cartesian(half_base, base_y),
                )
                .attachments(
                    Coordinate::from_cartesian(-half_platform, m(0.)),
                    Coordinate::from_cartesian(half_platform, m(0.)),
                )
                .height(height)
                .build();
            let legs = geometry.solve(d(0.)).unwrap().leg_lengths();
            TestResult::from_bool(approx::relative_eq!(
                legs.s1().get::<meter>(),
                legs.s2().get::<meter>(),
                epsilon = 1e-12
            ))
        }
    }

    quickcheck! {
        fn platform_keeps_its_shape(tenth_degrees: i16) -> TestResult {
            let orientation = d(f64::from(tenth_degrees % 900) / 10.);
            let solution = PlatformGeometry::default().solve(orientation).unwrap();
            let (j1, j2) = solution.platform();
            let (e1, e2) = solution.extended_platform();
            TestResult::from_bool(
                approx::abs_diff_eq!(j1.distance_from(&j2).get::<meter>(), 2., epsilon = 1e-9)
                    && approx::abs_diff_eq!(
                        e1.distance_from(&e2).get::<meter>(),
                        4.,
                        epsilon = 1e-9
                    )
                    && approx::abs_diff_eq!(
                        j1.midpoint(&j2),
                        solution.platform_center(),
                        epsilon = m(1e-9)
                    ),
            )
        }
    }

    #[test]
    fn display() {
        let solution = PlatformGeometry::default().solve(d(0.)).unwrap();
        insta::assert_snapshot!(format!("{:.3}", solution.leg_lengths()), @"s1 = 2.236, s2 = 2.236");
        insta::assert_snapshot!(format!("{solution:.3}"), @r"
        s1 = 2.236, s2 = 2.236
        B1 = (1.000, 1.000)
        J1 = (2.000, 3.000)
        J2 = (4.000, 3.000)
        B2 = (5.000, 1.000)
        J1_ext = (1.000, 3.000)
        J2_ext = (5.000, 3.000)
        ");
        insta::assert_snapshot!(AngleRange::default().to_string(), @"[-90°, 90°]");
    }
}
