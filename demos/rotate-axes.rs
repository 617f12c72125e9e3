//! Rotates the point (3, 2) by 10° about the origin, and shows the same point as seen from a set
//! of axes that are themselves turned by 10°.

use planar_kinematics::math::{rotate, Rotation};
use planar_kinematics::{coordinate, system};
use uom::si::f64::{Angle, Length};
use uom::si::{angle::degree, length::meter};

system!(struct Paper using right-handed XY);
system!(struct TurnedAxes using right-handed XY);

fn main() {
    let theta = Angle::new::<degree>(10.);
    let point = coordinate! {
        x = Length::new::<meter>(3.),
        y = Length::new::<meter>(2.);
        in Paper
    };

    // moving the point: it stays in `Paper`
    let moved = rotate(point, theta);
    println!("{point:.2} rotated by 10° is {moved:.2}");

    // moving the axes instead: the point stays put, its coordinates change
    // SAFETY: `TurnedAxes` is defined above as `Paper` turned by `theta` about the shared origin.
    let paper_to_turned = unsafe { Rotation::<Paper, TurnedAxes>::from_angle(theta) };
    let seen_from_turned = point * paper_to_turned;
    println!("in the turned axes, {point:.2} is at {seen_from_turned:.2}");

    // the turned axes themselves, drawn in `Paper`, as they sweep from 0° to 10°
    for step in (0..=100).step_by(25) {
        let angle = theta * (f64::from(step) / 100.);
        let x_end = rotate(
            coordinate!(x = Length::new::<meter>(5.), y = Length::new::<meter>(0.); in Paper),
            angle,
        );
        let y_end = rotate(
            coordinate!(x = Length::new::<meter>(0.), y = Length::new::<meter>(5.); in Paper),
            angle,
        );
        println!(
            "{:>5.1}°: x axis towards {x_end:.2}, y axis towards {y_end:.2}",
            angle.get::<degree>()
        );
    }
}
