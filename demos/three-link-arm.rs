//! Poses a three-link arm with 1m links and prints where each joint ends up.

use planar_kinematics::serial::LinkChain;
use uom::si::f64::{Angle, Length};
use uom::si::{angle::degree, length::meter};

fn main() {
    let arm = LinkChain::new(
        [Length::new::<meter>(1.); 3],
        [0., 0., 0.].map(Angle::new::<degree>),
    );

    for angles in [[30., 45., -30.], [90., -90., 90.], [0., 0., 0.]] {
        let posed = arm.with_joint_angles(angles.map(Angle::new::<degree>));
        match posed.forward_kinematics() {
            Ok(pose) => {
                println!("joint angles {angles:?}°:");
                for (i, joint) in pose.joints().iter().enumerate() {
                    println!("  P{i} = {joint:.3}");
                }
                println!("  end effector {:.1}", pose.end_effector_pose().orientation());
            }
            Err(err) => eprintln!("joint angles {angles:?}°: {err}"),
        }
    }
}
