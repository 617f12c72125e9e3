//! Sweeps the reference 2-RPS platform through its range and prints the leg lengths that hold it
//! at each orientation, then shows what happens just outside the range.

use planar_kinematics::parallel::PlatformGeometry;
use uom::si::angle::degree;
use uom::si::f64::Angle;
use uom::si::length::meter;

fn main() {
    let platform = PlatformGeometry::default();
    println!("platform range {}", platform.range());

    for theta in (-90..=90).step_by(15) {
        let solution = match platform.solve(Angle::new::<degree>(f64::from(theta))) {
            Ok(solution) => solution,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        let legs = solution.leg_lengths();
        println!(
            "{theta:>4}°: s1 = {:.3}, s2 = {:.3}",
            legs.s1().get::<meter>(),
            legs.s2().get::<meter>()
        );
    }

    println!();
    match platform.solve(Angle::new::<degree>(30.)) {
        Ok(solution) => println!("{solution:.3}"),
        Err(err) => eprintln!("{err}"),
    }

    println!();
    if let Err(err) = platform.solve(Angle::new::<degree>(120.)) {
        println!("{err}");
    }
}
