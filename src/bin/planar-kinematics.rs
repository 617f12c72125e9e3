//! planar-kinematics CLI
//!
//! Solves the mechanisms in this crate from the command line:
//! - `chain`: forward kinematics of a serial link chain
//! - `platform`: leg lengths of a 2-RPS platform, once or interactively
//! - `rotate`: rotate a single point about the origin
//!
//! Set `RUST_LOG` (eg `RUST_LOG=debug`) to see what the solvers are doing; logs go to stderr.

use clap::{Parser, Subcommand};
use planar_kinematics::config::{ConfigError, MechanismConfig};
use planar_kinematics::input::{self, AngleUnit, InputError};
use planar_kinematics::parallel::PlatformGeometry;
use planar_kinematics::serial::LinkChain;
use planar_kinematics::systems::ChainBase;
use planar_kinematics::{math, Coordinate, KinematicsError};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use uom::si::f64::Length;
use uom::si::length::meter;

#[derive(Parser)]
#[command(
    name = "planar-kinematics",
    version,
    about = "Kinematics for planar serial chains and 2-RPS platforms"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Joint positions of a serial link chain
    Chain {
        /// Joint angles, separated by commas or spaces (eg "30,45,-30")
        #[arg(long, allow_hyphen_values = true)]
        angles: String,
        /// Unit of the joint angles (deg, rad)
        #[arg(long, default_value = "deg")]
        unit: AngleUnit,
        /// Link lengths in metres; overrides the configuration file
        #[arg(long)]
        lengths: Option<String>,
        /// YAML file describing the mechanism
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Leg lengths of a 2-RPS platform
    Platform {
        /// Platform orientation
        #[arg(long, allow_hyphen_values = true, required_unless_present = "interactive")]
        angle: Option<String>,
        /// Unit of the orientation (deg, rad)
        #[arg(long, default_value = "deg")]
        unit: AngleUnit,
        /// YAML file describing the mechanism
        #[arg(long)]
        config: Option<PathBuf>,
        /// Keep asking for orientations until EOF or "q"
        #[arg(long, conflicts_with = "angle")]
        interactive: bool,
    },
    /// Rotate a point about the origin
    Rotate {
        /// x in metres
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        /// y in metres
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// Rotation angle, counter-clockwise
        #[arg(long, allow_hyphen_values = true)]
        angle: String,
        /// Unit of the angle (deg, rad)
        #[arg(long, default_value = "deg")]
        unit: AngleUnit,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("failed to read {path}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Kinematics(#[from] KinematicsError),

    #[error("failed to read input or write output")]
    Terminal(#[from] io::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let result = run(
        cli.command,
        &mut io::stdin().lock(),
        &mut io::stdout(),
        &mut io::stderr(),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", error_chain(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(
    command: Commands,
    input: &mut impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Commands::Chain {
            angles,
            unit,
            lengths,
            config,
        } => run_chain(&angles, unit, lengths.as_deref(), config.as_deref(), out),
        Commands::Platform {
            angle,
            unit,
            config,
            interactive,
        } => {
            let geometry = load_config(config.as_deref())?.platform_geometry()?;
            match angle {
                Some(angle) if !interactive => run_platform(&geometry, &angle, unit, out),
                _ => prompt_platform(&geometry, unit, input, out, err),
            }
        }
        Commands::Rotate { x, y, angle, unit } => run_rotate(x, y, &angle, unit, out),
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn load_config(path: Option<&Path>) -> Result<MechanismConfig, CliError> {
    let Some(path) = path else {
        return Ok(MechanismConfig::default());
    };
    tracing::debug!(path = %path.display(), "loading mechanism configuration");
    let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_owned(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| CliError::ParseConfig {
        path: path.to_owned(),
        source,
    })
}

fn parse_lengths(text: &str) -> Result<Vec<Length>, InputError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<f64>()
                .map(Length::new::<meter>)
                .map_err(|_| InputError::NotANumber(entry.to_owned()))
        })
        .collect()
}

fn run_chain(
    angles: &str,
    unit: AngleUnit,
    lengths: Option<&str>,
    config: Option<&Path>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let link_lengths = match lengths {
        Some(lengths) => parse_lengths(lengths)?,
        None => load_config(config)?.chain_link_lengths(),
    };
    let joint_angles = input::parse_angle_list(angles, unit)?;

    let pose = LinkChain::new(link_lengths, joint_angles).forward_kinematics()?;
    for (i, joint) in pose.joints().iter().enumerate() {
        let label = match i {
            0 => "base".to_owned(),
            i if i == pose.len() => "end effector".to_owned(),
            i => format!("joint {i}"),
        };
        writeln!(out, "{label}: {joint:.3}")?;
    }
    writeln!(out, "end effector {:.3}", pose.end_effector_pose().orientation())?;
    Ok(())
}

fn run_platform(
    geometry: &PlatformGeometry,
    angle: &str,
    unit: AngleUnit,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let orientation = input::parse_platform_orientation(angle, unit, geometry)?;
    writeln!(out, "{:.3}", orientation.solve())?;
    Ok(())
}

fn prompt(geometry: &PlatformGeometry, unit: AngleUnit) -> String {
    format!(
        "Enter the platform orientation in {unit} within {}, or q to quit: ",
        geometry.range()
    )
}

/// Solves one orientation per line of `input` until EOF or `q`.
///
/// Invalid lines are reported on `err` and asked for again.
fn prompt_platform(
    geometry: &PlatformGeometry,
    unit: AngleUnit,
    input: &mut impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<(), CliError> {
    let prompt = prompt(geometry, unit);
    let mut line = String::new();
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        match input::parse_platform_orientation(answer, unit, geometry) {
            Ok(orientation) => writeln!(out, "{:.3}", orientation.solve())?,
            Err(reason) => writeln!(err, "{reason}, try again")?,
        }
    }
}

fn run_rotate(
    x: f64,
    y: f64,
    angle: &str,
    unit: AngleUnit,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let angle = input::parse_angle(angle, unit)?;
    let point = Coordinate::<ChainBase>::from_cartesian(
        Length::new::<meter>(x),
        Length::new::<meter>(y),
    );
    writeln!(out, "{:.3}", math::rotate(point, angle))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{error_chain, prompt, run, Cli, CliError};
    use clap::Parser;
    use planar_kinematics::input::AngleUnit;
    use planar_kinematics::parallel::PlatformGeometry;

    struct Session {
        out: String,
        err: String,
        result: Result<(), CliError>,
    }

    fn session(args: &[&str], stdin: &str) -> Session {
        let args = std::iter::once("planar-kinematics").chain(args.iter().copied());
        let cli = Cli::try_parse_from(args).unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let result = run(cli.command, &mut stdin.as_bytes(), &mut out, &mut err);
        Session {
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
            result,
        }
    }

    fn default_prompt() -> String {
        prompt(&PlatformGeometry::default(), AngleUnit::Degrees)
    }

    #[test]
    fn interactive_platform_asks_again_until_q() {
        let session = session(&["platform", "--interactive"], "abc\n120\n0\nq\n30\n");
        assert!(session.result.is_ok());

        insta::assert_snapshot!(session.out.replace(&default_prompt(), "[prompt]"), @r"
        [prompt][prompt][prompt]s1 = 2.236, s2 = 2.236
        B1 = (1.000, 1.000)
        J1 = (2.000, 3.000)
        J2 = (4.000, 3.000)
        B2 = (5.000, 1.000)
        J1_ext = (1.000, 3.000)
        J2_ext = (5.000, 3.000)
        [prompt]");
        insta::assert_snapshot!(session.err.trim_end(), @r"
        'abc' is not a number, try again
        platform orientation 120° is outside the valid range [-90°, 90°], try again
        ");
    }

    #[test]
    fn interactive_platform_ends_at_eof() {
        let session = session(&["platform", "--interactive", "--unit", "rad"], "2\n");
        assert!(session.result.is_ok());
        let prompt = prompt(&PlatformGeometry::default(), AngleUnit::Radians);
        assert_eq!(session.out, format!("{prompt}{prompt}\n"));
        assert!(session.err.starts_with("platform orientation 114.59"));
    }

    #[test]
    fn platform_once_prints_three_decimals() {
        let session = session(&["platform", "--angle", "0"], "");
        assert!(session.result.is_ok());
        assert!(session.out.starts_with("s1 = 2.236, s2 = 2.236\nB1 = (1.000, 1.000)\n"));
    }

    #[test]
    fn platform_out_of_range_is_an_error() {
        let session = session(&["platform", "--angle", "-120"], "");
        let err = session.result.unwrap_err();
        insta::assert_snapshot!(
            error_chain(&err),
            @"platform orientation -120° is outside the valid range [-90°, 90°]"
        );
        assert!(session.out.is_empty());
    }

    #[test]
    fn chain_prints_every_joint() {
        let session = session(&["chain", "--angles", "90,-90", "--lengths", "1,1"], "");
        assert!(session.result.is_ok());
        insta::assert_snapshot!(session.out.trim_end(), @r"
        base: (0.000, 0.000)
        joint 1: (0.000, 1.000)
        end effector: (1.000, 1.000)
        end effector heading 0.000°
        ");
    }

    #[test]
    fn chain_link_lengths_from_the_command_line_are_checked_by_the_solver() {
        let session = session(&["chain", "--angles", "0,0", "--lengths", "1,0"], "");
        let err = session.result.unwrap_err();
        assert!(matches!(err, CliError::Kinematics(_)));
        insta::assert_snapshot!(
            error_chain(&err),
            @"link 1 has length 0m, but link lengths must be positive"
        );
    }

    #[test]
    fn chain_needs_one_angle_per_link() {
        let session = session(&["chain", "--angles", "30,45"], "");
        assert!(matches!(session.result, Err(CliError::Kinematics(_))));
    }

    #[test]
    fn rotate_moves_the_point_counterclockwise() {
        let session = session(&["rotate", "--x", "3", "--y", "2", "--angle", "10"], "");
        assert!(session.result.is_ok());
        insta::assert_snapshot!(session.out.trim_end(), @"(2.607, 2.491)");
    }

    #[test]
    fn missing_config_file_is_reported_with_its_cause() {
        let session = session(
            &["platform", "--angle", "0", "--config", "/nonexistent/mechanism.yaml"],
            "",
        );
        let err = session.result.unwrap_err();
        assert!(matches!(err, CliError::ReadConfig { .. }));
        assert!(error_chain(&err).starts_with("failed to read /nonexistent/mechanism.yaml: "));
    }

    #[test]
    fn arguments() {
        assert!(Cli::try_parse_from(["planar-kinematics", "platform"]).is_err());
        assert!(Cli::try_parse_from([
            "planar-kinematics",
            "platform",
            "--angle",
            "10",
            "--interactive"
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "planar-kinematics",
            "chain",
            "--angles",
            "1",
            "--unit",
            "grad"
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "planar-kinematics",
            "rotate",
            "--x",
            "-1",
            "--y",
            "0",
            "--angle",
            "-5"
        ])
        .is_ok());
    }
}
