//! Mechanism descriptions as they are written in configuration files.
//!
//! Field names carry their unit (`_m` for metres, `_deg` for degrees) since plain numbers in a
//! file have no type to carry it for them. Any section or field that is left out falls back to the
//! reference mechanisms: [`PlatformGeometry::default`] and a three-link arm with 1m links.
//!
//! ```rust
//! use planar_kinematics::config::MechanismConfig;
//!
//! let config: MechanismConfig = serde_yaml::from_str(
//!     r#"
//! platform:
//!   base_joints_m: [[0, 0], [4, 0]]
//!   height_m: 1.5
//!   range_deg: [-45, 45]
//! chain:
//!   link_lengths_m: [0.5, 0.5]
//! "#,
//! )
//! .expect("valid YAML");
//!
//! let geometry = config.platform_geometry().expect("valid platform");
//! assert!(geometry.solve(uom::si::f64::Angle::new::<uom::si::angle::degree>(60.)).is_err());
//! assert_eq!(config.chain_link_lengths().len(), 2);
//! ```

use crate::coordinates::Coordinate;
use crate::parallel::{AngleRange, PlatformGeometry};
use serde::{Deserialize, Serialize};
use uom::si::angle::degree;
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

/// Errors from turning a configuration into a mechanism.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("range_deg must be [min, max] with min <= max, got [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },
}

/// A configuration file: either mechanism, or both.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MechanismConfig {
    #[serde(default)]
    pub platform: Option<PlatformConfig>,
    #[serde(default)]
    pub chain: Option<ChainConfig>,
}

impl MechanismConfig {
    /// The configured platform, or [`PlatformGeometry::default`] if there is none.
    ///
    /// # Errors
    ///
    /// See [`PlatformConfig::into_geometry`].
    pub fn platform_geometry(&self) -> Result<PlatformGeometry, ConfigError> {
        match &self.platform {
            Some(platform) => platform.clone().into_geometry(),
            None => Ok(PlatformGeometry::default()),
        }
    }

    /// The configured chain's link lengths, or three 1m links if there is no chain.
    #[must_use]
    pub fn chain_link_lengths(&self) -> Vec<Length> {
        self.chain.clone().unwrap_or_default().link_lengths()
    }
}

/// A 2-RPS platform; see [`PlatformGeometry`] for what each part means.
///
/// When both `extended_attachments_m` and `extension_m` are given, the explicit
/// `extended_attachments_m` wins.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_joints_m: Option<[[f64; 2]; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments_m: Option<[[f64; 2]; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_attachments_m: Option<[[f64; 2]; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_deg: Option<[f64; 2]>,
}

impl PlatformConfig {
    /// Builds the geometry this configuration describes.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotFinite`] if any length is infinite or NaN.
    /// - [`ConfigError::InvalidRange`] if `range_deg` isn't a finite `[min, max]` with
    ///   `min <= max`.
    pub fn into_geometry(self) -> Result<PlatformGeometry, ConfigError> {
        let mut builder = PlatformGeometry::builder();
        if let Some([first, second]) = self.base_joints_m {
            builder = builder.base_joints(
                point("base_joints_m", first)?,
                point("base_joints_m", second)?,
            );
        }
        if let Some([first, second]) = self.attachments_m {
            builder = builder.attachments(
                point("attachments_m", first)?,
                point("attachments_m", second)?,
            );
        }
        if let Some(extension) = self.extension_m {
            builder = builder.extension(length("extension_m", extension)?);
        }
        if let Some([first, second]) = self.extended_attachments_m {
            builder = builder.extended_attachments(
                point("extended_attachments_m", first)?,
                point("extended_attachments_m", second)?,
            );
        }
        if let Some(height) = self.height_m {
            builder = builder.height(length("height_m", height)?);
        }
        if let Some([min, max]) = self.range_deg {
            let range = AngleRange::new(Angle::new::<degree>(min), Angle::new::<degree>(max))
                .ok_or(ConfigError::InvalidRange { min, max })?;
            builder = builder.range(range);
        }
        Ok(builder.build())
    }
}

/// A serial chain's links. Joint angles are not configuration; they are supplied per solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainConfig {
    pub link_lengths_m: Vec<f64>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            link_lengths_m: vec![1.; 3],
        }
    }
}

impl ChainConfig {
    /// The link lengths in metres, as written.
    ///
    /// They are checked when the chain is posed, by
    /// [`forward_kinematics`](crate::serial::forward_kinematics).
    #[must_use]
    pub fn link_lengths(&self) -> Vec<Length> {
        self.link_lengths_m
            .iter()
            .map(|&value| Length::new::<meter>(value))
            .collect()
    }
}

fn length(field: &'static str, value: f64) -> Result<Length, ConfigError> {
    if value.is_finite() {
        Ok(Length::new::<meter>(value))
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn point<In>(field: &'static str, [x, y]: [f64; 2]) -> Result<Coordinate<In>, ConfigError> {
    Ok(Coordinate::from_cartesian(length(field, x)?, length(field, y)?))
}

#[cfg(test)]
mod tests {
    use super::{ChainConfig, ConfigError, MechanismConfig, PlatformConfig};
    use crate::coordinate;
    use crate::coordinate_systems::{MechanismBase, PlatformFrame};
    use crate::error::KinematicsError;
    use crate::parallel::{AngleRange, PlatformGeometry};
    use crate::serial::LinkChain;
    use approx::assert_relative_eq;
    use uom::si::f64::{Angle, Length};
    use uom::si::{angle::degree, length::meter};

    fn m(meters: f64) -> Length {
        Length::new::<meter>(meters)
    }

    #[test]
    fn empty_config_is_the_reference_mechanisms() {
        let config: MechanismConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, MechanismConfig::default());
        assert_eq!(config.platform_geometry(), Ok(PlatformGeometry::default()));
        assert_eq!(config.chain_link_lengths(), vec![m(1.); 3]);
    }

    #[test]
    fn empty_platform_section_is_the_reference_platform() {
        let config: MechanismConfig = serde_yaml::from_str("platform: {}").unwrap();
        assert_eq!(config.platform, Some(PlatformConfig::default()));
        assert_eq!(config.platform_geometry(), Ok(PlatformGeometry::default()));
    }

    #[test]
    fn platform_fields_override_the_reference() {
        let config: PlatformConfig = serde_yaml::from_str(
            r"
            base_joints_m: [[0, 0], [4, 0]]
            attachments_m: [[-0.5, 0], [0.5, 0]]
            extension_m: 0.25
            height_m: 1.5
            range_deg: [-45, 45]
            ",
        )
        .unwrap();
        let geometry = config.into_geometry().unwrap();

        assert_eq!(
            geometry.base_joints(),
            [
                coordinate!(x = m(0.), y = m(0.); in MechanismBase),
                coordinate!(x = m(4.), y = m(0.)),
            ]
        );
        assert_eq!(geometry.height(), m(1.5));
        assert_relative_eq!(
            geometry.extended_attachments()[1],
            coordinate!(x = m(0.75), y = m(0.); in PlatformFrame)
        );
        assert_eq!(
            geometry.range(),
            AngleRange::new(Angle::new::<degree>(-45.), Angle::new::<degree>(45.)).unwrap()
        );
    }

    #[test]
    fn explicit_extended_attachments_win_over_extension() {
        let config: PlatformConfig = serde_yaml::from_str(
            r"
            extended_attachments_m: [[-3, 0], [3, 0]]
            extension_m: 0.25
            ",
        )
        .unwrap();
        let geometry = config.into_geometry().unwrap();
        assert_eq!(
            geometry.extended_attachments()[0],
            coordinate!(x = m(-3.), y = m(0.); in PlatformFrame)
        );
    }

    #[test]
    fn invalid_platforms_are_reported() {
        let config = PlatformConfig {
            range_deg: Some([10., -10.]),
            ..PlatformConfig::default()
        };
        insta::assert_snapshot!(
            config.into_geometry().unwrap_err().to_string(),
            @"range_deg must be [min, max] with min <= max, got [10, -10]"
        );

        let config = PlatformConfig {
            height_m: Some(f64::INFINITY),
            ..PlatformConfig::default()
        };
        assert_eq!(
            config.into_geometry(),
            Err(ConfigError::NotFinite {
                field: "height_m",
                value: f64::INFINITY
            })
        );
    }

    #[test]
    fn chain_lengths_are_checked_when_posed() {
        let chain = ChainConfig {
            link_lengths_m: vec![1., 0., -1.],
        };
        let link_lengths = chain.link_lengths();
        assert_eq!(link_lengths, vec![m(1.), m(0.), m(-1.)]);

        let angles = vec![Angle::new::<degree>(0.); 3];
        assert_eq!(
            LinkChain::new(link_lengths, angles).forward_kinematics(),
            Err(KinematicsError::InvalidLinkLength {
                index: 1,
                length: m(0.)
            })
        );
    }

    #[test]
    fn unknown_fields_are_refused() {
        assert!(serde_yaml::from_str::<MechanismConfig>("platfrom: {}").is_err());
    }
}
