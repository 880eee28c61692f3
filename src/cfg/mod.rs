use std::path::PathBuf;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::sim::{animation::DEFAULT_ORBITAL_RATE, body::BodySpec};

mod storage;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}

/// Everything needed to build and run the orrery.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    pub title: String,

    /// Directory texture references are resolved against.
    pub asset_root: PathBuf,

    /// Equirectangular background texture, if any.
    pub background: Option<String>,

    /// Radians per second per unit of speed factor.
    pub orbital_rate: f64,

    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub bodies: Vec<BodySpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f64,
    pub near: f64,
    pub far: f64,
    pub distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    /// Initial elevation above the orbital plane, in radians.
    pub pitch: f64,
    /// Fraction of the pending motion applied per tick.
    pub damping: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
    pub directional_direction: [f32; 3],
    pub point_intensity: f32,
    /// Constant, linear and quadratic attenuation of the central light.
    pub point_attenuation: [f32; 3],
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            title: "Solar System Orrery".into(),
            asset_root: PathBuf::from("assets/img"),
            background: Some("starfield.jpg".into()),
            orbital_rate: DEFAULT_ORBITAL_RATE,
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            bodies: default_bodies(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 2000.0,
            distance: 200.0,
            min_distance: 30.0,
            max_distance: 1000.0,
            pitch: 0.0,
            damping: 0.05,
        }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.4,
            directional_intensity: 1.0,
            directional_direction: [-1.0, -1.0, -1.0],
            point_intensity: 2.5,
            point_attenuation: [1.0, 0.001, 0.0],
        }
    }
}

fn default_bodies() -> Vec<BodySpec> {
    vec![
        BodySpec::luminous("sun", "sun_hd.jpg", 20.0, 0.005).with_color([255, 170, 0]),
        BodySpec::orbiting("mercury", "mercury_hd.jpg", 2.0, 50.0, 2.0).with_color([151, 151, 159]),
        BodySpec::orbiting("venus", "venus_hd.jpg", 3.0, 60.0, 1.5).with_color([227, 187, 118]),
        BodySpec::orbiting("earth", "earth_hd.jpg", 4.0, 70.0, 1.0).with_color([70, 120, 200]),
        BodySpec::orbiting("mars", "mars_hd.jpg", 3.5, 80.0, 0.8).with_color([193, 68, 14]),
        BodySpec::orbiting("jupiter", "jupiter_hd.jpg", 10.0, 100.0, 0.7).with_color([216, 202, 157]),
        BodySpec::orbiting("saturn", "saturn_hd.jpg", 8.0, 120.0, 0.6).with_color([234, 214, 184]),
        BodySpec::orbiting("uranus", "uranus_hd.jpg", 6.0, 140.0, 0.5).with_color([172, 229, 238]),
        BodySpec::orbiting("neptune", "neptune_hd.jpg", 5.0, 160.0, 0.4).with_color([91, 93, 223]),
    ]
}

impl CameraConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("camera.fov_degrees", self.fov_degrees),
            ("camera.near", self.near),
            ("camera.far", self.far),
            ("camera.distance", self.distance),
            ("camera.min_distance", self.min_distance),
            ("camera.max_distance", self.max_distance),
            ("camera.pitch", self.pitch),
            ("camera.damping", self.damping),
        ];
        if let Some(&(field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::invalid(field, "must be finite"));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::invalid("camera.fov_degrees", "must be in (0, 180)"));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(ConfigError::invalid("camera.near", "must be positive and below `far`"));
        }
        if !(self.min_distance > 0.0 && self.min_distance <= self.max_distance) {
            return Err(ConfigError::invalid(
                "camera.min_distance",
                "must be positive and at most `max_distance`",
            ));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::invalid("camera.damping", "must be in (0, 1]"));
        }
        Ok(())
    }
}

impl LightingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            self.ambient_intensity,
            self.directional_intensity,
            self.point_intensity,
        ]
        .into_iter()
        .chain(self.directional_direction)
        .chain(self.point_attenuation)
        .all(f32::is_finite);
        if !finite {
            return Err(ConfigError::invalid("lighting", "values must be finite"));
        }
        if self.directional_direction == [0.0; 3] {
            return Err(ConfigError::invalid(
                "lighting.directional_direction",
                "must not be zero",
            ));
        }
        Ok(())
    }
}

impl OrreryConfig {
    /// Parses a TOML override. Missing fields take their default value.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Checks the numeric settings the body table does not cover.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.orbital_rate.is_finite() {
            return Err(ConfigError::invalid("orbital_rate", "must be finite"));
        }
        self.camera.validate()?;
        self.lighting.validate()
    }

    /// Loads the user override if there is one, otherwise the built-in table.
    ///
    /// An unreadable or malformed file is reported and skipped; it never
    /// stops the program.
    pub fn load() -> Self {
        let Some(path) = storage::override_path() else {
            return Self::default();
        };

        match storage::read(&path).and_then(|text| {
            Self::from_toml(&text).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })
        }) {
            Ok(config) => {
                info!("loaded configuration from {}", path.display());
                config
            }
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Self::default()
            }
            Err(e) => {
                warn!("{e}; using built-in configuration");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::registry::BodyRegistry;

    #[test]
    fn default_table_is_valid() {
        let config = OrreryConfig::default();
        let registry = BodyRegistry::from_specs(&config.bodies).unwrap();
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.central().id(), "sun");
        assert_eq!(registry.central().rotation_rate(), 0.005);
        let earth = registry.get_by_name("earth").unwrap();
        assert_eq!(earth.orbit_radius(), 70.0);
        assert_eq!(earth.rotation_rate(), 0.01);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let config = OrreryConfig::from_toml(
            r#"
            orbital_rate = 0.05

            [camera]
            fov_degrees = 60.0

            [[bodies]]
            id = "star"
            radius = 10.0
            luminous = true

            [[bodies]]
            id = "rock"
            texture = "rock.png"
            radius = 1.0
            orbit_radius = 30.0
            speed = 3.0
            "#,
        )
        .unwrap();

        assert_eq!(config.orbital_rate, 0.05);
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.camera.damping, 0.05);
        assert_eq!(config.title, OrreryConfig::default().title);
        assert_eq!(config.bodies.len(), 2);
        assert!(BodyRegistry::from_specs(&config.bodies).is_ok());
    }

    #[test]
    fn defaults_validate() {
        assert!(OrreryConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_zoom_limits_are_rejected() {
        let config = OrreryConfig::from_toml("[camera]\nmax_distance = 10.0").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "camera.min_distance",
                ..
            })
        ));
    }

    #[test]
    fn non_finite_rate_is_rejected() {
        let config = OrreryConfig::from_toml("orbital_rate = nan").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "orbital_rate",
                ..
            })
        ));
        let config = OrreryConfig::from_toml("orbital_rate = inf").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn camera_ranges_are_checked() {
        for text in [
            "[camera]\ndamping = 0.0",
            "[camera]\ndamping = 1.5",
            "[camera]\nnear = 10.0\nfar = 5.0",
            "[camera]\nfov_degrees = -1.0",
            "[camera]\nmin_distance = nan",
        ] {
            let config = OrreryConfig::from_toml(text).unwrap();
            assert!(config.validate().is_err(), "accepted {text:?}");
        }
    }

    #[test]
    fn malformed_override_is_an_error() {
        assert!(OrreryConfig::from_toml("bodies = 3").is_err());
    }
}
