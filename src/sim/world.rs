use std::path::PathBuf;

use log::warn;

use super::registry::{BodyRegistry, RegistryError};
use crate::cfg::{ConfigError, LightingConfig, OrreryConfig};

/// Half the width of an orbit marker ring.
pub const ORBIT_PATH_HALF_WIDTH: f64 = 0.1;

/// Angular segments in an orbit marker ring.
pub const ORBIT_PATH_SEGMENTS: u32 = 100;

/// A decorative ring tracing a body's orbit. Never changes after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitPath {
    pub body_id: String,
    pub radius: f64,
    pub half_width: f64,
    pub segments: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid body table: {0}")]
    Registry(#[from] RegistryError),
}

/// A validated, renderer-independent description of the world.
///
/// The GPU side turns this into meshes, materials and lights exactly once.
#[derive(Clone, Debug)]
pub struct WorldPlan {
    pub registry: BodyRegistry,
    pub orbit_paths: Vec<OrbitPath>,
    pub lighting: LightingConfig,
    pub background: Option<String>,
    pub asset_root: PathBuf,
}

impl WorldPlan {
    pub fn from_config(config: &OrreryConfig) -> Result<Self, PlanError> {
        config.validate()?;
        let registry = BodyRegistry::from_specs(&config.bodies)?;

        let orbit_paths = registry
            .orbiting()
            .map(|body| OrbitPath {
                body_id: body.id().to_owned(),
                radius: body.orbit_radius(),
                half_width: ORBIT_PATH_HALF_WIDTH,
                segments: ORBIT_PATH_SEGMENTS,
            })
            .collect();

        Ok(Self {
            registry,
            orbit_paths,
            lighting: config.lighting.clone(),
            background: config.background.clone(),
            asset_root: config.asset_root.clone(),
        })
    }
}

/// Plans `config`, or the built-in configuration if `config` is invalid.
///
/// Fails only when the built-in configuration itself is invalid.
pub fn plan_or_default(config: OrreryConfig) -> Result<(OrreryConfig, WorldPlan), PlanError> {
    match WorldPlan::from_config(&config) {
        Ok(plan) => Ok((config, plan)),
        Err(e) if config != OrreryConfig::default() => {
            warn!("{e}; using built-in configuration");
            let config = OrreryConfig::default();
            let plan = WorldPlan::from_config(&config)?;
            Ok((config, plan))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_ring_per_orbiting_body() {
        let plan = WorldPlan::from_config(&OrreryConfig::default()).unwrap();
        assert_eq!(plan.orbit_paths.len(), plan.registry.len() - 1);
        assert!(plan.orbit_paths.iter().all(|p| p.body_id != "sun"));

        let radii: Vec<_> = plan.orbit_paths.iter().map(|p| p.radius).collect();
        assert_eq!(
            radii,
            [50.0, 60.0, 70.0, 80.0, 100.0, 120.0, 140.0, 160.0]
        );
    }

    #[test]
    fn invalid_table_fails_the_plan() {
        let mut config = OrreryConfig::default();
        config.bodies.retain(|b| !b.luminous);
        assert!(matches!(
            WorldPlan::from_config(&config),
            Err(PlanError::Registry(RegistryError::NoLuminousBody))
        ));
    }

    #[test]
    fn invalid_settings_fail_the_plan() {
        let config = OrreryConfig::from_toml("[camera]\nmax_distance = 10.0").unwrap();
        assert!(matches!(
            WorldPlan::from_config(&config),
            Err(PlanError::Config(ConfigError::Invalid { .. }))
        ));
    }

    #[test]
    fn bad_override_falls_back_to_defaults() {
        for text in ["[camera]\nmax_distance = 10.0", "orbital_rate = nan", "bodies = []"] {
            let config = OrreryConfig::from_toml(text).unwrap();
            let (config, plan) = plan_or_default(config).unwrap();
            assert_eq!(config, OrreryConfig::default());
            assert_eq!(plan.registry.len(), 9);
        }
    }

    #[test]
    fn valid_override_is_kept() {
        let config = OrreryConfig::from_toml("orbital_rate = 0.05").unwrap();
        let (config, _) = plan_or_default(config).unwrap();
        assert_eq!(config.orbital_rate, 0.05);
    }
}
