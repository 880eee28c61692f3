use std::collections::HashMap;

use log::warn;

use super::body::{Body, BodySpec, SpeedFactor};

/// Index of a body inside its registry.
pub type Id = usize;

/// The authoritative set of bodies, fixed after construction.
///
/// Bodies keep the order of the configuration table. Identities never
/// change: there is no way to add or remove a body once built.
#[derive(Clone, Debug)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
    ids: HashMap<String, Id>,
    central: Id,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("the body table is empty")]
    Empty,
    #[error("body id {0:?} is used more than once")]
    DuplicateId(String),
    #[error("no luminous body was declared")]
    NoLuminousBody,
    #[error("more than one luminous body: {first:?} and {second:?}")]
    MultipleLuminousBodies { first: String, second: String },
    #[error("luminous body {id:?} must sit at the center, found orbit radius {orbit_radius}")]
    LuminousOffCenter { id: String, orbit_radius: f64 },
    #[error("orbiting body {id:?} needs a positive orbit radius, found {orbit_radius}")]
    NonPositiveOrbitRadius { id: String, orbit_radius: f64 },
    #[error("body {id:?} needs a positive finite radius, found {radius}")]
    InvalidRadius { id: String, radius: f64 },
    #[error("body {id:?} has a non-finite rotation rate")]
    InvalidRotationRate { id: String },
}

impl BodyRegistry {
    /// Validates the table and builds the registry.
    ///
    /// Default speed factors outside the allowed range are clamped,
    /// the same way user input is.
    pub fn from_specs(specs: &[BodySpec]) -> Result<Self, RegistryError> {
        if specs.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut bodies: Vec<Body> = Vec::with_capacity(specs.len());
        let mut ids: HashMap<String, Id> = HashMap::with_capacity(specs.len());
        let mut central: Option<Id> = None;

        for spec in specs {
            Self::validate(spec)?;

            let index = bodies.len();
            if ids.insert(spec.id.clone(), index).is_some() {
                return Err(RegistryError::DuplicateId(spec.id.clone()));
            }

            if spec.luminous {
                if let Some(first) = central {
                    return Err(RegistryError::MultipleLuminousBodies {
                        first: bodies[first].id().to_owned(),
                        second: spec.id.clone(),
                    });
                }
                central = Some(index);
            }

            let speed = match SpeedFactor::new(spec.speed) {
                Some(s) => s,
                None => {
                    warn!("body {:?}: default speed is NaN, using 1.0", spec.id);
                    SpeedFactor::default()
                }
            };
            if speed.get() != spec.speed && !spec.speed.is_nan() {
                warn!(
                    "body {:?}: default speed {} clamped to {}",
                    spec.id,
                    spec.speed,
                    speed.get()
                );
            }

            bodies.push(Body::from_spec(spec, speed));
        }

        let central = central.ok_or(RegistryError::NoLuminousBody)?;

        Ok(Self {
            bodies,
            ids,
            central,
        })
    }

    fn validate(spec: &BodySpec) -> Result<(), RegistryError> {
        if !(spec.radius.is_finite() && spec.radius > 0.0) {
            return Err(RegistryError::InvalidRadius {
                id: spec.id.clone(),
                radius: spec.radius,
            });
        }
        if !spec.rotation_rate.is_finite() {
            return Err(RegistryError::InvalidRotationRate {
                id: spec.id.clone(),
            });
        }
        if spec.luminous {
            if spec.orbit_radius != 0.0 {
                return Err(RegistryError::LuminousOffCenter {
                    id: spec.id.clone(),
                    orbit_radius: spec.orbit_radius,
                });
            }
        } else if !(spec.orbit_radius.is_finite() && spec.orbit_radius > 0.0) {
            return Err(RegistryError::NonPositiveOrbitRadius {
                id: spec.id.clone(),
                orbit_radius: spec.orbit_radius,
            });
        }
        Ok(())
    }

    /// Looks up a body's index by its name.
    pub fn find(&self, id: &str) -> Option<Id> {
        self.ids.get(id).copied()
    }

    pub fn get(&self, index: Id) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn get_by_name(&self, id: &str) -> Option<&Body> {
        self.find(id).and_then(|index| self.bodies.get(index))
    }

    pub(crate) fn get_by_name_mut(&mut self, id: &str) -> Option<&mut Body> {
        let index = self.find(id)?;
        self.bodies.get_mut(index)
    }

    /// The single luminous body.
    pub fn central(&self) -> &Body {
        &self.bodies[self.central]
    }

    /// All bodies, in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    /// Every body except the central one, in table order.
    pub fn orbiting(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| !b.is_luminous())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<BodySpec> {
        vec![
            BodySpec::luminous("sun", "sun.jpg", 20.0, 0.005),
            BodySpec::orbiting("mercury", "mercury.jpg", 2.0, 50.0, 2.0),
            BodySpec::orbiting("venus", "venus.jpg", 3.0, 60.0, 1.5),
        ]
    }

    #[test]
    fn builds_in_table_order() {
        let registry = BodyRegistry::from_specs(&table()).unwrap();
        let names: Vec<_> = registry.iter().map(Body::id).collect();
        assert_eq!(names, ["sun", "mercury", "venus"]);
        assert_eq!(registry.central().id(), "sun");
        assert_eq!(registry.orbiting().count(), 2);
        assert_eq!(registry.find("venus"), Some(2));
        assert_eq!(registry.find("pluto"), None);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut specs = table();
        specs.push(BodySpec::orbiting("venus", "venus.jpg", 3.0, 65.0, 1.0));
        assert_eq!(
            BodyRegistry::from_specs(&specs).unwrap_err(),
            RegistryError::DuplicateId("venus".into())
        );
    }

    #[test]
    fn requires_exactly_one_luminous_body() {
        let specs = table()[1..].to_vec();
        assert_eq!(
            BodyRegistry::from_specs(&specs).unwrap_err(),
            RegistryError::NoLuminousBody
        );

        let mut specs = table();
        specs.push(BodySpec::luminous("sirius", "sirius.jpg", 30.0, 0.01));
        assert!(matches!(
            BodyRegistry::from_specs(&specs),
            Err(RegistryError::MultipleLuminousBodies { .. })
        ));
    }

    #[test]
    fn rejects_bad_orbits() {
        let mut specs = table();
        specs[2].orbit_radius = 0.0;
        assert!(matches!(
            BodyRegistry::from_specs(&specs),
            Err(RegistryError::NonPositiveOrbitRadius { .. })
        ));

        let mut specs = table();
        specs[0].orbit_radius = 5.0;
        assert!(matches!(
            BodyRegistry::from_specs(&specs),
            Err(RegistryError::LuminousOffCenter { .. })
        ));

        let mut specs = table();
        specs[1].radius = f64::NAN;
        assert!(matches!(
            BodyRegistry::from_specs(&specs),
            Err(RegistryError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn clamps_default_speed() {
        let mut specs = table();
        specs[1].speed = 50.0;
        specs[2].speed = f64::NAN;
        let registry = BodyRegistry::from_specs(&specs).unwrap();
        assert_eq!(registry.get(1).unwrap().speed_factor().get(), 20.0);
        assert_eq!(registry.get(2).unwrap().speed_factor().get(), 1.0);
    }

    #[test]
    fn empty_table_is_an_error() {
        assert_eq!(
            BodyRegistry::from_specs(&[]).unwrap_err(),
            RegistryError::Empty
        );
    }
}
