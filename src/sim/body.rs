use std::ops::RangeInclusive;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// One row of the body configuration table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    /// Unique, stable name of the body.
    pub id: String,

    /// Texture reference, relative to the asset root.
    #[serde(default)]
    pub texture: Option<String>,

    /// Visual radius of the body.
    pub radius: f64,

    /// Distance from the system center. Zero for the central body.
    #[serde(default)]
    pub orbit_radius: f64,

    /// Whether this is the central, light-emitting body.
    #[serde(default)]
    pub luminous: bool,

    /// Initial speed factor. Clamped into [`SpeedFactor::RANGE`].
    #[serde(default = "BodySpec::default_speed")]
    pub speed: f64,

    /// Spin added every running tick, in radians.
    #[serde(default = "BodySpec::default_rotation_rate")]
    pub rotation_rate: f64,

    /// Color used when the texture is unavailable.
    #[serde(default = "BodySpec::default_color")]
    pub color: [u8; 3],
}

impl BodySpec {
    const fn default_speed() -> f64 {
        1.0
    }
    const fn default_rotation_rate() -> f64 {
        0.01
    }
    const fn default_color() -> [u8; 3] {
        [255, 255, 255]
    }

    /// Creates an orbiting body row with default speed and rotation.
    pub fn orbiting(id: &str, texture: &str, radius: f64, orbit_radius: f64, speed: f64) -> Self {
        Self {
            id: id.to_owned(),
            texture: Some(texture.to_owned()),
            radius,
            orbit_radius,
            luminous: false,
            speed,
            rotation_rate: Self::default_rotation_rate(),
            color: Self::default_color(),
        }
    }

    /// Creates the central, luminous body row.
    pub fn luminous(id: &str, texture: &str, radius: f64, rotation_rate: f64) -> Self {
        Self {
            id: id.to_owned(),
            texture: Some(texture.to_owned()),
            radius,
            orbit_radius: 0.0,
            luminous: true,
            speed: Self::default_speed(),
            rotation_rate,
            color: Self::default_color(),
        }
    }

    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }
}

/// A user-adjustable multiplier on a body's orbital angle.
///
/// Always within [`SpeedFactor::RANGE`]; out-of-range input is clamped.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct SpeedFactor(f64);

impl SpeedFactor {
    pub const MIN: f64 = 0.1;
    pub const MAX: f64 = 20.0;
    pub const RANGE: RangeInclusive<f64> = Self::MIN..=Self::MAX;

    /// Clamps `value` into range.
    ///
    /// Returns `None` for NaN, which has no meaningful clamp.
    pub fn new(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        Some(Self(value.clamp(Self::MIN, Self::MAX)))
    }

    #[inline]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for SpeedFactor {
    fn default() -> Self {
        Self(1.0)
    }
}

/// The mutable transform of a body's render node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyTransform {
    /// Position relative to the system center.
    pub position: DVec3,

    /// Accumulated rotation around the Y axis, in radians.
    pub spin: f64,
}

/// A simulated celestial body.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    id: String,
    base_radius: f64,
    orbit_radius: f64,
    luminous: bool,
    rotation_rate: f64,
    color: [u8; 3],
    texture: Option<String>,
    pub(crate) speed: SpeedFactor,
    pub(crate) transform: BodyTransform,
}

impl Body {
    /// Creates a body from its configuration row.
    ///
    /// Orbiting bodies start at `(orbit_radius, 0, 0)`, the position the
    /// orbit formula yields at `t = 0`.
    pub(crate) fn from_spec(spec: &BodySpec, speed: SpeedFactor) -> Self {
        Self {
            id: spec.id.clone(),
            base_radius: spec.radius,
            orbit_radius: spec.orbit_radius,
            luminous: spec.luminous,
            rotation_rate: spec.rotation_rate,
            color: spec.color,
            texture: spec.texture.clone(),
            speed,
            transform: BodyTransform {
                position: DVec3::new(spec.orbit_radius, 0.0, 0.0),
                spin: 0.0,
            },
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }
    #[inline]
    pub fn base_radius(&self) -> f64 {
        self.base_radius
    }
    #[inline]
    pub fn orbit_radius(&self) -> f64 {
        self.orbit_radius
    }
    #[inline]
    pub fn is_luminous(&self) -> bool {
        self.luminous
    }
    #[inline]
    pub fn rotation_rate(&self) -> f64 {
        self.rotation_rate
    }
    #[inline]
    pub fn color(&self) -> [u8; 3] {
        self.color
    }
    #[inline]
    pub fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }
    #[inline]
    pub fn speed_factor(&self) -> SpeedFactor {
        self.speed
    }
    #[inline]
    pub fn transform(&self) -> &BodyTransform {
        &self.transform
    }
}
