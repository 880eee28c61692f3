use std::fmt::{self, Display};

use glam::DVec3;

use super::registry::BodyRegistry;

/// Default multiplier turning `elapsed * speed` into radians.
pub const DEFAULT_ORBITAL_RATE: f64 = 0.02;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RunState {
    #[default]
    Running,
    Paused,
}

impl RunState {
    #[inline]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Running => Self::Paused,
            Self::Paused => Self::Running,
        }
    }

    /// Label for the button that changes away from this state.
    pub const fn action_label(self) -> &'static str {
        match self {
            Self::Running => "Pause",
            Self::Paused => "Resume",
        }
    }
}

impl Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Running => write!(f, "running"),
            RunState::Paused => write!(f, "paused"),
        }
    }
}

/// The process-wide pause gate and frame clock.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationState {
    pub(crate) run_state: RunState,
    elapsed: f64,
}

impl AnimationState {
    #[inline]
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.run_state.is_running()
    }

    /// Seconds on the frame clock, as of the last tick.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Records a frame timestamp, in milliseconds.
    ///
    /// The clock keeps running while paused. Non-finite or backwards
    /// samples are ignored so the clock stays monotonic.
    pub(crate) fn sample_clock(&mut self, timestamp_ms: f64) {
        let seconds = timestamp_ms * 0.001;
        if seconds.is_finite() && seconds > self.elapsed {
            self.elapsed = seconds;
        }
    }
}

/// Position on a circular orbit in the XZ plane.
///
/// The angle comes straight from absolute time, so it carries no memory
/// of previous speed factors.
pub fn orbital_position(orbit_radius: f64, elapsed: f64, speed: f64, rate: f64) -> DVec3 {
    let angle = elapsed * speed * rate;
    DVec3::new(orbit_radius * angle.cos(), 0.0, orbit_radius * angle.sin())
}

/// Advances every body's transform for one tick.
///
/// Does nothing to the bodies while paused; they keep whatever
/// transform the last running tick left them with.
pub(crate) fn animate(registry: &mut BodyRegistry, state: &AnimationState, orbital_rate: f64) {
    if !state.is_running() {
        return;
    }

    let elapsed = state.elapsed();
    for body in registry.iter_mut() {
        body.transform.spin += body.rotation_rate();

        if body.is_luminous() {
            continue;
        }

        body.transform.position = orbital_position(
            body.orbit_radius(),
            elapsed,
            body.speed_factor().get(),
            orbital_rate,
        );
    }
}
