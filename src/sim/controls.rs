use log::{debug, warn};

use super::{
    animation::{AnimationState, RunState},
    body::SpeedFactor,
    registry::BodyRegistry,
};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ControlError {
    #[error("no body named {0:?}")]
    MissingBody(String),
    #[error("speed factor for {0:?} is not a number")]
    NotANumber(String),
}

/// Write access to the shared animation parameters.
///
/// Borrowed from [`super::Orrery`] by input handlers between ticks. Writes
/// land directly in the registry and animation state, so the next tick
/// reads them; there is no queue.
pub struct ControlSurface<'a> {
    registry: &'a mut BodyRegistry,
    state: &'a mut AnimationState,
}

impl<'a> ControlSurface<'a> {
    pub(crate) fn new(registry: &'a mut BodyRegistry, state: &'a mut AnimationState) -> Self {
        Self { registry, state }
    }

    /// Sets the speed factor of the named body, clamped into range.
    ///
    /// Returns the stored value. Unknown bodies and NaN are logged and
    /// otherwise ignored.
    pub fn set_speed_factor(&mut self, id: &str, value: f64) -> Result<SpeedFactor, ControlError> {
        let Some(body) = self.registry.get_by_name_mut(id) else {
            warn!("speed change for unknown body {id:?} ignored");
            return Err(ControlError::MissingBody(id.to_owned()));
        };

        let Some(speed) = SpeedFactor::new(value) else {
            warn!("speed change for {id:?} ignored: value is NaN");
            return Err(ControlError::NotANumber(id.to_owned()));
        };

        debug!("speed of {id:?} set to {}", speed.get());
        body.speed = speed;
        Ok(speed)
    }

    /// Flips the pause gate and returns the new state.
    pub fn toggle_pause(&mut self) -> RunState {
        self.state.run_state = self.state.run_state.toggled();
        debug!("animation {}", self.state.run_state);
        self.state.run_state
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state()
    }
}
