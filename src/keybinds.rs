use log::debug;
use three_d::{Event, Key};

use crate::sim::Orrery;

/// Applies keyboard shortcuts. Skipped while a text field has focus.
pub(crate) fn handle_keybinds(orrery: &mut Orrery, events: &mut [Event], wants_keyboard: bool) {
    if wants_keyboard {
        return;
    }
    for event in events {
        if let Event::KeyPress { kind, handled, .. } = event {
            handle_keypress(orrery, *kind, handled);
        }
    }
}

fn handle_keypress(orrery: &mut Orrery, key: Key, handled: &mut bool) {
    if *handled {
        return;
    }

    if key == Key::Space {
        let state = orrery.controls().toggle_pause();
        debug!("space pressed, animation {state}");
        *handled = true;
    }
}

#[cfg(test)]
mod tests {
    use three_d::Modifiers;

    use super::*;
    use crate::{
        cfg::OrreryConfig, control::CameraRig, sim::animation::RunState,
        sim::registry::BodyRegistry,
    };

    fn orrery() -> Orrery {
        let config = OrreryConfig::default();
        Orrery::new(
            BodyRegistry::from_specs(&config.bodies).unwrap(),
            CameraRig::new(&config.camera, 640, 480),
            config.orbital_rate,
        )
    }

    fn press(key: Key) -> Event {
        Event::KeyPress {
            kind: key,
            modifiers: Modifiers::default(),
            handled: false,
        }
    }

    #[test]
    fn space_toggles_pause() {
        let mut orrery = orrery();
        let mut events = [press(Key::Space)];
        handle_keybinds(&mut orrery, &mut events, false);
        assert_eq!(orrery.run_state(), RunState::Paused);
        assert!(matches!(events[0], Event::KeyPress { handled: true, .. }));

        // Already handled: no second toggle.
        handle_keybinds(&mut orrery, &mut events, false);
        assert_eq!(orrery.run_state(), RunState::Paused);
    }

    #[test]
    fn ignored_while_typing() {
        let mut orrery = orrery();
        let mut events = [press(Key::Space), press(Key::A)];
        handle_keybinds(&mut orrery, &mut events, true);
        assert_eq!(orrery.run_state(), RunState::Running);
    }
}
