use three_d::egui::{Align2, Context, Slider, Ui, Window};

use super::SPEEDS_WINDOW_ID;
use crate::sim::{Orrery, body::SpeedFactor};

const SLIDER_STEP: f64 = 0.1;

/// One slider per orbiting body, in table order.
pub(super) fn speeds_window(ctx: &Context, open: &mut bool, orrery: &mut Orrery) {
    Window::new("Orbital speeds")
        .id(*SPEEDS_WINDOW_ID)
        .open(open)
        .anchor(Align2::RIGHT_TOP, [-12.0, 12.0])
        .resizable(false)
        .collapsible(true)
        .show(ctx, |ui| speed_sliders(ui, orrery));
}

fn speed_sliders(ui: &mut Ui, orrery: &mut Orrery) {
    let rows: Vec<(String, f64)> = orrery
        .registry()
        .orbiting()
        .map(|body| (body.id().to_owned(), body.speed_factor().get()))
        .collect();

    for (id, mut value) in rows {
        let slider = Slider::new(&mut value, SpeedFactor::RANGE)
            .step_by(SLIDER_STEP)
            .text(display_name(&id));
        if ui.add(slider).changed() {
            // Logged by the control surface.
            let _ = orrery.controls().set_speed_factor(&id, value);
        }
    }
}

/// `"earth"` becomes `"Earth"`.
fn display_name(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
