use three_d::egui::{
    Color32, Context, CornerRadius, Frame, Image, ImageButton, Label, Margin, RichText, Stroke,
    TopBottomPanel, Ui, Vec2,
};

use super::{BOTTOM_PANEL_ID, MIN_TOUCH_TARGET_LEN, MIN_TOUCH_TARGET_VEC, UiState};
use crate::{assets, sim::Orrery, time::format_clock};

pub(super) fn bottom_bar(ctx: &Context, ui_state: &mut UiState, orrery: &mut Orrery) {
    let height = 64.0;
    TopBottomPanel::bottom(*BOTTOM_PANEL_ID)
        .show_separator_line(false)
        .exact_height(height)
        .frame(Frame {
            inner_margin: Margin {
                top: 8,
                ..Default::default()
            },
            fill: Color32::from_black_alpha(192),
            ..Default::default()
        })
        .show(ctx, |ui| {
            ui.horizontal(|ui| bottom_panel_contents(ui, ui_state, orrery))
        });
}

fn bottom_panel_contents(ui: &mut Ui, ui_state: &mut UiState, orrery: &mut Orrery) {
    ui.set_height(MIN_TOUCH_TARGET_LEN);
    ui.add_space(16.0);
    pause_button(ui, orrery);
    ui.add_space(8.0);
    clock(ui, orrery);
    ui.add_space(12.0);
    ui.separator();
    ui.add_space(12.0);
    ui.toggle_value(
        &mut ui_state.speeds_window_open,
        RichText::new("Speeds").color(Color32::WHITE).size(16.0),
    );
}

fn pause_button(ui: &mut Ui, orrery: &mut Orrery) {
    let run_state = orrery.run_state();
    let image: &Image<'static> = if run_state.is_running() {
        &*assets::PAUSED_IMAGE
    } else {
        &*assets::PLAY_IMAGE
    };

    let hover_string = format!(
        "Currently {run_state}\nClick/tap or press Space to {}",
        run_state.action_label().to_lowercase()
    );
    let hover_text = RichText::new(hover_string).color(Color32::WHITE).size(16.0);

    ui.scope(|ui| {
        ui.spacing_mut().button_padding = Vec2::ZERO;
        let widget_styles = &mut ui.visuals_mut().widgets;
        widget_styles.inactive.weak_bg_fill = Color32::TRANSPARENT;
        widget_styles.inactive.bg_stroke = Stroke::NONE;
        widget_styles.hovered.weak_bg_fill = Color32::from_white_alpha(16);
        widget_styles.hovered.bg_stroke = Stroke::NONE;
        widget_styles.active.weak_bg_fill = Color32::from_white_alpha(64);

        let button = ImageButton::new(image.clone().max_size(MIN_TOUCH_TARGET_VEC))
            .corner_radius(CornerRadius::same(MIN_TOUCH_TARGET_LEN as u8));

        if ui.add(button).on_hover_text(hover_text).clicked() {
            orrery.controls().toggle_pause();
        }
    });

    let label = RichText::new(run_state.action_label())
        .color(Color32::WHITE)
        .size(16.0);
    ui.add(Label::new(label).selectable(false));
}

fn clock(ui: &mut Ui, orrery: &Orrery) {
    let text = RichText::new(format_clock(orrery.elapsed()))
        .monospace()
        .color(Color32::WHITE)
        .size(16.0);
    // Selectable so the time can be copied.
    ui.add(Label::new(text).selectable(true))
        .on_hover_text("Time since start. Keeps running while paused.");
}
