use log::{debug, warn};
use three_d::{
    Context as ThreeDContext, Event as ThreeDEvent, GUI, Viewport,
    egui::{Context as EguiContext, OutputCommand, Vec2},
};

use crate::sim::Orrery;

mod bottom_bar;
mod speeds;

macro_rules! declare_id {
    ($name:ident, $val:expr) => {
        ::pastey::paste! {
            const [<$name _SALT>]: ::core::num::NonZeroU64 =
                ::core::num::NonZeroU64::new(u64::from_be_bytes(*$val)).unwrap();
            const [<$name _ID>]: ::std::sync::LazyLock<::three_d::egui::Id> =
                ::std::sync::LazyLock::new(|| ::three_d::egui::Id::new([<$name _SALT>]));
        }
    };
}

declare_id!(BOTTOM_PANEL, b"OrbPanel");
declare_id!(SPEEDS_WINDOW, b"OrbSpeed");

const MIN_TOUCH_TARGET_LEN: f32 = 48.0;
const MIN_TOUCH_TARGET_VEC: Vec2 = Vec2::splat(MIN_TOUCH_TARGET_LEN);

/// State owned by the GUI alone. Simulation state lives in [`Orrery`].
pub(crate) struct UiState {
    speeds_window_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            speeds_window_open: true,
        }
    }
}

pub(crate) fn create(context: &ThreeDContext) -> GUI {
    let gui = GUI::new(context);
    egui_extras::install_image_loaders(gui.context());
    gui
}

/// Runs the GUI for one frame. Events it consumes are marked handled.
pub(crate) fn update(
    gui: &mut GUI,
    ui_state: &mut UiState,
    orrery: &mut Orrery,
    events: &mut Vec<ThreeDEvent>,
    accumulated_time_ms: f64,
    viewport: Viewport,
    device_pixel_ratio: f32,
) {
    gui.update(
        events,
        accumulated_time_ms,
        viewport,
        device_pixel_ratio,
        |ctx| handle_ui(ctx, ui_state, orrery),
    );
}

fn handle_ui(ctx: &EguiContext, ui_state: &mut UiState, orrery: &mut Orrery) {
    bottom_bar::bottom_bar(ctx, ui_state, orrery);
    speeds::speeds_window(ctx, &mut ui_state.speeds_window_open, orrery);
    ctx.output(|output| {
        for command in &output.commands {
            handle_command(command);
        }
    });
}

fn handle_command(command: &OutputCommand) {
    match command {
        OutputCommand::CopyText(text) => copy_text(text),
        OutputCommand::CopyImage(_) => warn!("copying images is not supported"),
        OutputCommand::OpenUrl(url) => debug!("ignoring request to open '{}'", url.url),
    }
}

/// Copies selected label text, e.g. the clock.
fn copy_text(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text.to_owned()) {
                warn!("failed to set clipboard text: {e}");
            }
        }
        Err(e) => warn!("failed to open clipboard: {e}"),
    }
}
