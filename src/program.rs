use log::{debug, error, info};
use three_d::{
    Camera, FrameInput, FrameOutput, GUI, Viewport, WindowError,
    window::{Window, WindowSettings},
};

use crate::{
    cfg::OrreryConfig,
    control::CameraRig,
    gfx::{
        scene::SceneGraph,
        screen::{ScreenSink, new_camera},
    },
    gui, keybinds,
    sim::{
        Orrery,
        world::{PlanError, plan_or_default},
    },
};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("error when creating window: {0}")]
    Window(#[from] WindowError),
    #[error("built-in configuration is invalid: {0}")]
    Plan(#[from] PlanError),
}

/// Remembers the last viewport size reported by the window.
///
/// Compares raw sizes, so a minimised (0x0) window is reported once and
/// not on every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ViewportSize {
    last: (u32, u32),
}

impl ViewportSize {
    fn new(viewport: Viewport) -> Self {
        Self {
            last: (viewport.width, viewport.height),
        }
    }

    /// Returns the new size if it differs from the last one seen.
    fn changed(&mut self, viewport: Viewport) -> Option<(u32, u32)> {
        let size = (viewport.width, viewport.height);
        if size == self.last {
            return None;
        }
        self.last = size;
        Some(size)
    }
}

/// The windowed application: input, simulation and rendering for one window.
pub(crate) struct Program {
    window: Option<Window>,
    camera: Camera,
    gui: GUI,
    ui_state: gui::UiState,
    scene: SceneGraph,
    orrery: Orrery,
    viewport_size: ViewportSize,
}

impl Program {
    fn new_window(config: &OrreryConfig) -> Result<Window, WindowError> {
        Window::new(WindowSettings {
            title: config.title.clone(),
            min_size: (64, 64),
            ..Default::default()
        })
    }

    pub(crate) fn new() -> Result<Self, StartupError> {
        let (config, plan) = plan_or_default(OrreryConfig::load())?;
        let window = Self::new_window(&config)?;
        let context = window.gl();
        let viewport = window.viewport();

        let rig = CameraRig::new(&config.camera, viewport.width, viewport.height);
        let camera = new_camera(&rig.view());
        let gui = gui::create(&context);
        let scene = SceneGraph::build(&context, &plan);
        let orrery = Orrery::new(plan.registry, rig, config.orbital_rate);

        info!(
            "orrery ready: {} bodies, viewport {}x{}",
            orrery.registry().len(),
            viewport.width,
            viewport.height
        );

        Ok(Self {
            window: Some(window),
            camera,
            gui,
            ui_state: gui::UiState::default(),
            scene,
            orrery,
            viewport_size: ViewportSize::new(viewport),
        })
    }

    pub(crate) fn run(mut self) {
        if let Some(window) = self.window.take() {
            window.render_loop(move |frame_input| self.tick(frame_input));
        }
    }

    fn tick(&mut self, mut frame_input: FrameInput) -> FrameOutput {
        gui::update(
            &mut self.gui,
            &mut self.ui_state,
            &mut self.orrery,
            &mut frame_input.events,
            frame_input.accumulated_time,
            frame_input.viewport,
            frame_input.device_pixel_ratio,
        );
        keybinds::handle_keybinds(
            &mut self.orrery,
            &mut frame_input.events,
            self.gui.context().wants_keyboard_input(),
        );

        if let Some((width, height)) = self.viewport_size.changed(frame_input.viewport) {
            debug!("viewport resized to {width}x{height}");
            self.orrery.resize(width, height);
        }
        self.orrery
            .camera_mut()
            .handle_events(&mut frame_input.events);

        let mut sink = ScreenSink {
            target: frame_input.screen(),
            camera: &mut self.camera,
            scene: &mut self.scene,
            gui: &self.gui,
        };
        self.orrery.tick(frame_input.accumulated_time, &mut sink);

        FrameOutput::default()
    }
}

/// Builds the window and runs until it is closed.
pub fn run() {
    match Program::new() {
        Ok(program) => program.run(),
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimised_window_reports_once() {
        let mut size = ViewportSize::new(Viewport::new_at_origo(800, 600));
        assert_eq!(size.changed(Viewport::new_at_origo(800, 600)), None);

        assert_eq!(size.changed(Viewport::new_at_origo(0, 0)), Some((0, 0)));
        for _ in 0..10 {
            assert_eq!(size.changed(Viewport::new_at_origo(0, 0)), None);
        }

        assert_eq!(
            size.changed(Viewport::new_at_origo(1024, 768)),
            Some((1024, 768))
        );
    }
}
