pub mod animation;
pub mod body;
pub mod controls;
pub mod registry;
pub mod world;

use crate::{
    control::{CameraRig, CameraView},
    time::FrameSource,
};

use self::{
    animation::{AnimationState, RunState, animate},
    controls::ControlSurface,
    registry::BodyRegistry,
};

/// Receives the finished state of every tick.
///
/// This is the boundary to the renderer. Nothing is returned.
pub trait RenderSink {
    fn render(&mut self, registry: &BodyRegistry, view: &CameraView);
}

/// All mutable simulation state, owned in one place.
///
/// Input handlers and the frame tick both take `&mut Orrery`. They run on
/// one thread and never overlap, so no locking is needed; a port to a
/// multi-threaded scheduler would need a mutex or a command queue here.
#[derive(Clone, Debug)]
pub struct Orrery {
    registry: BodyRegistry,
    animation: AnimationState,
    camera: CameraRig,
    orbital_rate: f64,
}

impl Orrery {
    pub fn new(registry: BodyRegistry, camera: CameraRig, orbital_rate: f64) -> Self {
        Self {
            registry,
            animation: AnimationState::default(),
            camera,
            orbital_rate,
        }
    }

    /// Runs one frame: advances the bodies (unless paused), eases the
    /// camera and hands the result to `sink`.
    ///
    /// `timestamp_ms` is the frame clock in milliseconds.
    pub fn tick(&mut self, timestamp_ms: f64, sink: &mut impl RenderSink) {
        self.animation.sample_clock(timestamp_ms);
        animate(&mut self.registry, &self.animation, self.orbital_rate);
        self.camera.update();
        sink.render(&self.registry, &self.camera.view());
    }

    /// Ticks once per frame until `frames` runs out.
    pub fn run(&mut self, frames: &mut impl FrameSource, sink: &mut impl RenderSink) -> u64 {
        let mut ticks = 0;
        while let Some(timestamp) = frames.next_frame() {
            self.tick(timestamp, sink);
            ticks += 1;
        }
        ticks
    }

    /// Borrows the speed and pause controls.
    pub fn controls(&mut self) -> ControlSurface<'_> {
        ControlSurface::new(&mut self.registry, &mut self.animation)
    }

    /// Applies a viewport resize; takes effect on the next render.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    #[inline]
    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    #[inline]
    pub fn run_state(&self) -> RunState {
        self.animation.run_state()
    }

    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.animation.elapsed()
    }

    #[inline]
    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }
}
