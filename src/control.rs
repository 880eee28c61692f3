use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec3;
use three_d::{Event, MouseButton};

use crate::cfg::CameraConfig;

/// Keeps the camera this far (in radians) from either pole.
const POLE_MARGIN: f64 = 1e-3;
const MAX_PITCH: f64 = FRAC_PI_2 - POLE_MARGIN;

/// Zoom exponent per pixel of scroll.
const WHEEL_ZOOM_SPEED: f64 = 0.002;

/// Below this, pending motion is considered settled.
const SETTLE_EPSILON: f64 = 1e-12;

/// Everything the renderer needs to know about the viewpoint for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    pub eye: DVec3,
    pub target: DVec3,
    pub up: DVec3,
    pub fov_degrees: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub width: u32,
    pub height: u32,
}

///
/// A perspective camera orbiting the system center.
///
/// Drags and zooms are not applied immediately. Each input adds to a
/// pending delta, and every [`CameraRig::update`] applies a fixed fraction
/// (the damping factor) of what is still pending. The camera therefore
/// eases toward its target and can never pass it.
///
#[derive(Clone, Debug, PartialEq)]
pub struct CameraRig {
    yaw: f64,
    pitch: f64,
    distance: f64,

    pending_yaw: f64,
    pending_pitch: f64,
    desired_distance: f64,

    min_distance: f64,
    max_distance: f64,
    damping: f64,

    fov_degrees: f64,
    near: f64,
    far: f64,
    width: u32,
    height: u32,
}

impl CameraRig {
    /// Creates a rig looking at the origin from `+Z`.
    pub fn new(config: &CameraConfig, width: u32, height: u32) -> Self {
        let distance = config
            .distance
            .clamp(config.min_distance, config.max_distance);
        Self {
            yaw: 0.0,
            pitch: config.pitch.clamp(-MAX_PITCH, MAX_PITCH),
            distance,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            desired_distance: distance,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            damping: config.damping.clamp(0.0, 1.0),
            fov_degrees: config.fov_degrees,
            near: config.near,
            far: config.far,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Handles pointer input. Events already handled (e.g. by the GUI) are skipped.
    pub fn handle_events(&mut self, events: &mut [Event]) {
        for event in events.iter_mut() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: &mut Event) {
        match event {
            Event::MouseMotion {
                delta,
                button,
                handled,
                ..
            } => {
                if *handled || *button != Some(MouseButton::Left) {
                    return;
                }
                self.drag(delta.0 as f64, delta.1 as f64);
                *handled = true;
            }
            Event::MouseWheel { delta, handled, .. } => {
                if *handled {
                    return;
                }
                self.zoom(delta.1 as f64 * -WHEEL_ZOOM_SPEED);
                *handled = true;
            }
            Event::PinchGesture { delta, handled, .. } => {
                if *handled {
                    return;
                }
                self.zoom(-*delta as f64);
                *handled = true;
            }
            _ => {}
        }
    }

    /// Converts a pointer drag in pixels into a pending rotation.
    ///
    /// Dragging across the full viewport height turns the camera once around.
    pub fn drag(&mut self, dx: f64, dy: f64) {
        let per_pixel = TAU / self.height as f64;
        self.rotate(-dx * per_pixel, dy * per_pixel);
    }

    /// Adds a rotation, in radians, to the pending delta.
    pub fn rotate(&mut self, yaw: f64, pitch: f64) {
        if yaw.is_finite() {
            self.pending_yaw += yaw;
        }
        if pitch.is_finite() {
            self.pending_pitch += pitch;
        }
    }

    /// Scales the desired distance by `exp(delta)`.
    pub fn zoom(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        self.desired_distance =
            (self.desired_distance * delta.exp()).clamp(self.min_distance, self.max_distance);
    }

    /// Applies one tick of damping. Must be called every frame, paused or not.
    pub fn update(&mut self) {
        let yaw_step = self.pending_yaw * self.damping;
        self.yaw = (self.yaw + yaw_step).rem_euclid(TAU);
        self.pending_yaw -= yaw_step;

        let pitch_step = self.pending_pitch * self.damping;
        let pitch = self.pitch + pitch_step;
        if pitch.abs() >= MAX_PITCH {
            self.pitch = pitch.clamp(-MAX_PITCH, MAX_PITCH);
            self.pending_pitch = 0.0;
        } else {
            self.pitch = pitch;
            self.pending_pitch -= pitch_step;
        }

        self.distance += (self.desired_distance - self.distance) * self.damping;

        if self.pending_yaw.abs() < SETTLE_EPSILON {
            self.pending_yaw = 0.0;
        }
        if self.pending_pitch.abs() < SETTLE_EPSILON {
            self.pending_pitch = 0.0;
        }
    }

    /// Records a new output surface size. Zero sizes are bumped to one pixel.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    #[inline]
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The orientation currently rendered, as `(yaw, pitch)` in radians.
    #[inline]
    pub fn orientation(&self) -> (f64, f64) {
        (self.yaw, self.pitch)
    }

    /// Rotation still waiting to be applied, as `(yaw, pitch)`.
    #[inline]
    pub fn pending(&self) -> (f64, f64) {
        (self.pending_yaw, self.pending_pitch)
    }

    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn eye(&self) -> DVec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        DVec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            eye: self.eye(),
            target: DVec3::ZERO,
            up: DVec3::Y,
            fov_degrees: self.fov_degrees,
            aspect: self.aspect(),
            near: self.near,
            far: self.far,
            width: self.width,
            height: self.height,
        }
    }
}
