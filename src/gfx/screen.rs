use log::error;
use three_d::{
    Camera, ClearState, ColorMapping, GUI, RenderTarget, ToneMapping, Viewport, degrees,
};

use super::{scene::SceneGraph, to_vec3};
use crate::{
    control::CameraView,
    sim::{RenderSink, registry::BodyRegistry},
};

/// Draws each tick to the window, with the GUI on top.
pub struct ScreenSink<'a> {
    pub target: RenderTarget<'a>,
    pub camera: &'a mut Camera,
    pub scene: &'a mut SceneGraph,
    pub gui: &'a GUI,
}

impl RenderSink for ScreenSink<'_> {
    fn render(&mut self, registry: &BodyRegistry, view: &CameraView) {
        self.scene.sync(registry);
        apply_view(self.camera, view);

        let result = self
            .target
            .clear(ClearState::color_and_depth(0.0, 0.0, 0.0, 1.0, 1.0))
            .render(&*self.camera, self.scene.objects(), &self.scene.lights())
            .write(|| self.gui.render());
        if let Err(e) = result {
            error!("failed to draw the GUI: {e}");
        }
    }
}

/// Creates the GPU camera for `view`, with ACES filmic tone mapping and
/// sRGB output.
pub fn new_camera(view: &CameraView) -> Camera {
    let mut camera = Camera::new_perspective(
        Viewport::new_at_origo(view.width, view.height),
        to_vec3(view.eye),
        to_vec3(view.target),
        to_vec3(view.up),
        degrees(view.fov_degrees as f32),
        view.near as f32,
        view.far as f32,
    );
    camera.tone_mapping = ToneMapping::Aces;
    camera.color_mapping = ColorMapping::ComputeToSrgb;
    camera
}

/// Points the GPU camera along `view`. The viewport follows the last resize.
pub fn apply_view(camera: &mut Camera, view: &CameraView) {
    camera.set_viewport(Viewport::new_at_origo(view.width, view.height));
    camera.set_view(to_vec3(view.eye), to_vec3(view.target), to_vec3(view.up));
    camera.set_perspective_projection(
        degrees(view.fov_degrees as f32),
        view.near as f32,
        view.far as f32,
    );
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{cfg::CameraConfig, control::CameraRig};

    fn view(width: u32, height: u32) -> CameraView {
        CameraRig::new(&CameraConfig::default(), width, height).view()
    }

    #[test]
    fn camera_uses_filmic_srgb_output() {
        let camera = new_camera(&view(1280, 720));
        assert!(matches!(camera.tone_mapping, ToneMapping::Aces));
        assert!(matches!(camera.color_mapping, ColorMapping::ComputeToSrgb));
        assert_abs_diff_eq!(camera.position().z, 200.0, epsilon = 1e-3);
    }

    #[test]
    fn applied_view_follows_resize() {
        let mut camera = new_camera(&view(1280, 720));
        apply_view(&mut camera, &view(600, 400));
        assert_eq!(camera.viewport(), Viewport::new_at_origo(600, 400));
    }
}
