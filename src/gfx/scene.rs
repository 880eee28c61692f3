use log::{info, warn};
use three_d::{
    AmbientLight, Attenuation, ColorMaterial, Context, CpuMaterial, CpuMesh, CpuTexture, Cull,
    DirectionalLight, Gm, Light, Mat4, Mesh, Object, PhysicalMaterial, PointLight, Skybox, Srgba,
    radians, vec3,
};

use super::{orbit_path::annulus_mesh, to_vec3};
use crate::{
    assets::textures::load_texture,
    sim::{
        body::Body,
        registry::{BodyRegistry, Id},
        world::WorldPlan,
    },
};

/// Angular subdivisions of the body sphere mesh.
const SPHERE_SUBDIVISIONS: u32 = 32;

const ORBITING_ROUGHNESS: f32 = 0.8;
const ORBITING_METALLIC: f32 = 0.0;

/// The render node of one body.
///
/// The luminous body ignores scene lighting; everything else is lit.
enum BodyNode {
    Luminous(Gm<Mesh, ColorMaterial>),
    Lit(Gm<Mesh, PhysicalMaterial>),
}

impl BodyNode {
    fn set_transformation(&mut self, transformation: Mat4) {
        match self {
            Self::Luminous(gm) => gm.set_transformation(transformation),
            Self::Lit(gm) => gm.set_transformation(transformation),
        }
    }

    fn as_object(&self) -> &dyn Object {
        match self {
            Self::Luminous(gm) => gm,
            Self::Lit(gm) => gm,
        }
    }
}

/// GPU-side scene: one node per body, the orbit rings, lights and background.
///
/// Built once from a [`WorldPlan`]. Only body transforms change afterwards.
pub struct SceneGraph {
    bodies: Vec<(Id, BodyNode)>,
    rings: Vec<Gm<Mesh, ColorMaterial>>,
    skybox: Option<Skybox>,
    ambient: AmbientLight,
    directional: DirectionalLight,
    point: PointLight,
}

impl SceneGraph {
    pub fn build(context: &Context, plan: &WorldPlan) -> Self {
        let sphere = CpuMesh::sphere(SPHERE_SUBDIVISIONS);

        let bodies = plan
            .registry
            .iter()
            .enumerate()
            .map(|(id, body)| {
                let node = Self::body_node(context, plan, body, Mesh::new(context, &sphere));
                (id, node)
            })
            .collect();

        let rings = plan
            .orbit_paths
            .iter()
            .map(|path| {
                let mut material = ColorMaterial::new_opaque(
                    context,
                    &CpuMaterial {
                        albedo: Srgba::WHITE,
                        ..Default::default()
                    },
                );
                material.render_states.cull = Cull::None;
                Gm::new(Mesh::new(context, &annulus_mesh(path)), material)
            })
            .collect();

        let skybox = plan.background.as_deref().and_then(|reference| {
            match load_texture(&plan.asset_root, reference) {
                Ok(texture) => Some(Skybox::new_from_equirectangular(context, &texture)),
                Err(e) => {
                    warn!("{e}; rendering without a background");
                    None
                }
            }
        });

        let lighting = &plan.lighting;
        let [dx, dy, dz] = lighting.directional_direction;
        let [constant, linear, quadratic] = lighting.point_attenuation;

        info!(
            "scene built: {} bodies, {} orbit rings",
            plan.registry.len(),
            plan.orbit_paths.len()
        );

        Self {
            bodies,
            rings,
            skybox,
            ambient: AmbientLight::new(context, lighting.ambient_intensity, Srgba::WHITE),
            directional: DirectionalLight::new(
                context,
                lighting.directional_intensity,
                Srgba::WHITE,
                vec3(dx, dy, dz),
            ),
            point: PointLight::new(
                context,
                lighting.point_intensity,
                Srgba::WHITE,
                vec3(0.0, 0.0, 0.0),
                Attenuation {
                    constant,
                    linear,
                    quadratic,
                },
            ),
        }
    }

    fn body_node(context: &Context, plan: &WorldPlan, body: &Body, sphere: Mesh) -> BodyNode {
        let texture = body.texture().and_then(|reference| {
            load_texture(&plan.asset_root, reference)
                .inspect_err(|e| warn!("{e}; drawing {} with a flat color", body.id()))
                .ok()
        });
        let material = body_material(body, texture);

        let mut node = if body.is_luminous() {
            BodyNode::Luminous(Gm::new(sphere, ColorMaterial::new_opaque(context, &material)))
        } else {
            BodyNode::Lit(Gm::new(
                sphere,
                PhysicalMaterial::new_opaque(context, &material),
            ))
        };
        node.set_transformation(body_matrix(body));
        node
    }

    /// Copies the simulated transforms onto the render nodes.
    pub fn sync(&mut self, registry: &BodyRegistry) {
        for (id, node) in &mut self.bodies {
            if let Some(body) = registry.get(*id) {
                node.set_transformation(body_matrix(body));
            }
        }
    }

    /// Everything to draw this frame, background first.
    pub fn objects(&self) -> Vec<&dyn Object> {
        let mut objects: Vec<&dyn Object> =
            Vec::with_capacity(1 + self.rings.len() + self.bodies.len());
        if let Some(skybox) = &self.skybox {
            objects.push(skybox);
        }
        objects.extend(self.rings.iter().map(|ring| ring as &dyn Object));
        objects.extend(self.bodies.iter().map(|(_, node)| node.as_object()));
        objects
    }

    pub fn lights(&self) -> [&dyn Light; 3] {
        [&self.ambient, &self.directional, &self.point]
    }
}

/// White albedo under a texture, the body's own color without one.
fn body_material(body: &Body, texture: Option<CpuTexture>) -> CpuMaterial {
    let [r, g, b] = body.color();
    let albedo = if texture.is_some() {
        Srgba::WHITE
    } else {
        Srgba::new_opaque(r, g, b)
    };
    CpuMaterial {
        albedo,
        albedo_texture: texture,
        roughness: ORBITING_ROUGHNESS,
        metallic: ORBITING_METALLIC,
        ..Default::default()
    }
}

/// Translation, then spin about Y, then uniform scale of the unit sphere.
fn body_matrix(body: &Body) -> Mat4 {
    let transform = body.transform();
    Mat4::from_translation(to_vec3(transform.position))
        * Mat4::from_angle_y(radians(transform.spin as f32))
        * Mat4::from_scale(body.base_radius() as f32)
}
