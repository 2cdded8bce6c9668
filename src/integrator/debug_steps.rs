use rand::RngCore;

use crate::{
    canvas::Color,
    integrator::Integrator,
    march::{march, MarchConfig},
    ray::Ray,
    scene::{NodeId, Scene},
};

/// This is an integrator that will color an image by the number of steps it takes to reach a point
/// in the scene. Running out of fuel or escaping the bounds of the scene will be reported as
/// black.
///
/// Averaging several samples per pixel gives the average number of steps for that pixel.
pub struct DebugSteps {
    pub march: MarchConfig,
}

impl DebugSteps {
    pub fn new(march: MarchConfig) -> Self {
        Self { march }
    }
}

impl Integrator for DebugSteps {
    fn luminance(&self, scene: &Scene, root: NodeId, ray: Ray, _rng: &mut dyn RngCore) -> Color {
        let res = march(&self.march, scene, root, &ray);
        if res.hit().is_some() {
            let step_val = 1.0 - (res.steps as f32) / (self.march.max_steps as f32);
            Color::new(step_val, 0.0, step_val) * Color::MAX_CHANNEL
        } else {
            Color::black()
        }
    }
}

#[test]
fn test_debug_steps() {
    use crate::scene::Light;
    use nalgebra::{Point3, Vector3};
    use rand::{rngs::StdRng, SeedableRng};

    let mut scene = Scene::new(Light::Directional {
        direction: Vector3::y_axis(),
        color: Color::splat(255.),
    });
    let root = scene.sphere(1.);
    let mut rng = StdRng::seed_from_u64(0);
    let integrator = DebugSteps::new(MarchConfig::default());

    // a head-on ray reaches the sphere in a single step
    let ray = Ray::new(Point3::new(0., 0., -3.), Vector3::z_axis());
    let c = integrator.luminance(&scene, root, ray, &mut rng);
    assert!(c.r > 250.);
    assert_eq!(0., c.g);
}
