use rand::RngCore;

use crate::{
    canvas::Color,
    integrator::Integrator,
    march::{march, MarchConfig},
    ray::Ray,
    scene::{NodeId, Scene},
};

/// Colors each hit by its surface normal, mapping each axis from `[-1, 1]` onto `[0, 255]`.
/// Misses are black.
pub struct DebugNormals {
    pub march: MarchConfig,
}

impl DebugNormals {
    pub fn new(march: MarchConfig) -> Self {
        Self { march }
    }
}

impl Integrator for DebugNormals {
    fn luminance(&self, scene: &Scene, root: NodeId, ray: Ray, _rng: &mut dyn RngCore) -> Color {
        if let Some(dist) = march(&self.march, scene, root, &ray).hit() {
            let normal = scene.normal(root, &ray.at(dist));
            Color::new(
                0.5 + normal.x / 2.0,
                0.5 + normal.y / 2.0,
                0.5 + normal.z / 2.0,
            ) * Color::MAX_CHANNEL
        } else {
            Color::black()
        }
    }
}

#[test]
fn test_debug_normals() {
    use crate::scene::Light;
    use nalgebra::{Point3, Vector3};
    use rand::{rngs::StdRng, SeedableRng};

    let mut scene = Scene::new(Light::Directional {
        direction: Vector3::y_axis(),
        color: Color::splat(255.),
    });
    let root = scene.sphere(1.);
    let mut rng = StdRng::seed_from_u64(0);
    let integrator = DebugNormals::new(MarchConfig::default());

    let ray = Ray::new(Point3::new(0., 0., -3.), Vector3::z_axis());
    let c = integrator.luminance(&scene, root, ray, &mut rng);
    approx::assert_abs_diff_eq!(127.5, c.r, epsilon = 1e-3);
    approx::assert_abs_diff_eq!(127.5, c.g, epsilon = 1e-3);
    approx::assert_abs_diff_eq!(0., c.b, epsilon = 1e-3);

    let ray = Ray::new(Point3::new(0., 0., -3.), -Vector3::z_axis());
    assert!(integrator.luminance(&scene, root, ray, &mut rng).is_black());
}
