use rand::RngCore;

use crate::{
    canvas::Color,
    integrator::Integrator,
    lighting,
    march::{march, MarchConfig},
    ray::Ray,
    sampler,
    scene::{NodeId, Scene},
};

/// A path tracer that follows a single diffuse bounce path per sample, adding the direct light
/// seen at every vertex filtered through the surfaces hit on the way.
#[derive(Debug, Clone)]
pub struct PathTracer {
    pub march: MarchConfig,

    /// The maximum number of surfaces a path visits.
    pub max_bounces: u32,

    /// Scales the albedo at every bounce; below `1.0` even a white surface loses energy.
    pub attenuation: f32,

    /// The color of primary rays that hit nothing.
    pub background: Color,

    /// When set, every channel of the result is clamped to this value. This hides fireflies from
    /// paths that graze the light, at the cost of energy.
    pub clamp: Option<f32>,
}

impl Default for PathTracer {
    fn default() -> Self {
        Self {
            march: MarchConfig::default(),
            max_bounces: 4,
            attenuation: 0.8,
            background: Color::splat(Color::MAX_CHANNEL),
            clamp: None,
        }
    }
}

impl Integrator for PathTracer {
    fn luminance(&self, scene: &Scene, root: NodeId, mut ray: Ray, rng: &mut dyn RngCore) -> Color {
        let mut total = Color::black();
        let mut mask = Color::splat(1.);

        for bounce in 0..self.max_bounces {
            let Some(dist) = march(&self.march, scene, root, &ray).hit() else {
                if bounce == 0 {
                    return self.background;
                }
                break;
            };

            let point = ray.at(dist);
            let normal = scene.normal(root, &point);
            let albedo = scene.albedo(root, &point);
            let direct = lighting::lambert(&self.march, scene, root, &point, &normal);

            mask *= albedo * self.attenuation;
            total += mask * direct;

            ray = Ray::new(point, sampler::bounce_direction(&normal, rng));
        }

        match self.clamp {
            Some(max) => total.clamp_max(max),
            None => total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Light;
    use approx::assert_abs_diff_eq;
    use nalgebra::{Point3, Vector3};
    use rand::{rngs::StdRng, SeedableRng};

    fn sun_scene() -> Scene {
        Scene::new(Light::Directional {
            direction: Vector3::y_axis(),
            color: Color::splat(255.),
        })
    }

    #[test]
    fn test_primary_miss_is_background() {
        let mut scene = sun_scene();
        let root = scene.sphere(1.);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new(Point3::new(0., 0., -3.), -Vector3::z_axis());
        let c = PathTracer::default().luminance(&scene, root, ray, &mut rng);
        assert_eq!(Color::splat(255.), c);
    }

    #[test]
    fn test_single_bounce_direct_light() {
        let mut scene = sun_scene();
        let root = scene.plane(Vector3::y_axis(), 0.);
        let mut rng = StdRng::seed_from_u64(0);

        let tracer = PathTracer {
            max_bounces: 1,
            ..PathTracer::default()
        };

        // straight down onto a floor lit from directly above
        let ray = Ray::new(Point3::new(0., 2., 0.), -Vector3::y_axis());
        let c = tracer.luminance(&scene, root, ray, &mut rng);
        assert_abs_diff_eq!(0.8 * 255., c.r, epsilon = 1e-2);
        assert_abs_diff_eq!(0.8 * 255., c.b, epsilon = 1e-2);
    }

    #[test]
    fn test_albedo_filters_light() {
        let mut scene = sun_scene();
        let red = scene.diffuse(Color::new(1., 0.5, 0.));
        let floor = scene.plane(Vector3::y_axis(), 0.);
        let root = scene.paint(red, floor);
        let mut rng = StdRng::seed_from_u64(0);

        let tracer = PathTracer {
            max_bounces: 1,
            ..PathTracer::default()
        };

        let ray = Ray::new(Point3::new(0., 2., 0.), -Vector3::y_axis());
        let c = tracer.luminance(&scene, root, ray, &mut rng);
        assert_abs_diff_eq!(0.8 * 255., c.r, epsilon = 1e-2);
        assert_abs_diff_eq!(0.4 * 255., c.g, epsilon = 1e-2);
        assert_eq!(0., c.b);
    }

    #[test]
    fn test_escaping_bounce_keeps_partial_light() {
        let mut scene = sun_scene();
        let root = scene.plane(Vector3::y_axis(), 0.);
        let mut rng = StdRng::seed_from_u64(0);

        // bounces off a lone floor head for the sky; a later miss keeps the light gathered so far
        // instead of returning the background
        let ray = Ray::new(Point3::new(0., 2., 0.), -Vector3::y_axis());
        let c = PathTracer::default().luminance(&scene, root, ray, &mut rng);
        assert!(c.g >= 0.8 * 255. - 1e-2);
        assert_ne!(Color::splat(255.), c);
    }

    #[test]
    fn test_clamp() {
        let mut scene = sun_scene();
        let root = scene.plane(Vector3::y_axis(), 0.);
        let mut rng = StdRng::seed_from_u64(0);

        let tracer = PathTracer {
            clamp: Some(100.),
            ..PathTracer::default()
        };

        let ray = Ray::new(Point3::new(0., 2., 0.), -Vector3::y_axis());
        let c = tracer.luminance(&scene, root, ray, &mut rng);
        assert_eq!(Color::splat(100.), c);
    }
}
