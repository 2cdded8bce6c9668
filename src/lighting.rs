use nalgebra::{Point3, Unit, Vector3};

use crate::{
    canvas::Color,
    march::{self, MarchConfig},
    scene::{NodeId, Scene},
};

/// Direct light arriving at `point` from the scene's light, for a Lambertian surface with the
/// given normal. There is no ambient or specular term, so points facing away from the light or
/// hidden from it are black.
pub fn lambert(
    config: &MarchConfig,
    scene: &Scene,
    root: NodeId,
    point: &Point3<f32>,
    normal: &Unit<Vector3<f32>>,
) -> Color {
    let light = &scene.light;

    // direction to the light
    let lightv = light.direction_from(point);

    let light_dot_normal = lightv.dot(normal).max(0.);
    let visible = march::in_shadow(config, scene, root, point, &lightv);

    *light.intensity() * light_dot_normal * visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Light;
    use approx::assert_abs_diff_eq;

    fn scene_with(light: Light) -> (Scene, NodeId) {
        let mut scene = Scene::new(light);
        let floor = scene.plane(Vector3::y_axis(), 0.);
        let ball = scene.sphere(1.);
        let ball = scene.translate(Vector3::new(0., 3., 0.), ball);
        let root = scene.union(vec![floor, ball]);
        (scene, root)
    }

    #[test]
    fn test_lambert_cosine() {
        let (scene, root) = scene_with(Light::Directional {
            direction: Unit::new_normalize(Vector3::new(1., 1., 0.)),
            color: Color::splat(255.),
        });
        let config = MarchConfig::default();

        let c = lambert(&config, &scene, root, &Point3::new(5., 0., 0.), &Vector3::y_axis());
        assert_abs_diff_eq!(255. * std::f32::consts::FRAC_1_SQRT_2, c.r, epsilon = 1e-3);
        assert_eq!(c.r, c.g);
        assert_eq!(c.r, c.b);
    }

    #[test]
    fn test_lambert_facing_away() {
        let (scene, root) = scene_with(Light::Point {
            position: Point3::new(5., 10., 0.),
            color: Color::splat(255.),
        });
        let config = MarchConfig::default();

        let c = lambert(&config, &scene, root, &Point3::new(5., 0., 0.), &-Vector3::y_axis());
        assert!(c.is_black());
    }

    #[test]
    fn test_lambert_shadowed() {
        let (scene, root) = scene_with(Light::Directional {
            direction: Vector3::y_axis(),
            color: Color::splat(255.),
        });
        let config = MarchConfig::default();

        // the ball hangs directly above the origin
        let c = lambert(&config, &scene, root, &Point3::origin(), &Vector3::y_axis());
        assert!(c.is_black());

        let c = lambert(&config, &scene, root, &Point3::new(3., 0., 0.), &Vector3::y_axis());
        assert_abs_diff_eq!(255., c.g, epsilon = 1e-3);
    }
}
