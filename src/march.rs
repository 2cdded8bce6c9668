use nalgebra::{Point3, Unit, Vector3};

use crate::ray::Ray;
use crate::scene::{NodeId, Scene};

#[derive(Debug, Clone)]
pub struct MarchConfig {
    pub max_steps: u32,

    /// The distance along the ray where marching starts, to avoid re-hitting the surface the ray
    /// left from.
    pub min_dist: f32,

    /// A point closer than this to a surface counts as a hit.
    pub hit_epsilon: f32,

    /// Rays that travel further than this have escaped the scene.
    pub max_dist: f32,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            max_steps: 128,
            min_dist: 0.01,
            hit_epsilon: 0.0001,
            max_dist: 16.,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// The ray reached a surface `distance` units from its origin.
    Hit { distance: f32 },

    /// The ray travelled past `max_dist`.
    Escaped,

    /// The step budget ran out before the ray hit or escaped.
    Exhausted,
}

#[derive(Debug, Clone, Copy)]
pub struct MarchResult {
    pub outcome: Outcome,

    /// The number of steps taken.
    pub steps: u32,
}

impl MarchResult {
    /// The hit distance. Escaping and running out of steps are both misses.
    pub fn hit(&self) -> Option<f32> {
        match self.outcome {
            Outcome::Hit { distance } => Some(distance),
            Outcome::Escaped | Outcome::Exhausted => None,
        }
    }
}

/// March the ray until it hits something in the geometry, escapes, or runs out of fuel.
pub fn march(config: &MarchConfig, scene: &Scene, root: NodeId, ray: &Ray) -> MarchResult {
    let mut t = config.min_dist;

    for steps in 0..config.max_steps {
        if t > config.max_dist {
            return MarchResult {
                outcome: Outcome::Escaped,
                steps,
            };
        }

        let h = scene.distance(root, &ray.at(t));

        if h < config.hit_epsilon {
            return MarchResult {
                outcome: Outcome::Hit { distance: t },
                steps,
            };
        }

        t += h;
    }

    // the last step may have carried the ray out of the scene.
    let outcome = if t > config.max_dist {
        Outcome::Escaped
    } else {
        Outcome::Exhausted
    };

    MarchResult {
        outcome,
        steps: config.max_steps,
    }
}

/// The occlusion factor for light arriving at `point` from `light_dir`: `1.0` when a ray towards
/// the light escapes the scene, `0.0` otherwise. The march is not cut short at the light's
/// position, and running out of steps counts as occluded.
pub fn in_shadow(
    config: &MarchConfig,
    scene: &Scene,
    root: NodeId,
    point: &Point3<f32>,
    light_dir: &Unit<Vector3<f32>>,
) -> f32 {
    let ray = Ray::new(*point, *light_dir);
    match march(config, scene, root, &ray).outcome {
        Outcome::Escaped => 1.,
        Outcome::Hit { .. } | Outcome::Exhausted => 0.,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Color;
    use crate::scene::Light;
    use approx::assert_abs_diff_eq;

    fn lone_sphere() -> (Scene, NodeId) {
        let mut scene = Scene::new(Light::Point {
            position: Point3::new(15., 10., -15.),
            color: Color::splat(255.),
        });
        let root = scene.sphere(1.);
        (scene, root)
    }

    #[test]
    fn test_march_hits_sphere() {
        let (scene, root) = lone_sphere();
        let config = MarchConfig::default();

        let ray = Ray::new(Point3::new(0., 0., -3.), Vector3::z_axis());
        let res = march(&config, &scene, root, &ray);
        let dist = res.hit().expect("intersection");
        assert_abs_diff_eq!(2., dist, epsilon = config.hit_epsilon);

        let origin = Point3::new(1., 2., -3.);
        let ray = Ray::new(origin, Unit::new_normalize(-origin.coords));
        let dist = march(&config, &scene, root, &ray).hit().expect("intersection");
        assert_abs_diff_eq!(origin.coords.norm() - 1., dist, epsilon = config.hit_epsilon);
    }

    #[test]
    fn test_march_misses() {
        let (scene, root) = lone_sphere();
        let config = MarchConfig::default();

        let ray = Ray::new(Point3::new(0., 0., -3.), -Vector3::z_axis());
        let res = march(&config, &scene, root, &ray);
        assert_eq!(Outcome::Escaped, res.outcome);
        assert_eq!(None, res.hit());
    }

    #[test]
    fn test_march_exhausted_is_a_miss() {
        let (scene, root) = lone_sphere();
        let config = MarchConfig {
            max_steps: 2,
            ..MarchConfig::default()
        };

        // grazing the sphere keeps the steps short
        let ray = Ray::new(Point3::new(1.001, 0., -3.), Vector3::z_axis());
        let res = march(&config, &scene, root, &ray);
        assert_eq!(Outcome::Exhausted, res.outcome);
        assert_eq!(2, res.steps);
        assert_eq!(None, res.hit());
    }

    #[test]
    fn test_in_shadow() {
        let (scene, root) = lone_sphere();
        let config = MarchConfig::default();
        let point = Point3::new(0., 0., -3.);

        assert_eq!(1., in_shadow(&config, &scene, root, &point, &-Vector3::z_axis()));
        assert_eq!(0., in_shadow(&config, &scene, root, &point, &Vector3::z_axis()));
    }

    #[test]
    fn test_in_shadow_exhausted_is_occluded() {
        let (scene, root) = lone_sphere();
        let config = MarchConfig {
            max_steps: 1,
            ..MarchConfig::default()
        };
        let point = Point3::new(0., 0., -3.);

        assert_eq!(0., in_shadow(&config, &scene, root, &point, &-Vector3::z_axis()));
    }
}
