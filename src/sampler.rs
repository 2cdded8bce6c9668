use nalgebra::{Point2, Unit, Vector3};
use rand::{Rng, RngCore};

/// Pick the direction of the next bounce off a surface with the given normal.
///
/// A uniformly distributed point on the unit sphere is offset by the normal, which leans the
/// result towards the normal. This is close to, but not exactly, a cosine-weighted hemisphere
/// sample.
pub fn bounce_direction(normal: &Unit<Vector3<f32>>, rng: &mut dyn RngCore) -> Unit<Vector3<f32>> {
    let theta = std::f32::consts::TAU * rng.gen::<f32>();
    let y = 2. * rng.gen::<f32>() - 1.;
    let r = (1. - y * y).sqrt();

    Unit::new_normalize(normal.as_ref() + Vector3::new(theta.cos() * r, theta.sin() * r, y))
}

/// A random offset within a pixel, in `[0, 1)` along both axes.
pub fn jitter(rng: &mut dyn RngCore) -> Point2<f32> {
    let x = rng.gen::<f32>();
    let y = rng.gen::<f32>();
    Point2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_bounce_direction_leaves_surface() {
        let mut rng = StdRng::seed_from_u64(0);
        let normal = Unit::new_normalize(Vector3::new(0.3, 1., -0.2));

        for _ in 0..1000 {
            let dir = bounce_direction(&normal, &mut rng);
            assert_abs_diff_eq!(1., dir.norm(), epsilon = 1e-5);
            assert!(dir.dot(&normal) >= -1e-5);
        }
    }

    #[test]
    fn test_bounce_direction_is_reproducible() {
        let normal = Vector3::y_axis();
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);

        for _ in 0..10 {
            assert_eq!(bounce_direction(&normal, &mut a), bounce_direction(&normal, &mut b));
        }
    }

    #[test]
    fn test_jitter_range() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..1000 {
            let p = jitter(&mut rng);
            assert!((0. ..1.).contains(&p.x));
            assert!((0. ..1.).contains(&p.y));
        }
    }
}
