use nalgebra::{Point3, Unit, Vector3};

#[derive(Debug, Clone)]
pub struct Ray {
    pub position: Point3<f32>,
    pub direction: Unit<Vector3<f32>>,
}

impl Ray {
    /// Construct a new ray.
    pub fn new(position: Point3<f32>, direction: Unit<Vector3<f32>>) -> Ray {
        Ray {
            position,
            direction,
        }
    }

    /// The point `t` units along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Point3<f32> {
        self.position + self.direction.scale(t)
    }
}

#[test]
fn test_ray_at() {
    let ray = Ray::new(Point3::new(0., 1., 0.), Vector3::z_axis());
    assert_eq!(Point3::new(0., 1., 0.), ray.at(0.));
    assert_eq!(Point3::new(0., 1., 2.5), ray.at(2.5));
}
