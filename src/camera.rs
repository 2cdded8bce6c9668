use nalgebra::{Point2, Point3, Unit, Vector3};

use crate::ray::Ray;

#[derive(Debug, Clone)]
pub struct CanvasInfo {
    /// The width in pixels of the canvas.
    pub width: u32,

    /// The height in pixels of the canvas.
    pub height: u32,
}

impl CanvasInfo {
    /// Create a new [`CanvasInfo`].
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Compute the aspect ratio.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[derive(Debug, Clone)]
pub struct Sample {
    /// The point on the film where the ray originates, in pixels from the top-left corner.
    pub film: Point2<f32>,
}

impl Sample {
    pub fn new(fx: f32, fy: f32) -> Self {
        Self {
            film: Point2::new(fx, fy),
        }
    }
}

pub trait Camera {
    /// Given a [`Sample`], generate a ray.
    fn generate_ray(&self, sample: &Sample) -> Ray;
}

/// A pinhole camera at `origin`, looking towards a target point.
///
/// `right` and `up` are built with cross products and are not renormalized, so when the camera
/// tilts away from the horizon the image is squashed vertically and narrowed horizontally.
#[derive(Debug, Clone)]
pub struct LookAtCamera {
    origin: Point3<f32>,
    forward: Vector3<f32>,
    right: Vector3<f32>,
    up: Vector3<f32>,
    zoom: f32,
    width: f32,
    height: f32,
    aspect_ratio: f32,
}

impl LookAtCamera {
    pub fn new(info: &CanvasInfo, origin: Point3<f32>, look_at: Point3<f32>, zoom: f32) -> Self {
        let forward = (look_at - origin).normalize();
        let right = Vector3::y().cross(&forward);
        let up = forward.cross(&right);

        Self {
            origin,
            forward,
            right,
            up,
            zoom,
            width: info.width as f32,
            height: info.height as f32,
            aspect_ratio: info.aspect_ratio(),
        }
    }

    /// Map a film position to screen coordinates: `[-1, 1]` vertically with up positive, and
    /// scaled by the aspect ratio horizontally.
    pub fn screen(&self, film: &Point2<f32>) -> Point2<f32> {
        Point2::new(
            (2. * film.x / self.width - 1.) * self.aspect_ratio,
            -(2. * film.y / self.height - 1.),
        )
    }
}

impl Camera for LookAtCamera {
    fn generate_ray(&self, sample: &Sample) -> Ray {
        let screen = self.screen(&sample.film);
        let dir = self.forward * self.zoom + self.right * screen.x + self.up * screen.y;
        Ray::new(self.origin, Unit::new_normalize(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_screen() {
        let info = CanvasInfo::new(20, 10);
        let camera = LookAtCamera::new(&info, Point3::origin(), Point3::new(0., 0., 1.), 1.);

        assert_eq!(Point2::new(0., 0.), camera.screen(&Point2::new(10., 5.)));
        assert_eq!(Point2::new(-2., 1.), camera.screen(&Point2::new(0., 0.)));
        assert_eq!(Point2::new(2., -1.), camera.screen(&Point2::new(20., 10.)));
    }

    #[test]
    fn test_look_at_axis() {
        let info = CanvasInfo::new(10, 10);
        let camera = LookAtCamera::new(&info, Point3::origin(), Point3::new(0., 0., 5.), 1.);

        let ray = camera.generate_ray(&Sample::new(5., 5.));
        assert_eq!(Point3::origin(), ray.position);
        assert_abs_diff_eq!(Vector3::z(), ray.direction.into_inner(), epsilon = 1e-6);

        // the top-left corner of the film
        let ray = camera.generate_ray(&Sample::new(0., 0.));
        let expected = Vector3::new(-1., 1., 1.).normalize();
        assert_abs_diff_eq!(expected, ray.direction.into_inner(), epsilon = 1e-6);
    }

    #[test]
    fn test_zoom_narrows_view() {
        let info = CanvasInfo::new(10, 10);
        let wide = LookAtCamera::new(&info, Point3::origin(), Point3::new(0., 0., 1.), 1.);
        let narrow = LookAtCamera::new(&info, Point3::origin(), Point3::new(0., 0., 1.), 2.);

        let sample = Sample::new(10., 5.);
        let wide = wide.generate_ray(&sample).direction;
        let narrow = narrow.generate_ray(&sample).direction;
        assert!(narrow.z > wide.z);
    }
}
