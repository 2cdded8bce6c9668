use rand::RngCore;

use crate::{
    canvas::Color,
    ray::Ray,
    scene::{NodeId, Scene},
};

pub mod debug_normals;
pub mod debug_steps;
pub mod path;

pub use debug_normals::DebugNormals;
pub use debug_steps::DebugSteps;
pub use path::PathTracer;

pub trait Integrator {
    /// Compute the light arriving along `ray`. Any randomness is drawn from `rng`, so that a
    /// seeded generator reproduces the same image.
    fn luminance(&self, scene: &Scene, root: NodeId, ray: Ray, rng: &mut dyn RngCore) -> Color;
}

impl<C> Integrator for Box<C>
where
    C: Integrator + ?Sized,
{
    fn luminance(&self, scene: &Scene, root: NodeId, ray: Ray, rng: &mut dyn RngCore) -> Color {
        self.as_ref().luminance(scene, root, ray, rng)
    }
}
