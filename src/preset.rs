use clap::ValueEnum;
use nalgebra::Vector3;

use crate::{
    canvas::Color,
    scene::{NodeId, Scene},
};

/// Built-in scenes, all resting on a floor at `y = -1` and framed for a camera at `(0, 1, -3.5)`
/// looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// A unit sphere at the origin and a second one behind it to the right.
    Spheres,

    /// A lone unit sphere at the origin.
    Single,

    /// Constructive solid geometry: a bitten sphere, a rounded cube, and a box, in color.
    Csg,

    /// An endless field of small spheres.
    Tiled,
}

impl Preset {
    /// Add the preset's geometry to `scene`, returning the root of the field.
    pub fn build(self, scene: &mut Scene) -> NodeId {
        let floor = scene.plane(Vector3::y_axis(), -1.);

        match self {
            Preset::Spheres => {
                let a = scene.sphere(1.);
                let b = scene.sphere(1.);
                let b = scene.translate(Vector3::new(1.8, 0., -1.8), b);
                scene.union(vec![a, floor, b])
            }

            Preset::Single => {
                let sphere = scene.sphere(1.);
                scene.union(vec![sphere, floor])
            }

            Preset::Csg => {
                let orange = scene.diffuse(Color::new(0.95, 0.55, 0.2));
                let ivory = scene.diffuse(Color::new(0.95, 0.93, 0.85));
                let blue = scene.diffuse(Color::new(0.25, 0.4, 0.9));
                let gray = scene.diffuse(Color::splat(0.7));

                let body = scene.sphere(0.8);
                let bite = scene.sphere(0.5);
                let bite = scene.translate(Vector3::new(0.4, 0.3, -0.5), bite);
                let bitten = scene.subtract(body, bite);
                let bitten = scene.paint(orange, bitten);
                let bitten = scene.translate(Vector3::new(-1.6, -0.2, 0.5), bitten);

                let ball = scene.sphere(0.9);
                let cube = scene.rect(Vector3::new(0.7, 0.7, 0.7));
                let rounded = scene.intersect(vec![ball, cube]);
                let rounded = scene.paint(ivory, rounded);
                let rounded = scene.translate(Vector3::new(0., -0.3, 0.), rounded);

                let block = scene.rect(Vector3::new(0.5, 0.5, 0.5));
                let block = scene.paint(blue, block);
                let block = scene.translate(Vector3::new(1.6, -0.5, 0.5), block);

                let floor = scene.paint(gray, floor);
                scene.union(vec![bitten, rounded, block, floor])
            }

            Preset::Tiled => {
                let ball = scene.sphere(0.4);
                let ball = scene.translate(Vector3::new(0., -0.6, 0.), ball);
                let field = scene.repeat(Vector3::new(1.5, 0., 1.5), ball);
                scene.union(vec![field, floor])
            }
        }
    }
}
