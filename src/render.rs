use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    camera::{Camera, CanvasInfo, Sample},
    canvas::{Canvas, Color},
    integrator::Integrator,
    sampler,
    scene::{NodeId, Scene},
};

pub struct ConfigBuilder {
    config: Config,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        ConfigBuilder {
            config: Config {
                width: 512,
                height: 512,
                samples_per_pixel: 1,
                seed: 0,
                progress_interval: 10,
            },
        }
    }
}

impl ConfigBuilder {
    pub fn set_width(mut self, width: u32) -> Self {
        self.config.width = width.max(1);
        self
    }

    pub fn set_height(mut self, height: u32) -> Self {
        self.config.height = height.max(1);
        self
    }

    pub fn set_samples_per_pixel(mut self, samples: u32) -> Self {
        self.config.samples_per_pixel = samples.max(1);
        self
    }

    pub fn set_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Report progress every `rows` rows. Zero disables progress reporting.
    pub fn set_progress_interval(mut self, rows: u32) -> Self {
        self.config.progress_interval = rows;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    seed: u64,
    progress_interval: u32,
}

impl Config {
    pub fn canvas_info(&self) -> CanvasInfo {
        CanvasInfo::new(self.width, self.height)
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }
}

/// Drives the integrator over every pixel of the image. The random generator is seeded once when
/// the renderer is created, and pixels are visited in a fixed order, so the same inputs always
/// produce the same image.
pub struct Renderer<'a> {
    config: &'a Config,
    scene: &'a Scene,
    root: NodeId,
    camera: &'a dyn Camera,
    integrator: &'a dyn Integrator,
    rng: StdRng,
}

impl<'a> Renderer<'a> {
    pub fn new(
        config: &'a Config,
        scene: &'a Scene,
        root: NodeId,
        camera: &'a dyn Camera,
        integrator: &'a dyn Integrator,
    ) -> Self {
        Self {
            config,
            scene,
            root,
            camera,
            integrator,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// The average of `samples_per_pixel` paths through randomly jittered points of the pixel at
    /// column `x` and row `y`.
    pub fn pixel_color(&mut self, x: u32, y: u32) -> Color {
        let mut color = Color::black();

        for _ in 0..self.config.samples_per_pixel {
            let offset = sampler::jitter(&mut self.rng);
            let sample = Sample::new(x as f32 + offset.x, y as f32 + offset.y);
            let ray = self.camera.generate_ray(&sample);
            color += self
                .integrator
                .luminance(self.scene, self.root, ray, &mut self.rng);
        }

        color / self.config.samples_per_pixel as f32
    }

    /// Render the whole image, top row first.
    pub fn render(&mut self) -> Canvas {
        let Config {
            width,
            height,
            progress_interval,
            ..
        } = *self.config;

        debug!(
            "rendering {}x{} with {} samples per pixel, seed {}",
            width, height, self.config.samples_per_pixel, self.config.seed
        );

        let mut canvas = Canvas::new(width, height);

        for row in 0..height {
            if progress_interval > 0 && row % progress_interval == 0 {
                info!("row #{} out of {}", row, height);
            }

            for col in 0..width {
                *canvas.get_mut(col as usize, row as usize) = self.pixel_color(col, row);
            }
        }

        canvas
    }
}
