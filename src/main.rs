use std::path::PathBuf;

use anyhow::{bail, Error};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use nalgebra::{Point3, Unit, Vector3};

use sdftrace::{
    camera::LookAtCamera,
    canvas::Color,
    integrator::{DebugNormals, DebugSteps, Integrator, PathTracer},
    march::MarchConfig,
    preset::Preset,
    render::{ConfigBuilder, Renderer},
    scene::{Light, Scene},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Diffuse path tracing.
    Path,

    /// Color surfaces by their normal.
    Normals,

    /// Color surfaces by the number of march steps needed to reach them.
    Steps,
}

/// Render a signed distance field scene by sphere tracing.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Options {
    /// The image to write. `.ppm` files are written as plain-text PPM; other extensions pick an
    /// image format by name.
    #[arg(default_value = "out.ppm")]
    output: PathBuf,

    #[arg(long, default_value_t = 512)]
    width: u32,

    #[arg(long, default_value_t = 512)]
    height: u32,

    /// Paths traced per pixel.
    #[arg(long, default_value_t = 1)]
    samples: u32,

    /// The maximum number of surfaces visited by a path.
    #[arg(long, default_value_t = 4)]
    bounces: u32,

    /// Seed for the random generator; the same seed renders the same image.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = Preset::Spheres)]
    scene: Preset,

    #[arg(long, value_enum, default_value_t = Mode::Path)]
    integrator: Mode,

    #[arg(long, value_parser = parse_vec3, default_value = "0,1,-3.5")]
    camera_origin: Vector3<f32>,

    #[arg(long, value_parser = parse_vec3, default_value = "0,0,0")]
    camera_look_at: Vector3<f32>,

    /// Distance from the eye to the image plane; larger values narrow the view.
    #[arg(long, default_value_t = 1.)]
    zoom: f32,

    #[arg(long, value_parser = parse_vec3, default_value = "15,10,-15")]
    light_position: Vector3<f32>,

    /// Light the scene with a sun in this direction instead of the point light.
    #[arg(long, value_parser = parse_vec3)]
    sun: Option<Vector3<f32>>,

    #[arg(long, value_parser = parse_vec3, default_value = "255,255,255")]
    light_color: Vector3<f32>,

    /// Fraction of light kept at each bounce, on top of the surface color.
    #[arg(long, default_value_t = 0.8)]
    attenuation: f32,

    /// Clamp every channel of a path's result to this value.
    #[arg(long)]
    clamp: Option<f32>,

    #[arg(long, default_value_t = 128)]
    max_steps: u32,

    /// Rays that travel further than this have left the scene.
    #[arg(long, default_value_t = 16.)]
    max_dist: f32,
}

/// Parse a vector written as `x,y,z`.
fn parse_vec3(s: &str) -> Result<Vector3<f32>, String> {
    let parts = s
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("invalid vector `{}`: {}", s, err))?;

    match parts.as_slice() {
        &[x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => Err(format!("expected three comma-separated values, found `{}`", s)),
    }
}

fn main() -> Result<(), Error> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let opts = Options::parse();
    debug!("{:?}", opts);

    let color = Color::new(opts.light_color.x, opts.light_color.y, opts.light_color.z);
    let light = match opts.sun {
        Some(dir) if dir.norm_squared() == 0. => bail!("the sun direction must not be zero"),
        Some(dir) => Light::Directional {
            direction: Unit::new_normalize(dir),
            color,
        },
        None => Light::Point {
            position: Point3::from(opts.light_position),
            color,
        },
    };

    let mut scene = Scene::new(light);
    let root = opts.scene.build(&mut scene);

    let config = ConfigBuilder::default()
        .set_width(opts.width)
        .set_height(opts.height)
        .set_samples_per_pixel(opts.samples)
        .set_seed(opts.seed)
        .build();

    let camera = LookAtCamera::new(
        &config.canvas_info(),
        Point3::from(opts.camera_origin),
        Point3::from(opts.camera_look_at),
        opts.zoom,
    );

    let march = MarchConfig {
        max_steps: opts.max_steps,
        max_dist: opts.max_dist,
        ..MarchConfig::default()
    };

    let integrator: Box<dyn Integrator> = match opts.integrator {
        Mode::Path => Box::new(PathTracer {
            march,
            max_bounces: opts.bounces,
            attenuation: opts.attenuation,
            clamp: opts.clamp,
            ..PathTracer::default()
        }),
        Mode::Normals => Box::new(DebugNormals::new(march)),
        Mode::Steps => Box::new(DebugSteps::new(march)),
    };

    let canvas = Renderer::new(&config, &scene, root, &camera, &*integrator).render();

    canvas.save(&opts.output)?;
    info!("wrote {}", opts.output.display());

    Ok(())
}

#[test]
fn test_parse_vec3() {
    assert_eq!(Ok(Vector3::new(0., 1., -3.5)), parse_vec3("0,1,-3.5"));
    assert_eq!(Ok(Vector3::new(1., 2., 3.)), parse_vec3(" 1, 2 ,3"));
    assert!(parse_vec3("1,2").is_err());
    assert!(parse_vec3("1,two,3").is_err());
}

#[test]
fn test_options() {
    use clap::CommandFactory;
    Options::command().debug_assert();

    let opts = Options::parse_from(["sdftrace", "--sun", "1,1,0", "--scene", "csg", "out.png"]);
    assert_eq!(Some(Vector3::new(1., 1., 0.)), opts.sun);
    assert_eq!(Preset::Csg, opts.scene);
    assert_eq!(PathBuf::from("out.png"), opts.output);
    assert_eq!(512, opts.width);
}
