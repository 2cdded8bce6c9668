pub mod camera;
pub mod canvas;
pub mod integrator;
pub mod lighting;
pub mod march;
pub mod preset;
pub mod ray;
pub mod render;
pub mod sampler;
pub mod scene;
