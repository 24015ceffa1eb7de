pub mod animation;
pub mod camera;
pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod frame;
pub mod interaction;
pub mod math;
pub mod scene;
pub mod scenes;
pub mod viewport;

pub use context::PuppetContext;
pub use scenes::{build_tiger_scene, TigerRig};
