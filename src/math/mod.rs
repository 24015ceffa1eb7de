mod aabb;
mod color;
mod ray;

pub use aabb::AABB;
pub use color::{hex_to_linear, linear_to_srgb, srgb_to_linear, to_rgba8};
pub use ray::{intersect_aabb, Ray};
