//! Mathematical utilities and data structures

pub mod aabb;
pub mod ray;
pub mod rotation;

pub use aabb::Aabb;
pub use ray::Ray;
pub use rotation::{euler_degrees, from_euler_degrees, look_rotation};
