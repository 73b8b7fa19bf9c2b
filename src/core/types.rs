//! Core type aliases and re-exports

pub use glam::{
    Vec2, Vec3,
    Mat3, Mat4,
    Quat, EulerRot,
};

/// Standard Result type for the brush tool
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
