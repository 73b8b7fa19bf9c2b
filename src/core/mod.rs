//! Core types and utilities shared by the brush tool

pub mod types;
pub mod error;
pub mod logging;
pub mod input;

pub use types::*;
pub use error::Error;
pub use input::{FrameInput, InputEvent, InputState};
