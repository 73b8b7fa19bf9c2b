//! Scene graph the painted instances land in

pub mod graph;
pub mod node;

pub use graph::{Scene, SceneGraph};
pub use node::{LocalTransform, NodeContent, NodeId, SceneNode};
