mod graph;
mod light;
mod material;
mod shape;

pub use graph::{NodeId, SceneGraph, SceneNode, WorldItem};
pub use light::{AmbientLight, DirectionalLight, Lighting};
pub use material::{Material, MaterialRegistry, Swatch};
pub use shape::{ShapeDescriptor, ShapeKind};
