//! Data structures representing OBJ models

// Declare all submodules
mod bounds;
mod face;
mod group;
mod obj;
mod skeleton;
mod tuple;

// Re-export all public types
pub use bounds::Rect3D;
pub use face::Face;
pub use group::{Group, GroupTable};
pub use obj::Obj;
pub use skeleton::{Armature, Bone, BoneIndex, VertexWeight, VertexWeightSet};
pub use tuple::FloatTuple;
