//! Armatures, bones, and per-vertex skin weights

use super::tuple::FloatTuple;

/// A named tree of bones, stored as a flat list with parent back-references
///
/// Bones are appended through [`Obj::add_bone`](super::Obj::add_bone),
/// which always targets the most recently added armature. No cycle or
/// parent-index validation is performed; callers are responsible for
/// supplying a valid tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Armature {
    /// The armature's name
    pub name: String,
    /// Bones in insertion order
    pub bones: Vec<Bone>,
}

impl Armature {
    /// Create a new, empty armature
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bones: Vec::new(),
        }
    }
}

/// A node in an armature's bone tree
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    /// Position of the parent bone in the same armature, `None` for a root
    pub parent: Option<usize>,
    /// The bone's name
    pub name: String,
    /// Position of the bone's base
    pub head: FloatTuple,
    /// Position of the bone's tip
    pub tail: FloatTuple,
}

impl Bone {
    /// Create a bone from explicit head and tail positions
    pub fn new(
        parent: Option<usize>,
        name: impl Into<String>,
        head: FloatTuple,
        tail: FloatTuple,
    ) -> Self {
        Self {
            parent,
            name: name.into(),
            head,
            tail,
        }
    }

    /// Create a bone from a position, a unit quaternion, and a length
    ///
    /// The head is the given position; the tail is the head offset by the
    /// bone's local Y axis of the given length, rotated through the
    /// quaternion (x, y, z, w component order).
    pub fn from_rotation(
        parent: Option<usize>,
        name: impl Into<String>,
        position: FloatTuple,
        rotation: FloatTuple,
        length: f32,
    ) -> Self {
        let (qx, qy, qz, qw) = (rotation.x(), rotation.y(), rotation.z(), rotation.w());
        // v' = v + 2 * q_xyz x (q_xyz x v + w * v), with v = (0, length, 0)
        let v = [0.0, length, 0.0];
        let t = [
            2.0 * (qy * v[2] - qz * v[1]),
            2.0 * (qz * v[0] - qx * v[2]),
            2.0 * (qx * v[1] - qy * v[0]),
        ];
        let rotated = [
            v[0] + qw * t[0] + (qy * t[2] - qz * t[1]),
            v[1] + qw * t[1] + (qz * t[0] - qx * t[2]),
            v[2] + qw * t[2] + (qx * t[1] - qy * t[0]),
        ];
        let tail = FloatTuple::new3(
            position.x() + rotated[0],
            position.y() + rotated[1],
            position.z() + rotated[2],
        );
        Self {
            parent,
            name: name.into(),
            head: position,
            tail,
        }
    }
}

/// Reference to a bone: an armature position and a bone position within it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoneIndex {
    /// Position of the armature in the model's armature list
    pub armature: usize,
    /// Position of the bone in that armature's bone list
    pub bone: usize,
}

impl BoneIndex {
    /// Create a bone reference
    pub fn new(armature: usize, bone: usize) -> Self {
        Self { armature, bone }
    }
}

/// A single bone's contribution to a vertex's skinning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexWeight {
    /// The contributing bone
    pub bone: BoneIndex,
    /// The scalar weight
    pub weight: f32,
}

/// The skin weights attached to one vertex
///
/// Entries accumulate in call order. Repeated weights for the same bone
/// are kept as independent entries; deduplication and normalization are
/// the caller's responsibility.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexWeightSet {
    weights: Vec<VertexWeight>,
}

impl VertexWeightSet {
    /// Create an empty weight set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a weight entry for the given bone
    pub fn add_weight(&mut self, bone: BoneIndex, weight: f32) {
        self.weights.push(VertexWeight { bone, weight });
    }

    /// The entries in call order
    pub fn weights(&self) -> &[VertexWeight] {
        &self.weights
    }

    /// The number of entries
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no entries have been added
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_bone_entries_accumulate() {
        let mut set = VertexWeightSet::new();
        set.add_weight(BoneIndex::new(0, 1), 0.5);
        set.add_weight(BoneIndex::new(0, 1), 0.25);
        assert_eq!(set.len(), 2);
        assert_eq!(set.weights()[0].weight, 0.5);
        assert_eq!(set.weights()[1].weight, 0.25);
    }

    #[test]
    fn test_identity_rotation_extends_along_y() {
        let bone = Bone::from_rotation(
            None,
            "spine",
            FloatTuple::new3(1.0, 2.0, 3.0),
            FloatTuple::new4(0.0, 0.0, 0.0, 1.0),
            2.0,
        );
        assert_eq!(bone.head, FloatTuple::new3(1.0, 2.0, 3.0));
        assert_eq!(bone.tail, FloatTuple::new3(1.0, 4.0, 3.0));
    }

    #[test]
    fn test_quarter_turn_about_z_maps_y_to_negative_x() {
        use approx::assert_relative_eq;

        // 90 degrees about +Z: (x, y, z, w) = (0, 0, sin 45, cos 45)
        let s = std::f32::consts::FRAC_1_SQRT_2;
        let bone = Bone::from_rotation(
            None,
            "arm",
            FloatTuple::new3(0.0, 0.0, 0.0),
            FloatTuple::new4(0.0, 0.0, s, s),
            1.0,
        );
        assert_relative_eq!(bone.tail.x(), -1.0, epsilon = 1e-6);
        assert_relative_eq!(bone.tail.y(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(bone.tail.z(), 0.0, epsilon = 1e-6);
    }
}
