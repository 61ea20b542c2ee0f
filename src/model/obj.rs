//! The mutable OBJ model container
//!
//! `Obj` owns every collection a parsed OBJ file populates and is the only
//! place where staged state lives: group and material-group activations
//! are staged by directive-handling code and committed by the next
//! [`Obj::add_face`] call.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

use super::bounds::Rect3D;
use super::face::Face;
use super::group::{Group, GroupTable};
use super::skeleton::{Armature, Bone, BoneIndex, VertexWeightSet};
use super::tuple::FloatTuple;

/// The group every model starts with, and the target of an empty `g`
const DEFAULT_GROUP_NAME: &str = "default";

/// An in-memory Wavefront OBJ model
///
/// A reader populates the model through the mutation API in file order; a
/// writer enumerates it through the read API. The model is single-writer:
/// it has no internal locking, and concurrent mutation requires external
/// synchronization.
///
/// # Group activation
///
/// `g` and `usemtl` directives do not take effect when they are seen.
/// They are *staged* with [`set_active_group_names`] /
/// [`set_active_material_group_name`] and *committed* by the next
/// [`add_face`]. A staged change with no following face has no effect and
/// creates no groups. When a commit changes the active set, the face that
/// triggered it is recorded as the activation point, which is what lets a
/// writer reproduce directive placement.
///
/// [`set_active_group_names`]: Obj::set_active_group_names
/// [`set_active_material_group_name`]: Obj::set_active_material_group_name
/// [`add_face`]: Obj::add_face
///
/// # Example
///
/// ```
/// use libobj::{Face, Obj};
///
/// # fn main() -> libobj::Result<()> {
/// let mut obj = Obj::new();
/// obj.add_vertex(0.0, 0.0, 0.0);
/// obj.add_vertex(1.0, 0.0, 0.0);
/// obj.add_vertex(0.0, 1.0, 0.0);
///
/// obj.set_active_group_names(["wing"])?;
/// obj.add_face(Face::triangle(0, 1, 2))?;
///
/// assert_eq!(obj.group_by_name("wing").unwrap().num_faces(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Obj {
    vertices: Vec<FloatTuple>,
    /// Parallel to `vertices`; `None` until the first weight for that slot
    weights: Vec<Option<VertexWeightSet>>,
    tex_coords: Vec<FloatTuple>,
    normals: Vec<FloatTuple>,
    faces: Vec<Face>,
    armatures: Vec<Armature>,

    groups: GroupTable,
    material_groups: GroupTable,

    mtl_file_names: Vec<String>,
    act_file_names: Vec<String>,

    /// Face index -> group names that became active at that face
    activated_group_names: HashMap<usize, Vec<String>>,
    /// Face index -> material group name that became active at that face
    activated_material_group_names: HashMap<usize, String>,

    /// Staged active-group change; `None` means no change staged
    next_active_group_names: Option<Vec<String>>,
    /// Staged material-group change; `None` means no change staged
    next_active_material_group_name: Option<String>,

    /// Committed active groups, as positions in the group table
    active_group_indices: Vec<usize>,
    /// Committed active group names, in activation order
    active_group_names: Vec<String>,
    active_material_group_index: Option<usize>,
    active_material_group_name: Option<String>,

    bounds: Option<Rect3D>,
}

impl Obj {
    /// Create an empty model
    ///
    /// The `"default"` group exists and is active from the start; no
    /// material group is active.
    pub fn new() -> Self {
        let mut groups = GroupTable::new();
        let default_index = groups.resolve_or_create(DEFAULT_GROUP_NAME);
        Self {
            vertices: Vec::new(),
            weights: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            faces: Vec::new(),
            armatures: Vec::new(),
            groups,
            material_groups: GroupTable::new(),
            mtl_file_names: Vec::new(),
            act_file_names: Vec::new(),
            activated_group_names: HashMap::new(),
            activated_material_group_names: HashMap::new(),
            next_active_group_names: None,
            next_active_material_group_name: None,
            active_group_indices: vec![default_index],
            active_group_names: vec![DEFAULT_GROUP_NAME.to_string()],
            active_material_group_index: None,
            active_material_group_name: None,
            bounds: None,
        }
    }

    // ------------------------------------------------------------------
    // Vertices, texture coordinates, normals
    // ------------------------------------------------------------------

    /// The vertex positions, in insertion order
    pub fn vertices(&self) -> &[FloatTuple] {
        &self.vertices
    }

    /// The vertex at the given index
    pub fn vertex(&self, index: usize) -> Option<&FloatTuple> {
        self.vertices.get(index)
    }

    /// The number of vertices
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Append a vertex, extending the bounding box and starting an empty
    /// weight slot
    pub fn add_vertex(&mut self, x: f32, y: f32, z: f32) {
        self.vertices.push(FloatTuple::new3(x, y, z));
        self.weights.push(None);
        match self.bounds.as_mut() {
            Some(bounds) => bounds.expand(x, y, z),
            None => self.bounds = Some(Rect3D::of_point(x, y, z)),
        }
    }

    /// Append a vertex given as a tuple of at least 3 components
    pub fn add_vertex_tuple(&mut self, vertex: FloatTuple) -> Result<()> {
        if vertex.dimensions() < 3 {
            return Err(Error::InvalidArgument(format!(
                "a vertex needs at least 3 components, got {}",
                vertex.dimensions()
            )));
        }
        match self.bounds.as_mut() {
            Some(bounds) => bounds.expand_tuple(&vertex),
            None => self.bounds = Some(Rect3D::of_point(vertex.x(), vertex.y(), vertex.z())),
        }
        self.vertices.push(vertex);
        self.weights.push(None);
        Ok(())
    }

    /// Replace the vertex at `index` in place
    ///
    /// Does not touch the bounding box: the box only ever grows, on
    /// [`add_vertex`](Obj::add_vertex).
    pub fn set_vertex(&mut self, index: usize, vertex: FloatTuple) -> Result<()> {
        if vertex.dimensions() < 3 {
            return Err(Error::InvalidArgument(format!(
                "a vertex needs at least 3 components, got {}",
                vertex.dimensions()
            )));
        }
        let len = self.vertices.len();
        *self
            .vertices
            .get_mut(index)
            .ok_or(Error::index_out_of_range("Vertex", index, len))? = vertex;
        Ok(())
    }

    /// The texture coordinates, in insertion order
    pub fn tex_coords(&self) -> &[FloatTuple] {
        &self.tex_coords
    }

    /// The texture coordinate at the given index
    pub fn tex_coord(&self, index: usize) -> Option<&FloatTuple> {
        self.tex_coords.get(index)
    }

    /// The number of texture coordinates
    pub fn num_tex_coords(&self) -> usize {
        self.tex_coords.len()
    }

    /// Append a one-component texture coordinate
    pub fn add_tex_coord(&mut self, u: f32) {
        self.tex_coords.push(FloatTuple::new(u));
    }

    /// Append a two-component texture coordinate
    pub fn add_tex_coord_2d(&mut self, u: f32, v: f32) {
        self.tex_coords.push(FloatTuple::new2(u, v));
    }

    /// Append a three-component texture coordinate
    pub fn add_tex_coord_3d(&mut self, u: f32, v: f32, w: f32) {
        self.tex_coords.push(FloatTuple::new3(u, v, w));
    }

    /// Append a texture coordinate of 1 to 3 components
    pub fn add_tex_coord_tuple(&mut self, tex_coord: FloatTuple) -> Result<()> {
        if tex_coord.dimensions() > 3 {
            return Err(Error::InvalidArgument(format!(
                "a texture coordinate has 1 to 3 components, got {}",
                tex_coord.dimensions()
            )));
        }
        self.tex_coords.push(tex_coord);
        Ok(())
    }

    /// Replace the texture coordinate at `index` in place
    pub fn set_tex_coord(&mut self, index: usize, tex_coord: FloatTuple) -> Result<()> {
        let len = self.tex_coords.len();
        *self
            .tex_coords
            .get_mut(index)
            .ok_or(Error::index_out_of_range("TexCoord", index, len))? = tex_coord;
        Ok(())
    }

    /// The normals, in insertion order
    pub fn normals(&self) -> &[FloatTuple] {
        &self.normals
    }

    /// The normal at the given index
    pub fn normal(&self, index: usize) -> Option<&FloatTuple> {
        self.normals.get(index)
    }

    /// The number of normals
    pub fn num_normals(&self) -> usize {
        self.normals.len()
    }

    /// Append a normal
    pub fn add_normal(&mut self, x: f32, y: f32, z: f32) {
        self.normals.push(FloatTuple::new3(x, y, z));
    }

    /// Replace the normal at `index` in place
    pub fn set_normal(&mut self, index: usize, normal: FloatTuple) -> Result<()> {
        let len = self.normals.len();
        *self
            .normals
            .get_mut(index)
            .ok_or(Error::index_out_of_range("Normal", index, len))? = normal;
        Ok(())
    }

    /// The bounding box over all vertices added so far, absent while the
    /// model has no vertices
    pub fn bounds(&self) -> Option<Rect3D> {
        self.bounds
    }

    // ------------------------------------------------------------------
    // Skin weights and armatures
    // ------------------------------------------------------------------

    /// The weight set of the vertex at `index`, absent if the vertex has
    /// no skinning data
    pub fn weights(&self, index: usize) -> Option<&VertexWeightSet> {
        self.weights.get(index).and_then(Option::as_ref)
    }

    /// Replace the weight set of the vertex at `index`
    pub fn set_weights(&mut self, index: usize, weights: VertexWeightSet) -> Result<()> {
        let len = self.weights.len();
        *self
            .weights
            .get_mut(index)
            .ok_or(Error::index_out_of_range("Vertex", index, len))? = Some(weights);
        Ok(())
    }

    /// Attach a weight to the most recently added vertex
    ///
    /// The vertex's weight set is created lazily on the first call.
    /// Repeated calls with the same (armature, bone) key accumulate as
    /// independent entries.
    pub fn add_weight(&mut self, armature: usize, bone: usize, weight: f32) -> Result<()> {
        let slot = self.weights.last_mut().ok_or_else(|| {
            Error::InvalidArgument("no vertex to attach a weight to".to_string())
        })?;
        slot.get_or_insert_with(VertexWeightSet::new)
            .add_weight(BoneIndex::new(armature, bone), weight);
        Ok(())
    }

    /// The armatures, in insertion order
    pub fn armatures(&self) -> &[Armature] {
        &self.armatures
    }

    /// The armature at the given index
    pub fn armature(&self, index: usize) -> Option<&Armature> {
        self.armatures.get(index)
    }

    /// The number of armatures
    pub fn num_armatures(&self) -> usize {
        self.armatures.len()
    }

    /// Replace the armature at `index`
    pub fn set_armature(&mut self, index: usize, armature: Armature) -> Result<()> {
        let len = self.armatures.len();
        *self
            .armatures
            .get_mut(index)
            .ok_or(Error::index_out_of_range("Armature", index, len))? = armature;
        Ok(())
    }

    /// Append an empty armature and make it the target of subsequent
    /// [`add_bone`](Obj::add_bone) calls
    pub fn add_armature(&mut self, name: impl Into<String>) {
        self.armatures.push(Armature::new(name));
    }

    /// Append a bone to the most recently added armature
    ///
    /// The bone's parent index refers into that same armature's bone
    /// list; no tree validation is performed.
    pub fn add_bone(&mut self, bone: Bone) -> Result<()> {
        let armature = self.armatures.last_mut().ok_or_else(|| {
            Error::InvalidArgument("no armature to attach a bone to".to_string())
        })?;
        armature.bones.push(bone);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Activation state machine and face protocol
    // ------------------------------------------------------------------

    /// Stage a new active-group set for the next face insertion
    ///
    /// An empty input is normalized to `["default"]`. Duplicates are
    /// collapsed, keeping first-occurrence order. An empty-string name is
    /// an error. Already-inserted faces are unaffected, and repeated calls
    /// before the next [`add_face`](Obj::add_face) overwrite each other:
    /// last write wins. No group is created until a face commits the set.
    pub fn set_active_group_names<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut staged: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if name.is_empty() {
                return Err(Error::InvalidArgument(
                    "group names must not be empty".to_string(),
                ));
            }
            if !staged.contains(&name) {
                staged.push(name);
            }
        }
        if staged.is_empty() {
            staged.push(DEFAULT_GROUP_NAME.to_string());
        }
        self.next_active_group_names = Some(staged);
        Ok(())
    }

    /// Stage a new active material group for the next face insertion
    ///
    /// An empty name is a no-op that keeps the prior staged or committed
    /// value. At most one material group is active at any time.
    pub fn set_active_material_group_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name.is_empty() {
            return;
        }
        self.next_active_material_group_name = Some(name);
    }

    /// The committed active group names
    pub fn active_group_names(&self) -> &[String] {
        &self.active_group_names
    }

    /// The committed active material group name, if any
    pub fn active_material_group_name(&self) -> Option<&str> {
        self.active_material_group_name.as_deref()
    }

    /// Validate a face's index references, commit staged activation
    /// state, and insert the face
    ///
    /// Validation runs first and is all-or-nothing: an out-of-range index
    /// fails the call before any state (face list, groups, records,
    /// staging) has changed. Then, atomically with respect to the staged
    /// state:
    ///
    /// 1. A staged group set is resolved (creating unregistered groups),
    ///    recorded against this face if it differs from the committed
    ///    active set, committed, and cleared.
    /// 2. A staged material group name is handled the same way.
    /// 3. The face is appended to the global list, to every active
    ///    group, and to the active material group if there is one.
    pub fn add_face(&mut self, face: Face) -> Result<()> {
        Self::check_indices(Some(face.vertex_indices()), self.vertices.len(), "Vertex")?;
        Self::check_indices(face.tex_coord_indices(), self.tex_coords.len(), "TexCoord")?;
        Self::check_indices(face.normal_indices(), self.normals.len(), "Normal")?;

        let face_index = self.faces.len();

        if let Some(staged) = self.next_active_group_names.take() {
            let indices: Vec<usize> = staged
                .iter()
                .map(|name| self.groups.resolve_or_create(name))
                .collect();
            if staged != self.active_group_names {
                self.activated_group_names.insert(face_index, staged.clone());
            }
            self.active_group_indices = indices;
            self.active_group_names = staged;
        }

        if let Some(staged) = self.next_active_material_group_name.take() {
            let index = self.material_groups.resolve_or_create(&staged);
            if Some(staged.as_str()) != self.active_material_group_name.as_deref() {
                self.activated_material_group_names
                    .insert(face_index, staged.clone());
            }
            self.active_material_group_index = Some(index);
            self.active_material_group_name = Some(staged);
        }

        self.faces.push(face);
        for &group_index in &self.active_group_indices {
            self.groups
                .get_mut(group_index)
                .expect("active group index tracks the table")
                .push_face(face_index);
        }
        if let Some(material_index) = self.active_material_group_index {
            self.material_groups
                .get_mut(material_index)
                .expect("active material group index tracks the table")
                .push_face(face_index);
        }
        Ok(())
    }

    /// The faces, in insertion order
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// The face at the given index
    pub fn face(&self, index: usize) -> Option<&Face> {
        self.faces.get(index)
    }

    /// The number of faces
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Replace the face at `index`
    ///
    /// The replacement is validated against the current collection sizes
    /// like an inserted face. Group membership and activation records
    /// stay attached to the slot.
    pub fn set_face(&mut self, index: usize, face: Face) -> Result<()> {
        if index >= self.faces.len() {
            return Err(Error::index_out_of_range("Face", index, self.faces.len()));
        }
        Self::check_indices(Some(face.vertex_indices()), self.vertices.len(), "Vertex")?;
        Self::check_indices(face.tex_coord_indices(), self.tex_coords.len(), "TexCoord")?;
        Self::check_indices(face.normal_indices(), self.normals.len(), "Normal")?;
        self.faces[index] = face;
        Ok(())
    }

    /// The group names that became active at the face at `face_index`,
    /// or absent if no group change was committed there
    pub fn activated_group_names(&self, face_index: usize) -> Option<&[String]> {
        self.activated_group_names
            .get(&face_index)
            .map(Vec::as_slice)
    }

    /// The material group name that became active at the face at
    /// `face_index`, or absent if no material change was committed there
    pub fn activated_material_group_name(&self, face_index: usize) -> Option<&str> {
        self.activated_material_group_names
            .get(&face_index)
            .map(String::as_str)
    }

    /// Iterate over the faces claimed by a group, in the group's order
    pub fn group_faces<'a>(&'a self, group: &'a Group) -> impl Iterator<Item = &'a Face> + 'a {
        group.face_indices().iter().map(|&i| &self.faces[i])
    }

    // ------------------------------------------------------------------
    // Group and material-group registries
    // ------------------------------------------------------------------

    /// The number of registered groups
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// The group at the given position in registration order
    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    /// The group with the given name
    pub fn group_by_name(&self, name: &str) -> Option<&Group> {
        self.groups.get_by_name(name)
    }

    /// Iterate over groups in registration order
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    /// Replace the group at `index`, keeping the name lookup in sync
    ///
    /// If the slot is among the active groups, subsequent faces go to the
    /// replacement.
    pub fn set_group(&mut self, index: usize, group: Group) -> Result<()> {
        self.groups.replace("group", index, group)
    }

    /// Replace the group registered under `name`
    ///
    /// Fails with [`Error::NotFound`] if the name is not registered.
    pub fn set_group_by_name(&mut self, name: &str, group: Group) -> Result<()> {
        self.groups.replace_by_name("group", name, group)
    }

    /// The number of registered material groups
    pub fn num_material_groups(&self) -> usize {
        self.material_groups.len()
    }

    /// The material group at the given position in registration order
    pub fn material_group(&self, index: usize) -> Option<&Group> {
        self.material_groups.get(index)
    }

    /// The material group with the given name
    pub fn material_group_by_name(&self, name: &str) -> Option<&Group> {
        self.material_groups.get_by_name(name)
    }

    /// Iterate over material groups in registration order
    pub fn material_groups(&self) -> impl Iterator<Item = &Group> {
        self.material_groups.iter()
    }

    /// Replace the material group at `index`, keeping the name lookup in
    /// sync
    pub fn set_material_group(&mut self, index: usize, group: Group) -> Result<()> {
        self.material_groups.replace("material group", index, group)
    }

    /// Replace the material group registered under `name`
    ///
    /// Fails with [`Error::NotFound`] if the name is not registered.
    pub fn set_material_group_by_name(&mut self, name: &str, group: Group) -> Result<()> {
        self.material_groups
            .replace_by_name("material group", name, group)
    }

    // ------------------------------------------------------------------
    // Associated file names
    // ------------------------------------------------------------------

    /// The MTL file names associated with this model
    pub fn mtl_file_names(&self) -> &[String] {
        &self.mtl_file_names
    }

    /// Store the MTL file name list verbatim, order preserved
    pub fn set_mtl_file_names<I, S>(&mut self, file_names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mtl_file_names = file_names.into_iter().map(Into::into).collect();
    }

    /// The ACT file names associated with this model
    pub fn act_file_names(&self) -> &[String] {
        &self.act_file_names
    }

    /// Store the ACT file name list verbatim, order preserved
    pub fn set_act_file_names<I, S>(&mut self, file_names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.act_file_names = file_names.into_iter().map(Into::into).collect();
    }

    /// Validate optional index references against a collection size
    fn check_indices(indices: Option<&[usize]>, len: usize, kind: &'static str) -> Result<()> {
        let Some(indices) = indices else {
            return Ok(());
        };
        for &index in indices {
            if index >= len {
                return Err(Error::index_out_of_range(kind, index, len));
            }
        }
        Ok(())
    }
}

impl Default for Obj {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Obj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Obj[vertices={}, tex_coords={}, normals={}, faces={}, groups={}, material_groups={}]",
            self.vertices.len(),
            self.tex_coords.len(),
            self.normals.len(),
            self.faces.len(),
            self.groups.len(),
            self.material_groups.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let obj = Obj::new();
        assert_eq!(obj.num_groups(), 1);
        assert_eq!(obj.group(0).unwrap().name(), "default");
        assert_eq!(obj.active_group_names(), ["default"]);
        assert!(obj.active_material_group_name().is_none());
        assert!(obj.bounds().is_none());
        assert_eq!(obj.num_material_groups(), 0);
    }

    #[test]
    fn test_faces_land_in_default_group() {
        let mut obj = Obj::new();
        obj.add_vertex(0.0, 0.0, 0.0);
        obj.add_vertex(1.0, 0.0, 0.0);
        obj.add_vertex(0.0, 1.0, 0.0);
        obj.add_face(Face::triangle(0, 1, 2)).unwrap();

        assert_eq!(obj.num_faces(), 1);
        assert_eq!(obj.group_by_name("default").unwrap().face_indices(), &[0]);
        // No group change was committed at the first face.
        assert!(obj.activated_group_names(0).is_none());
    }

    #[test]
    fn test_add_vertex_tuple_keeps_extra_components() {
        let mut obj = Obj::new();
        obj.add_vertex_tuple(FloatTuple::new4(1.0, 2.0, 3.0, 0.5))
            .unwrap();
        assert_eq!(obj.vertex(0).unwrap().dimensions(), 4);
        assert_eq!(obj.bounds().unwrap().max, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_display_counts() {
        let mut obj = Obj::new();
        obj.add_vertex(0.0, 0.0, 0.0);
        assert_eq!(
            obj.to_string(),
            "Obj[vertices=1, tex_coords=0, normals=0, faces=0, groups=1, material_groups=0]"
        );
    }
}
