//! Text writing for OBJ model files
//!
//! Serializes a model back to OBJ text. Directive placement is
//! reconstructed from the model's activation records: a `g` or `usemtl`
//! line is emitted exactly before the face at which the recorded change
//! was committed.

use std::io::Write;

use crate::error::Result;
use crate::model::{Face, Obj};

/// Write a model as OBJ text
///
/// Emission order: `mtllib`, `actlib`, vertices, texture coordinates,
/// normals, faces. Indices are written 1-based in `v`, `v/vt`, `v//vn`,
/// or `v/vt/vn` form matching each face's attributes.
pub(crate) fn write_obj<W: Write>(obj: &Obj, mut writer: W) -> Result<()> {
    if !obj.mtl_file_names().is_empty() {
        writeln!(writer, "mtllib {}", obj.mtl_file_names().join(" "))?;
    }
    if !obj.act_file_names().is_empty() {
        writeln!(writer, "actlib {}", obj.act_file_names().join(" "))?;
    }

    for vertex in obj.vertices() {
        writeln!(writer, "v {}", vertex)?;
    }
    for tex_coord in obj.tex_coords() {
        writeln!(writer, "vt {}", tex_coord)?;
    }
    for normal in obj.normals() {
        writeln!(writer, "vn {}", normal)?;
    }

    for (face_index, face) in obj.faces().iter().enumerate() {
        if let Some(names) = obj.activated_group_names(face_index) {
            writeln!(writer, "g {}", names.join(" "))?;
        }
        if let Some(name) = obj.activated_material_group_name(face_index) {
            writeln!(writer, "usemtl {}", name)?;
        }
        write_face(&mut writer, face)?;
    }
    Ok(())
}

fn write_face<W: Write>(writer: &mut W, face: &Face) -> Result<()> {
    write!(writer, "f")?;
    for position in 0..face.len() {
        let v = face.vertex_indices()[position] + 1;
        match (face.tex_coord_indices(), face.normal_indices()) {
            (None, None) => write!(writer, " {}", v)?,
            (Some(vt), None) => write!(writer, " {}/{}", v, vt[position] + 1)?,
            (None, Some(vn)) => write!(writer, " {}//{}", v, vn[position] + 1)?,
            (Some(vt), Some(vn)) => {
                write!(writer, " {}/{}/{}", v, vt[position] + 1, vn[position] + 1)?;
            }
        }
    }
    writeln!(writer)?;
    Ok(())
}
