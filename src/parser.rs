//! Text parsing for OBJ model files
//!
//! The reader drives the [`Obj`] mutation API in file order: geometry
//! directives append to the model's collections, `g`/`usemtl` directives
//! stage activation changes that the next `f` directive commits. Index
//! references are resolved here (1-based to 0-based, negative to
//! relative), so the model layer only ever sees absolute indices.

use std::io::BufRead;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{Face, Obj};

/// Configuration for reading OBJ files
///
/// # Example
///
/// ```
/// use libobj::parser::ReadConfig;
///
/// let config = ReadConfig::new().strict(true);
/// assert!(config.is_strict());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReadConfig {
    strict: bool,
}

impl ReadConfig {
    /// Create the default configuration: unknown directives are logged
    /// and skipped
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn unknown directives into [`Error::UnsupportedDirective`]
    /// instead of skipping them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Whether unknown directives are errors
    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

/// Parse an OBJ model from a reader with the default configuration
pub fn read_obj<R: BufRead>(reader: R) -> Result<Obj> {
    read_obj_with_config(reader, ReadConfig::new())
}

/// Parse an OBJ model from a reader
///
/// Reads to the end of the stream. Any error (I/O, syntax, or a model
/// error such as an out-of-range face reference) aborts the parse.
pub fn read_obj_with_config<R: BufRead>(reader: R, config: ReadConfig) -> Result<Obj> {
    let mut obj = Obj::new();
    let mut mtl_file_names: Vec<String> = Vec::new();
    let mut act_file_names: Vec<String> = Vec::new();

    let mut lines = reader.lines();
    let mut line_number = 0usize;
    while let Some(line) = lines.next() {
        let mut line = line?;
        line_number += 1;
        let start_line = line_number;

        // A trailing backslash joins the next physical line.
        loop {
            let trimmed_len = {
                let trimmed = line.trim_end();
                if !trimmed.ends_with('\\') {
                    break;
                }
                trimmed.len()
            };
            line.truncate(trimmed_len - 1);
            match lines.next() {
                Some(next) => {
                    line_number += 1;
                    line.push(' ');
                    line.push_str(&next?);
                }
                None => break,
            }
        }

        if let Some(comment) = line.find('#') {
            line.truncate(comment);
        }

        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };
        let args: Vec<&str> = tokens.collect();

        match keyword {
            "v" => {
                if args.len() < 3 || args.len() > 4 {
                    return Err(Error::syntax(
                        start_line,
                        format!("'v' expects 3 coordinates, got {}", args.len()),
                    ));
                }
                let x = parse_f32(args[0], start_line, "x coordinate")?;
                let y = parse_f32(args[1], start_line, "y coordinate")?;
                let z = parse_f32(args[2], start_line, "z coordinate")?;
                if args.len() == 4 {
                    debug!(line = start_line, "ignoring w component of 'v' directive");
                }
                obj.add_vertex(x, y, z);
            }
            "vt" => {
                if args.is_empty() || args.len() > 3 {
                    return Err(Error::syntax(
                        start_line,
                        format!("'vt' expects 1 to 3 coordinates, got {}", args.len()),
                    ));
                }
                let u = parse_f32(args[0], start_line, "u coordinate")?;
                match args.len() {
                    1 => obj.add_tex_coord(u),
                    2 => {
                        let v = parse_f32(args[1], start_line, "v coordinate")?;
                        obj.add_tex_coord_2d(u, v);
                    }
                    _ => {
                        let v = parse_f32(args[1], start_line, "v coordinate")?;
                        let w = parse_f32(args[2], start_line, "w coordinate")?;
                        obj.add_tex_coord_3d(u, v, w);
                    }
                }
            }
            "vn" => {
                if args.len() != 3 {
                    return Err(Error::syntax(
                        start_line,
                        format!("'vn' expects 3 coordinates, got {}", args.len()),
                    ));
                }
                let x = parse_f32(args[0], start_line, "x coordinate")?;
                let y = parse_f32(args[1], start_line, "y coordinate")?;
                let z = parse_f32(args[2], start_line, "z coordinate")?;
                obj.add_normal(x, y, z);
            }
            "f" => {
                let face = parse_face(&obj, &args, start_line)?;
                obj.add_face(face)?;
            }
            "g" => {
                obj.set_active_group_names(args)?;
            }
            "usemtl" => {
                if args.is_empty() {
                    return Err(Error::syntax(start_line, "'usemtl' expects a material name"));
                }
                obj.set_active_material_group_name(args.join(" "));
            }
            "mtllib" => {
                if args.is_empty() {
                    return Err(Error::syntax(
                        start_line,
                        "'mtllib' expects at least one file name",
                    ));
                }
                mtl_file_names.extend(args.iter().map(|s| s.to_string()));
                obj.set_mtl_file_names(mtl_file_names.iter().cloned());
            }
            "actlib" => {
                if args.is_empty() {
                    return Err(Error::syntax(
                        start_line,
                        "'actlib' expects at least one file name",
                    ));
                }
                act_file_names.extend(args.iter().map(|s| s.to_string()));
                obj.set_act_file_names(act_file_names.iter().cloned());
            }
            // Recognized directives that carry no model state
            "o" | "s" | "l" | "p" => {
                debug!(directive = keyword, line = start_line, "skipping directive");
            }
            _ => {
                if config.is_strict() {
                    return Err(Error::UnsupportedDirective {
                        line: start_line,
                        directive: keyword.to_string(),
                    });
                }
                warn!(
                    directive = keyword,
                    line = start_line,
                    "skipping unknown directive"
                );
            }
        }
    }

    debug!(
        vertices = obj.num_vertices(),
        tex_coords = obj.num_tex_coords(),
        normals = obj.num_normals(),
        faces = obj.num_faces(),
        groups = obj.num_groups(),
        "parsed OBJ model"
    );
    Ok(obj)
}

/// Parse the operands of an `f` directive into a [`Face`]
///
/// The first reference fixes the face's shape: every following reference
/// must provide exactly the components the first one did.
fn parse_face(obj: &Obj, args: &[&str], line: usize) -> Result<Face> {
    if args.len() < 3 {
        return Err(Error::syntax(
            line,
            format!("'f' expects at least 3 references, got {}", args.len()),
        ));
    }

    let mut vertices = Vec::with_capacity(args.len());
    let mut tex_coords: Option<Vec<usize>> = None;
    let mut normals: Option<Vec<usize>> = None;

    for (position, token) in args.iter().enumerate() {
        let (v, vt, vn) = split_face_ref(token, line)?;
        vertices.push(resolve_index(v, obj.num_vertices(), "vertex", line)?);

        if position == 0 {
            if vt.is_some() {
                tex_coords = Some(Vec::with_capacity(args.len()));
            }
            if vn.is_some() {
                normals = Some(Vec::with_capacity(args.len()));
            }
        }
        match (&mut tex_coords, vt) {
            (Some(list), Some(vt)) => {
                list.push(resolve_index(vt, obj.num_tex_coords(), "texcoord", line)?);
            }
            (None, None) => {}
            _ => {
                return Err(Error::syntax(
                    line,
                    format!("face reference '{}' does not match the face's shape", token),
                ));
            }
        }
        match (&mut normals, vn) {
            (Some(list), Some(vn)) => {
                list.push(resolve_index(vn, obj.num_normals(), "normal", line)?);
            }
            (None, None) => {}
            _ => {
                return Err(Error::syntax(
                    line,
                    format!("face reference '{}' does not match the face's shape", token),
                ));
            }
        }
    }

    Face::new(vertices, tex_coords, normals)
}

/// Split a face reference token into its `v`, `vt`, `vn` parts
fn split_face_ref(token: &str, line: usize) -> Result<(isize, Option<isize>, Option<isize>)> {
    let malformed = || {
        Error::syntax(
            line,
            format!(
                "malformed face reference '{}', expected v, v/vt, v//vn, or v/vt/vn",
                token
            ),
        )
    };
    let parse = |part: &&str| part.parse::<isize>().map_err(|_| malformed());

    let parts: Vec<&str> = token.split('/').collect();
    match parts.as_slice() {
        [v] => Ok((parse(v)?, None, None)),
        [v, vt] => Ok((parse(v)?, Some(parse(vt)?), None)),
        [v, "", vn] => Ok((parse(v)?, None, Some(parse(vn)?))),
        [v, vt, vn] => Ok((parse(v)?, Some(parse(vt)?), Some(parse(vn)?))),
        _ => Err(malformed()),
    }
}

/// Resolve a 1-based or negative-relative OBJ reference to an absolute
/// 0-based index
///
/// `-1` refers to the most recently added element. Bounds of positive
/// references are left to the model's insertion-time validation.
fn resolve_index(value: isize, count: usize, kind: &str, line: usize) -> Result<usize> {
    if value > 0 {
        Ok((value - 1) as usize)
    } else if value < 0 {
        let absolute = count as isize + value;
        if absolute < 0 {
            return Err(Error::syntax(
                line,
                format!(
                    "relative {} reference {} precedes the start of the list ({} defined)",
                    kind, value, count
                ),
            ));
        }
        Ok(absolute as usize)
    } else {
        Err(Error::syntax(
            line,
            format!("{} reference 0 is invalid, OBJ indices are 1-based", kind),
        ))
    }
}

fn parse_f32(token: &str, line: usize, what: &str) -> Result<f32> {
    token
        .parse::<f32>()
        .map_err(|_| Error::syntax(line, format!("invalid {} '{}'", what, token)))
}
