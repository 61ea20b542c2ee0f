//! # libobj
//!
//! A pure Rust implementation for reading and writing Wavefront OBJ files.
//!
//! This library provides a mutable in-memory model of an OBJ file:
//! vertices, texture coordinates, normals, polygon faces, named groups,
//! material groups, armatures, and per-vertex skin weights, together
//! with a text reader that populates it and a text writer that
//! serializes it back, preserving `g`/`usemtl` directive placement.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Incremental model construction with strict index validation
//! - Group and material-group tracking with directive placement records
//! - Bounding-box maintenance over all inserted vertices
//! - Armatures and per-vertex bone weights for skinned models
//!
//! ## Example
//!
//! ```no_run
//! use libobj::Obj;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::open("model.obj")?;
//! let obj = Obj::from_reader(BufReader::new(file))?;
//!
//! println!("Model contains {} faces", obj.num_faces());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod model;
pub mod parser;
mod writer;

pub use error::{Error, Result};
pub use model::{
    Armature, Bone, BoneIndex, Face, FloatTuple, Group, GroupTable, Obj, Rect3D, VertexWeight,
    VertexWeightSet,
};
pub use parser::ReadConfig;

use std::io::BufRead;

impl Obj {
    /// Parse an OBJ file from a reader
    ///
    /// This method uses the default configuration, which skips unknown
    /// directives with a log message.
    ///
    /// # Arguments
    ///
    /// * `reader` - A buffered reader containing OBJ text
    ///
    /// # Example
    ///
    /// ```no_run
    /// use libobj::Obj;
    /// use std::fs::File;
    /// use std::io::BufReader;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let file = File::open("model.obj")?;
    /// let obj = Obj::from_reader(BufReader::new(file))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        parser::read_obj(reader)
    }

    /// Parse an OBJ file from a reader with custom configuration
    ///
    /// # Arguments
    ///
    /// * `reader` - A buffered reader containing OBJ text
    /// * `config` - Reader configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use libobj::{Obj, ReadConfig};
    /// use std::fs::File;
    /// use std::io::BufReader;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let file = File::open("model.obj")?;
    /// let obj = Obj::from_reader_with_config(
    ///     BufReader::new(file),
    ///     ReadConfig::new().strict(true),
    /// )?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_reader_with_config<R: BufRead>(reader: R, config: ReadConfig) -> Result<Self> {
        parser::read_obj_with_config(reader, config)
    }

    /// Write the model as OBJ text to a writer
    ///
    /// # Arguments
    ///
    /// * `writer` - A writer to receive the OBJ text
    ///
    /// # Example
    ///
    /// ```no_run
    /// use libobj::Obj;
    /// use std::fs::File;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut obj = Obj::new();
    /// // ... populate the model ...
    ///
    /// let file = File::create("output.obj")?;
    /// obj.to_writer(file)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<()> {
        writer::write_obj(self, writer)
    }

    /// Write the model as OBJ text to a file path
    ///
    /// This is a convenience method that creates the file and writes the
    /// model to it.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the output file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use libobj::Obj;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut obj = Obj::new();
    /// // ... populate the model ...
    ///
    /// obj.write_to_file("output.obj")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn write_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        use std::io::Write;
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
