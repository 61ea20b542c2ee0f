//! Fixed-length float tuples for positions, directions, and coordinates

use std::fmt;

use crate::error::{Error, Result};

/// An immutable tuple of 1 to 4 `f32` components
///
/// Used for vertex positions and normals (3 components), texture
/// coordinates (1 to 3 components), and bone rotations (4 components,
/// quaternion order x, y, z, w).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatTuple {
    components: [f32; 4],
    dimensions: u8,
}

impl FloatTuple {
    /// Create a one-component tuple
    pub fn new(x: f32) -> Self {
        Self {
            components: [x, 0.0, 0.0, 0.0],
            dimensions: 1,
        }
    }

    /// Create a two-component tuple
    pub fn new2(x: f32, y: f32) -> Self {
        Self {
            components: [x, y, 0.0, 0.0],
            dimensions: 2,
        }
    }

    /// Create a three-component tuple
    pub fn new3(x: f32, y: f32, z: f32) -> Self {
        Self {
            components: [x, y, z, 0.0],
            dimensions: 3,
        }
    }

    /// Create a four-component tuple
    pub fn new4(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            components: [x, y, z, w],
            dimensions: 4,
        }
    }

    /// Create a tuple from a slice of 1 to 4 components
    pub fn from_slice(components: &[f32]) -> Result<Self> {
        if components.is_empty() || components.len() > 4 {
            return Err(Error::InvalidArgument(format!(
                "a tuple must have 1 to 4 components, got {}",
                components.len()
            )));
        }
        let mut buf = [0.0; 4];
        buf[..components.len()].copy_from_slice(components);
        Ok(Self {
            components: buf,
            dimensions: components.len() as u8,
        })
    }

    /// The number of components in this tuple
    pub fn dimensions(&self) -> usize {
        self.dimensions as usize
    }

    /// The components as a slice
    pub fn as_slice(&self) -> &[f32] {
        &self.components[..self.dimensions as usize]
    }

    /// The component at the given position, if present
    pub fn get(&self, index: usize) -> Option<f32> {
        self.as_slice().get(index).copied()
    }

    /// The first component
    pub fn x(&self) -> f32 {
        self.components[0]
    }

    /// The second component, or `0.0` if absent
    pub fn y(&self) -> f32 {
        self.components[1]
    }

    /// The third component, or `0.0` if absent
    pub fn z(&self) -> f32 {
        self.components[2]
    }

    /// The fourth component, or `0.0` if absent
    pub fn w(&self) -> f32 {
        self.components[3]
    }
}

impl fmt::Display for FloatTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.as_slice().iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
