//! Field paths for error reporting
//!
//! A [`Path`] names the location of a field inside a document tree. Paths are
//! attached to error descriptors so diagnostics can point at the offending
//! field; they are never used to look values up.
//!
//! Copyright (c) 2025 Datadoc Team
//! Licensed under the MIT or Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step into a document tree: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    /// Object member name
    Key(String),
    /// Array position
    Index(usize),
}

/// Ordered location of a field, rendered `$`-rooted (`$.fields[2].name`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The document root, rendered as `$`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Shorthand for a top-level field: `Path::root().child(name)`.
    pub fn field<N: Into<String>>(name: N) -> Self {
        Self::root().child(name)
    }

    /// Extend the path with an object key.
    pub fn child<N: Into<String>>(&self, name: N) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(name.into()));
        Self { segments }
    }

    /// Extend the path with an array index.
    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
