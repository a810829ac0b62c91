//! Mesh file decoding for print analysis.
//!
//! This crate turns uploaded mesh bytes into a [`TriangleMesh`]:
//!
//! - **STL** (Stereolithography) - Binary and ASCII, auto-detected
//! - **3MF** and **OBJ** - recognized, not decoded yet
//!
//! Everything works on in-memory byte slices. Reading files from disk or
//! object storage is the caller's concern.
//!
//! # Example
//!
//! ```
//! use mesh_io::{encode_stl, parse_mesh, MeshFormat, StlEncoding};
//! use mesh_types::cube;
//!
//! let bytes = encode_stl(&cube(10.0), StlEncoding::Binary).unwrap();
//! let mesh = parse_mesh(&bytes, MeshFormat::Stl).unwrap();
//! assert_eq!(mesh.triangle_count(), 12);
//! ```
//!
//! # Format Detection
//!
//! Formats are chosen from a file name or extension:
//!
//! ```
//! use mesh_io::MeshFormat;
//!
//! assert_eq!(MeshFormat::from_path("part.STL").unwrap(), MeshFormat::Stl);
//! assert!(MeshFormat::from_path("part.step").is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod inspect;
mod stl;

pub use error::{IoError, IoResult};
pub use inspect::{MeshFileInfo, inspect, looks_like_text};
pub use stl::{
    HEADER_SIZE, StlEncoding, TRIANGLE_SIZE, declared_triangle_count, detect_stl_encoding,
    encode_stl, parse_ascii_stl, parse_binary_stl, parse_stl, write_stl,
};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use mesh_types::TriangleMesh;

/// Mesh file formats known to the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MeshFormat {
    /// STL with the encoding detected from the content.
    Stl,
    /// STL forced to the binary layout.
    BinaryStl,
    /// STL forced to the text layout.
    AsciiStl,
    /// 3MF (3D Manufacturing Format). Recognized, not decoded.
    #[cfg_attr(feature = "serde", serde(rename = "3mf"))]
    ThreeMf,
    /// OBJ (Wavefront). Recognized, not decoded.
    Obj,
}

impl MeshFormat {
    /// Resolve a format from a bare extension (case-insensitive, leading dot allowed).
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedFormat`] for anything that is not a
    /// triangle-mesh format.
    pub fn from_extension(ext: &str) -> IoResult<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "stl" => Ok(Self::Stl),
            "3mf" => Ok(Self::ThreeMf),
            "obj" => Ok(Self::Obj),
            _ => Err(IoError::UnsupportedFormat { name: ext }),
        }
    }

    /// Resolve a format from a path's extension.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedFormat`] when the extension is missing
    /// or unknown.
    pub fn from_path<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| IoError::UnsupportedFormat {
                name: "(none)".to_string(),
            })?;
        Self::from_extension(ext)
    }

    /// Canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl | Self::BinaryStl | Self::AsciiStl => "stl",
            Self::ThreeMf => "3mf",
            Self::Obj => "obj",
        }
    }

    /// Display name used in messages and summaries.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Stl | Self::BinaryStl | Self::AsciiStl => "STL",
            Self::ThreeMf => "3MF",
            Self::Obj => "OBJ",
        }
    }

    /// Whether this is one of the STL variants.
    #[must_use]
    pub const fn is_stl(&self) -> bool {
        matches!(self, Self::Stl | Self::BinaryStl | Self::AsciiStl)
    }
}

impl fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MeshFormat {
    type Err = IoError;

    /// Accepts extensions plus the explicit `binary-stl` / `ascii-stl` names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary-stl" => Ok(Self::BinaryStl),
            "ascii-stl" => Ok(Self::AsciiStl),
            other => Self::from_extension(other),
        }
    }
}

/// Decode `bytes` as `format` into a triangle mesh.
///
/// # Errors
///
/// - [`IoError::NotYetImplemented`] for 3MF and OBJ
/// - parse errors ([`IoError::is_parse_error`]) when the bytes are malformed
pub fn parse_mesh(bytes: &[u8], format: MeshFormat) -> IoResult<TriangleMesh> {
    match format {
        MeshFormat::Stl => parse_stl(bytes),
        MeshFormat::BinaryStl => parse_binary_stl(bytes),
        MeshFormat::AsciiStl => parse_ascii_stl(bytes),
        MeshFormat::ThreeMf | MeshFormat::Obj => Err(IoError::NotYetImplemented {
            format: format.name(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mesh_types::cube;

    #[test]
    fn format_from_extension() {
        assert_eq!(MeshFormat::from_extension("stl").unwrap(), MeshFormat::Stl);
        assert_eq!(MeshFormat::from_extension(".STL").unwrap(), MeshFormat::Stl);
        assert_eq!(MeshFormat::from_extension("3mf").unwrap(), MeshFormat::ThreeMf);
        assert_eq!(MeshFormat::from_extension("OBJ").unwrap(), MeshFormat::Obj);

        let err = MeshFormat::from_extension("step").unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat { ref name } if name == "step"));
    }

    #[test]
    fn format_from_path() {
        assert_eq!(MeshFormat::from_path("a/b/part.stl").unwrap(), MeshFormat::Stl);
        assert!(MeshFormat::from_path("no_extension").unwrap_err().is_unsupported());
    }

    #[test]
    fn format_from_str() {
        assert_eq!("binary-stl".parse::<MeshFormat>().unwrap(), MeshFormat::BinaryStl);
        assert_eq!("ascii-stl".parse::<MeshFormat>().unwrap(), MeshFormat::AsciiStl);
        assert_eq!("stl".parse::<MeshFormat>().unwrap(), MeshFormat::Stl);
        assert!("dxf".parse::<MeshFormat>().is_err());
    }

    #[test]
    fn format_names() {
        assert_eq!(MeshFormat::BinaryStl.extension(), "stl");
        assert_eq!(MeshFormat::ThreeMf.extension(), "3mf");
        assert_eq!(MeshFormat::ThreeMf.to_string(), "3MF");
        assert!(MeshFormat::AsciiStl.is_stl());
        assert!(!MeshFormat::Obj.is_stl());
    }

    #[test]
    fn unimplemented_formats_fail() {
        for format in [MeshFormat::ThreeMf, MeshFormat::Obj] {
            let err = parse_mesh(b"anything", format).unwrap_err();
            assert!(matches!(err, IoError::NotYetImplemented { .. }));
            assert_eq!(err.user_message(), "format not yet supported");
        }
    }

    #[test]
    fn forced_encodings() {
        let mesh = cube(2.0);
        let binary = encode_stl(&mesh, StlEncoding::Binary).unwrap();
        let ascii = encode_stl(&mesh, StlEncoding::Ascii).unwrap();

        assert_eq!(parse_mesh(&binary, MeshFormat::BinaryStl).unwrap().triangle_count(), 12);
        assert_eq!(parse_mesh(&ascii, MeshFormat::AsciiStl).unwrap().triangle_count(), 12);

        // Text forced through the binary decoder has no valid record layout
        assert!(parse_mesh(&ascii, MeshFormat::BinaryStl).unwrap_err().is_parse_error());
    }
}
