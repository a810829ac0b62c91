//! Cheap structural inspection of uploaded mesh bytes.
//!
//! Reads only headers and token counts, without decoding geometry. Useful to
//! show a file summary before the (more expensive) analysis runs.

use crate::MeshFormat;
use crate::stl::{StlEncoding, declared_triangle_count, detect_stl_encoding};

/// Number of leading bytes sampled by [`looks_like_text`].
const TEXT_SAMPLE_SIZE: usize = 512;

/// Summary of a mesh file's structure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MeshFileInfo {
    /// Display name of the format.
    pub format: &'static str,
    /// Whether the content is text.
    pub is_ascii: bool,
    /// Triangle count from the header (binary) or `facet normal` count (text).
    pub estimated_triangles: Option<u64>,
    /// `vertex` count (text) or three per declared triangle (binary).
    pub estimated_vertices: Option<u64>,
    /// Size of the input in bytes.
    pub byte_len: usize,
}

/// Inspect `bytes` declared as `format`.
///
/// STL inputs report their encoding and triangle counts. Other formats only
/// report whether the content looks like text.
///
/// # Example
///
/// ```
/// use mesh_io::{inspect, MeshFormat};
///
/// let info = inspect(b"solid a\nfacet normal 0 0 1\nendsolid a\n", MeshFormat::Stl);
/// assert!(info.is_ascii);
/// assert_eq!(info.estimated_triangles, Some(1));
/// ```
#[must_use]
pub fn inspect(bytes: &[u8], format: MeshFormat) -> MeshFileInfo {
    if !format.is_stl() {
        return MeshFileInfo {
            format: format.name(),
            is_ascii: looks_like_text(bytes),
            estimated_triangles: None,
            estimated_vertices: None,
            byte_len: bytes.len(),
        };
    }

    let (is_ascii, triangles, vertices) = match detect_stl_encoding(bytes) {
        StlEncoding::Ascii => (
            true,
            Some(count_keyword(bytes, b"facet normal")),
            Some(count_keyword(bytes, b"vertex")),
        ),
        StlEncoding::Binary => {
            let triangles = declared_triangle_count(bytes).map(u64::from);
            (false, triangles, triangles.map(|t| t * 3))
        }
    };

    MeshFileInfo {
        format: format.name(),
        is_ascii,
        estimated_triangles: triangles,
        estimated_vertices: vertices,
        byte_len: bytes.len(),
    }
}

/// Count case-insensitive occurrences of `keyword` in an ASCII STL.
fn count_keyword(bytes: &[u8], keyword: &[u8]) -> u64 {
    let count = bytes
        .windows(keyword.len())
        .filter(|w| w.eq_ignore_ascii_case(keyword))
        .count();
    count as u64
}

/// Heuristic text check over the first 512 bytes: more than 95% printable
/// characters and less than 1% NUL bytes.
#[must_use]
pub fn looks_like_text(bytes: &[u8]) -> bool {
    let sample = &bytes[..bytes.len().min(TEXT_SAMPLE_SIZE)];
    if sample.is_empty() {
        return false;
    }

    let nul = sample.iter().filter(|&&b| b == 0).count();
    let text = sample
        .iter()
        .filter(|&&b| (32..=126).contains(&b) || matches!(b, b'\t' | b'\n' | b'\r'))
        .count();

    // 95% / 1% thresholds without float math: 20 * text > 19 * n, 100 * nul < n
    let n = sample.len();
    20 * text > 19 * n && 100 * nul < n
}
