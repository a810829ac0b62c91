//! STL (Stereolithography) decoding and encoding.
//!
//! Supports both ASCII and binary STL, read from an in-memory byte slice.
//!
//! # Format Detection
//!
//! [`detect_stl_encoding`] decides between the two encodings:
//! - ASCII files start with "solid" (after optional whitespace)
//! - Binary files have an 80-byte header followed by a triangle count
//!
//! Binary exporters frequently put "solid" in their header too, so a stream
//! that starts with "solid" is still treated as binary when its header holds
//! NUL bytes or its count field matches the number of whole records present.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored, often contains file info)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (often not accurate)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (usually 0)
//! end
//! ```
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```

use std::io::Write;

use mesh_types::{Point3, Triangle, TriangleMesh};
use tracing::{debug, warn};

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
pub const TRIANGLE_SIZE: usize = 50;

/// Header plus the triangle count field.
const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// The two encodings an STL stream can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StlEncoding {
    /// Fixed-size little-endian records.
    Binary,
    /// Whitespace-delimited text.
    Ascii,
}

impl StlEncoding {
    /// Human-readable name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Ascii => "ascii",
        }
    }
}

/// Decide whether `bytes` hold a binary or an ASCII STL.
///
/// # Example
///
/// ```
/// use mesh_io::{detect_stl_encoding, StlEncoding};
///
/// assert_eq!(detect_stl_encoding(b"solid cube\nendsolid cube\n"), StlEncoding::Ascii);
/// assert_eq!(detect_stl_encoding(&[0u8; 84]), StlEncoding::Binary);
/// ```
#[must_use]
pub fn detect_stl_encoding(bytes: &[u8]) -> StlEncoding {
    let head = &bytes[..bytes.len().min(HEADER_SIZE)];
    let text = head.trim_ascii_start();
    let starts_with_solid = text.len() >= 5 && text[..5].eq_ignore_ascii_case(b"solid");

    if !starts_with_solid || head.contains(&0) || binary_layout_matches(bytes) {
        StlEncoding::Binary
    } else {
        StlEncoding::Ascii
    }
}

/// Whether the count field accounts for every whole record in the stream.
///
/// Padding shorter than one record may follow the last triangle.
fn binary_layout_matches(bytes: &[u8]) -> bool {
    declared_triangle_count(bytes).is_some_and(|n| {
        (bytes.len() - PREAMBLE_SIZE) / TRIANGLE_SIZE == n as usize
    })
}

/// Read the triangle count field of a binary STL, if the preamble is present.
#[must_use]
pub fn declared_triangle_count(bytes: &[u8]) -> Option<u32> {
    let field = bytes.get(HEADER_SIZE..PREAMBLE_SIZE)?;
    Some(u32::from_le_bytes([field[0], field[1], field[2], field[3]]))
}

/// Decode an STL, detecting the encoding from its content.
///
/// # Errors
///
/// Returns a parse error if the bytes are not a well-formed STL in the
/// detected encoding.
///
/// # Example
///
/// ```
/// use mesh_io::parse_stl;
///
/// let text = b"solid t
///   facet normal 0 0 1
///     outer loop
///       vertex 0 0 0
///       vertex 1 0 0
///       vertex 0 1 0
///     endloop
///   endfacet
/// endsolid t";
///
/// let mesh = parse_stl(text).unwrap();
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
pub fn parse_stl(bytes: &[u8]) -> IoResult<TriangleMesh> {
    let encoding = detect_stl_encoding(bytes);
    debug!(encoding = encoding.as_str(), bytes = bytes.len(), "Detected STL encoding");

    match encoding {
        StlEncoding::Binary => parse_binary_stl(bytes),
        StlEncoding::Ascii => parse_ascii_stl(bytes),
    }
}

/// Decode a binary STL.
///
/// Padding shorter than one record after the declared triangles is tolerated.
///
/// # Errors
///
/// - [`IoError::InvalidHeader`] if the stream is shorter than 84 bytes
/// - [`IoError::InvalidFaceCount`] if the number of whole triangle records
///   differs from the count the header declares
/// - [`IoError::InvalidContent`] if a vertex coordinate is NaN or infinite
pub fn parse_binary_stl(bytes: &[u8]) -> IoResult<TriangleMesh> {
    let Some(face_count) = declared_triangle_count(bytes) else {
        return Err(IoError::InvalidHeader {
            expected: PREAMBLE_SIZE,
            got: bytes.len(),
        });
    };

    // Validate the count against the data before allocating for it. Padding
    // shorter than one record is allowed, a whole undeclared record is not.
    let body = &bytes[PREAMBLE_SIZE..];
    let available = body.len() / TRIANGLE_SIZE;
    if face_count as usize != available {
        return Err(IoError::InvalidFaceCount {
            expected: face_count,
            got: u32::try_from(available).unwrap_or(u32::MAX),
        });
    }

    let trailing = body.len() % TRIANGLE_SIZE;
    if trailing > 0 {
        warn!(trailing_bytes = trailing, "Binary STL has data after the last triangle");
    }

    let mut mesh = TriangleMesh::with_capacity(face_count as usize);
    for (i, record) in body
        .chunks_exact(TRIANGLE_SIZE)
        .take(face_count as usize)
        .enumerate()
    {
        // Skip normal (12 bytes), read 3 vertices (36 bytes total)
        let tri = Triangle::new(
            read_point(&record[12..24]),
            read_point(&record[24..36]),
            read_point(&record[36..48]),
        );
        if !tri.is_finite() {
            return Err(IoError::invalid_content(format!(
                "triangle {i} has a non-finite vertex coordinate"
            )));
        }
        mesh.push(tri);
    }

    debug!(triangles = face_count, "Parsed binary STL");
    Ok(mesh)
}

/// Read a point from 12 bytes (3 little-endian f32s).
fn read_point(buf: &[u8]) -> Point3<f64> {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Point3::new(f64::from(x), f64::from(y), f64::from(z))
}

/// Where the ASCII parser is in the `solid`/`facet`/`loop` nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AsciiState {
    /// Before `solid` or after `endsolid`.
    Outside,
    InSolid,
    InFacet,
    InLoop,
}

/// Decode an ASCII STL.
///
/// A missing final `endsolid` is tolerated. A solid without facets decodes to
/// an empty mesh.
///
/// # Errors
///
/// Returns [`IoError::Utf8`] for non-UTF-8 input and
/// [`IoError::InvalidContent`] (with the offending line number) for a missing
/// `solid` header, unparsable numbers, misplaced keywords, facets without
/// exactly three vertices, or a facet left open at end of input.
pub fn parse_ascii_stl(bytes: &[u8]) -> IoResult<TriangleMesh> {
    let text = std::str::from_utf8(bytes)?;

    let mut mesh = TriangleMesh::new();
    let mut state = AsciiState::Outside;
    let mut seen_solid = false;
    let mut corners: Vec<Point3<f64>> = Vec::with_capacity(3);
    let mut last_line = 0;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;

        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match (keyword.to_ascii_lowercase().as_str(), state) {
            ("solid", AsciiState::Outside) => {
                seen_solid = true;
                state = AsciiState::InSolid;
            }
            ("facet", AsciiState::InSolid) => {
                if !parts.next().is_some_and(|w| w.eq_ignore_ascii_case("normal")) {
                    return Err(IoError::at_line(line_no, "expected `facet normal`"));
                }
                // The stored normal is not used (exporters even write NaN
                // there), but it must still be three numbers
                parse_triple(&mut parts, line_no, false)?;
                state = AsciiState::InFacet;
            }
            ("outer", AsciiState::InFacet) => {
                if !parts.next().is_some_and(|w| w.eq_ignore_ascii_case("loop")) {
                    return Err(IoError::at_line(line_no, "expected `outer loop`"));
                }
                corners.clear();
                state = AsciiState::InLoop;
            }
            ("vertex", AsciiState::InLoop) => {
                if corners.len() == 3 {
                    return Err(IoError::at_line(line_no, "facet has more than 3 vertices"));
                }
                let [x, y, z] = parse_triple(&mut parts, line_no, true)?;
                corners.push(Point3::new(x, y, z));
            }
            ("endloop", AsciiState::InLoop) => {
                state = AsciiState::InFacet;
            }
            ("endfacet", AsciiState::InFacet) => {
                let [v1, v2, v3] = corners[..] else {
                    return Err(IoError::at_line(
                        line_no,
                        format!("facet has {} vertices, expected 3", corners.len()),
                    ));
                };
                mesh.push(Triangle::new(v1, v2, v3));
                corners.clear();
                state = AsciiState::InSolid;
            }
            ("endsolid", AsciiState::InSolid) => {
                state = AsciiState::Outside;
            }
            (other, _) => {
                return Err(IoError::at_line(
                    line_no,
                    format!("unexpected `{other}` {}", describe(state)),
                ));
            }
        }
    }

    match state {
        AsciiState::Outside if !seen_solid => {
            return Err(IoError::invalid_content("missing `solid` header"));
        }
        AsciiState::InFacet | AsciiState::InLoop => {
            return Err(IoError::at_line(last_line, "unterminated facet at end of input"));
        }
        AsciiState::InSolid => {
            warn!("ASCII STL ends without `endsolid`");
        }
        AsciiState::Outside => {}
    }

    debug!(triangles = mesh.triangle_count(), "Parsed ASCII STL");
    Ok(mesh)
}

/// Parse the next three tokens as floats, optionally requiring them finite.
fn parse_triple<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
    require_finite: bool,
) -> IoResult<[f64; 3]> {
    let mut out = [0.0; 3];
    for slot in &mut out {
        let token = parts
            .next()
            .ok_or_else(|| IoError::at_line(line_no, "expected 3 coordinates"))?;
        let value: f64 = token
            .parse()
            .map_err(|e| IoError::at_line(line_no, format!("invalid number `{token}`: {e}")))?;
        if require_finite && !value.is_finite() {
            return Err(IoError::at_line(line_no, format!("non-finite number `{token}`")));
        }
        *slot = value;
    }
    Ok(out)
}

fn describe(state: AsciiState) -> &'static str {
    match state {
        AsciiState::Outside => "outside of a solid",
        AsciiState::InSolid => "inside a solid",
        AsciiState::InFacet => "inside a facet",
        AsciiState::InLoop => "inside a vertex loop",
    }
}

/// Encode a mesh as STL.
///
/// # Errors
///
/// Returns an error if the writer fails, or if a binary STL would need more
/// than `u32::MAX` triangles.
///
/// # Example
///
/// ```
/// use mesh_io::{parse_stl, write_stl, StlEncoding};
/// use mesh_types::cube;
///
/// let mut bytes = Vec::new();
/// write_stl(&cube(10.0), &mut bytes, StlEncoding::Binary).unwrap();
/// assert_eq!(bytes.len(), 84 + 12 * 50);
///
/// let mesh = parse_stl(&bytes).unwrap();
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn write_stl<W: Write>(mesh: &TriangleMesh, writer: W, encoding: StlEncoding) -> IoResult<()> {
    match encoding {
        StlEncoding::Binary => write_stl_binary(mesh, writer),
        StlEncoding::Ascii => write_stl_ascii(mesh, writer),
    }
}

/// Encode a mesh as STL into a new buffer.
///
/// # Errors
///
/// Returns an error if a binary STL would need more than `u32::MAX` triangles.
pub fn encode_stl(mesh: &TriangleMesh, encoding: StlEncoding) -> IoResult<Vec<u8>> {
    let mut bytes = match encoding {
        StlEncoding::Binary => {
            Vec::with_capacity(PREAMBLE_SIZE + mesh.triangle_count() * TRIANGLE_SIZE)
        }
        StlEncoding::Ascii => Vec::new(),
    };
    write_stl(mesh, &mut bytes, encoding)?;
    Ok(bytes)
}

/// Unit normal as f32, or zero for degenerate faces.
#[allow(clippy::cast_possible_truncation)]
// Truncation: f64 to f32 is intentional for STL format which uses f32
fn facet_normal(tri: &Triangle) -> [f32; 3] {
    tri.normal()
        .map_or([0.0; 3], |n| [n.x as f32, n.y as f32, n.z as f32])
}

fn write_stl_binary<W: Write>(mesh: &TriangleMesh, mut writer: W) -> IoResult<()> {
    // Write 80-byte header (padded with spaces)
    let mut header = [b' '; HEADER_SIZE];
    let text = b"Binary STL generated by printquote mesh-io";
    header[..text.len()].copy_from_slice(text);
    writer.write_all(&header)?;

    let face_count = u32::try_from(mesh.triangle_count())
        .map_err(|_| IoError::invalid_content("too many triangles for binary STL"))?;
    writer.write_all(&face_count.to_le_bytes())?;

    for tri in mesh.iter() {
        for c in facet_normal(tri) {
            writer.write_all(&c.to_le_bytes())?;
        }
        for p in tri.vertices() {
            write_point_binary(&mut writer, &p)?;
        }
        // Attribute byte count
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

/// Write a point as 3 f32s in little-endian.
fn write_point_binary<W: Write>(writer: &mut W, p: &Point3<f64>) -> IoResult<()> {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: f64 to f32 is intentional for STL format
    {
        writer.write_all(&(p.x as f32).to_le_bytes())?;
        writer.write_all(&(p.y as f32).to_le_bytes())?;
        writer.write_all(&(p.z as f32).to_le_bytes())?;
    }
    Ok(())
}

fn write_stl_ascii<W: Write>(mesh: &TriangleMesh, mut writer: W) -> IoResult<()> {
    writeln!(writer, "solid mesh")?;

    for tri in mesh.iter() {
        let [nx, ny, nz] = facet_normal(tri);
        writeln!(writer, "  facet normal {nx:.6e} {ny:.6e} {nz:.6e}")?;
        writeln!(writer, "    outer loop")?;
        for p in tri.vertices() {
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", p.x, p.y, p.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid mesh")?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use mesh_types::cube;

    fn single_triangle_ascii() -> &'static [u8] {
        b"solid test
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid test"
    }

    #[test]
    fn ascii_stl_parsing() {
        let mesh = parse_ascii_stl(single_triangle_ascii()).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangles[0].v2, Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn detect_ascii_and_binary() {
        assert_eq!(detect_stl_encoding(single_triangle_ascii()), StlEncoding::Ascii);
        assert_eq!(detect_stl_encoding(b"  \n SOLID x\n"), StlEncoding::Ascii);

        let binary = encode_stl(&cube(1.0), StlEncoding::Binary).unwrap();
        assert_eq!(detect_stl_encoding(&binary), StlEncoding::Binary);
    }

    #[test]
    fn binary_with_solid_header_is_binary() {
        let mut bytes = encode_stl(&cube(1.0), StlEncoding::Binary).unwrap();
        bytes[..5].copy_from_slice(b"solid");
        // Header is space padded (no NULs), so only the layout check catches it
        assert_eq!(detect_stl_encoding(&bytes), StlEncoding::Binary);
        assert_eq!(parse_stl(&bytes).unwrap().triangle_count(), 12);
    }

    #[test]
    fn binary_round_trip_preserves_positions() {
        let original = cube(10.0);
        let bytes = encode_stl(&original, StlEncoding::Binary).unwrap();
        let loaded = parse_binary_stl(&bytes).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn ascii_round_trip() {
        let original = cube(10.0);
        let bytes = encode_stl(&original, StlEncoding::Ascii).unwrap();
        assert_eq!(detect_stl_encoding(&bytes), StlEncoding::Ascii);
        let loaded = parse_stl(&bytes).unwrap();
        assert_eq!(loaded.triangle_count(), 12);
        assert!((loaded.volume() - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn binary_too_short_for_header() {
        let err = parse_binary_stl(&[0u8; 40]).unwrap_err();
        assert!(matches!(err, IoError::InvalidHeader { expected: 84, got: 40 }));
    }

    #[test]
    fn binary_truncated_records() {
        let bytes = encode_stl(&cube(1.0), StlEncoding::Binary).unwrap();
        let truncated = &bytes[..bytes.len() - 10];
        let err = parse_binary_stl(truncated).unwrap_err();
        assert!(matches!(err, IoError::InvalidFaceCount { expected: 12, got: 11 }));
    }

    #[test]
    fn binary_huge_count_fails_without_allocating() {
        let mut bytes = vec![0u8; PREAMBLE_SIZE];
        bytes[HEADER_SIZE..].copy_from_slice(&u32::MAX.to_le_bytes());
        let err = parse_binary_stl(&bytes).unwrap_err();
        assert!(matches!(err, IoError::InvalidFaceCount { got: 0, .. }));
    }

    #[test]
    fn binary_zero_triangles() {
        let mesh = parse_binary_stl(&[0u8; PREAMBLE_SIZE]).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn binary_trailing_bytes_tolerated() {
        let mut bytes = encode_stl(&cube(1.0), StlEncoding::Binary).unwrap();
        bytes.extend_from_slice(&[0u8; 7]);
        assert_eq!(parse_binary_stl(&bytes).unwrap().triangle_count(), 12);
    }

    #[test]
    fn binary_undeclared_records_rejected() {
        let mut bytes = encode_stl(&cube(1.0), StlEncoding::Binary).unwrap();
        bytes[HEADER_SIZE..PREAMBLE_SIZE].copy_from_slice(&1u32.to_le_bytes());
        let err = parse_binary_stl(&bytes).unwrap_err();
        assert!(matches!(err, IoError::InvalidFaceCount { expected: 1, got: 12 }));
        assert!(parse_stl(&bytes).unwrap_err().is_parse_error());
    }

    #[test]
    fn binary_padding_just_under_one_record() {
        let mut bytes = encode_stl(&cube(1.0), StlEncoding::Binary).unwrap();
        bytes.extend_from_slice(&[0u8; TRIANGLE_SIZE - 1]);
        assert_eq!(parse_binary_stl(&bytes).unwrap().triangle_count(), 12);

        bytes.push(0);
        assert!(matches!(
            parse_binary_stl(&bytes).unwrap_err(),
            IoError::InvalidFaceCount { expected: 12, got: 13 }
        ));
    }

    #[test]
    fn binary_with_solid_header_and_padding_is_binary() {
        let mut bytes = encode_stl(&cube(1.0), StlEncoding::Binary).unwrap();
        let name = b"solid exported_by_cad";
        bytes[..name.len()].copy_from_slice(name);
        bytes.extend_from_slice(&[0xff, 0xfe]);

        assert_eq!(detect_stl_encoding(&bytes), StlEncoding::Binary);
        let mesh = parse_stl(&bytes).unwrap();
        assert_eq!(mesh.triangle_count(), 12);
        assert!((mesh.volume() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn binary_nan_coordinate_rejected() {
        let mut bytes = encode_stl(&cube(1.0), StlEncoding::Binary).unwrap();
        // First vertex x of the first record
        let offset = PREAMBLE_SIZE + 12;
        bytes[offset..offset + 4].copy_from_slice(&f32::NAN.to_le_bytes());
        let err = parse_binary_stl(&bytes).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn ascii_facet_with_two_vertices() {
        let text = b"solid t
facet normal 0 0 1
outer loop
vertex 0 0 0
vertex 1 0 0
endloop
endfacet
endsolid t";
        let err = parse_ascii_stl(text).unwrap_err();
        assert!(format!("{err}").contains("2 vertices"));
        assert!(format!("{err}").contains("line 7"));
    }

    #[test]
    fn ascii_bad_number() {
        let text = b"solid t
facet normal 0 0 1
outer loop
vertex 0 zero 0
";
        let err = parse_ascii_stl(text).unwrap_err();
        assert!(format!("{err}").contains("line 4"));
    }

    #[test]
    fn ascii_unterminated_facet() {
        let text = b"solid t
facet normal 0 0 1
outer loop
vertex 0 0 0
vertex 1 0 0
vertex 0 1 0
";
        assert!(parse_ascii_stl(text).unwrap_err().is_parse_error());
    }

    #[test]
    fn ascii_missing_endsolid_tolerated() {
        let text = b"solid t
facet normal 0 0 1
outer loop
vertex 0 0 0
vertex 1 0 0
vertex 0 1 0
endloop
endfacet
";
        assert_eq!(parse_ascii_stl(text).unwrap().triangle_count(), 1);
    }

    #[test]
    fn ascii_empty_solid() {
        let mesh = parse_ascii_stl(b"solid empty\nendsolid empty\n").unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn ascii_missing_header() {
        assert!(parse_ascii_stl(b"").is_err());
        assert!(parse_ascii_stl(b"facet normal 0 0 1\n").is_err());
    }

    #[test]
    fn ascii_invalid_utf8() {
        let err = parse_ascii_stl(b"solid \xff\xfe\n").unwrap_err();
        assert!(matches!(err, IoError::Utf8(_)));
    }
}
