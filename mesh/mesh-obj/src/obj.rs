//! OBJ text emission and parsing.
//!
//! The writer is byte-deterministic: six fixed decimals for every
//! coordinate, vertices then normals then a single smoothing group then
//! faces, nothing that depends on hash order or environment. Serializing the
//! same mesh twice yields identical bytes, which the artifact cache relies
//! on.

use std::fs;
use std::path::Path;

use mesh_types::{IndexedMesh, Point3, Vector3, Vertex};
use tracing::debug;

use crate::error::{ObjError, ObjResult};

/// Serialize a mesh to OBJ text.
///
/// Normals are emitted only when every vertex carries one; faces then use
/// the `v//vn` form with matching indices. Winding order is preserved.
#[must_use]
pub fn obj_text(mesh: &IndexedMesh) -> String {
    let with_normals =
        !mesh.vertices.is_empty() && mesh.vertices.iter().all(|v| v.normal.is_some());

    // ~40 bytes per line is a close upper bound for 6-decimal output.
    let line_estimate = mesh.vertices.len() * 2 + mesh.faces.len() + 1;
    let mut out = String::with_capacity(line_estimate * 40);

    for v in &mesh.vertices {
        let p = v.position;
        out.push_str(&format!("v {:.6} {:.6} {:.6}\n", p.x, p.y, p.z));
    }
    if with_normals {
        for v in &mesh.vertices {
            if let Some(n) = v.normal {
                out.push_str(&format!("vn {:.6} {:.6} {:.6}\n", n.x, n.y, n.z));
            }
        }
    }
    out.push_str("s 1\n");
    for face in &mesh.faces {
        let [a, b, c] = [face[0] + 1, face[1] + 1, face[2] + 1];
        if with_normals {
            out.push_str(&format!("f {a}//{a} {b}//{b} {c}//{c}\n"));
        } else {
            out.push_str(&format!("f {a} {b} {c}\n"));
        }
    }
    out
}

/// Parse OBJ text into an indexed mesh.
///
/// Supports the subset this crate writes: `v`, `vn` and triangular `f`
/// records (`v`, `v//vn` or `v/vt/vn` forms). Normals are attached
/// positionally when their count matches the vertex count, which holds for
/// any file produced by [`obj_text`]. Unknown keywords are ignored.
///
/// # Errors
///
/// [`ObjError::MalformedLine`] for unparsable records,
/// [`ObjError::NotATriangle`] for faces with more or fewer than three
/// corners, and [`ObjError::IndexOutOfRange`] for face indices outside the
/// defined vertex list.
pub fn parse_obj(text: &str) -> ObjResult<IndexedMesh> {
    let mut positions: Vec<Point3<f64>> = Vec::new();
    let mut normals: Vec<Vector3<f64>> = Vec::new();
    let mut faces: Vec<[u32; 3]> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let mut tokens = raw.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let [x, y, z] = parse_triple(&mut tokens, line, raw)?;
                positions.push(Point3::new(x, y, z));
            }
            Some("vn") => {
                let [x, y, z] = parse_triple(&mut tokens, line, raw)?;
                normals.push(Vector3::new(x, y, z));
            }
            Some("f") => {
                let corners: Vec<&str> = tokens.collect();
                if corners.len() != 3 {
                    return Err(ObjError::NotATriangle {
                        line,
                        corners: corners.len(),
                    });
                }
                let mut face = [0u32; 3];
                for (slot, corner) in face.iter_mut().zip(&corners) {
                    *slot = parse_corner(corner, positions.len(), line, raw)?;
                }
                faces.push(face);
            }
            // Comments, smoothing groups, object/group names, materials.
            _ => {}
        }
    }

    let attach_normals = normals.len() == positions.len();
    let vertices = positions
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            if attach_normals {
                Vertex::with_normal(p, normals[i])
            } else {
                Vertex::new(p)
            }
        })
        .collect();

    Ok(IndexedMesh { vertices, faces })
}

/// Write a mesh to `path` as OBJ text.
///
/// # Errors
///
/// [`ObjError::Io`] when the file cannot be written.
pub fn save_obj<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> ObjResult<()> {
    let text = obj_text(mesh);
    fs::write(path.as_ref(), &text)?;
    debug!(
        path = %path.as_ref().display(),
        bytes = text.len(),
        "wrote OBJ file"
    );
    Ok(())
}

/// Read a mesh from an OBJ file.
///
/// # Errors
///
/// [`ObjError::Io`] when the file cannot be read, plus any [`parse_obj`]
/// error.
pub fn load_obj<P: AsRef<Path>>(path: P) -> ObjResult<IndexedMesh> {
    parse_obj(&fs::read_to_string(path)?)
}

fn parse_triple<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line: usize,
    raw: &str,
) -> ObjResult<[f64; 3]> {
    let malformed = || ObjError::MalformedLine {
        line,
        content: raw.to_string(),
    };
    let mut out = [0.0; 3];
    for slot in &mut out {
        *slot = tokens
            .next()
            .ok_or_else(malformed)?
            .parse()
            .map_err(|_| malformed())?;
    }
    Ok(out)
}

/// Parse one `f` corner (`7`, `7//7` or `7/3/7`) into a 0-based vertex index.
fn parse_corner(corner: &str, available: usize, line: usize, raw: &str) -> ObjResult<u32> {
    let vertex_part = corner.split('/').next().unwrap_or(corner);
    let index: i64 = vertex_part.parse().map_err(|_| ObjError::MalformedLine {
        line,
        content: raw.to_string(),
    })?;
    let in_range = index >= 1 && (index as usize) <= available;
    if !in_range {
        return Err(ObjError::IndexOutOfRange {
            line,
            index,
            available,
        });
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let zero_based = (index - 1) as u32;
    Ok(zero_based)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::unit_cube;

    fn cube_with_normals() -> IndexedMesh {
        let mut cube = unit_cube();
        for v in &mut cube.vertices {
            let n = (v.position - Point3::new(0.5, 0.5, 0.5)).normalize();
            v.normal = Some(n);
        }
        cube
    }

    #[test]
    fn serialization_is_deterministic() {
        let cube = cube_with_normals();
        assert_eq!(obj_text(&cube), obj_text(&cube));
    }

    #[test]
    fn text_layout_matches_the_format() {
        let text = obj_text(&unit_cube());
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("v 0.000000 0.000000 0.000000"));
        assert!(text.contains("\ns 1\n"));
        // First cube face is [0, 2, 1], 1-indexed in the file.
        assert!(text.contains("f 1 3 2"));
        // No normals on the raw cube, so no vn records and no // form.
        assert!(!text.contains("vn"));
        assert!(!text.contains("//"));
    }

    #[test]
    fn normals_use_the_double_slash_form() {
        let text = obj_text(&cube_with_normals());
        assert_eq!(text.matches("vn ").count(), 8);
        assert!(text.contains("f 1//1 3//3 2//2"));
    }

    #[test]
    fn round_trip_is_byte_identical() {
        let original = obj_text(&cube_with_normals());
        let reparsed = parse_obj(&original).unwrap();
        assert_eq!(obj_text(&reparsed), original);
    }

    #[test]
    fn quad_faces_are_rejected() {
        let result = parse_obj("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");
        assert!(matches!(
            result,
            Err(ObjError::NotATriangle { line: 5, corners: 4 })
        ));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let result = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n");
        assert!(matches!(
            result,
            Err(ObjError::IndexOutOfRange { index: 9, available: 3, .. })
        ));
    }

    #[test]
    fn malformed_vertex_is_rejected() {
        let result = parse_obj("v 0.0 nope 0.0\n");
        assert!(matches!(result, Err(ObjError::MalformedLine { line: 1, .. })));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.obj");
        let cube = cube_with_normals();

        save_obj(&cube, &path).unwrap();
        let loaded = load_obj(&path).unwrap();

        assert_eq!(loaded.vertex_count(), 8);
        assert_eq!(loaded.face_count(), 12);
        assert_eq!(obj_text(&loaded), obj_text(&cube));
    }
}
