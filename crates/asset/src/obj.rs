//! OBJ parser producing face-expanded position/normal/texcoord streams.
//!
//! Supported subset: `v`, `vn`, `vt` and triangular `f` with full
//! `position/texcoord/normal` references. Everything else is skipped.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
    str::SplitWhitespace,
};

use anyhow::{Context, Result};

use crate::{
    error::ObjError,
    mesh::{AttributeKind, ExpandedMesh},
};

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<ExpandedMesh> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open OBJ file: {}", path.display()))?;
    let mesh = load_obj_from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse OBJ file: {}", path.display()))?;
    log::info!(
        "Loaded {}: {} triangles, {} vertices",
        path.display(),
        mesh.face_count(),
        mesh.positions.len() / 3
    );
    Ok(mesh)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> Result<ExpandedMesh, ObjError> {
    parse_obj(reader)
}

/// Parse OBJ text held in memory.
pub fn parse(contents: &str) -> Result<ExpandedMesh, ObjError> {
    parse_obj(io::Cursor::new(contents))
}

/// One triangle: per corner, the 1-based `[position, texcoord, normal]` indices.
#[derive(Clone, Copy, Debug)]
struct Face {
    line: usize,
    corners: [[usize; 3]; 3],
}

fn parse_obj<R: BufRead>(reader: R) -> Result<ExpandedMesh, ObjError> {
    let mut positions: Vec<f32> = Vec::new();
    let mut normals: Vec<f32> = Vec::new();
    let mut texcoords: Vec<f32> = Vec::new();
    let mut faces: Vec<Face> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.map_err(|source| ObjError::Io {
            line: line_no,
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };

        match tag {
            "v" => read_floats::<3>(parts, line_no, "v", &mut positions)?,
            "vn" => read_floats::<3>(parts, line_no, "vn", &mut normals)?,
            "vt" => read_floats::<2>(parts, line_no, "vt", &mut texcoords)?,
            "f" => faces.push(read_face(parts, line_no)?),
            _ => {
                // o/g/s/usemtl/mtllib and friends carry nothing we upload.
            }
        }
    }

    let vertex_total = faces.len() * 3;
    let mut mesh = ExpandedMesh::new(
        Vec::with_capacity(vertex_total * 3),
        Vec::with_capacity(vertex_total * 3),
        Vec::with_capacity(vertex_total * 2),
    );

    for face in &faces {
        for &[pos, tex, norm] in &face.corners {
            dereference(&positions, pos, AttributeKind::Position, face.line, &mut mesh.positions)?;
            dereference(&texcoords, tex, AttributeKind::TexCoord, face.line, &mut mesh.texcoords)?;
            dereference(&normals, norm, AttributeKind::Normal, face.line, &mut mesh.normals)?;
        }
    }

    log::debug!(
        "Parsed OBJ: {} positions, {} normals, {} texcoords, {} faces",
        positions.len() / 3,
        normals.len() / 3,
        texcoords.len() / 2,
        faces.len()
    );

    Ok(mesh)
}

fn read_floats<const N: usize>(
    parts: SplitWhitespace<'_>,
    line: usize,
    directive: &'static str,
    pool: &mut Vec<f32>,
) -> Result<(), ObjError> {
    let tokens: Vec<&str> = parts.collect();
    if tokens.len() != N {
        return Err(ObjError::FieldCount {
            line,
            directive,
            expected: N,
            found: tokens.len(),
        });
    }
    for token in tokens {
        let value = token.parse::<f32>().map_err(|_| ObjError::InvalidNumber {
            line,
            directive,
            token: token.to_owned(),
        })?;
        pool.push(value);
    }
    Ok(())
}

fn read_face(parts: SplitWhitespace<'_>, line: usize) -> Result<Face, ObjError> {
    let refs: Vec<&str> = parts.collect();
    if refs.len() != 3 {
        return Err(ObjError::NotTriangle {
            line,
            found: refs.len(),
        });
    }

    let mut corners = [[0usize; 3]; 3];
    for (corner, token) in corners.iter_mut().zip(&refs) {
        *corner = read_face_ref(token, line)?;
    }
    Ok(Face { line, corners })
}

fn read_face_ref(token: &str, line: usize) -> Result<[usize; 3], ObjError> {
    let fields: Vec<&str> = token.split('/').collect();
    if fields.len() != 3 || fields.iter().any(|f| f.is_empty()) {
        return Err(ObjError::IncompleteReference {
            line,
            token: token.to_owned(),
        });
    }

    let mut indices = [0usize; 3];
    for (slot, field) in indices.iter_mut().zip(&fields) {
        *slot = match field.parse::<usize>() {
            Ok(idx) if idx > 0 => idx,
            _ => {
                return Err(ObjError::InvalidIndex {
                    line,
                    token: (*field).to_owned(),
                });
            }
        };
    }
    Ok(indices)
}

/// Append the element at 1-based `index` of a flat `pool` to `out`.
fn dereference(
    pool: &[f32],
    index: usize,
    kind: AttributeKind,
    line: usize,
    out: &mut Vec<f32>,
) -> Result<(), ObjError> {
    let n = kind.components();
    let len = pool.len() / n;
    if index == 0 || index > len {
        return Err(ObjError::IndexOutOfRange {
            line,
            kind,
            index,
            len,
        });
    }
    let start = index * n - n;
    out.extend_from_slice(&pool[start..start + n]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::VertexStreams;

    const TRIANGLE: &str = r#"
        # single triangle
        o tri
        v 0.0 0.0 0.0
        v 1.0 0.0 0.0
        v 0.0 1.0 0.0
        vn 0.0 0.0 1.0
        vn 0.0 0.5 0.5
        vn 1.0 0.0 0.0
        vt 0.0 0.0
        vt 1.0 0.0
        vt 0.0 1.0
        usemtl none
        f 1/1/1 2/2/2 3/3/3
    "#;

    #[test]
    fn parse_simple_triangle() {
        let mesh = parse(TRIANGLE).expect("parse triangle");
        assert_eq!(
            mesh.positions,
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(
            mesh.normals,
            vec![0.0, 0.0, 1.0, 0.0, 0.5, 0.5, 1.0, 0.0, 0.0]
        );
        assert_eq!(mesh.texcoords, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(mesh.vertex_count(), 3);
        assert!(mesh.is_consistent());
    }

    #[test]
    fn lengths_scale_with_face_count() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nvn 0 0 1\nvt 0 0\nvt 1 1\n\
                   f 1/1/1 2/2/1 3/1/1\nf 2/2/1 4/1/1 3/2/1\n";
        let mesh = parse(src).unwrap();
        let faces = 2;
        assert_eq!(mesh.positions.len(), 3 * 3 * faces);
        assert_eq!(mesh.normals.len(), 3 * 3 * faces);
        assert_eq!(mesh.texcoords.len(), 2 * 3 * faces);
        assert_eq!(mesh.face_count(), faces);
    }

    #[test]
    fn face_index_is_one_based() {
        let src = "v 1 1 1\nv 2 2 2\nv 3 3 3\nv 4 4 4\nv 5 5 5\nvn 0 1 0\nvt 0.25 0.75\n\
                   f 5/1/1 1/1/1 3/1/1\n";
        let mesh = parse(src).unwrap();
        assert_eq!(&mesh.positions[0..3], &[5.0, 5.0, 5.0]);
        assert_eq!(&mesh.positions[3..6], &[1.0, 1.0, 1.0]);
        assert_eq!(&mesh.positions[6..9], &[3.0, 3.0, 3.0]);
        assert_eq!(&mesh.texcoords[0..2], &[0.25, 0.75]);
    }

    #[test]
    fn faces_may_reference_later_vertices() {
        let src = "vn 0 0 1\nvt 0 0\nf 1/1/1 2/1/1 3/1/1\nv 0 0 0\nv 1 0 0\nv 0 1 0\n";
        let mesh = parse(src).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn quads_are_rejected() {
        let src = "v 0 0 0\nvn 0 0 1\nvt 0 0\nf 1/1/1 1/1/1 1/1/1 1/1/1\n";
        match parse(src) {
            Err(ObjError::NotTriangle { line: 4, found: 4 }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_sub_index_is_rejected() {
        let src = "v 0 0 0\nvn 0 0 1\nf 1//1 1//1 1//1\n";
        assert!(matches!(
            parse(src),
            Err(ObjError::IncompleteReference { line: 3, .. })
        ));
    }

    #[test]
    fn non_numeric_field_names_line_and_directive() {
        let src = "v 0 0 0\nvn 0 zero 1\n";
        let err = parse(src).unwrap_err();
        assert!(matches!(
            err,
            ObjError::InvalidNumber {
                line: 2,
                directive: "vn",
                ..
            }
        ));
        assert!(err.to_string().contains("`vn`"));
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        let err = parse("vt 0.5\n").unwrap_err();
        assert!(matches!(
            err,
            ObjError::FieldCount {
                line: 1,
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn zero_and_out_of_range_indices_are_rejected() {
        let base = "v 0 0 0\nvn 0 0 1\nvt 0 0\n";
        assert!(matches!(
            parse(&format!("{base}f 0/1/1 1/1/1 1/1/1\n")),
            Err(ObjError::InvalidIndex { line: 4, .. })
        ));
        assert!(matches!(
            parse(&format!("{base}f 1/1/1 1/1/2 1/1/1\n")),
            Err(ObjError::IndexOutOfRange {
                kind: AttributeKind::Normal,
                index: 2,
                len: 1,
                ..
            })
        ));
    }

    #[test]
    fn huge_face_index_is_out_of_range() {
        let huge = usize::MAX / 2;
        let src = format!("v 0 0 0\nvn 0 0 1\nvt 0 0\nf {huge}/1/1 1/1/1 1/1/1\n");
        match parse(&src) {
            Err(ObjError::IndexOutOfRange {
                line: 4,
                kind: AttributeKind::Position,
                index,
                len: 1,
            }) => assert_eq!(index, huge),
            other => panic!("unexpected result: {other:?}"),
        }
        let src = format!("v 0 0 0\nvn 0 0 1\nvt 0 0\nf 1/{}/1 1/1/1 1/1/1\n", usize::MAX);
        assert!(matches!(
            parse(&src),
            Err(ObjError::IndexOutOfRange {
                kind: AttributeKind::TexCoord,
                ..
            })
        ));
    }

    #[test]
    fn no_faces_yields_empty_mesh() {
        let mesh = parse("v 0 0 0\n# nothing else\n").unwrap();
        assert!(mesh.is_empty());
    }
}
