//! Built-in sample geometry, usable without any asset on disk.

/// Unit cube (`[-1, 1]^3`), triangulated, with per-face normals and UVs. CCW winding.
pub const CUBE_OBJ: &str = "\
o cube
v -1.0 -1.0 -1.0
v  1.0 -1.0 -1.0
v  1.0  1.0 -1.0
v -1.0  1.0 -1.0
v -1.0 -1.0  1.0
v  1.0 -1.0  1.0
v  1.0  1.0  1.0
v -1.0  1.0  1.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn  0.0  0.0  1.0
vn  0.0  0.0 -1.0
vn  0.0  1.0  0.0
vn  0.0 -1.0  0.0
vn -1.0  0.0  0.0
vn  1.0  0.0  0.0
s off
# front (+Z)
f 5/1/1 6/2/1 7/3/1
f 5/1/1 7/3/1 8/4/1
# back (-Z)
f 1/2/2 3/4/2 2/1/2
f 1/2/2 4/3/2 3/4/2
# top (+Y)
f 4/1/3 7/3/3 3/2/3
f 4/1/3 8/4/3 7/3/3
# bottom (-Y)
f 1/1/4 2/2/4 6/3/4
f 1/1/4 6/3/4 5/4/4
# left (-X)
f 1/1/5 5/2/5 8/3/5
f 1/1/5 8/3/5 4/4/5
# right (+X)
f 2/2/6 3/3/6 7/4/6
f 2/2/6 7/4/6 6/1/6
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mesh::VertexStreams, obj};

    #[test]
    fn cube_parses_to_twelve_triangles() {
        let mesh = obj::parse(CUBE_OBJ).unwrap();
        assert_eq!(mesh.face_count(), 12);
        assert_eq!(mesh.vertex_count(), 36);
        assert!(mesh.is_consistent());
        assert!(mesh.positions.iter().all(|c| c.abs() == 1.0));
    }
}
