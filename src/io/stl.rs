use crate::mesh::Mesh;
use std::fmt::Debug;
use std::io::Cursor;

impl<S: Clone + Debug + Send + Sync> Mesh<S> {
    /// Convert this Mesh to an **ASCII STL** string with the given `name`.
    ///
    /// ```rust
    /// # use pontoon::mesh::Mesh;
    /// let mesh = Mesh::<()>::cube(1.0, None);
    /// let text = mesh.to_stl_ascii("my_solid");
    /// assert!(text.starts_with("solid my_solid"));
    /// ```
    pub fn to_stl_ascii(&self, name: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("solid {name}\n"));

        self.visit_triangles(|tri, n| {
            out.push_str(&format!(
                "  facet normal {:.6} {:.6} {:.6}\n",
                n.x, n.y, n.z
            ));
            out.push_str("    outer loop\n");
            for p in &tri {
                out.push_str(&format!(
                    "      vertex {:.6} {:.6} {:.6}\n",
                    p.x, p.y, p.z
                ));
            }
            out.push_str("    endloop\n");
            out.push_str("  endfacet\n");
        });

        out.push_str(&format!("endsolid {name}\n"));
        out
    }

    /// Convert this Mesh to a **binary STL** byte vector. The 80 byte header
    /// is left blank.
    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        use stl_io::{Normal, Triangle, Vertex, write_stl};

        let mut triangles = Vec::<Triangle>::with_capacity(self.triangle_count());

        self.visit_triangles(|tri, n| {
            triangles.push(Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: tri.map(|p| Vertex::new([p.x as f32, p.y as f32, p.z as f32])),
            });
        });

        let mut cursor = Cursor::new(Vec::new());
        write_stl(&mut cursor, triangles.iter())?;
        Ok(cursor.into_inner())
    }
}
