//! Triangle-mesh contact shape backed by an OBJ file.

use crate::property::PropertyList;
use crate::{ContactGeometry, ContactGeometryError, ContactShape, NativeGeometry, Result, ScaleSet};
use sinew_frame::PhysicalFrame;
use sinew_math::{Mat3, Vec3};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};

const MESH_FILE: &str = "mesh_file";

/// Indexed triangle mesh in the geometry frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleMesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[usize; 3]>,
}

impl TriangleMesh {
    /// Build a mesh, checking that every face index is in range and that no
    /// face repeats a vertex.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<[usize; 3]>) -> Result<Self> {
        for (i, face) in faces.iter().enumerate() {
            if let Some(&bad) = face.iter().find(|&&v| v >= vertices.len()) {
                return Err(ContactGeometryError::InvalidProperty {
                    property: "faces".to_string(),
                    value: format!("{:?}", face),
                    reason: format!("face {} references vertex {} of {}", i, bad, vertices.len()),
                });
            }
            if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
                return Err(ContactGeometryError::InvalidProperty {
                    property: "faces".to_string(),
                    value: format!("{:?}", face),
                    reason: format!("face {} is degenerate", i),
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Load every model of an OBJ file into one mesh, triangulating polygons.
    pub fn load_obj(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (models, _) = tobj::load_obj(path, &options).map_err(|e| ContactGeometryError::MeshLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for model in &models {
            let mesh = &model.mesh;
            let base = vertices.len();
            vertices.extend(mesh.positions.chunks_exact(3).map(|p| {
                Vec3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))
            }));
            faces.extend(mesh.indices.chunks_exact(3).map(|tri| {
                [
                    base + tri[0] as usize,
                    base + tri[1] as usize,
                    base + tri[2] as usize,
                ]
            }));
        }
        if faces.is_empty() {
            return Err(ContactGeometryError::MeshLoad {
                path: path.display().to_string(),
                reason: "no triangles found".to_string(),
            });
        }
        info!(path = %path.display(), vertices = vertices.len(), faces = faces.len(), "loaded contact mesh");
        Self::new(vertices, faces)
    }

    /// Apply a linear map to every vertex.
    pub fn transform_vertices(&mut self, map: &Mat3) {
        for v in &mut self.vertices {
            *v = map * *v;
        }
    }
}

/// Contact shape whose surface is a triangle mesh.
///
/// The mesh is either given directly or read from `mesh_file` by
/// [`update_geometry`](ContactShape::update_geometry). A relative
/// `mesh_file` is looked up in the base directory when one is set.
///
/// Only `mesh_file` is persisted. Scaling changes the loaded vertices, not
/// the file, so reloading (or saving and loading again) brings back the
/// unscaled surface, and a mesh built with
/// [`from_triangles`](Self::from_triangles) saves with an empty `mesh_file`.
#[derive(Debug, Clone)]
pub struct ContactMesh {
    geometry: ContactGeometry,
    filename: String,
    base_dir: Option<PathBuf>,
    mesh: Option<TriangleMesh>,
}

impl ContactMesh {
    pub const TYPE_NAME: &'static str = "ContactMesh";

    /// Unattached mesh shape with no surface yet.
    pub fn new(name: &str) -> Self {
        Self {
            geometry: ContactGeometry::new(name),
            filename: String::new(),
            base_dir: None,
            mesh: None,
        }
    }

    /// Mesh shape attached to `frame` with an in-memory surface.
    pub fn from_triangles(
        name: &str,
        mesh: TriangleMesh,
        location: Vec3,
        orientation: Vec3,
        frame: &Rc<PhysicalFrame>,
    ) -> Self {
        Self {
            geometry: ContactGeometry::with_pose(name, location, orientation, frame),
            filename: String::new(),
            base_dir: None,
            mesh: Some(mesh),
        }
    }

    /// Mesh shape attached to `frame`, read from an OBJ file.
    pub fn from_file(
        name: &str,
        filename: &str,
        location: Vec3,
        orientation: Vec3,
        frame: &Rc<PhysicalFrame>,
    ) -> Result<Self> {
        let mut shape = Self {
            geometry: ContactGeometry::with_pose(name, location, orientation, frame),
            filename: filename.to_string(),
            base_dir: None,
            mesh: None,
        };
        shape.update_geometry()?;
        Ok(shape)
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Change the source file. The loaded surface is dropped until the next
    /// [`update_geometry`](ContactShape::update_geometry).
    pub fn set_filename(&mut self, filename: &str) {
        self.filename = filename.to_string();
        self.mesh = None;
    }

    pub fn mesh(&self) -> Option<&TriangleMesh> {
        self.mesh.as_ref()
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Where `mesh_file` is read from.
    pub fn source_path(&self) -> PathBuf {
        let file = Path::new(&self.filename);
        match &self.base_dir {
            Some(dir) if file.is_relative() => dir.join(file),
            _ => file.to_path_buf(),
        }
    }
}

impl ContactShape for ContactMesh {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn geometry(&self) -> &ContactGeometry {
        &self.geometry
    }

    fn geometry_mut(&mut self) -> &mut ContactGeometry {
        &mut self.geometry
    }

    fn create_native_geometry(&self) -> Result<NativeGeometry> {
        let mesh = match &self.mesh {
            Some(mesh) => mesh.clone(),
            None if !self.filename.is_empty() => TriangleMesh::load_obj(self.source_path())?,
            None => {
                return Err(ContactGeometryError::InvalidProperty {
                    property: MESH_FILE.to_string(),
                    value: String::new(),
                    reason: format!("mesh `{}` has neither a surface nor a file", self.geometry.name()),
                });
            }
        };
        Ok(NativeGeometry::TriangleMesh {
            vertices: mesh.vertices,
            faces: mesh.faces,
        })
    }

    /// Stretch vertices along the base body's axes: `v' = R_BP^T S R_BP v`.
    fn scale(&mut self, scale_set: &ScaleSet) -> Result<()> {
        let Some(factors) = self.geometry.scale_factors(scale_set)? else {
            return Ok(());
        };
        if self.mesh.is_none() {
            self.update_geometry()?;
        }
        let x_bp = self.geometry.find_transform_in_base_frame()?;
        let r = x_bp.rotation_matrix();
        let map = r.transpose() * Mat3::from_diagonal(&factors) * r;
        if let Some(mesh) = self.mesh.as_mut() {
            debug!(mesh = self.geometry.name(), ?factors, "scaling mesh vertices");
            mesh.transform_vertices(&map);
        }
        Ok(())
    }

    /// Re-read `mesh_file`, discarding any scaling applied since the last
    /// read. In-memory meshes without a file are kept.
    fn update_geometry(&mut self) -> Result<()> {
        if !self.filename.is_empty() {
            self.mesh = Some(TriangleMesh::load_obj(self.source_path())?);
        }
        Ok(())
    }

    fn set_base_dir(&mut self, dir: &Path) {
        self.base_dir = Some(dir.to_path_buf());
    }

    fn write_shape_properties(&self, out: &mut PropertyList) {
        out.push((MESH_FILE, self.filename.clone()));
    }

    fn read_shape_property(&mut self, name: &str, raw: &str) -> Result<bool> {
        if name != MESH_FILE {
            return Ok(false);
        }
        self.set_filename(raw.trim());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sinew_frame::FrameGraph;
    use std::f64::consts::FRAC_PI_2;
    use std::fs;
    use std::path::PathBuf;

    const QUAD_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";

    fn write_obj(stem: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("sinew-{}-{}.obj", stem, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    fn tetra() -> TriangleMesh {
        TriangleMesh::new(
            vec![Vec3::zeros(), Vec3::x(), Vec3::y(), Vec3::z()],
            vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn test_mesh_validation() {
        assert!(TriangleMesh::new(vec![Vec3::zeros(); 3], vec![[0, 1, 3]]).is_err());
        assert!(TriangleMesh::new(vec![Vec3::zeros(); 3], vec![[0, 1, 1]]).is_err());
    }

    #[test]
    fn test_load_obj_triangulates() {
        let path = write_obj("quad", QUAD_OBJ);
        let mesh = TriangleMesh::load_obj(&path).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces.len(), 2);
        assert_eq!(mesh.vertices[2], Vec3::new(1.0, 1.0, 0.0));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            TriangleMesh::load_obj("/nonexistent/sinew/pad.obj"),
            Err(ContactGeometryError::MeshLoad { .. })
        ));
    }

    #[test]
    fn test_from_file_and_native() {
        let path = write_obj("pad", QUAD_OBJ);
        let mut graph = FrameGraph::new();
        let foot = graph.add_body("foot").unwrap();
        let pad = ContactMesh::from_file(
            "pad",
            path.to_str().unwrap(),
            Vec3::zeros(),
            Vec3::zeros(),
            &foot,
        )
        .unwrap();
        match pad.create_native_geometry().unwrap() {
            NativeGeometry::TriangleMesh { vertices, faces } => {
                assert_eq!(vertices.len(), 4);
                assert_eq!(faces.len(), 2);
            }
            other => panic!("unexpected {:?}", other),
        }
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_empty_mesh_shape_cannot_build_native() {
        assert!(ContactMesh::new("m").create_native_geometry().is_err());
    }

    #[test]
    fn test_scale_along_body_axes() {
        let mut graph = FrameGraph::new();
        let shank = graph.add_body("tibia_r").unwrap();
        // geometry X lies along body Y
        let mut shape = ContactMesh::from_triangles(
            "shin",
            tetra(),
            Vec3::new(0.0, 0.2, 0.0),
            Vec3::new(0.0, 0.0, FRAC_PI_2),
            &shank,
        );
        let set = ScaleSet::new().with("tibia_r", Vec3::new(1.0, 2.0, 1.0));
        shape.scale(&set).unwrap();

        let mesh = shape.mesh().unwrap();
        assert_relative_eq!(mesh.vertices[1], Vec3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[2], Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[3], Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert_eq!(shape.geometry().location(), Vec3::new(0.0, 0.2, 0.0));
    }

    #[test]
    fn test_mesh_file_property() {
        let mut shape = ContactMesh::new("m");
        assert!(shape.set_property("mesh_file", " foot.obj ").unwrap());
        assert_eq!(shape.filename(), "foot.obj");
        assert!(shape.mesh().is_none());
        assert_eq!(shape.properties().last().unwrap(), &("mesh_file", "foot.obj".to_string()));
    }

    #[test]
    fn test_relative_file_resolves_against_base_dir() {
        let dir = std::env::temp_dir().join(format!("sinew-mesh-dir-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("pad.obj"), QUAD_OBJ).unwrap();

        let mut shape = ContactMesh::new("pad");
        shape.set_property("mesh_file", "pad.obj").unwrap();
        shape.set_base_dir(&dir);
        assert_eq!(shape.source_path(), dir.join("pad.obj"));
        shape.update_geometry().unwrap();
        assert_eq!(shape.mesh().unwrap().faces.len(), 2);
        // the file name is persisted as written
        assert_eq!(shape.properties().last().unwrap(), &("mesh_file", "pad.obj".to_string()));

        let absolute = dir.join("pad.obj");
        shape.set_filename(absolute.to_str().unwrap());
        shape.set_base_dir(Path::new("/nonexistent"));
        assert_eq!(shape.source_path(), absolute);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_reload_discards_scaling() {
        let path = write_obj("reload", QUAD_OBJ);
        let mut graph = FrameGraph::new();
        let foot = graph.add_body("foot").unwrap();
        let mut shape = ContactMesh::from_file(
            "pad",
            path.to_str().unwrap(),
            Vec3::zeros(),
            Vec3::zeros(),
            &foot,
        )
        .unwrap();
        shape
            .scale(&ScaleSet::new().with("foot", Vec3::new(3.0, 1.0, 1.0)))
            .unwrap();
        assert_eq!(shape.mesh().unwrap().vertices[1], Vec3::new(3.0, 0.0, 0.0));

        shape.update_geometry().unwrap();
        assert_eq!(shape.mesh().unwrap().vertices[1], Vec3::new(1.0, 0.0, 0.0));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_in_memory_mesh_saves_without_file() {
        let mut graph = FrameGraph::new();
        let foot = graph.add_body("foot").unwrap();
        let mut shape = ContactMesh::from_triangles("pad", tetra(), Vec3::zeros(), Vec3::zeros(), &foot);
        shape.update_geometry().unwrap();
        assert!(shape.mesh().is_some());
        assert_eq!(shape.properties().last().unwrap(), &("mesh_file", String::new()));
    }
}
