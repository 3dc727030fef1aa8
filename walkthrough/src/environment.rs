// Environment loading: turns a GLB file into a render scene plus the
// navigable surface the locomotion system walks on.
//
// The floor proxy is found by name here and nowhere else. Past this module the
// core only ever sees a typed `NavigableSurface`.

use std::path::Path;

use cgmath::{Matrix4, SquareMatrix, Vector3, vec4};
use engine::{
    assets_log,
    scene::{Geometry, Material, Scene, SceneObject},
};

use crate::{
    dolly::Dolly, errors::EnvironmentError, navigation::NavigableSurface, session::SessionContext,
};

/// Meshes whose name contains this tag make up the walkable floor.
pub const NAVIGABLE_SURFACE_TAG: &str = "PROXY";

const GLASS_TAG: &str = "Glass";
const GLASS_OPACITY: f32 = 0.1;
const SKYBOX_TAG: &str = "SkyBox";

/// One triangle mesh pulled out of the environment file, in world space.
#[derive(Debug, Clone)]
pub struct EnvironmentMesh {
    pub name: String,
    pub material: Material,
    pub positions: Vec<Vector3<f32>>,
    pub indices: Vec<u32>,
}

impl EnvironmentMesh {
    pub fn is_navigable_surface(&self) -> bool {
        self.name.contains(NAVIGABLE_SURFACE_TAG)
    }
}

pub struct LoadedEnvironment {
    pub scene: Scene,
    pub navigable_surface: Option<NavigableSurface>,
}

impl LoadedEnvironment {
    pub fn into_session(self, dolly: Dolly) -> SessionContext {
        SessionContext::new(self.scene, dolly, self.navigable_surface)
    }
}

/// Triangles gathered from every primitive of the tagged mesh.
#[derive(Default)]
struct SurfaceParts {
    name: String,
    positions: Vec<Vector3<f32>>,
    triangles: Vec<[u32; 3]>,
}

impl SurfaceParts {
    fn append(&mut self, mesh: &EnvironmentMesh) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&mesh.positions);
        self.triangles.extend(
            mesh.indices
                .chunks_exact(3)
                .map(|tri| [tri[0] + offset, tri[1] + offset, tri[2] + offset]),
        );
    }

    fn build(self) -> Option<NavigableSurface> {
        match NavigableSurface::from_triangles(self.name, &self.positions, &self.triangles) {
            Ok(surface) => {
                assets_log!(
                    INFO,
                    "navigable surface '{}' with {} triangles",
                    surface.name(),
                    surface.triangle_count()
                );
                Some(surface)
            }
            Err(err) => {
                assets_log!(WARN, "unusable navigable surface: {}", err);
                None
            }
        }
    }
}

/// Build the render scene and pick out the navigable surface.
///
/// Tagged meshes stay in the scene but are hidden. All primitives of the first
/// tagged mesh make up the navigable surface; differently named tagged meshes
/// are ignored with a warning. A malformed surface leaves the environment
/// without one rather than failing the load.
pub fn build_environment(meshes: Vec<EnvironmentMesh>) -> LoadedEnvironment {
    let mut scene = Scene::new();
    let mut parts: Option<SurfaceParts> = None;

    for mut mesh in meshes {
        if mesh.is_navigable_surface() {
            mesh.material.visible = false;
            let parts = parts.get_or_insert_with(|| SurfaceParts {
                name: mesh.name.clone(),
                ..SurfaceParts::default()
            });
            if parts.name == mesh.name {
                parts.append(&mesh);
            } else {
                assets_log!(
                    WARN,
                    "ignoring extra navigable surface '{}', already using '{}'",
                    mesh.name,
                    parts.name
                );
            }
        } else if mesh.material.name.contains(GLASS_TAG) {
            mesh.material.opacity = GLASS_OPACITY;
            mesh.material.transparent = true;
        } else if mesh.material.name.contains(SKYBOX_TAG) {
            mesh.material.unlit = true;
        }

        let geometry = Geometry::Triangles {
            positions: mesh.positions,
            indices: mesh.indices,
        };
        scene.add_object(SceneObject::new(mesh.name, mesh.material, geometry));
    }

    let navigable_surface = parts.and_then(SurfaceParts::build);
    if navigable_surface.is_none() {
        assets_log!(
            WARN,
            "environment has no usable mesh tagged '{}'; locomotion will be unavailable",
            NAVIGABLE_SURFACE_TAG
        );
    }

    LoadedEnvironment {
        scene,
        navigable_surface,
    }
}

pub fn load_glb_file(path: &Path) -> Result<LoadedEnvironment, EnvironmentError> {
    let bytes = std::fs::read(path).map_err(|source| EnvironmentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    assets_log!(INFO, "loading environment {}", path.display());
    load_glb(&bytes)
}

pub fn load_glb(bytes: &[u8]) -> Result<LoadedEnvironment, EnvironmentError> {
    Ok(build_environment(read_glb_meshes(bytes)?))
}

/// Every triangle primitive in the default scene, with node transforms baked in.
pub fn read_glb_meshes(bytes: &[u8]) -> Result<Vec<EnvironmentMesh>, EnvironmentError> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let document = gltf.document;
    let blob = gltf.blob;

    let mut buffers: Vec<Vec<u8>> = Vec::new();
    for buffer in document.buffers() {
        let data = match buffer.source() {
            gltf::buffer::Source::Bin => blob.clone().ok_or(EnvironmentError::MissingBlob)?,
            gltf::buffer::Source::Uri(uri) => {
                return Err(EnvironmentError::ExternalBuffer(uri.to_owned()));
            }
        };
        if data.len() < buffer.length() {
            return Err(EnvironmentError::BufferTooShort {
                index: buffer.index(),
                expected: buffer.length(),
                actual: data.len(),
            });
        }
        buffers.push(data);
    }

    let mut meshes = Vec::new();
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next());
    if let Some(scene) = scene {
        for node in scene.nodes() {
            process_node(&node, &buffers, Matrix4::identity(), &mut meshes);
        }
    }

    assets_log!(DEBUG, "read {} meshes from GLB", meshes.len());
    Ok(meshes)
}

fn process_node(
    node: &gltf::Node,
    buffers: &[Vec<u8>],
    parent: Matrix4<f32>,
    meshes: &mut Vec<EnvironmentMesh>,
) {
    let transform = parent * Matrix4::from(node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        let name = node
            .name()
            .or_else(|| mesh.name())
            .map(str::to_owned)
            .unwrap_or_else(|| format!("mesh_{}", mesh.index()));

        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                assets_log!(DEBUG, "skipping non-triangle primitive in '{}'", name);
                continue;
            }
            if let Some(env_mesh) = process_primitive(&name, &primitive, buffers, &transform) {
                meshes.push(env_mesh);
            }
        }
    }

    for child in node.children() {
        process_node(&child, buffers, transform, meshes);
    }
}

fn process_primitive(
    name: &str,
    primitive: &gltf::Primitive,
    buffers: &[Vec<u8>],
    transform: &Matrix4<f32>,
) -> Option<EnvironmentMesh> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));

    let positions: Vec<Vector3<f32>> = reader
        .read_positions()?
        .map(|p| (transform * vec4(p[0], p[1], p[2], 1.0)).truncate())
        .collect();

    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    let gltf_material = primitive.material();
    let material_name = gltf_material.name().unwrap_or_default();
    let base_color = gltf_material.pbr_metallic_roughness().base_color_factor();
    let mut material = Material::with_color(material_name, base_color);
    material.opacity = base_color[3];

    Some(EnvironmentMesh {
        name: name.to_owned(),
        material,
        positions,
        indices,
    })
}
