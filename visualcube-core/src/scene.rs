/// The solved cube as a self-contained glTF document
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::geometry::{face_normal, Cubie, Quad, CUBIE_SIZE};
use crate::gltf::{
    Accessor, Asset, Buffer, BufferView, Document, Material, Mesh, Node, PbrMetallicRoughness,
    Primitive, Scene,
};
use crate::label::Label;
use crate::notation::Face;

const GENERATOR: &str = concat!("visualcube ", env!("CARGO_PKG_VERSION"));

const UNSIGNED_SHORT: u32 = 5123;
const FLOAT: u32 = 5126;
const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// Bytes per quad of positions or normals: 4 vertices of 3 floats
const QUAD_BYTES: usize = 4 * 3 * 4;

/// Index of the plastic material, after the six sticker materials
const INNER_MATERIAL: usize = 6;

fn sticker_color(face: Face) -> [f64; 4] {
    match face {
        Face::Up => [1.0, 1.0, 1.0, 1.0],
        Face::Down => [1.0, 0.85, 0.0, 1.0],
        Face::Front => [0.0, 0.62, 0.28, 1.0],
        Face::Back => [0.0, 0.27, 0.68, 1.0],
        Face::Left => [1.0, 0.35, 0.0, 1.0],
        Face::Right => [0.72, 0.07, 0.2, 1.0],
    }
}

fn material(name: &str, color: [f64; 4]) -> Material {
    Material {
        name: Some(name.to_string()),
        pbr_metallic_roughness: Some(PbrMetallicRoughness {
            base_color_factor: Some(color),
            metallic_factor: Some(0.0),
            roughness_factor: Some(0.5),
            ..PbrMetallicRoughness::default()
        }),
        ..Material::default()
    }
}

fn push_vec3(bytes: &mut Vec<u8>, values: [f32; 3]) {
    for value in values {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
}

/// Build the solved cube: one node and mesh per label in canonical order,
/// all geometry packed into an embedded buffer
pub fn solved_document() -> Document {
    let cubies: Vec<Cubie> = Label::ALL
        .iter()
        .map(|&label| Cubie::new(label, CUBIE_SIZE))
        .collect();

    let mut indices = Vec::new();
    for index in Quad::INDICES {
        indices.extend_from_slice(&index.to_le_bytes());
    }

    let mut normals = Vec::new();
    for face in Face::ALL {
        let n = face_normal(face);
        for _ in 0..4 {
            push_vec3(&mut normals, [n.x, n.y, n.z]);
        }
    }

    let mut positions = Vec::new();
    let mut accessors = vec![Accessor {
        buffer_view: Some(0),
        component_type: UNSIGNED_SHORT,
        count: Quad::INDICES.len(),
        kind: "SCALAR".to_string(),
        ..Accessor::default()
    }];
    for face in Face::ALL {
        accessors.push(Accessor {
            buffer_view: Some(1),
            byte_offset: Some(face.index() * QUAD_BYTES),
            component_type: FLOAT,
            count: 4,
            kind: "VEC3".to_string(),
            ..Accessor::default()
        });
    }

    let mut meshes = Vec::with_capacity(cubies.len());
    for cubie in &cubies {
        let mut primitives = Vec::with_capacity(cubie.quads.len());
        for quad in &cubie.quads {
            let position_accessor = accessors.len();
            let (min, max) = (quad.min(), quad.max());
            accessors.push(Accessor {
                buffer_view: Some(2),
                byte_offset: Some(positions.len()),
                component_type: FLOAT,
                count: 4,
                kind: "VEC3".to_string(),
                min: Some(vec![min.x.into(), min.y.into(), min.z.into()]),
                max: Some(vec![max.x.into(), max.y.into(), max.z.into()]),
                ..Accessor::default()
            });
            for vertex in &quad.vertices {
                let p = vertex.position;
                push_vec3(&mut positions, [p.x, p.y, p.z]);
            }

            let attributes = BTreeMap::from([
                ("NORMAL".to_string(), 1 + quad.side.index()),
                ("POSITION".to_string(), position_accessor),
            ]);
            primitives.push(Primitive {
                attributes,
                indices: Some(0),
                material: Some(quad.sticker.map_or(INNER_MATERIAL, Face::index)),
                ..Primitive::default()
            });
        }
        meshes.push(Mesh {
            name: Some(cubie.label.to_string()),
            primitives,
            ..Mesh::default()
        });
    }

    let mut buffer_views = Vec::with_capacity(3);
    let mut blob = Vec::with_capacity(indices.len() + normals.len() + positions.len());
    for (bytes, target) in [
        (indices, ELEMENT_ARRAY_BUFFER),
        (normals, ARRAY_BUFFER),
        (positions, ARRAY_BUFFER),
    ] {
        buffer_views.push(BufferView {
            buffer: 0,
            byte_offset: Some(blob.len()),
            byte_length: bytes.len(),
            target: Some(target),
            ..BufferView::default()
        });
        blob.extend_from_slice(&bytes);
    }

    let mut materials: Vec<Material> = Face::ALL
        .into_iter()
        .map(|face| material(&face.letter().to_string(), sticker_color(face)))
        .collect();
    materials.push(material("inner", [0.02, 0.02, 0.02, 1.0]));

    let nodes = Label::ALL
        .iter()
        .enumerate()
        .map(|(index, label)| Node {
            mesh: Some(index),
            ..Node::named(label.as_str())
        })
        .collect();

    Document {
        asset: Asset {
            generator: Some(GENERATOR.to_string()),
            ..Asset::default()
        },
        scene: Some(0),
        scenes: vec![Scene {
            name: Some("cube".to_string()),
            nodes: (0..Label::COUNT).collect(),
            ..Scene::default()
        }],
        nodes,
        meshes,
        materials,
        accessors,
        buffer_views,
        buffers: vec![Buffer {
            byte_length: blob.len(),
            ..Buffer::default()
        }],
        blob: Some(blob),
        ..Document::default()
    }
}

static SOLVED: OnceLock<Document> = OnceLock::new();

/// Shared read-only copy of [`solved_document`], built on first use
pub fn solved_scene() -> &'static Document {
    SOLVED.get_or_init(solved_document)
}
