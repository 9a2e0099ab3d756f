/// glTF 2.0 scene documents in JSON (`.gltf`) and binary (`.glb`) form.
///
/// Only the parts the cube touches are typed. Every other property is kept
/// in `extra` maps so a loaded document serializes back without loss.
use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CubeError, Result};
use crate::registry::SceneNode;
use crate::rotation::Orientation;

pub const UNLIT_EXTENSION: &str = "KHR_materials_unlit";

const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
const GLB_VERSION: u32 = 2;
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;
const DATA_URI_PREFIX: &str = "data:application/octet-stream;base64,";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub asset: Asset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scenes: Vec<Scene>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meshes: Vec<Mesh>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<Material>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accessors: Vec<Accessor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buffer_views: Vec<BufferView>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buffers: Vec<Buffer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions_used: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Contents of buffer 0 when it is embedded rather than an external file
    #[serde(skip)]
    pub blob: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Asset {
    fn default() -> Self {
        Self {
            version: "2.0".to_string(),
            generator: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<usize>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<usize>,
    /// `[x, y, z, w]`, as glTF stores it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f64; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<usize>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl SceneNode for Node {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn orientation(&self) -> Orientation {
        match self.rotation {
            Some([x, y, z, w]) => Orientation::new(w, x, y, z),
            None => Orientation::IDENTITY,
        }
    }

    fn set_orientation(&mut self, o: Orientation) {
        self.rotation = Some([o.x, o.y, o.z, o.w]);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub primitives: Vec<Primitive>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Primitive {
    pub attributes: BTreeMap<String, usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<usize>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_color_factor: Option<[f64; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metallic_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness_factor: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_view: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_offset: Option<usize>,
    pub component_type: u32,
    pub count: usize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Vec<f64>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    pub buffer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_offset: Option<usize>,
    pub byte_length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byte_stride: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buffer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub byte_length: usize,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Parse a JSON document, pulling an embedded data-URI buffer 0 into
    /// [`Document::blob`]
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let mut doc: Document = serde_json::from_slice(data)?;
        if let Some(buffer) = doc.buffers.first_mut() {
            if let Some(encoded) = buffer
                .uri
                .as_deref()
                .and_then(|uri| uri.strip_prefix(DATA_URI_PREFIX))
            {
                doc.blob = Some(STANDARD.decode(encoded)?);
                buffer.uri = None;
            }
        }
        Ok(doc)
    }

    /// Serialize as JSON, embedding the blob as a base64 data URI
    pub fn to_json(&self) -> Result<Vec<u8>> {
        match &self.blob {
            Some(blob) => {
                let mut doc = self.clone();
                if let Some(buffer) = doc.buffers.first_mut() {
                    buffer.uri = Some(format!("{DATA_URI_PREFIX}{}", STANDARD.encode(blob)));
                    buffer.byte_length = blob.len();
                }
                Ok(serde_json::to_vec(&doc)?)
            }
            None => Ok(serde_json::to_vec(self)?),
        }
    }

    /// Parse a binary container. The optional BIN chunk becomes the blob.
    pub fn from_glb(data: &[u8]) -> Result<Self> {
        if data.len() < 12 {
            return Err(CubeError::InvalidGlb("file too small for a GLB header".into()));
        }
        if read_u32(data, 0) != GLB_MAGIC {
            return Err(CubeError::InvalidGlb("missing glTF magic".into()));
        }
        let version = read_u32(data, 4);
        if version != GLB_VERSION {
            return Err(CubeError::InvalidGlb(format!("unsupported version {version}")));
        }
        let length = read_u32(data, 8) as usize;
        if length > data.len() {
            return Err(CubeError::InvalidGlb("unexpected end of file".into()));
        }

        let mut json = None;
        let mut bin = None;
        let mut offset = 12;
        while offset + 8 <= length {
            let chunk_length = read_u32(data, offset) as usize;
            let chunk_type = read_u32(data, offset + 4);
            let start = offset + 8;
            let end = start
                .checked_add(chunk_length)
                .filter(|&end| end <= length)
                .ok_or_else(|| CubeError::InvalidGlb("chunk runs past end of file".into()))?;
            match chunk_type {
                CHUNK_JSON if json.is_none() => json = Some(&data[start..end]),
                CHUNK_BIN if bin.is_none() => bin = Some(data[start..end].to_vec()),
                _ => {}
            }
            offset = end;
        }

        let json = json.ok_or_else(|| CubeError::InvalidGlb("missing JSON chunk".into()))?;
        let mut doc: Document = serde_json::from_slice(json)?;
        if let Some(mut bin) = bin {
            if let Some(buffer) = doc.buffers.first() {
                bin.truncate(buffer.byte_length);
            }
            doc.blob = Some(bin);
        }
        Ok(doc)
    }

    /// Serialize as a binary container with the blob in a BIN chunk
    pub fn to_glb(&self) -> Result<Vec<u8>> {
        let mut doc = self.clone();
        if let (Some(blob), Some(buffer)) = (&self.blob, doc.buffers.first_mut()) {
            buffer.uri = None;
            buffer.byte_length = blob.len();
        }
        let mut json = serde_json::to_vec(&doc)?;
        pad(&mut json, b' ');
        let bin = self.blob.as_ref().map(|blob| {
            let mut bin = blob.clone();
            pad(&mut bin, 0);
            bin
        });

        let total = 12 + 8 + json.len() + bin.as_ref().map_or(0, |b| 8 + b.len());
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
        out.extend_from_slice(&GLB_VERSION.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());
        out.extend_from_slice(&(json.len() as u32).to_le_bytes());
        out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
        out.extend_from_slice(&json);
        if let Some(bin) = bin {
            out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
            out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
            out.extend_from_slice(&bin);
        }
        Ok(out)
    }

    /// Detect the container format and parse
    pub fn load(data: &[u8]) -> Result<Self> {
        if data.len() >= 4 && read_u32(data, 0) == GLB_MAGIC {
            Self::from_glb(data)
        } else {
            Self::from_json(data)
        }
    }

    /// Mark every material unlit
    pub fn set_unlit(&mut self) {
        for material in &mut self.materials {
            material
                .extensions
                .insert(UNLIT_EXTENSION.to_string(), Value::Object(Map::new()));
        }
        if !self.extensions_used.iter().any(|e| e == UNLIT_EXTENSION) {
            self.extensions_used.push(UNLIT_EXTENSION.to_string());
        }
    }
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn pad(bytes: &mut Vec<u8>, fill: u8) {
    while bytes.len() % 4 != 0 {
        bytes.push(fill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document {
            nodes: vec![Node::named("UBL"), Node::named("UBM")],
            buffers: vec![Buffer {
                byte_length: 5,
                ..Buffer::default()
            }],
            blob: Some(vec![1, 2, 3, 4, 5]),
            ..Document::default()
        }
    }

    #[test]
    fn test_node_rotation_is_stored_xyzw() {
        let mut node = Node::named("UFL");
        assert_eq!(node.orientation(), Orientation::IDENTITY);

        node.set_orientation(Orientation::new(0.1, 0.2, 0.3, 0.4));
        assert_eq!(node.rotation, Some([0.2, 0.3, 0.4, 0.1]));
        assert_eq!(node.orientation(), Orientation::new(0.1, 0.2, 0.3, 0.4));
    }

    #[test]
    fn test_unknown_fields_survive() {
        let json = br#"{
            "asset": {"version": "2.0", "copyright": "cube"},
            "nodes": [{"name": "UBL", "mesh": 0, "extras": {"tag": 7}}],
            "samplers": [{}]
        }"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.nodes[0].extra["extras"]["tag"], 7);

        let value: Value = serde_json::from_slice(&doc.to_json().unwrap()).unwrap();
        assert_eq!(value["asset"]["copyright"], "cube");
        assert_eq!(value["nodes"][0]["extras"]["tag"], 7);
        assert!(value["samplers"].is_array());
        assert!(value["nodes"][0].get("rotation").is_none());
    }

    #[test]
    fn test_blob_embeds_as_data_uri() {
        let bytes = sample().to_json().unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        let uri = value["buffers"][0]["uri"].as_str().unwrap();
        assert!(uri.starts_with(DATA_URI_PREFIX));

        let doc = Document::from_json(&bytes).unwrap();
        assert_eq!(doc.blob, Some(vec![1, 2, 3, 4, 5]));
        assert_eq!(doc.buffers[0].uri, None);
    }

    #[test]
    fn test_glb_layout() {
        let glb = sample().to_glb().unwrap();
        assert_eq!(&glb[0..4], b"glTF");
        assert_eq!(read_u32(&glb, 4), 2);
        assert_eq!(read_u32(&glb, 8) as usize, glb.len());
        assert_eq!(glb.len() % 4, 0);

        let json_length = read_u32(&glb, 12) as usize;
        assert_eq!(read_u32(&glb, 16), CHUNK_JSON);
        let bin_header = 20 + json_length;
        assert_eq!(read_u32(&glb, bin_header), 8);
        assert_eq!(read_u32(&glb, bin_header + 4), CHUNK_BIN);
        assert_eq!(&glb[bin_header + 8..bin_header + 13], &[1, 2, 3, 4, 5]);

        let doc = Document::load(&glb).unwrap();
        assert_eq!(doc.blob, Some(vec![1, 2, 3, 4, 5]));
        assert_eq!(doc.nodes.len(), 2);
        assert!(doc.buffers[0].uri.is_none());
    }

    #[test]
    fn test_rejects_bad_glb() {
        assert!(matches!(
            Document::from_glb(b"glTF"),
            Err(CubeError::InvalidGlb(_))
        ));
        let mut glb = sample().to_glb().unwrap();
        glb[4] = 1;
        assert!(matches!(Document::from_glb(&glb), Err(CubeError::InvalidGlb(_))));
    }

    #[test]
    fn test_rejects_oversized_chunk_length() {
        for chunk_length in [u32::MAX, 0xFFFF_FFF0, 9] {
            let mut glb = Vec::new();
            glb.extend_from_slice(&GLB_MAGIC.to_le_bytes());
            glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
            glb.extend_from_slice(&28u32.to_le_bytes());
            glb.extend_from_slice(&chunk_length.to_le_bytes());
            glb.extend_from_slice(&CHUNK_JSON.to_le_bytes());
            glb.extend_from_slice(b"{}      ");
            assert!(matches!(
                Document::from_glb(&glb),
                Err(CubeError::InvalidGlb(ref msg)) if msg.contains("past end")
            ));
        }
    }

    #[test]
    fn test_set_unlit_is_idempotent() {
        let mut doc = Document {
            materials: vec![Material::default(), Material::default()],
            ..Document::default()
        };
        doc.set_unlit();
        doc.set_unlit();
        assert_eq!(doc.extensions_used, [UNLIT_EXTENSION]);
        assert!(doc
            .materials
            .iter()
            .all(|m| m.extensions.contains_key(UNLIT_EXTENSION)));
    }
}
