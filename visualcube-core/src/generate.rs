/// Turn a base scene and a list of move tokens into a new scene
use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::{CubeError, Result};
use crate::gltf::{Document, Node};
use crate::notation::{parse_algorithm, Move};
use crate::registry::PieceRegistry;
use crate::scene::solved_scene;
use crate::turn::apply_algorithm;

/// Container format of the generated asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Gltf,
    Glb,
}

impl OutputFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Gltf => "model/gltf+json",
            OutputFormat::Glb => "model/gltf-binary",
        }
    }

    /// Serialize `doc` in this format
    pub fn encode(self, doc: &Document) -> Result<Vec<u8>> {
        match self {
            OutputFormat::Gltf => doc.to_json(),
            OutputFormat::Glb => doc.to_glb(),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Gltf => "gltf",
            OutputFormat::Glb => "glb",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gltf" => Ok(OutputFormat::Gltf),
            "glb" => Ok(OutputFormat::Glb),
            other => Err(CubeError::UnknownFormat(other.to_string())),
        }
    }
}

/// Holds the read-only base scene and produces a fresh copy of it per
/// request. Nothing is shared between calls, so one generator can serve
/// any number of threads.
#[derive(Debug, Clone)]
pub struct Generator {
    base: Document,
}

impl Generator {
    pub fn new(base: Document) -> Self {
        Self { base }
    }

    /// A generator over the built-in solved cube
    pub fn solved() -> Self {
        Self::new(solved_scene().clone())
    }

    pub fn base(&self) -> &Document {
        &self.base
    }

    /// Apply already-parsed moves to a copy of the base scene
    pub fn apply(&self, moves: &[Move]) -> Result<Document> {
        let mut doc = self.base.clone();
        let mut registry = PieceRegistry::from_nodes(std::mem::take(&mut doc.nodes))?;
        apply_algorithm(&mut registry, moves);
        debug!(
            "applied {} moves, {} pieces displaced",
            moves.len(),
            registry.displaced().len()
        );
        doc.nodes = registry.into_nodes();
        Ok(doc)
    }

    /// Parse `tokens` and apply them to a copy of the base scene. Any bad
    /// token or malformed base scene fails the whole call.
    pub fn generate<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Document> {
        let moves = parse_algorithm(tokens)?;
        self.apply(&moves)
    }

    /// [`Generator::generate`], then serialize
    pub fn render<S: AsRef<str>>(
        &self,
        tokens: &[S],
        format: OutputFormat,
        unlit: bool,
    ) -> Result<Vec<u8>> {
        let mut doc = self.generate(tokens)?;
        if unlit {
            doc.set_unlit();
        }
        format.encode(&doc)
    }
}

/// Copy the nodes of `base`, apply `tokens` and return the nodes in
/// canonical label order
pub fn generate<S: AsRef<str>>(base: &Document, tokens: &[S]) -> Result<Vec<Node>> {
    let moves = parse_algorithm(tokens)?;
    let mut registry = PieceRegistry::from_nodes(base.nodes.clone())?;
    apply_algorithm(&mut registry, &moves);
    Ok(registry.into_nodes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;
    use crate::registry::SceneNode;
    use crate::rotation::Orientation;

    #[test]
    fn test_empty_algorithm_returns_base() {
        let generator = Generator::solved();
        let empty: [&str; 0] = [];
        let doc = generator.generate(&empty).unwrap();
        assert_eq!(doc.nodes, generator.base().nodes);
    }

    #[test]
    fn test_base_is_never_mutated() {
        let generator = Generator::solved();
        let before = generator.base().nodes.clone();
        let doc = generator.generate(&["R", "U", "R'", "U'"]).unwrap();
        assert_ne!(doc.nodes, before);
        assert_eq!(generator.base().nodes, before);
    }

    #[test]
    fn test_nodes_carry_their_mesh() {
        let doc = Generator::solved().generate(&["U"]).unwrap();
        let ubl = &doc.nodes[Label::UBL.index()];
        assert_eq!(ubl.name.as_deref(), Some("UFL"));
        assert_eq!(ubl.mesh, Some(Label::UFL.index()));
        assert!(!ubl.orientation().same_rotation(&Orientation::IDENTITY, 1e-6));
        assert_eq!(doc.nodes[Label::DFL.index()].rotation, None);
    }

    #[test]
    fn test_bad_token_fails_whole_request() {
        let generator = Generator::solved();
        assert!(matches!(
            generator.generate(&["R", "U3"]),
            Err(CubeError::UnknownMove(ref t)) if t == "U3"
        ));
    }

    #[test]
    fn test_bad_base_scene_fails() {
        let mut base = solved_scene().clone();
        base.nodes.truncate(25);
        assert!(matches!(
            Generator::new(base).generate(&["R"]),
            Err(CubeError::NodeCount { actual: 25, .. })
        ));

        let mut base = solved_scene().clone();
        base.nodes[4] = Node::named("core");
        assert!(matches!(
            generate(&base, &["R"]),
            Err(CubeError::UnknownLabel(ref name)) if name == "core"
        ));
    }

    #[test]
    fn test_render_formats() {
        let generator = Generator::solved();
        let glb = generator.render(&["F2"], OutputFormat::Glb, false).unwrap();
        assert_eq!(&glb[0..4], b"glTF");

        let json = generator.render(&["F2"], OutputFormat::Gltf, true).unwrap();
        let doc = Document::load(&json).unwrap();
        assert!(doc.extensions_used.iter().any(|e| e == "KHR_materials_unlit"));
        assert_eq!(doc.nodes[Label::UFL.index()].name.as_deref(), Some("DFR"));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("glb".parse::<OutputFormat>().unwrap(), OutputFormat::Glb);
        assert_eq!(OutputFormat::Gltf.content_type(), "model/gltf+json");
        assert!(matches!(
            "obj".parse::<OutputFormat>(),
            Err(CubeError::UnknownFormat(_))
        ));
    }
}
