/// VisualCube Core Library - 3x3x3 cube state as a glTF scene
///
/// Parses face-turn notation, applies the turns to the 26 visible pieces of
/// a cube scene, and reads and writes the scene as glTF or GLB.

pub mod error;
pub mod generate;
pub mod geometry;
pub mod gltf;
pub mod label;
pub mod notation;
pub mod registry;
pub mod rotation;
pub mod scene;
pub mod turn;

// Re-export commonly used types
pub use error::{CubeError, Result};
pub use generate::{generate, Generator, OutputFormat};
pub use gltf::Document;
pub use label::Label;
pub use notation::{parse_algorithm, parse_algorithm_str, parse_move, Face, Move, Turn};
pub use registry::{PieceRegistry, SceneNode};
pub use rotation::Orientation;
pub use turn::{apply_algorithm, apply_move};
