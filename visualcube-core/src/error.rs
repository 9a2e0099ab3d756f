/// Errors raised while validating moves, building the piece registry,
/// or reading and writing scene documents
use thiserror::Error;

use crate::label::Label;

#[derive(Debug, Error)]
pub enum CubeError {
    /// A move token did not match any of the 18 canonical forms
    #[error("unknown move: {0:?}")]
    UnknownMove(String),

    #[error("expected {expected} scene nodes, found {actual}")]
    NodeCount { expected: usize, actual: usize },

    /// A scene node is named something other than a position label
    #[error("unexpected node name: {0:?}")]
    UnknownLabel(String),

    /// Two nodes claim the same position. With exactly 26 nodes this also
    /// means some other position is left empty.
    #[error("position {0} is occupied by more than one node, leaving another empty")]
    DuplicateLabel(Label),

    #[error("invalid glTF JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid GLB container: {0}")]
    InvalidGlb(String),

    #[error("invalid embedded buffer: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unsupported output format {0:?}, expected gltf or glb")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, CubeError>;
