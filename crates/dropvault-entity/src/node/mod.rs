//! File/folder node entities.

pub mod model;

pub use model::{FALLBACK_FILE_TYPE, FOLDER_TYPE, NewNode, Node, NodeKind, NodeRow};
