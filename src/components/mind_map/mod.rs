//! Canvas-rendered mind map of a repository's files, components and services.

mod adapter;
mod component;
mod layout;
mod render;
mod state;
mod style;
mod types;
mod viewport;

pub use component::MindMap;
pub use types::MindMapData;
