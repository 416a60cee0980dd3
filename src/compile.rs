//! Overlay compilation: wires the planners together and assembles the output.

pub mod compiler;
pub mod output;

pub use compiler::{ANIMATED_CLASS, SceneDocument, compile_overlay, compile_scene};
pub use output::{CompiledOverlay, MarkupFragment, Stylesheet};
