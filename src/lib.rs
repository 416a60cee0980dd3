//! gridsnake compiles a snake walking over a contribution grid into a looping CSS
//! animation.
//!
//! The pipeline is:
//!
//! - Parse an [`OverlayConfig`] and [`normalize`] it into a [`ResolvedConfig`]
//! - Optionally embed image assets with [`resolve_all`]
//! - Call [`compile_overlay`] to get a [`CompiledOverlay`]: one stylesheet plus markup
//!   fragments whose ids and classes match its selectors
#![forbid(unsafe_code)]

pub mod assets;
pub mod compile;
pub mod config;
pub mod counter;
pub mod foundation;
pub mod keyframes;
pub mod plan;

pub use crate::assets::{AssetResolver, FileAssetResolver, ResolvedAssets, resolve_all};
pub use crate::compile::{
    CompiledOverlay, MarkupFragment, SceneDocument, compile_overlay, compile_scene,
};
pub use crate::config::{NormalizeContext, OverlayConfig, ResolvedConfig, normalize};
pub use crate::foundation::core::{EPS, Grid, GridPos, PathStep, Point, build_steps};
pub use crate::foundation::error::{GridSnakeError, GridSnakeResult};
pub use crate::keyframes::{AnimationProgram, Keyframe, merge_keyframes, reduce_waypoints};
