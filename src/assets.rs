//! Asset references: embedding via an external resolver and wildcard selection.

pub mod resolver;
pub mod wildcard;

pub use resolver::{
    AssetResolver, DEFAULT_RESOLVE_TIMEOUT, FileAssetResolver, ResolvedAssets, resolve_all,
    resolve_all_blocking,
};
pub use wildcard::{is_wildcard, pick_wildcard};
