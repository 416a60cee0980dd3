use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use tokio::task::JoinSet;

use crate::foundation::error::{GridSnakeError, GridSnakeResult};

/// Per-reference timeout used when callers do not pick one.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(10);

/// Turns an image reference into something embeddable (usually a `data:` URI).
///
/// Implementations must not fail: on any problem they return `reference` unchanged.
pub trait AssetResolver: Send + Sync {
    /// Resolve one reference.
    fn resolve(&self, reference: &str) -> String;
}

/// Reference → embeddable string table. Unknown references resolve to themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedAssets {
    map: BTreeMap<String, String>,
}

impl ResolvedAssets {
    /// Record a resolution.
    pub fn insert(&mut self, reference: impl Into<String>, embedded: impl Into<String>) {
        self.map.insert(reference.into(), embedded.into());
    }

    /// Embeddable form of `reference`, or `reference` itself when unresolved.
    pub fn href<'a>(&'a self, reference: &'a str) -> &'a str {
        self.map.get(reference).map_or(reference, String::as_str)
    }

    /// Number of recorded resolutions.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// `true` when nothing has been resolved.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Resolve every distinct reference concurrently, each bounded by `timeout`.
///
/// Failed, panicking or timed-out resolutions degrade to the original reference.
pub async fn resolve_all<I>(
    resolver: Arc<dyn AssetResolver>,
    references: I,
    timeout: Duration,
) -> ResolvedAssets
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let unique: BTreeSet<String> = references.into_iter().map(Into::into).collect();
    tracing::debug!(count = unique.len(), "resolving assets");

    let mut tasks = JoinSet::new();
    for reference in unique {
        let resolver = Arc::clone(&resolver);
        tasks.spawn(async move {
            let key = reference.clone();
            let work = tokio::task::spawn_blocking(move || resolver.resolve(&reference));
            let embedded = match tokio::time::timeout(timeout, work).await {
                Ok(Ok(embedded)) => embedded,
                Ok(Err(err)) => {
                    tracing::warn!(reference = %key, error = %err, "asset resolver failed");
                    key.clone()
                }
                Err(_) => {
                    tracing::warn!(reference = %key, ?timeout, "asset resolution timed out");
                    key.clone()
                }
            };
            (key, embedded)
        });
    }

    let mut out = ResolvedAssets::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((reference, embedded)) => out.insert(reference, embedded),
            Err(err) => tracing::warn!(error = %err, "asset task aborted"),
        }
    }
    out
}

/// Blocking wrapper around [`resolve_all`] for synchronous callers.
///
/// Resolutions still running after their timeout are abandoned, not awaited.
pub fn resolve_all_blocking<I>(
    resolver: Arc<dyn AssetResolver>,
    references: I,
    timeout: Duration,
) -> GridSnakeResult<ResolvedAssets>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()
        .map_err(|e| GridSnakeError::Other(anyhow::Error::new(e).context("start asset runtime")))?;
    let out = rt.block_on(resolve_all(resolver, references, timeout));
    rt.shutdown_background();
    Ok(out)
}

/// Embeds local files as base64 `data:` URIs.
///
/// `data:` and `http(s)://` references are passed through untouched; fetching
/// remote assets is left to other resolvers.
#[derive(Clone, Debug)]
pub struct FileAssetResolver {
    root: PathBuf,
}

impl FileAssetResolver {
    /// Resolve relative references against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetResolver for FileAssetResolver {
    fn resolve(&self, reference: &str) -> String {
        if reference.starts_with("data:")
            || reference.starts_with("http://")
            || reference.starts_with("https://")
        {
            return reference.to_string();
        }
        let path = self.root.join(reference);
        match std::fs::read(&path) {
            Ok(bytes) => format!(
                "data:{};base64,{}",
                mime_for(reference),
                BASE64_STANDARD.encode(bytes)
            ),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot embed asset");
                reference.to_string()
            }
        }
    }
}

fn mime_for(reference: &str) -> &'static str {
    let ext = reference
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
