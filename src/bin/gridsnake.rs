use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::SeedableRng as _;

#[derive(Parser, Debug)]
#[command(name = "gridsnake", version)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a scene document into a stylesheet and markup fragments.
    Compile(CompileArgs),
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Input scene JSON (`{grid, path, config}`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output stylesheet path.
    #[arg(long)]
    out: PathBuf,

    /// Optional output path for the markup fragments as JSON.
    #[arg(long)]
    markup: Option<PathBuf>,

    /// Directory image references are resolved against. Defaults to the input's directory.
    #[arg(long)]
    assets_root: Option<PathBuf>,

    /// Per-asset resolution timeout in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Seed for wildcard asset selection.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Compile(args) => cmd_compile(args),
    }
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read scene '{}'", args.in_path.display()))?;
    let doc = gridsnake::SceneDocument::from_json(&text).with_context(|| "parse scene JSON")?;

    let assets_root = match &args.assets_root {
        Some(root) => root.clone(),
        None => args
            .in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    let available = list_assets(&assets_root);

    let mut rng = rand::rngs::StdRng::seed_from_u64(args.seed);
    let mut ctx = gridsnake::NormalizeContext {
        available_assets: &available,
        rng: &mut rng,
    };
    let config = gridsnake::normalize(&doc.config, &mut ctx)?;

    let resolver = Arc::new(gridsnake::FileAssetResolver::new(&assets_root));
    let assets = gridsnake::assets::resolve_all_blocking(
        resolver,
        config.asset_references(),
        args.timeout_ms
            .map_or(gridsnake::assets::DEFAULT_RESOLVE_TIMEOUT, Duration::from_millis),
    )?;

    let overlay = gridsnake::compile_overlay(&doc.grid, &doc.path, &config, &assets)?;
    for d in &overlay.diagnostics {
        eprintln!("warning: {d}");
    }

    write_file(&args.out, &overlay.stylesheet)?;
    eprintln!("wrote {}", args.out.display());
    if let Some(markup) = &args.markup {
        let json = serde_json::to_string_pretty(&overlay.fragments)
            .with_context(|| "serialize markup fragments")?;
        write_file(markup, &json)?;
        eprintln!("wrote {}", markup.display());
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))
}

/// Files under `root` as `/`-separated relative paths, sorted.
fn list_assets(root: &Path) -> Vec<String> {
    let mut out = Vec::new();
    let mut dirs = vec![root.to_path_buf()];
    while let Some(dir) = dirs.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            tracing::debug!(dir = %dir.display(), "cannot list asset directory");
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                dirs.push(path);
            } else if let Ok(rel) = path.strip_prefix(root) {
                let parts: Vec<String> = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                out.push(parts.join("/"));
            }
        }
    }
    out.sort();
    out
}
