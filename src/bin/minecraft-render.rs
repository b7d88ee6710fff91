use std::path::{Component, Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser};
use minecraft_render::model::DEFAULT_NAMESPACE;
use minecraft_render::{
    Archive, BlockFilter, BlockOutcome, DirArchive, JarArchive, ModelLibrary, RenderOptions,
    ResourceId,
};

#[derive(Parser, Debug)]
#[command(name = "minecraft-render", version, about = "Render block models as inventory icons")]
struct Cli {
    /// Client jar, or an extracted resource directory.
    jar: PathBuf,

    /// Output directory.
    #[arg(default_value = "output")]
    output: PathBuf,

    /// Icon width in pixels.
    #[arg(short = 'w', long, default_value_t = 1000)]
    width: u32,

    /// Icon height in pixels.
    #[arg(short = 't', long, default_value_t = 1000)]
    height: u32,

    /// Orthographic view half-height in model units.
    #[arg(long, default_value_t = 20.0)]
    distance: f32,

    /// Render only the first frame of animated textures.
    #[arg(long)]
    no_animation: bool,

    /// Comma separated block names to render (default: every block).
    #[arg(long, env = "BLOCK_NAMES")]
    blocks: Option<String>,

    /// Namespace whose block models are listed.
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Errors only.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let archive = open_archive(&cli.jar)?;
    let mut library = ModelLibrary::with_namespace(archive, cli.namespace.clone());
    let names = library
        .block_names(&cli.namespace)
        .with_context(|| format!("list block models in '{}'", cli.jar.display()))?;

    let options = RenderOptions {
        width: cli.width,
        height: cli.height,
        distance: cli.distance,
        animation: !cli.no_animation,
        filter: cli
            .blocks
            .as_deref()
            .map_or_else(BlockFilter::all, BlockFilter::parse_list),
        ..RenderOptions::default()
    };

    std::fs::create_dir_all(&cli.output)
        .with_context(|| format!("create output dir '{}'", cli.output.display()))?;

    let mut rendered = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;
    {
        let session = library.render(names, options)?;
        let pad = session.total().to_string().len();
        for block in session {
            let progress = format!("[{:0>pad$} / {:0>pad$}]", block.index, block.total);
            match &block.outcome {
                BlockOutcome::Rendered(image) => {
                    let path = output_path(&cli.output, &block.block_name, &cli.namespace);
                    minecraft_render::encode::write_image(&path, image.bytes())?;
                    rendered += 1;
                    println!("{progress} {} rendered to {}", block.block_name, path.display());
                }
                BlockOutcome::Skipped(reason) => {
                    skipped += 1;
                    println!("{progress} {} skipped due to \"{reason}\"", block.block_name);
                }
                BlockOutcome::Failed(err) => {
                    failed += 1;
                    println!("{progress} {} failed: {err}", block.block_name);
                }
            }
        }
    }
    library.close()?;

    eprintln!(
        "rendering completed: {rendered} rendered, {skipped} skipped, {failed} failed in '{}'",
        cli.output.display()
    );
    Ok(())
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        tracing::Level::ERROR
    } else {
        match verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
}

fn open_archive(path: &Path) -> anyhow::Result<Box<dyn Archive>> {
    if path.is_dir() {
        Ok(Box::new(DirArchive::new(path)?))
    } else {
        Ok(Box::new(JarArchive::open(path)?))
    }
}

/// `<out>/<namespace>/<path>.png`, ignoring path segments that would leave `out`.
fn output_path(out: &Path, block_name: &str, default_namespace: &str) -> PathBuf {
    let id = ResourceId::parse(block_name, default_namespace);
    let mut path = out.join(&id.namespace);
    for part in Path::new(&id.path).components() {
        if let Component::Normal(part) = part {
            path.push(part);
        }
    }
    path.set_extension("png");
    path
}
