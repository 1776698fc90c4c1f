use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jao", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the layers and events of a package.
    Inspect(InspectArgs),
    /// Play a package on a fixed-step clock until it finishes.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Package folder, `.zip` or `.jao` archive.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Package folder, `.zip` or `.jao` archive.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Event to play instead of `default`.
    #[arg(long)]
    event: Option<String>,

    /// Milliseconds between ticks.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Give up after this many milliseconds.
    #[arg(long, default_value_t = 60_000)]
    max_ms: u64,

    /// Stop looping actions at this time (milliseconds).
    #[arg(long = "finish-at")]
    finish_at: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let extractor = jao::open_package(&args.in_path)
        .with_context(|| format!("open package '{}'", args.in_path.display()))?;
    let model = jao::JaoModel::from_json(extractor.json()).context("parse manifest")?;

    println!("package: {}", extractor.filename());
    println!("data entries: {}", extractor.entries().len());
    for (idx, layer) in model.layers.iter().enumerate() {
        println!("layer {idx}: type={}", layer.data_type.kind);
        for (key, value) in &layer.data_type.attributes {
            println!("  {key}={value}");
        }
        for event in &layer.events {
            println!("  event '{}': {} action(s)", event.name, event.actions.len());
        }
    }
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let registry = jao::ActionRegistry::with_std();
    let mut animation = jao::load_package(&args.in_path, &registry, &jao::TraceRenderer::factory())
        .with_context(|| format!("load package '{}'", args.in_path.display()))?;

    let opts = jao::PlaybackOpts {
        tick_ms: args.tick_ms,
        max_ms: args.max_ms,
        finish_at_ms: args.finish_at,
        event: args.event,
    };
    let stats = jao::play(&mut animation, &opts)?;
    println!(
        "ticks={} elapsed_ms={} finished={}",
        stats.ticks, stats.elapsed_ms, stats.finished
    );
    if !stats.finished {
        anyhow::bail!("animation did not finish within {} ms", opts.max_ms);
    }
    Ok(())
}
