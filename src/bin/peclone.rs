use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::debug;
use peclone::{resource_type_from_name, AllowList, ResourceCloner};

/// peclone - copy icons, version info, manifests and other resources between Windows executables
#[derive(Debug, Parser)]
#[command(name = "peclone", version, about, long_about = None)]
struct Cli {
    /// Image to copy resources from.
    #[arg(short, long, value_name = "PATH")]
    source: PathBuf,

    /// Image to copy resources into. The file itself is left unchanged.
    #[arg(short, long, value_name = "PATH")]
    destination: PathBuf,

    /// Path the resulting image is written to.
    #[arg(short, long, value_name = "PATH")]
    output: PathBuf,

    /// Resource types to copy, by name (icon, group-icon, version, ...) or number.
    /// Defaults to bitmap, icon, group-cursor, group-icon, version and manifest.
    #[arg(short, long, value_name = "LIST", value_delimiter = ',', value_parser = parse_resource_type)]
    types: Option<Vec<u16>>,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_resource_type(name: &str) -> Result<u16, String> {
    resource_type_from_name(name).ok_or_else(|| format!("unknown resource type `{name}`"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // info+ on stderr, --verbose enables debug, RUST_LOG overrides
    let level = if cli.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    env_logger::Builder::new()
        .filter_module("peclone", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let allow_list = match cli.types {
        Some(types) => AllowList::from_iter(types),
        None => AllowList::default(),
    };
    debug!("allowed resource types: {:?}", allow_list.iter().collect::<Vec<_>>());

    ResourceCloner::new(allow_list)
        .clone_files(&cli.source, &cli.destination, &cli.output)
        .with_context(|| {
            format!(
                "failed to clone resources from {} into {}",
                cli.source.display(),
                cli.destination.display()
            )
        })
}
