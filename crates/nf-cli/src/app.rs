//! Command-line surface and the end-to-end run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use nf_core::TransverseMercator;
use nf_graphml::load_graphml;
use nf_network::merge;
use nf_output::{write_network, OutputPaths};

use crate::NetfuseConfig;

/// Merge a drive graph and a walk graph (GraphML, WGS84) into one network
/// file in Korea 2000 / Unified CS, plus its gzip twin.
#[derive(Parser, Debug)]
#[command(name = "netfuse", author, version, about, long_about = None)]
pub struct CliArgs {
    /// GraphML file of the drive (car) graph
    pub drive: PathBuf,
    /// GraphML file of the walk (pedestrian) graph
    pub walk: PathBuf,
    /// Output path; with or without a trailing `.gz`, both files are written
    pub output: PathBuf,
    /// TOML file overriding `[drive]` / `[walk]` layer parameters
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Load both graphs, merge them and write the result.
///
/// Nothing is written unless both graphs load and merge cleanly.
pub fn run(args: &CliArgs) -> Result<OutputPaths> {
    let config = match &args.config {
        Some(path) => NetfuseConfig::try_from(path.as_path())?,
        None => NetfuseConfig::default(),
    };
    debug!("drive layer: {:?}", config.drive);
    debug!("walk layer: {:?}", config.walk);

    let drive = load_graphml(&args.drive)
        .with_context(|| format!("failed to load drive graph {}", args.drive.display()))?;
    let walk = load_graphml(&args.walk)
        .with_context(|| format!("failed to load walk graph {}", args.walk.display()))?;

    let projector = TransverseMercator::korea_2000_unified();
    let network = merge(&projector, &[(&drive, &config.drive), (&walk, &config.walk)])
        .context("failed to merge graphs")?;
    info!("merged network: {} nodes, {} links", network.node_count(), network.link_count());

    write_network(&network, &args.output)
        .with_context(|| format!("failed to write network to {}", args.output.display()))
}
