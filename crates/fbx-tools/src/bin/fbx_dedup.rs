//! fbx-dedup - merge duplicate materials and models in a binary FBX file

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use fbx_tools::cli::{init_tracing, DecodeArgs};
use fbx_tools::{dedup_materials, dedup_objects, read_document, write_document};

#[derive(Parser)]
#[command(name = "fbx-dedup")]
#[command(about = "Merge identical materials and models in a binary FBX file")]
#[command(version)]
struct Cli {
    /// Input .fbx file
    input: PathBuf,

    /// Output .fbx file
    output: PathBuf,

    /// Leave models alone
    #[arg(long)]
    skip_objects: bool,

    /// Leave materials alone
    #[arg(long)]
    skip_materials: bool,

    #[command(flatten)]
    decode: DecodeArgs,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut doc = read_document(&cli.input, &cli.decode.decoder())?;

    // Materials first: merged materials can make models identical.
    if !cli.skip_materials {
        let report = dedup_materials(&mut doc);
        tracing::info!(
            merged = report.merged.len(),
            connections_removed = report.connections_removed,
            "materials deduplicated"
        );
    }
    if !cli.skip_objects {
        let report = dedup_objects(&mut doc);
        tracing::info!(
            merged = report.merged.len(),
            connections_removed = report.connections_removed,
            "models deduplicated"
        );
    }

    write_document(&cli.output, &doc)
}
