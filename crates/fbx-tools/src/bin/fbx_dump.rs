//! fbx-dump - print a binary FBX file as JSON

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use fbx_tools::cli::{init_tracing, DecodeArgs};
use fbx_tools::{dump_json, read_document};

#[derive(Parser)]
#[command(name = "fbx-dump")]
#[command(about = "Print a binary FBX file as JSON")]
#[command(version)]
struct Cli {
    /// Input .fbx file
    input: PathBuf,

    /// Single-line output instead of indented
    #[arg(long)]
    compact: bool,

    #[command(flatten)]
    decode: DecodeArgs,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let doc = read_document(&cli.input, &cli.decode.decoder())?;
    println!("{}", dump_json(&doc, !cli.compact));
    Ok(())
}
