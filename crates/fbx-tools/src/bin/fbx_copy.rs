//! fbx-copy - decode a binary FBX file and write it back out
//!
//! Compressed arrays come out uncompressed and nested sentinels are dropped,
//! so the copy is usually larger but decodes to the same tree.
//!
//! Only the top-level node list is closed with a null record. Readers that
//! expect one after every child list may reject the copy, so check it against
//! the application that has to load it before replacing the original.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use fbx_tools::cli::{init_tracing, DecodeArgs};
use fbx_tools::{read_document, write_document};

#[derive(Parser)]
#[command(name = "fbx-copy")]
#[command(about = "Re-encode a binary FBX file")]
#[command(
    long_about = "Re-encode a binary FBX file.\n\n\
        Arrays are written uncompressed and child lists are not closed with a \
        null record. Readers that require that record may reject the copy."
)]
#[command(version)]
struct Cli {
    /// Input .fbx file
    input: PathBuf,

    /// Output .fbx file
    output: PathBuf,

    #[command(flatten)]
    decode: DecodeArgs,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let doc = read_document(&cli.input, &cli.decode.decoder())?;
    write_document(&cli.output, &doc)
}
