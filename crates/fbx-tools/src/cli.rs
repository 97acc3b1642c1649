//! Shared setup for the `fbx-*` binaries.

use clap::Args;
use fbx_binary::constants::DEFAULT_MAX_DEPTH;
use fbx_binary::FbxDecoder;
use tracing_subscriber::EnvFilter;

/// Logs to stderr so stdout stays free for output. `RUST_LOG` overrides the
/// default `info` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Decoder options common to every binary.
#[derive(Debug, Clone, Args)]
pub struct DecodeArgs {
    /// Deepest node nesting accepted before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

impl DecodeArgs {
    pub fn decoder(&self) -> FbxDecoder {
        FbxDecoder::new().max_depth(self.max_depth)
    }
}
