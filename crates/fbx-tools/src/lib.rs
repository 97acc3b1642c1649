//! Tools built on the binary FBX codec.
//!
//! - [`dump`]: render a decoded document as JSON for inspection.
//! - [`dedup`]: merge identical `Model` / `Material` objects and rewrite the
//!   connections that reference them.
//! - [`io`]: read and write documents from disk.
//! - [`cli`]: shared setup for the `fbx-*` binaries.

pub mod cli;
pub mod dedup;
pub mod dump;
pub mod io;

pub use dedup::{dedup_materials, dedup_objects, DedupReport};
pub use dump::{document_to_json, dump_json};
pub use io::{read_document, write_document};
