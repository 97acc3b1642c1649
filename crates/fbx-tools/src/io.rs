//! Reading and writing documents on disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use fbx_binary::{encode, Document, FbxDecoder, Inflate};

/// Reads and decodes the binary FBX file at `path`.
pub fn read_document<I: Inflate>(
    path: impl AsRef<Path>,
    decoder: &FbxDecoder<I>,
) -> Result<Document> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let doc = decoder
        .decode(&data)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        version = doc.version,
        nodes = doc.children.len(),
        "read FBX document"
    );
    Ok(doc)
}

/// Encodes `doc` and writes it to `path`, replacing any existing file.
pub fn write_document(path: impl AsRef<Path>, doc: &Document) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(doc).with_context(|| format!("failed to encode {}", path.display()))?;
    fs::write(path, &bytes).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote FBX document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fbx_binary::{Node, Property};

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.fbx");
        let mut doc = Document::new(7400);
        doc.children
            .push(Node::new("Root").with_property(Property::Int(42)));

        write_document(&path, &doc).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 222);
        assert_eq!(read_document(&path, &FbxDecoder::new()).unwrap(), doc);
    }

    #[test]
    fn errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.fbx");
        let err = read_document(&missing, &FbxDecoder::new()).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
        assert!(err.to_string().contains("missing.fbx"));

        let text = dir.path().join("ascii.fbx");
        fs::write(&text, "; FBX 7.4.0 project file\n").unwrap();
        let err = read_document(&text, &FbxDecoder::new()).unwrap_err();
        assert!(err.to_string().contains("failed to decode"));
        assert_eq!(
            err.downcast_ref::<fbx_binary::FbxError>(),
            Some(&fbx_binary::FbxError::NotFbxFormat)
        );
    }
}
