use super::{read_bytes, ExtractionError, TextExtractor};
use std::path::Path;

/// Reads the whole file as UTF-8 without any newline or whitespace rewriting.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes = read_bytes(path)?;
        String::from_utf8(bytes).map_err(|source| ExtractionError::Encoding {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn rejects_bytes_outside_utf8() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("latin1.txt");
        fs::write(&path, [0x43, 0x56, 0xe9, 0xff]).expect("write fixture");

        let err = PlainTextExtractor
            .extract(&path)
            .expect_err("latin-1 bytes are not utf-8");
        assert!(matches!(err, ExtractionError::Encoding { .. }));
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn empty_file_yields_empty_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").expect("write fixture");

        assert_eq!(PlainTextExtractor.extract(&path).expect("reads"), "");
    }
}
