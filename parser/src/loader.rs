//! Reading and decompressing man page sources.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::error::{LoadError, Result};

/// Opens `path` and returns the decompressed page text.
///
/// Invalid UTF-8 sequences are replaced rather than rejected; many older
/// pages are Latin-1 encoded.
///
/// # Errors
///
/// [`LoadError::Open`] when the file cannot be opened, and
/// [`LoadError::Decompress`] when its contents are not valid gzip data.
pub fn load(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    decode(BufReader::new(file), path)
}

/// Decompresses gzip data from `reader`; `path` is only used for errors.
pub fn decode<R: Read>(reader: R, path: &Path) -> Result<String> {
    let mut decoder = GzDecoder::new(reader);
    let mut bytes = Vec::new();
    decoder
        .read_to_end(&mut bytes)
        .map_err(|source| LoadError::Decompress {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), bytes = bytes.len(), "Decompressed man page");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;

    use super::*;

    fn gzip(text: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_decode_round_trips_text() {
        let data = gzip(".SH NAME\nfoo \\- bar\n");
        let text = decode(&data[..], Path::new("foo.1.gz")).unwrap();
        assert_eq!(text, ".SH NAME\nfoo \\- bar\n");
    }

    #[test]
    fn test_decode_rejects_plain_text() {
        let err = decode(&b".SH NAME\nfoo\n"[..], Path::new("foo.1")).unwrap_err();
        assert!(matches!(err, LoadError::Decompress { .. }));
        assert_eq!(err.path(), Path::new("foo.1"));
    }

    #[test]
    fn test_decode_replaces_invalid_utf8() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"caf\xe9\n").unwrap();
        let data = encoder.finish().unwrap();
        let text = decode(&data[..], Path::new("latin1.1.gz")).unwrap();
        assert!(text.starts_with("caf"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/definitely/missing.1.gz")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert!(err.to_string().contains("missing.1.gz"));
    }
}
