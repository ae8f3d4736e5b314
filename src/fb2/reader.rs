//! File-level entry point: open the source, sniff for a compressed
//! container, locate the FB2 document, decode it, and run the parser.

use std::io::{Cursor, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use zip::ZipArchive;

use crate::book::ParsedBook;
use crate::error::{Error, Result};
use crate::fb2::parser::parse_str;
use crate::options::ParseOptions;
use crate::util::decode_text;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const GZIP_MAGIC: &[u8] = &[0x1F, 0x8B];

/// Parse an FB2 file from disk.
///
/// The file may be a raw FB2 document, a ZIP archive containing one (the
/// first entry named `*.fb2` is used, any others are ignored), or a
/// GZIP-compressed document. Container detection sniffs the leading bytes,
/// not the file extension. Non-UTF-8 encodings are decoded via the
/// declaration in the XML prolog.
///
/// A source that cannot be opened or contains no recognizable document
/// yields an empty [`ParsedBook`] rather than an error; a mismatched closing
/// tag inside the document is fatal ([`Error::MalformedInput`]).
///
/// # Example
///
/// ```no_run
/// use fb2text::{parse_file, ParseOptions};
///
/// let book = parse_file("war-and-peace.fb2.zip", &ParseOptions::new().with_body())?;
/// println!("{} lines", book.lines.len());
/// # Ok::<(), fb2text::Error>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<ParsedBook> {
    let bytes = match load_document(path.as_ref()) {
        Ok(bytes) => bytes,
        Err(Error::InputUnavailable(_)) => return Ok(ParsedBook::default()),
        Err(e) => return Err(e),
    };

    let document = decode_text(&bytes);
    parse_str(&document, options)
}

/// Read the raw document bytes, unpacking a ZIP or GZIP container if the
/// leading bytes say there is one.
fn load_document(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::InputUnavailable(format!("{}: {e}", path.display())))?;

    if bytes.starts_with(ZIP_MAGIC) {
        extract_zip_entry(bytes)
    } else if bytes.starts_with(GZIP_MAGIC) {
        let mut document = Vec::new();
        GzDecoder::new(bytes.as_slice())
            .read_to_end(&mut document)
            .map_err(|e| Error::InputUnavailable(format!("bad gzip stream: {e}")))?;
        Ok(document)
    } else {
        Ok(bytes)
    }
}

/// Pull the first `*.fb2` entry out of a ZIP archive.
fn extract_zip_entry(bytes: Vec<u8>) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::InputUnavailable(format!("bad zip archive: {e}")))?;

    let entry_name = archive
        .file_names()
        .find(|name| name.ends_with(".fb2"))
        .map(str::to_owned)
        .ok_or_else(|| Error::InputUnavailable("no .fb2 entry in archive".to_string()))?;

    let mut entry = archive
        .by_name(&entry_name)
        .map_err(|e| Error::InputUnavailable(format!("bad zip entry {entry_name}: {e}")))?;
    let mut document = Vec::new();
    entry
        .read_to_end(&mut document)
        .map_err(|e| Error::InputUnavailable(format!("bad zip entry {entry_name}: {e}")))?;
    Ok(document)
}
