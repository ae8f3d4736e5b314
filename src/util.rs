//! Text decoding helpers.

use std::borrow::Cow;

use memchr::memmem;

/// Decode raw document bytes to a string.
///
/// Decoding strategy:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the encoding declared in `<?xml encoding="..."?>`
/// 3. Falls back to Windows-1252 (common in old ebooks)
///
/// FB2 files are frequently windows-1251; those carry an explicit declaration
/// and are handled by step 2. Returns `Cow<str>` to avoid allocation when the
/// input is already valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(label) = declared_encoding(bytes)
        && let Some(encoding) = encoding_rs::Encoding::for_label(label)
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract the encoding label from the XML declaration, if any.
///
/// Only the prolog is inspected: the declaration must precede the first `>`.
/// The label bytes are returned verbatim; `Encoding::for_label` handles case
/// and aliases.
fn declared_encoding(bytes: &[u8]) -> Option<&[u8]> {
    let prolog_end = memchr::memchr(b'>', bytes)?;
    let prolog = &bytes[..prolog_end];
    if !prolog.starts_with(b"<?xml") {
        return None;
    }

    let attr = memmem::find(prolog, b"encoding")?;
    let rest = &prolog[attr + b"encoding".len()..];
    let eq = memchr::memchr(b'=', rest)?;
    let rest = rest[eq + 1..].trim_ascii_start();
    let quote = *rest.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let end = memchr::memchr(quote, &rest[1..])?;
    Some(&rest[1..1 + end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_encoding() {
        let doc = br#"<?xml version="1.0" encoding="windows-1251"?><FictionBook/>"#;
        assert_eq!(declared_encoding(doc), Some(&b"windows-1251"[..]));

        let doc = br#"<?xml version='1.0' encoding='koi8-r'?><x/>"#;
        assert_eq!(declared_encoding(doc), Some(&b"koi8-r"[..]));

        // No declaration
        assert_eq!(declared_encoding(b"<FictionBook/>"), None);

        // Declaration without encoding
        assert_eq!(declared_encoding(br#"<?xml version="1.0"?><x/>"#), None);
    }

    #[test]
    fn test_decode_utf8_passthrough() {
        let text = "Привет, мир!";
        assert_eq!(decode_text(text.as_bytes()), text);
    }

    #[test]
    fn test_decode_declared_windows_1251() {
        // "Тест" in windows-1251
        let mut doc = br#"<?xml version="1.0" encoding="windows-1251"?><t>"#.to_vec();
        doc.extend_from_slice(&[0xD2, 0xE5, 0xF1, 0xF2]);
        doc.extend_from_slice(b"</t>");

        let decoded = decode_text(&doc);
        assert!(decoded.contains("Тест"), "got: {decoded}");
    }

    #[test]
    fn test_decode_fallback_windows_1252() {
        // 0xE9 is 'é' in windows-1252; no declaration, invalid UTF-8
        let doc = b"<t>caf\xE9</t>";
        assert_eq!(decode_text(doc), "<t>café</t>");
    }
}
