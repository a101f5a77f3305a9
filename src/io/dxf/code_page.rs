//! Byte-level decoding of DXF text.
//!
//! Files from AutoCAD 2007 on are UTF-8. Older files are written in the
//! code page named by `$DWGCODEPAGE`, so non-UTF-8 input is decoded
//! through that code page (Windows-1252 when the header does not say).

use crate::types::AcadVersion;
use encoding_rs::Encoding;
use std::borrow::Cow;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Map a `$DWGCODEPAGE` value to an encoding.
///
/// Returns `None` for code pages that are already UTF-8 compatible.
/// Unrecognised names fall back to Windows-1252.
pub fn encoding_from_code_page(code_page: &str) -> Option<&'static Encoding> {
    let name = code_page.trim().to_ascii_lowercase();
    let encoding = match name.as_str() {
        "ascii" | "utf-8" | "utf8" | "unicode" => return None,
        "ansi_932" => encoding_rs::SHIFT_JIS,
        "ansi_936" | "gb2312" => encoding_rs::GBK,
        "ansi_949" | "korean" | "johab" => encoding_rs::EUC_KR,
        "ansi_950" | "big5" => encoding_rs::BIG5,
        "ansi_874" => encoding_rs::WINDOWS_874,
        "ansi_1250" | "dos852" => encoding_rs::WINDOWS_1250,
        "ansi_1251" => encoding_rs::WINDOWS_1251,
        "ansi_1253" | "dos869" => encoding_rs::WINDOWS_1253,
        "ansi_1254" | "dos857" => encoding_rs::WINDOWS_1254,
        "ansi_1255" => encoding_rs::WINDOWS_1255,
        "ansi_1256" => encoding_rs::WINDOWS_1256,
        "ansi_1257" => encoding_rs::WINDOWS_1257,
        "ansi_1258" => encoding_rs::WINDOWS_1258,
        "dos855" | "dos866" => encoding_rs::IBM866,
        "koi8-r" => encoding_rs::KOI8_R,
        "koi8-u" => encoding_rs::KOI8_U,
        other => match other.strip_prefix("iso8859-").or_else(|| other.strip_prefix("iso_8859-")) {
            Some("2") => encoding_rs::ISO_8859_2,
            Some("5") => encoding_rs::ISO_8859_5,
            Some("7") => encoding_rs::ISO_8859_7,
            Some("8") => encoding_rs::ISO_8859_8,
            Some("15") => encoding_rs::ISO_8859_15,
            _ => encoding_rs::WINDOWS_1252,
        },
    };
    Some(encoding)
}

/// Find a header variable's value in (already decoded) DXF text without a full parse.
fn sniff_header_value<'t>(text: &'t str, variable: &str) -> Option<&'t str> {
    let mut lines = text.lines().map(str::trim);
    while let Some(line) = lines.next() {
        if line == variable {
            lines.next()?;
            return lines.next();
        }
        if line == "ENTITIES" {
            break;
        }
    }
    None
}

/// Decode raw DXF bytes into text.
///
/// Valid UTF-8 (with or without BOM) is borrowed as is. Invalid UTF-8 from
/// a release that writes UTF-8 is decoded lossily; anything else is decoded
/// through the code page the file declares.
pub fn decode_dxf_bytes(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }

    let (latin, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    let version = sniff_header_value(&latin, "$ACADVER").map(AcadVersion::from_version_string);
    if version.map_or(false, |v| v.is_unicode()) {
        tracing::debug!("invalid UTF-8 in a UTF-8 release; replacing bad sequences");
        return Cow::Owned(String::from_utf8_lossy(bytes).into_owned());
    }

    let declared = sniff_header_value(&latin, "$DWGCODEPAGE").and_then(encoding_from_code_page);
    match declared {
        Some(encoding) if encoding != encoding_rs::WINDOWS_1252 => {
            tracing::debug!(encoding = encoding.name(), "decoding DXF text with declared code page");
            let (decoded, _, _) = encoding.decode(bytes);
            Cow::Owned(decoded.into_owned())
        }
        _ => Cow::Owned(latin.into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_page_lookup() {
        assert_eq!(encoding_from_code_page("ANSI_1252"), Some(encoding_rs::WINDOWS_1252));
        assert_eq!(encoding_from_code_page("ansi_1251"), Some(encoding_rs::WINDOWS_1251));
        assert_eq!(encoding_from_code_page("ANSI_932"), Some(encoding_rs::SHIFT_JIS));
        assert_eq!(encoding_from_code_page("ISO8859-2"), Some(encoding_rs::ISO_8859_2));
        assert_eq!(encoding_from_code_page("UTF-8"), None);
        assert_eq!(encoding_from_code_page("MYSTERY"), Some(encoding_rs::WINDOWS_1252));
    }

    #[test]
    fn test_utf8_is_borrowed() {
        let decoded = decode_dxf_bytes("  1\nÄußere\n".as_bytes());
        assert!(matches!(decoded, Cow::Borrowed(_)));
        assert!(decoded.contains("Äußere"));
    }

    #[test]
    fn test_bom_is_stripped() {
        let decoded = decode_dxf_bytes(b"\xEF\xBB\xBF0\nEOF\n");
        assert_eq!(decoded, "0\nEOF\n");
    }

    #[test]
    fn test_latin1_fallback() {
        let decoded = decode_dxf_bytes(b"1\nCaf\xE9\n");
        assert_eq!(decoded, "1\nCafé\n");
    }

    #[test]
    fn test_declared_code_page_used() {
        let mut bytes = b"0\nSECTION\n2\nHEADER\n9\n$DWGCODEPAGE\n3\nANSI_1251\n0\nENDSEC\n1\n".to_vec();
        bytes.push(0xC0);
        bytes.push(b'\n');
        let decoded = decode_dxf_bytes(&bytes);
        assert!(decoded.ends_with("А\n"));
    }

    #[test]
    fn test_unicode_release_ignores_code_page() {
        let mut bytes = b"0\nSECTION\n2\nHEADER\n9\n$ACADVER\n1\nAC1027\n9\n$DWGCODEPAGE\n3\nANSI_1251\n0\nENDSEC\n1\n".to_vec();
        bytes.push(0xC0);
        bytes.push(b'\n');
        let decoded = decode_dxf_bytes(&bytes);
        assert!(decoded.ends_with("\u{FFFD}\n"));
    }
}
