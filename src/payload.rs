use tracing::debug;

use crate::ndef_type::NdefType;

/// Well known record type of a Text record
pub const RTD_TEXT: u8 = b'T';

/// Well known record type of a URI record
pub const RTD_URI: u8 = b'U';

/// First byte of the well known Smart Poster type `Sp`
pub const RTD_SMART_POSTER: u8 = b'S';

/// Status byte bit of a Text record marking a UTF-16 encoded text
const TEXT_UTF16_FLAG: u8 = 0b1000_0000;

/// Status byte bits of a Text record holding the language code length
const TEXT_LANGUAGE_LENGTH_MASK: u8 = 0b0011_1111;

/// Fixed offsets of the nested URI record inside a Smart Poster payload,
/// valid for a single short URI record without id: header, type length,
/// payload length, type `U`, prefix code, characters
const SMART_POSTER_URI_LENGTH_OFFSET: usize = 2;
const SMART_POSTER_URI_START: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct TextPayload {
    pub format: TextPayloadFormat,
    pub language: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum TextPayloadFormat {
    Utf8,
    Utf16,
}

/// URI prefix codes as defined in NFC Forum RTD URI specification
pub const URI_PREFIXES: &[&str] = &[
    "",                           // 0x00 - no prepending
    "http://www.",                // 0x01
    "https://www.",               // 0x02
    "http://",                    // 0x03
    "https://",                   // 0x04
    "tel:",                       // 0x05
    "mailto:",                    // 0x06
    "ftp://anonymous:anonymous@", // 0x07
    "ftp://ftp.",                 // 0x08
    "ftps://",                    // 0x09
    "sftp://",                    // 0x0A
    "smb://",                     // 0x0B
    "nfs://",                     // 0x0C
    "ftp://",                     // 0x0D
    "dav://",                     // 0x0E
    "news:",                      // 0x0F
    "telnet://",                  // 0x10
    "imap:",                      // 0x11
    "rtsp://",                    // 0x12
    "urn:",                       // 0x13
    "pop:",                       // 0x14
    "sip:",                       // 0x15
    "sips:",                      // 0x16
    "tftp:",                      // 0x17
    "btspp://",                   // 0x18
    "btl2cap://",                 // 0x19
    "btgoep://",                  // 0x1A
    "tcpobex://",                 // 0x1B
    "irdaobex://",                // 0x1C
    "file://",                    // 0x1D
    "urn:epc:id:",                // 0x1E
    "urn:epc:tag:",               // 0x1F
    "urn:epc:pat:",               // 0x20
    "urn:epc:raw:",               // 0x21
    "urn:epc:",                   // 0x22
    "urn:nfc:",                   // 0x23
];

/// Read a URI out of a well known URI or Smart Poster record
///
/// Returns `None` when the record does not carry a URI, when the prefix code
/// is unknown, or when any URI byte is outside printable ASCII.
pub fn uri_from_parts(tnf: NdefType, type_: &[u8], payload: &[u8]) -> Option<String> {
    if tnf != NdefType::WellKnown {
        debug!("not a well known record: {tnf}");
        return None;
    }

    let Some(&record_type) = type_.first() else {
        debug!("record has no type");
        return None;
    };

    if record_type != RTD_URI && record_type != RTD_SMART_POSTER {
        debug!("not a URI or Smart Poster record: {record_type:#04x}");
        return None;
    }

    if payload.is_empty() {
        debug!("record has no payload");
        return None;
    }

    let uri = if record_type == RTD_URI {
        uri_record(payload)?
    } else {
        smart_poster_uri(payload)?
    };

    if uri.is_empty() {
        return None;
    }

    Some(uri)
}

/// Split off the longest known prefix, returning its code and the remainder
pub fn longest_uri_prefix(uri: &str) -> (u8, &str) {
    URI_PREFIXES
        .iter()
        .enumerate()
        .skip(1)
        .filter(|&(_, prefix)| uri.starts_with(*prefix))
        .max_by_key(|&(_, prefix)| prefix.len())
        .map(|(code, prefix)| (code as u8, &uri[prefix.len()..]))
        .unwrap_or((0, uri))
}

/// Read a well known Text record
pub fn text_from_parts(tnf: NdefType, type_: &[u8], payload: &[u8]) -> Option<TextPayload> {
    if tnf != NdefType::WellKnown || type_ != [RTD_TEXT] {
        return None;
    }

    let (&status, rest) = payload.split_first()?;
    let language_length = (status & TEXT_LANGUAGE_LENGTH_MASK) as usize;
    if language_length > rest.len() {
        debug!("text language length {language_length} runs past the payload");
        return None;
    }

    let (language, text) = rest.split_at(language_length);
    let is_utf16 = status & TEXT_UTF16_FLAG != 0;

    let text = if is_utf16 {
        String::from_utf16_lossy(
            &text
                .chunks_exact(2)
                .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
                .collect::<Vec<u16>>(),
        )
    } else {
        String::from_utf8_lossy(text).to_string()
    };

    Some(TextPayload {
        format: if is_utf16 { TextPayloadFormat::Utf16 } else { TextPayloadFormat::Utf8 },
        language: String::from_utf8_lossy(language).to_string(),
        text,
    })
}

/// Status byte of a UTF-8 Text record, caller checks the language length
pub fn text_status_byte(language: &str) -> u8 {
    language.len() as u8 & TEXT_LANGUAGE_LENGTH_MASK
}

// private
fn uri_record(payload: &[u8]) -> Option<String> {
    let code = payload[0];
    let Some(prefix) = URI_PREFIXES.get(code as usize) else {
        debug!("URI prefix out of range: {code}");
        return None;
    };

    let mut uri = String::from(*prefix);
    push_printable(&mut uri, &payload[1..])?;
    Some(uri)
}

// the prefix code of the nested record is skipped, not applied
fn smart_poster_uri(payload: &[u8]) -> Option<String> {
    let uri_length = *payload.get(SMART_POSTER_URI_LENGTH_OFFSET)? as usize;
    debug!("smart poster uri length: {uri_length}");

    // nested payload length counts the prefix code
    let end = (SMART_POSTER_URI_START + uri_length).saturating_sub(1).max(SMART_POSTER_URI_START);
    let Some(characters) = payload.get(SMART_POSTER_URI_START..end) else {
        debug!("smart poster uri runs past the payload");
        return None;
    };

    let mut uri = String::with_capacity(characters.len());
    push_printable(&mut uri, characters)?;
    Some(uri)
}

fn push_printable(uri: &mut String, bytes: &[u8]) -> Option<()> {
    for &byte in bytes {
        if !(0x20..=0x7E).contains(&byte) {
            debug!("invalid URI character: {byte:#04x}");
            return None;
        }

        uri.push(byte as char);
    }

    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri_payload(code: u8, rest: &[u8]) -> Vec<u8> {
        let mut payload = vec![code];
        payload.extend_from_slice(rest);
        payload
    }

    #[test]
    fn uri_with_prefix() {
        let payload = uri_payload(0x01, b"example.com");
        let uri = uri_from_parts(NdefType::WellKnown, b"U", &payload);
        assert_eq!(uri.as_deref(), Some("http://www.example.com"));

        let payload = uri_payload(0x05, b"+15551234");
        let uri = uri_from_parts(NdefType::WellKnown, b"U", &payload);
        assert_eq!(uri.as_deref(), Some("tel:+15551234"));

        let payload = uri_payload(0x23, b"demo");
        let uri = uri_from_parts(NdefType::WellKnown, b"U", &payload);
        assert_eq!(uri.as_deref(), Some("urn:nfc:demo"));
    }

    #[test]
    fn uri_without_prefix() {
        let payload = uri_payload(0x00, b"bitcoin:bc1q");
        let uri = uri_from_parts(NdefType::WellKnown, b"U", &payload);
        assert_eq!(uri.as_deref(), Some("bitcoin:bc1q"));
    }

    #[test]
    fn prefix_out_of_range() {
        let payload = uri_payload(URI_PREFIXES.len() as u8, b"example.com");
        assert_eq!(uri_from_parts(NdefType::WellKnown, b"U", &payload), None);
    }

    #[test]
    fn rejects_records_that_are_not_uris() {
        let payload = uri_payload(0x01, b"example.com");
        assert_eq!(uri_from_parts(NdefType::MimeMedia, b"U", &payload), None);
        assert_eq!(uri_from_parts(NdefType::AbsoluteUri, b"U", &payload), None);
        assert_eq!(uri_from_parts(NdefType::WellKnown, b"", &payload), None);
        assert_eq!(uri_from_parts(NdefType::WellKnown, b"T", &payload), None);
        assert_eq!(uri_from_parts(NdefType::WellKnown, b"U", &[]), None);
    }

    #[test]
    fn non_printable_byte_discards_everything() {
        let payload = uri_payload(0x04, b"exa\x01mple.com");
        assert_eq!(uri_from_parts(NdefType::WellKnown, b"U", &payload), None);

        let payload = uri_payload(0x04, b"example.com\x7F");
        assert_eq!(uri_from_parts(NdefType::WellKnown, b"U", &payload), None);

        let payload = uri_payload(0x04, "caf\u{e9}".as_bytes());
        assert_eq!(uri_from_parts(NdefType::WellKnown, b"U", &payload), None);
    }

    #[test]
    fn prefix_only_is_no_uri() {
        assert_eq!(uri_from_parts(NdefType::WellKnown, b"U", &[0x00]), None);
    }

    #[test]
    fn smart_poster_single_uri_record() {
        // nested record: 0xD1, type length 1, payload length 12, 'U', prefix 0x01, "example.com"
        let mut payload = vec![0xD1, 0x01, 0x0C, b'U', 0x01];
        payload.extend_from_slice(b"example.com");

        let uri = uri_from_parts(NdefType::WellKnown, b"Sp", &payload);
        assert_eq!(uri.as_deref(), Some("example.com"));
    }

    #[test]
    fn smart_poster_ignores_trailing_records() {
        let mut payload = vec![0x91, 0x01, 0x05, b'U', 0x03];
        payload.extend_from_slice(b"a.io");
        payload.extend_from_slice(&[0x51, 0x01, 0x03, b'T', 0x00, b'h', b'i']);

        let uri = uri_from_parts(NdefType::WellKnown, b"Sp", &payload);
        assert_eq!(uri.as_deref(), Some("a.io"));
    }

    #[test]
    fn smart_poster_rejects_short_or_malformed_payload() {
        // declared length runs past the payload
        let payload = [0xD1, 0x01, 0x0C, b'U', 0x01, b'a'];
        assert_eq!(uri_from_parts(NdefType::WellKnown, b"Sp", &payload), None);

        // no length byte at all
        assert_eq!(uri_from_parts(NdefType::WellKnown, b"Sp", &[0xD1, 0x01]), None);

        let payload = [0xD1, 0x01, 0x04, b'U', 0x01, b'a', 0x0A, b'c'];
        assert_eq!(uri_from_parts(NdefType::WellKnown, b"Sp", &payload), None);
    }

    #[test]
    fn longest_prefix_wins() {
        assert_eq!(longest_uri_prefix("https://www.example.com"), (0x02, "example.com"));
        assert_eq!(longest_uri_prefix("https://example.com"), (0x04, "example.com"));
        assert_eq!(longest_uri_prefix("urn:epc:id:sgtin"), (0x1E, "sgtin"));
        assert_eq!(longest_uri_prefix("urn:other"), (0x13, "other"));
        assert_eq!(longest_uri_prefix("bitcoin:bc1q"), (0x00, "bitcoin:bc1q"));
    }

    #[test]
    fn text_utf8() {
        let mut payload = vec![0x02];
        payload.extend_from_slice(b"enhello");

        let text = text_from_parts(NdefType::WellKnown, b"T", &payload).unwrap();
        assert_eq!(text.format, TextPayloadFormat::Utf8);
        assert_eq!(text.language, "en");
        assert_eq!(text.text, "hello");
    }

    #[test]
    fn text_utf16() {
        let mut payload = vec![0x82];
        payload.extend_from_slice(b"de");
        payload.extend_from_slice(&[0x00, b'h', 0x00, b'i']);

        let text = text_from_parts(NdefType::WellKnown, b"T", &payload).unwrap();
        assert_eq!(text.format, TextPayloadFormat::Utf16);
        assert_eq!(text.language, "de");
        assert_eq!(text.text, "hi");
    }

    #[test]
    fn text_rejects_bad_records() {
        assert_eq!(text_from_parts(NdefType::WellKnown, b"T", &[]), None);
        assert_eq!(text_from_parts(NdefType::WellKnown, b"T", &[0x05, b'e', b'n']), None);
        assert_eq!(text_from_parts(NdefType::MimeMedia, b"T", &[0x00, b'x']), None);
        assert_eq!(text_from_parts(NdefType::WellKnown, b"U", &[0x00, b'x']), None);
    }
}
