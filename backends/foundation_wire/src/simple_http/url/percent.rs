//! Strict RFC 3986 percent decoding.

use super::error::UriDecodeError;

/// Decodes every `%XX` escape in `input` to its byte and returns the result
/// as UTF-8 text.
///
/// Reserved characters (`/?#[]!$&'()*+,;=` and the rest) decode like any
/// other escape. Unlike form decoding, `+` is left as `+`.
///
/// # Errors
///
/// Returns `UriDecodeError` for a truncated escape, a non-hex digit after
/// `%`, or decoded bytes that are not UTF-8.
pub fn percent_decode(input: &str) -> Result<String, UriDecodeError> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());

    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] != b'%' {
            decoded.push(bytes[index]);
            index += 1;
            continue;
        }

        if index + 2 >= bytes.len() {
            return Err(UriDecodeError::IncompleteEscape { position: index });
        }

        let high = hex_value(bytes[index + 1]);
        let low = hex_value(bytes[index + 2]);
        match (high, low) {
            (Some(high), Some(low)) => decoded.push((high << 4) | low),
            _ => return Err(UriDecodeError::InvalidHexDigit { position: index }),
        }
        index += 3;
    }

    Ok(String::from_utf8(decoded)?)
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
