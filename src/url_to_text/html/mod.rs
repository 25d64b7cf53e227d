pub mod extractors;
pub mod readability;

use std::borrow::Cow;

/// Page bytes as text: UTF-8 when valid, otherwise Latin-1 (one code point per byte).
pub fn decode_html(body: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(body) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(body.iter().map(|&byte| char::from(byte)).collect()),
    }
}
