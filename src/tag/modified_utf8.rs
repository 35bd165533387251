//! Java modified UTF-8, the string form of tag names and values.
//!
//! Differs from UTF-8 in two ways: NUL is written as `C0 80`, and characters
//! outside the basic plane are written as two 3 byte surrogates.

use std::borrow::Cow;

/// Decodes string bytes, returning `None` when they are malformed or hold an
/// unpaired surrogate.
pub(crate) fn decode(bytes: &[u8]) -> Option<Cow<'_, str>> {
    if let Ok(value) = std::str::from_utf8(bytes) {
        return Some(Cow::Borrowed(value));
    }

    let mut units = Vec::with_capacity(bytes.len());
    let mut index = 0;

    while let Some(&lead) = bytes.get(index) {
        let unit = match lead {
            0x00..=0x7F => {
                index += 1;
                lead as u16
            }
            0xC0..=0xDF => {
                let unit = (lead as u16 & 0x1F) << 6 | continuation(bytes, index + 1)?;
                index += 2;
                unit
            }
            0xE0..=0xEF => {
                let unit = (lead as u16 & 0x0F) << 12
                    | continuation(bytes, index + 1)? << 6
                    | continuation(bytes, index + 2)?;
                index += 3;
                unit
            }
            _ => return None,
        };

        units.push(unit);
    }

    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .ok()
        .map(Cow::Owned)
}

fn continuation(bytes: &[u8], index: usize) -> Option<u16> {
    bytes
        .get(index)
        .filter(|&&byte| byte & 0xC0 == 0x80)
        .map(|&byte| (byte & 0x3F) as u16)
}

/// Encodes a string, borrowing it when the UTF-8 form is already valid.
pub(crate) fn encode(value: &str) -> Cow<'_, [u8]> {
    let plain = value
        .bytes()
        .all(|byte| byte != 0 && byte & 0xF8 != 0xF0);

    if plain {
        return Cow::Borrowed(value.as_bytes());
    }

    let mut bytes = Vec::with_capacity(value.len() + 2);

    for unit in value.encode_utf16() {
        match unit {
            0x01..=0x7F => bytes.push(unit as u8),
            0x00 | 0x80..=0x7FF => {
                bytes.extend_from_slice(&[0xC0 | (unit >> 6) as u8, 0x80 | (unit & 0x3F) as u8])
            }
            _ => bytes.extend_from_slice(&[
                0xE0 | (unit >> 12) as u8,
                0x80 | (unit >> 6 & 0x3F) as u8,
                0x80 | (unit & 0x3F) as u8,
            ]),
        }
    }

    Cow::Owned(bytes)
}
