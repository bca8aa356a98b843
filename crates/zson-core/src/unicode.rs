//! `\uXXXX` escape codec for wide characters.
//!
//! [`encode`] is applied to finished serializer output when unicode output is
//! enabled; [`decode`] is available to callers before parsing, since the
//! parser itself does not interpret `\u` sequences.

use std::fmt::Write;
use std::ops::RangeInclusive;

/// UTF-16 code units rewritten by [`encode`]. The lower bound is U+4E00; the
/// upper bound is the decimal value 171941, which no single unit reaches, so
/// every unit from U+4E00 up, surrogates included, is rewritten.
pub const WIDE_CHARS: RangeInclusive<u32> = 19968..=171_941;

/// Replace every UTF-16 unit in [`WIDE_CHARS`] with `\u` and its lowercase
/// hex value. Rewritten units are always four digits; a character outside the
/// Basic Multilingual Plane becomes a surrogate pair such as `\ud83d\ude00`.
pub fn encode(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut buf = [0u16; 2];
    for ch in src.chars() {
        let units = ch.encode_utf16(&mut buf);
        if units.iter().all(|&unit| WIDE_CHARS.contains(&u32::from(unit))) {
            for unit in units.iter() {
                let _ = write!(out, "\\u{unit:x}");
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Replace `\u` followed by four hex digits with the UTF-16 unit it names.
///
/// Scanning restarts from the beginning after each replacement, so a decoded
/// backslash can start a new sequence. Decoding stops at the first `\u` that
/// has fewer than six units from its start to the end of the text, or whose
/// digits are not hex. Surrogate escapes that form a pair join into one
/// character; an unpaired surrogate becomes U+FFFD.
pub fn decode(input: &str) -> String {
    let mut working: Vec<u16> = input.encode_utf16().collect();
    while let Some(index) = find_escape(&working) {
        if index + 6 > working.len() {
            break;
        }
        let Some(unit) = hex_unit(&working[index + 2..index + 6]) else {
            break;
        };
        working.splice(index..index + 6, std::iter::once(unit));
    }
    String::from_utf16_lossy(&working)
}

fn find_escape(units: &[u16]) -> Option<usize> {
    units
        .windows(2)
        .position(|pair| pair[0] == u16::from(b'\\') && pair[1] == u16::from(b'u'))
}

fn hex_unit(digits: &[u16]) -> Option<u16> {
    digits.iter().try_fold(0u16, |acc, &unit| {
        let digit = char::from_u32(u32::from(unit))?.to_digit(16)?;
        Some((acc << 4) | digit as u16)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_leaves_latin_text_alone() {
        assert_eq!(encode("caf\u{e9} 42"), "caf\u{e9} 42");
    }

    #[test]
    fn decode_stops_on_short_tail() {
        assert_eq!(decode("ab\\u4e2"), "ab\\u4e2");
    }

    #[test]
    fn decode_stops_on_bad_hex() {
        assert_eq!(decode("\\uzzzz\\u4e2d"), "\\uzzzz\\u4e2d");
    }

    #[test]
    fn surrogate_escapes_join_into_one_character() {
        assert_eq!(decode("\\ud83d\\ude00!"), "\u{1f600}!");
        assert_eq!(decode("\\ud83d"), "\u{fffd}");
    }
}
