//! Date patterns in the `yyyy-MM-dd HH:mm:ss` letter language, mapped onto
//! chrono format strings.
//!
//! Supported letters: `y` (`yy` is the two-digit year), `M` (`MMM` and `MMMM`
//! are month names), `d`, `H`, `h`, `m`, `s`, `S` (milliseconds), `a`
//! (AM/PM) and `E` (`EEEE` is the full day name). Text inside single quotes is
//! literal and `''` is a quote. Other characters, including unknown letters,
//! are copied through.

use crate::error::{Result, ZsonError};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::Write;

/// A compiled date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    chrono: String,
    has_time: bool,
}

impl DatePattern {
    pub fn new(pattern: &str) -> Self {
        let mut chrono = String::with_capacity(pattern.len() * 2);
        let mut has_time = false;
        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];
            if ch == '\'' {
                i = quoted(&chars, i + 1, &mut chrono);
                continue;
            }
            if !ch.is_ascii_alphabetic() {
                push_literal(ch, &mut chrono);
                i += 1;
                continue;
            }

            let run = chars[i..].iter().take_while(|&&c| c == ch).count();
            i += run;
            match ch {
                'y' if run == 2 => chrono.push_str("%y"),
                'y' => chrono.push_str("%Y"),
                'M' if run >= 4 => chrono.push_str("%B"),
                'M' if run == 3 => chrono.push_str("%b"),
                'M' => chrono.push_str("%m"),
                'd' => chrono.push_str("%d"),
                'E' if run >= 4 => chrono.push_str("%A"),
                'E' => chrono.push_str("%a"),
                'H' | 'h' | 'm' | 's' | 'S' | 'a' => {
                    has_time = true;
                    chrono.push_str(match ch {
                        'H' => "%H",
                        'h' => "%I",
                        'm' => "%M",
                        's' => "%S",
                        'S' => "%3f",
                        _ => "%p",
                    });
                }
                other => {
                    for _ in 0..run {
                        push_literal(other, &mut chrono);
                    }
                }
            }
        }

        Self {
            source: pattern.to_string(),
            chrono,
            has_time,
        }
    }

    /// The pattern as given.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The equivalent chrono format string.
    pub fn chrono_format(&self) -> &str {
        &self.chrono
    }

    pub fn format(&self, date: &NaiveDateTime) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.chrono)).is_err() {
            out.clear();
        }
        out
    }

    /// Parse `text`; date-only patterns yield midnight of that day.
    pub fn parse(&self, text: &str) -> Result<NaiveDateTime> {
        let parsed = if self.has_time {
            NaiveDateTime::parse_from_str(text, &self.chrono)
        } else {
            NaiveDate::parse_from_str(text, &self.chrono).map(|day| day.and_time(NaiveTime::MIN))
        };
        parsed.map_err(|_| ZsonError::DateFormat {
            value: text.to_string(),
            pattern: self.source.clone(),
        })
    }
}

/// Copy a quoted section starting after its opening quote; returns the index
/// after the closing quote.
fn quoted(chars: &[char], mut i: usize, out: &mut String) -> usize {
    // '' outside a quoted section is a lone quote
    if chars.get(i) == Some(&'\'') {
        out.push('\'');
        return i + 1;
    }
    while let Some(&ch) = chars.get(i) {
        if ch == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            return i + 1;
        }
        push_literal(ch, out);
        i += 1;
    }
    i
}

fn push_literal(ch: char, out: &mut String) {
    if ch == '%' {
        out.push_str("%%");
    } else {
        out.push(ch);
    }
}
