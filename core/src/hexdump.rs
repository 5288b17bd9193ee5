use alloc::{string::String, vec::Vec};
use core::fmt::Write as _;

use crate::error::{Error, Result};

/// Text rendering of a byte buffer: one `%02X` value per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexDump(String);

impl HexDump {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut text = String::with_capacity(bytes.len() * 3);
        for b in bytes {
            // Writing to a String cannot fail.
            let _ = writeln!(text, "{:02X}", b);
        }
        Self(text)
    }

    /// Parses a dump back into bytes. Blank lines are skipped, a trailing
    /// `\r` is tolerated.
    pub fn parse(text: &str) -> Result<Vec<u8>> {
        text.lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(parse_line)
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn lines(&self) -> core::str::Lines<'_> {
        self.0.lines()
    }

    pub fn line_count(&self) -> usize {
        self.0.len() / 3
    }
}

fn parse_line(line: &str) -> Result<u8> {
    let bytes = line.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_hexdigit) {
        return Err(Error::InvalidHex);
    }
    u8::from_str_radix(line, 16).map_err(|_| Error::InvalidHex)
}

impl core::fmt::Display for HexDump {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
