//! Windows-1252 text codec for game files.
//!
//! The game reads and writes a single-byte Western code page, not UTF-8.
//! Every byte decodes to some character; encoding reports characters outside
//! the code page as `InvalidData` instead of replacing them.

use std::io;

use encoding_rs::WINDOWS_1252;

/// Decode file content. A byte order mark is treated as ordinary bytes.
pub fn decode(bytes: &[u8]) -> io::Result<String> {
    WINDOWS_1252
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                "content is not valid Windows-1252",
            )
        })
}

/// Encode text for writing.
pub fn encode(text: &str) -> io::Result<Vec<u8>> {
    let (bytes, _, had_errors) = WINDOWS_1252.encode(text);
    if had_errors {
        let offending = text
            .chars()
            .find(|c| {
                let mut buf = [0u8; 4];
                WINDOWS_1252.encode(c.encode_utf8(&mut buf)).2
            })
            .map(|c| format!(" ('{}')", c))
            .unwrap_or_default();
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("text cannot be represented in Windows-1252{}", offending),
        ));
    }
    Ok(bytes.into_owned())
}
