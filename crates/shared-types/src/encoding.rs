//! Log-friendly encodings.

/// Render the first few bytes of a hash/address as `0xabcd1234…` for logs.
///
/// Full 32-byte hashes drown log lines; four bytes is enough to correlate
/// entries against an indexer.
pub fn short_hex(bytes: impl AsRef<[u8]>) -> String {
    let bytes = bytes.as_ref();
    let shown = &bytes[..bytes.len().min(4)];
    format!("0x{}…", hex::encode(shown))
}
