use sha2::{Digest, Sha256};

/// Stable identity of a content file, logged on load so two runs can be
/// compared without diffing the JSON.
pub(crate) fn fingerprint_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    to_hex_lower(&hasher.finalize())
}

fn to_hex_lower(bytes: &[u8]) -> String {
    use std::fmt::Write as _;

    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(&mut output, "{byte:02x}");
    }
    output
}
