/// ZIP local-file-header magic used by 1.x containers.
pub const LEGACY_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// True when `bytes` starts with the legacy (1.x) container signature.
pub fn is_legacy_container(bytes: &[u8]) -> bool {
    bytes.len() >= LEGACY_SIGNATURE.len() && bytes[..4] == LEGACY_SIGNATURE
}
