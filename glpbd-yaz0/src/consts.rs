pub const YAZ0_MAGIC: [u8; 4] = *b"Yaz0";
pub const HEADER_SIZE: usize = 16;

pub(crate) const WINDOW_SIZE: usize = 0x1000;
pub(crate) const MIN_MATCH: usize = 3;
// Longest match encodable in the two byte form (nibble 0xF + 2).
pub(crate) const SHORT_MATCH_MAX: usize = 0x11;
// Three byte form stores `length - 0x12` in a single byte.
pub(crate) const LONG_MATCH_BIAS: usize = 0x12;
pub(crate) const MAX_MATCH: usize = 0xFF + LONG_MATCH_BIAS;
