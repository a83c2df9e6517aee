pub const AAMP_MAGIC: [u8; 4] = *b"AAMP";

pub const HEADER_SIZE: usize = 0x30;
pub const LIST_SIZE: usize = 12;
pub const OBJECT_SIZE: usize = 8;
pub const PARAMETER_SIZE: usize = 8;

pub const PIO_TYPE: &str = "glpbd";
pub const PIO_VERSION: u32 = 0;

/// Parameter data offsets are 24-bit, in 4-byte units.
pub const MAX_DATA_OFFSET: usize = (1 << 24) - 1;
pub const PARAMETER_TYPE_SHIFT: u32 = 24;

// Nesting limit when reading untrusted documents.
pub const MAX_LIST_DEPTH: usize = 64;
