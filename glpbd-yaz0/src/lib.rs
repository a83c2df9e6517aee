//! Yaz0 container codec.
//!
//! Yaz0 is the LZ77-style wrapper used for `.szs` archives. A stream starts
//! with a 16 byte header (magic, big endian decompressed size, reserved
//! bytes) followed by groups of eight chunks, each group introduced by a code
//! byte whose bits select between a literal byte (bit set) and a back
//! reference into the last 4096 output bytes (bit clear).
//!
//! ```rust
//! let data = b"probe probe probe probe".to_vec();
//! let packed = glpbd_yaz0::compress(&data).unwrap();
//! assert_eq!(glpbd_yaz0::decompress(&packed).unwrap(), data);
//! ```

mod consts;
mod decoder;
mod encoder;
mod error;

pub use consts::{HEADER_SIZE, YAZ0_MAGIC};
pub use decoder::{decompress, decompressed_size};
pub use encoder::compress;
pub use error::Yaz0Error;

/// Returns `true` if `data` starts with a Yaz0 header.
pub fn is_compressed(data: &[u8]) -> bool {
    data.len() >= HEADER_SIZE && data[..YAZ0_MAGIC.len()] == YAZ0_MAGIC
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_compressed() {
        let packed = compress(b"abc").unwrap();
        assert!(is_compressed(&packed));
        assert!(!is_compressed(b"abc"));
        assert!(!is_compressed(b"Yaz0"));
    }
}
