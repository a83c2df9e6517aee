use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Yaz0Error {
    #[error("missing Yaz0 magic")]
    InvalidMagic,

    #[error("compressed stream ends before {expected} bytes were produced (got {produced})")]
    Truncated { expected: usize, produced: usize },

    #[error("back reference of distance {distance} at output position {position}")]
    InvalidBackReference { distance: usize, position: usize },

    #[error("input of {0} bytes does not fit the 32-bit size field")]
    InputTooLarge(usize),
}
