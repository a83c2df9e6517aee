//! Parameter documents (AAMP).
//!
//! A document is a tree of named lists holding named objects, each object an
//! ordered set of typed parameters. Names are stored as CRC-32 hashes in the
//! binary form. Field order is significant and is preserved through
//! serialization.

pub mod consts;
mod flags;
mod name;
mod reader;
pub mod schema;
mod tree;
mod value;
mod version;
mod writer;

pub use flags::Flags;
pub use name::{Name, NameTable};
pub use schema::DocumentBuilder;
pub use tree::{ParameterIo, ParameterList, ParameterNode, ParameterObject};
pub use value::{ParameterType, ParameterValue};
pub use version::SchemaVersion;
