pub mod core;
pub mod error;
pub mod generator;
pub mod io;
pub mod param;
pub mod settings;
pub mod sh;

pub use crate::core::{BoundingBox, GridStep, ProbeBox};
pub use error::{Error, Result};
pub use generator::ProbeGenerator;
pub use io::{ModelContainer, Platform};
pub use param::{ParameterIo, SchemaVersion};
pub use settings::Settings;
