mod container;
mod export;
pub mod obj_reader;

pub use container::{
    COURSE_MODEL_FILE_NAMES, ModelContainer, ObjContainer, Platform, load_geometry_container,
    load_geometry_file,
};
pub use export::{ByteSize, save, save_compressed, write_atomic};
pub use obj_reader::Obj;
