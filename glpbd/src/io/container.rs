use std::path::Path;

use glam::Vec3;

use crate::{BoundingBox, Error, Result, param::SchemaVersion};

use super::Obj;

/// Geometry files looked up inside a directory argument, in order.
pub const COURSE_MODEL_FILE_NAMES: [&str; 2] = ["course_model.szs", "course_model.obj"];

const RES_FILE_MAGIC: [u8; 4] = *b"FRES";

/// Console generation a course model targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    WiiU,
    Switch,
}

impl Platform {
    pub const fn schema_version(self) -> SchemaVersion {
        match self {
            Platform::WiiU => SchemaVersion::V1,
            Platform::Switch => SchemaVersion::V2,
        }
    }

    /// Switch probe files ship Yaz0 compressed.
    pub const fn is_compressed_output(self) -> bool {
        matches!(self, Platform::Switch)
    }

    pub const fn output_file_name(self) -> &'static str {
        match self {
            Platform::WiiU => "course.bglpbd",
            Platform::Switch => "course_bglpbd.szs",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::WiiU => f.write_str("Wii U"),
            Platform::Switch => f.write_str("Switch"),
        }
    }
}

/// A loaded course model.
///
/// Binary model decoders plug in here; the probe generator only needs the
/// vertex positions and the target platform.
pub trait ModelContainer {
    fn vertex_positions(&self) -> Vec<Vec3>;

    fn platform(&self) -> Platform;

    fn bounds(&self) -> Result<BoundingBox> {
        BoundingBox::from_points(self.vertex_positions())
    }
}

/// Wavefront OBJ geometry, raw for Wii U or Yaz0 wrapped for Switch.
#[derive(Debug, Clone)]
pub struct ObjContainer {
    obj: Obj,
    platform: Platform,
}

impl ObjContainer {
    pub fn new(obj: Obj, platform: Platform) -> Self {
        Self { obj, platform }
    }

    pub fn obj(&self) -> &Obj {
        &self.obj
    }
}

impl ModelContainer for ObjContainer {
    fn vertex_positions(&self) -> Vec<Vec3> {
        self.obj.vertices.clone()
    }

    fn platform(&self) -> Platform {
        self.platform
    }

    fn bounds(&self) -> Result<BoundingBox> {
        self.obj.bounds()
    }
}

pub fn load_geometry_container(data: &[u8]) -> Result<ObjContainer> {
    let (payload, platform) = if glpbd_yaz0::is_compressed(data) {
        (glpbd_yaz0::decompress(data)?, Platform::Switch)
    } else {
        (data.to_vec(), Platform::WiiU)
    };

    if payload.starts_with(&RES_FILE_MAGIC) {
        return Err(Error::UnsupportedContainer(
            "binary FRES models need an external model decoder".to_string(),
        ));
    }

    let obj = Obj::parse_bytes(&payload)?;

    log::info!(
        "Loaded {} geometry with {} vertices",
        platform,
        obj.vertices.len()
    );

    Ok(ObjContainer::new(obj, platform))
}

pub fn load_geometry_file<P: AsRef<Path>>(path: P) -> Result<ObjContainer> {
    let data = std::fs::read(path.as_ref())?;
    load_geometry_container(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OBJ: &[u8] = b"v -5 0 2\nv 5 10 -2\n";

    #[test]
    fn test_raw_obj_is_wii_u() {
        let container = load_geometry_container(OBJ).unwrap();

        assert_eq!(container.platform(), Platform::WiiU);
        assert_eq!(container.vertex_positions().len(), 2);
    }

    #[test]
    fn test_compressed_obj_is_switch() {
        let packed = glpbd_yaz0::compress(OBJ).unwrap();
        let container = load_geometry_container(&packed).unwrap();

        assert_eq!(container.platform(), Platform::Switch);

        let bounds = container.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(-5.0, 0.0, -2.0));
        assert_eq!(bounds.max, Vec3::new(5.0, 10.0, 2.0));
    }

    #[test]
    fn test_infinite_vertex_rejected() {
        let result = load_geometry_container(b"v 0 0 0\nv inf 1 1\n");
        assert!(matches!(result, Err(Error::Obj { line: 2, .. })));
    }

    #[test]
    fn test_res_file_rejected() {
        let packed = glpbd_yaz0::compress(b"FRES    \x00\x05\x00\x00").unwrap();
        let result = load_geometry_container(&packed);

        assert!(matches!(result, Err(Error::UnsupportedContainer(_))));
    }

    #[test]
    fn test_platform_outputs() {
        assert_eq!(Platform::WiiU.schema_version(), SchemaVersion::V1);
        assert_eq!(Platform::Switch.schema_version(), SchemaVersion::V2);
        assert!(!Platform::WiiU.is_compressed_output());
        assert_eq!(Platform::Switch.output_file_name(), "course_bglpbd.szs");
    }
}
