//! Fixed layout of the light probe document.
//!
//! ```text
//! param_root
//! ├── root_grid        aabb_min_pos, aabb_max_pos, voxel_step_pos
//! ├── param_obj        version, *_light_indirect, emission_scale, used_box_num
//! └── b_{index} (one per probe box)
//!     ├── param_obj        index, type
//!     ├── grid             aabb_min_pos, aabb_max_pos, voxel_step_pos
//!     ├── sh_index_buffer  type, used_index_num, max_index_num, index_buffer
//!     └── sh_data_buffer   type, max_sh_data_num, used_data_num, per_probe_float_num, data_buffer
//! ```
//!
//! Each object has its own builder function, and [`validate`] checks a whole
//! document against the same field tables.

use crate::{
    BoundingBox, Error, GridStep, ProbeBox, Result, Settings,
    core::pack_indices,
    sh::FLOATS_PER_PROBE,
};

use super::{
    Name, NameTable, ParameterIo, ParameterList, ParameterObject, ParameterType, SchemaVersion,
    tree::ROOT_LIST,
};

pub const ROOT_GRID: &str = "root_grid";
pub const PARAM_OBJ: &str = "param_obj";
pub const GRID: &str = "grid";
pub const SH_INDEX_BUFFER: &str = "sh_index_buffer";
pub const SH_DATA_BUFFER: &str = "sh_data_buffer";

pub const PARAMETERS_VERSION: u32 = 1;
pub const BOX_TYPE: i32 = 0;
pub const INDEX_BUFFER_TYPE: i32 = 1;
pub const DATA_BUFFER_TYPE: i32 = 0;

/// Box lists named `b_0 .. b_{n-1}` resolved when reading documents.
pub const MAX_RESOLVED_BOXES: usize = 64;

pub const KNOWN_NAMES: &[&str] = &[
    ROOT_LIST,
    ROOT_GRID,
    PARAM_OBJ,
    GRID,
    SH_INDEX_BUFFER,
    SH_DATA_BUFFER,
    "aabb_min_pos",
    "aabb_max_pos",
    "voxel_step_pos",
    "version",
    "dir_light_indirect",
    "point_light_indirect",
    "spot_light_indirect",
    "emission_scale",
    "used_box_num",
    "index",
    "type",
    "used_index_num",
    "max_index_num",
    "index_buffer",
    "max_sh_data_num",
    "used_data_num",
    "per_probe_float_num",
    "data_buffer",
];

pub fn name_table() -> NameTable {
    let mut table = NameTable::with_names(KNOWN_NAMES.iter().copied());
    for index in 0..MAX_RESOLVED_BOXES {
        table.add(&format!("b_{index}"));
    }
    table
}

fn to_i32(value: usize, what: &str) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| Error::DocumentTooLarge(format!("{what} of {value} exceeds i32")))
}

/// `root_grid` or a box `grid`.
pub fn grid_object(name: &str, bounds: &BoundingBox, step: GridStep) -> ParameterObject {
    ParameterObject::new(name)
        .with("aabb_min_pos", bounds.min)
        .with("aabb_max_pos", bounds.max)
        .with("voxel_step_pos", step.as_vec3())
}

/// The root `param_obj`.
pub fn root_parameters(settings: &Settings, used_box_num: u32) -> ParameterObject {
    ParameterObject::new(PARAM_OBJ)
        .with("version", PARAMETERS_VERSION)
        .with("dir_light_indirect", settings.dir_light_indirect)
        .with("point_light_indirect", settings.point_light_indirect)
        .with("spot_light_indirect", settings.spot_light_indirect)
        .with("emission_scale", settings.emission_scale)
        .with("used_box_num", used_box_num)
}

/// The `param_obj` of a probe box.
pub fn box_parameters(index: i32) -> ParameterObject {
    ParameterObject::new(PARAM_OBJ)
        .with("index", index)
        .with("type", BOX_TYPE)
}

/// `index_count` is the number of 16-bit indices, `packed` their 32-bit packing.
pub fn sh_index_buffer(index_count: usize, packed: Vec<u32>) -> Result<ParameterObject> {
    let index_count = to_i32(index_count, "index count")?;

    Ok(ParameterObject::new(SH_INDEX_BUFFER)
        .with("type", INDEX_BUFFER_TYPE)
        .with("used_index_num", index_count)
        .with("max_index_num", index_count)
        .with("index_buffer", packed))
}

pub fn sh_data_buffer(sh_buffer: Vec<f32>) -> Result<ParameterObject> {
    if sh_buffer.len() % FLOATS_PER_PROBE != 0 {
        return Err(Error::InvalidConfiguration(format!(
            "probe data of {} floats is not a multiple of {FLOATS_PER_PROBE}",
            sh_buffer.len()
        )));
    }

    let probe_count = to_i32(sh_buffer.len() / FLOATS_PER_PROBE, "probe count")?;

    Ok(ParameterObject::new(SH_DATA_BUFFER)
        .with("type", DATA_BUFFER_TYPE)
        .with("max_sh_data_num", probe_count)
        .with("used_data_num", probe_count)
        .with("per_probe_float_num", FLOATS_PER_PROBE as i32)
        .with("data_buffer", sh_buffer))
}

/// The `b_{index}` list of one probe box.
pub fn probe_box_list(probe_box: &ProbeBox) -> Result<ParameterList> {
    let packed = pack_indices(&probe_box.index_buffer);

    Ok(ParameterList::new(probe_box.name())
        .with_object(box_parameters(probe_box.index))
        .with_object(grid_object(GRID, &probe_box.bounds, probe_box.step))
        .with_object(sh_index_buffer(probe_box.index_buffer.len(), packed)?)
        .with_object(sh_data_buffer(probe_box.sh_buffer.clone())?))
}

/// Assembles a light probe document for one schema version.
///
/// The version is chosen at construction and cannot change afterwards.
#[derive(Debug)]
pub struct DocumentBuilder {
    version: SchemaVersion,
    boxes: Vec<ParameterList>,
}

impl DocumentBuilder {
    pub fn new(version: SchemaVersion) -> Self {
        Self {
            version,
            boxes: Vec::new(),
        }
    }

    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    pub fn push_box(&mut self, probe_box: &ProbeBox) -> Result<&mut Self> {
        let list = probe_box_list(probe_box)?;

        log::debug!(
            "Probe box {}: {} indices, {} probes",
            list.name(),
            probe_box.index_buffer.len(),
            probe_box.probe_count()
        );

        self.boxes.push(list);
        Ok(self)
    }

    /// Emits the root objects followed by every pushed box list.
    pub fn build(
        self,
        grid_bounds: &BoundingBox,
        step: GridStep,
        settings: &Settings,
    ) -> Result<ParameterIo> {
        let used_box_num = u32::try_from(self.boxes.len())
            .map_err(|_| Error::DocumentTooLarge(format!("{} probe boxes", self.boxes.len())))?;

        let mut pio = ParameterIo::new(self.version);
        let root = pio.root_mut();

        root.push_object(grid_object(ROOT_GRID, grid_bounds, step));
        root.push_object(root_parameters(settings, used_box_num));

        for list in self.boxes {
            root.push_list(list);
        }

        validate(&pio)?;

        Ok(pio)
    }
}

const ROOT_OBJECTS: [&str; 2] = [ROOT_GRID, PARAM_OBJ];
const BOX_OBJECTS: [&str; 4] = [PARAM_OBJ, GRID, SH_INDEX_BUFFER, SH_DATA_BUFFER];

const GRID_FIELDS: &[(&str, ParameterType)] = &[
    ("aabb_min_pos", ParameterType::Vec3),
    ("aabb_max_pos", ParameterType::Vec3),
    ("voxel_step_pos", ParameterType::Vec3),
];
const ROOT_PARAMETER_FIELDS: &[(&str, ParameterType)] = &[
    ("version", ParameterType::U32),
    ("dir_light_indirect", ParameterType::F32),
    ("point_light_indirect", ParameterType::F32),
    ("spot_light_indirect", ParameterType::F32),
    ("emission_scale", ParameterType::F32),
    ("used_box_num", ParameterType::U32),
];
const BOX_PARAMETER_FIELDS: &[(&str, ParameterType)] =
    &[("index", ParameterType::Int), ("type", ParameterType::Int)];
const SH_INDEX_BUFFER_FIELDS: &[(&str, ParameterType)] = &[
    ("type", ParameterType::Int),
    ("used_index_num", ParameterType::Int),
    ("max_index_num", ParameterType::Int),
    ("index_buffer", ParameterType::BufferU32),
];
const SH_DATA_BUFFER_FIELDS: &[(&str, ParameterType)] = &[
    ("type", ParameterType::Int),
    ("max_sh_data_num", ParameterType::Int),
    ("used_data_num", ParameterType::Int),
    ("per_probe_float_num", ParameterType::Int),
    ("data_buffer", ParameterType::BufferF32),
];

fn check_names<'a>(
    what: &str,
    actual: impl ExactSizeIterator<Item = &'a Name>,
    expected: &[&str],
) -> Result<()> {
    let len = actual.len();
    if len != expected.len() {
        return Err(Error::InvalidDocument(format!(
            "{what} has {len} entries, expected {}",
            expected.len()
        )));
    }

    for (name, expected) in actual.zip(expected) {
        if !name.matches(expected) {
            return Err(Error::InvalidDocument(format!(
                "{what}: found {name} where {expected} belongs"
            )));
        }
    }

    Ok(())
}

fn check_fields(object: &ParameterObject, fields: &[(&str, ParameterType)]) -> Result<()> {
    let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
    check_names(
        &format!("object {}", object.name()),
        object.parameters().map(|(name, _)| name),
        &names,
    )?;

    for ((name, value), (_, ty)) in object.parameters().zip(fields) {
        if value.parameter_type() != *ty {
            return Err(Error::InvalidDocument(format!(
                "{}.{name} is {:?}, expected {ty:?}",
                object.name(),
                value.parameter_type()
            )));
        }
    }

    Ok(())
}

/// Checks a document against the light probe layout: object and field
/// names, order and types, and a box count matching `used_box_num`.
pub fn validate(pio: &ParameterIo) -> Result<()> {
    let root = pio.root();

    if !root.name().matches(ROOT_LIST) {
        return Err(Error::InvalidDocument(format!(
            "root list is {}, expected {ROOT_LIST}",
            root.name()
        )));
    }

    check_names(
        "root objects",
        root.objects().iter().map(|object| object.name()),
        &ROOT_OBJECTS,
    )?;
    check_fields(&root.objects()[0], GRID_FIELDS)?;
    check_fields(&root.objects()[1], ROOT_PARAMETER_FIELDS)?;

    let used_box_num = root.objects()[1]
        .get("used_box_num")
        .and_then(|value| value.as_u32())
        .unwrap_or_default() as usize;

    if used_box_num != root.lists().len() {
        return Err(Error::InvalidDocument(format!(
            "used_box_num is {used_box_num} but the root holds {} boxes",
            root.lists().len()
        )));
    }

    for list in root.lists() {
        let what = format!("box {}", list.name());

        if !list.lists().is_empty() {
            return Err(Error::InvalidDocument(format!("{what} has sub-lists")));
        }

        check_names(
            &what,
            list.objects().iter().map(|object| object.name()),
            &BOX_OBJECTS,
        )?;

        let objects = list.objects();
        check_fields(&objects[0], BOX_PARAMETER_FIELDS)?;
        check_fields(&objects[1], GRID_FIELDS)?;
        check_fields(&objects[2], SH_INDEX_BUFFER_FIELDS)?;
        check_fields(&objects[3], SH_DATA_BUFFER_FIELDS)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::param::ParameterValue;

    fn unit_bounds() -> BoundingBox {
        BoundingBox::with_min_max(Vec3::ZERO, Vec3::splat(1000.0))
    }

    fn build(version: SchemaVersion, box_count: i32) -> ParameterIo {
        let mut builder = DocumentBuilder::new(version);
        for index in 0..box_count {
            let probe_box =
                ProbeBox::constant_color(index, unit_bounds(), GridStep::COARSE, Vec3::ONE)
                    .unwrap();
            builder.push_box(&probe_box).unwrap();
        }

        builder
            .build(&unit_bounds(), GridStep::COARSE, &Settings::default())
            .unwrap()
    }

    #[test]
    fn test_root_layout() {
        let pio = build(SchemaVersion::V2, 1);
        let root = pio.root();

        assert_eq!(root.objects().len(), 2);
        assert_eq!(root.lists().len(), 1);
        assert!(root.objects()[0].name().matches("root_grid"));
        assert!(root.objects()[1].name().matches("param_obj"));
        assert!(root.lists()[0].name().matches("b_0"));
    }

    #[test]
    fn test_root_parameters() {
        let pio = build(SchemaVersion::V1, 1);
        let params = pio.root().object(PARAM_OBJ).unwrap();

        assert_eq!(params.get("version"), Some(&ParameterValue::U32(1)));
        assert_eq!(params.get("dir_light_indirect"), Some(&ParameterValue::F32(0.525)));
        assert_eq!(params.get("emission_scale"), Some(&ParameterValue::F32(8.0)));
        assert_eq!(params.get("used_box_num"), Some(&ParameterValue::U32(1)));
    }

    #[test]
    fn test_box_layout() {
        let pio = build(SchemaVersion::V2, 1);
        let list = pio.root().list("b_0").unwrap();
        let names: Vec<String> = list.objects().iter().map(|o| o.name().to_string()).collect();

        assert_eq!(names, BOX_OBJECTS);
        assert!(list.lists().is_empty());

        let index_buffer = list.object(SH_INDEX_BUFFER).unwrap();
        assert_eq!(index_buffer.get("type"), Some(&ParameterValue::Int(1)));
        assert_eq!(index_buffer.get("used_index_num"), Some(&ParameterValue::Int(8)));
        assert_eq!(index_buffer.get("max_index_num"), Some(&ParameterValue::Int(8)));
        assert_eq!(
            index_buffer.get("index_buffer"),
            Some(&ParameterValue::BufferU32(vec![0; 4]))
        );

        let data_buffer = list.object(SH_DATA_BUFFER).unwrap();
        assert_eq!(data_buffer.get("type"), Some(&ParameterValue::Int(0)));
        assert_eq!(data_buffer.get("max_sh_data_num"), Some(&ParameterValue::Int(1)));
        assert_eq!(data_buffer.get("used_data_num"), Some(&ParameterValue::Int(1)));
        assert_eq!(data_buffer.get("per_probe_float_num"), Some(&ParameterValue::Int(27)));
    }

    #[test]
    fn test_multiple_boxes() {
        let pio = build(SchemaVersion::V2, 3);

        assert_eq!(pio.root().lists().len(), 3);
        assert_eq!(
            pio.root().object(PARAM_OBJ).unwrap().get("used_box_num"),
            Some(&ParameterValue::U32(3))
        );
        assert!(pio.root().list("b_2").is_some());
        validate(&pio).unwrap();
    }

    #[test]
    fn test_builder_keeps_version() {
        let builder = DocumentBuilder::new(SchemaVersion::V1);
        assert_eq!(builder.version(), SchemaVersion::V1);

        let pio = builder
            .build(&unit_bounds(), GridStep::COARSE, &Settings::default())
            .unwrap();
        assert_eq!(pio.version(), SchemaVersion::V1);
        assert!(pio.root().lists().is_empty());
    }

    #[test]
    fn test_sh_data_buffer_rejects_partial_probe() {
        let result = sh_data_buffer(vec![0.0; 26]);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_validate_rejects_box_count_mismatch() {
        let mut pio = build(SchemaVersion::V2, 1);
        pio.root_mut().push_list(ParameterList::new("b_1"));

        assert!(matches!(validate(&pio), Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn test_validate_rejects_field_type_drift() {
        let mut pio = ParameterIo::new(SchemaVersion::V2);
        let root = pio.root_mut();
        root.push_object(grid_object(ROOT_GRID, &unit_bounds(), GridStep::COARSE));
        root.push_object(root_parameters(&Settings::default(), 0).with("version", 1i32));

        assert!(matches!(validate(&pio), Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn test_validate_rejects_wrong_object_order() {
        let mut pio = ParameterIo::new(SchemaVersion::V2);
        let root = pio.root_mut();
        root.push_object(root_parameters(&Settings::default(), 0));
        root.push_object(grid_object(ROOT_GRID, &unit_bounds(), GridStep::COARSE));

        assert!(matches!(validate(&pio), Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn test_name_table_resolves_boxes() {
        let table = name_table();
        let name = table.resolve(Name::new("b_63").hash());

        assert_eq!(name.as_str(), Some("b_63"));
    }
}
