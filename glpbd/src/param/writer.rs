use std::io::Write;

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};

use crate::{Error, Result};

use super::{
    Name, ParameterIo, ParameterList, ParameterObject, ParameterValue, SchemaVersion,
    consts::{
        AAMP_MAGIC, HEADER_SIZE, LIST_SIZE, MAX_DATA_OFFSET, OBJECT_SIZE, PARAMETER_SIZE,
        PARAMETER_TYPE_SHIFT,
    },
};

pub(crate) fn write_document(pio: &ParameterIo) -> Result<Vec<u8>> {
    match pio.version() {
        SchemaVersion::V1 => write::<BigEndian>(pio),
        SchemaVersion::V2 => write::<LittleEndian>(pio),
    }
}

/// Flattened tables in file order.
///
/// Lists are visited breadth first so the children of each list, the objects
/// of each list and the parameters of each object end up contiguous.
struct Layout<'a> {
    lists: Vec<&'a ParameterList>,
    first_child: Vec<usize>,
    objects: Vec<&'a ParameterObject>,
    first_object: Vec<usize>,
    parameters: Vec<(&'a Name, &'a ParameterValue)>,
    first_parameter: Vec<usize>,
}

impl<'a> Layout<'a> {
    fn new(root: &'a ParameterList) -> Self {
        let mut lists = vec![root];
        let mut first_child = Vec::new();

        let mut i = 0;
        while i < lists.len() {
            let list = lists[i];
            first_child.push(lists.len());
            lists.extend(list.lists());
            i += 1;
        }

        let mut objects = Vec::new();
        let mut first_object = Vec::with_capacity(lists.len());
        for list in lists.iter() {
            first_object.push(objects.len());
            objects.extend(list.objects());
        }

        let mut parameters = Vec::new();
        let mut first_parameter = Vec::with_capacity(objects.len());
        for object in objects.iter() {
            first_parameter.push(parameters.len());
            parameters.extend(object.parameters());
        }

        Self {
            lists,
            first_child,
            objects,
            first_object,
            parameters,
            first_parameter,
        }
    }
}

fn pio_type_size(pio_type: &str) -> usize {
    (pio_type.len() + 1).next_multiple_of(4)
}

/// Offset from `from` to `to` in 4-byte units, as stored in a `u16` field.
fn relative_u16(from: usize, to: usize, what: &str) -> Result<u16> {
    debug_assert!(to >= from && (to - from) % 4 == 0);

    u16::try_from((to - from) / 4).map_err(|_| {
        Error::DocumentTooLarge(format!("{what} offset {} exceeds 16 bits", to - from))
    })
}

fn count_u16(count: usize, what: &str) -> Result<u16> {
    u16::try_from(count)
        .map_err(|_| Error::DocumentTooLarge(format!("{count} {what} exceed 16 bits")))
}

fn count_u32(count: usize, what: &str) -> Result<u32> {
    u32::try_from(count)
        .map_err(|_| Error::DocumentTooLarge(format!("{count} {what} exceed 32 bits")))
}

fn write_value<B: ByteOrder>(data: &mut Vec<u8>, value: &ParameterValue) -> Result<()> {
    match value {
        ParameterValue::Bool(value) => data.write_u32::<B>(u32::from(*value))?,
        ParameterValue::F32(value) => data.write_f32::<B>(*value)?,
        ParameterValue::Int(value) => data.write_i32::<B>(*value)?,
        ParameterValue::U32(value) => data.write_u32::<B>(*value)?,
        ParameterValue::Vec2(value) => {
            for component in value.to_array() {
                data.write_f32::<B>(component)?;
            }
        }
        ParameterValue::Vec3(value) => {
            for component in value.to_array() {
                data.write_f32::<B>(component)?;
            }
        }
        ParameterValue::Vec4(value) => {
            for component in value.to_array() {
                data.write_f32::<B>(component)?;
            }
        }
        ParameterValue::BufferInt(values) => {
            data.write_u32::<B>(count_u32(values.len(), "buffer elements")?)?;
            for value in values {
                data.write_i32::<B>(*value)?;
            }
        }
        ParameterValue::BufferF32(values) => {
            data.write_u32::<B>(count_u32(values.len(), "buffer elements")?)?;
            for value in values {
                data.write_f32::<B>(*value)?;
            }
        }
        ParameterValue::BufferU32(values) => {
            data.write_u32::<B>(count_u32(values.len(), "buffer elements")?)?;
            for value in values {
                data.write_u32::<B>(*value)?;
            }
        }
    }

    Ok(())
}

fn write<B: ByteOrder>(pio: &ParameterIo) -> Result<Vec<u8>> {
    let layout = Layout::new(pio.root());

    let type_size = pio_type_size(pio.pio_type());
    let lists_start = HEADER_SIZE + type_size;
    let objects_start = lists_start + layout.lists.len() * LIST_SIZE;
    let parameters_start = objects_start + layout.objects.len() * OBJECT_SIZE;
    let data_start = parameters_start + layout.parameters.len() * PARAMETER_SIZE;

    // Data section first, so every parameter knows where its value lives.
    let mut data = Vec::new();
    let mut data_positions = Vec::with_capacity(layout.parameters.len());
    for (_, value) in layout.parameters.iter() {
        let prefix = if value.parameter_type().is_buffer() { 4 } else { 0 };
        data_positions.push(data_start + data.len() + prefix);
        write_value::<B>(&mut data, value)?;
    }

    let file_size = data_start + data.len();
    let mut out = Vec::with_capacity(file_size);

    let version = pio.version();
    out.write_all(&AAMP_MAGIC)?;
    out.write_u32::<B>(version.number())?;
    out.write_u32::<B>(version.flags().bits())?;
    out.write_u32::<B>(count_u32(file_size, "bytes")?)?;
    out.write_u32::<B>(pio.pio_version())?;
    out.write_u32::<B>(count_u32(type_size, "bytes")?)?;
    out.write_u32::<B>(count_u32(layout.lists.len(), "lists")?)?;
    out.write_u32::<B>(count_u32(layout.objects.len(), "objects")?)?;
    out.write_u32::<B>(count_u32(layout.parameters.len(), "parameters")?)?;
    out.write_u32::<B>(count_u32(data.len(), "bytes")?)?;
    out.write_u32::<B>(0)?; // string section
    out.write_u32::<B>(0)?; // unknown section
    debug_assert_eq!(out.len(), HEADER_SIZE);

    out.write_all(pio.pio_type().as_bytes())?;
    out.resize(lists_start, 0);

    for (i, list) in layout.lists.iter().enumerate() {
        let position = lists_start + i * LIST_SIZE;

        let lists_offset = if list.lists().is_empty() {
            0
        } else {
            let target = lists_start + layout.first_child[i] * LIST_SIZE;
            relative_u16(position, target, "list")?
        };
        let objects_offset = if list.objects().is_empty() {
            0
        } else {
            let target = objects_start + layout.first_object[i] * OBJECT_SIZE;
            relative_u16(position, target, "object")?
        };

        out.write_u32::<B>(list.name().hash())?;
        out.write_u16::<B>(lists_offset)?;
        out.write_u16::<B>(count_u16(list.lists().len(), "lists")?)?;
        out.write_u16::<B>(objects_offset)?;
        out.write_u16::<B>(count_u16(list.objects().len(), "objects")?)?;
    }

    for (i, object) in layout.objects.iter().enumerate() {
        let position = objects_start + i * OBJECT_SIZE;

        let parameters_offset = if object.is_empty() {
            0
        } else {
            let target = parameters_start + layout.first_parameter[i] * PARAMETER_SIZE;
            relative_u16(position, target, "parameter")?
        };

        out.write_u32::<B>(object.name().hash())?;
        out.write_u16::<B>(parameters_offset)?;
        out.write_u16::<B>(count_u16(object.len(), "parameters")?)?;
    }

    for (i, (name, value)) in layout.parameters.iter().enumerate() {
        let position = parameters_start + i * PARAMETER_SIZE;
        let data_offset = (data_positions[i] - position) / 4;

        if data_offset > MAX_DATA_OFFSET {
            return Err(Error::DocumentTooLarge(format!(
                "data offset of parameter {name} exceeds 24 bits"
            )));
        }

        let packed = data_offset as u32
            | (u32::from(value.parameter_type().id()) << PARAMETER_TYPE_SHIFT);

        out.write_u32::<B>(name.hash())?;
        out.write_u32::<B>(packed)?;
    }

    debug_assert_eq!(out.len(), data_start);
    out.extend_from_slice(&data);

    log::debug!(
        "Encoded {} document: {} lists, {} objects, {} parameters, {} bytes",
        version,
        layout.lists.len(),
        layout.objects.len(),
        layout.parameters.len(),
        out.len()
    );

    Ok(out)
}
