use std::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use glam::{Vec2, Vec3, Vec4};

use crate::{Error, Result};

use super::{
    Flags, NameTable, ParameterIo, ParameterList, ParameterObject, ParameterType,
    ParameterValue, SchemaVersion,
    consts::{
        AAMP_MAGIC, HEADER_SIZE, LIST_SIZE, MAX_LIST_DEPTH, OBJECT_SIZE, PARAMETER_SIZE,
        PARAMETER_TYPE_SHIFT,
    },
    schema,
};

pub(crate) fn read_document(bytes: &[u8]) -> Result<ParameterIo> {
    if bytes.len() < HEADER_SIZE || bytes[..AAMP_MAGIC.len()] != AAMP_MAGIC {
        return Err(Error::InvalidDocument("missing AAMP header".to_string()));
    }

    // The version field tells the byte order apart: 2 is only ever little
    // endian, 1 only ever big endian.
    let names = schema::name_table();

    if LittleEndian::read_u32(&bytes[4..8]) == SchemaVersion::V2.number() {
        Reader::<LittleEndian>::new(bytes, names).read(SchemaVersion::V2)
    } else if BigEndian::read_u32(&bytes[4..8]) == SchemaVersion::V1.number() {
        Reader::<BigEndian>::new(bytes, names).read(SchemaVersion::V1)
    } else {
        Err(Error::UnsupportedVersion(LittleEndian::read_u32(
            &bytes[4..8],
        )))
    }
}

/// Records still allowed by the header counts. Reading stops once a table
/// would be read more often than the header declares.
#[derive(Debug, Default)]
struct RecordBudget {
    lists: usize,
    objects: usize,
    parameters: usize,
}

fn take(remaining: &mut usize, count: usize, what: &str) -> Result<()> {
    *remaining = remaining.checked_sub(count).ok_or_else(|| {
        Error::InvalidDocument(format!("document references more {what} than its header declares"))
    })?;
    Ok(())
}

struct Reader<'a, B: ByteOrder> {
    bytes: &'a [u8],
    names: NameTable,
    budget: RecordBudget,
    _order: PhantomData<B>,
}

impl<'a, B: ByteOrder> Reader<'a, B> {
    fn new(bytes: &'a [u8], names: NameTable) -> Self {
        Self {
            bytes,
            names,
            budget: RecordBudget::default(),
            _order: PhantomData,
        }
    }

    fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.bytes.get(offset..end))
            .ok_or_else(|| {
                Error::InvalidDocument(format!(
                    "read of {len} bytes at 0x{offset:x} is out of bounds"
                ))
            })
    }

    fn u16_at(&self, offset: usize) -> Result<u16> {
        Ok(B::read_u16(self.slice(offset, 2)?))
    }

    fn u32_at(&self, offset: usize) -> Result<u32> {
        Ok(B::read_u32(self.slice(offset, 4)?))
    }

    fn f32_at(&self, offset: usize) -> Result<f32> {
        Ok(B::read_f32(self.slice(offset, 4)?))
    }

    fn read(mut self, version: SchemaVersion) -> Result<ParameterIo> {
        let flags = Flags::from_bits_truncate(self.u32_at(8)?);
        if flags.contains(Flags::LITTLE_ENDIAN) != version.is_little_endian() {
            return Err(Error::InvalidDocument(format!(
                "flags {flags:?} disagree with version {version}"
            )));
        }

        let file_size = self.u32_at(12)? as usize;
        if file_size > self.bytes.len() {
            return Err(Error::InvalidDocument(format!(
                "header declares {file_size} bytes, got {}",
                self.bytes.len()
            )));
        }

        let pio_version = self.u32_at(16)?;
        let pio_offset = self.u32_at(20)? as usize;

        self.budget = RecordBudget {
            lists: self.u32_at(24)? as usize,
            objects: self.u32_at(28)? as usize,
            parameters: self.u32_at(32)? as usize,
        };
        take(&mut self.budget.lists, 1, "lists")?;

        let type_bytes = self.slice(HEADER_SIZE, pio_offset)?;
        let type_len = type_bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(type_bytes.len());
        let pio_type = String::from_utf8_lossy(&type_bytes[..type_len]).into_owned();

        let root = self.read_list(HEADER_SIZE + pio_offset, 0)?;

        Ok(ParameterIo::from_parts(version, pio_type, pio_version, root))
    }

    fn read_list(&mut self, offset: usize, depth: usize) -> Result<ParameterList> {
        if depth > MAX_LIST_DEPTH {
            return Err(Error::InvalidDocument(format!(
                "lists nested deeper than {MAX_LIST_DEPTH}"
            )));
        }

        let mut list = ParameterList::new(self.names.resolve(self.u32_at(offset)?));

        let lists_offset = offset + self.u16_at(offset + 4)? as usize * 4;
        let num_lists = self.u16_at(offset + 6)? as usize;
        let objects_offset = offset + self.u16_at(offset + 8)? as usize * 4;
        let num_objects = self.u16_at(offset + 10)? as usize;

        take(&mut self.budget.lists, num_lists, "lists")?;
        take(&mut self.budget.objects, num_objects, "objects")?;

        for i in 0..num_objects {
            list.push_object(self.read_object(objects_offset + i * OBJECT_SIZE)?);
        }

        for i in 0..num_lists {
            list.push_list(self.read_list(lists_offset + i * LIST_SIZE, depth + 1)?);
        }

        Ok(list)
    }

    fn read_object(&mut self, offset: usize) -> Result<ParameterObject> {
        let mut object = ParameterObject::new(self.names.resolve(self.u32_at(offset)?));

        let parameters_offset = offset + self.u16_at(offset + 4)? as usize * 4;
        let num_parameters = self.u16_at(offset + 6)? as usize;

        take(&mut self.budget.parameters, num_parameters, "parameters")?;

        for i in 0..num_parameters {
            let position = parameters_offset + i * PARAMETER_SIZE;
            let name = self.names.resolve(self.u32_at(position)?);
            let value = self.read_parameter(position)?;
            object.set(name, value);
        }

        Ok(object)
    }

    fn read_parameter(&self, position: usize) -> Result<ParameterValue> {
        let packed = self.u32_at(position + 4)?;
        let data = position + (packed & 0x00FF_FFFF) as usize * 4;
        let type_id = (packed >> PARAMETER_TYPE_SHIFT) as u8;

        let ty = ParameterType::from_id(type_id).ok_or_else(|| {
            Error::InvalidDocument(format!("unsupported parameter type {type_id}"))
        })?;

        let value = match ty {
            ParameterType::Bool => ParameterValue::Bool(self.u32_at(data)? != 0),
            ParameterType::F32 => ParameterValue::F32(self.f32_at(data)?),
            ParameterType::Int => ParameterValue::Int(self.u32_at(data)? as i32),
            ParameterType::U32 => ParameterValue::U32(self.u32_at(data)?),
            ParameterType::Vec2 => {
                ParameterValue::Vec2(Vec2::new(self.f32_at(data)?, self.f32_at(data + 4)?))
            }
            ParameterType::Vec3 => ParameterValue::Vec3(Vec3::new(
                self.f32_at(data)?,
                self.f32_at(data + 4)?,
                self.f32_at(data + 8)?,
            )),
            ParameterType::Vec4 => ParameterValue::Vec4(Vec4::new(
                self.f32_at(data)?,
                self.f32_at(data + 4)?,
                self.f32_at(data + 8)?,
                self.f32_at(data + 12)?,
            )),
            ParameterType::BufferInt => ParameterValue::BufferInt(
                self.read_buffer(data, |bytes| B::read_u32(bytes) as i32)?,
            ),
            ParameterType::BufferF32 => {
                ParameterValue::BufferF32(self.read_buffer(data, B::read_f32)?)
            }
            ParameterType::BufferU32 => {
                ParameterValue::BufferU32(self.read_buffer(data, B::read_u32)?)
            }
        };

        Ok(value)
    }

    fn read_buffer<T>(&self, data: usize, read: impl Fn(&[u8]) -> T) -> Result<Vec<T>> {
        let count_offset = data.checked_sub(4).ok_or_else(|| {
            Error::InvalidDocument("buffer data has no room for its count".to_string())
        })?;
        let count = self.u32_at(count_offset)? as usize;

        let bytes = self.slice(data, count.saturating_mul(4))?;

        Ok(bytes.chunks_exact(4).map(read).collect())
    }
}
