use glam::{Vec2, Vec3, Vec4};

/// Type tag stored in the top byte of a parameter record.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterType {
    Bool = 0,
    F32 = 1,
    Int = 2,
    Vec2 = 3,
    Vec3 = 4,
    Vec4 = 5,
    BufferInt = 13,
    BufferF32 = 14,
    U32 = 17,
    BufferU32 = 18,
}

impl ParameterType {
    #[inline(always)]
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        Some(match id {
            0 => ParameterType::Bool,
            1 => ParameterType::F32,
            2 => ParameterType::Int,
            3 => ParameterType::Vec2,
            4 => ParameterType::Vec3,
            5 => ParameterType::Vec4,
            13 => ParameterType::BufferInt,
            14 => ParameterType::BufferF32,
            17 => ParameterType::U32,
            18 => ParameterType::BufferU32,
            _ => return None,
        })
    }

    /// Buffers are prefixed by a `u32` element count.
    pub const fn is_buffer(self) -> bool {
        matches!(
            self,
            ParameterType::BufferInt | ParameterType::BufferF32 | ParameterType::BufferU32
        )
    }

    /// Size of a scalar value, or of one element for buffers.
    pub const fn element_size(self) -> usize {
        match self {
            ParameterType::Vec2 => 8,
            ParameterType::Vec3 => 12,
            ParameterType::Vec4 => 16,
            _ => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Bool(bool),
    F32(f32),
    Int(i32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    U32(u32),
    BufferInt(Vec<i32>),
    BufferF32(Vec<f32>),
    BufferU32(Vec<u32>),
}

impl ParameterValue {
    pub const fn parameter_type(&self) -> ParameterType {
        match self {
            ParameterValue::Bool(_) => ParameterType::Bool,
            ParameterValue::F32(_) => ParameterType::F32,
            ParameterValue::Int(_) => ParameterType::Int,
            ParameterValue::Vec2(_) => ParameterType::Vec2,
            ParameterValue::Vec3(_) => ParameterType::Vec3,
            ParameterValue::Vec4(_) => ParameterType::Vec4,
            ParameterValue::U32(_) => ParameterType::U32,
            ParameterValue::BufferInt(_) => ParameterType::BufferInt,
            ParameterValue::BufferF32(_) => ParameterType::BufferF32,
            ParameterValue::BufferU32(_) => ParameterType::BufferU32,
        }
    }

    /// Bytes taken in the data section, including a buffer's count prefix.
    pub fn encoded_size(&self) -> usize {
        let element = self.parameter_type().element_size();

        match self {
            ParameterValue::BufferInt(values) => 4 + values.len() * element,
            ParameterValue::BufferF32(values) => 4 + values.len() * element,
            ParameterValue::BufferU32(values) => 4 + values.len() * element,
            _ => element,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ParameterValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            ParameterValue::U32(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ParameterValue::F32(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            ParameterValue::Vec3(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_u32_buffer(&self) -> Option<&[u32]> {
        match self {
            ParameterValue::BufferU32(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_f32_buffer(&self) -> Option<&[f32]> {
        match self {
            ParameterValue::BufferF32(values) => Some(values),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterValue::Bool(value) => write!(f, "{value}"),
            ParameterValue::F32(value) => write!(f, "{value}"),
            ParameterValue::Int(value) => write!(f, "{value}"),
            ParameterValue::Vec2(value) => write!(f, "{value}"),
            ParameterValue::Vec3(value) => write!(f, "{value}"),
            ParameterValue::Vec4(value) => write!(f, "{value}"),
            ParameterValue::U32(value) => write!(f, "{value}u"),
            ParameterValue::BufferInt(values) => write!(f, "int[{}]", values.len()),
            ParameterValue::BufferF32(values) => write!(f, "f32[{}]", values.len()),
            ParameterValue::BufferU32(values) => write!(f, "u32[{}]", values.len()),
        }
    }
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ParameterValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    ParameterValue::$variant(value)
                }
            }
        )*
    };
}

impl_from_value! {
    bool => Bool,
    f32 => F32,
    i32 => Int,
    u32 => U32,
    Vec2 => Vec2,
    Vec3 => Vec3,
    Vec4 => Vec4,
    Vec<i32> => BufferInt,
    Vec<f32> => BufferF32,
    Vec<u32> => BufferU32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id_roundtrip() {
        for ty in [
            ParameterType::Bool,
            ParameterType::F32,
            ParameterType::Int,
            ParameterType::Vec2,
            ParameterType::Vec3,
            ParameterType::Vec4,
            ParameterType::BufferInt,
            ParameterType::BufferF32,
            ParameterType::U32,
            ParameterType::BufferU32,
        ] {
            assert_eq!(ParameterType::from_id(ty.id()), Some(ty));
        }
        assert_eq!(ParameterType::from_id(7), None);
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(ParameterValue::from(1u32).parameter_type(), ParameterType::U32);
        assert_eq!(ParameterValue::from(1i32).parameter_type(), ParameterType::Int);
        assert_eq!(
            ParameterValue::from(vec![1.0f32]).parameter_type(),
            ParameterType::BufferF32
        );
    }

    #[test]
    fn test_encoded_size() {
        assert_eq!(ParameterValue::Int(0).encoded_size(), 4);
        assert_eq!(ParameterValue::Vec3(Vec3::ONE).encoded_size(), 12);
        assert_eq!(ParameterValue::BufferU32(vec![0; 4]).encoded_size(), 20);
        assert_eq!(ParameterValue::BufferF32(Vec::new()).encoded_size(), 4);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(ParameterValue::U32(5).as_u32(), Some(5));
        assert_eq!(ParameterValue::U32(5).as_i32(), None);
        assert_eq!(
            ParameterValue::BufferU32(vec![1, 2]).as_u32_buffer(),
            Some(&[1u32, 2][..])
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ParameterValue::U32(1)), "1u");
        assert_eq!(format!("{}", ParameterValue::BufferF32(vec![0.0; 27])), "f32[27]");
    }
}
